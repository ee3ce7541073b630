//! Orbit camera - rotation, zoom and camera-relative movement
//!
//! The camera orbits the centre of the playfield. Pitch tilts it up and down
//! (clamped to ±90°), yaw turns it around the vertical axis, and distance is
//! the zoom. Horizontal piece moves are interpreted relative to the yaw so
//! that "forward" always points away from the viewer.

use crate::types::{
    GameAction, CAMERA_DIST_DEFAULT, CAMERA_DIST_MAX, CAMERA_DIST_MIN, CAMERA_PITCH_DEFAULT,
    CAMERA_PITCH_LIMIT, CAMERA_YAW_DEFAULT, CAMERA_ZOOM_STEP,
};

/// A horizontal move in grid cells `(dx, dz)`, plus the fallback tried when
/// the primary direction is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub primary: (i8, i8),
    pub alternate: (i8, i8),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Up-down rotation in degrees
    pitch: f32,
    /// Left-right rotation in degrees
    yaw: f32,
    /// Distance from the playfield centre
    distance: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            pitch: CAMERA_PITCH_DEFAULT,
            yaw: CAMERA_YAW_DEFAULT,
            distance: CAMERA_DIST_DEFAULT,
        }
    }

    pub fn with_angles(pitch: f32, yaw: f32) -> Self {
        Self {
            pitch: pitch.clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT),
            yaw,
            distance: CAMERA_DIST_DEFAULT,
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move closer (mouse wheel up)
    pub fn zoom_in(&mut self) {
        self.distance = (self.distance - CAMERA_ZOOM_STEP).max(CAMERA_DIST_MIN);
    }

    /// Move farther away (mouse wheel down)
    pub fn zoom_out(&mut self) {
        self.distance = (self.distance + CAMERA_ZOOM_STEP).min(CAMERA_DIST_MAX);
    }

    /// Rotate by a drag of `(dx, dy)` units
    pub fn orbit(&mut self, dx: f32, dy: f32, degrees_per_unit: f32) {
        self.yaw += dx * degrees_per_unit;
        self.pitch = (self.pitch + dy * degrees_per_unit).clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
    }

    /// Resolve a camera-relative move into grid directions
    ///
    /// W/S follow the dominant axis of the forward vector and A/D the
    /// dominant axis of the right vector. The alternate always steps along
    /// the other axis, toward the sign of the forward vector.
    pub fn move_intent(&self, action: GameAction) -> Option<MoveIntent> {
        let angle = (self.yaw as f64).to_radians();
        let (forward_x, forward_z) = (angle.sin(), -angle.cos());
        let (right_x, right_z) = (angle.cos(), angle.sin());

        let sign = |v: f64| if v > 0.0 { 1i8 } else { -1i8 };

        let (mut move_x, mut move_z) = (0i8, 0i8);
        match action {
            GameAction::MoveForward => {
                if forward_x.abs() > forward_z.abs() {
                    move_x = sign(forward_x);
                } else {
                    move_z = sign(forward_z);
                }
            }
            GameAction::MoveBackward => {
                if forward_x.abs() > forward_z.abs() {
                    move_x = -sign(forward_x);
                } else {
                    move_z = -sign(forward_z);
                }
            }
            GameAction::MoveLeft => {
                if right_x.abs() > right_z.abs() {
                    move_x = -sign(right_x);
                } else {
                    move_z = -sign(right_z);
                }
            }
            GameAction::MoveRight => {
                if right_x.abs() > right_z.abs() {
                    move_x = sign(right_x);
                } else {
                    move_z = sign(right_z);
                }
            }
            _ => return None,
        }

        let alt_x = if move_x != 0 { 0 } else { sign(forward_x) };
        let alt_z = if move_z != 0 { 0 } else { sign(forward_z) };

        Some(MoveIntent {
            primary: (move_x, move_z),
            alternate: (alt_x, alt_z),
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cam = Camera::new();
        assert_eq!(cam.pitch(), 25.0);
        assert_eq!(cam.yaw(), -45.0);
        assert_eq!(cam.distance(), 30.0);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut cam = Camera::new();
        for _ in 0..100 {
            cam.zoom_in();
        }
        assert_eq!(cam.distance(), CAMERA_DIST_MIN);
        for _ in 0..100 {
            cam.zoom_out();
        }
        assert_eq!(cam.distance(), CAMERA_DIST_MAX);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut cam = Camera::new();
        cam.orbit(10.0, 1000.0, 0.5);
        assert_eq!(cam.pitch(), 90.0);
        assert_eq!(cam.yaw(), -40.0);
        cam.orbit(0.0, -5000.0, 0.5);
        assert_eq!(cam.pitch(), -90.0);
    }

    #[test]
    fn test_move_intent_facing_yaw_zero() {
        let cam = Camera::with_angles(25.0, 0.0);
        let fwd = cam.move_intent(GameAction::MoveForward).unwrap();
        assert_eq!(fwd.primary, (0, -1));
        assert_eq!(fwd.alternate, (-1, 0));

        let back = cam.move_intent(GameAction::MoveBackward).unwrap();
        assert_eq!(back.primary, (0, 1));

        let left = cam.move_intent(GameAction::MoveLeft).unwrap();
        assert_eq!(left.primary, (-1, 0));
        assert_eq!(left.alternate, (0, -1));

        let right = cam.move_intent(GameAction::MoveRight).unwrap();
        assert_eq!(right.primary, (1, 0));
    }

    #[test]
    fn test_move_intent_yaw_ninety() {
        let cam = Camera::with_angles(25.0, 90.0);
        assert_eq!(cam.move_intent(GameAction::MoveForward).unwrap().primary, (1, 0));
        assert_eq!(cam.move_intent(GameAction::MoveLeft).unwrap().primary, (0, -1));
        assert_eq!(cam.move_intent(GameAction::MoveRight).unwrap().primary, (0, 1));
        assert_eq!(cam.move_intent(GameAction::MoveLeft).unwrap().alternate, (1, 0));
    }

    #[test]
    fn test_move_intent_default_camera() {
        // At -45 the forward vector is a near tie; z wins for W/S, x for A/D.
        let cam = Camera::new();
        let fwd = cam.move_intent(GameAction::MoveForward).unwrap();
        assert_eq!(fwd.primary, (0, -1));
        assert_eq!(fwd.alternate, (-1, 0));

        let back = cam.move_intent(GameAction::MoveBackward).unwrap();
        assert_eq!(back.primary, (0, 1));
        assert_eq!(back.alternate, (-1, 0));

        let left = cam.move_intent(GameAction::MoveLeft).unwrap();
        assert_eq!(left.primary, (-1, 0));
        assert_eq!(left.alternate, (0, -1));

        let right = cam.move_intent(GameAction::MoveRight).unwrap();
        assert_eq!(right.primary, (1, 0));
        assert_eq!(right.alternate, (0, -1));
    }

    #[test]
    fn test_move_intent_ignores_non_moves() {
        let cam = Camera::new();
        assert_eq!(cam.move_intent(GameAction::HardDrop), None);
    }
}
