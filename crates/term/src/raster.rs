//! Software rasterizer: perspective projection, z-buffered triangles and
//! translucent lines on an RGB pixel canvas.
//!
//! A terminal cell holds two vertically stacked pixels (`▀`, foreground is
//! the upper pixel, background the lower), so the canvas is twice as tall
//! as the cell area it covers and its pixels are roughly square.

use crate::core::Camera;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Near clipping distance in eye space.
const NEAR: f32 = 0.1;

/// Light position in eye space.
const LIGHT_EYE: Vec3 = Vec3::new(5.0, 15.0, 5.0);

const AMBIENT: f32 = 0.35;
const DIFFUSE: f32 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, o: Vec3) -> f32 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            return self;
        }
        self * (1.0 / len)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, k: f32) -> Vec3 {
        Vec3::new(self.x * k, self.y * k, self.z * k)
    }
}

/// World-to-eye transform plus a perspective lens.
///
/// Equivalent to `T(0,0,-distance) · Rx(pitch) · Ry(yaw) · T(-target)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    target: Vec3,
    pitch_sin: f32,
    pitch_cos: f32,
    yaw_sin: f32,
    yaw_cos: f32,
    distance: f32,
    /// 1 / tan(fov_y / 2)
    focal: f32,
}

impl Projection {
    pub fn new(target: Vec3, pitch_deg: f32, yaw_deg: f32, distance: f32, fov_y_deg: f32) -> Self {
        let (pitch_sin, pitch_cos) = pitch_deg.to_radians().sin_cos();
        let (yaw_sin, yaw_cos) = yaw_deg.to_radians().sin_cos();
        Self {
            target,
            pitch_sin,
            pitch_cos,
            yaw_sin,
            yaw_cos,
            distance,
            focal: 1.0 / (fov_y_deg.to_radians() / 2.0).tan(),
        }
    }

    /// The main view: orbit around the playfield centre, 45° lens.
    ///
    /// `extra_yaw` is added on top of the camera (menu auto-spin).
    pub fn orbit(camera: &Camera, extra_yaw: f32) -> Self {
        Self::new(
            playfield_center(),
            camera.pitch(),
            camera.yaw() + extra_yaw,
            camera.distance(),
            45.0,
        )
    }

    /// The fixed piece-preview view: origin-centred, 35° lens.
    pub fn preview() -> Self {
        Self::new(Vec3::default(), 30.0, -30.0, 10.0, 35.0)
    }

    pub fn to_eye(&self, p: Vec3) -> Vec3 {
        let v = p - self.target;
        // Ry(yaw)
        let x1 = v.x * self.yaw_cos + v.z * self.yaw_sin;
        let z1 = -v.x * self.yaw_sin + v.z * self.yaw_cos;
        // Rx(pitch)
        let y2 = v.y * self.pitch_cos - z1 * self.pitch_sin;
        let z2 = v.y * self.pitch_sin + z1 * self.pitch_cos;
        Vec3::new(x1, y2, z2 - self.distance)
    }

    /// Rotate a direction into eye space (no translation).
    pub fn dir_to_eye(&self, d: Vec3) -> Vec3 {
        let x1 = d.x * self.yaw_cos + d.z * self.yaw_sin;
        let z1 = -d.x * self.yaw_sin + d.z * self.yaw_cos;
        let y2 = d.y * self.pitch_cos - z1 * self.pitch_sin;
        let z2 = d.y * self.pitch_sin + z1 * self.pitch_cos;
        Vec3::new(x1, y2, z2)
    }
}

/// Centre of the playfield in world coordinates.
pub fn playfield_center() -> Vec3 {
    use crate::types::{BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};
    Vec3::new(
        BOARD_WIDTH as f32 / 2.0,
        BOARD_HEIGHT as f32 / 2.0,
        BOARD_DEPTH as f32 / 2.0,
    )
}

/// A projected point: pixel coordinates and eye distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

const CUBE_FACES: [(Vec3, [usize; 4]); 6] = [
    (Vec3::new(-1.0, 0.0, 0.0), [0, 4, 6, 2]),
    (Vec3::new(1.0, 0.0, 0.0), [1, 3, 7, 5]),
    (Vec3::new(0.0, -1.0, 0.0), [0, 1, 5, 4]),
    (Vec3::new(0.0, 1.0, 0.0), [2, 6, 7, 3]),
    (Vec3::new(0.0, 0.0, -1.0), [0, 2, 3, 1]),
    (Vec3::new(0.0, 0.0, 1.0), [4, 5, 7, 6]),
];

/// Grid direction of each cube face, in `CUBE_FACES` order.
pub const FACE_NEIGHBORS: [(i8, i8, i8); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// RGB pixels plus a depth buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    color: Vec<Rgb>,
    depth: Vec<f32>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![Rgb::default(); len],
            depth: vec![f32::INFINITY; len],
        }
    }

    /// Canvas covering `cols` x `rows` terminal cells.
    pub fn for_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols, rows.saturating_mul(2))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.color.resize(len, Rgb::default());
        self.depth.resize(len, f32::INFINITY);
    }

    pub fn resize_cells(&mut self, cols: u16, rows: u16) {
        self.resize(cols, rows.saturating_mul(2));
    }

    pub fn clear(&mut self, bg: Rgb) {
        self.color.fill(bg);
        self.depth.fill(f32::INFINITY);
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        self.idx(x as i32, y as i32).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: u16, y: u16) -> Option<f32> {
        self.idx(x as i32, y as i32).map(|i| self.depth[i])
    }

    /// Project an eye-space point to pixel coordinates.
    ///
    /// Returns None for points behind the near plane.
    pub fn project(&self, proj: &Projection, eye: Vec3) -> Option<ScreenPoint> {
        let depth = -eye.z;
        if depth < NEAR || self.width == 0 || self.height == 0 {
            return None;
        }
        let w = self.width as f32;
        let h = self.height as f32;
        let aspect = w / h;
        let ndc_x = proj.focal / aspect * eye.x / depth;
        let ndc_y = proj.focal * eye.y / depth;
        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * w,
            y: (1.0 - ndc_y) * 0.5 * h,
            depth,
        })
    }

    pub fn project_world(&self, proj: &Projection, p: Vec3) -> Option<ScreenPoint> {
        self.project(proj, proj.to_eye(p))
    }

    /// Z-buffered flat triangle (either winding).
    pub fn fill_triangle(&mut self, a: ScreenPoint, b: ScreenPoint, c: ScreenPoint, color: Rgb) {
        let area = edge(a, b, c.x, c.y);
        if area.abs() < 1e-6 {
            return;
        }

        let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(self.height as i32 - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let (sx, sy) = (px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(b, c, sx, sy) / area;
                let w1 = edge(c, a, sx, sy) / area;
                let w2 = edge(a, b, sx, sy) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * a.depth + w1 * b.depth + w2 * c.depth;
                if let Some(i) = self.idx(px, py) {
                    if depth < self.depth[i] {
                        self.depth[i] = depth;
                        self.color[i] = color;
                    }
                }
            }
        }
    }

    /// Depth-tested line in world space, blended with `alpha`.
    ///
    /// Lines never write depth, so they cannot hide anything.
    pub fn draw_line(&mut self, proj: &Projection, from: Vec3, to: Vec3, color: Rgb, alpha: f32) {
        let (Some(a), Some(b)) = (self.project_world(proj, from), self.project_world(proj, to)) else {
            return;
        };
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as i32;
        if steps > 4 * (self.width as i32 + self.height as i32) {
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (a.x + (b.x - a.x) * t).floor() as i32;
            let y = (a.y + (b.y - a.y) * t).floor() as i32;
            let depth = a.depth + (b.depth - a.depth) * t;
            if let Some(idx) = self.idx(x, y) {
                // Small bias so lines on a face stay visible.
                if depth <= self.depth[idx] + 0.05 {
                    self.color[idx] = color.over(self.color[idx], alpha);
                }
            }
        }
    }

    /// Shaded solid cube of edge `size` centred on `center`.
    ///
    /// Faces whose `hidden` flag is set (covered by a neighbour) and faces
    /// pointing away from the viewer are skipped.
    pub fn draw_cube(&mut self, proj: &Projection, center: Vec3, size: f32, color: Rgb, hidden: [bool; 6]) {
        let h = size / 2.0;
        let mut corners = [ScreenPoint { x: 0.0, y: 0.0, depth: 0.0 }; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let p = center
                + Vec3::new(
                    if i & 1 != 0 { h } else { -h },
                    if i & 2 != 0 { h } else { -h },
                    if i & 4 != 0 { h } else { -h },
                );
            let eye = proj.to_eye(p);
            let Some(sp) = self.project(proj, eye) else {
                return;
            };
            *corner = sp;
        }

        let eye_center = proj.to_eye(center);
        for (face, &(normal, quad)) in CUBE_FACES.iter().enumerate() {
            if hidden[face] {
                continue;
            }
            let n = proj.dir_to_eye(normal);
            let face_center = eye_center + n * h;
            // Back-face: the normal points away from the eye at the origin.
            if n.dot(face_center * -1.0) <= 0.0 {
                continue;
            }
            let light = (LIGHT_EYE - face_center).normalize();
            let shade = AMBIENT + DIFFUSE * n.dot(light).max(0.0);
            let c = color.scale(shade);
            let [a, b, cc, d] = quad.map(|k| corners[k]);
            self.fill_triangle(a, b, cc, c);
            self.fill_triangle(a, cc, d, c);
        }
    }

    /// Wireframe cube outline.
    pub fn draw_wire_cube(&mut self, proj: &Projection, center: Vec3, size: f32, color: Rgb, alpha: f32) {
        let h = size / 2.0;
        let corner = |i: usize| {
            center
                + Vec3::new(
                    if i & 1 != 0 { h } else { -h },
                    if i & 2 != 0 { h } else { -h },
                    if i & 4 != 0 { h } else { -h },
                )
        };
        for i in 0..8usize {
            for bit in [1usize, 2, 4] {
                if i & bit == 0 {
                    self.draw_line(proj, corner(i), corner(i | bit), color, alpha);
                }
            }
        }
    }

    /// Copy the canvas into `fb` at cell `(x0, y0)` using half-block glyphs.
    pub fn blit(&self, fb: &mut FrameBuffer, x0: u16, y0: u16) {
        for row in 0..self.height / 2 {
            for col in 0..self.width {
                let (Some(top), Some(bottom)) = (self.pixel(col, row * 2), self.pixel(col, row * 2 + 1)) else {
                    continue;
                };
                let cell: Cell = CellStyle::new(top, bottom).into_cell('▀');
                fb.set(x0.saturating_add(col), y0.saturating_add(row), cell);
            }
        }
    }
}

#[inline(always)]
fn edge(p: ScreenPoint, q: ScreenPoint, x: f32, y: f32) -> f32 {
    (q.x - p.x) * (y - p.y) - (q.y - p.y) * (x - p.x)
}
