//! Mouse drag and wheel tracking for the orbit camera.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Camera control derived from mouse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAction {
    ZoomIn,
    ZoomOut,
    /// Drag delta in terminal cells since the previous drag event
    Orbit { dx: i16, dy: i16 },
}

/// Tracks the left-button drag so successive events yield deltas.
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    last: Option<(u16, u16)>,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn dragging(&self) -> bool {
        self.last.is_some()
    }

    /// Feed one mouse event.
    pub fn handle(&mut self, event: MouseEvent) -> Option<CameraAction> {
        let pos = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last = Some(pos);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last = None;
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // A drag without a press (focus gained mid-drag) starts tracking here.
                let Some((lx, ly)) = self.last.replace(pos) else {
                    return None;
                };
                let dx = pos.0 as i16 - lx as i16;
                let dy = pos.1 as i16 - ly as i16;
                if dx == 0 && dy == 0 {
                    return None;
                }
                Some(CameraAction::Orbit { dx, dy })
            }
            MouseEventKind::ScrollUp => Some(CameraAction::ZoomIn),
            MouseEventKind::ScrollDown => Some(CameraAction::ZoomOut),
            _ => None,
        }
    }
}
