//! Redraw throttling for screens that are static between inputs.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Forget the last frame so the next call renders (terminal resize).
    pub fn reset(&mut self) {
        self.has_rendered = false;
    }

    /// Decide whether to render a new frame.
    ///
    /// Animated screens (`is_static == false`) always render. Static ones
    /// (paused, game over) render on a fingerprint change, otherwise at most
    /// once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !due {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_frames_wait_for_change_or_interval() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1, true));
        assert!(!t.should_render(16, 1, true));
        assert!(t.should_render(32, 2, true));
        assert!(!t.should_render(100, 2, true));
        assert!(t.should_render(282, 2, true));
    }

    #[test]
    fn animated_frames_always_render() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 7, false));
        assert!(t.should_render(1, 7, false));
        t.reset();
        assert!(t.should_render(2, 7, true));
    }
}
