//! Edge auto-scroll while a selection drag is held near the top or bottom
//! of the grid viewport.

use egui::Pos2;

use super::hit_test::ScrollViewport;
use crate::models::settings::AutoScrollSettings;

#[derive(Debug, Clone)]
pub struct AutoScroller {
    settings: AutoScrollSettings,
    armed: bool,
    pointer_y: f32,
}

impl AutoScroller {
    pub fn new(settings: AutoScrollSettings) -> Self {
        Self {
            settings,
            armed: false,
            pointer_y: 0.0,
        }
    }

    pub fn arm(&mut self, pointer_y: f32) {
        self.armed = true;
        self.pointer_y = pointer_y;
    }

    /// Stop ticking. The shell stops requesting frames once this is false.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn set_pointer_y(&mut self, y: f32) {
        self.pointer_y = y;
    }

    /// Signed per-frame scroll distance for the pointer against the
    /// viewport edges. Zero outside both bands.
    pub fn scroll_delta(&self, top: f32, bottom: f32) -> f32 {
        let threshold = self.settings.threshold;
        let speed = self.settings.speed;
        let min_intensity = self.settings.min_intensity;
        let y = self.pointer_y;

        if y < top + threshold {
            let intensity = 1.0 - (y - top) / threshold;
            -speed * intensity.max(min_intensity)
        } else if y > bottom - threshold {
            let intensity = 1.0 - (bottom - y) / threshold;
            speed * intensity.max(min_intensity)
        } else {
            0.0
        }
    }

    /// Run one animation frame. Scrolls the viewport when the pointer is in
    /// an edge band, then hit-tests at the viewport's horizontal centre and
    /// the clamped pointer height. Returns the row found there, if any.
    ///
    /// A missing viewport, an unarmed scroller and a frame that did not move
    /// the content all return `None`.
    pub fn tick<V: ScrollViewport + ?Sized>(&mut self, viewport: Option<&mut V>) -> Option<usize> {
        if !self.armed {
            return None;
        }
        let viewport = viewport?;
        let rect = viewport.viewport_rect();

        let delta = self.scroll_delta(rect.top(), rect.bottom());
        if delta == 0.0 || viewport.scroll_by(delta) == 0.0 {
            return None;
        }

        // Keep the probe inside the viewport so a pointer held past the edge
        // still resolves to the row at that edge.
        let y = self.pointer_y.min(rect.bottom() - 1.0).max(rect.top());
        viewport.locate(Pos2::new(rect.center().x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_egui::interaction::hit_test::SlotGridGeometry;
    use egui::{pos2, Rect};

    fn scroller() -> AutoScroller {
        AutoScroller::new(AutoScrollSettings::default())
    }

    fn grid() -> SlotGridGeometry {
        SlotGridGeometry::new(Rect::from_min_max(pos2(0.0, 0.0), pos2(200.0, 280.0)), 28.0)
    }

    #[test]
    fn test_no_scroll_in_middle() {
        let mut s = scroller();
        s.arm(140.0);
        assert_eq!(s.scroll_delta(0.0, 280.0), 0.0);
    }

    #[test]
    fn test_intensity_grows_toward_edge() {
        let mut s = scroller();
        s.arm(270.0);
        let shallow = s.scroll_delta(0.0, 280.0);
        s.set_pointer_y(279.0);
        let deep = s.scroll_delta(0.0, 280.0);
        assert!(shallow > 0.0);
        assert!(deep > shallow);
    }

    #[test]
    fn test_floor_keeps_scrolling_at_band_entry() {
        let mut s = scroller();
        s.arm(1.0 + 39.9);
        let delta = s.scroll_delta(1.0, 500.0);
        assert!((delta + 4.0 * 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_tick_scrolls_and_relocates() {
        let mut s = scroller();
        let mut g = grid();
        s.arm(279.0);

        let slot = s.tick(Some(&mut g));

        // 3.9 points scrolled moves row 10 under the bottom edge.
        assert!(g.scroll_offset > 0.0);
        assert_eq!(slot, Some(10));
    }

    #[test]
    fn test_tick_without_viewport_is_noop() {
        let mut s = scroller();
        s.arm(279.0);
        assert_eq!(s.tick::<SlotGridGeometry>(None), None);
    }

    #[test]
    fn test_tick_outside_bands_does_not_hit_test() {
        let mut s = scroller();
        let mut g = grid();
        s.arm(140.0);
        assert_eq!(s.tick(Some(&mut g)), None);
        assert_eq!(g.scroll_offset, 0.0);
    }

    #[test]
    fn test_disarmed_tick_does_nothing() {
        let mut s = scroller();
        let mut g = grid();
        s.arm(279.0);
        s.disarm();
        assert_eq!(s.tick(Some(&mut g)), None);
        assert_eq!(g.scroll_offset, 0.0);
    }

    #[test]
    fn test_top_edge_at_origin_cannot_scroll() {
        let mut s = scroller();
        let mut g = grid();
        s.arm(2.0);
        assert_eq!(s.tick(Some(&mut g)), None);
    }
}
