use crate::page::Page;

/// Root custom property holding the raw scroll offset.
pub const SCROLL_Y_PROPERTY: &str = "--scrollY";
/// Root custom property holding the normalized scroll progress.
pub const SCROLL_PROGRESS_PROPERTY: &str = "--scrollP";

/// Hosts schedule one recomputation per animation frame through this seam.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub offset: f32,
    pub content_height: f32,
    pub viewport_height: f32,
}

impl ScrollMetrics {
    /// Normalized progress in [0, 1]. The denominator is guarded to a
    /// minimum of 1 so a page no taller than the viewport stays at 0.
    pub fn progress(&self) -> f32 {
        let max = (self.content_height - self.viewport_height).max(1.0);
        (self.offset / max).clamp(0.0, 1.0)
    }
}

/// Maps scroll position to the root custom properties read by the
/// decorative styling. Recomputation is coalesced to at most one update
/// per animation frame: while a frame is pending, further scroll events
/// only refresh the stored metrics.
#[derive(Debug, Default)]
pub struct ScrollShader {
    latest: ScrollMetrics,
    ticking: bool,
}

impl ScrollShader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the properties once at startup, before any scroll event.
    pub fn prime(&mut self, metrics: ScrollMetrics, page: &mut Page) {
        self.latest = metrics;
        self.apply(page);
    }

    pub fn on_scroll(&mut self, metrics: ScrollMetrics, scheduler: &mut dyn FrameScheduler) {
        self.latest = metrics;
        if !self.ticking {
            self.ticking = true;
            scheduler.request_frame();
        }
    }

    /// Runs the pending recomputation, if any. Returns whether an update
    /// was applied.
    pub fn run_pending(&mut self, page: &mut Page) -> bool {
        if !self.ticking {
            return false;
        }
        self.apply(page);
        true
    }

    fn apply(&mut self, page: &mut Page) {
        page.set_custom_property(SCROLL_Y_PROPERTY, format!("{}", self.latest.offset));
        page.set_custom_property(
            SCROLL_PROGRESS_PROPERTY,
            format!("{:.4}", self.latest.progress()),
        );
        self.ticking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        frames: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.frames += 1;
        }
    }

    fn metrics(offset: f32, content: f32, viewport: f32) -> ScrollMetrics {
        ScrollMetrics {
            offset,
            content_height: content,
            viewport_height: viewport,
        }
    }

    #[test]
    fn progress_stays_clamped() {
        assert_eq!(metrics(0.0, 3000.0, 800.0).progress(), 0.0);
        assert_eq!(metrics(2200.0, 3000.0, 800.0).progress(), 1.0);
        assert_eq!(metrics(9999.0, 3000.0, 800.0).progress(), 1.0);
        assert_eq!(metrics(-50.0, 3000.0, 800.0).progress(), 0.0);
    }

    #[test]
    fn short_page_guards_the_denominator() {
        // Content height exactly equals the viewport height.
        let m = metrics(0.0, 800.0, 800.0);
        assert_eq!(m.progress(), 0.0);
        let nudged = metrics(10.0, 800.0, 800.0);
        assert!(nudged.progress() <= 1.0);
    }

    #[test]
    fn rapid_scroll_events_coalesce_to_one_frame() {
        let mut shader = ScrollShader::new();
        let mut scheduler = CountingScheduler::default();
        let mut page = Page::landing();

        for offset in [10.0, 20.0, 30.0, 40.0] {
            shader.on_scroll(metrics(offset, 3000.0, 800.0), &mut scheduler);
        }
        assert_eq!(scheduler.frames, 1);
        assert!(shader.run_pending(&mut page));
        // The frame saw the latest metrics, not the first.
        assert_eq!(page.custom_property(SCROLL_Y_PROPERTY), Some("40"));

        // Nothing pending until the next scroll event.
        assert!(!shader.run_pending(&mut page));
        shader.on_scroll(metrics(50.0, 3000.0, 800.0), &mut scheduler);
        assert_eq!(scheduler.frames, 2);
    }

    #[test]
    fn prime_seeds_both_properties() {
        let mut shader = ScrollShader::new();
        let mut page = Page::landing();
        shader.prime(metrics(1100.0, 3000.0, 800.0), &mut page);
        assert_eq!(page.custom_property(SCROLL_Y_PROPERTY), Some("1100"));
        assert_eq!(page.custom_property(SCROLL_PROGRESS_PROPERTY), Some("0.5000"));
    }
}
