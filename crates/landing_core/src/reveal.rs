use std::collections::BTreeSet;

/// Visibility observation tuning. The bottom margin shrinks the trigger
/// zone so blocks reveal slightly before reaching the viewport edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub bottom_margin: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.14,
            bottom_margin: 0.08,
        }
    }
}

/// Element geometry in viewport coordinates: `top` is the distance from
/// the viewport top edge, negative when scrolled past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f32,
    pub height: f32,
}

/// One-shot visibility tracking for the reveal set. The
/// pending -> revealed transition is monotonic for the page session;
/// a revealed element is dropped from observation and never re-fires.
#[derive(Debug, Default)]
pub struct RevealSet {
    options: ObserverOptions,
    watched: BTreeSet<String>,
    revealed: BTreeSet<String>,
}

impl RevealSet {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            watched: BTreeSet::new(),
            revealed: BTreeSet::new(),
        }
    }

    pub fn observe(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.revealed.contains(&id) {
            self.watched.insert(id);
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.watched.iter().map(String::as_str)
    }

    /// Graceful degradation when the host cannot observe visibility:
    /// everything is revealed immediately. Returns the ids that changed.
    pub fn reveal_all(&mut self) -> Vec<String> {
        let newly: Vec<String> = self.watched.iter().cloned().collect();
        self.revealed.extend(self.watched.iter().cloned());
        self.watched.clear();
        newly
    }

    /// Records a visibility report for one element. Returns true on the
    /// first transition into the trigger zone; the element then stops
    /// being observed.
    pub fn record(&mut self, id: &str, rect: ElementRect, viewport_height: f32) -> bool {
        if !self.watched.contains(id) {
            return false;
        }
        if intersection_ratio(rect, viewport_height, self.options) < self.options.threshold {
            return false;
        }
        self.watched.remove(id);
        self.revealed.insert(id.to_string());
        true
    }
}

fn intersection_ratio(rect: ElementRect, viewport_height: f32, options: ObserverOptions) -> f32 {
    let effective_bottom = viewport_height * (1.0 - options.bottom_margin);
    let visible = (rect.top + rect.height).min(effective_bottom) - rect.top.max(0.0);
    if visible <= 0.0 {
        return 0.0;
    }
    visible / rect.height.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(id: &str) -> RevealSet {
        let mut set = RevealSet::new(ObserverOptions::default());
        set.observe(id);
        set
    }

    #[test]
    fn reveal_fires_once_and_never_reverts() {
        let mut set = set_with("hero");
        let visible = ElementRect {
            top: 100.0,
            height: 400.0,
        };
        let offscreen = ElementRect {
            top: 2000.0,
            height: 400.0,
        };
        assert!(set.record("hero", visible, 800.0));
        // Leaving and re-entering the viewport never re-fires.
        assert!(!set.record("hero", offscreen, 800.0));
        assert!(!set.record("hero", visible, 800.0));
        assert!(set.is_revealed("hero"));
    }

    #[test]
    fn below_threshold_stays_pending() {
        let mut set = set_with("faq");
        // Under 9% of a 1000px block inside the trigger zone, below the
        // 0.14 threshold.
        let sliver = ElementRect {
            top: 650.0,
            height: 1000.0,
        };
        assert!(!set.record("faq", sliver, 800.0));
        assert!(!set.is_revealed("faq"));
        assert_eq!(set.pending().count(), 1);
    }

    #[test]
    fn bottom_margin_shrinks_the_trigger_zone() {
        let mut set = set_with("cta");
        // Top edge sits below the 8%-shrunk bottom boundary (736 of 800).
        let below_margin = ElementRect {
            top: 760.0,
            height: 300.0,
        };
        assert!(!set.record("cta", below_margin, 800.0));
        let above_margin = ElementRect {
            top: 600.0,
            height: 300.0,
        };
        assert!(set.record("cta", above_margin, 800.0));
    }

    #[test]
    fn reveal_all_degrades_without_observation() {
        let mut set = RevealSet::new(ObserverOptions::default());
        set.observe("hero");
        set.observe("faq");
        let mut newly = set.reveal_all();
        newly.sort();
        assert_eq!(newly, vec!["faq".to_string(), "hero".to_string()]);
        assert!(set.is_revealed("hero"));
        assert_eq!(set.pending().count(), 0);
    }

    #[test]
    fn unobserved_ids_are_ignored() {
        let mut set = set_with("hero");
        let rect = ElementRect {
            top: 0.0,
            height: 100.0,
        };
        assert!(!set.record("unknown", rect, 800.0));
    }
}
