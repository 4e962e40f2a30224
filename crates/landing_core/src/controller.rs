use std::collections::BTreeSet;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{
    locale::{self, Lang},
    metrics::{MetricsError, ReleaseMetrics, ReleaseRegistry},
    page::{
        Page, ACTIVE_CLASS, DOWNLOADS_ID, IN_VIEW_CLASS, LANG_EN_ID, LANG_RU_ID,
        REVEAL_BLOCK_CLASSES, REVEAL_CLASS, SCREENSHOT_CLASS, SCREENSHOT_PLACEHOLDER_CLASS,
        VERSION_CLASS, VERSION_ID,
    },
    reveal::{ElementRect, ObserverOptions, RevealSet},
    scroll::{FrameScheduler, ScrollMetrics, ScrollShader},
    storage::{MemoryStore, PreferenceStore, LANG_KEY},
};

/// Placeholder shown where a screenshot failed to load.
const SCREENSHOT_FALLBACK_TEXT: &str = "Add screenshot file to assets/screens";

/// The presentation state controller. Owns the landing document and its
/// four cooperating responsibilities: locale management, release
/// metrics, reveal motion and the scroll shader.
pub struct PageController {
    page: RwLock<Page>,
    prefs: Box<dyn PreferenceStore>,
    reveal: RwLock<RevealSet>,
    shader: RwLock<ScrollShader>,
    armed_fallbacks: RwLock<BTreeSet<String>>,
    observer_supported: bool,
}

pub struct PageControllerBuilder {
    page: Page,
    prefs: Box<dyn PreferenceStore>,
    observer_options: ObserverOptions,
    observer_supported: bool,
    initial_scroll: ScrollMetrics,
}

impl PageControllerBuilder {
    pub fn new() -> Self {
        Self {
            page: Page::landing(),
            prefs: Box::new(MemoryStore::new()),
            observer_options: ObserverOptions::default(),
            observer_supported: true,
            initial_scroll: ScrollMetrics::default(),
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn with_preference_store(mut self, store: Box<dyn PreferenceStore>) -> Self {
        self.prefs = store;
        self
    }

    pub fn with_observer_options(mut self, options: ObserverOptions) -> Self {
        self.observer_options = options;
        self
    }

    /// Host without intersection-visibility observation: every block is
    /// revealed immediately at startup.
    pub fn without_visibility_observer(mut self) -> Self {
        self.observer_supported = false;
        self
    }

    pub fn with_initial_scroll(mut self, metrics: ScrollMetrics) -> Self {
        self.initial_scroll = metrics;
        self
    }

    pub fn build(self) -> PageController {
        let start = Instant::now();
        for (lang, key) in locale::missing_keys() {
            warn!(lang = lang.as_str(), key, "dictionary key missing from counterpart");
        }
        let controller = PageController {
            page: RwLock::new(self.page),
            prefs: self.prefs,
            reveal: RwLock::new(RevealSet::new(self.observer_options)),
            shader: RwLock::new(ScrollShader::new()),
            armed_fallbacks: RwLock::new(BTreeSet::new()),
            observer_supported: self.observer_supported,
        };
        controller.startup(self.initial_scroll);
        info!(elapsed_ms = %start.elapsed().as_millis(), "landing controller initialized");
        controller
    }
}

impl Default for PageControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageController {
    pub fn builder() -> PageControllerBuilder {
        PageControllerBuilder::new()
    }

    /// Startup sequence: persisted-or-default language, image fallbacks,
    /// reveal observers, scroll seed. The metrics fetch is fired by the
    /// host afterwards and never blocks any of these.
    fn startup(&self, initial_scroll: ScrollMetrics) {
        self.apply_language(self.persisted_language());
        self.arm_image_fallbacks();
        self.install_reveal_motion();
        let mut page = self.page.write();
        self.shader.write().prime(initial_scroll, &mut page);
    }

    /// The stored language tag, or the primary tag when the entry is
    /// absent or unrecognized.
    pub fn persisted_language(&self) -> Lang {
        self.prefs
            .get(LANG_KEY)
            .and_then(|tag| Lang::parse(&tag))
            .unwrap_or(Lang::PRIMARY)
    }

    /// Applies a raw tag; anything unrecognized behaves as the primary.
    pub fn apply_language_tag(&self, tag: &str) {
        self.apply_language(Lang::parse(tag).unwrap_or(Lang::PRIMARY));
    }

    pub fn apply_language(&self, lang: Lang) {
        {
            let mut page = self.page.write();
            page.set_lang_attr(lang.as_str());
            for el in page.text_slots_mut() {
                if let Some(value) = el.text_key().and_then(|key| locale::lookup(lang, key)) {
                    el.set_text(value);
                }
            }
            for el in page.rich_slots_mut() {
                if let Some(value) = el.rich_key().and_then(|key| locale::lookup(lang, key)) {
                    el.set_rich(value);
                }
            }
            for (id, tag) in [(LANG_RU_ID, Lang::Ru), (LANG_EN_ID, Lang::En)] {
                if let Some(el) = page.element_by_id_mut(id) {
                    el.set_class(ACTIVE_CLASS, lang == tag);
                }
            }
            // Markup replacement may have dropped rendered icon glyphs.
            page.refresh_icons();
        }
        self.prefs.set(LANG_KEY, lang.as_str());
        debug!(lang = lang.as_str(), "language applied");
    }

    pub fn language(&self) -> Lang {
        Lang::parse(self.page.read().lang_attr()).unwrap_or(Lang::PRIMARY)
    }

    /// Fire-and-forget entry point for the one network call. Every
    /// failure is discarded here so it can never surface to the user or
    /// block other initialization.
    pub fn load_release_metrics(&self, registry: &dyn ReleaseRegistry) {
        let start = Instant::now();
        match self.try_load_release_metrics(registry) {
            Ok(metrics) => info!(
                version = %metrics.version,
                downloads = metrics.total_downloads,
                elapsed_ms = %start.elapsed().as_millis(),
                "release metrics applied"
            ),
            Err(err) => debug!(%err, "release metrics unavailable; placeholders kept"),
        }
    }

    fn try_load_release_metrics(
        &self,
        registry: &dyn ReleaseRegistry,
    ) -> Result<ReleaseMetrics, MetricsError> {
        let release = registry.latest_release()?;
        let metrics = ReleaseMetrics::summarize(&release);
        self.apply_release_metrics(&metrics);
        Ok(metrics)
    }

    fn apply_release_metrics(&self, metrics: &ReleaseMetrics) {
        let mut page = self.page.write();
        if let Some(el) = page.element_by_id_mut(VERSION_ID) {
            el.set_text(&metrics.version);
        }
        for el in page.elements_with_class_mut(VERSION_CLASS) {
            el.set_text(&metrics.version);
        }
        if let Some(el) = page.element_by_id_mut(DOWNLOADS_ID) {
            el.set_text(&metrics.downloads_label());
        }
        if let Some(url) = &metrics.package_url {
            for el in page.download_triggers_mut() {
                el.set_href(url);
            }
        }
    }

    fn arm_image_fallbacks(&self) {
        let page = self.page.read();
        let armed: BTreeSet<String> = page
            .elements_with_class(SCREENSHOT_CLASS)
            .filter_map(|el| el.id().map(str::to_string))
            .collect();
        debug!(count = armed.len(), "image fallbacks armed");
        *self.armed_fallbacks.write() = armed;
    }

    /// Swaps a failed screenshot for an inert placeholder block.
    pub fn image_load_failed(&self, id: &str) {
        if !self.armed_fallbacks.read().contains(id) {
            return;
        }
        let mut page = self.page.write();
        if let Some(el) = page.element_by_id_mut(id) {
            el.remove_class(SCREENSHOT_CLASS);
            el.add_class(SCREENSHOT_PLACEHOLDER_CLASS);
            el.set_text(SCREENSHOT_FALLBACK_TEXT);
        }
    }

    fn install_reveal_motion(&self) {
        let mut page = self.page.write();
        let mut reveal = self.reveal.write();
        let mut block_ids = Vec::new();
        for el in page
            .elements()
            .iter()
            .filter(|el| REVEAL_BLOCK_CLASSES.iter().any(|class| el.has_class(class)))
        {
            if let Some(id) = el.id() {
                block_ids.push(id.to_string());
            }
        }
        for id in &block_ids {
            if let Some(el) = page.element_by_id_mut(id) {
                el.add_class(REVEAL_CLASS);
            }
            reveal.observe(id.clone());
        }
        if !self.observer_supported {
            debug!("visibility observation unavailable; revealing all blocks");
            for id in reveal.reveal_all() {
                if let Some(el) = page.element_by_id_mut(&id) {
                    el.add_class(IN_VIEW_CLASS);
                }
            }
        }
    }

    /// Ids still awaiting their first visibility report.
    pub fn pending_reveals(&self) -> Vec<String> {
        self.reveal.read().pending().map(str::to_string).collect()
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveal.read().is_revealed(id)
    }

    /// One visibility report from the host. Returns true on the first
    /// transition into the trigger zone.
    pub fn observe_visibility(&self, id: &str, rect: ElementRect, viewport_height: f32) -> bool {
        if !self.observer_supported {
            return false;
        }
        let newly = self.reveal.write().record(id, rect, viewport_height);
        if newly {
            if let Some(el) = self.page.write().element_by_id_mut(id) {
                el.add_class(IN_VIEW_CLASS);
            }
            debug!(id, "block revealed");
        }
        newly
    }

    pub fn on_scroll(&self, metrics: ScrollMetrics, scheduler: &mut dyn FrameScheduler) {
        self.shader.write().on_scroll(metrics, scheduler);
    }

    /// Host animation-frame callback; applies the pending scroll update,
    /// if any.
    pub fn run_scroll_frame(&self) -> bool {
        let mut page = self.page.write();
        self.shader.write().run_pending(&mut page)
    }

    /// Snapshot of the document for rendering.
    pub fn page(&self) -> Page {
        self.page.read().clone()
    }
}
