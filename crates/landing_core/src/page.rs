use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Marker added to every block that participates in the reveal motion.
pub const REVEAL_CLASS: &str = "reveal";
/// Marker added once a block has entered the viewport.
pub const IN_VIEW_CLASS: &str = "in-view";
/// Visual state of the currently selected language toggle.
pub const ACTIVE_CLASS: &str = "active";
/// Secondary version-display duplicates share this class.
pub const VERSION_CLASS: &str = "metric-version";
/// Screenshot images eligible for the broken-image fallback.
pub const SCREENSHOT_CLASS: &str = "screen-img";
/// Class a failed screenshot is rewritten into.
pub const SCREENSHOT_PLACEHOLDER_CLASS: &str = "screen-placeholder";

pub const LANG_RU_ID: &str = "lang-ru";
pub const LANG_EN_ID: &str = "lang-en";
pub const VERSION_ID: &str = "metric-version";
pub const DOWNLOADS_ID: &str = "metric-downloads";

/// Structural classes whose members form the reveal set.
pub const REVEAL_BLOCK_CLASSES: &[&str] = &["section", "phone-wrap", "site-footer", "mobile-cta"];

/// One node of the landing document. Elements opt into behavior through
/// data keys and markers, mirroring the attribute-driven page contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Element {
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    rich: Option<String>,
    href: Option<String>,
    text_key: Option<String>,
    rich_key: Option<String>,
    download_trigger: bool,
}

impl Element {
    pub fn block(id: &str, classes: &[&str]) -> Self {
        Self {
            id: Some(id.to_string()),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    /// An element whose plain text is substituted from the locale dictionary.
    pub fn text_slot(key: &str) -> Self {
        Self {
            text_key: Some(key.to_string()),
            ..Self::default()
        }
    }

    /// An element whose rich markup is substituted, allowing embedded formatting.
    pub fn rich_slot(key: &str) -> Self {
        Self {
            rich_key: Some(key.to_string()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn as_download_trigger(mut self) -> Self {
        self.download_trigger = true;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rich(&self) -> Option<&str> {
        self.rich.as_deref()
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn text_key(&self) -> Option<&str> {
        self.text_key.as_deref()
    }

    pub fn rich_key(&self) -> Option<&str> {
        self.rich_key.as_deref()
    }

    pub fn is_download_trigger(&self) -> bool {
        self.download_trigger
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn set_rich(&mut self, markup: &str) {
        self.rich = Some(markup.to_string());
    }

    pub fn set_href(&mut self, href: &str) {
        self.href = Some(href.to_string());
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggles a class on or off, matching `classList.toggle(class, on)`.
    pub fn set_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

/// In-memory rendition of the landing document. Lookups against absent
/// elements are no-ops for callers, never failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    lang_attr: String,
    custom_properties: BTreeMap<String, String>,
    icon_generation: u64,
    elements: Vec<Element>,
}

impl Page {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            lang_attr: String::new(),
            custom_properties: BTreeMap::new(),
            icon_generation: 0,
            elements,
        }
    }

    pub fn lang_attr(&self) -> &str {
        &self.lang_attr
    }

    pub fn set_lang_attr(&mut self, lang: &str) {
        self.lang_attr = lang.to_string();
    }

    pub fn custom_property(&self, name: &str) -> Option<&str> {
        self.custom_properties.get(name).map(String::as_str)
    }

    pub fn set_custom_property(&mut self, name: &str, value: String) {
        self.custom_properties.insert(name.to_string(), value);
    }

    pub fn icon_generation(&self) -> u64 {
        self.icon_generation
    }

    /// Marks icon glyphs stale after markup replacement may have removed
    /// rendered icons; the host re-renders them on the next pass.
    pub fn refresh_icons(&mut self) {
        self.icon_generation += 1;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id() == Some(id))
    }

    pub fn elements_with_class<'a>(
        &'a self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |el| el.has_class(class))
    }

    pub fn elements_with_class_mut<'a>(
        &'a mut self,
        class: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements
            .iter_mut()
            .filter(move |el| el.has_class(class))
    }

    pub fn text_slots_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut().filter(|el| el.text_key().is_some())
    }

    pub fn rich_slots_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut().filter(|el| el.rich_key().is_some())
    }

    pub fn download_triggers_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut().filter(|el| el.is_download_trigger())
    }

    /// Finds the element holding a given plain-text substitution key.
    pub fn text_slot(&self, key: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.text_key() == Some(key))
    }

    pub fn rich_slot(&self, key: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.rich_key() == Some(key))
    }

    /// The fixed structure of the landing page: header, hero, quick start,
    /// tech, screenshots, security, FAQ, call-to-action and footer.
    pub fn landing() -> Self {
        let mut elements = vec![
            // Header
            Element::text_slot("headerOfficial"),
            Element::text_slot("navFeatures"),
            Element::text_slot("navPlans"),
            Element::text_slot("navFaq"),
            Element::text_slot("headerDownload").as_download_trigger(),
            Element::block(LANG_RU_ID, &[]).with_text("RU"),
            Element::block(LANG_EN_ID, &[]).with_text("EN"),
            // Hero
            Element::block("hero", &["section"]),
            Element::text_slot("badgeNew"),
            Element::rich_slot("heroTitle"),
            Element::text_slot("heroText"),
            Element::text_slot("btnInstallNow").as_download_trigger(),
            Element::text_slot("btnViewCode"),
            Element::text_slot("pointSafe"),
            Element::text_slot("pointFast"),
            Element::text_slot("pointDark"),
            Element::block("phone-wrap", &["phone-wrap"]),
            // Quick start
            Element::block("quick", &["section"]),
            Element::text_slot("quickTitle"),
            Element::text_slot("quick1t"),
            Element::text_slot("quick1d"),
            Element::text_slot("quick2t"),
            Element::text_slot("quick2d"),
            Element::text_slot("quick3t"),
            Element::text_slot("quick3d"),
            // Tech
            Element::block("tech", &["section"]),
            Element::text_slot("techTitle"),
            // Screenshots
            Element::block("screens", &["section"]),
            Element::text_slot("screensTitle"),
            Element::text_slot("screenHint"),
            Element::block("screen-main", &[SCREENSHOT_CLASS]).with_text("main_crop.jpg"),
            Element::block("screen-schedule", &[SCREENSHOT_CLASS]).with_text("schedule_crop.jpg"),
            Element::block("screen-marks", &[SCREENSHOT_CLASS]).with_text("marks_crop.jpg"),
            // Security
            Element::block("security", &["section"]),
            Element::text_slot("securityTitle"),
            Element::text_slot("security1"),
            Element::text_slot("security2"),
            Element::text_slot("security3"),
            // FAQ
            Element::block("faq", &["section"]),
            Element::text_slot("faqTitle"),
        ];
        for n in 1..=6 {
            elements.push(Element::text_slot(&format!("faqQ{n}")));
            elements.push(Element::text_slot(&format!("faqA{n}")));
        }
        elements.extend([
            // Call to action
            Element::block("cta", &["section"]),
            Element::text_slot("ctaTitle"),
            Element::text_slot("ctaText"),
            Element::text_slot("ctaAndroid"),
            Element::text_slot("ctaSize"),
            Element::text_slot("btnDownload").as_download_trigger(),
            Element::text_slot("btnChangelog"),
            Element::block(VERSION_ID, &[]).with_text("latest"),
            Element::block(DOWNLOADS_ID, &[]).with_text("— downloads"),
            Element::block("cta-version", &[VERSION_CLASS]).with_text("latest"),
            Element::block("mobile-cta", &["mobile-cta"]),
            // Footer
            Element::block("site-footer", &["site-footer"]),
            Element::text_slot("footerAbout"),
            Element::text_slot("footerBug"),
            Element::block("footer-version", &[VERSION_CLASS]).with_text("latest"),
        ]);
        Self::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_toggle_is_idempotent() {
        let mut el = Element::block("hero", &["section"]);
        el.add_class(REVEAL_CLASS);
        el.add_class(REVEAL_CLASS);
        assert!(el.has_class(REVEAL_CLASS));
        el.set_class(REVEAL_CLASS, false);
        assert!(!el.has_class(REVEAL_CLASS));
    }

    #[test]
    fn landing_page_exposes_fixed_targets() {
        let page = Page::landing();
        assert!(page.element_by_id(LANG_RU_ID).is_some());
        assert!(page.element_by_id(LANG_EN_ID).is_some());
        assert!(page.element_by_id(VERSION_ID).is_some());
        assert!(page.element_by_id(DOWNLOADS_ID).is_some());
        assert_eq!(page.elements_with_class(VERSION_CLASS).count(), 2);
        assert!(page
            .elements()
            .iter()
            .filter(|el| el.is_download_trigger())
            .count()
            >= 3);
    }

    #[test]
    fn missing_element_lookup_is_a_no_op() {
        let mut page = Page::landing();
        assert!(page.element_by_id("does-not-exist").is_none());
        assert!(page.element_by_id_mut("does-not-exist").is_none());
    }
}
