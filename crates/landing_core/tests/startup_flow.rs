use landing_core::locale::Lang;
use landing_core::metrics::{LatestRelease, MetricsError, ReleaseAsset, ReleaseRegistry};
use landing_core::page::{Element, DOWNLOADS_ID, IN_VIEW_CLASS, VERSION_ID};
use landing_core::reveal::ElementRect;
use landing_core::scroll::{FrameScheduler, ScrollMetrics, SCROLL_PROGRESS_PROPERTY};
use landing_core::storage::{MemoryStore, PreferenceStore, LANG_KEY};
use landing_core::PageController;

struct Registry(LatestRelease);

impl ReleaseRegistry for Registry {
    fn latest_release(&self) -> Result<LatestRelease, MetricsError> {
        Ok(self.0.clone())
    }
}

struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&mut self) {}
}

#[test]
fn full_page_session() {
    let store = MemoryStore::new();
    store.set(LANG_KEY, "en");
    let controller = PageController::builder()
        .with_preference_store(Box::new(store))
        .with_initial_scroll(ScrollMetrics {
            offset: 0.0,
            content_height: 4200.0,
            viewport_height: 900.0,
        })
        .build();

    // Startup honored the persisted language and seeded scroll state.
    assert_eq!(controller.language(), Lang::En);
    assert_eq!(
        controller.page().custom_property(SCROLL_PROGRESS_PROPERTY),
        Some("0.0000")
    );

    // The user switches back to Russian; the switch persists.
    controller.apply_language_tag("ru");
    assert_eq!(controller.persisted_language(), Lang::Ru);
    assert_eq!(
        controller
            .page()
            .text_slot("btnDownload")
            .map(Element::text)
            .map(str::to_string),
        Some("Скачать APK".to_string())
    );

    // The fire-and-forget metrics fetch lands later and patches the page.
    let registry = Registry(LatestRelease {
        tag_name: Some("v1.0.3".to_string()),
        assets: vec![ReleaseAsset {
            name: "myimes-v1.0.3.apk".to_string(),
            download_count: 420,
            browser_download_url: Some("https://example.com/myimes.apk".to_string()),
        }],
    });
    controller.load_release_metrics(&registry);
    let page = controller.page();
    assert_eq!(page.element_by_id(VERSION_ID).map(Element::text), Some("v1.0.3"));
    assert_eq!(
        page.element_by_id(DOWNLOADS_ID).map(Element::text),
        Some("420 downloads")
    );

    // Scrolling reveals blocks one-shot and updates the shader.
    controller.on_scroll(
        ScrollMetrics {
            offset: 2100.0,
            content_height: 4200.0,
            viewport_height: 900.0,
        },
        &mut NoopScheduler,
    );
    assert!(controller.run_scroll_frame());
    let progress: f32 = controller
        .page()
        .custom_property(SCROLL_PROGRESS_PROPERTY)
        .and_then(|v| v.parse().ok())
        .expect("progress property");
    assert!((0.0..=1.0).contains(&progress));

    let rect = ElementRect {
        top: 200.0,
        height: 500.0,
    };
    assert!(controller.observe_visibility("faq", rect, 900.0));
    assert!(controller
        .page()
        .element_by_id("faq")
        .is_some_and(|el| el.has_class(IN_VIEW_CLASS)));
    // Scrolled away and back: still revealed, no re-fire.
    assert!(!controller.observe_visibility("faq", rect, 900.0));
    assert!(controller.is_revealed("faq"));
}
