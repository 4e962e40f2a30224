use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use eframe::egui;
use landing_core::{
    locale::Lang,
    page::{Element, Page, DOWNLOADS_ID, SCREENSHOT_CLASS, VERSION_ID},
    reveal::ElementRect,
    scroll::{FrameScheduler, ScrollMetrics, SCROLL_PROGRESS_PROPERTY},
    storage::PreferenceStore,
    PageController,
};
use tracing::{debug, info};

use crate::registry::{release_endpoint, GithubRegistry, DEFAULT_REPO};
use crate::store::FilePreferenceStore;
use crate::theme::ThemeMode;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub(crate) releases_url: String,
    pub(crate) language: Option<Lang>,
    pub(crate) theme: ThemeMode,
    pub(crate) prefs_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(repo) = std::env::var("MYIMES_REPO") {
            config.releases_url = release_endpoint(repo.trim());
        }
        if let Ok(url) = std::env::var("MYIMES_RELEASES_URL") {
            config.releases_url = url;
        }
        if let Ok(lang) = std::env::var("MYIMES_LANG") {
            config.language = Lang::parse(&lang);
        }
        if let Ok(theme) = std::env::var("MYIMES_THEME") {
            config.theme = ThemeMode::from_channel_arg(Some(theme.trim()));
        }
        Ok(config)
    }

    #[cfg(target_os = "android")]
    pub(crate) fn bootstrap_mobile_defaults(&mut self, storage_root: Option<PathBuf>) {
        if let Some(mut root) = storage_root {
            root.push("prefs");
            self.prefs_path = Some(root);
        }
    }

    #[cfg(not(target_os = "android"))]
    #[allow(dead_code)]
    pub(crate) fn bootstrap_mobile_defaults(&mut self, _storage_root: Option<PathBuf>) {}
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            releases_url: release_endpoint(DEFAULT_REPO),
            language: None,
            theme: ThemeMode::FollowSystem,
            prefs_path: None,
        }
    }
}

pub fn run(config: AppConfig) -> Result<()> {
    run_with_options(config, eframe::NativeOptions::default())
}

pub fn run_with_options(config: AppConfig, options: eframe::NativeOptions) -> Result<()> {
    info!("starting landing shell");
    eframe::run_native(
        "MyIMES",
        options,
        Box::new(move |cc| Ok(Box::new(LandingApp::new(cc, config)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}

struct RepaintScheduler<'a> {
    ctx: &'a egui::Context,
}

impl FrameScheduler for RepaintScheduler<'_> {
    fn request_frame(&mut self) {
        self.ctx.request_repaint();
    }
}

const SCREENSHOTS: &[(&str, &str)] = &[
    ("screen-main", "main_crop.jpg"),
    ("screen-schedule", "schedule_crop.jpg"),
    ("screen-marks", "marks_crop.jpg"),
];

const TECH_CHIPS: &[&str] = &["Flutter", "Kotlin", "Material 3", "GitHub Releases"];

pub struct LandingApp {
    controller: Arc<PageController>,
    last_scroll: ScrollMetrics,
}

impl LandingApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        config.theme.apply(&cc.egui_ctx);

        let store: Box<dyn PreferenceStore> = match config
            .prefs_path
            .map(FilePreferenceStore::new)
            .or_else(FilePreferenceStore::in_config_dir)
        {
            Some(store) => Box::new(store),
            None => Box::new(landing_core::storage::MemoryStore::new()),
        };

        let controller = Arc::new(
            PageController::builder()
                .with_preference_store(store)
                .build(),
        );
        if let Some(lang) = config.language {
            controller.apply_language(lang);
        }

        // No bundled screenshot assets yet; swap missing ones for the
        // placeholder the same way a broken <img> would be handled.
        for (id, file) in SCREENSHOTS {
            let path = PathBuf::from("assets/screens").join(file);
            if !path.is_file() {
                controller.image_load_failed(id);
            }
        }

        // Fire-and-forget: the one network call of the page, off the UI
        // thread, never blocking interactivity.
        {
            let controller = Arc::clone(&controller);
            let ctx = cc.egui_ctx.clone();
            let endpoint = config.releases_url.clone();
            thread::spawn(move || {
                match GithubRegistry::with_endpoint(endpoint) {
                    Ok(registry) => controller.load_release_metrics(&registry),
                    Err(err) => debug!(%err, "http client unavailable; placeholders kept"),
                }
                ctx.request_repaint();
            });
        }

        Self {
            controller,
            last_scroll: ScrollMetrics::default(),
        }
    }

    fn section(
        &self,
        ui: &mut egui::Ui,
        viewport: egui::Rect,
        id: &str,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) {
        let revealed = self.controller.is_revealed(id);
        let opacity = ui
            .ctx()
            .animate_bool(egui::Id::new(("reveal", id)), revealed);
        let response = ui
            .scope(|ui| {
                ui.set_opacity(0.25 + 0.75 * opacity);
                add_contents(ui);
            })
            .response;
        let rect = response.rect;
        self.controller.observe_visibility(
            id,
            ElementRect {
                top: rect.top() - viewport.top(),
                height: rect.height(),
            },
            viewport.height(),
        );
        ui.add_space(48.0);
    }

    fn lang_button(&self, ui: &mut egui::Ui, page: &Page, id: &str, lang: Lang) {
        let active = page
            .element_by_id(id)
            .is_some_and(|el| el.has_class(landing_core::page::ACTIVE_CLASS));
        let label = page.element_by_id(id).map(Element::text).unwrap_or("?");
        if ui.selectable_label(active, label).clicked() {
            self.controller.apply_language(lang);
        }
    }

    fn download_button(&self, ui: &mut egui::Ui, page: &Page, key: &str) {
        let Some(el) = page.text_slot(key) else {
            return;
        };
        let has_link = el.href().is_some();
        let button = egui::Button::new(egui::RichText::new(el.text()).strong());
        if ui.add_enabled(has_link, button).clicked() {
            if let Some(href) = el.href() {
                ui.ctx().open_url(egui::OpenUrl::new_tab(href));
            }
        }
    }

    fn render_page(&self, ui: &mut egui::Ui, page: &Page, viewport: egui::Rect) {
        ui.horizontal(|ui| {
            ui.heading("MyIMES");
            ui.small(slot(page, "headerOfficial"));
            ui.separator();
            ui.label(slot(page, "navFeatures"));
            ui.label(slot(page, "navPlans"));
            ui.label(slot(page, "navFaq"));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.download_button(ui, page, "headerDownload");
                self.lang_button(ui, page, landing_core::page::LANG_EN_ID, Lang::En);
                self.lang_button(ui, page, landing_core::page::LANG_RU_ID, Lang::Ru);
            });
        });
        ui.separator();
        ui.add_space(24.0);

        self.section(ui, viewport, "hero", |ui| {
            ui.small(slot(page, "badgeNew"));
            ui.label(
                egui::RichText::new(rich_plain(page, "heroTitle"))
                    .size(34.0)
                    .strong(),
            );
            ui.add_space(8.0);
            ui.label(slot(page, "heroText"));
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                self.download_button(ui, page, "btnInstallNow");
                ui.label(slot(page, "btnViewCode"));
            });
            ui.horizontal(|ui| {
                for key in ["pointSafe", "pointFast", "pointDark"] {
                    ui.small(slot(page, key));
                    ui.add_space(8.0);
                }
            });
        });

        self.section(ui, viewport, "phone-wrap", |ui| {
            for (id, _) in SCREENSHOTS {
                if let Some(el) = page.element_by_id(id) {
                    self.screenshot(ui, el);
                }
            }
        });

        self.section(ui, viewport, "quick", |ui| {
            ui.heading(slot(page, "quickTitle"));
            for (title, body) in [
                ("quick1t", "quick1d"),
                ("quick2t", "quick2d"),
                ("quick3t", "quick3d"),
            ] {
                ui.label(egui::RichText::new(slot(page, title)).strong());
                ui.label(slot(page, body));
                ui.add_space(6.0);
            }
        });

        self.section(ui, viewport, "tech", |ui| {
            ui.heading(slot(page, "techTitle"));
            ui.horizontal(|ui| {
                for chip in TECH_CHIPS {
                    ui.small(*chip);
                    ui.add_space(8.0);
                }
            });
        });

        self.section(ui, viewport, "screens", |ui| {
            ui.heading(slot(page, "screensTitle"));
            ui.small(slot(page, "screenHint"));
        });

        self.section(ui, viewport, "security", |ui| {
            ui.heading(slot(page, "securityTitle"));
            for key in ["security1", "security2", "security3"] {
                ui.label(slot(page, key));
            }
        });

        self.section(ui, viewport, "faq", |ui| {
            ui.heading(slot(page, "faqTitle"));
            for n in 1..=6 {
                let question = slot(page, &format!("faqQ{n}"));
                let answer = slot(page, &format!("faqA{n}"));
                egui::CollapsingHeader::new(question)
                    .id_salt(("faq", n))
                    .show(ui, |ui| {
                        ui.label(answer);
                    });
            }
        });

        self.section(ui, viewport, "cta", |ui| {
            ui.heading(slot(page, "ctaTitle"));
            ui.label(slot(page, "ctaText"));
            ui.horizontal(|ui| {
                ui.small(slot(page, "ctaAndroid"));
                ui.small(slot(page, "ctaSize"));
                if let Some(el) = page.element_by_id(VERSION_ID) {
                    ui.small(el.text());
                }
                if let Some(el) = page.element_by_id(DOWNLOADS_ID) {
                    ui.small(el.text());
                }
            });
            self.download_button(ui, page, "btnDownload");
        });

        self.section(ui, viewport, "site-footer", |ui| {
            ui.horizontal(|ui| {
                ui.label(slot(page, "footerAbout"));
                ui.label(slot(page, "footerBug"));
                for el in page.elements_with_class(landing_core::page::VERSION_CLASS) {
                    ui.small(el.text());
                }
            });
        });
    }

    fn screenshot(&self, ui: &mut egui::Ui, el: &Element) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            if el.has_class(SCREENSHOT_CLASS) {
                ui.label(el.text());
            } else {
                // Placeholder block for a screenshot that failed to load.
                ui.weak(el.text());
            }
        });
    }
}

impl eframe::App for LandingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let page = self.controller.page();
        let progress: f32 = page
            .custom_property(SCROLL_PROGRESS_PROPERTY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0.0);
        let fill = background_fill(progress, ctx.style().visuals.dark_mode);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(fill))
            .show(ctx, |ui| {
                let viewport = ui.clip_rect();
                let output = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_page(ui, &page, viewport);
                    });
                let metrics = ScrollMetrics {
                    offset: output.state.offset.y,
                    content_height: output.content_size.y,
                    viewport_height: viewport.height(),
                };
                if metrics != self.last_scroll {
                    self.last_scroll = metrics;
                    let mut scheduler = RepaintScheduler { ctx };
                    self.controller.on_scroll(metrics, &mut scheduler);
                }
                self.controller.run_scroll_frame();
            });
    }
}

fn slot<'a>(page: &'a Page, key: &str) -> &'a str {
    page.text_slot(key).map(Element::text).unwrap_or("")
}

fn rich_plain(page: &Page, key: &str) -> String {
    page.rich_slot(key)
        .and_then(Element::rich)
        .map(strip_markup)
        .unwrap_or_default()
}

/// Flattens the embedded markup of a rich slot into plain display text:
/// `<br>` becomes a newline, any other tag is dropped.
fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('>') {
            Some(close) => {
                if tail[..=close].eq_ignore_ascii_case("<br>") {
                    out.push('\n');
                }
                rest = &tail[close + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn background_fill(progress: f32, dark_mode: bool) -> egui::Color32 {
    let (base, tint) = if dark_mode {
        (egui::Color32::from_rgb(16, 18, 26), egui::Color32::from_rgb(30, 24, 52))
    } else {
        (egui::Color32::from_rgb(248, 249, 252), egui::Color32::from_rgb(232, 228, 248))
    };
    let t = progress.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| -> u8 { (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8 };
    egui::Color32::from_rgb(
        mix(base.r(), tint.r()),
        mix(base.g(), tint.g()),
        mix(base.b(), tint.b()),
    )
}
