pub mod app;
pub mod registry;
pub mod store;
pub mod theme;

#[cfg(target_os = "android")]
use std::path::PathBuf;

#[cfg(target_os = "android")]
use winit::platform::android::activity::AndroidApp;

#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn android_main(android_app: AndroidApp) {
    use winit::platform::android::EventLoopBuilderExtAndroid;

    tracing_subscriber::fmt::init();

    let storage_root = android_app.internal_data_path().map(PathBuf::from);

    let mut config = app::AppConfig::from_env().unwrap_or_default();
    config.bootstrap_mobile_defaults(storage_root);

    let mut options = eframe::NativeOptions::default();
    options.event_loop_builder = Some(Box::new(move |builder| {
        builder.with_android_app(android_app);
    }));

    if let Err(err) = app::run_with_options(config, options) {
        tracing::error!(%err, "Android runtime terminated unexpectedly");
    }
}
