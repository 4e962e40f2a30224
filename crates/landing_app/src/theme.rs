//! Native theme contract: one message-channel call carrying a theme
//! mode string; anything unrecognized follows the system preference.

/// Fixed channel identifier of the theme bridge.
pub const THEME_CHANNEL: &str = "app.theme";
/// The single method the channel accepts.
pub const SET_THEME_METHOD: &str = "setThemeMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    FollowSystem,
}

impl ThemeMode {
    /// Maps the channel argument to a mode; absent or unrecognized
    /// values follow the system.
    pub fn from_channel_arg(mode: Option<&str>) -> Self {
        match mode {
            Some("light") => ThemeMode::Light,
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::FollowSystem,
        }
    }

    pub fn apply(self, ctx: &egui::Context) {
        match self {
            ThemeMode::Light => ctx.set_visuals(egui::Visuals::light()),
            ThemeMode::Dark => ctx.set_visuals(egui::Visuals::dark()),
            // eframe already tracks the platform preference.
            ThemeMode::FollowSystem => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_argument_mapping() {
        assert_eq!(ThemeMode::from_channel_arg(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_channel_arg(Some("dark")), ThemeMode::Dark);
        assert_eq!(
            ThemeMode::from_channel_arg(Some("sepia")),
            ThemeMode::FollowSystem
        );
        assert_eq!(ThemeMode::from_channel_arg(None), ThemeMode::FollowSystem);
    }
}
