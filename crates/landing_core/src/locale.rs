//! Locale tags and the static string catalogs for the landing page.

/// Display language of the landing page. Russian is the primary tag and
/// the fallback for anything unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Ru,
    En,
}

impl Lang {
    pub const PRIMARY: Lang = Lang::Ru;

    pub const fn as_str(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }

    /// Parses a language tag, tolerant of case and region suffixes
    /// ("ru", "RU", "en-US", "en_GB"). Unknown tags yield `None`.
    pub fn parse(value: &str) -> Option<Lang> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next().unwrap_or("") {
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }
}

pub const SUPPORTED_LANGS: &[Lang] = &[Lang::Ru, Lang::En];

type Catalog = &'static [(&'static str, &'static str)];

const RU: Catalog = &[
    ("headerOfficial", "OFFICIAL APP"),
    ("navFeatures", "Возможности"),
    ("navPlans", "Планы"),
    ("navFaq", "FAQ"),
    ("headerDownload", "Скачать Beta"),
    ("badgeNew", "Новый релиз уже доступен"),
    (
        "heroTitle",
        "Твой институт.<br>Твой ритм.<br><span class='hero-gradient'>Твои правила.</span>",
    ),
    (
        "heroText",
        "Представляем абсолютно новое приложение для студентов ИМЭС. Расписание, оценки и уведомления — теперь в нативном формате, быстро и без лишних кликов.",
    ),
    ("btnInstallNow", "Установить сейчас"),
    ("btnViewCode", "Смотреть код"),
    ("pointSafe", "Безопасно"),
    ("pointFast", "Быстро"),
    ("pointDark", "Dark Mode"),
    ("btnDownload", "Скачать APK"),
    ("btnChangelog", "Смотреть код"),
    ("quickTitle", "Старт за 60 секунд"),
    ("quick1t", "Установи APK"),
    ("quick1d", "Скачай последнюю сборку с GitHub и установи на Android."),
    ("quick2t", "Войди в аккаунт"),
    ("quick2d", "Авторизуйся в ИМЭС один раз и используй безопасный автологин."),
    ("quick3t", "Получай обновления"),
    ("quick3d", "Следи за изменениями расписания и новыми оценками через уведомления."),
    ("techTitle", "Построено на современных технологиях"),
    ("screensTitle", "Реальные экраны приложения"),
    ("screenHint", "Используются файлы: main_crop.jpg / schedule_crop.jpg / marks_crop.jpg."),
    ("securityTitle", "Безопасность"),
    ("security1", "Данные входа хранятся локально в защищённом хранилище."),
    ("security2", "Пароль не передается на сторонние серверы."),
    ("security3", "Диагностика не включает пароли."),
    ("faqTitle", "FAQ"),
    ("faqQ1", "Будет ли версия для iOS?"),
    ("faqA1", "Да, в планах roadmap v1.0 после стабилизации Android-версии."),
    ("faqQ2", "Как обновлять приложение?"),
    ("faqA2", "Скачай свежий APK с GitHub и установи поверх текущей версии."),
    ("faqQ3", "Это официальное приложение вуза?"),
    ("faqA3", "Это студенческий проект для ИМЭС, который активно развивается."),
    ("faqQ4", "Мой пароль будет храниться на сервере?"),
    (
        "faqA4",
        "Нет. Данные входа хранятся только на вашем устройстве при включенном безопасном автологине.",
    ),
    ("faqQ5", "Можно ставить обновление поверх текущей версии?"),
    (
        "faqA5",
        "Да, если подпись пакета не изменилась и version code новой сборки выше.",
    ),
    ("faqQ6", "Как сообщить об ошибке или предложить фичу?"),
    (
        "faqA6",
        "Открой GitHub Issues по ссылке внизу сайта и по возможности приложи скриншоты.",
    ),
    ("ctaTitle", "Попробуй первым"),
    (
        "ctaText",
        "Приложение находится в стадии открытого бета-тестирования. Скачивай, пользуйся и помогай нам стать лучше.",
    ),
    ("ctaAndroid", "Android 8.0+"),
    ("ctaSize", "15 MB"),
    ("footerAbout", "О проекте"),
    ("footerBug", "Сообщить о баге"),
];

const EN: Catalog = &[
    ("headerOfficial", "OFFICIAL APP"),
    ("navFeatures", "Features"),
    ("navPlans", "Roadmap"),
    ("navFaq", "FAQ"),
    ("headerDownload", "Download Beta"),
    ("badgeNew", "New release is live"),
    (
        "heroTitle",
        "Your university.<br>Your rhythm.<br><span class='hero-gradient'>Your rules.</span>",
    ),
    (
        "heroText",
        "Schedule, grades, profile and notifications in a native mobile flow for IMES students.",
    ),
    ("btnInstallNow", "Install now"),
    ("btnViewCode", "View code"),
    ("pointSafe", "Secure"),
    ("pointFast", "Fast"),
    ("pointDark", "Dark Mode"),
    ("btnDownload", "Download APK"),
    ("btnChangelog", "View code"),
    ("quickTitle", "Start in 60 seconds"),
    ("quick1t", "Install APK"),
    ("quick1d", "Download the latest build from GitHub and install on Android."),
    ("quick2t", "Sign in once"),
    ("quick2d", "Use your IMES credentials once and keep secure auto-login."),
    ("quick3t", "Get updates"),
    ("quick3d", "Track schedule changes and new grades with notifications."),
    ("techTitle", "Built with modern technologies"),
    ("screensTitle", "Real app screens"),
    ("screenHint", "Using files: main_crop.jpg / schedule_crop.jpg / marks_crop.jpg."),
    ("securityTitle", "Security"),
    ("security1", "Credentials are stored locally in secure storage."),
    ("security2", "No password forwarding to third-party servers."),
    ("security3", "Diagnostic report excludes passwords."),
    ("faqTitle", "FAQ"),
    ("faqQ1", "Will there be an iOS version?"),
    ("faqA1", "Yes, planned for roadmap v1.0 after Android stabilization."),
    ("faqQ2", "How do I update the app?"),
    ("faqA2", "Download the latest APK from GitHub and install over current version."),
    ("faqQ3", "Is this an official university app?"),
    ("faqA3", "It is a student project for IMES and is under active development."),
    ("faqQ4", "Will my account password be stored on a server?"),
    (
        "faqA4",
        "No. Credentials are stored only on your device if secure auto-login is enabled.",
    ),
    ("faqQ5", "Can I install updates over the current version?"),
    (
        "faqA5",
        "Yes, if package signature is unchanged and the new version code is higher.",
    ),
    ("faqQ6", "How do I report a bug or request a feature?"),
    (
        "faqA6",
        "Use the GitHub Issues link in the footer and attach screenshots if possible.",
    ),
    ("ctaTitle", "Try it first"),
    (
        "ctaText",
        "The app is in open beta. Download it, use it, and help us make it better.",
    ),
    ("ctaAndroid", "Android 8.0+"),
    ("ctaSize", "15 MB"),
    ("footerAbout", "About"),
    ("footerBug", "Report bug"),
];

pub fn dictionary(lang: Lang) -> Catalog {
    match lang {
        Lang::Ru => RU,
        Lang::En => EN,
    }
}

pub fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    dictionary(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

///// Startup consistency check: both catalogs should carry the same key
/// set. Returns every `(lang, key)` pair where `lang`'s catalog lacks a
/// key the other one has.
pub fn missing_keys() -> Vec<(Lang, &'static str)> {
    let mut missing = Vec::new();
    for (a, b) in [(Lang::Ru, Lang::En), (Lang::En, Lang::Ru)] {
        for (key, _) in dictionary(b).iter().copied() {
            if lookup(a, key).is_none() {
                missing.push((a, key));
            }
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_tolerant_of_case_and_region() {
        assert_eq!(Lang::parse("ru"), Some(Lang::Ru));
        assert_eq!(Lang::parse("RU"), Some(Lang::Ru));
        assert_eq!(Lang::parse("en-US"), Some(Lang::En));
        assert_eq!(Lang::parse("en_GB"), Some(Lang::En));
        assert_eq!(Lang::parse(" de "), None);
        assert_eq!(Lang::parse(""), None);
    }

    #[test]
    fn catalogs_share_an_identical_key_set() {
        assert_eq!(missing_keys(), Vec::new());
    }

    #[test]
    fn lookup_misses_are_none_not_errors() {
        assert_eq!(lookup(Lang::Ru, "no-such-key"), None);
        assert!(lookup(Lang::En, "heroText").is_some());
    }
}
