use std::fs;
use std::path::PathBuf;

use landing_core::storage::PreferenceStore;
use tracing::warn;

/// File-backed preference store: one small `key=value` file under the
/// user's config directory. Reads are best-effort; a missing or garbled
/// file behaves as an empty store.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_config_dir() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("myimes").join("prefs")))
    }

    fn read_entries(&self) -> Vec<(String, String)> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        raw.lines()
            .filter_map(|line| {
                let (key, value) = line.split_once('=')?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect()
    }

    fn write_entries(&self, entries: &[(String, String)]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut payload = String::new();
        for (key, value) in entries {
            payload.push_str(key);
            payload.push('=');
            payload.push_str(value);
            payload.push('\n');
        }
        fs::write(&self.path, payload)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => entries.push((key.to_string(), value.to_string())),
        }
        if let Err(err) = self.write_entries(&entries) {
            warn!(%err, path = %self.path.display(), "unable to persist preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::storage::LANG_KEY;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_the_filesystem() {
        let dir = tempdir().expect("tempdir");
        let store = FilePreferenceStore::new(dir.path().join("nested").join("prefs"));
        assert_eq!(store.get(LANG_KEY), None);
        store.set(LANG_KEY, "en");
        store.set("other", "value");
        store.set(LANG_KEY, "ru");
        assert_eq!(store.get(LANG_KEY), Some("ru".to_string()));
        assert_eq!(store.get("other"), Some("value".to_string()));

        // A fresh handle over the same file sees the persisted state.
        let reopened = FilePreferenceStore::new(dir.path().join("nested").join("prefs"));
        assert_eq!(reopened.get(LANG_KEY), Some("ru".to_string()));
    }

    #[test]
    fn garbled_lines_are_skipped() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("prefs");
        fs::write(&path, "not a pair\nmyimes_lang=en\n").expect("write fixture");
        let store = FilePreferenceStore::new(path);
        assert_eq!(store.get(LANG_KEY), Some("en".to_string()));
    }
}
