//! Display language and its persistence.
//!
//! The locale is an explicit value passed to every localized read. Loading
//! and saving the user's choice happens only at the application edge
//! (`lode lang`), through [`LocaleStore`].

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];

    /// Two-letter code used in field suffixes (`title_tr`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }

    /// The other language.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Tr => Self::En,
            Self::En => Self::Tr,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            other => bail!("unknown locale `{other}`, expected `tr` or `en`"),
        }
    }
}

/// File-backed storage for the selected locale.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    path: PathBuf,
    fallback: Locale,
}

impl LocaleStore {
    pub fn new(path: impl Into<PathBuf>, fallback: Locale) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored locale. A missing or unreadable state file yields the fallback.
    pub fn load(&self) -> Locale {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| text.parse().ok())
            .unwrap_or(self.fallback)
    }

    /// Persist `locale`, creating parent directories as needed.
    pub fn save(&self, locale: Locale) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, format!("{locale}\n"))
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_locale() {
        assert_eq!("tr".parse::<Locale>().unwrap(), Locale::Tr);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Locale::Tr.toggle(), Locale::En);
        assert_eq!(Locale::En.toggle().toggle(), Locale::En);
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = LocaleStore::new(dir.path().join("state/locale"), Locale::Tr);

        assert_eq!(store.load(), Locale::Tr);
        store.save(Locale::En).unwrap();
        assert_eq!(store.load(), Locale::En);
    }

    #[test]
    fn test_store_invalid_content_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("locale");
        fs::write(&path, "klingon").unwrap();

        let store = LocaleStore::new(&path, Locale::En);
        assert_eq!(store.load(), Locale::En);
    }
}
