//! `[locale]` section configuration.

use super::defaults;
use crate::content::Locale;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[locale]` section in lode.toml.
///
/// # Example
/// ```toml
/// [locale]
/// default = "en"
/// state = "~/.cache/lode/locale"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Locale used when nothing has been saved yet.
    #[serde(default)]
    pub default: Locale,

    /// File holding the selected locale. `~` is expanded.
    #[serde(default = "defaults::locale::state")]
    #[educe(Default = defaults::locale::state())]
    pub state: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::LodeConfig;
    use super::*;

    #[test]
    fn test_locale_defaults() {
        let config: LodeConfig = toml::from_str("").unwrap();
        assert_eq!(config.locale.default, Locale::Tr);
        assert!(config.locale.state.starts_with("~"));
    }

    #[test]
    fn test_locale_section() {
        let config: LodeConfig = toml::from_str(
            r#"
            [locale]
            default = "en"
            state = "state/locale"
        "#,
        )
        .unwrap();
        assert_eq!(config.locale.default, Locale::En);
        assert_eq!(config.locale.state, PathBuf::from("state/locale"));
    }

    #[test]
    fn test_unknown_locale_rejection() {
        let result: Result<LodeConfig, _> = toml::from_str(
            r#"
            [locale]
            default = "de"
        "#,
        );
        assert!(result.is_err());
    }
}
