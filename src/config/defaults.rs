//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [source] Section Defaults
// ============================================================================

pub mod source {
    pub fn base_url() -> String {
        "http://127.0.0.1:5277".into()
    }

    pub fn content() -> String {
        "content".into()
    }

    pub mod repository {
        pub fn api() -> String {
            "https://api.github.com".into()
        }

        pub fn path() -> String {
            "content".into()
        }
    }
}

// ============================================================================
// [resolve] Section Defaults
// ============================================================================

pub mod resolve {
    use crate::resolve::StrategyKind;

    /// Seconds per strategy attempt.
    pub fn timeout() -> u64 {
        15
    }

    /// Seconds per HTTP request.
    pub fn request_timeout() -> u64 {
        8
    }

    pub fn extensions() -> Vec<String> {
        vec!["json".into(), "md".into()]
    }

    pub fn probe_start() -> u32 {
        1
    }

    pub fn probe_end() -> u32 {
        20
    }

    pub fn strategies() -> Vec<StrategyKind> {
        StrategyKind::DEFAULT_ORDER.to_vec()
    }

    pub fn user_agent() -> String {
        concat!("lode/", env!("CARGO_PKG_VERSION")).into()
    }
}

// ============================================================================
// [locale] Section Defaults
// ============================================================================

pub mod locale {
    use std::path::PathBuf;

    pub fn state() -> PathBuf {
        "~/.config/lode/locale".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    use std::path::PathBuf;

    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }

    pub fn root() -> PathBuf {
        ".".into()
    }
}
