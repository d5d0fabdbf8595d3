//! `[serve]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[serve]` section in lode.toml - local preview server.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # reachable from the LAN
/// port = 8080
/// root = "site"          # directory that contains `content/`
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port to try; the next few are tried when it is taken.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Directory served at `/`, relative to the project root.
    #[serde(default = "defaults::serve::root")]
    #[educe(Default = defaults::serve::root())]
    pub root: PathBuf,
}
