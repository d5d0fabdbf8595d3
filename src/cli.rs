//! Command-line interface definitions.

use crate::content::Locale;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Resilient bilingual content loader for static sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; the config file and relative paths are resolved against it
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file name (default: lode.toml)
    #[arg(short = 'C', long, global = true, default_value = "lode.toml")]
    pub config: PathBuf,

    /// Override the site origin content is fetched from.
    ///
    /// Handy for pointing a production config at a local preview:
    ///   lode --base-url "http://127.0.0.1:5277" resolve projects
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a collection through the strategy ladder and print it
    Resolve {
        /// Collection name, e.g. `projects`
        collection: String,

        /// Group records by their `status` field
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        group: Option<bool>,

        /// Display language (default: the saved locale)
        #[arg(short, long)]
        lang: Option<Locale>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a single document such as `contact` or `hero`
    Document {
        /// Document name, with or without extension
        name: String,

        /// Display language (default: the saved locale)
        #[arg(short, long)]
        lang: Option<Locale>,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve a local content directory with browsable listings
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show or change the saved display language
    Lang {
        /// New language, or `toggle` to switch
        action: Option<LangAction>,
    },
}

/// Argument of `lode lang`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangAction {
    Tr,
    En,
    Toggle,
}

impl LangAction {
    /// The locale to store, given the current one.
    pub const fn apply(self, current: Locale) -> Locale {
        match self {
            Self::Tr => Locale::Tr,
            Self::En => Locale::En,
            Self::Toggle => current.toggle(),
        }
    }
}
