//! Lode - resilient bilingual content loader for static sites.

use anyhow::Result;
use clap::Parser;
use lode::{
    cli::{Cli, Commands, LangAction},
    config::LodeConfig,
    content::{ContentRecord, Locale, ResolvedCollection},
    fetch::HttpFetcher,
    log,
    resolve::{Resolution, Resolver},
    serve::serve_content,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Resolve {
            collection,
            group,
            lang,
            json,
        } => resolve_collection(&config, collection, *group, *lang, *json),
        Commands::Document { name, lang, json } => load_document(&config, name, *lang, *json),
        Commands::Serve { .. } => serve_content(&config),
        Commands::Lang { action } => change_lang(&config, *action),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<LodeConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        LodeConfig::from_path(&config_path)?
    } else {
        log!("config"; "{} not found, using defaults", config_path.display());
        LodeConfig::default()
    };
    config.update_with_cli(cli);
    config.validate(cli)?;

    Ok(config)
}

fn build_resolver(config: &LodeConfig) -> Resolver<HttpFetcher> {
    let fetcher = HttpFetcher::new(config.resolve.request_timeout(), &config.resolve.user_agent);
    Resolver::new(fetcher, config.source(), config.resolve_options())
}

/// `lode resolve`: print the collection, or `unavailable` when every strategy failed.
fn resolve_collection(
    config: &LodeConfig,
    name: &str,
    group: Option<bool>,
    lang: Option<Locale>,
    json: bool,
) -> Result<()> {
    let mut collection = config.collection(name);
    if let Some(group) = group {
        collection.group_by_status = group;
    }
    let locale = lang.unwrap_or_else(|| config.locale_store().load());

    match build_resolver(config).resolve(&collection) {
        Resolution::Resolved { collection, .. } if json => {
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        Resolution::Resolved { collection, .. } => print_collection(&collection, locale),
        Resolution::Unavailable { .. } => println!("unavailable"),
    }
    Ok(())
}

/// `lode document`: print one record, or `unavailable`.
fn load_document(config: &LodeConfig, name: &str, lang: Option<Locale>, json: bool) -> Result<()> {
    let locale = lang.unwrap_or_else(|| config.locale_store().load());

    match build_resolver(config).document(name) {
        Some(record) if json => println!("{}", serde_json::to_string_pretty(&record)?),
        Some(record) => print_record(&record, locale),
        None => println!("unavailable"),
    }
    Ok(())
}

/// `lode lang`: show the saved locale, or store a new one.
fn change_lang(config: &LodeConfig, action: Option<LangAction>) -> Result<()> {
    let store = config.locale_store();
    let current = store.load();

    let Some(action) = action else {
        println!("{current}");
        return Ok(());
    };

    let next = action.apply(current);
    store.save(next)?;
    log!("lang"; "{} -> {} ({})", current, next, store.path().display());
    println!("{next}");
    Ok(())
}

fn print_collection(collection: &ResolvedCollection, locale: Locale) {
    match collection {
        ResolvedCollection::Flat(records) => records.iter().for_each(|r| print_line(r, locale)),
        ResolvedCollection::Grouped(groups) => {
            for group in groups {
                println!("[{}]", group.status.as_deref().unwrap_or("-"));
                group.records.iter().for_each(|r| print_line(r, locale));
            }
        }
    }
}

fn print_line(record: &ContentRecord, locale: Locale) {
    let title = ["title", "name", "heading"]
        .into_iter()
        .map(|field| record.localized(field, locale))
        .find(|text| !text.is_empty())
        .unwrap_or("(untitled)");
    println!("{:>4}  {}", record.order(), title);
}

fn print_record(record: &ContentRecord, locale: Locale) {
    for (key, value) in record.localize(locale) {
        match value {
            serde_json::Value::String(text) => println!("{key}: {text}"),
            other => println!("{key}: {other}"),
        }
    }
}
