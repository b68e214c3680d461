//! `smartfaq config` command
//!
//! Get or set configuration values.
//!
//! # Usage
//! ```bash
//! smartfaq config                                   # Show config file
//! smartfaq config server.url                        # Get a value
//! smartfaq config server.url http://localhost:8787  # Set a value
//! smartfaq config --path                            # Show file locations
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use toml_edit::{DocumentMut, Item, Value};

use super::GlobalArgs;
use crate::config::Config;

/// Keys `config` knows how to write, with their expected type
const KNOWN_KEYS: &[(&str, ValueKind)] = &[
    ("server.url", ValueKind::Text),
    ("server.timeout_secs", ValueKind::Integer),
    ("display.max_answer_chars", ValueKind::Integer),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Integer,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config key (e.g., server.url)
    pub key: Option<String>,

    /// Value to set
    pub value: Option<String>,

    /// Show config file paths
    #[arg(long)]
    pub path: bool,

    /// Use the global config file instead of ./.smartfaq/config.toml
    #[arg(short, long)]
    pub global: bool,
}

fn target_path(args: &ConfigArgs, global: &GlobalArgs) -> Result<PathBuf> {
    if let Some(explicit) = &global.config {
        return Ok(explicit.clone());
    }
    if args.global {
        return Config::global_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine a config directory"));
    }
    Ok(Config::find_local_config().unwrap_or_else(Config::local_config_path))
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    let config_path = target_path(&args, global)?;

    if args.path {
        if let Some(global_path) = Config::global_config_path() {
            println!("Global: {}", global_path.display());
        }
        println!("Local:  {}", Config::local_config_path().display());
        println!();
        if config_path.exists() {
            println!("✓ Active: {}", config_path.display());
        } else {
            println!("⚠ No config file found at {}", config_path.display());
        }
        return Ok(());
    }

    match (&args.key, &args.value) {
        (Some(key), Some(value)) => {
            set_config_value(&config_path, key, value)?;
            println!("✅ Set {} = {} (in {})", key, value, config_path.display());
        }
        (Some(key), None) => match get_config_value(&config_path, key)? {
            Some(v) => println!("{}", v),
            None => println!("(not set)"),
        },
        _ => {
            if config_path.exists() {
                let content = fs::read_to_string(&config_path)?;
                println!("📋 Configuration ({}):\n", config_path.display());
                println!("{}", content);
            } else {
                println!("📋 No config file at {}", config_path.display());
                println!();
                println!("Create one with:");
                println!("  smartfaq config server.url http://localhost:8787");
            }
        }
    }

    Ok(())
}

/// Set a `section.key` value, keeping the rest of the file as written
pub fn set_config_value(path: &Path, key: &str, raw: &str) -> Result<()> {
    let kind = KNOWN_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            let known: Vec<_> = KNOWN_KEYS.iter().map(|(k, _)| *k).collect();
            anyhow::anyhow!("Unknown key: {}. Known keys: {}", key, known.join(", "))
        })?;

    let value = match kind {
        ValueKind::Text => Value::from(raw),
        ValueKind::Integer => {
            let n: i64 = raw
                .parse()
                .with_context(|| format!("{} expects a whole number, got {}", key, raw))?;
            if n < 0 {
                anyhow::bail!("{} must not be negative", key);
            }
            Value::from(n)
        }
    };

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };
    let mut doc: DocumentMut = content.parse().context("Failed to parse config.toml")?;

    let (section, field) = split_key(key)?;
    if doc.get(section).is_none() {
        doc[section] = toml_edit::table();
    }
    doc[section][field] = Item::Value(value);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, doc.to_string())?;
    Ok(())
}

/// Get a value by `section.key`
pub fn get_config_value(path: &Path, key: &str) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let doc: toml::Table = content.parse().context("Failed to parse config.toml")?;
    let (section, field) = split_key(key)?;

    Ok(doc
        .get(section)
        .and_then(|t| t.get(field))
        .map(|v| match v {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    match key.split_once('.') {
        Some((section, field)) if !section.is_empty() && !field.is_empty() && !field.contains('.') => {
            Ok((section, field))
        }
        _ => anyhow::bail!("Key must look like section.key: {}", key),
    }
}
