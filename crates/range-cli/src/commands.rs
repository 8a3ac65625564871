use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use phrase_engine::NaturalResolver;
use range_engine::{
    effective_separator, validate_separator, ParseError, RangeResolver, DEFAULT_WINDOW,
};
use thiserror::Error;
use tracing::debug;

use crate::cli::{ConfigCommand, ConfigKey, ResolveArgs};
use crate::config::{self, Config};
use crate::output;

/// A time expression the engine rejected, as opposed to a configuration or
/// runtime failure.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ExpressionError(pub ParseError);

pub fn resolve(args: ResolveArgs, config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)?;
    if let (None, Some(configured)) = (&args.sep, &config.range_separator) {
        validate_separator(configured).context("invalid range_separator in config")?;
    }
    let separator = effective_separator(args.sep.as_deref(), config.range_separator.as_deref());
    let tz = effective_timezone(args.tz.as_deref(), config.timezone.as_deref())?;
    let now = reference_now(args.now.as_deref())?;
    let window = config
        .default_window()
        .context("invalid default_window in config")?
        .unwrap_or(DEFAULT_WINDOW);
    debug!(separator, timezone = tz.name(), %now, %window, "resolve context");

    let resolver = RangeResolver::new(NaturalResolver::new(), tz).with_default_window(window);
    let interval = resolver
        .resolve(args.time.as_deref(), separator, now)
        .map_err(ExpressionError)?;

    if args.json {
        println!("{}", output::range_filter(&interval, &args.field)?);
    } else {
        println!("{}", output::render_text(&interval));
    }
    Ok(())
}

pub fn config(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    match cmd {
        ConfigCommand::Get { key: Some(key), .. } => {
            if let Some(value) = config.get(key) {
                println!("{value}");
            }
        }
        ConfigCommand::Get { key: None, .. } => {
            for key in ConfigKey::ALL {
                if let Some(value) = config.get(key) {
                    println!("{} = {value:?}", key.file_name());
                }
            }
        }
        ConfigCommand::Set { key, value } => {
            config.set(key, &value)?;
            config.save_to(config_path)?;
            debug!(key = key.file_name(), path = %config_path.display(), "config saved");
        }
    }
    Ok(())
}

/// `--tz`, then the configured zone, then `TZ` when it names an IANA zone,
/// then UTC.
fn effective_timezone(flag: Option<&str>, configured: Option<&str>) -> Result<Tz> {
    if let Some(name) = flag {
        return config::parse_timezone(name);
    }
    if let Some(name) = configured {
        return config::parse_timezone(name).context("invalid timezone in config");
    }
    let from_env = std::env::var("TZ")
        .ok()
        .and_then(|name| name.trim_start_matches(':').parse::<Tz>().ok());
    Ok(from_env.unwrap_or(chrono_tz::UTC))
}

fn reference_now(flag: Option<&str>) -> Result<DateTime<Utc>> {
    match flag {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("invalid --now '{s}': expected RFC 3339")),
        None => Ok(Utc::now()),
    }
}
