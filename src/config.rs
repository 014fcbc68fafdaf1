use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct Config {
  pub port: u16,
  /// Idle time after which an affiliate session is dropped, zero keeps
  /// sessions forever
  pub session_ttl: Duration,
  pub gc_interval: Duration,
  pub rate_per_second: u64,
  pub rate_burst: u32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      port: 3000,
      session_ttl: Duration::from_secs(3600),
      gc_interval: Duration::from_secs(60),
      rate_per_second: 2,
      rate_burst: 100,
    }
  }
}

fn var<T>(key: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse()
      .map_err(|err| anyhow::anyhow!("Invalid {key} `{raw}`: {err}")),
    Err(_) => Ok(default),
  }
}

fn duration(key: &str, default: Duration) -> anyhow::Result<Duration> {
  match env::var(key) {
    Ok(raw) => humantime::parse_duration(raw.trim())
      .with_context(|| format!("Invalid {key} `{raw}`, expected e.g. 30m, 1h")),
    Err(_) => Ok(default),
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let default = Self::default();

    let config = Self {
      port: var("PORT", default.port)?,
      session_ttl: duration("SESSION_TTL", default.session_ttl)?,
      gc_interval: duration("GC_INTERVAL", default.gc_interval)?,
      rate_per_second: var("RATE_LIMIT_PER_SECOND", default.rate_per_second)?,
      rate_burst: var("RATE_LIMIT_BURST", default.rate_burst)?,
    };

    if config.gc_interval.is_zero() {
      anyhow::bail!("GC_INTERVAL must be greater than zero");
    }

    Ok(config)
  }
}
