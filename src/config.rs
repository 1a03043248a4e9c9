use crate::clock::{Clock, FixedClock, SystemClock};
use crate::path_state::{parse_date, strip_base_path};
use chrono::{DateTime, Utc};
use std::{env, sync::Arc};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_NAME: &str = "progression";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `"/"` or a prefix such as `"/progression"` without a trailing slash.
    pub base_path: String,
    pub site_url: Option<String>,
    pub site_name: String,
    pub fixed_now: Option<DateTime<Utc>>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT {value:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let fixed_now = lookup("APP_NOW").and_then(|value| {
            let parsed = parse_date(&value);
            if parsed.is_none() {
                warn!("ignoring invalid APP_NOW {value:?}");
            }
            parsed
        });

        Self {
            port,
            base_path: normalize_base_path(lookup("APP_BASE_PATH").as_deref().unwrap_or("/")),
            site_url: lookup("APP_SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            site_name: lookup("APP_SITE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            fixed_now,
        }
    }

    /// Base path as a URL prefix: empty at the root, otherwise `"/x"`.
    pub fn prefix(&self) -> &str {
        if self.base_path == "/" {
            ""
        } else {
            &self.base_path
        }
    }

    pub fn strip_base<'a>(&self, path: &'a str) -> &'a str {
        strip_base_path(path, &self.base_path)
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.fixed_now {
            Some(now) => Arc::new(FixedClock(now)),
            None => Arc::new(SystemClock),
        }
    }
}

pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
