//! Lenient parsing of `application/x-www-form-urlencoded` data.
//!
//! Query strings and form bodies may repeat a key (`rules=a&rules=b`), which
//! axum's `Query`/`Form` extractors do not model. Malformed values never fail
//! a request: they fall back to the caller's default and are logged.

use std::{fmt::Display, str::FromStr};

#[derive(Debug, Default, Clone)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// First value of `key`, if present and not blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Every value of `key`, in order of appearance.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Parses a number, falling back to `default` when absent or malformed.
    pub fn int<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            None => default,
            Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
                tracing::warn!("Error parsing int param {}={:?}: {}", key, raw, e);
                default
            }),
        }
    }

    /// Parses a boolean (`true`/`false`, `1`/`0`, `t`/`f`, `on`/`off`).
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "t" | "true" | "on" => true,
                "0" | "f" | "false" | "off" => false,
                _ => {
                    tracing::warn!("Error parsing bool param {}={:?}", key, raw);
                    default
                }
            },
        }
    }

    /// Values of a repeatable, comma-separated key with blanks dropped.
    ///
    /// `rules=a,b&rules=c` yields `["a", "b", "c"]`.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .flat_map(|(_, v)| v.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
