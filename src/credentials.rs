//! Session cookie bundle exported from a browser logged into the Alexa web
//! console. The bundle stands in for a login: it is forwarded verbatim and
//! never refreshed.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::expand_path;
use crate::error::{AlexaError, Result};

/// Cookie file name searched in the working directory and the temp directory.
pub const COOKIE_FILE_NAME: &str = ".cookie.json";

/// Name of the cookie whose value doubles as the `csrf` request header.
pub const CSRF_COOKIE: &str = "csrf";

/// Accepted cookie file layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum CookieFile {
    /// `{"session-id": "abc", "ubid": "def"}`
    Map(BTreeMap<String, String>),
    /// `[{"name": "session-id", "value": "abc", "domain": ...}, ...]`
    List(Vec<CookieEntry>),
}

#[derive(Deserialize)]
struct CookieEntry {
    name: String,
    value: String,
}

/// Cookies in file order. A name may repeat (exports often carry the same
/// cookie for `.amazon.com` and `alexa.amazon.com`); every pair is forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieBundle {
    cookies: Vec<(String, String)>,
}

impl CookieBundle {
    /// Find the cookie file. A configured path must exist; otherwise the
    /// default locations are searched in order.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            let path = expand_path(path);
            if path.is_file() {
                return Ok(path);
            }
            return Err(AlexaError::CookieNotFound(path.display().to_string()));
        }

        let candidates = default_locations();
        for candidate in &candidates {
            if candidate.is_file() {
                tracing::debug!("Using cookie file {}", candidate.display());
                return Ok(candidate.clone());
            }
            tracing::info!("Cookie not found at {}", candidate.display());
        }

        Err(AlexaError::CookieNotFound(
            candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AlexaError::InvalidCookie(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
            .map_err(|e| AlexaError::InvalidCookie(format!("{}: {}", path.display(), e)))
    }

    /// Parse and validate cookie file content.
    ///
    /// Returns the validation failure as a plain message so callers can
    /// prefix it with the file it came from.
    pub fn from_json(content: &str) -> std::result::Result<Self, String> {
        let parsed: CookieFile = serde_json::from_str(content).map_err(|_| {
            "expected an object of cookie names to string values, \
             or an array of {\"name\", \"value\"} entries"
                .to_string()
        })?;

        let cookies: Vec<(String, String)> = match parsed {
            CookieFile::Map(map) => map.into_iter().collect(),
            CookieFile::List(entries) => entries
                .into_iter()
                .map(|entry| (entry.name, entry.value))
                .collect(),
        };

        if cookies.is_empty() {
            return Err("cookie file contains no cookies".to_string());
        }
        if cookies.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err("cookie file contains a cookie with an empty name".to_string());
        }

        let mut seen = BTreeSet::new();
        for (name, _) in &cookies {
            if !seen.insert(name.as_str()) {
                tracing::warn!(
                    "Cookie '{}' appears more than once; forwarding every value",
                    name
                );
            }
        }

        Ok(Self { cookies })
    }

    /// First value for `name`, in file order.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(cookie, _)| cookie == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn csrf(&self) -> Option<&str> {
        self.get(CSRF_COOKIE)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Render as a `Cookie` request header value.
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from(COOKIE_FILE_NAME),
        std::env::temp_dir().join(COOKIE_FILE_NAME),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("alexa-control").join("cookie.json"));
    }
    paths
}
