//! Fetch interception policy for the offline cache.
//!
//! The caching proxy itself lives in the browser. This module only decides
//! which strategy a request gets and which cache namespaces are stale, so the
//! policy can be generated and tested alongside the rest of the site.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix shared by every cache namespace this site owns.
pub const CACHE_PREFIX: &str = "quizmaker-";

const FONT_HOSTS: [&str; 2] = ["fonts.googleapis.com", "fonts.gstatic.com"];

const PRECACHE_ASSETS: [&str; 6] = [
    "./",
    "./index.html",
    "./css/style.css",
    "./js/quiz.js",
    "./manifest.json",
    "./icons/icon.svg",
];

/// How a request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStrategy {
    /// Serve the cached copy immediately and refresh it in the background.
    StaleWhileRevalidate,
    /// Try the network, fall back to the cache when offline.
    NetworkFirst,
    /// Serve from cache, fetch and store on a miss.
    CacheFirst,
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::StaleWhileRevalidate => write!(f, "stale-while-revalidate"),
            FetchStrategy::NetworkFirst => write!(f, "network-first"),
            FetchStrategy::CacheFirst => write!(f, "cache-first"),
        }
    }
}

/// Request mode as reported by the fetch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestMode {
    Navigate,
    SameOrigin,
    #[default]
    NoCors,
    Cors,
}

/// The fields of an intercepted request the policy looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub mode: RequestMode,
    /// Request destination, e.g. `"document"`, `"style"`, `"audio"`.
    pub destination: String,
}

impl FetchRequest {
    pub fn parse(url: &str, mode: RequestMode, destination: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            mode,
            destination: destination.to_string(),
        })
    }

    fn is_font(&self) -> bool {
        self.url
            .host_str()
            .is_some_and(|host| FONT_HOSTS.contains(&host))
    }

    fn is_document(&self) -> bool {
        self.mode == RequestMode::Navigate || self.destination == "document"
    }
}

/// Versioned offline cache policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflinePolicy {
    version: String,
}

impl OfflinePolicy {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Name of the cache namespace for this version.
    pub fn cache_name(&self) -> String {
        format!("{CACHE_PREFIX}{}", self.version)
    }

    /// Assets stored when the worker installs.
    pub fn precache_assets(&self) -> &'static [&'static str] {
        &PRECACHE_ASSETS
    }

    pub fn strategy_for(&self, request: &FetchRequest) -> FetchStrategy {
        if request.is_font() {
            FetchStrategy::StaleWhileRevalidate
        } else if request.is_document() {
            FetchStrategy::NetworkFirst
        } else {
            FetchStrategy::CacheFirst
        }
    }

    /// Cache namespaces owned by this site but not by this version.
    ///
    /// Keys without the site prefix belong to someone else and are kept.
    pub fn stale_caches<'a, I>(&self, keys: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let current = self.cache_name();
        keys.into_iter()
            .filter(|key| key.starts_with(CACHE_PREFIX) && *key != current)
            .collect()
    }
}
