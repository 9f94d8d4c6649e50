//! Product photo URLs.
//!
//! The API returns photo paths relative to its own origin. They are resolved
//! against the API base URL and checked against an allow-list of remote
//! patterns before being shown as preview links.

use serde::{Deserialize, Serialize};

/// One allowed origin and path prefix, e.g. `http://localhost:3001/catalog/images/**`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePattern {
    pub protocol: String,
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Path glob. A trailing `/**` matches any sub-path.
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_pathname() -> String {
    "/**".to_string()
}

impl RemotePattern {
    pub fn new(
        protocol: impl Into<String>,
        hostname: impl Into<String>,
        port: Option<u16>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            hostname: hostname.into(),
            port,
            pathname: pathname.into(),
        }
    }

    /// Parse `scheme://host[:port]/path` into a pattern.
    pub fn parse(pattern: &str) -> Option<Self> {
        let parts = UrlParts::parse(pattern)?;
        Some(Self {
            protocol: parts.scheme.to_string(),
            hostname: parts.host.to_string(),
            port: parts.port,
            pathname: if parts.path.is_empty() {
                default_pathname()
            } else {
                parts.path.to_string()
            },
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        let Some(parts) = UrlParts::parse(url) else {
            return false;
        };
        if !parts.scheme.eq_ignore_ascii_case(&self.protocol)
            || !parts.host.eq_ignore_ascii_case(&self.hostname)
        {
            return false;
        }
        if self.port.is_some() && self.port != parts.port {
            return false;
        }
        path_matches(&self.pathname, parts.path)
    }
}

/// The development image origin.
pub fn default_remote_patterns() -> Vec<RemotePattern> {
    vec![RemotePattern::new("http", "localhost", Some(3001), "/catalog/images/**")]
}

/// Resolves photo paths and decides which ones may be displayed.
#[derive(Debug, Clone)]
pub struct MediaPolicy {
    base_url: String,
    patterns: Vec<RemotePattern>,
}

impl MediaPolicy {
    pub fn new(base_url: impl Into<String>, patterns: Vec<RemotePattern>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            patterns,
        }
    }

    pub fn patterns(&self) -> &[RemotePattern] {
        &self.patterns
    }

    /// Absolute URL for a photo path. Absolute inputs are returned as is.
    pub fn resolve_photo_url(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        if path.starts_with('/') {
            Some(format!("{}{}", self.base_url, path))
        } else {
            Some(format!("{}/{}", self.base_url, path))
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }

    /// Resolved URL, only if an allow-list pattern accepts it.
    pub fn displayable(&self, path: &str) -> Option<String> {
        self.resolve_photo_url(path).filter(|url| self.is_allowed(url))
    }
}

struct UrlParts<'a> {
    scheme: &'a str,
    host: &'a str,
    port: Option<u16>,
    path: &'a str,
}

impl<'a> UrlParts<'a> {
    fn parse(url: &'a str) -> Option<Self> {
        let (scheme, rest) = url.split_once("://")?;
        let (authority, path) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port.parse().ok()?)),
            None => (authority, default_port(scheme)),
        };
        if host.is_empty() {
            return None;
        }
        Some(Self {
            scheme,
            host,
            port,
            path,
        })
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/**") {
        return path == prefix || path.starts_with(&format!("{}/", prefix));
    }
    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path
            .strip_prefix(&format!("{}/", prefix))
            .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'));
    }
    pattern == path
}
