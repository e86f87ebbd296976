//! # Locations
//!
//! A `Location` is the immutable `{pathname, search, hash}` triple that the
//! history port reports. Navigation calls accept a `To`, which is either a
//! string (parsed like a URL reference against the site root) or a partial
//! override merged onto the current location.

use std::fmt;
use std::sync::LazyLock;

use log::warn;
use serde::{Deserialize, Serialize};
use url::Url;

/// Root that string targets are resolved against. Only the path, query and
/// fragment of the result are kept.
static PARSE_ROOT: LazyLock<Option<Url>> =
    LazyLock::new(|| Url::parse("http://navstack.invalid/").ok());

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    /// e.g. "/users", "/about"
    pub pathname: String,
    /// e.g. "?foo=bar", or "" if none
    pub search: String,
    /// e.g. "#section1", or "" if none
    pub hash: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::from_pathname("/")
    }
}

impl Location {
    pub fn from_pathname(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Parses `input` as a URL reference relative to the site root, so
    /// `"name?x=1#h"` becomes `/name`, `?x=1`, `#h`.
    pub fn parse(input: &str) -> Self {
        match PARSE_ROOT.as_ref().map(|root| root.join(input)) {
            Some(Ok(url)) => Self {
                pathname: url.path().to_string(),
                search: prefixed('?', url.query()),
                hash: prefixed('#', url.fragment()),
            },
            _ => {
                warn!("Could not parse location {:?}, using it as a raw pathname", input);
                Self::from_pathname(input)
            }
        }
    }
}

fn prefixed(prefix: char, part: Option<&str>) -> String {
    match part {
        Some(p) if !p.is_empty() => format!("{prefix}{p}"),
        _ => String::new(),
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Sparse overrides applied on top of a base location.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialLocation {
    pub pathname: Option<String>,
    pub search: Option<String>,
    pub hash: Option<String>,
}

impl PartialLocation {
    /// Pathname falls back to `base`; search and hash do not carry over.
    pub fn merge_onto(&self, base: &Location) -> Location {
        Location {
            pathname: self
                .pathname
                .clone()
                .unwrap_or_else(|| base.pathname.clone()),
            search: self.search.clone().unwrap_or_default(),
            hash: self.hash.clone().unwrap_or_default(),
        }
    }
}

/// Target of a push or replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum To {
    Path(String),
    Partial(PartialLocation),
}

impl To {
    pub fn resolve(&self, base: &Location) -> Location {
        match self {
            To::Path(path) => Location::parse(path),
            To::Partial(partial) => partial.merge_onto(base),
        }
    }
}

impl From<&str> for To {
    fn from(path: &str) -> Self {
        To::Path(path.to_string())
    }
}

impl From<String> for To {
    fn from(path: String) -> Self {
        To::Path(path)
    }
}

impl From<PartialLocation> for To {
    fn from(partial: PartialLocation) -> Self {
        To::Partial(partial)
    }
}

impl From<Location> for To {
    fn from(location: Location) -> Self {
        To::Partial(PartialLocation {
            pathname: Some(location.pathname),
            search: Some(location.search),
            hash: Some(location.hash),
        })
    }
}

impl fmt::Display for To {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            To::Path(path) => f.write_str(path),
            To::Partial(partial) => write!(f, "{:?}", partial),
        }
    }
}
