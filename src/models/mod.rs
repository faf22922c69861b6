//! Core data models for playlist reconciliation.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

pub mod xmltv;

/// One playlist entry: a channel/stream with its EXTINF metadata.
///
/// `raw` holds the original `#EXTINF` line verbatim so unmodified tags can be
/// re-emitted in the published playlist. Dedup identity is the pair of
/// `name` and the `tvg-id` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub uri: String,
    pub tags: HashMap<String, String>,
    pub raw: String,
}

impl Track {
    /// Tag value for `key`, or the empty string when absent.
    pub fn tag(&self, key: &str) -> &str {
        self.tags.get(key).map(String::as_str).unwrap_or("")
    }

    /// The channel identifier (`tvg-id` tag), empty when missing.
    pub fn tvg_id(&self) -> &str {
        self.tag("tvg-id")
    }
}

/// Which tag field a filter matches against.
///
/// Unknown filter types are rejected at config deserialization time, which is
/// fatal for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Id,
    Group,
    Name,
}

impl FilterKind {
    /// The track tag this filter kind inspects.
    pub fn tag_field(&self) -> &'static str {
        match self {
            FilterKind::Id => "tvg-id",
            FilterKind::Group => "group-title",
            FilterKind::Name => "tvg-name",
        }
    }
}

/// Filter rule as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub pattern: String,
}

/// A compiled match rule. Its position in the filter list is its priority:
/// lower index wins.
#[derive(Debug, Clone)]
pub struct TrackFilter {
    pub kind: FilterKind,
    pub pattern: Regex,
}

impl TrackFilter {
    /// Compile an ordered filter list from config. Any invalid pattern makes
    /// the whole rule set unusable.
    pub fn compile(configs: &[FilterConfig]) -> AppResult<Vec<TrackFilter>> {
        configs
            .iter()
            .map(|f| {
                Ok(TrackFilter {
                    kind: f.kind,
                    pattern: Regex::new(&f.pattern)?,
                })
            })
            .collect()
    }
}
