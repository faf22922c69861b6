//! XMLTV document model
//!
//! Serde types for the standard XMLTV element shapes (`tv`, `channel`,
//! `programme`), covering only the fields the guide filter actually carries
//! through. Deserialization ignores elements outside this set; serialization
//! reproduces a schema-compatible document.

use serde::{Deserialize, Serialize};

/// Root `<tv>` element with its scalar header attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "tv")]
pub struct Tv {
    #[serde(rename = "@date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "@source-info-url", skip_serializing_if = "Option::is_none")]
    pub source_info_url: Option<String>,
    #[serde(rename = "@source-info-name", skip_serializing_if = "Option::is_none")]
    pub source_info_name: Option<String>,
    #[serde(rename = "@source-data-url", skip_serializing_if = "Option::is_none")]
    pub source_data_url: Option<String>,
    #[serde(
        rename = "@generator-info-name",
        skip_serializing_if = "Option::is_none"
    )]
    pub generator_info_name: Option<String>,
    #[serde(
        rename = "@generator-info-url",
        skip_serializing_if = "Option::is_none"
    )]
    pub generator_info_url: Option<String>,
    #[serde(rename = "channel", default)]
    pub channels: Vec<Channel>,
    #[serde(rename = "programme", default)]
    pub programmes: Vec<Programme>,
}

/// A `<channel>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "display-name", default)]
    pub display_names: Vec<LocalizedText>,
    #[serde(rename = "icon", default)]
    pub icons: Vec<Icon>,
    #[serde(rename = "url", default)]
    pub urls: Vec<String>,
}

/// A `<programme>` element with its channel reference and time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Programme {
    #[serde(rename = "@start")]
    pub start: String,
    #[serde(rename = "@stop", skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    #[serde(rename = "@channel")]
    pub channel: String,
    #[serde(rename = "title", default)]
    pub titles: Vec<LocalizedText>,
    #[serde(rename = "sub-title", default)]
    pub sub_titles: Vec<LocalizedText>,
    #[serde(rename = "desc", default)]
    pub descriptions: Vec<LocalizedText>,
    #[serde(rename = "category", default)]
    pub categories: Vec<LocalizedText>,
    #[serde(rename = "language", skip_serializing_if = "Option::is_none")]
    pub language: Option<LocalizedText>,
    #[serde(rename = "episode-num", default)]
    pub episode_nums: Vec<EpisodeNum>,
    #[serde(rename = "icon", default)]
    pub icons: Vec<Icon>,
    #[serde(rename = "rating", default)]
    pub ratings: Vec<Rating>,
}

/// Text content with an optional `lang` attribute (`display-name`, `title`,
/// `desc`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "@lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// An `<icon src="..."/>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "@src")]
    pub src: String,
    #[serde(rename = "@width", skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(rename = "@height", skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// An `<episode-num system="...">` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeNum {
    #[serde(rename = "@system", skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// A `<rating>` element with its nested `<value>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "@system", skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
