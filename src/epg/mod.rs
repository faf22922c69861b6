//! XMLTV guide filtering and serialization.

pub mod filter;

pub use filter::{filter_epg, EpgStats};

use crate::errors::{AppResult, SourceError};
use crate::models::xmltv::Tv;

/// Fixed prefix for published guide documents.
const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE tv SYSTEM \"xmltv.dtd\">";

/// Serialize the reduced guide with the standard XMLTV declaration and
/// DOCTYPE prefix.
pub fn serialize_epg(tv: &Tv) -> AppResult<String> {
    let body = quick_xml::se::to_string(tv)
        .map_err(|e| SourceError::parse("xmltv", format!("serialization failed: {e}")))?;
    Ok(format!("{}{}", XML_HEADER, body))
}
