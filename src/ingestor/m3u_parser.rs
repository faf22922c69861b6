//! M3U playlist parsing
//!
//! Parses the single-track-per-entry M3U model: an `#EXTINF:` metadata line
//! followed by the stream URI on the next non-blank line. The original
//! metadata line is preserved verbatim on each [`Track`] so the publisher can
//! re-emit tags unmodified.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::errors::AppResult;
use crate::models::Track;

/// Parse M3U content into tracks.
pub fn parse_m3u(content: &str) -> AppResult<Vec<Track>> {
    let mut tracks = Vec::new();
    let lines: Vec<&str> = content.lines().collect();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if line.starts_with("#EXTINF:") {
            if let Some(track) = parse_extinf_line(line, lines.get(i + 1).copied()) {
                tracks.push(track);
                i += 2; // Skip the URI line
            } else {
                debug!("Skipping EXTINF entry without a stream URI at line {}", i + 1);
                // The next line was not a URI, so it may itself start an entry
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    info!("Parsed {} tracks from M3U playlist", tracks.len());
    Ok(tracks)
}

/// Parse one `#EXTINF:` line and its following URI line.
///
/// Format: `#EXTINF:-1 tvg-id="..." tvg-name="..." group-title="...",Channel Name`
fn parse_extinf_line(extinf_line: &str, uri_line: Option<&str>) -> Option<Track> {
    let uri = match uri_line {
        Some(uri) if !uri.trim().is_empty() && !uri.trim().starts_with('#') => {
            uri.trim().to_string()
        }
        _ => return None,
    };

    let metadata = &extinf_line[8..]; // Skip "#EXTINF:"
    let comma_pos = name_separator(metadata)?;
    let attributes_part = &metadata[..comma_pos];
    let name = metadata[comma_pos + 1..].trim().to_string();

    let tags: HashMap<String, String> = parse_attributes(attributes_part).into_iter().collect();

    Some(Track {
        name,
        uri,
        tags,
        raw: extinf_line.to_string(),
    })
}

/// Byte position of the comma separating the metadata segment from the
/// display name: the first comma outside a quoted attribute value.
fn name_separator(metadata: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escape_next = false;
    for (idx, ch) in metadata.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' => escape_next = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Quote- and escape-aware attribute scanner for the EXTINF metadata segment.
fn parse_attributes(attributes: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut current_key = String::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut in_value = false;
    let mut escape_next = false;

    for ch in attributes.chars() {
        if escape_next {
            if in_value {
                current_value.push(ch);
            } else {
                current_key.push(ch);
            }
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' if in_value => {
                if in_quotes {
                    // The closing quote ends the value, whatever follows
                    attrs.push((current_key.trim().to_string(), current_value.clone()));
                    current_key.clear();
                    current_value.clear();
                    in_quotes = false;
                    in_value = false;
                } else {
                    in_quotes = true;
                }
            }
            '=' if !in_quotes && !in_value => {
                in_value = true;
            }
            ' ' | '\t' if !in_quotes => {
                if in_value && !current_value.is_empty() {
                    attrs.push((current_key.trim().to_string(), current_value.clone()));
                    current_key.clear();
                    current_value.clear();
                    in_value = false;
                } else if !in_value {
                    // Bare tokens like the duration field are not attributes
                    current_key.clear();
                }
            }
            _ => {
                if in_value {
                    current_value.push(ch);
                } else {
                    current_key.push(ch);
                }
            }
        }
    }

    // Handle last (unquoted) attribute
    if in_value && !current_value.is_empty() {
        attrs.push((current_key.trim().to_string(), current_value.clone()));
    }

    attrs
}
