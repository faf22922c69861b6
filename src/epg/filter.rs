//! Streaming XMLTV guide filter
//!
//! Walks the guide as a quick-xml event stream instead of materializing a
//! full document tree: guide files can be very large and most of their
//! content is discarded. Only `channel` and `programme` elements whose id
//! (or channel reference) belongs to the retained set are decoded into the
//! output document; the `tv` header attributes are captured verbatim.

use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::info;

use crate::errors::{AppResult, SourceError};
use crate::models::xmltv::{Channel, Programme, Tv};

/// Counters for one filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpgStats {
    pub total_channels: usize,
    pub total_programmes: usize,
    pub kept_channels: usize,
    pub kept_programmes: usize,
}

/// Reduce an XMLTV document to the channels and programmes whose channel id
/// is in `retained_ids`.
///
/// A malformed `channel` or `programme` element is fatal: no partial
/// document is returned. A token error at the top level (truncated input)
/// simply ends iteration, like a clean end of stream.
pub fn filter_epg(content: &str, retained_ids: &HashSet<String>) -> AppResult<(Tv, EpgStats)> {
    let mut reader = Reader::from_str(content);
    let mut tv = Tv::default();
    let mut stats = EpgStats::default();

    loop {
        // Position of the next event's first byte, so matched elements can
        // be decoded from their exact source span.
        let span_start = reader.buffer_position() as usize;

        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"tv" => capture_header(&mut tv, e),
                b"channel" => {
                    let fragment = element_span(&mut reader, e, content, span_start)?;
                    let channel: Channel = decode_element("channel", fragment)?;
                    stats.total_channels += 1;
                    if retained_ids.contains(&channel.id) {
                        stats.kept_channels += 1;
                        tv.channels.push(channel);
                    }
                }
                b"programme" => {
                    let fragment = element_span(&mut reader, e, content, span_start)?;
                    let programme: Programme = decode_element("programme", fragment)?;
                    stats.total_programmes += 1;
                    if retained_ids.contains(&programme.channel) {
                        stats.kept_programmes += 1;
                        tv.programmes.push(programme);
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"tv" => capture_header(&mut tv, e),
                b"channel" => {
                    let fragment = &content[span_start..reader.buffer_position() as usize];
                    let channel: Channel = decode_element("channel", fragment)?;
                    stats.total_channels += 1;
                    if retained_ids.contains(&channel.id) {
                        stats.kept_channels += 1;
                        tv.channels.push(channel);
                    }
                }
                b"programme" => {
                    let fragment = &content[span_start..reader.buffer_position() as usize];
                    let programme: Programme = decode_element("programme", fragment)?;
                    stats.total_programmes += 1;
                    if retained_ids.contains(&programme.channel) {
                        stats.kept_programmes += 1;
                        tv.programmes.push(programme);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            // A top-level token error ends iteration like end-of-stream;
            // truncated guides are not distinguished from well-formed EOF.
            Err(_) => break,
            _ => {}
        }
    }

    info!(
        "Filtered guide: kept {}/{} channels, {}/{} programmes",
        stats.kept_channels, stats.total_channels, stats.kept_programmes, stats.total_programmes
    );

    Ok((tv, stats))
}

/// Capture the root element's scalar header attributes verbatim.
fn capture_header(tv: &mut Tv, element: &BytesStart) {
    for attr in element.attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"date" => tv.date = Some(value),
            b"source-info-url" => tv.source_info_url = Some(value),
            b"source-info-name" => tv.source_info_name = Some(value),
            b"source-data-url" => tv.source_data_url = Some(value),
            b"generator-info-name" => tv.generator_info_name = Some(value),
            b"generator-info-url" => tv.generator_info_url = Some(value),
            _ => {}
        }
    }
}

/// Consume the current element to its end tag and return its full source
/// text. Malformed nesting inside the element is a fatal decode error.
fn element_span<'a>(
    reader: &mut Reader<&[u8]>,
    element: &BytesStart,
    content: &'a str,
    span_start: usize,
) -> AppResult<&'a str> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    reader
        .read_to_end(element.name())
        .map_err(|e| SourceError::parse(name, e.to_string()))?;
    Ok(&content[span_start..reader.buffer_position() as usize])
}

/// Fully decode one matched element from its source text.
fn decode_element<T: serde::de::DeserializeOwned>(name: &str, fragment: &str) -> AppResult<T> {
    quick_xml::de::from_str(fragment).map_err(|e| SourceError::parse(name, e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tv SYSTEM "xmltv.dtd">
<tv date="20240101" source-info-name="Example" generator-info-name="gen">
  <channel id="espn.us">
    <display-name>ESPN</display-name>
  </channel>
  <channel id="cnn.us">
    <display-name>CNN</display-name>
  </channel>
  <programme start="20240101120000 +0000" stop="20240101130000 +0000" channel="espn.us">
    <title>SportsCenter</title>
  </programme>
  <programme start="20240101120000 +0000" stop="20240101140000 +0000" channel="cnn.us">
    <title>Newsroom</title>
  </programme>
  <programme start="20240101140000 +0000" stop="20240101150000 +0000" channel="other.us">
    <title>Elsewhere</title>
  </programme>
</tv>"#;

    fn ids(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_only_retained_channels_and_programmes() {
        let (tv, stats) = filter_epg(GUIDE, &ids(&["espn.us"])).unwrap();
        assert_eq!(tv.channels.len(), 1);
        assert_eq!(tv.channels[0].id, "espn.us");
        assert_eq!(tv.programmes.len(), 1);
        assert_eq!(tv.programmes[0].channel, "espn.us");
        assert_eq!(tv.programmes[0].titles[0].value, "SportsCenter");
        assert_eq!(
            stats,
            EpgStats {
                total_channels: 2,
                total_programmes: 3,
                kept_channels: 1,
                kept_programmes: 1,
            }
        );
    }

    #[test]
    fn captures_header_attributes() {
        let (tv, _) = filter_epg(GUIDE, &ids(&[])).unwrap();
        assert_eq!(tv.date.as_deref(), Some("20240101"));
        assert_eq!(tv.source_info_name.as_deref(), Some("Example"));
        assert_eq!(tv.generator_info_name.as_deref(), Some("gen"));
        assert!(tv.source_info_url.is_none());
    }

    #[test]
    fn empty_retained_set_keeps_nothing() {
        let (tv, stats) = filter_epg(GUIDE, &ids(&[])).unwrap();
        assert!(tv.channels.is_empty());
        assert!(tv.programmes.is_empty());
        assert_eq!(stats.total_channels, 2);
        assert_eq!(stats.total_programmes, 3);
    }

    #[test]
    fn malformed_element_aborts() {
        let guide = r#"<tv><channel id="a"><display-name>A</display-name></tv>"#;
        let result = filter_epg(guide, &ids(&["a"]));
        assert!(result.is_err());
    }

    #[test]
    fn truncated_document_ends_iteration_normally() {
        let guide = r#"<tv date="20240101">
  <channel id="a"><display-name>A</display-name></channel>
  <programme start="2024" channel="a"><title>T</title></programme>
"#;
        let (tv, stats) = filter_epg(guide, &ids(&["a"])).unwrap();
        assert_eq!(tv.channels.len(), 1);
        assert_eq!(tv.programmes.len(), 1);
        assert_eq!(stats.kept_programmes, 1);
    }

    #[test]
    fn kept_counts_never_exceed_totals() {
        let (_, stats) = filter_epg(GUIDE, &ids(&["espn.us", "cnn.us", "bogus"])).unwrap();
        assert!(stats.kept_channels <= stats.total_channels);
        assert!(stats.kept_programmes <= stats.total_programmes);
        assert_eq!(stats.kept_channels, 2);
        assert_eq!(stats.kept_programmes, 2);
    }
}
