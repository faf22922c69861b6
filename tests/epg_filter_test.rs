//! Guide filtering against the retained channel set, and round-tripping the
//! reduced document through serialization.

use std::collections::HashSet;

use tvmux::epg::{filter_epg, serialize_epg};

const GUIDE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE tv SYSTEM "xmltv.dtd">
<tv date="20240301" source-info-name="Example Listings" generator-info-name="example-gen" generator-info-url="http://example.com">
  <channel id="one.example">
    <display-name lang="en">One</display-name>
    <icon src="http://example.com/one.png"/>
  </channel>
  <channel id="two.example">
    <display-name>Two</display-name>
  </channel>
  <channel id="three.example">
    <display-name>Three</display-name>
  </channel>
  <programme start="20240301180000 +0000" stop="20240301190000 +0000" channel="one.example">
    <title lang="en">Evening Show</title>
    <desc>An evening programme.</desc>
    <category>Entertainment</category>
  </programme>
  <programme start="20240301190000 +0000" stop="20240301200000 +0000" channel="two.example">
    <title>Late News</title>
  </programme>
  <programme start="20240301200000 +0000" stop="20240301210000 +0000" channel="three.example">
    <title>Night Film</title>
  </programme>
</tv>"#;

fn retained(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn programmes_kept_iff_channel_ref_retained() {
    let keep = retained(&["one.example", "three.example"]);
    let (tv, stats) = filter_epg(GUIDE, &keep).unwrap();

    for programme in &tv.programmes {
        assert!(keep.contains(&programme.channel));
    }
    assert_eq!(tv.programmes.len(), 2);
    assert_eq!(tv.channels.len(), 2);
    assert!(stats.kept_programmes <= stats.total_programmes);
    assert_eq!(stats.total_programmes, 3);
    assert_eq!(stats.total_channels, 3);
}

#[test]
fn reduced_document_never_reintroduces_channels() {
    let keep = retained(&["two.example"]);
    let (tv, _) = filter_epg(GUIDE, &keep).unwrap();

    let channel_ids: HashSet<&str> = tv.channels.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(channel_ids, ["two.example"].iter().copied().collect());
    assert!(tv.programmes.iter().all(|p| p.channel == "two.example"));
}

#[test]
fn serialized_output_keeps_header_and_shapes() {
    let keep = retained(&["one.example"]);
    let (tv, _) = filter_epg(GUIDE, &keep).unwrap();
    let xml = serialize_epg(&tv).unwrap();

    assert!(xml.starts_with(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE tv SYSTEM \"xmltv.dtd\">"
    ));
    assert!(xml.contains("date=\"20240301\""));
    assert!(xml.contains("source-info-name=\"Example Listings\""));
    assert!(xml.contains("<channel id=\"one.example\">"));
    assert!(xml.contains("<title lang=\"en\">Evening Show</title>"));
    assert!(xml.contains("channel=\"one.example\""));
    assert!(!xml.contains("two.example"));
}

#[test]
fn malformed_programme_is_fatal() {
    let guide = r#"<tv>
  <programme start="x" channel="a"><title>Broken</programme>
</tv>"#;
    assert!(filter_epg(guide, &retained(&["a"])).is_err());
}
