//! End-to-end reconciliation scenarios: parse M3U text, apply filters,
//! verify the final ordering and playlist rendering.

use tvmux::ingestor::parse_m3u;
use tvmux::models::{FilterConfig, FilterKind, TrackFilter};
use tvmux::playlist::{render_playlist, retained_channel_ids, PlaylistReconciler};

fn reconcile(content: &str, configs: &[FilterConfig]) -> Vec<tvmux::models::Track> {
    let filters = TrackFilter::compile(configs).unwrap();
    let tracks = parse_m3u(content).unwrap();
    let mut reconciler = PlaylistReconciler::new(filters);
    for track in &tracks {
        reconciler.on_track(track);
    }
    reconciler.into_tracks()
}

fn name_filter(pattern: &str) -> FilterConfig {
    FilterConfig {
        kind: FilterKind::Name,
        pattern: pattern.to_string(),
    }
}

#[test]
fn espn_hd_scenario() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-id=\"1\" tvg-name=\"ESPN\",ESPN\n\
        http://example.com/espn\n\
        #EXTINF:-1 tvg-id=\"1\" tvg-name=\"ESPN HD\",ESPN HD\n\
        http://example.com/espn-hd\n\
        #EXTINF:-1 tvg-id=\"2\" tvg-name=\"Other\",Other\n\
        http://example.com/other\n";

    let tracks = reconcile(playlist, &[name_filter("^ESPN")]);

    assert_eq!(tracks.len(), 2);
    // The HD variant replaced the plain one at its position, priority 0
    assert_eq!(tracks[0].name, "ESPN HD");
    assert_eq!(tracks[0].tvg_id(), "1");
    // Unmatched track kept at the tail without a priority
    assert_eq!(tracks[1].name, "Other");
}

#[test]
fn no_filters_retains_distinct_pairs_in_order() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-id=\"1\",Alpha\n\
        http://example.com/a\n\
        #EXTINF:-1 tvg-id=\"2\",Beta\n\
        http://example.com/b\n\
        #EXTINF:-1 tvg-id=\"1\",Alpha\n\
        http://example.com/a2\n";

    let tracks = reconcile(playlist, &[]);

    // The repeated (Alpha, 1) pair does not duplicate the entry
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].name, "Alpha");
    assert_eq!(tracks[0].uri, "http://example.com/a");
    assert_eq!(tracks[1].name, "Beta");
}

#[test]
fn filter_order_is_the_priority_order() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-id=\"s1\" tvg-name=\"Sports One\",Sports One\n\
        http://example.com/s1\n\
        #EXTINF:-1 tvg-id=\"n1\" tvg-name=\"News One\",News One\n\
        http://example.com/n1\n\
        #EXTINF:-1 tvg-id=\"s2\" tvg-name=\"Sports Two\",Sports Two\n\
        http://example.com/s2\n";

    let tracks = reconcile(playlist, &[name_filter("^News"), name_filter("^Sports")]);
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["News One", "Sports One", "Sports Two"]);
}

#[test]
fn retained_ids_feed_the_guide_filter() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 tvg-id=\"1\",A\n\
        http://example.com/a\n\
        #EXTINF:-1,NoId\n\
        http://example.com/n\n";

    let tracks = reconcile(playlist, &[]);
    let ids = retained_channel_ids(&tracks);
    assert_eq!(ids.len(), 1);
    assert!(ids.contains("1"));
}

#[test]
fn rendering_strips_session_tags_and_rewrites() {
    let playlist = "#EXTM3U\n\
        #EXTINF:-1 xui-id=\"{f00}\" tvg-id=\"1\",A\n\
        http://example.com/a\n\
        #EXTINF:-1 tvg-id=\"2\",B\n\
        http://example.com/b\n";

    let tracks = reconcile(playlist, &[]);
    let rendered = render_playlist(&tracks, Some("10.0.0.1:6078")).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "#EXTM3U");
    assert_eq!(lines[1], "#EXTINF:-1 tvg-id=\"1\",A");
    assert_eq!(lines[2], "http://10.0.0.1:6078/channel/0");
    assert_eq!(lines[4], "http://10.0.0.1:6078/channel/1");
    assert!(!rendered.contains("xui-id"));
}
