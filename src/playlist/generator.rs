//! M3U playlist rendering
//!
//! Renders the final reconciled track list back to M3U text. Each entry is
//! the track's original metadata line (with any volatile `xui-id` session
//! fragment stripped) followed by its stream address, which is optionally
//! rewritten to address the track by its position under a configured base.

use regex::Regex;

use crate::errors::AppResult;
use crate::models::Track;

const PLAYLIST_HEADER: &str = "#EXTM3U\n";

/// `xui-id="{...}"` attribute fragments are per-session identifiers and must
/// not leak into the published playlist.
const XUI_ID_PATTERN: &str = r#"xui-id="\{[^"]*\}"\s*"#;

/// Render the final ordered track list as M3U text.
///
/// With `base_address` set, stream addresses become
/// `http://<base>/channel/<index>` using the zero-based position in the
/// final order.
pub fn render_playlist(tracks: &[Track], base_address: Option<&str>) -> AppResult<String> {
    let re_xui_id = Regex::new(XUI_ID_PATTERN)?;

    let mut m3u = String::from(PLAYLIST_HEADER);
    for (i, track) in tracks.iter().enumerate() {
        let uri = match base_address {
            Some(base) => format!("http://{}/channel/{}", base, i),
            None => track.uri.clone(),
        };
        let fixed_raw = re_xui_id.replace_all(&track.raw, "");
        m3u.push_str(&format!("{}\n{}\n", fixed_raw, uri));
    }

    Ok(m3u)
}
