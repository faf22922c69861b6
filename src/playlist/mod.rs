//! Playlist reconciliation and rendering.

pub mod generator;
pub mod reconciler;

pub use generator::render_playlist;
pub use reconciler::{retained_channel_ids, PlaylistReconciler};
