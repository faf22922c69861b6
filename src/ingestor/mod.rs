//! Playlist ingestion.

pub mod m3u_parser;

pub use m3u_parser::parse_m3u;
