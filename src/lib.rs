//! tvmux — IPTV playlist and XMLTV guide aggregation.
//!
//! Pulls an M3U playlist and an XMLTV programme guide from remote or local
//! sources, reconciles duplicate channel entries with ordered priority rules,
//! and republishes a cleaned playlist plus a guide reduced to the retained
//! channels.

pub mod config;
pub mod epg;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod playlist;
pub mod provider;
pub mod sources;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use provider::{Provider, ProviderSnapshot};
