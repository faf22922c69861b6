//! Aggregation provider
//!
//! Orchestrates one refresh cycle (retrieve playlist, reconcile, retrieve
//! guide, filter, serialize) and publishes the result as one immutable
//! snapshot. Readers always see either the previous complete snapshot or
//! the new one; a failed cycle leaves the published snapshot untouched.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::epg::{filter_epg, serialize_epg, EpgStats};
use crate::errors::AppResult;
use crate::ingestor::parse_m3u;
use crate::models::{Track, TrackFilter};
use crate::playlist::{render_playlist, retained_channel_ids, PlaylistReconciler};
use crate::sources::{HttpFetcher, ResourceFetcher};

/// One complete refresh result, replaced as a unit.
#[derive(Debug, Clone)]
pub struct ProviderSnapshot {
    pub tracks: Vec<Track>,
    pub playlist: String,
    pub epg_xml: String,
    pub last_refresh: DateTime<Utc>,
}

pub struct Provider {
    playlist_url: String,
    epg_url: String,
    base_address: Option<String>,
    filters: Vec<TrackFilter>,
    fetcher: Arc<dyn ResourceFetcher>,

    snapshot: RwLock<Option<Arc<ProviderSnapshot>>>,
}

impl Provider {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.source.user_agent.clone()));
        Self::with_fetcher(config, fetcher)
    }

    /// Build a provider with a custom retrieval collaborator.
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn ResourceFetcher>) -> AppResult<Self> {
        Ok(Self {
            playlist_url: config.source.playlist_url.clone(),
            epg_url: config.source.epg_url.clone(),
            base_address: config.output.base_address.clone(),
            filters: TrackFilter::compile(&config.filters)?,
            fetcher,
            snapshot: RwLock::new(None),
        })
    }

    /// Run one refresh cycle and atomically publish the new snapshot.
    ///
    /// Any error leaves the previously published snapshot (if any) intact
    /// and readable; retry policy belongs to the caller.
    pub async fn refresh(&self) -> AppResult<EpgStats> {
        info!("Loading IPTV playlist from {}", self.playlist_url);
        let start = Instant::now();
        let playlist_text = self.fetcher.fetch(&self.playlist_url).await?;
        debug!("Loaded playlist in {:?}", start.elapsed());

        let raw_tracks = parse_m3u(&playlist_text)?;
        let mut reconciler = PlaylistReconciler::new(self.filters.clone());
        for track in &raw_tracks {
            reconciler.on_track(track);
        }
        let tracks = reconciler.into_tracks();
        info!("Reconciled playlist: {} channels retained", tracks.len());

        let playlist = render_playlist(&tracks, self.base_address.as_deref())?;
        let channel_ids: HashSet<String> = retained_channel_ids(&tracks);

        info!("Loading EPG from {}", self.epg_url);
        let start = Instant::now();
        let epg_text = self.fetcher.fetch(&self.epg_url).await?;
        debug!("Loaded EPG in {:?}", start.elapsed());

        let (tv, stats) = filter_epg(&epg_text, &channel_ids)?;
        let epg_xml = serialize_epg(&tv)?;

        let snapshot = Arc::new(ProviderSnapshot {
            tracks,
            playlist,
            epg_xml,
            last_refresh: Utc::now(),
        });

        // Single swap: readers observe the old snapshot or this one, never
        // a mix of generations.
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot);

        Ok(stats)
    }

    /// The latest complete snapshot, if a refresh has ever succeeded.
    pub fn snapshot(&self) -> Option<Arc<ProviderSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The latest rendered playlist text.
    pub fn playlist(&self) -> Option<String> {
        self.snapshot().map(|s| s.playlist.clone())
    }

    /// The latest reduced guide document.
    pub fn epg_xml(&self) -> Option<String> {
        self.snapshot().map(|s| s.epg_xml.clone())
    }

    /// A retained track by its position in the published order.
    pub fn track(&self, index: usize) -> Option<Track> {
        self.snapshot().and_then(|s| s.tracks.get(index).cloned())
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|s| s.last_refresh)
    }
}
