//! Playlist reconciliation
//!
//! Applies the ordered filter rules to raw tracks, collapses duplicates by
//! display name and channel id, and produces the final stably ordered list.
//!
//! A filter's index in the rule list is its priority (lower wins). A track
//! may be admitted once per matching filter; filters are evaluated strictly
//! in list order and each admission attempt is independent, so the outcome
//! is a deliberate function of rule ordering.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{Track, TrackFilter};

pub struct PlaylistReconciler {
    filters: Vec<TrackFilter>,

    tracks: Vec<Track>,
    /// Display name -> best (lowest) priority recorded so far.
    priorities: HashMap<String, usize>,
    /// Non-empty tvg-id -> position in `tracks`, kept in step with every
    /// append and replacement.
    id_index: HashMap<String, usize>,
    /// Names retained without any matching filter (first-seen only).
    unmatched: HashSet<String>,
}

impl PlaylistReconciler {
    pub fn new(filters: Vec<TrackFilter>) -> Self {
        Self {
            filters,
            tracks: Vec::new(),
            priorities: HashMap::new(),
            id_index: HashMap::new(),
            unmatched: HashSet::new(),
        }
    }

    /// Feed one raw track through the rule set.
    ///
    /// With no filters configured every track is admitted at priority 0.
    /// Otherwise the track is admitted once per matching filter, in filter
    /// order; a track matching nothing is kept without a priority and ends
    /// up after all prioritised tracks in the final list.
    pub fn on_track(&mut self, track: &Track) {
        if self.filters.is_empty() {
            self.admit(track, 0);
            return;
        }

        let mut matched = false;
        for i in 0..self.filters.len() {
            let field = self.filters[i].kind.tag_field();
            let value = track.tag(field);
            if value.is_empty() {
                continue;
            }
            if self.filters[i].pattern.is_match(value) {
                matched = true;
                self.admit(track, i);
            }
        }

        if !matched {
            self.admit_unmatched(track);
        }
    }

    /// Keep a track no filter matched, without assigning a priority.
    ///
    /// Only the first unmatched track for a given name survives, and never
    /// one whose channel id already belongs to a retained track.
    fn admit_unmatched(&mut self, track: &Track) {
        if self.priorities.contains_key(&track.name) || !self.unmatched.insert(track.name.clone())
        {
            debug!("Duplicate unmatched track '{}' dropped", track.name);
            return;
        }
        if self.find_index_with_id(track).is_some() {
            debug!(
                "Unmatched track '{}' shares a tvg-id with a retained track",
                track.name
            );
            return;
        }
        self.append(track.clone());
    }

    /// Attempt to admit `track` at `priority`.
    fn admit(&mut self, track: &Track, priority: usize) {
        let name = &track.name;

        if track.tvg_id().is_empty() {
            debug!("Track '{}' is missing tvg-id", name);
        }

        let existing = self.priorities.get(name).copied();
        if existing.is_none() || priority < existing.unwrap_or(usize::MAX) {
            if let Some(idx) = self.find_index_with_id(track) {
                // Same channel id already retained. Replace only when the
                // newcomer looks like the higher-quality variant.
                if track.name.contains("HD") {
                    self.replace(idx, track.clone());
                } else {
                    return;
                }
            } else if existing.is_none() {
                self.append(track.clone());
            }
            self.priorities.insert(name.clone(), priority);
        } else {
            warn!("Duplicate track name '{}' dropped", name);
        }
    }

    /// Position of the retained track sharing this track's non-empty tvg-id.
    fn find_index_with_id(&self, track: &Track) -> Option<usize> {
        let id = track.tvg_id();
        if id.is_empty() {
            return None;
        }
        self.id_index.get(id).copied()
    }

    fn append(&mut self, track: Track) {
        let id = track.tvg_id();
        if !id.is_empty() {
            self.id_index.insert(id.to_string(), self.tracks.len());
        }
        self.tracks.push(track);
    }

    /// Replace the track at `idx` in place, retiring the old entry's
    /// priority record in the same step.
    fn replace(&mut self, idx: usize, track: Track) {
        self.priorities.remove(&self.tracks[idx].name);
        // Same tvg-id by construction, so the id index entry stays valid.
        self.tracks[idx] = track;
    }

    /// Consume the reconciler and return the final ordered track list:
    /// a stable sort by recorded priority, with unmatched tracks after all
    /// matched ones in their original relative order.
    pub fn into_tracks(mut self) -> Vec<Track> {
        let priorities = std::mem::take(&mut self.priorities);
        self.tracks.sort_by(|a, b| {
            match (priorities.get(&a.name), priorities.get(&b.name)) {
                (Some(pa), Some(pb)) => pa.cmp(pb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        self.tracks
    }
}

/// Channel identifiers retained after reconciliation: the non-empty tvg-ids
/// of the final track list, used to reduce the programme guide.
pub fn retained_channel_ids(tracks: &[Track]) -> HashSet<String> {
    tracks
        .iter()
        .map(|t| t.tvg_id())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
