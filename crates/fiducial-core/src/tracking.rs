//! Per-marker tracking state cache
//!
//! Keeps the latest backend-reported status, pose, and visible-recency
//! timestamp for every marker that has ever been sighted. Ingestion
//! mutates it; the selection tick only reads it. Recency survives a
//! removal, since the hide grace period is measured against it.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Deserialize;

use crate::pose::Pose;

/// Tracking quality reported by the backend for one marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    /// Not currently detected
    #[default]
    Lost,
    /// Detected, but the pose estimate is degraded (motion blur,
    /// partial occlusion, low light)
    Limited,
    /// Fully tracked with a trustworthy pose
    Tracking,
}

/// Which statuses count as "visible" when refreshing recency
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityPolicy {
    /// Only [`TrackingStatus::Tracking`] refreshes recency
    #[default]
    RequireFull,
    /// [`TrackingStatus::Limited`] refreshes recency as well, trading
    /// occasional pose drift for steadier content on shaky devices
    AcceptLimited,
}

impl VisibilityPolicy {
    /// Whether `status` counts as visible under this policy
    pub fn admits(&self, status: TrackingStatus) -> bool {
        match self {
            VisibilityPolicy::RequireFull => status == TrackingStatus::Tracking,
            VisibilityPolicy::AcceptLimited => {
                matches!(status, TrackingStatus::Tracking | TrackingStatus::Limited)
            }
        }
    }
}

/// Cached tracking state for one marker
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackingRecord {
    /// Latest reported status
    pub status: TrackingStatus,
    /// Timestamp of the most recent sighting that counted as visible
    pub last_seen: f64,
    /// Most recent observed pose, kept even through status changes so a
    /// later spawn can use it
    pub pose: Pose,
}

/// Whether [`TrackingCache::get_or_create`] found or made the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSlot {
    /// The record already existed
    Existing,
    /// A fresh record was inserted for a first sighting
    Inserted,
}

/// Status, recency, and pose for every marker sighted so far
#[derive(Debug, Default)]
pub struct TrackingCache {
    records: HashMap<String, TrackingRecord>,
    policy: VisibilityPolicy,
}

impl TrackingCache {
    /// Creates an empty cache with the given visibility policy
    pub fn new(policy: VisibilityPolicy) -> Self {
        Self {
            records: HashMap::new(),
            policy,
        }
    }

    /// The visibility policy this cache was built with
    pub fn policy(&self) -> VisibilityPolicy {
        self.policy
    }

    /// Fetches the record for `id`, inserting a default one first if the
    /// marker has never been sighted
    pub fn get_or_create(&mut self, id: &str) -> (CacheSlot, &mut TrackingRecord) {
        match self.records.entry(id.to_string()) {
            Entry::Occupied(entry) => (CacheSlot::Existing, entry.into_mut()),
            Entry::Vacant(entry) => (CacheSlot::Inserted, entry.insert(TrackingRecord::default())),
        }
    }

    /// Ingests one status/pose observation for `id`
    ///
    /// Status and pose are overwritten unconditionally; `last_seen` is
    /// refreshed to `now` only when the status is visible under the
    /// cache's policy. So a downgrade to [`TrackingStatus::Lost`] keeps
    /// the old recency, which is what the hide delay is measured from.
    pub fn record_update(
        &mut self,
        id: &str,
        status: TrackingStatus,
        pose: Pose,
        now: f64,
    ) -> CacheSlot {
        let policy = self.policy;
        let (slot, record) = self.get_or_create(id);
        record.status = status;
        record.pose = pose;
        if policy.admits(status) {
            record.last_seen = now;
        }
        slot
    }

    /// Marks `id` as no longer detected
    ///
    /// Sets the status to [`TrackingStatus::Lost`] without touching
    /// `last_seen` or the pose. Returns `false` when the marker was
    /// never sighted, which callers treat as a no-op.
    pub fn record_removed(&mut self, id: &str) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                record.status = TrackingStatus::Lost;
                true
            }
            None => false,
        }
    }

    /// The record for `id`, if the marker has been sighted
    pub fn get(&self, id: &str) -> Option<&TrackingRecord> {
        self.records.get(id)
    }

    /// The most recently seen marker among those currently visible
    ///
    /// Scans for entries whose status is visible under the policy and
    /// returns the one with the greatest `last_seen`. Exact ties resolve
    /// to whichever entry iteration reaches first, which is unspecified;
    /// with real timestamps ties do not occur.
    pub fn best_visible(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (id, record) in &self.records {
            if !self.policy.admits(record.status) {
                continue;
            }
            match best {
                Some((_, seen)) if record.last_seen <= seen => {}
                _ => best = Some((id.as_str(), record.last_seen)),
            }
        }
        best
    }

    /// Drops the record for `id`, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<TrackingRecord> {
        self.records.remove(id)
    }

    /// Drops every record
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of markers sighted so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no marker has been sighted yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over `(id, record)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrackingRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }
}
