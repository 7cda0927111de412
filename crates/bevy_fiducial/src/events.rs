use bevy::prelude::*;
use fiducial::{Observation, ObservationBatch};

/// Batched tracked-image changes for one frame, as three disjoint sets.
///
/// Whatever feeds the plugin (an AR backend bridge, a replay file, a
/// test) writes these; ids the marker library does not know are ignored
/// on ingestion. The same id may appear in `added` on one frame and
/// `updated` on later ones; both are handled identically.
#[derive(Event, Message, Clone, Debug, Default)]
pub struct TrackedImagesChanged {
    pub added: Vec<Observation>,
    pub updated: Vec<Observation>,
    pub removed: Vec<String>,
}

impl TrackedImagesChanged {
    /// Copies the three sets into a core observation batch.
    pub fn to_batch(&self) -> ObservationBatch {
        ObservationBatch {
            added: self.added.clone(),
            updated: self.updated.clone(),
            removed: self.removed.clone(),
        }
    }
}

/// Fired when a marker's content becomes the presented one.
///
/// Carries the panel payload so presenter systems never need to reach
/// back into the session.
#[derive(Event, Message, Clone, Debug)]
pub struct ContentShown {
    pub marker: String,
    pub title: String,
    pub description: String,
}

/// Fired when the presented content hides: its grace period expired, a
/// switch displaced it, or cleanup took it down. On a switch this lands
/// in the same frame as the new marker's [`ContentShown`].
#[derive(Event, Message, Clone, Debug)]
pub struct ContentHidden {
    pub marker: String,
}

/// Fired once per marker, when its content instance is first created.
#[derive(Event, Message, Clone, Debug)]
pub struct MarkerSpawned {
    pub marker: String,
    pub entity: Entity,
}

/// Fired when a content instance is removed again, either because the
/// guard found its entity dead or because the session tore down.
#[derive(Event, Message, Clone, Debug)]
pub struct MarkerPruned {
    pub marker: String,
}

/// Request a full tracking teardown followed by a fresh bring-up.
///
/// Runs the same cleanup as backend loss, then re-enters the startup
/// probe. Safe to fire repeatedly; cleanup is idempotent.
#[derive(Event, Message, Clone, Debug, Default)]
pub struct TrackingResetRequest;

/// Request the showing content's narration audio to restart.
///
/// Audio otherwise plays once per show; this is the explicit replay
/// control a play button wires to.
#[derive(Event, Message, Clone, Debug, Default)]
pub struct ReplayContentAudio;
