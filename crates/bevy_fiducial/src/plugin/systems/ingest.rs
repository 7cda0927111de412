use bevy::prelude::*;

use crate::backend::TrackingBackend;
use crate::events::TrackedImagesChanged;
use crate::session::FiducialSession;

/// Feeds queued and message-borne observations into the session.
///
/// Runs in `PreUpdate` so the same frame's selection tick sees fresh
/// state. Ids the marker library does not know are dropped inside the
/// session; a torn-down session swallows everything.
pub(in crate::plugin) fn ingest_tracked_images(
    session: Option<ResMut<FiducialSession>>,
    backend: Option<Res<TrackingBackend>>,
    mut changes: MessageReader<TrackedImagesChanged>,
    time: Res<Time>,
) {
    // Drain the bridge queue even before bring-up finishes, so a slow
    // start does not replay stale sightings into a fresh session.
    let queued = backend.map(|b| b.drain()).unwrap_or_default();

    let Some(mut fiducial) = session else {
        changes.clear();
        return;
    };

    let now = time.elapsed_secs_f64();
    for batch in &queued {
        fiducial.session.apply_observations(&batch.to_batch(), now);
    }
    for change in changes.read() {
        fiducial.session.apply_observations(&change.to_batch(), now);
    }
}
