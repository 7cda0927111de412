//! Bridge to whatever produces tracked-image reports
//!
//! Native AR callbacks arrive on their own thread; the bridge queue
//! carries them into the ECS where the ingest system drains it every
//! frame. Hosts that produce observations inside the ECS can skip the
//! queue and write [`TrackedImagesChanged`] messages instead, both
//! paths land in the same session.
//!
//! [`TrackedImagesChanged`]: crate::events::TrackedImagesChanged

use bevy::prelude::*;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::events::TrackedImagesChanged;

type ObservationQueue = Arc<Mutex<VecDeque<TrackedImagesChanged>>>;

/// Connection to the platform tracking subsystem.
///
/// The guard sweep treats a missing or disabled backend as subsystem
/// loss and tears the session down, so hosts flip `enabled` off (or
/// remove the resource) when their AR session dies.
#[derive(Resource, Debug)]
pub struct TrackingBackend {
    enabled: bool,
    queue: ObservationQueue,
}

impl Default for TrackingBackend {
    fn default() -> Self {
        Self {
            enabled: true,
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

impl TrackingBackend {
    /// Creates an enabled backend with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the platform subsystem is currently usable.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the subsystem-usable flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// A clonable handle native callback threads push through.
    pub fn sender(&self) -> ObservationSender {
        ObservationSender {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Takes every batch queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<TrackedImagesChanged> {
        let mut queue = self.queue.lock();
        queue.drain(..).collect()
    }

    /// Number of batches waiting to be drained.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

/// Cheap handle for pushing observation batches from outside the ECS.
#[derive(Debug, Clone)]
pub struct ObservationSender {
    queue: ObservationQueue,
}

impl ObservationSender {
    /// Queues one batch for the next ingest.
    pub fn send(&self, batch: TrackedImagesChanged) {
        self.queue.lock().push_back(batch);
    }
}
