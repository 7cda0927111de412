//! Debounced fiducial-marker tracking for AR content
//!
//! Engine-agnostic core of a marker-driven content system: a backend
//! reports which reference images it sees each frame, and this crate
//! decides which single piece of registered content should be showing,
//! when it should hide, and where it should sit. A grace period
//! debounces the flickery tracking real devices produce, so content
//! does not strobe when a marker drops out for a few frames.
//!
//! # Features
//! - Immutable marker registry with silent rejection of foreign ids
//! - Tracking cache that keeps per-marker status, pose, and recency
//! - Best-marker selection on a fixed tick, independent of frame rate
//! - Hide grace period that absorbs short tracking dropouts
//! - Lazy one-instance-per-marker spawn pool with pose smoothing
//! - Lifecycle guard that prunes dead handles and tears down cleanly
//! - Token-based presenter subscriptions for show/hide callbacks
//!
//! # Quick start
//! ```
//! use fiducial::{
//!     MarkerRegistry, ObservationBatch, Observation, Pose,
//!     TrackingConfig, TrackingSession, TrackingStatus,
//! };
//!
//! let registry = MarkerRegistry::from_entries([
//!     ("poster".to_string(), "Poster exhibit"),
//! ])?;
//! let mut session: TrackingSession<u32, &str> =
//!     TrackingSession::new(registry, TrackingConfig::default(), 0.0)?;
//!
//! let batch = ObservationBatch {
//!     added: vec![Observation {
//!         id: "poster".to_string(),
//!         status: TrackingStatus::Tracking,
//!         pose: Pose::IDENTITY,
//!     }],
//!     ..Default::default()
//! };
//! session.apply_observations(&batch, 0.0);
//!
//! let plan = session.poll(0.1);
//! if plan.select {
//!     let report = session.run_selection(0.1, |_, _| Some(1));
//!     assert_eq!(report.shown.as_deref(), Some("poster"));
//! }
//! # Ok::<(), fiducial::FiducialError>(())
//! ```
//!
//! The session never talks to an engine directly: spawning goes through
//! a factory closure, liveness probes through a predicate, and times
//! are plain seconds. The `bevy_fiducial` crate wires all of that into
//! Bevy's ECS.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod observer;
pub mod pool;
pub mod pose;
pub mod registry;
pub mod schedule;
pub mod session;
pub mod tracking;

// Public API exports
pub use config::{MotionConfig, TrackingConfig};
pub use error::{FiducialError, Result};
pub use observer::{PresenterEvent, PresenterObservers, SubscriptionToken};
pub use pool::{SpawnOutcome, SpawnPool, SpawnedInstance};
pub use pose::Pose;
pub use registry::MarkerRegistry;
pub use schedule::{TaskId, TickQueue};
pub use session::{
    GuardReport, Observation, ObservationBatch, SelectionReport, TickPlan, TrackingSession,
};
pub use tracking::{
    CacheSlot, TrackingCache, TrackingRecord, TrackingStatus, VisibilityPolicy,
};
