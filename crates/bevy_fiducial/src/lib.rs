//! Bevy plugin for fiducial marker tracking and content presentation
//!
//! This crate binds the [fiducial](https://crates.io/crates/fiducial) tracking
//! core to Bevy's ECS: observations flow in as messages or through a thread-safe
//! backend bridge, and per-marker content (scenes, panel text, narration audio)
//! is spawned, shown, smoothed and hidden as markers come and go.
//!
//! The plugin handles the full content lifecycle through Bevy's ECS:
//! - Marker library loading from RON assets, with audio and scene resolution
//! - Debounced selection of the most recently sighted marker
//! - Lazy, idempotent spawning of content anchors with visibility mirroring
//! - A guard sweep that prunes dead instances and survives backend loss
//!
//! # Features
//!
//! - **Message-driven ingestion**: feed [`TrackedImagesChanged`] from any
//!   detector, or push batches across threads via [`ObservationSender`]
//! - **Debounced presentation**: short tracking dropouts never flicker the
//!   content; hides happen only after a configurable grace period
//! - **Content panel**: a bottom-anchored panel slides in with title and
//!   description text per marker
//! - **Narration audio**: plays once per show, with an explicit replay message
//! - **Degraded mode**: a backend that never appears is retried a bounded
//!   number of times, then tracking switches off without taking the app down
//! - **Diagnostics**: tracked marker, spawned instance and active content
//!   counts registered with Bevy's diagnostics
//!
//! # Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_fiducial::{FiducialPlugin, FiducialPluginConfig};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(FiducialPlugin::with_config(
//!             FiducialPluginConfig::default().library_path("markers/museum.fidlib"),
//!         ))
//!         .run();
//! }
//! ```
//!
//! # Feeding Observations
//!
//! Whatever detects markers writes [`TrackedImagesChanged`] messages, three
//! disjoint sets per frame:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_fiducial::{Observation, Pose, TrackedImagesChanged, TrackingStatus};
//!
//! fn forward_detections(mut changes: MessageWriter<TrackedImagesChanged>) {
//!     changes.write(TrackedImagesChanged {
//!         updated: vec![Observation {
//!             id: "poster".into(),
//!             status: TrackingStatus::Tracking,
//!             pose: Pose::IDENTITY,
//!         }],
//!         ..Default::default()
//!     });
//! }
//! ```
//!
//! Detectors running off the main thread clone an [`ObservationSender`] from
//! the [`TrackingBackend`] resource instead and push batches into it.
//!
//! # Reacting to Presentation Changes
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_fiducial::{ContentHidden, ContentShown};
//!
//! fn log_presentation(
//!     mut shown: MessageReader<ContentShown>,
//!     mut hidden: MessageReader<ContentHidden>,
//! ) {
//!     for show in shown.read() {
//!         info!("showing {}: {}", show.marker, show.title);
//!     }
//!     for hide in hidden.read() {
//!         info!("hiding {}", hide.marker);
//!     }
//! }
//! ```

pub mod backend;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod library;
pub mod plugin;
pub mod presenter;
pub mod session;

pub use ::fiducial::*;
pub use backend::{ObservationSender, TrackingBackend};
pub use diagnostics::{
    CONTENT_ACTIVE_PATH, SPAWNED_INSTANCES_PATH, TRACKED_MARKERS_PATH, update_diagnostics,
};
pub use error::{BevyFiducialError, Result};
pub use events::{
    ContentHidden, ContentShown, MarkerPruned, MarkerSpawned, ReplayContentAudio,
    TrackedImagesChanged, TrackingResetRequest,
};
pub use library::{
    MarkerAssets, MarkerContent, MarkerLibrary, MarkerLibraryLoader, MarkerLibrarySource,
};
pub use plugin::{FiducialPlugin, FiducialPluginConfig};
pub use presenter::{
    ContentNarration, ContentPanel, PanelBody, PanelPhase, PanelTitle, animate_content_panel,
    create_content_panel, drive_content_panel, play_content_audio,
};
pub use session::{FiducialSession, MarkerAnchor, SessionPhase, TrackingSettings};
