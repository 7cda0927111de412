//! Plugin orchestration for marker tracking within Bevy.
//!
//! This module contains the main Bevy plugin definition, configuration, and
//! system wiring that integrates marker-driven content into any Bevy
//! application.

mod config;
mod systems;

pub use config::FiducialPluginConfig;

use self::systems::{
    bootstrap_session, ingest_tracked_images, run_session_ticks, setup_tracking,
    smooth_marker_poses,
};
use crate::diagnostics::{register as register_diagnostics, update_diagnostics};
use crate::events::{
    ContentHidden, ContentShown, MarkerPruned, MarkerSpawned, ReplayContentAudio,
    TrackedImagesChanged, TrackingResetRequest,
};
use crate::library::{MarkerLibrary, MarkerLibraryLoader, MarkerLibrarySource};
use crate::presenter::{
    animate_content_panel, drive_content_panel, play_content_audio, setup_content_panel,
};
use crate::session::{SessionPhase, TrackingSettings};
use bevy::prelude::*;

/// Bevy plugin responsible for marker tracking integration.
#[derive(Default)]
pub struct FiducialPlugin {
    config: FiducialPluginConfig,
}

impl FiducialPlugin {
    /// Create a plugin instance with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin instance using the provided configuration.
    pub fn with_config(config: FiducialPluginConfig) -> Self {
        Self { config }
    }

    /// Apply mutations to the internal configuration prior to registering.
    pub fn configure(mut self, configure: impl FnOnce(&mut FiducialPluginConfig)) -> Self {
        configure(&mut self.config);
        self
    }

    /// Access the current configuration.
    pub fn config(&self) -> &FiducialPluginConfig {
        &self.config
    }
}

impl Plugin for FiducialPlugin {
    fn build(&self, app: &mut App) {
        // Expose configuration and global tracking settings.
        app.insert_resource(self.config.clone());
        app.init_resource::<TrackingSettings>();
        app.init_resource::<SessionPhase>();
        app.init_resource::<MarkerLibrarySource>();

        // Register the marker library asset format.
        app.init_asset::<MarkerLibrary>();
        app.init_asset_loader::<MarkerLibraryLoader>();

        // Message channels always exist; systems behind disabled
        // configuration flags are simply never registered.
        app.add_message::<TrackedImagesChanged>();
        app.add_message::<ContentShown>();
        app.add_message::<ContentHidden>();
        app.add_message::<MarkerSpawned>();
        app.add_message::<MarkerPruned>();
        app.add_message::<TrackingResetRequest>();
        app.add_message::<ReplayContentAudio>();

        // Core tracking lifecycle.
        app.add_systems(Startup, setup_tracking);
        app.add_systems(PreUpdate, ingest_tracked_images);
        app.add_systems(
            Update,
            (
                bootstrap_session,
                run_session_ticks.after(bootstrap_session),
                smooth_marker_poses.after(run_session_ticks),
            ),
        );

        // Optional content panel presenter.
        if self.config.presenter {
            app.add_systems(Startup, setup_content_panel);
            app.add_systems(
                Update,
                (
                    drive_content_panel.after(run_session_ticks),
                    animate_content_panel.after(drive_content_panel),
                ),
            );
        }

        // Optional narration audio.
        if self.config.audio {
            app.add_systems(Update, play_content_audio.after(run_session_ticks));
        }

        if self.config.diagnostics {
            register_diagnostics(app);
            app.add_systems(Update, update_diagnostics.after(run_session_ticks));
        }
    }
}
