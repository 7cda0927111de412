use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::backend::TrackingBackend;
use crate::library::{MarkerAssets, MarkerLibrary, MarkerLibrarySource};
use crate::plugin::FiducialPluginConfig;
use crate::session::{FiducialSession, SessionPhase, TrackingSettings};
use fiducial::TrackingSession;

/// Startup: provide the in-process backend when asked for and kick off
/// the marker library load.
pub(in crate::plugin) fn setup_tracking(
    mut commands: Commands,
    config: Res<FiducialPluginConfig>,
    backend: Option<Res<TrackingBackend>>,
    asset_server: Res<AssetServer>,
    mut source: ResMut<MarkerLibrarySource>,
) {
    if config.auto_backend && backend.is_none() {
        commands.insert_resource(TrackingBackend::new());
    }
    if let Some(path) = &config.library_path {
        source.handle = Some(asset_server.load(path));
    }
}

#[derive(Default)]
pub(in crate::plugin) struct BootstrapProbe {
    timer: Option<Timer>,
    attempts: u32,
}

/// Builds the tracking session once the marker library and the backend
/// are both available.
///
/// Probes on the guard cadence. A backend that never shows up within
/// the retry budget puts the plugin into degraded mode instead of
/// blocking the app; a reset request re-arms the probe.
pub(in crate::plugin) fn bootstrap_session(
    mut commands: Commands,
    mut phase: ResMut<SessionPhase>,
    settings: Res<TrackingSettings>,
    backend: Option<Res<TrackingBackend>>,
    source: Res<MarkerLibrarySource>,
    direct: Option<Res<MarkerLibrary>>,
    libraries: Res<Assets<MarkerLibrary>>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    mut probe: Local<BootstrapProbe>,
) {
    if *phase != SessionPhase::Starting {
        return;
    }

    let timer = probe.timer.get_or_insert_with(|| {
        Timer::from_seconds(settings.0.guard_interval as f32, TimerMode::Repeating)
    });
    timer.tick(time.delta());
    if !timer.just_finished() {
        return;
    }

    // Backend first: content can exist without it, tracking cannot.
    if !backend.as_ref().is_some_and(|b| b.is_enabled()) {
        probe.attempts += 1;
        if probe.attempts >= settings.0.max_backend_retries {
            error!(
                "tracking backend unavailable after {} probes, continuing without tracking",
                probe.attempts
            );
            probe.attempts = 0;
            *phase = SessionPhase::Degraded;
        }
        return;
    }
    probe.attempts = 0;

    // A directly inserted library wins over the asset-loaded one.
    let library: MarkerLibrary = if let Some(direct) = direct {
        direct.clone()
    } else if let Some(handle) = &source.handle {
        match libraries.get(handle) {
            Some(library) => library.clone(),
            None => {
                if matches!(
                    asset_server.get_load_state(handle),
                    Some(LoadState::Failed(_))
                ) {
                    error!("marker library failed to load, continuing without tracking");
                    *phase = SessionPhase::Degraded;
                }
                return;
            }
        }
    } else {
        warn!("no marker library configured, continuing without tracking");
        *phase = SessionPhase::Degraded;
        return;
    };

    let registry = match library.build_registry() {
        Ok(registry) => registry,
        Err(err) => {
            error!("marker library rejected: {err}");
            *phase = SessionPhase::Degraded;
            return;
        }
    };
    if registry.is_empty() {
        warn!("marker library is empty, nothing will ever be presented");
    }

    let now = time.elapsed_secs_f64();
    let session = match TrackingSession::new(registry, settings.0.clone(), now) {
        Ok(session) => session,
        Err(err) => {
            error!("failed to build tracking session: {err}");
            *phase = SessionPhase::Degraded;
            return;
        }
    };

    commands.insert_resource(MarkerAssets::resolve(&library, &asset_server));
    commands.insert_resource(FiducialSession { session });
    *phase = SessionPhase::Running;
    info!("tracking session live with {} markers", library.markers.len());
}
