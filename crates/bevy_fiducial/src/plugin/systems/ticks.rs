use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::backend::TrackingBackend;
use crate::events::{
    ContentHidden, ContentShown, MarkerPruned, MarkerSpawned, TrackingResetRequest,
};
use crate::library::MarkerAssets;
use crate::session::{
    FiducialSession, MarkerAnchor, SessionPhase, TrackingSettings, anchored_transform,
};
use fiducial::{Pose, TrackingConfig};

/// Runs the due session ticks and mirrors their outcome into messages.
///
/// Selection decides which marker's content shows; the guard sweep
/// prunes instances whose entity died and tears the session down when
/// the backend disappears. Reset requests run the teardown path and
/// hand control back to the bootstrap probe.
#[allow(clippy::too_many_arguments)]
pub(in crate::plugin) fn run_session_ticks(
    mut commands: Commands,
    session: Option<ResMut<FiducialSession>>,
    backend: Option<Res<TrackingBackend>>,
    mut phase: ResMut<SessionPhase>,
    settings: Res<TrackingSettings>,
    marker_assets: Option<Res<MarkerAssets>>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
    anchors: Query<(), With<MarkerAnchor>>,
    mut visibility: Query<&mut Visibility, With<MarkerAnchor>>,
    mut resets: MessageReader<TrackingResetRequest>,
    mut shown: MessageWriter<ContentShown>,
    mut hidden: MessageWriter<ContentHidden>,
    mut spawned: MessageWriter<MarkerSpawned>,
    mut pruned: MessageWriter<MarkerPruned>,
) {
    let reset_requested = resets.read().last().is_some();

    let Some(mut fiducial) = session else {
        // A reset while degraded re-arms the bootstrap probe.
        if reset_requested && *phase == SessionPhase::Degraded {
            *phase = SessionPhase::Starting;
        }
        return;
    };

    if reset_requested {
        let active = fiducial.session.active_marker().map(str::to_string);
        let released = fiducial.session.shutdown();
        release_instances(&mut commands, &released, &mut pruned);
        if let Some(marker) = active {
            hidden.write(ContentHidden { marker });
        }
        commands.remove_resource::<FiducialSession>();
        commands.remove_resource::<MarkerAssets>();
        *phase = SessionPhase::Starting;
        info!("tracking session reset");
        return;
    }

    let now = time.elapsed_secs_f64();
    let plan = fiducial.session.poll(now);

    if plan.select {
        let assets = marker_assets.as_deref();
        let report = fiducial.session.run_selection(now, |id, pose| {
            spawn_marker_content(&mut commands, assets, &asset_server, &settings.0, id, pose)
        });

        if let Some(marker) = &report.spawn_failed {
            warn!("content for marker '{marker}' is not ready, selection unchanged");
        }
        if let Some(marker) = report.hidden {
            info!("hiding content for marker '{marker}'");
            hidden.write(ContentHidden { marker });
        }
        if let Some(marker) = &report.spawned {
            if let Some(instance) = fiducial.session.pool().get(marker) {
                spawned.write(MarkerSpawned {
                    marker: marker.clone(),
                    entity: instance.handle,
                });
            }
        }
        if let Some(marker) = &report.shown {
            let (title, description) = fiducial
                .session
                .registry()
                .get(marker)
                .map(|content| (content.title.clone(), content.description.clone()))
                .unwrap_or_default();
            shown.write(ContentShown {
                marker: marker.clone(),
                title,
                description,
            });
            info!("presenting content for marker '{marker}'");
        }
    }

    if plan.guard {
        let backend_ok = backend.as_ref().is_some_and(|b| b.is_enabled());
        let report = fiducial
            .session
            .run_guard(backend_ok, |entity| anchors.contains(*entity));

        for (marker, entity) in &report.pruned {
            commands.entity(*entity).try_despawn();
            pruned.write(MarkerPruned {
                marker: marker.clone(),
            });
            warn!("pruned stale content for marker '{marker}'");
        }
        if report.shut_down {
            release_instances(&mut commands, &report.released, &mut pruned);
            *phase = SessionPhase::Degraded;
            error!("tracking backend lost, session torn down");
        }
        if let Some(marker) = report.hidden {
            hidden.write(ContentHidden { marker });
        }
    }

    // Mirror pool activity into entity visibility.
    for (_, instance) in fiducial.session.pool().iter() {
        if let Ok(mut entity_visibility) = visibility.get_mut(instance.handle) {
            let desired = if instance.active {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            if *entity_visibility != desired {
                *entity_visibility = desired;
            }
        }
    }
}

/// Spawn factory for the selection tick.
///
/// Declines (and the session retries next tick) only when the marker's
/// scene asset is known to have failed; content without a scene gets a
/// bare anchor so panel and audio still work.
fn spawn_marker_content(
    commands: &mut Commands,
    assets: Option<&MarkerAssets>,
    asset_server: &AssetServer,
    config: &TrackingConfig,
    id: &str,
    pose: Pose,
) -> Option<Entity> {
    let scene = match assets.and_then(|a| a.scenes.get(id)) {
        Some(handle) => {
            if matches!(
                asset_server.get_load_state(handle),
                Some(LoadState::Failed(_))
            ) {
                warn!("scene for marker '{id}' failed to load, skipping spawn");
                return None;
            }
            Some(handle.clone())
        }
        None => None,
    };

    let mut anchor = commands.spawn((
        MarkerAnchor {
            marker: id.to_string(),
        },
        anchored_transform(pose, config),
        Visibility::Hidden,
    ));
    if let Some(scene) = scene {
        anchor.with_children(|parent| {
            parent.spawn(SceneRoot(scene));
        });
    }
    Some(anchor.id())
}

fn release_instances(
    commands: &mut Commands,
    released: &[(String, Entity)],
    pruned: &mut MessageWriter<MarkerPruned>,
) {
    for (marker, entity) in released {
        commands.entity(*entity).try_despawn();
        pruned.write(MarkerPruned {
            marker: marker.clone(),
        });
    }
}
