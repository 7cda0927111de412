use bevy::prelude::*;

use crate::session::{FiducialSession, MarkerAnchor, TrackingSettings, anchored_transform};

/// Eases anchor transforms toward the latest observed marker poses.
///
/// The session owns the smoothing math; this just copies the eased
/// poses onto the anchor entities every frame. Within the deadband the
/// pose stops moving, so steady markers cause no transform churn.
pub(in crate::plugin) fn smooth_marker_poses(
    session: Option<ResMut<FiducialSession>>,
    settings: Res<TrackingSettings>,
    time: Res<Time>,
    mut anchors: Query<&mut Transform, With<MarkerAnchor>>,
) {
    let Some(mut fiducial) = session else {
        return;
    };
    if fiducial.session.is_shut_down() {
        return;
    }

    fiducial.session.update_motion(time.delta_secs());
    for (_, instance) in fiducial.session.pool().iter() {
        if let Ok(mut transform) = anchors.get_mut(instance.handle) {
            let desired = anchored_transform(instance.current, &settings.0);
            if *transform != desired {
                *transform = desired;
            }
        }
    }
}
