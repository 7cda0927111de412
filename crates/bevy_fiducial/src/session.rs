//! ECS-facing wrappers around the core tracking session
//!
//! The session itself lives in the [`fiducial`] crate and knows nothing
//! about Bevy; this module binds it to the ECS by using [`Entity`] as the
//! spawn handle and [`MarkerContent`](crate::library::MarkerContent) as the
//! content descriptor.

use bevy::prelude::*;

use crate::library::MarkerContent;
use fiducial::{Pose, TrackingConfig, TrackingSession};

/// Global tuning values for the tracking session.
///
/// Insert this resource before adding the plugin to override the defaults;
/// the values are copied into the session when it is built, so later edits
/// only take effect after a reset.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrackingSettings(pub TrackingConfig);

/// Bring-up state of the plugin.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the marker library and the tracking backend.
    #[default]
    Starting,
    /// Session built and ticking.
    Running,
    /// Bring-up exhausted its retries or the backend died. Tracking stays
    /// off until a reset request starts the bring-up over.
    Degraded,
}

/// The live tracking session.
///
/// Inserted once bring-up succeeds; systems treat its absence as "not
/// running yet" and do nothing.
#[derive(Resource, Debug)]
pub struct FiducialSession {
    /// Core session state, keyed by marker id with entities as handles.
    pub session: TrackingSession<Entity, MarkerContent>,
}

/// Marks the root entity of one marker's spawned content.
#[derive(Component, Debug, Clone)]
pub struct MarkerAnchor {
    /// Marker id this anchor belongs to.
    pub marker: String,
}

/// World transform for a marker pose under the configured offset and scale.
pub(crate) fn anchored_transform(pose: Pose, config: &TrackingConfig) -> Transform {
    Transform {
        translation: pose.translation + Vec3::Y * config.vertical_offset,
        rotation: pose.rotation,
        scale: Vec3::splat(config.content_scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_transform_applies_offset_and_scale() {
        let mut config = TrackingConfig::default();
        config.vertical_offset = 0.25;
        config.content_scale = 2.0;

        let pose = Pose::from_translation(Vec3::new(1.0, 0.0, -3.0));
        let transform = anchored_transform(pose, &config);

        assert_eq!(transform.translation, Vec3::new(1.0, 0.25, -3.0));
        assert_eq!(transform.scale, Vec3::splat(2.0));
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }
}
