//! Rigid pose type shared between the tracking cache and the spawn pool

use glam::{Quat, Vec3};

/// Position and orientation of a marker or a spawned content instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World-space position in meters
    pub translation: Vec3,
    /// World-space orientation
    pub rotation: Quat,
}

impl Pose {
    /// Origin with identity orientation
    pub const IDENTITY: Pose = Pose {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a pose from explicit components
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Creates a pose at `translation` with identity orientation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Eases this pose toward `target` with an exponential approach
    ///
    /// `rate` is the approach rate per second; the step is scaled by `dt`
    /// so the motion is framerate independent. Returns `false` without
    /// touching the pose when both the positional delta is within
    /// `pos_eps` and the angular delta is within `rot_eps`, which keeps
    /// stationary content from jittering on sensor noise.
    pub fn step_toward(
        &mut self,
        target: Pose,
        rate: f32,
        dt: f32,
        pos_eps: f32,
        rot_eps: f32,
    ) -> bool {
        let pos_delta = self.translation.distance(target.translation);
        let rot_delta = self.rotation.angle_between(target.rotation);
        if pos_delta <= pos_eps && rot_delta <= rot_eps {
            return false;
        }

        let alpha = 1.0 - (-rate * dt).exp();
        self.translation = self.translation.lerp(target.translation, alpha);
        self.rotation = self.rotation.slerp(target.rotation, alpha);
        true
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS_POS: f32 = 1e-3;
    const EPS_ROT: f32 = 0.01;

    #[test]
    fn deadband_suppresses_tiny_deltas() {
        let mut pose = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let target = Pose::from_translation(Vec3::new(1.0005, 0.0, 0.0));

        let moved = pose.step_toward(target, 8.0, 0.016, EPS_POS, EPS_ROT);
        assert!(!moved);
        assert_relative_eq!(pose.translation.x, 1.0);
    }

    #[test]
    fn converges_onto_target() {
        let mut pose = Pose::IDENTITY;
        let target = Pose::new(
            Vec3::new(0.5, 0.05, -0.3),
            Quat::from_rotation_y(1.2),
        );

        for _ in 0..400 {
            pose.step_toward(target, 8.0, 0.016, EPS_POS, EPS_ROT);
        }

        assert!(pose.translation.distance(target.translation) <= EPS_POS);
        assert!(pose.rotation.angle_between(target.rotation) <= EPS_ROT);
    }

    #[test]
    fn larger_dt_moves_farther() {
        let target = Pose::from_translation(Vec3::new(1.0, 0.0, 0.0));

        let mut slow = Pose::IDENTITY;
        let mut fast = Pose::IDENTITY;
        slow.step_toward(target, 8.0, 0.008, EPS_POS, EPS_ROT);
        fast.step_toward(target, 8.0, 0.032, EPS_POS, EPS_ROT);

        assert!(fast.translation.x > slow.translation.x);
    }

    #[test]
    fn huge_dt_lands_on_target() {
        let mut pose = Pose::IDENTITY;
        let target = Pose::from_translation(Vec3::new(2.0, 0.0, 0.0));

        pose.step_toward(target, 8.0, 10.0, EPS_POS, EPS_ROT);
        assert_relative_eq!(pose.translation.x, 2.0, epsilon = 1e-3);
    }
}
