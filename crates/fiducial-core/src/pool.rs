//! Lazily spawned content instances keyed by marker id
//!
//! One instance per marker, created the first time its marker wins
//! selection and reused from then on by toggling the active flag. The
//! handle type is opaque so the pool never names engine types; the host
//! maps handles to whatever its scene graph uses.

use std::collections::HashMap;

use crate::config::MotionConfig;
use crate::pose::Pose;

/// One spawned content instance
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedInstance<H> {
    /// Opaque engine handle for the spawned content
    pub handle: H,
    /// Whether the instance should currently be visible
    pub active: bool,
    /// Pose the instance is displayed at right now
    pub current: Pose,
    /// Latest observed pose the instance eases toward
    pub target: Pose,
}

/// Result of an ensure-spawned request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A new instance was created, initially inactive
    Spawned,
    /// The marker already had an instance, nothing happened
    AlreadySpawned,
    /// The factory declined; the marker simply has no instance this
    /// tick and a later call may try again
    Failed,
}

/// The set of live content instances
#[derive(Debug, Default)]
pub struct SpawnPool<H> {
    instances: HashMap<String, SpawnedInstance<H>>,
}

impl<H> SpawnPool<H> {
    /// Creates an empty pool
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Spawns an instance for `id` unless one already exists
    ///
    /// The factory runs only for the first request and receives the
    /// observed pose to place the content at. A factory returning
    /// `None` reports a recoverable engine failure: nothing is
    /// inserted, nothing panics, and the caller decides whether to try
    /// again on a later tick.
    pub fn ensure_spawned<F>(&mut self, id: &str, pose: Pose, factory: F) -> SpawnOutcome
    where
        F: FnOnce(&str, Pose) -> Option<H>,
    {
        if self.instances.contains_key(id) {
            return SpawnOutcome::AlreadySpawned;
        }
        match factory(id, pose) {
            Some(handle) => {
                self.instances.insert(
                    id.to_string(),
                    SpawnedInstance {
                        handle,
                        active: false,
                        current: pose,
                        target: pose,
                    },
                );
                SpawnOutcome::Spawned
            }
            None => SpawnOutcome::Failed,
        }
    }

    /// Sets the visibility flag for `id`
    ///
    /// Returns `false` when the marker has no instance, which callers
    /// treat as a no-op rather than an error.
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        match self.instances.get_mut(id) {
            Some(instance) => {
                instance.active = active;
                true
            }
            None => false,
        }
    }

    /// Records the latest observed pose as the smoothing target
    pub fn set_target(&mut self, id: &str, pose: Pose) -> bool {
        match self.instances.get_mut(id) {
            Some(instance) => {
                instance.target = pose;
                true
            }
            None => false,
        }
    }

    /// Eases every instance toward its target pose
    ///
    /// Returns how many instances actually moved; the rest were inside
    /// the epsilon deadband.
    pub fn update_transforms(&mut self, dt: f32, motion: &MotionConfig) -> usize {
        let mut moved = 0;
        for instance in self.instances.values_mut() {
            let target = instance.target;
            if instance.current.step_toward(
                target,
                motion.lerp_rate,
                dt,
                motion.position_epsilon,
                motion.rotation_epsilon,
            ) {
                moved += 1;
            }
        }
        moved
    }

    /// The instance for `id`, if one was spawned
    pub fn get(&self, id: &str) -> Option<&SpawnedInstance<H>> {
        self.instances.get(id)
    }

    /// Whether `id` has a live instance
    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    /// Number of live instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is spawned
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates over `(id, instance)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpawnedInstance<H>)> {
        self.instances.iter().map(|(id, i)| (id.as_str(), i))
    }

    /// Removes instances whose handle the probe reports dead
    ///
    /// Returns the removed `(id, handle)` pairs so the host can release
    /// whatever engine resources remain.
    pub fn prune<F>(&mut self, mut alive: F) -> Vec<(String, H)>
    where
        F: FnMut(&H) -> bool,
    {
        let dead: Vec<String> = self
            .instances
            .iter()
            .filter(|(_, instance)| !alive(&instance.handle))
            .map(|(id, _)| id.clone())
            .collect();

        dead.into_iter()
            .filter_map(|id| {
                self.instances
                    .remove(&id)
                    .map(|instance| (id, instance.handle))
            })
            .collect()
    }

    /// Removes every instance, returning the handles for release
    pub fn drain(&mut self) -> Vec<(String, H)> {
        self.instances
            .drain()
            .map(|(id, instance)| (id, instance.handle))
            .collect()
    }
}
