//! The tracking session: one owner for every piece of runtime state
//!
//! A [`TrackingSession`] owns the registry, the tracking cache, the
//! spawn pool, the presenter observers, and the tick queue, and is the
//! only writer of the active-marker slot. Hosts feed it observation
//! batches as they arrive, poll it once per update with the current
//! time, and run whatever periodic work the poll reports due.
//!
//! Everything runs on the caller's thread. A selection run reads the
//! cache fully before touching the pool or observers, so no run can
//! emit a contradictory show/hide pair.

use crate::config::TrackingConfig;
use crate::error::Result;
use crate::observer::{PresenterEvent, PresenterObservers, SubscriptionToken};
use crate::pool::{SpawnOutcome, SpawnPool};
use crate::pose::Pose;
use crate::registry::MarkerRegistry;
use crate::schedule::{TaskId, TickQueue};
use crate::tracking::{TrackingCache, TrackingStatus};

/// One backend report about one marker
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Reference-image id
    pub id: String,
    /// Reported tracking quality
    pub status: TrackingStatus,
    /// Reported world pose
    pub pose: Pose,
}

/// One frame's worth of backend reports, as three disjoint sets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationBatch {
    /// Markers sighted for the first time
    pub added: Vec<Observation>,
    /// Markers re-reported with a fresh status or pose
    pub updated: Vec<Observation>,
    /// Marker ids the backend stopped reporting
    pub removed: Vec<String>,
}

impl ObservationBatch {
    /// Whether the batch carries nothing at all
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Periodic work owed after a [`TrackingSession::poll`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickPlan {
    /// The selection pass is due
    pub select: bool,
    /// The guard sweep is due
    pub guard: bool,
}

/// What one selection run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    /// Marker that started showing this run
    pub shown: Option<String>,
    /// Marker hidden this run, either because its grace period expired
    /// or because a switch displaced it. On a switch the hide is
    /// emitted before `shown`'s show, keeping the two strictly
    /// alternating.
    pub hidden: Option<String>,
    /// Marker whose instance was created this run
    pub spawned: Option<String>,
    /// Marker whose spawn factory declined; selection was left exactly
    /// as it was and the next run will try again
    pub spawn_failed: Option<String>,
}

/// What one guard sweep did
#[derive(Debug, PartialEq)]
pub struct GuardReport<H> {
    /// Instances removed because their handle was dead, with the
    /// handles returned for release
    pub pruned: Vec<(String, H)>,
    /// Whether the sweep tore the whole session down
    pub shut_down: bool,
    /// Handles released by that teardown
    pub released: Vec<(String, H)>,
    /// Marker hidden by this sweep, if the active one was affected
    pub hidden: Option<String>,
}

impl<H> Default for GuardReport<H> {
    fn default() -> Self {
        Self {
            pruned: Vec::new(),
            shut_down: false,
            released: Vec::new(),
            hidden: None,
        }
    }
}

/// Owner of all tracking runtime state
///
/// `H` is the host's handle for spawned content (an entity id, a scene
/// node, a test integer). `D` is the content descriptor registered per
/// marker. Times are seconds on whatever monotonic clock the host
/// prefers; the session only ever compares differences.
#[derive(Debug)]
pub struct TrackingSession<H, D> {
    config: TrackingConfig,
    registry: MarkerRegistry<D>,
    cache: TrackingCache,
    pool: SpawnPool<H>,
    observers: PresenterObservers<D>,
    queue: TickQueue,
    select_task: TaskId,
    guard_task: TaskId,
    active: Option<String>,
    torn_down: bool,
}

impl<H, D> TrackingSession<H, D> {
    /// Creates a session and arms both periodic ticks
    ///
    /// `now` seeds the tick deadlines: selection first fires one
    /// `select_interval` after it, the guard one `guard_interval`.
    pub fn new(registry: MarkerRegistry<D>, config: TrackingConfig, now: f64) -> Result<Self> {
        config.validate()?;
        let cache = TrackingCache::new(config.visibility);
        let mut queue = TickQueue::new();
        let select_task = queue.run_every(config.select_interval, now);
        let guard_task = queue.run_every(config.guard_interval, now);
        Ok(Self {
            config,
            registry,
            cache,
            pool: SpawnPool::new(),
            observers: PresenterObservers::new(),
            queue,
            select_task,
            guard_task,
            active: None,
            torn_down: false,
        })
    }

    /// Registers a presenter for show/hide notifications
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionToken
    where
        F: FnMut(&PresenterEvent<D>) + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Drops the presenter registered under `token`
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.observers.unsubscribe(token)
    }

    /// Ingests one frame of backend reports
    ///
    /// Added and updated entries are treated alike: status and pose are
    /// recorded, and recency refreshes when the status counts as
    /// visible. Ids missing from the registry are skipped entirely, so
    /// foreign markers never allocate anything. Removed ids downgrade
    /// the record without touching recency; unknown removed ids are
    /// no-ops. Returns how many added/updated observations were
    /// accepted.
    ///
    /// After teardown the method ignores everything, since backends may
    /// keep reporting for a few frames.
    pub fn apply_observations(&mut self, batch: &ObservationBatch, now: f64) -> usize {
        if self.torn_down {
            return 0;
        }

        let mut accepted = 0;
        for observation in batch.added.iter().chain(batch.updated.iter()) {
            if !self.registry.contains(&observation.id) {
                continue;
            }
            self.cache
                .record_update(&observation.id, observation.status, observation.pose, now);
            self.pool.set_target(&observation.id, observation.pose);
            accepted += 1;
        }
        for id in &batch.removed {
            self.cache.record_removed(id);
        }
        accepted
    }

    /// Reports which periodic work is due at `now`
    pub fn poll(&mut self, now: f64) -> TickPlan {
        let mut plan = TickPlan::default();
        if self.torn_down {
            return plan;
        }
        for task in self.queue.due(now) {
            if task == self.select_task {
                plan.select = true;
            } else if task == self.guard_task {
                plan.guard = true;
            }
        }
        plan
    }

    /// Runs the guard sweep
    ///
    /// `backend_ok` is the host's verdict on its tracking subsystem;
    /// `false` triggers full teardown. Otherwise every instance handle
    /// is probed with `alive` and dead ones are removed together with
    /// their tracking record. Pruning the active marker hides it.
    pub fn run_guard<F>(&mut self, backend_ok: bool, alive: F) -> GuardReport<H>
    where
        F: FnMut(&H) -> bool,
    {
        let mut report = GuardReport::default();
        if self.torn_down {
            return report;
        }

        if !backend_ok {
            report.hidden = self.active.clone();
            report.released = self.shutdown();
            report.shut_down = true;
            return report;
        }

        let pruned = self.pool.prune(alive);
        for (id, _) in &pruned {
            self.cache.remove(id);
            if self.active.as_deref() == Some(id.as_str()) {
                self.active = None;
                self.observers.emit(&PresenterEvent::Hide { marker: id.clone() });
                report.hidden = Some(id.clone());
            }
        }
        report.pruned = pruned;
        report
    }

    /// Tears everything down
    ///
    /// Cancels both ticks, hides whatever was showing, clears the cache
    /// and drains the pool, returning `(id, handle)` pairs for the host
    /// to release. Safe to call any number of times; repeat calls
    /// return nothing and emit nothing.
    pub fn shutdown(&mut self) -> Vec<(String, H)> {
        if self.torn_down {
            return Vec::new();
        }
        self.torn_down = true;
        self.queue.clear();

        if let Some(current) = self.active.take() {
            self.pool.set_active(&current, false);
            self.observers.emit(&PresenterEvent::Hide { marker: current });
        }
        self.cache.clear();
        self.pool.drain()
    }

    /// Eases every instance toward its target pose, returning how many
    /// moved
    pub fn update_motion(&mut self, dt: f32) -> usize {
        self.pool.update_transforms(dt, &self.config.motion)
    }

    /// The marker currently presented, if any
    pub fn active_marker(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether [`TrackingSession::shutdown`] has run
    pub fn is_shut_down(&self) -> bool {
        self.torn_down
    }

    /// The registry this session was built with
    pub fn registry(&self) -> &MarkerRegistry<D> {
        &self.registry
    }

    /// The configuration this session was built with
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Read access to the tracking cache
    pub fn cache(&self) -> &TrackingCache {
        &self.cache
    }

    /// Read access to the spawn pool
    pub fn pool(&self) -> &SpawnPool<H> {
        &self.pool
    }

    /// Number of markers sighted so far
    pub fn tracked_count(&self) -> usize {
        self.cache.len()
    }

    /// Number of live content instances
    pub fn spawned_count(&self) -> usize {
        self.pool.len()
    }
}

impl<H, D: Clone> TrackingSession<H, D> {
    /// Runs the selection pass
    ///
    /// Picks the most recently seen visible marker and reconciles the
    /// presentation with it:
    ///
    /// - a new best marker gets an instance (spawning through `factory`
    ///   if this is its first activation); the previous one, if any,
    ///   hides first, then `Show` fires with the registered descriptor,
    ///   so presenter events strictly alternate even across a switch;
    /// - the already-showing marker is left exactly as is;
    /// - no visible marker hides the showing one only once its recency
    ///   is more than `hide_delay` old, which absorbs tracking blips
    ///   shorter than the grace period.
    ///
    /// The factory runs before anything is emitted, so a declining
    /// factory leaves the entire run a no-op for that marker: the
    /// previous content keeps showing and the next run retries. The
    /// report mirrors everything that happened so hosts can log or
    /// forward it.
    pub fn run_selection<F>(&mut self, now: f64, factory: F) -> SelectionReport
    where
        F: FnOnce(&str, Pose) -> Option<H>,
    {
        let mut report = SelectionReport::default();
        if self.torn_down {
            return report;
        }

        let best = self.cache.best_visible().map(|(id, _)| id.to_string());
        match best {
            Some(best_id) if self.active.as_deref() != Some(best_id.as_str()) => {
                let Some(content) = self.registry.get(&best_id).cloned() else {
                    // Ingestion only caches registered ids; drop the stray.
                    self.cache.remove(&best_id);
                    return report;
                };
                let pose = self
                    .cache
                    .get(&best_id)
                    .map(|record| record.pose)
                    .unwrap_or_default();

                match self.pool.ensure_spawned(&best_id, pose, factory) {
                    SpawnOutcome::Failed => {
                        report.spawn_failed = Some(best_id);
                        return report;
                    }
                    SpawnOutcome::Spawned => report.spawned = Some(best_id.clone()),
                    SpawnOutcome::AlreadySpawned => {}
                }

                if let Some(previous) = self.active.take() {
                    self.pool.set_active(&previous, false);
                    self.observers.emit(&PresenterEvent::Hide {
                        marker: previous.clone(),
                    });
                    report.hidden = Some(previous);
                }
                self.pool.set_active(&best_id, true);
                self.active = Some(best_id.clone());
                self.observers.emit(&PresenterEvent::Show {
                    marker: best_id.clone(),
                    content,
                });
                report.shown = Some(best_id);
            }
            Some(_) => {}
            None => {
                if let Some(current) = self.active.clone() {
                    let grace_elapsed = match self.cache.get(&current) {
                        Some(record) => now - record.last_seen > self.config.hide_delay,
                        // Record already gone, nothing left to wait for.
                        None => true,
                    };
                    if grace_elapsed {
                        self.pool.set_active(&current, false);
                        self.active = None;
                        self.observers.emit(&PresenterEvent::Hide {
                            marker: current.clone(),
                        });
                        report.hidden = Some(current);
                    }
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackingConfig;
    use std::sync::{Arc, Mutex};

    type TestSession = TrackingSession<u32, &'static str>;

    fn test_config() -> TrackingConfig {
        TrackingConfig {
            hide_delay: 0.2,
            ..Default::default()
        }
    }

    fn test_session(now: f64) -> TestSession {
        let registry = MarkerRegistry::from_entries([
            ("poster".to_string(), "poster content"),
            ("statue".to_string(), "statue content"),
        ])
        .unwrap();
        TrackingSession::new(registry, test_config(), now).unwrap()
    }

    fn record_events(session: &mut TestSession) -> Arc<Mutex<Vec<String>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        session.subscribe(move |event: &PresenterEvent<&'static str>| {
            let line = match event {
                PresenterEvent::Show { marker, .. } => format!("show {marker}"),
                PresenterEvent::Hide { marker } => format!("hide {marker}"),
            };
            sink.lock().unwrap().push(line);
        });
        log
    }

    fn tracked(id: &str, now_pose: Pose) -> ObservationBatch {
        ObservationBatch {
            updated: vec![Observation {
                id: id.to_string(),
                status: TrackingStatus::Tracking,
                pose: now_pose,
            }],
            ..Default::default()
        }
    }

    fn removed(id: &str) -> ObservationBatch {
        ObservationBatch {
            removed: vec![id.to_string()],
            ..Default::default()
        }
    }

    fn spawn_ok(_: &str, _: Pose) -> Option<u32> {
        Some(1)
    }

    #[test]
    fn shows_content_for_a_tracked_marker() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        let report = session.run_selection(0.1, spawn_ok);

        assert_eq!(report.shown.as_deref(), Some("poster"));
        assert_eq!(report.spawned.as_deref(), Some("poster"));
        assert_eq!(session.active_marker(), Some("poster"));
        assert!(session.pool().get("poster").unwrap().active);
        assert_eq!(events.lock().unwrap().as_slice(), ["show poster"]);
    }

    #[test]
    fn hide_fires_once_after_the_grace_period() {
        // Grace of 0.2s: tracked at t=0, removed at t=0.05, selection
        // every 0.1s. The hide lands on the first run strictly past the
        // grace period and never repeats.
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.0, spawn_ok);
        session.apply_observations(&removed("poster"), 0.05);

        assert_eq!(session.run_selection(0.1, spawn_ok), SelectionReport::default());
        assert_eq!(session.run_selection(0.2, spawn_ok), SelectionReport::default());

        let report = session.run_selection(0.3, spawn_ok);
        assert_eq!(report.hidden.as_deref(), Some("poster"));
        assert_eq!(session.active_marker(), None);
        assert!(!session.pool().get("poster").unwrap().active);

        assert_eq!(session.run_selection(0.4, spawn_ok), SelectionReport::default());
        assert_eq!(
            events.lock().unwrap().as_slice(),
            ["show poster", "hide poster"]
        );
    }

    #[test]
    fn short_dropouts_are_absorbed() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.0, spawn_ok);

        // Lost for a single frame, back before the grace expires.
        session.apply_observations(&removed("poster"), 0.05);
        session.run_selection(0.1, spawn_ok);
        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.15);
        session.run_selection(0.2, spawn_ok);

        assert_eq!(session.active_marker(), Some("poster"));
        assert_eq!(events.lock().unwrap().as_slice(), ["show poster"]);
    }

    #[test]
    fn most_recent_sighting_wins_a_switch() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);

        let mut both = tracked("poster", Pose::IDENTITY);
        both.updated.push(Observation {
            id: "statue".to_string(),
            status: TrackingStatus::Tracking,
            pose: Pose::IDENTITY,
        });
        session.apply_observations(&both, 0.15);
        // Statue alone gets a fresher sighting.
        session.apply_observations(&tracked("statue", Pose::IDENTITY), 0.18);

        let report = session.run_selection(0.2, spawn_ok);
        assert_eq!(report.shown.as_deref(), Some("statue"));
        assert_eq!(report.hidden.as_deref(), Some("poster"));

        assert_eq!(session.active_marker(), Some("statue"));
        assert!(!session.pool().get("poster").unwrap().active);
        assert!(session.pool().get("statue").unwrap().active);
        assert_eq!(
            events.lock().unwrap().as_slice(),
            ["show poster", "hide poster", "show statue"]
        );
    }

    #[test]
    fn reselecting_the_active_marker_emits_nothing() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);
        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.15);
        let report = session.run_selection(0.2, spawn_ok);

        assert_eq!(report, SelectionReport::default());
        assert_eq!(events.lock().unwrap().len(), 1);
    }

    #[test]
    fn declined_spawns_leave_selection_untouched() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        let report = session.run_selection(0.1, |_, _| None);

        assert_eq!(report.spawn_failed.as_deref(), Some("poster"));
        assert_eq!(session.active_marker(), None);
        assert!(events.lock().unwrap().is_empty());

        // The next run retries and succeeds.
        let report = session.run_selection(0.2, spawn_ok);
        assert_eq!(report.shown.as_deref(), Some("poster"));
    }

    #[test]
    fn failed_switch_keeps_the_previous_content_showing() {
        let mut session = test_session(0.0);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);
        session.apply_observations(&tracked("statue", Pose::IDENTITY), 0.15);

        let report = session.run_selection(0.2, |_, _| None);
        assert_eq!(report.spawn_failed.as_deref(), Some("statue"));
        assert_eq!(session.active_marker(), Some("poster"));
        assert!(session.pool().get("poster").unwrap().active);
    }

    #[test]
    fn unknown_markers_never_enter_the_session() {
        let mut session = test_session(0.0);

        let accepted = session.apply_observations(&tracked("unregistered", Pose::IDENTITY), 0.0);
        assert_eq!(accepted, 0);
        assert_eq!(session.tracked_count(), 0);
        assert_eq!(session.run_selection(0.1, spawn_ok), SelectionReport::default());

        // Removing one is just as inert.
        session.apply_observations(&removed("unregistered"), 0.1);
        assert_eq!(session.tracked_count(), 0);
    }

    #[test]
    fn active_marker_always_has_a_live_instance() {
        let mut session = test_session(0.0);

        let check = |session: &TestSession| {
            if let Some(active) = session.active_marker() {
                assert!(session.pool().contains(active));
            }
        };

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);
        check(&session);

        session.apply_observations(&tracked("statue", Pose::IDENTITY), 0.15);
        session.run_selection(0.2, spawn_ok);
        check(&session);

        session.apply_observations(&removed("statue"), 0.25);
        session.run_selection(0.6, spawn_ok);
        check(&session);
    }

    #[test]
    fn guard_prunes_dead_instances() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, |_, _| Some(7));

        let report = session.run_guard(true, |handle| *handle != 7);
        assert_eq!(report.pruned, vec![("poster".to_string(), 7)]);
        assert_eq!(report.hidden.as_deref(), Some("poster"));
        assert_eq!(session.active_marker(), None);
        assert_eq!(session.spawned_count(), 0);
        assert_eq!(session.tracked_count(), 0);
        assert_eq!(
            events.lock().unwrap().as_slice(),
            ["show poster", "hide poster"]
        );

        // Re-sighting respawns cleanly afterwards.
        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.2);
        let report = session.run_selection(0.3, spawn_ok);
        assert_eq!(report.spawned.as_deref(), Some("poster"));
    }

    #[test]
    fn guard_leaves_healthy_instances_alone() {
        let mut session = test_session(0.0);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);

        let report = session.run_guard(true, |_| true);
        assert!(report.pruned.is_empty());
        assert_eq!(report.hidden, None);
        assert_eq!(session.active_marker(), Some("poster"));
    }

    #[test]
    fn backend_failure_tears_the_session_down() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);

        let report = session.run_guard(false, |_| true);
        assert!(report.shut_down);
        assert_eq!(report.hidden.as_deref(), Some("poster"));
        assert_eq!(report.released.len(), 1);
        assert!(session.is_shut_down());

        // Everything afterwards is inert.
        assert_eq!(session.poll(10.0), TickPlan::default());
        assert_eq!(
            session.apply_observations(&tracked("poster", Pose::IDENTITY), 10.0),
            0
        );
        assert_eq!(session.run_selection(10.1, spawn_ok), SelectionReport::default());
        assert_eq!(session.run_guard(true, |_| true), GuardReport::default());
        assert_eq!(
            events.lock().unwrap().as_slice(),
            ["show poster", "hide poster"]
        );
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);

        let released = session.shutdown();
        assert_eq!(released.len(), 1);
        assert_eq!(session.shutdown(), Vec::new());
        assert_eq!(session.spawned_count(), 0);
        assert_eq!(session.tracked_count(), 0);
        assert_eq!(
            events.lock().unwrap().as_slice(),
            ["show poster", "hide poster"]
        );
    }

    #[test]
    fn shows_and_hides_strictly_alternate() {
        let mut session = test_session(0.0);
        let events = record_events(&mut session);

        let mut now = 0.0;
        for cycle in 0..3 {
            session.apply_observations(&tracked("poster", Pose::IDENTITY), now);
            session.run_selection(now + 0.1, spawn_ok);
            if cycle == 1 {
                // A switch mid-cycle must keep the alternation intact.
                session.apply_observations(&tracked("statue", Pose::IDENTITY), now + 0.12);
                session.run_selection(now + 0.2, spawn_ok);
                session.apply_observations(&removed("statue"), now + 0.25);
            }
            session.apply_observations(&removed("poster"), now + 0.25);
            // Well past the grace period.
            session.run_selection(now + 0.6, spawn_ok);
            now += 1.0;
        }

        let log = events.lock().unwrap();
        assert_eq!(log.len(), 8);
        for (i, line) in log.iter().enumerate() {
            let expected = if i % 2 == 0 { "show" } else { "hide" };
            assert!(line.starts_with(expected), "event {i} out of order: {line}");
        }
    }

    #[test]
    fn poll_schedules_both_ticks() {
        let mut session = test_session(0.0);

        assert_eq!(session.poll(0.05), TickPlan::default());
        assert_eq!(
            session.poll(0.1),
            TickPlan {
                select: true,
                guard: false
            }
        );
        // At 0.5 the selection tick has re-armed and the guard lands.
        assert_eq!(
            session.poll(0.5),
            TickPlan {
                select: true,
                guard: true
            }
        );
    }

    #[test]
    fn unsubscribed_presenters_miss_later_events() {
        let mut session = test_session(0.0);
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let token = session.subscribe(move |event: &PresenterEvent<&'static str>| {
            sink.lock().unwrap().push(event.marker().to_string());
        });

        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);
        assert!(session.unsubscribe(token));

        session.apply_observations(&removed("poster"), 0.2);
        session.run_selection(1.0, spawn_ok);

        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn motion_targets_follow_observations() {
        use glam::Vec3;

        let mut session = test_session(0.0);
        session.apply_observations(&tracked("poster", Pose::IDENTITY), 0.0);
        session.run_selection(0.1, spawn_ok);

        let moved_pose = Pose::from_translation(Vec3::new(0.4, 0.0, 0.0));
        session.apply_observations(&tracked("poster", moved_pose), 0.15);

        assert_eq!(session.pool().get("poster").unwrap().target, moved_pose);
        assert_eq!(session.update_motion(0.05), 1);
        let current = session.pool().get("poster").unwrap().current;
        assert!(current.translation.x > 0.0 && current.translation.x < 0.4);
    }
}
