//! Bevy systems for marker tracking - split into logical modules

mod bootstrap;
mod ingest;
mod motion;
mod ticks;

pub(super) use bootstrap::{bootstrap_session, setup_tracking};
pub(super) use ingest::ingest_tracked_images;
pub(super) use motion::smooth_marker_poses;
pub(super) use ticks::run_session_ticks;
