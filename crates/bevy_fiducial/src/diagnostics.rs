use crate::session::FiducialSession;
use bevy::diagnostic::{Diagnostic, DiagnosticPath, Diagnostics, RegisterDiagnostic};
use bevy::prelude::*;

pub const TRACKED_MARKERS_PATH: DiagnosticPath =
    DiagnosticPath::const_new("fiducial/tracked_markers");
pub const SPAWNED_INSTANCES_PATH: DiagnosticPath =
    DiagnosticPath::const_new("fiducial/spawned_instances");
pub const CONTENT_ACTIVE_PATH: DiagnosticPath =
    DiagnosticPath::const_new("fiducial/content_active");

pub fn register(app: &mut App) {
    app.register_diagnostic(Diagnostic::new(TRACKED_MARKERS_PATH));
    app.register_diagnostic(Diagnostic::new(SPAWNED_INSTANCES_PATH));
    app.register_diagnostic(Diagnostic::new(CONTENT_ACTIVE_PATH));
}

pub fn update_diagnostics(mut diagnostics: Diagnostics, session: Option<Res<FiducialSession>>) {
    let Some(fiducial) = session else {
        return;
    };

    let tracked = fiducial.session.tracked_count() as f64;
    let spawned = fiducial.session.spawned_count() as f64;
    let active = if fiducial.session.active_marker().is_some() {
        1.0
    } else {
        0.0
    };

    diagnostics.add_measurement(&TRACKED_MARKERS_PATH, || tracked);
    diagnostics.add_measurement(&SPAWNED_INSTANCES_PATH, || spawned);
    diagnostics.add_measurement(&CONTENT_ACTIVE_PATH, || active);
}
