// Per-frame update behavior, selected by the session's current phase.
// One dispatch step per frame; the phase value itself is the whole state
// machine (Menu and HostPending transitions happen inside the handlers).

mod client;
mod host;
mod local;

use crate::game::state::{Phase, Session};

pub fn update(session: &mut Session, dt: f32) {
    match session.phase {
        // Menu frames run no simulation; menu input drives transitions
        Phase::Menu => {}
        Phase::LocalRunning => local::update(session, dt),
        Phase::HostPending => host::pending_update(session),
        Phase::HostRunning => host::update(session, dt),
        Phase::ClientRunning => client::update(session),
    }
}
