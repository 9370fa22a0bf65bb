// Both players on one keyboard; no sockets involved.

use crate::game::physics;
use crate::game::state::Session;

pub fn update(session: &mut Session, dt: f32) {
    for (paddle, held) in session.paddles.iter_mut().zip(session.held) {
        paddle.dir_y = held.dir_y();
    }
    physics::step(session, dt);
}
