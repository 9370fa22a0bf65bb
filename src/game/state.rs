// Game entities and the per-process session context.
// All coordinates live in a fixed virtual playfield; the renderer scales
// them to whatever terminal it finds.

use glam::Vec2;

use crate::config::{Config, PhysicsConfig};
use crate::network::transport::UdpEndpoint;

pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

// Entity geometry is compile-time fixed; only speeds are configurable.
pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 74.0;
pub const PADDLE_MARGIN: f32 = 30.0;
pub const BALL_SIZE: f32 = 15.0;

pub const BALL_TRAIL_CAPACITY: usize = 15;
pub const PADDLE_TRAIL_CAPACITY: usize = 24;

/// Axis-aligned rectangle in virtual playfield coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict AABB overlap test: rectangles that merely touch do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Clamp the rectangle to lie fully inside a `width` x `height` field.
    pub fn clamp_within(&mut self, width: f32, height: f32) {
        self.x = self.x.clamp(0.0, width - self.w);
        self.y = self.y.clamp(0.0, height - self.h);
    }
}

/// Fixed-capacity ring buffer of recent center positions, rendered as a
/// fading motion streak. No allocation; the oldest point is overwritten
/// once the buffer is full.
#[derive(Debug, Clone)]
pub struct Trail<const CAP: usize> {
    points: [Vec2; CAP],
    head: usize,
    len: usize,
}

impl<const CAP: usize> Trail<CAP> {
    pub fn new() -> Self {
        Self {
            points: [Vec2::ZERO; CAP],
            head: 0,
            len: 0,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        self.points[self.head] = point;
        self.head = (self.head + 1) % CAP;
        if self.len < CAP {
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate stored points oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        let start = (self.head + CAP - self.len) % CAP;
        (0..self.len).map(move |i| self.points[(start + i) % CAP])
    }
}

impl<const CAP: usize> Default for Trail<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub rect: Rect,
    pub color: [u8; 3],
    pub speed: f32,
    /// Signed vertical direction: -1 up, 0 idle, 1 down.
    pub dir_y: f32,
    pub trail: Trail<PADDLE_TRAIL_CAPACITY>,
    /// Seconds of hit flash remaining.
    pub hit_timer: f32,
}

impl Paddle {
    pub fn new(x: f32, color: [u8; 3], speed: f32) -> Self {
        Self {
            rect: Rect::new(
                x,
                (PLAYFIELD_HEIGHT - PADDLE_HEIGHT) / 2.0,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            color,
            speed,
            dir_y: 0.0,
            trail: Trail::new(),
            hit_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub rect: Rect,
    pub color: [u8; 3],
    pub speed: f32,
    /// Transient angular bias applied to the direction on paddle contact.
    pub spin_factor: f32,
    /// Unit direction of travel.
    pub dir: Vec2,
    pub trail: Trail<BALL_TRAIL_CAPACITY>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Currently held vertical direction for one paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeldDir {
    #[default]
    None,
    Up,
    Down,
}

impl HeldDir {
    pub fn dir_y(self) -> f32 {
        match self {
            HeldDir::None => 0.0,
            HeldDir::Up => -1.0,
            HeldDir::Down => 1.0,
        }
    }
}

/// How this process participates in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Local,
    Host,
    Client,
}

/// Which update behavior runs this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    HostPending,
    HostRunning,
    ClientRunning,
    LocalRunning,
}

/// The whole game session: entities, scores, role, active phase and the
/// transport endpoints. Passed by `&mut` into every update function;
/// nothing here is global.
pub struct Session {
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub scores: [u32; 2],
    pub win_score: u32,
    pub role: Role,
    pub phase: Phase,
    /// Bound but peerless socket while a host waits for a CONNECT.
    pub server_sock: Option<UdpEndpoint>,
    /// Socket with a bound peer; at most one of the two is populated.
    pub peer_sock: Option<UdpEndpoint>,
    /// Last-seen input intent per side.
    pub held: [HeldDir; 2],
    pub paused: bool,
    pub should_exit: bool,
    pub physics: PhysicsConfig,
}

impl Session {
    pub fn new(
        role: Role,
        server_sock: Option<UdpEndpoint>,
        peer_sock: Option<UdpEndpoint>,
        config: &Config,
    ) -> Self {
        let physics = config.physics.clone();
        let left = Paddle::new(
            PADDLE_MARGIN,
            config.display.left_paddle_color,
            physics.paddle_base_speed,
        );
        let right = Paddle::new(
            PLAYFIELD_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
            config.display.right_paddle_color,
            physics.paddle_base_speed,
        );

        let ball = Ball {
            rect: Rect::new(
                PADDLE_MARGIN + PADDLE_WIDTH,
                (PLAYFIELD_HEIGHT - BALL_SIZE) / 2.0,
                BALL_SIZE,
                BALL_SIZE,
            ),
            color: left.color,
            speed: physics.ball_base_speed,
            spin_factor: 0.0,
            dir: Vec2::X,
            trail: Trail::new(),
        };

        let phase = match role {
            Role::Local => Phase::Menu,
            Role::Host => Phase::HostPending,
            Role::Client => Phase::ClientRunning,
        };

        Self {
            paddles: [left, right],
            ball,
            scores: [0, 0],
            win_score: physics.winning_score,
            role,
            phase,
            server_sock,
            peer_sock,
            held: [HeldDir::None; 2],
            paused: false,
            should_exit: false,
            physics,
        }
    }

    /// Respawn the ball beside the scoring side's paddle, pointing into the
    /// field, and recenter both paddles.
    pub fn reset_round(&mut self, scorer: Side) {
        for paddle in &mut self.paddles {
            paddle.rect.y = (PLAYFIELD_HEIGHT - PADDLE_HEIGHT) / 2.0;
        }

        let paddle_rect = self.paddles[scorer.index()].rect;
        let paddle_color = self.paddles[scorer.index()].color;

        match scorer {
            Side::Left => {
                self.ball.rect.x = paddle_rect.x + paddle_rect.w;
                self.ball.dir = Vec2::X;
            }
            Side::Right => {
                self.ball.rect.x = paddle_rect.x - self.ball.rect.w;
                self.ball.dir = Vec2::NEG_X;
            }
        }
        self.ball.rect.y = paddle_rect.y + paddle_rect.h / 2.0 - self.ball.rect.h / 2.0;
        self.ball.color = paddle_color;
        self.ball.speed = self.physics.ball_base_speed;
        self.ball.spin_factor = 0.0;

        self.ball.trail.clear();
        for paddle in &mut self.paddles {
            paddle.trail.clear();
        }
    }

    /// Fresh match from the menu: zero scores, reset paddle speeds, serve
    /// from the left, and enter the role's running phase.
    pub fn start_match(&mut self) {
        self.scores = [0, 0];
        for paddle in &mut self.paddles {
            paddle.speed = self.physics.paddle_base_speed;
            paddle.dir_y = 0.0;
            paddle.hit_timer = 0.0;
        }
        self.held = [HeldDir::None; 2];
        self.reset_round(Side::Left);
        self.paused = false;
        self.phase = match self.role {
            Role::Local => Phase::LocalRunning,
            Role::Host => {
                if self.peer_sock.is_some() {
                    Phase::HostRunning
                } else {
                    Phase::HostPending
                }
            }
            Role::Client => Phase::ClientRunning,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_grows_until_capacity_then_overwrites_oldest() {
        let mut trail: Trail<3> = Trail::new();
        assert!(trail.is_empty());

        trail.push(Vec2::new(1.0, 0.0));
        trail.push(Vec2::new(2.0, 0.0));
        assert_eq!(trail.len(), 2);
        let points: Vec<Vec2> = trail.iter().collect();
        assert_eq!(points[0].x, 1.0);
        assert_eq!(points[1].x, 2.0);

        trail.push(Vec2::new(3.0, 0.0));
        trail.push(Vec2::new(4.0, 0.0));
        assert_eq!(trail.len(), 3);
        let points: Vec<Vec2> = trail.iter().collect();
        assert_eq!(points[0].x, 2.0);
        assert_eq!(points[2].x, 4.0);
    }

    #[test]
    fn trail_clear_resets_length() {
        let mut trail: Trail<4> = Trail::new();
        trail.push(Vec2::ZERO);
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.iter().count(), 0);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn clamp_keeps_rect_inside_field() {
        let mut rect = Rect::new(-5.0, 700.0, 15.0, 74.0);
        rect.clamp_within(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, PLAYFIELD_HEIGHT - 74.0);
    }

    #[test]
    fn initial_phase_follows_role() {
        let config = Config::default();
        let session = Session::new(Role::Local, None, None, &config);
        assert_eq!(session.phase, Phase::Menu);

        let session = Session::new(Role::Host, None, None, &config);
        assert_eq!(session.phase, Phase::HostPending);
    }

    #[test]
    fn reset_round_serves_away_from_the_scorer() {
        let config = Config::default();
        let mut session = Session::new(Role::Local, None, None, &config);
        session.ball.speed = 900.0;
        session.ball.spin_factor = 0.3;

        session.reset_round(Side::Right);
        let right = &session.paddles[1];
        assert_eq!(session.ball.rect.x, right.rect.x - session.ball.rect.w);
        assert_eq!(session.ball.dir, Vec2::NEG_X);
        assert_eq!(session.ball.speed, session.physics.ball_base_speed);
        assert_eq!(session.ball.spin_factor, 0.0);
        assert_eq!(session.ball.color, right.color);
    }
}
