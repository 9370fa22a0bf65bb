// Configuration types. Defaults reproduce the built-in game feel; the
// speed bands are runtime-tunable while entity geometry stays fixed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Ball speed in virtual units per second; base doubles as the band floor
    pub ball_base_speed: f32,
    pub ball_max_speed: f32,

    // Speed multiplier applied when the ball bounces off the top or bottom
    pub wall_damping: f32,

    // Paddle speed band; center hits push speed up, edge hits pull it down
    pub paddle_base_speed: f32,
    pub paddle_min_speed: f32,
    pub paddle_max_speed: f32,

    // Score required to win; adjustable from the menu
    pub winning_score: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_base_speed: 454.0,
            ball_max_speed: 909.0,
            wall_damping: 0.9,
            paddle_base_speed: 400.0,
            paddle_min_speed: 350.0,
            paddle_max_speed: 689.0,
            winning_score: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second
    pub target_fps: u64,

    // Entity colors (RGB values 0-255); the ball wears the color of the
    // paddle it last touched
    pub left_paddle_color: [u8; 3],
    pub right_paddle_color: [u8; 3],

    // Score and hint text color
    pub ui_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            left_paddle_color: [102, 191, 255],  // Sky blue
            right_paddle_color: [255, 0, 255],   // Magenta
            ui_color: [200, 122, 255],           // Purple
        }
    }
}
