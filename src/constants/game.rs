use ratatui::style::Color;

// World geometry, in world units. The y axis grows downward, so y = 0 is the
// top of the screen and y = SCREEN_HEIGHT is the bottom.
pub const SCREEN_WIDTH: f32 = 450.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const GROUND_HEIGHT: f32 = 40.0;

// Bird. The horizontal position never changes; only y moves.
pub const BIRD_X: f32 = 200.0;
pub const BIRD_START_Y: f32 = 300.0;
pub const BIRD_WIDTH: f32 = 30.0;
pub const BIRD_HEIGHT: f32 = 20.0;

// Per-tick physics. One tick is 1/60 s and every constant is tuned for a
// per-tick delta of exactly 1.
pub const GRAVITY: f32 = 0.35;
pub const JUMP_IMPULSE: f32 = -8.0;

// Pipes
pub const PIPE_WIDTH: f32 = 60.0;
pub const PIPE_GAP: f32 = 200.0;
pub const BASE_PIPE_SPEED: f32 = 3.0;
pub const SPAWN_SPACING: f32 = 300.0;
pub const PASS_THRESHOLD: f32 = PIPE_WIDTH;
pub const GAP_TOP_MIN: f32 = 100.0;
pub const GAP_TOP_MAX: f32 = SCREEN_HEIGHT - 250.0;

// Vertical oscillation. gap_top stays inside
// [OSCILLATION_MARGIN, SCREEN_HEIGHT - OSCILLATION_MARGIN - PIPE_GAP] and the
// drift direction flips at the bounds.
pub const PIPE_VERTICAL_SPEED: f32 = 1.0;
pub const OSCILLATION_MARGIN: f32 = 20.0;

// Difficulty ramp, both life-local.
pub const OSCILLATION_SCORE: u32 = 10;
pub const SPEED_INTERVAL: u32 = 5;
pub const SPEED_INCREMENT: f32 = 0.5;

pub const PIPE_COLOR: Color = Color::LightGreen;
pub const GROUND_COLOR: Color = Color::Green;
pub const BIRD_COLOR: Color = Color::Yellow;

pub const BIRD_TEXT: &str = r#"
 __
(o)>
"#;
