use crate::constants::game::{BIRD_HEIGHT, BIRD_START_Y, BIRD_WIDTH, BIRD_X, GRAVITY, JUMP_IMPULSE, SCREEN_HEIGHT};
use crate::pages::game::object::{Object, Rect};

/// The player entity. Horizontal position is fixed; gravity and jump
/// impulses only move it vertically.
#[derive(Debug)]
pub struct Bird {
    y: f32,
    velocity: f32,
}

impl Bird {
    pub fn new() -> Self {
        Bird { y: BIRD_START_Y, velocity: 0.0 }
    }

    pub fn x(&self) -> f32 {
        BIRD_X
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// One gravity step: accelerate, move, clamp to the vertical screen
    /// extent. Hitting the clamp zeroes the velocity but is not fatal by
    /// itself; the ground and pipe checks decide that.
    pub fn update(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;

        let floor = SCREEN_HEIGHT - BIRD_HEIGHT;
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        } else if self.y > floor {
            self.y = floor;
            self.velocity = 0.0;
        }
    }

    /// Overrides the current velocity unconditionally; there is no cooldown.
    pub fn jump(&mut self) {
        self.velocity = JUMP_IMPULSE;
    }

    pub fn reset(&mut self) {
        self.y = BIRD_START_Y;
        self.velocity = 0.0;
    }
}

impl Object for Bird {
    fn bounds(&self) -> Rect {
        Rect::new(BIRD_X, self.y, BIRD_WIDTH, BIRD_HEIGHT)
    }
}
