use crate::constants::game::{GROUND_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::pages::game::bird::Bird;
use crate::pages::game::object::{Object, Rect};

/// Static band at the bottom of the play field. Never moves.
#[derive(Debug)]
pub struct Ground;

impl Ground {
    pub fn new() -> Self {
        Ground
    }

    pub fn collide(&self, bird: &Bird) -> bool {
        self.collides_with(bird)
    }
}

impl Object for Ground {
    fn bounds(&self) -> Rect {
        Rect::new(0.0, SCREEN_HEIGHT - GROUND_HEIGHT, SCREEN_WIDTH, GROUND_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let rect = Ground::new().bounds();
        assert_eq!(rect.y, 560.0);
        assert_eq!(rect.height, 40.0);
        assert_eq!(rect.width, 450.0);
    }

    #[test]
    fn test_fresh_bird_is_clear() {
        assert!(!Ground::new().collide(&Bird::new()));
    }

    #[test]
    fn test_fallen_bird_collides() {
        let ground = Ground::new();
        let mut bird = Bird::new();
        for _ in 0..200 {
            bird.update();
        }
        // Clamped to the bottom of the screen, well inside the ground band.
        assert!(ground.collide(&bird));
    }
}
