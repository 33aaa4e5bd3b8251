use rand::Rng;

use crate::constants::game::{
    GAP_TOP_MAX, GAP_TOP_MIN, OSCILLATION_MARGIN, PIPE_GAP, PIPE_VERTICAL_SPEED, PIPE_WIDTH, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
use crate::pages::game::bird::Bird;
use crate::pages::game::object::{Object, Rect};

/// One pipe pair: solid spikes above and below a passable window. The id is
/// assigned at spawn time and is what the session's scored set refers to.
#[derive(Debug)]
pub struct Pipe {
    id: u32,
    x: f32,
    gap_top: f32,
    gap_bottom: f32,
    speed: f32,
    direction: f32,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_top: f32, speed: f32) -> Self {
        Pipe { id, x, gap_top, gap_bottom: gap_top + PIPE_GAP, speed, direction: 1.0 }
    }

    /// New pipe at the right screen edge with a random gap window. The gap
    /// is sampled at whole world units so oscillation arithmetic stays
    /// exact.
    pub fn spawn<R: Rng>(id: u32, speed: f32, rng: &mut R) -> Self {
        let gap_top = rng.gen_range(GAP_TOP_MIN as i32..=GAP_TOP_MAX as i32) as f32;
        Pipe::new(id, SCREEN_WIDTH, gap_top, speed)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_bottom
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// One tick: scroll left, and while oscillating drift the gap window,
    /// reversing at the screen margins. The gap height never changes.
    pub fn update(&mut self, oscillate: bool) {
        self.x -= self.speed;

        if oscillate {
            self.gap_top += PIPE_VERTICAL_SPEED * self.direction;
            let low = OSCILLATION_MARGIN;
            let high = SCREEN_HEIGHT - OSCILLATION_MARGIN - PIPE_GAP;
            if self.gap_top <= low {
                self.gap_top = low;
                self.direction = 1.0;
            } else if self.gap_top >= high {
                self.gap_top = high;
                self.direction = -1.0;
            }
            self.gap_bottom = self.gap_top + PIPE_GAP;
        }
    }

    /// True once the right edge has fully left the screen.
    pub fn off_screen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, PIPE_WIDTH, self.gap_top)
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(self.x, self.gap_bottom, PIPE_WIDTH, SCREEN_HEIGHT - self.gap_bottom)
    }

    /// Any overlap with the solid region outside the gap.
    pub fn collide(&self, bird: &Bird) -> bool {
        let bounds = bird.bounds();
        bounds.intersects(&self.top_rect()) || bounds.intersects(&self.bottom_rect())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_scroll_positions() {
        let mut pipe = Pipe::new(0, SCREEN_WIDTH, 150.0, 3.0);
        for _ in 0..150 {
            pipe.update(false);
        }
        assert_eq!(pipe.x(), 0.0);
        pipe.update(false);
        assert_eq!(pipe.x(), -3.0);
    }

    #[test]
    fn test_off_screen_boundary_tick() {
        let mut pipe = Pipe::new(0, SCREEN_WIDTH, 150.0, 3.0);
        // x = -60 after 170 ticks: the right edge sits exactly on the screen
        // edge, which does not count as off-screen yet.
        for _ in 0..170 {
            pipe.update(false);
        }
        assert_eq!(pipe.x(), -60.0);
        assert!(!pipe.off_screen());
        pipe.update(false);
        assert!(pipe.off_screen());
    }

    #[test]
    fn test_off_screen_is_sticky() {
        let mut pipe = Pipe::new(0, SCREEN_WIDTH, 150.0, 3.0);
        for _ in 0..171 {
            pipe.update(false);
        }
        assert!(pipe.off_screen());
        for _ in 0..100 {
            pipe.update(true);
            assert!(pipe.off_screen());
        }
    }

    #[test]
    fn test_collide_against_gap_window() {
        // Bird box is [200, 300, 30, 20]. A pipe overlapping it horizontally
        // with gap_top = 150 leaves the bird inside the gap.
        let bird = Bird::new();
        let clear = Pipe::new(0, 200.0, 150.0, 3.0);
        assert!(!clear.collide(&bird));

        // gap_top = 310 drops the top spike over the bird.
        let blocking = Pipe::new(1, 200.0, 310.0, 3.0);
        assert!(blocking.collide(&bird));
    }

    #[test]
    fn test_collide_with_bottom_spike() {
        // gap_bottom = 120 + 200 = 320, so the bottom spike starts exactly at
        // the bird's bottom edge; strict overlap needs one more unit.
        let bird = Bird::new();
        let touching = Pipe::new(0, 200.0, 120.0, 3.0);
        assert!(!touching.collide(&bird));

        let overlapping = Pipe::new(1, 200.0, 119.0, 3.0);
        assert!(overlapping.collide(&bird));
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let bird = Bird::new();
        let pipe = Pipe::new(0, 300.0, 310.0, 3.0);
        assert!(!pipe.collide(&bird));
    }

    #[test]
    fn test_gap_height_invariant_while_oscillating() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pipe = Pipe::spawn(0, 0.0, &mut rng);
        for _ in 0..10_000 {
            pipe.update(true);
            assert_eq!(pipe.gap_bottom() - pipe.gap_top(), PIPE_GAP);
            assert!(pipe.gap_top() >= OSCILLATION_MARGIN);
            assert!(pipe.gap_top() <= SCREEN_HEIGHT - OSCILLATION_MARGIN - PIPE_GAP);
        }
    }

    #[test]
    fn test_oscillation_reverses_at_margins() {
        let mut pipe = Pipe::new(0, SCREEN_WIDTH, GAP_TOP_MAX, 0.0);
        // Initial drift is downward; it must bounce off the lower margin and
        // come back up past the spawn position.
        let high = SCREEN_HEIGHT - OSCILLATION_MARGIN - PIPE_GAP;
        for _ in 0..(high - GAP_TOP_MAX) as usize {
            pipe.update(true);
        }
        assert_eq!(pipe.gap_top(), high);
        for _ in 0..100 {
            pipe.update(true);
        }
        assert!(pipe.gap_top() < high);
    }

    #[test]
    fn test_spawn_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for id in 0..500 {
            let pipe = Pipe::spawn(id, 3.0, &mut rng);
            assert_eq!(pipe.x(), SCREEN_WIDTH);
            assert!(pipe.gap_top() >= GAP_TOP_MIN);
            assert!(pipe.gap_top() <= GAP_TOP_MAX);
            assert_eq!(pipe.gap_bottom() - pipe.gap_top(), PIPE_GAP);
        }
    }
}
