use std::time::SystemTime;

use rand::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{StatefulWidget, Widget},
};

use crate::{components::sprite::Sprite, constants::background};

#[derive(Debug, Clone)]
struct Cloud {
    x: f32,
    y: u16,
    kind: usize,
}

/// Scattered clouds drifting across the upper half of the sky. Purely
/// cosmetic; advances with the render clock, not the simulation tick.
#[derive(Debug)]
pub struct BackgroundState {
    speed: f32, // cells per second of leftward drift
    density: f32,
    last_time: SystemTime,
    clouds: Vec<Cloud>,
    width: u16,
    height: u16,
}

impl BackgroundState {
    pub fn new(speed: f32, density: f32) -> Self {
        Self { speed, density, last_time: SystemTime::now(), clouds: Vec::new(), width: 0, height: 0 }
    }

    fn get_delta_time(&self, now: SystemTime) -> f32 {
        now.duration_since(self.last_time).unwrap_or_default().as_secs_f32()
    }

    fn sky_rows(area: Rect) -> u16 {
        (area.height / 2).max(1)
    }

    fn reseed(&mut self, area: Rect) {
        let mut rng = thread_rng();
        let count = (area.width as f32 * self.density / 100.0).ceil() as usize;
        self.clouds = (0..count)
            .map(|_| Cloud {
                x: rng.gen_range(0.0..area.width.max(1) as f32),
                y: rng.gen_range(0..Self::sky_rows(area)),
                kind: rng.gen_range(0..background::CLOUD_TEXTS.len()),
            })
            .collect();
        self.width = area.width;
        self.height = area.height;
    }

    fn update(&mut self, area: Rect) {
        if area.width != self.width || area.height != self.height {
            self.reseed(area);
        }

        let now = SystemTime::now();
        let dt = self.get_delta_time(now);
        self.last_time = now;

        let mut rng = thread_rng();
        for cloud in self.clouds.iter_mut() {
            cloud.x -= self.speed * dt;
            if cloud.x < -12.0 {
                cloud.x = area.width as f32;
                cloud.y = rng.gen_range(0..Self::sky_rows(area));
                cloud.kind = rng.gen_range(0..background::CLOUD_TEXTS.len());
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Background;

impl Background {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatefulWidget for Background {
    type State = BackgroundState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut BackgroundState)
    where
        Self: Sized,
    {
        state.update(area);

        for cloud in &state.clouds {
            if cloud.x < 0.0 {
                continue;
            }
            let sprite = Sprite::from_text(background::CLOUD_TEXTS[cloud.kind])
                .style(Style::default().fg(Color::Gray))
                .transparent(true);
            let (width, height) = sprite.size();
            let cloud_area =
                Rect { x: area.x + cloud.x as u16, y: area.y + cloud.y, width, height }.intersection(area);
            sprite.render(cloud_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_scales_with_width() {
        let mut state = BackgroundState::new(background::CLOUD_SPEED, background::CLOUD_DENSITY);
        state.update(Rect::new(0, 0, 100, 40));
        assert_eq!(state.clouds.len(), background::CLOUD_DENSITY.ceil() as usize);
        for cloud in &state.clouds {
            assert!(cloud.y < 20);
        }
    }
}
