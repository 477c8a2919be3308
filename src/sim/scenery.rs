//! Clouds and balloons
//!
//! Both drift leftward in a straight line. Clouds are decoration split into
//! two layers; balloons rise as they drift and can be collected for score.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Which side of the player a cloud is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudLayer {
    /// Slower, drawn behind the player
    Back,
    /// Drawn translucent in front of the player
    Front,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub rect: Rect,
    pub speed: f32,
    pub layer: CloudLayer,
}

impl Cloud {
    /// A cloud of random size entering from the right edge at a random height
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let scale = rng.random_range(2..=10) as f32 / 10.0;
        let size = Vec2::new(CLOUD_BASE_SIZE.0, CLOUD_BASE_SIZE.1) * scale;
        let y = rng.random_range(0..=FIELD_HEIGHT as u32) as f32;
        let (layer, speed) = if rng.random_bool(0.5) {
            (CloudLayer::Back, (CLOUD_SPEED * 0.5).floor())
        } else {
            (CloudLayer::Front, CLOUD_SPEED)
        };
        Self {
            rect: Rect {
                pos: Vec2::new(FIELD_WIDTH, y),
                size,
            },
            speed,
            layer,
        }
    }

    /// A cloud placed anywhere on the field (used to fill the sky at game start)
    pub fn spawn_scattered<R: Rng>(rng: &mut R) -> Self {
        let mut cloud = Self::spawn(rng);
        cloud.rect.pos = Vec2::new(
            rng.random_range(0..=FIELD_WIDTH as u32) as f32,
            rng.random_range(0..=FIELD_HEIGHT as u32) as f32,
        );
        cloud
    }

    /// Advance one frame. Returns false once off the left edge.
    pub fn update(&mut self) -> bool {
        self.rect.translate(Vec2::new(-self.speed, 0.0));
        self.rect.right() >= 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub rect: Rect,
}

impl Balloon {
    /// A balloon entering from the right edge, somewhere in the lower three quarters
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let lowest = FIELD_HEIGHT as u32;
        let y = rng.random_range(lowest / 4..=lowest) as f32;
        Self {
            rect: Rect::new(FIELD_WIDTH, y, BALLOON_SIZE.0, BALLOON_SIZE.1),
        }
    }

    /// Advance one frame. Returns false once it has floated off the top.
    pub fn update(&mut self) -> bool {
        self.rect
            .translate(Vec2::new(-CLOUD_SPEED, -BALLOON_RISE_SPEED));
        self.rect.bottom() >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_cloud_layers() {
        let mut rng = Pcg32::seed_from_u64(11);
        let clouds: Vec<Cloud> = (0..200).map(|_| Cloud::spawn(&mut rng)).collect();
        assert!(clouds.iter().any(|c| c.layer == CloudLayer::Back));
        assert!(clouds.iter().any(|c| c.layer == CloudLayer::Front));
        for c in &clouds {
            match c.layer {
                CloudLayer::Back => assert_eq!(c.speed, 2.0),
                CloudLayer::Front => assert_eq!(c.speed, CLOUD_SPEED),
            }
            assert_eq!(c.rect.left(), FIELD_WIDTH);
            assert!(c.rect.size.x >= 70.0 - 1e-3 && c.rect.size.x <= 350.0 + 1e-3);
        }
    }

    #[test]
    fn test_cloud_leaves_left_edge() {
        let mut cloud = Cloud {
            rect: Rect::new(0.0, 100.0, 10.0, 10.0),
            speed: 4.0,
            layer: CloudLayer::Front,
        };
        assert!(cloud.update());
        assert!(cloud.update());
        assert!(!cloud.update());
    }

    #[test]
    fn test_balloon_rises_and_drifts() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut balloon = Balloon::spawn(&mut rng);
        assert!(balloon.rect.top() >= FIELD_HEIGHT / 4.0);
        let start = balloon.rect.pos;
        assert!(balloon.update());
        assert_eq!(balloon.rect.pos - start, Vec2::new(-CLOUD_SPEED, -BALLOON_RISE_SPEED));

        let mut frames = 0;
        while balloon.update() {
            frames += 1;
            assert!(frames < 300);
        }
        assert!(balloon.rect.bottom() < 0.0);
    }
}
