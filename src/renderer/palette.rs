//! Colours for the standard and high-contrast looks

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Linear mix of `a` toward `b` by `t` in [0, 1]
pub fn blend(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 * (1.0 - t) + y as f32 * t).round() as u8;
    Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: Rgb,
    pub back_cloud: Rgb,
    pub front_cloud: Rgb,
    pub player: Rgb,
    pub shield: Rgb,
    pub explosion_hot: Rgb,
    pub explosion_cool: Rgb,
    pub balloon: Rgb,
    pub missile: Rgb,
    pub missile_sine: Rgb,
    pub missile_boost: Rgb,
    /// HUD text and borders
    pub text: Rgb,
    pub accent: Rgb,
    pub dim: Rgb,
    pub panel: Rgb,
}

impl Palette {
    pub fn standard() -> Self {
        Self {
            sky: Rgb(135, 206, 250),
            back_cloud: Rgb(225, 232, 240),
            front_cloud: Rgb(255, 255, 255),
            player: Rgb(40, 40, 60),
            shield: Rgb(0, 170, 255),
            explosion_hot: Rgb(255, 200, 40),
            explosion_cool: Rgb(220, 60, 30),
            balloon: Rgb(220, 30, 60),
            missile: Rgb(90, 90, 100),
            missile_sine: Rgb(150, 60, 180),
            missile_boost: Rgb(200, 40, 20),
            text: Rgb(240, 240, 240),
            accent: Rgb(255, 215, 0),
            dim: Rgb(140, 140, 160),
            panel: Rgb(15, 15, 25),
        }
    }

    /// Black sky, white sprites, no subtle shades
    pub fn high_contrast() -> Self {
        let white = Rgb(255, 255, 255);
        Self {
            sky: Rgb(0, 0, 0),
            back_cloud: Rgb(60, 60, 60),
            front_cloud: Rgb(90, 90, 90),
            player: white,
            shield: Rgb(0, 255, 255),
            explosion_hot: Rgb(255, 255, 0),
            explosion_cool: white,
            balloon: Rgb(255, 0, 0),
            missile: white,
            missile_sine: Rgb(255, 0, 255),
            missile_boost: Rgb(255, 255, 0),
            text: white,
            accent: Rgb(255, 255, 0),
            dim: white,
            panel: Rgb(0, 0, 0),
        }
    }

    pub fn for_settings(high_contrast: bool) -> Self {
        if high_contrast {
            Self::high_contrast()
        } else {
            Self::standard()
        }
    }
}
