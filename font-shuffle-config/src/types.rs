//! Core enums and color type shared across the effect.

use serde::{Deserialize, Serialize};

/// Policy selecting which candidate font list feeds the sequencer and how
/// the slot index maps to a font.
///
/// Sequential modes walk the list in order (`slot % len`); `Random` maps the
/// slot through a seeded hash so the same slot always reproduces the same
/// font for a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// Full catalog, sequential traversal.
    #[default]
    Auto,
    /// Full catalog, seeded-random slot mapping.
    Random,
    /// User-selected fonts only.
    Selected,
    /// Favorited fonts only.
    Favorites,
    /// Japanese-classified fonts only.
    Japanese,
    /// English/Latin-classified fonts only.
    English,
    /// User-ordered list, traversed in the user's order.
    Ordered,
}

impl ShuffleMode {
    /// Whether this mode maps slots through the seeded RNG rather than
    /// sequential modular indexing.
    pub fn is_random(self) -> bool {
        matches!(self, ShuffleMode::Random)
    }
}

/// Horizontal text alignment.
///
/// `Center` renders through a bounded layout; `Left` and `Right` switch to
/// unbounded layout with origin offsets computed from measured text metrics
/// so long lines are not clipped by the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Convert to normalized f32 components in RGBA order.
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_mode_serde_round_trip() {
        let json = serde_json::to_string(&ShuffleMode::Favorites).unwrap();
        assert_eq!(json, "\"favorites\"");
        let back: ShuffleMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ShuffleMode::Favorites);
    }

    #[test]
    fn rgba_f32_conversion() {
        let c = Rgba::new(255, 0, 128, 255);
        let f = c.to_f32();
        assert_eq!(f[0], 1.0);
        assert_eq!(f[1], 0.0);
        assert!((f[2] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(f[3], 1.0);
    }

    #[test]
    fn only_random_mode_is_random() {
        assert!(ShuffleMode::Random.is_random());
        assert!(!ShuffleMode::Auto.is_random());
        assert!(!ShuffleMode::Ordered.is_random());
    }
}
