//! Level table
//!
//! Twenty fixed difficulty tiers. Each tier raises the number of obstacle rows,
//! speeds obstacles up and shifts the obstacle colour around the hue wheel.
//! Progression is driven by the cumulative obstacles-passed counter.

use serde::Serialize;

/// Number of levels in the table
pub const LEVEL_COUNT: usize = 20;

/// A single level definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    /// 0-based position in the table
    pub index: usize,
    /// Cumulative obstacles passed required to clear this level
    pub pass_threshold: u32,
    /// Number of obstacles on the lane
    pub rows: usize,
    /// Multiplier applied to the obstacle base speed
    pub speed_multiplier: f32,
    /// Obstacle colour hue (degrees, full saturation, 50% lightness)
    pub hue: f32,
}

impl Level {
    const fn build(index: usize) -> Self {
        Self {
            index,
            pass_threshold: 5 * (index as u32 + 1),
            rows: 5 + index,
            speed_multiplier: 1.0 + 0.05 * index as f32,
            hue: 18.0 * index as f32,
        }
    }

    /// Human-facing level number (1-based)
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// True for the last entry of the table
    pub fn is_final(&self) -> bool {
        self.index + 1 == LEVEL_COUNT
    }

    /// CSS colour string, e.g. `hsl(36, 100%, 50%)`
    pub fn css_color(&self) -> String {
        format!("hsl({}, 100%, 50%)", self.hue)
    }

    /// Linear RGB triple (0-1) of the level colour
    pub fn rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.hue, 1.0, 0.5)
    }
}

const fn build_table() -> [Level; LEVEL_COUNT] {
    let mut table = [Level::build(0); LEVEL_COUNT];
    let mut i = 1;
    while i < LEVEL_COUNT {
        table[i] = Level::build(i);
        i += 1;
    }
    table
}

/// The full level table, fixed at compile time
pub static LEVELS: [Level; LEVEL_COUNT] = build_table();

/// Look up a level, clamping past-the-end indices to the final level
pub fn level(index: usize) -> &'static Level {
    &LEVELS[index.min(LEVEL_COUNT - 1)]
}

/// Standard HSL -> RGB conversion (h in degrees, s/l in 0-1)
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(LEVELS.len(), 20);
        assert_eq!(LEVELS[0].pass_threshold, 5);
        assert_eq!(LEVELS[0].rows, 5);
        assert_eq!(LEVELS[19].pass_threshold, 100);
        assert_eq!(LEVELS[19].rows, 24);
        assert!((LEVELS[19].speed_multiplier - 1.95).abs() < 1e-5);
        assert!(LEVELS[19].is_final());
        assert!(!LEVELS[18].is_final());
    }

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].pass_threshold > pair[0].pass_threshold);
            assert!(pair[1].speed_multiplier > pair[0].speed_multiplier);
        }
    }

    #[test]
    fn test_level_lookup_clamps() {
        assert_eq!(level(3).index, 3);
        assert_eq!(level(42).index, LEVEL_COUNT - 1);
    }

    #[test]
    fn test_colors() {
        assert_eq!(LEVELS[1].css_color(), "hsl(18, 100%, 50%)");
        // Hue 0 is pure red
        let [r, g, b] = LEVELS[0].rgb();
        assert!((r - 1.0).abs() < 1e-5 && g.abs() < 1e-5 && b.abs() < 1e-5);
        // Hue 180 (level 11) is cyan
        let [r, g, b] = LEVELS[10].rgb();
        assert!(r.abs() < 1e-5 && (g - 1.0).abs() < 1e-5 && (b - 1.0).abs() < 1e-5);
    }
}
