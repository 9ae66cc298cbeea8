//! Decorative bubbles rising through the water
//!
//! Generated once at startup; the animation itself is CSS.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Layout of one bubble
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    /// Diameter (px), 3-11
    pub size_px: f32,
    /// Horizontal position (%), 0-100
    pub left_pct: f32,
    /// Starting height above the bottom (%), 0-20
    pub bottom_pct: f32,
    /// Rise duration (s), 3-8
    pub duration_s: f32,
    /// Start delay (s), 0-3
    pub delay_s: f32,
}

impl Bubble {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            size_px: 3.0 + rng.random::<f32>() * 8.0,
            left_pct: rng.random::<f32>() * 100.0,
            bottom_pct: rng.random::<f32>() * 20.0,
            duration_s: 3.0 + rng.random::<f32>() * 5.0,
            delay_s: rng.random::<f32>() * 3.0,
        }
    }
}

pub fn generate_bubbles(rng: &mut impl Rng, count: usize) -> Vec<Bubble> {
    (0..count).map(|_| Bubble::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bubble_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        let bubbles = generate_bubbles(&mut rng, 200);
        assert_eq!(bubbles.len(), 200);
        for b in &bubbles {
            assert!((3.0..=11.0).contains(&b.size_px));
            assert!((0.0..=100.0).contains(&b.left_pct));
            assert!((0.0..=20.0).contains(&b.bottom_pct));
            assert!((3.0..=8.0).contains(&b.duration_s));
            assert!((0.0..=3.0).contains(&b.delay_s));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_bubbles(&mut Pcg32::seed_from_u64(4), 20);
        let b = generate_bubbles(&mut Pcg32::seed_from_u64(4), 20);
        assert_eq!(a, b);
    }
}
