//! Ambient-light tint.
//!
//! Sprites darken as the room gets darker than neutral lighting.

use arniegeddon_core::constants::NEUTRAL_LIGHT_INTENSITY;

/// Blend factor toward black: 0 at or above neutral intensity, 1 in darkness.
pub fn blend_factor(ambient_intensity: f32) -> f32 {
    let intensity = ambient_intensity.clamp(0.0, NEUTRAL_LIGHT_INTENSITY);
    1.0 - intensity / NEUTRAL_LIGHT_INTENSITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_factor() {
        assert_eq!(blend_factor(1000.0), 0.0);
        assert_eq!(blend_factor(2500.0), 0.0);
        assert_eq!(blend_factor(0.0), 1.0);
        assert!((blend_factor(250.0) - 0.75).abs() < 1e-6);
        assert_eq!(blend_factor(-5.0), 1.0);
    }
}
