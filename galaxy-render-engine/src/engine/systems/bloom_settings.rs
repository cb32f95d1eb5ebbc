use bevy::core_pipeline::bloom::{Bloom, BloomCompositeMode, BloomPrefilter};
use bevy::prelude::*;

use crate::constants::render_settings::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD};

/// Live-tunable bloom values, shared by all GUI front-ends. The bloom pass
/// itself is entirely independent of galaxy regeneration.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct BloomConfig {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            radius: BLOOM_RADIUS,
            threshold: BLOOM_THRESHOLD,
        }
    }
}

impl BloomConfig {
    pub fn to_bloom(&self) -> Bloom {
        Bloom {
            intensity: self.strength,
            low_frequency_boost: self.radius,
            prefilter: BloomPrefilter {
                threshold: self.threshold,
                threshold_softness: 0.1,
            },
            composite_mode: BloomCompositeMode::Additive,
            ..Bloom::default()
        }
    }
}

/// Copy changed bloom settings onto the camera's bloom component.
pub fn apply_bloom_config(config: Res<BloomConfig>, mut query: Query<&mut Bloom>) {
    if !config.is_changed() {
        return;
    }
    for mut bloom in &mut query {
        *bloom = config.to_bloom();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_render_settings() {
        let config = BloomConfig::default();
        assert_eq!(config.strength, 0.6);
        assert_eq!(config.radius, 0.0);
        assert_eq!(config.threshold, 0.0);
    }

    #[test]
    fn conversion_carries_all_fields() {
        let config = BloomConfig {
            strength: 1.5,
            radius: 0.4,
            threshold: 0.85,
        };
        let bloom = config.to_bloom();
        assert_eq!(bloom.intensity, 1.5);
        assert_eq!(bloom.low_frequency_boost, 0.4);
        assert_eq!(bloom.prefilter.threshold, 0.85);
        assert!(matches!(bloom.composite_mode, BloomCompositeMode::Additive));
    }
}
