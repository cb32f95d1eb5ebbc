use serde::{Deserialize, Serialize};

use crate::parameters::{GalaxyParameters, Rgb};

/// A named parameter bundle, applied wholesale followed by one regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyPreset {
    pub name: String,
    #[serde(flatten)]
    pub params: GalaxyParameters,
}

/// The fixed preset table. Manifest files may override entries by name or
/// append new ones on top of these.
pub fn builtin_presets() -> Vec<GalaxyPreset> {
    vec![
        GalaxyPreset {
            name: "Classic Spiral".to_string(),
            params: GalaxyParameters::default(),
        },
        GalaxyPreset {
            name: "Supernova".to_string(),
            params: GalaxyParameters {
                count: 200_000,
                size: 0.02,
                radius: 6.0,
                branches: 12,
                spin: 0.5,
                randomness: 1.2,
                randomness_power: 2.5,
                inside_color: Rgb::new(1.0, 1.0, 0.0),  // #ffff00
                outside_color: Rgb::new(1.0, 0.0, 0.0), // #ff0000
            },
        },
        GalaxyPreset {
            name: "Ghostly".to_string(),
            params: GalaxyParameters {
                count: 150_000,
                size: 0.01,
                radius: 8.0,
                branches: 4,
                spin: 2.0,
                randomness: 1.5,
                randomness_power: 4.0,
                inside_color: Rgb::new(0.0, 1.0, 1.0),  // #00ffff
                outside_color: Rgb::new(1.0, 1.0, 1.0), // #ffffff
            },
        },
        GalaxyPreset {
            name: "Black Hole".to_string(),
            params: GalaxyParameters {
                count: 300_000,
                size: 0.008,
                radius: 4.0,
                branches: 6,
                spin: 4.0,
                randomness: 0.1,
                randomness_power: 5.0,
                inside_color: Rgb::new(0.0, 0.0, 0.0), // #000000
                outside_color: Rgb::new(0x6e as f32 / 255.0, 0x21 as f32 / 255.0, 1.0), // #6e21ff
            },
        },
        GalaxyPreset {
            name: "Nebula".to_string(),
            params: GalaxyParameters {
                count: 200_000,
                size: 0.015,
                radius: 7.0,
                branches: 5,
                spin: 1.0,
                randomness: 2.0,
                randomness_power: 3.0,
                inside_color: Rgb::new(1.0, 0.0, 1.0),  // #ff00ff
                outside_color: Rgb::new(0.0, 0.0, 1.0), // #0000ff
            },
        },
    ]
}

/// Exact-name lookup.
pub fn find<'a>(presets: &'a [GalaxyPreset], name: &str) -> Option<&'a GalaxyPreset> {
    presets.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_builtin_presets_all_valid() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 5);
        for preset in &presets {
            assert!(preset.params.validate().is_ok(), "{} invalid", preset.name);
        }
    }

    #[test]
    fn black_hole_literal_values() {
        let presets = builtin_presets();
        let preset = find(&presets, "Black Hole").unwrap();
        assert_eq!(preset.params.count, 300_000);
        assert_eq!(preset.params.size, 0.008);
        assert_eq!(preset.params.radius, 4.0);
        assert_eq!(preset.params.branches, 6);
        assert_eq!(preset.params.spin, 4.0);
        assert_eq!(preset.params.randomness, 0.1);
        assert_eq!(preset.params.randomness_power, 5.0);
        assert_eq!(preset.params.inside_color.to_hex(), "#000000");
        assert_eq!(preset.params.outside_color.to_hex(), "#6e21ff");
    }

    #[test]
    fn find_is_exact() {
        let presets = builtin_presets();
        assert!(find(&presets, "Nebula").is_some());
        assert!(find(&presets, "nebula").is_none());
        assert!(find(&presets, "Missing").is_none());
    }

    #[test]
    fn preset_serialises_with_flattened_params() {
        let presets = builtin_presets();
        let json = serde_json::to_value(find(&presets, "Supernova").unwrap()).unwrap();
        assert_eq!(json["name"], "Supernova");
        assert_eq!(json["branches"], 12);
        assert_eq!(json["insideColor"], "#ffff00");

        let back: GalaxyPreset = serde_json::from_value(json).unwrap();
        assert_eq!(&back, find(&presets, "Supernova").unwrap());
    }
}
