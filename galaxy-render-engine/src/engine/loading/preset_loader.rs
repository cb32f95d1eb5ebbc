use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::Deserialize;

use galaxy_generator::{GalaxyPreset, builtin_presets};

use crate::constants::render_settings::PRESET_MANIFEST_PATH;

/// Optional JSON manifest extending the builtin preset table.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct PresetManifest {
    pub presets: Vec<GalaxyPreset>,
}

/// The presets every GUI front-end offers: builtins first, manifest entries
/// merged on top.
#[derive(Resource)]
pub struct PresetLibrary {
    pub presets: Vec<GalaxyPreset>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self {
            presets: builtin_presets(),
        }
    }
}

/// Manifest entries override same-named builtins, new names append.
pub fn merge_presets(library: &mut Vec<GalaxyPreset>, manifest: Vec<GalaxyPreset>) {
    for preset in manifest {
        if preset.params.validate().is_err() {
            println!("Skipping invalid preset {:?}", preset.name);
            continue;
        }
        match library.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => library.push(preset),
        }
    }
}

#[derive(Resource, Default)]
pub struct PresetLoader {
    handle: Option<Handle<PresetManifest>>,
    loaded: bool,
}

/// Load the preset manifest and fold it into the library once ready.
/// A missing or malformed file leaves the builtin table untouched.
pub fn load_presets_system(
    mut loader: ResMut<PresetLoader>,
    mut library: ResMut<PresetLibrary>,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<PresetManifest>>,
) {
    // Start loading if not already started
    if loader.handle.is_none() {
        println!("Loading preset manifest from: {PRESET_MANIFEST_PATH}");
        loader.handle = Some(asset_server.load(PRESET_MANIFEST_PATH));
        return;
    }

    if loader.loaded {
        return;
    }

    let Some(ref handle) = loader.handle else {
        return;
    };

    if let Some(manifest) = manifests.get(handle) {
        println!("Loaded {} preset(s) from manifest", manifest.presets.len());
        merge_presets(&mut library.presets, manifest.presets.clone());
        loader.loaded = true;
    } else if matches!(asset_server.get_load_state(handle), Some(LoadState::Failed(_))) {
        println!("No preset manifest found, keeping builtin presets");
        loader.loaded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_generator::GalaxyParameters;

    #[test]
    fn merge_overrides_by_name_and_appends_new() {
        let mut library = builtin_presets();
        let original_len = library.len();

        let overridden = GalaxyPreset {
            name: "Nebula".to_string(),
            params: GalaxyParameters {
                count: 42_000,
                ..GalaxyParameters::default()
            },
        };
        let appended = GalaxyPreset {
            name: "Golden Vortex".to_string(),
            params: GalaxyParameters::default(),
        };
        merge_presets(&mut library, vec![overridden.clone(), appended.clone()]);

        assert_eq!(library.len(), original_len + 1);
        assert_eq!(
            galaxy_generator::find(&library, "Nebula").unwrap().params.count,
            42_000
        );
        assert!(galaxy_generator::find(&library, "Golden Vortex").is_some());
    }

    #[test]
    fn merge_drops_invalid_entries() {
        let mut library = builtin_presets();
        let original = library.clone();

        merge_presets(
            &mut library,
            vec![GalaxyPreset {
                name: "Broken".to_string(),
                params: GalaxyParameters {
                    radius: 0.0,
                    ..GalaxyParameters::default()
                },
            }],
        );
        assert_eq!(library, original);
    }

    #[test]
    fn manifest_deserialises_from_preset_json() {
        let json = r##"{
            "presets": [
                { "name": "Golden Vortex", "count": 250000, "size": 0.01,
                  "radius": 6.5, "branches": 2, "spin": 3.0,
                  "randomness": 0.35, "randomnessPower": 3.5,
                  "insideColor": "#ffd700", "outsideColor": "#402000" }
            ]
        }"##;
        let manifest: PresetManifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.presets.len(), 1);
        assert_eq!(manifest.presets[0].params.branches, 2);
        assert_eq!(manifest.presets[0].params.inside_color.to_hex(), "#ffd700");
    }
}
