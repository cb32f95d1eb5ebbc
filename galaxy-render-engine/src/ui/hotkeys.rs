//! Keyboard front-end: digits apply presets, bracket keys pick a field,
//! minus/equals step it, R forces a rebuild.

use bevy::prelude::*;

use crate::engine::loading::preset_loader::PresetLibrary;
use crate::engine::scene::galaxy_cloud::GalaxyConfig;
use crate::engine::systems::bloom_settings::BloomConfig;

use super::schema::{ControlKind, ParamChange, control_schema, numeric_value, spec_for};

/// Index into the numeric entries of the control schema.
#[derive(Resource, Default)]
pub struct HotkeyState {
    pub active_control: usize,
}

fn numeric_fields() -> Vec<super::schema::ParamField> {
    control_schema()
        .iter()
        .filter(|spec| matches!(spec.kind, ControlKind::Numeric { .. }))
        .map(|spec| spec.field)
        .collect()
}

pub fn hotkey_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<HotkeyState>,
    mut changes: EventWriter<ParamChange>,
    mut config: ResMut<GalaxyConfig>,
    bloom: Res<BloomConfig>,
    library: Res<PresetLibrary>,
) {
    // Digits 1-9 apply presets in library order.
    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    for (index, key) in DIGITS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            if let Some(preset) = library.presets.get(index) {
                println!("Applying preset: {}", preset.name);
                changes.write(ParamChange::ApplyPreset {
                    name: preset.name.clone(),
                });
            }
        }
    }

    let fields = numeric_fields();

    // Bracket keys cycle the active control.
    if keyboard.just_pressed(KeyCode::BracketRight) {
        state.active_control = (state.active_control + 1) % fields.len();
        announce(&fields, &state, &config, &bloom);
    }
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        state.active_control = (state.active_control + fields.len() - 1) % fields.len();
        announce(&fields, &state, &config, &bloom);
    }

    // Minus/equals step the active control.
    let field = fields[state.active_control % fields.len()];
    if keyboard.just_pressed(KeyCode::Minus) {
        changes.write(ParamChange::Adjust { field, direction: -1.0 });
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        changes.write(ParamChange::Adjust { field, direction: 1.0 });
    }

    // R rebuilds with fresh entropy without touching parameters.
    if keyboard.just_pressed(KeyCode::KeyR) {
        println!("Regenerating galaxy");
        config.regenerate = true;
    }
}

fn announce(
    fields: &[super::schema::ParamField],
    state: &HotkeyState,
    config: &GalaxyConfig,
    bloom: &BloomConfig,
) {
    let field = fields[state.active_control % fields.len()];
    println!(
        "Active control: {} = {}",
        spec_for(field).label,
        numeric_value(&config.params, bloom, field)
    );
}
