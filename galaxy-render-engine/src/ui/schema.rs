//! Declarative control schema shared by the GUI front-ends.
//!
//! Every adapter (panel, hotkeys, web RPC) renders or maps controls from
//! the same [`ControlSpec`] list and communicates exclusively through
//! [`ParamChange`] events, so generation logic exists exactly once.

use bevy::prelude::*;

use galaxy_generator::{GalaxyParameters, Rgb};

use crate::engine::systems::bloom_settings::BloomConfig;

/// Every field a front-end can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
    BloomStrength,
    BloomRadius,
    BloomThreshold,
}

impl ParamField {
    /// RPC wire name, matching the serialised parameter keys.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ParamField::Count => "count",
            ParamField::Size => "size",
            ParamField::Radius => "radius",
            ParamField::Branches => "branches",
            ParamField::Spin => "spin",
            ParamField::Randomness => "randomness",
            ParamField::RandomnessPower => "randomnessPower",
            ParamField::InsideColor => "insideColor",
            ParamField::OutsideColor => "outsideColor",
            ParamField::BloomStrength => "bloomStrength",
            ParamField::BloomRadius => "bloomRadius",
            ParamField::BloomThreshold => "bloomThreshold",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        control_schema()
            .iter()
            .map(|spec| spec.field)
            .find(|field| field.wire_name() == name)
    }

    /// Whether editing this field requires rebuilding the point cloud.
    /// Size and bloom only touch uniforms and the post-processing pass.
    pub fn affects_geometry(&self) -> bool {
        !matches!(
            self,
            ParamField::Size
                | ParamField::BloomStrength
                | ParamField::BloomRadius
                | ParamField::BloomThreshold
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    Numeric { min: f32, max: f32, step: f32 },
    Colour,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSpec {
    pub field: ParamField,
    pub label: &'static str,
    pub kind: ControlKind,
}

/// The full control layout. Steps are sized for discrete +/- controls;
/// the RPC bridge shares the same ranges for absolute sets.
pub fn control_schema() -> &'static [ControlSpec] {
    const SCHEMA: &[ControlSpec] = &[
        ControlSpec {
            field: ParamField::Count,
            label: "Count",
            kind: ControlKind::Numeric { min: 100.0, max: 1_000_000.0, step: 10_000.0 },
        },
        ControlSpec {
            field: ParamField::Size,
            label: "Size",
            kind: ControlKind::Numeric { min: 0.001, max: 0.1, step: 0.001 },
        },
        ControlSpec {
            field: ParamField::Radius,
            label: "Radius",
            kind: ControlKind::Numeric { min: 0.01, max: 20.0, step: 0.25 },
        },
        ControlSpec {
            field: ParamField::Branches,
            label: "Branches",
            kind: ControlKind::Numeric { min: 2.0, max: 20.0, step: 1.0 },
        },
        ControlSpec {
            field: ParamField::Spin,
            label: "Spin",
            kind: ControlKind::Numeric { min: -5.0, max: 5.0, step: 0.25 },
        },
        ControlSpec {
            field: ParamField::Randomness,
            label: "Randomness",
            kind: ControlKind::Numeric { min: 0.0, max: 2.0, step: 0.05 },
        },
        ControlSpec {
            field: ParamField::RandomnessPower,
            label: "Randomness Power",
            kind: ControlKind::Numeric { min: 1.0, max: 10.0, step: 0.25 },
        },
        ControlSpec {
            field: ParamField::InsideColor,
            label: "Inside Colour",
            kind: ControlKind::Colour,
        },
        ControlSpec {
            field: ParamField::OutsideColor,
            label: "Outside Colour",
            kind: ControlKind::Colour,
        },
        ControlSpec {
            field: ParamField::BloomStrength,
            label: "Bloom Strength",
            kind: ControlKind::Numeric { min: 0.0, max: 3.0, step: 0.05 },
        },
        ControlSpec {
            field: ParamField::BloomRadius,
            label: "Bloom Radius",
            kind: ControlKind::Numeric { min: 0.0, max: 1.0, step: 0.05 },
        },
        ControlSpec {
            field: ParamField::BloomThreshold,
            label: "Bloom Threshold",
            kind: ControlKind::Numeric { min: 0.0, max: 1.0, step: 0.05 },
        },
    ];
    SCHEMA
}

pub fn spec_for(field: ParamField) -> &'static ControlSpec {
    control_schema()
        .iter()
        .find(|spec| spec.field == field)
        .expect("every field has a control spec")
}

/// A single edit emitted by any GUI adapter.
#[derive(Event, Debug, Clone)]
pub enum ParamChange {
    /// Step a numeric field by `direction` times its schema step.
    Adjust { field: ParamField, direction: f32 },
    /// Set a numeric field to an absolute value (clamped to schema range).
    Set { field: ParamField, value: f32 },
    /// Set one of the two colour fields.
    SetColour { field: ParamField, colour: Rgb },
    /// Apply a named preset wholesale, then regenerate once.
    ApplyPreset { name: String },
}

/// Read a numeric field's current value.
pub fn numeric_value(params: &GalaxyParameters, bloom: &BloomConfig, field: ParamField) -> f32 {
    match field {
        ParamField::Count => params.count as f32,
        ParamField::Size => params.size,
        ParamField::Radius => params.radius,
        ParamField::Branches => params.branches as f32,
        ParamField::Spin => params.spin,
        ParamField::Randomness => params.randomness,
        ParamField::RandomnessPower => params.randomness_power,
        ParamField::BloomStrength => bloom.strength,
        ParamField::BloomRadius => bloom.radius,
        ParamField::BloomThreshold => bloom.threshold,
        ParamField::InsideColor | ParamField::OutsideColor => 0.0,
    }
}

fn set_numeric(params: &mut GalaxyParameters, bloom: &mut BloomConfig, field: ParamField, value: f32) {
    match field {
        ParamField::Count => params.count = value.round() as usize,
        ParamField::Size => params.size = value,
        ParamField::Radius => params.radius = value,
        ParamField::Branches => params.branches = value.round() as u32,
        ParamField::Spin => params.spin = value,
        ParamField::Randomness => params.randomness = value,
        ParamField::RandomnessPower => params.randomness_power = value,
        ParamField::BloomStrength => bloom.strength = value,
        ParamField::BloomRadius => bloom.radius = value,
        ParamField::BloomThreshold => bloom.threshold = value,
        ParamField::InsideColor | ParamField::OutsideColor => {}
    }
}

/// Apply one change to the owned configuration. Returns whether the galaxy
/// geometry must be regenerated. Numeric values are clamped to the schema
/// range, so adapter input can never produce an invalid parameter set.
pub fn apply_change(
    params: &mut GalaxyParameters,
    bloom: &mut BloomConfig,
    presets: &[galaxy_generator::GalaxyPreset],
    change: &ParamChange,
) -> bool {
    match change {
        ParamChange::Adjust { field, direction } => {
            let ControlKind::Numeric { min, max, step } = spec_for(*field).kind else {
                return false;
            };
            let current = numeric_value(params, bloom, *field);
            set_numeric(params, bloom, *field, (current + direction * step).clamp(min, max));
            field.affects_geometry()
        }
        ParamChange::Set { field, value } => {
            let ControlKind::Numeric { min, max, .. } = spec_for(*field).kind else {
                return false;
            };
            if !value.is_finite() {
                return false;
            }
            set_numeric(params, bloom, *field, value.clamp(min, max));
            field.affects_geometry()
        }
        ParamChange::SetColour { field, colour } => match field {
            ParamField::InsideColor => {
                params.inside_color = *colour;
                true
            }
            ParamField::OutsideColor => {
                params.outside_color = *colour;
                true
            }
            _ => false,
        },
        ParamChange::ApplyPreset { name } => match galaxy_generator::find(presets, name) {
            Some(preset) => {
                *params = preset.params.clone();
                true
            }
            None => {
                println!("Unknown preset {name:?}");
                false
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_generator::builtin_presets;

    #[test]
    fn schema_covers_every_field_once() {
        let schema = control_schema();
        assert_eq!(schema.len(), 12);
        for (i, spec) in schema.iter().enumerate() {
            assert!(
                !schema[i + 1..].iter().any(|other| other.field == spec.field),
                "duplicate spec for {:?}",
                spec.field
            );
            assert_eq!(ParamField::from_wire_name(spec.field.wire_name()), Some(spec.field));
        }
    }

    #[test]
    fn adjust_steps_and_clamps() {
        let mut params = GalaxyParameters::default();
        let mut bloom = BloomConfig::default();
        let presets = builtin_presets();

        let dirty = apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::Adjust { field: ParamField::Radius, direction: 2.0 },
        );
        assert!(dirty);
        assert_eq!(params.radius, 5.5);

        for _ in 0..200 {
            apply_change(
                &mut params,
                &mut bloom,
                &presets,
                &ParamChange::Adjust { field: ParamField::Radius, direction: 1.0 },
            );
        }
        assert_eq!(params.radius, 20.0);
    }

    #[test]
    fn set_clamps_to_schema_range_and_rejects_non_finite() {
        let mut params = GalaxyParameters::default();
        let mut bloom = BloomConfig::default();
        let presets = builtin_presets();

        apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::Set { field: ParamField::Count, value: 5_000_000.0 },
        );
        assert_eq!(params.count, 1_000_000);

        let dirty = apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::Set { field: ParamField::Radius, value: f32::NAN },
        );
        assert!(!dirty);
        assert_eq!(params.radius, 5.0);
    }

    #[test]
    fn size_and_bloom_edits_do_not_mark_geometry_dirty() {
        let mut params = GalaxyParameters::default();
        let mut bloom = BloomConfig::default();
        let presets = builtin_presets();

        assert!(!apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::Set { field: ParamField::Size, value: 0.02 },
        ));
        assert!(!apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::Set { field: ParamField::BloomStrength, value: 1.0 },
        ));
        assert_eq!(params.size, 0.02);
        assert_eq!(bloom.strength, 1.0);
    }

    #[test]
    fn colour_edits_mark_geometry_dirty() {
        let mut params = GalaxyParameters::default();
        let mut bloom = BloomConfig::default();
        let presets = builtin_presets();

        let red = Rgb::new(1.0, 0.0, 0.0);
        assert!(apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::SetColour { field: ParamField::InsideColor, colour: red },
        ));
        assert_eq!(params.inside_color, red);
    }

    #[test]
    fn preset_application_replaces_params_wholesale() {
        let mut params = GalaxyParameters::default();
        let mut bloom = BloomConfig::default();
        let presets = builtin_presets();

        let dirty = apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::ApplyPreset { name: "Black Hole".to_string() },
        );
        assert!(dirty);
        assert_eq!(params.count, 300_000);
        assert_eq!(params.branches, 6);

        assert!(!apply_change(
            &mut params,
            &mut bloom,
            &presets,
            &ParamChange::ApplyPreset { name: "Missing".to_string() },
        ));
    }
}
