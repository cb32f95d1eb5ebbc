//! In-engine control panel built from the shared schema.
//!
//! One labelled row per control: numeric rows get -/+ step buttons and a
//! live value readout, colour rows a swatch palette, plus one button per
//! preset. The panel only emits [`ParamChange`] events; value labels are
//! refreshed from the configuration resources so edits made by the other
//! front-ends show up here too.

use bevy::prelude::*;

use galaxy_generator::Rgb;

use crate::engine::loading::preset_loader::PresetLibrary;
use crate::engine::scene::galaxy_cloud::GalaxyConfig;
use crate::engine::systems::bloom_settings::BloomConfig;

use super::schema::{ControlKind, ControlSpec, ParamChange, ParamField, control_schema, numeric_value};

#[derive(Component)]
pub struct ControlPanelRoot;

#[derive(Component)]
pub struct StepButton {
    pub field: ParamField,
    pub direction: f32,
}

#[derive(Component)]
pub struct ValueText(pub ParamField);

#[derive(Component)]
pub struct SwatchButton {
    pub field: ParamField,
    pub colour: Rgb,
}

#[derive(Component)]
pub struct PresetButton(pub String);

/// Container the preset buttons are rebuilt under whenever the library
/// changes, so manifest presets merged after startup get buttons too.
#[derive(Component)]
pub struct PresetSection;

const PANEL_BG: Color = Color::srgb(0.10, 0.11, 0.13);
const SECTION_BG: Color = Color::srgb(0.14, 0.16, 0.20);
const BUTTON_BG: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_BG_HOVER: Color = Color::srgb(0.30, 0.33, 0.38);

/// Swatch palette offered for the two colour fields.
const SWATCHES: &[(&str, Rgb)] = &[
    ("#ff6030", Rgb::new(1.0, 0.376, 0.188)),
    ("#ffff00", Rgb::new(1.0, 1.0, 0.0)),
    ("#00ffff", Rgb::new(0.0, 1.0, 1.0)),
    ("#ff00ff", Rgb::new(1.0, 0.0, 1.0)),
    ("#1b3984", Rgb::new(0.106, 0.224, 0.518)),
    ("#6e21ff", Rgb::new(0.431, 0.129, 1.0)),
    ("#ffffff", Rgb::new(1.0, 1.0, 1.0)),
    ("#000000", Rgb::new(0.0, 0.0, 0.0)),
];

// Spawns the control panel with one row per schema entry plus the presets
pub fn spawn_control_panel(mut commands: Commands) {
    commands
        .spawn((
            ControlPanelRoot,
            Name::new("GalaxyControlPanel"),
            BackgroundColor(PANEL_BG),
            Node {
                width: Val::Px(320.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                row_gap: Val::Px(4.0),
                padding: UiRect::all(Val::Px(8.0)),
                overflow: Overflow::clip_y(),
                ..default()
            },
        ))
        .with_children(|parent| {
            spawn_section_title(parent, "Galaxy Generator");

            for spec in control_schema() {
                match spec.kind {
                    ControlKind::Numeric { .. } => spawn_numeric_row(parent, spec),
                    ControlKind::Colour => spawn_colour_row(parent, spec),
                }
            }

            spawn_section_title(parent, "Presets");
            parent.spawn((
                PresetSection,
                Node {
                    width: Val::Percent(100.0),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
            ));
        });
}

/// Rebuild the preset buttons whenever the library changes. Runs once right
/// after startup for the builtins and again when a manifest merges in.
pub fn refresh_preset_buttons(
    library: Res<PresetLibrary>,
    section: Query<Entity, With<PresetSection>>,
    buttons: Query<Entity, With<PresetButton>>,
    mut commands: Commands,
) {
    if !library.is_changed() {
        return;
    }
    let Ok(section) = section.single() else {
        return;
    };
    for button in &buttons {
        commands.entity(button).despawn();
    }
    commands.entity(section).with_children(|parent| {
        for preset in &library.presets {
            spawn_preset_button(parent, &preset.name);
        }
    });
}

fn spawn_section_title(parent: &mut ChildSpawnerCommands, title: &str) {
    parent
        .spawn((
            Name::new(format!("Section:{title}")),
            BackgroundColor(SECTION_BG),
            Node {
                width: Val::Percent(100.0),
                padding: UiRect::axes(Val::Px(8.0), Val::Px(6.0)),
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            },
        ))
        .with_children(|header| {
            header.spawn((
                Text::new(title),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

fn spawn_numeric_row(parent: &mut ChildSpawnerCommands, spec: &ControlSpec) {
    parent
        .spawn((
            Name::new(format!("Row:{}", spec.label)),
            Node {
                width: Val::Percent(100.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                column_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(spec.label),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::srgb(0.8, 0.82, 0.86)),
                Node {
                    width: Val::Px(130.0),
                    ..default()
                },
            ));

            spawn_step_button(row, spec.field, -1.0, "-");

            row.spawn((
                ValueText(spec.field),
                Text::new("-"),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::WHITE),
                Node {
                    width: Val::Px(70.0),
                    ..default()
                },
            ));

            spawn_step_button(row, spec.field, 1.0, "+");
        });
}

fn spawn_step_button(row: &mut ChildSpawnerCommands, field: ParamField, direction: f32, label: &str) {
    row.spawn((
        StepButton { field, direction },
        Button,
        BackgroundColor(BUTTON_BG),
        BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
        Node {
            width: Val::Px(22.0),
            height: Val::Px(22.0),
            display: Display::Flex,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
    ))
    .with_children(|btn| {
        btn.spawn((
            Text::new(label),
            TextFont { font_size: 14.0, ..default() },
            TextColor(Color::WHITE),
        ));
    });
}

fn spawn_colour_row(parent: &mut ChildSpawnerCommands, spec: &ControlSpec) {
    parent
        .spawn((
            Name::new(format!("Row:{}", spec.label)),
            Node {
                width: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(3.0),
                ..default()
            },
        ))
        .with_children(|row| {
            row.spawn((
                Text::new(spec.label),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::srgb(0.8, 0.82, 0.86)),
            ));

            row.spawn(Node {
                display: Display::Flex,
                column_gap: Val::Px(4.0),
                ..default()
            })
            .with_children(|swatches| {
                for (name, colour) in SWATCHES {
                    swatches.spawn((
                        SwatchButton { field: spec.field, colour: *colour },
                        Name::new(format!("Swatch:{name}")),
                        Button,
                        BackgroundColor(Color::srgb(colour.r, colour.g, colour.b)),
                        BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
                        Node {
                            width: Val::Px(20.0),
                            height: Val::Px(20.0),
                            border: UiRect::all(Val::Px(1.0)),
                            ..default()
                        },
                    ));
                }
            });
        });
}

fn spawn_preset_button(parent: &mut ChildSpawnerCommands, name: &str) {
    parent
        .spawn((
            PresetButton(name.to_string()),
            Button,
            BackgroundColor(BUTTON_BG),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(26.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(name),
                TextFont { font_size: 13.0, ..default() },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn handle_step_buttons(
    mut interactions: Query<
        (&Interaction, &StepButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut changes: EventWriter<ParamChange>,
) {
    for (interaction, button, mut background) in &mut interactions {
        match interaction {
            Interaction::Pressed => {
                changes.write(ParamChange::Adjust {
                    field: button.field,
                    direction: button.direction,
                });
            }
            Interaction::Hovered => *background = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *background = BackgroundColor(BUTTON_BG),
        }
    }
}

pub fn handle_swatch_buttons(
    interactions: Query<(&Interaction, &SwatchButton), (Changed<Interaction>, With<Button>)>,
    mut changes: EventWriter<ParamChange>,
) {
    for (interaction, swatch) in &interactions {
        if *interaction == Interaction::Pressed {
            changes.write(ParamChange::SetColour {
                field: swatch.field,
                colour: swatch.colour,
            });
        }
    }
}

pub fn handle_preset_buttons(
    mut interactions: Query<
        (&Interaction, &PresetButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut changes: EventWriter<ParamChange>,
) {
    for (interaction, button, mut background) in &mut interactions {
        match interaction {
            Interaction::Pressed => {
                changes.write(ParamChange::ApplyPreset {
                    name: button.0.clone(),
                });
            }
            Interaction::Hovered => *background = BackgroundColor(BUTTON_BG_HOVER),
            Interaction::None => *background = BackgroundColor(BUTTON_BG),
        }
    }
}

/// Mirror the configuration back into the value labels whenever any
/// front-end edits it.
pub fn update_value_labels(
    config: Res<GalaxyConfig>,
    bloom: Res<BloomConfig>,
    mut labels: Query<(&ValueText, &mut Text)>,
) {
    if !config.is_changed() && !bloom.is_changed() {
        return;
    }
    for (value_text, mut text) in &mut labels {
        text.0 = format_value(&config, &bloom, value_text.0);
    }
}

fn format_value(config: &GalaxyConfig, bloom: &BloomConfig, field: ParamField) -> String {
    match field {
        ParamField::Count => format!("{}", config.params.count),
        ParamField::Branches => format!("{}", config.params.branches),
        _ => format!("{:.3}", numeric_value(&config.params, bloom, field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::preset_loader::merge_presets;
    use galaxy_generator::{GalaxyParameters, GalaxyPreset};

    fn button_names(app: &mut App) -> Vec<String> {
        app.world_mut()
            .query::<&PresetButton>()
            .iter(app.world())
            .map(|button| button.0.clone())
            .collect()
    }

    #[test]
    fn preset_buttons_follow_library_changes() {
        let mut app = App::new();
        app.init_resource::<PresetLibrary>();
        app.add_systems(Update, refresh_preset_buttons);
        app.world_mut().spawn((PresetSection, Node::default()));

        // First frame populates the builtins.
        app.update();
        assert_eq!(button_names(&mut app).len(), 5);

        {
            let mut library = app.world_mut().resource_mut::<PresetLibrary>();
            merge_presets(
                &mut library.presets,
                vec![GalaxyPreset {
                    name: "Golden Vortex".to_string(),
                    params: GalaxyParameters::default(),
                }],
            );
        }
        app.update();
        let names = button_names(&mut app);
        assert_eq!(names.len(), 6);
        assert!(names.iter().any(|name| name == "Golden Vortex"));

        // A quiet frame leaves the buttons alone.
        app.update();
        assert_eq!(button_names(&mut app).len(), 6);
    }
}
