use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::render_settings::CAMERA_START_EYE;
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::window_config::{create_window_config, toggle_fullscreen};
use crate::engine::loading::preset_loader::{
    PresetLibrary, PresetLoader, PresetManifest, load_presets_system,
};
use crate::engine::scene::galaxy_cloud::{GalaxyCloud, GalaxyConfig, regenerate_galaxy};
use crate::engine::shaders::{GalaxyPointShader, update_frame_uniforms};
use crate::engine::systems::bloom_settings::{BloomConfig, apply_bloom_config};
use crate::engine::systems::fps_tracking::{
    fps_notification_system, fps_text_update_system, spawn_fps_overlay,
};
use crate::ui::apply_param_changes;
use crate::ui::hotkeys::{HotkeyState, hotkey_system};
use crate::ui::panel::{
    handle_preset_buttons, handle_step_buttons, handle_swatch_buttons, refresh_preset_buttons,
    spawn_control_panel, update_value_labels,
};
use crate::ui::schema::ParamChange;
use crate::ui::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<GalaxyPointShader>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers PresetManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<PresetManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin);

    app.init_resource::<GalaxyConfig>()
        .init_resource::<GalaxyCloud>()
        .init_resource::<BloomConfig>()
        .init_resource::<OrbitCamera>()
        .init_resource::<PresetLibrary>()
        .init_resource::<PresetLoader>()
        .init_resource::<HotkeyState>()
        .add_event::<ParamChange>();

    app.add_systems(Startup, (setup, spawn_control_panel).chain());

    // Adapter input, config fold and rebuild run in order so an edit lands
    // in the same frame it was made.
    app.add_systems(
        Update,
        (
            handle_step_buttons,
            handle_swatch_buttons,
            handle_preset_buttons,
            hotkey_system,
            apply_param_changes,
            regenerate_galaxy,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        (
            load_presets_system,
            refresh_preset_buttons,
            camera_controller,
            update_frame_uniforms,
            apply_bloom_config,
            update_value_labels,
            fps_text_update_system,
            fps_notification_system,
            toggle_fullscreen,
        ),
    );

    app
}

fn setup(mut commands: Commands, bloom: Res<BloomConfig>) {
    let eye = Vec3::from_array(CAMERA_START_EYE);
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        // Bloom does its own range compression; tonemapping on top mutes it.
        Tonemapping::None,
        bloom.to_bloom(),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    spawn_fps_overlay(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
