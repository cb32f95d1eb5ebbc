//! GUI front-ends for the galaxy parameters.
//!
//! Three interchangeable adapters — the in-engine panel, the keyboard
//! shortcuts and the browser RPC bridge — all funnel edits through the
//! [`schema::ParamChange`] event; `apply_param_changes` is the single
//! writer of the configuration resources.

pub mod hotkeys;
pub mod panel;
pub mod schema;
pub mod web_rpc;

use bevy::prelude::*;

use crate::engine::loading::preset_loader::PresetLibrary;
use crate::engine::scene::galaxy_cloud::GalaxyConfig;
use crate::engine::systems::bloom_settings::BloomConfig;
use schema::{ParamChange, apply_change};

/// Fold adapter events into the owned configuration and request one
/// regeneration for any batch that touched geometry.
pub fn apply_param_changes(
    mut changes: EventReader<ParamChange>,
    mut config: ResMut<GalaxyConfig>,
    mut bloom: ResMut<BloomConfig>,
    library: Res<PresetLibrary>,
    mut rpc: ResMut<web_rpc::WebRpcInterface>,
) {
    let mut geometry_dirty = false;
    let mut any_change = false;

    for change in changes.read() {
        let config = config.as_mut();
        geometry_dirty |= apply_change(
            &mut config.params,
            bloom.as_mut(),
            &library.presets,
            change,
        );
        any_change = true;
    }

    if geometry_dirty {
        config.regenerate = true;
    }
    if any_change {
        // Let the browser front-end resync its widgets, whichever adapter
        // made the edit.
        let params = serde_json::to_value(&config.params).unwrap_or_default();
        rpc.send_notification(
            "parameters_changed",
            serde_json::json!({
                "params": params,
                "bloom": {
                    "strength": bloom.strength,
                    "radius": bloom.radius,
                    "threshold": bloom.threshold,
                },
            }),
        );
    }
}
