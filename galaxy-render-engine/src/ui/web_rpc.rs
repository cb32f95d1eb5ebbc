//! Browser front-end bridge: JSON-RPC 2.0 over iframe `postMessage`.
//!
//! A JavaScript control panel (any widget library) drives the same
//! [`ParamChange`] events as the in-engine adapters, and receives
//! `parameters_changed` / `fps_update` notifications to keep its widgets in
//! sync.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use galaxy_generator::Rgb;

use crate::engine::loading::preset_loader::PresetLibrary;
use crate::engine::scene::galaxy_cloud::GalaxyConfig;
use crate::engine::systems::bloom_settings::BloomConfig;

use super::schema::{ParamChange, ParamField};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

/// Resource managing bidirectional RPC communication with the browser GUI.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the browser front-end without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the RPC layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Attempt JSON parsing to validate RPC format before queuing.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        window
            .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            .expect("Failed to register message listener");
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing an incoming RPC message from the browser front-end.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };
    let Ok(mut queue) = queue_res.0.lock() else {
        return;
    };
    for content in queue.drain(..) {
        message_events.write(IncomingRpcMessage { content });
    }
}

fn handle_rpc_messages(
    mut message_events: EventReader<IncomingRpcMessage>,
    mut rpc: ResMut<WebRpcInterface>,
    mut changes: EventWriter<ParamChange>,
    config: Res<GalaxyConfig>,
    bloom: Res<BloomConfig>,
    library: Res<PresetLibrary>,
) {
    for message in message_events.read() {
        let request: RpcRequest = match serde_json::from_str(&message.content) {
            Ok(request) => request,
            Err(error) => {
                rpc.queue_response(error_response(
                    None,
                    INVALID_REQUEST,
                    format!("malformed request: {error}"),
                ));
                continue;
            }
        };

        let outcome = dispatch_request(&request, &mut changes, &config, &bloom, &library);

        // Notifications (no id) get no response per JSON-RPC 2.0.
        if request.id.is_none() {
            continue;
        }
        match outcome {
            Ok(result) => rpc.queue_response(RpcResponse {
                jsonrpc: "2.0".to_string(),
                result: Some(result),
                error: None,
                id: request.id.clone(),
            }),
            Err((code, message)) => {
                rpc.queue_response(error_response(request.id.clone(), code, message))
            }
        }
    }
}

fn dispatch_request(
    request: &RpcRequest,
    changes: &mut EventWriter<ParamChange>,
    config: &GalaxyConfig,
    bloom: &BloomConfig,
    library: &PresetLibrary,
) -> Result<serde_json::Value, (i32, String)> {
    match request.method.as_str() {
        "get_parameters" => Ok(serde_json::json!({
            "params": serde_json::to_value(&config.params).unwrap_or_default(),
            "bloom": {
                "strength": bloom.strength,
                "radius": bloom.radius,
                "threshold": bloom.threshold,
            },
        })),
        "list_presets" => Ok(serde_json::json!(
            library.presets.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        )),
        "set_parameter" => {
            let change = parse_set_parameter(&request.params)
                .map_err(|message| (INVALID_PARAMS, message))?;
            changes.write(change);
            Ok(serde_json::json!("ok"))
        }
        "apply_preset" => {
            let name = request.params["name"]
                .as_str()
                .ok_or_else(|| (INVALID_PARAMS, "missing preset name".to_string()))?;
            if galaxy_generator::find(&library.presets, name).is_none() {
                return Err((INVALID_PARAMS, format!("unknown preset {name:?}")));
            }
            changes.write(ParamChange::ApplyPreset {
                name: name.to_string(),
            });
            Ok(serde_json::json!("ok"))
        }
        other => Err((METHOD_NOT_FOUND, format!("unknown method {other:?}"))),
    }
}

/// Translate a `set_parameter` payload into a [`ParamChange`].
/// Colour fields take `#rrggbb` strings, numeric fields take numbers.
fn parse_set_parameter(params: &serde_json::Value) -> Result<ParamChange, String> {
    let field_name = params["field"]
        .as_str()
        .ok_or_else(|| "missing field name".to_string())?;
    let field = ParamField::from_wire_name(field_name)
        .ok_or_else(|| format!("unknown field {field_name:?}"))?;

    match field {
        ParamField::InsideColor | ParamField::OutsideColor => {
            let hex = params["value"]
                .as_str()
                .ok_or_else(|| "colour value must be a hex string".to_string())?;
            let colour = Rgb::from_hex(hex).map_err(|e| e.to_string())?;
            Ok(ParamChange::SetColour { field, colour })
        }
        _ => {
            let value = params["value"]
                .as_f64()
                .ok_or_else(|| "value must be a number".to_string())?;
            Ok(ParamChange::Set {
                field,
                value: value as f32,
            })
        }
    }
}

fn error_response(id: Option<serde_json::Value>, code: i32, message: String) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message,
            data: None,
        }),
        id,
    }
}

fn send_outgoing_messages(mut rpc: ResMut<WebRpcInterface>) {
    let rpc = rpc.as_mut();
    for response in rpc.outgoing_responses.drain(..) {
        post_to_frontend(&serde_json::to_string(&response).unwrap_or_default());
    }
    for notification in rpc.outgoing_notifications.drain(..) {
        post_to_frontend(&serde_json::to_string(&notification).unwrap_or_default());
    }
}

#[cfg(target_arch = "wasm32")]
fn post_to_frontend(message: &str) {
    if let Some(window) = window() {
        if let Some(parent) = window.parent().ok().flatten() {
            let _ = parent.post_message(&JsValue::from_str(message), "*");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn post_to_frontend(_message: &str) {
    // Native builds have no embedding frontend.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_with_and_without_id() {
        let with_id: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc":"2.0","method":"apply_preset","params":{"name":"Nebula"},"id":7}"#,
        )
        .unwrap();
        assert_eq!(with_id.method, "apply_preset");
        assert_eq!(with_id.id, Some(serde_json::json!(7)));

        let notification: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"get_parameters","id":null}"#)
                .unwrap();
        assert!(notification.id.is_none() || notification.id == Some(serde_json::Value::Null));
    }

    #[test]
    fn set_parameter_maps_numeric_fields() {
        let change = parse_set_parameter(&serde_json::json!({
            "field": "randomnessPower",
            "value": 4.5,
        }))
        .unwrap();
        assert!(matches!(
            change,
            ParamChange::Set { field: ParamField::RandomnessPower, value } if value == 4.5
        ));
    }

    #[test]
    fn set_parameter_maps_colour_fields() {
        let change = parse_set_parameter(&serde_json::json!({
            "field": "insideColor",
            "value": "#6e21ff",
        }))
        .unwrap();
        let ParamChange::SetColour { field, colour } = change else {
            panic!("expected colour change");
        };
        assert_eq!(field, ParamField::InsideColor);
        assert_eq!(colour.to_hex(), "#6e21ff");
    }

    #[test]
    fn set_parameter_rejects_bad_input() {
        assert!(parse_set_parameter(&serde_json::json!({ "value": 1.0 })).is_err());
        assert!(parse_set_parameter(&serde_json::json!({ "field": "warp", "value": 1.0 })).is_err());
        assert!(
            parse_set_parameter(&serde_json::json!({ "field": "insideColor", "value": 42 }))
                .is_err()
        );
        assert!(
            parse_set_parameter(&serde_json::json!({ "field": "radius", "value": "wide" }))
                .is_err()
        );
    }
}
