//! Core application setup.
//!
//! Handles app construction, window configuration and fullscreen handling
//! for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the galaxy material pipeline, preset manifest
/// loading, the GUI front-ends and the runtime system sets.
pub mod app_setup;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets, vsync settings and the
/// fullscreen toggle.
pub mod window_config;
