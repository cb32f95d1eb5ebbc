/// Pixels of on-screen point size per unit of the `size` parameter, before
/// per-point scale and perspective attenuation. The default size 0.005 maps
/// to a 30 px footprint.
pub const POINT_SIZE_PIXELS_PER_UNIT: f32 = 6000.0;

/// Initial camera eye position.
pub const CAMERA_START_EYE: [f32; 3] = [3.0, 3.0, 3.0];

/// Bloom defaults applied at startup and exposed to the control panel.
pub const BLOOM_STRENGTH: f32 = 0.6;
pub const BLOOM_RADIUS: f32 = 0.0;
pub const BLOOM_THRESHOLD: f32 = 0.0;

/// Asset path of the optional preset manifest.
pub const PRESET_MANIFEST_PATH: &str = "presets.json";
