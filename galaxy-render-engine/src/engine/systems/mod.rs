pub mod bloom_settings;
pub mod fps_tracking;
