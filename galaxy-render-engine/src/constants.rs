pub mod render_settings;
