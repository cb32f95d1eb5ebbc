pub mod preset_loader;
