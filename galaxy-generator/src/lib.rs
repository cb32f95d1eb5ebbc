//! Procedural galaxy point-cloud generation.
//!
//! Maps a [`GalaxyParameters`] set to four parallel per-point attribute
//! buffers (position, colour, size scale, positional jitter). The generator
//! is a pure, synchronous transformation: randomness comes from an injected
//! [`RandomSource`], and every call either returns a complete buffer set or
//! a [`ParameterError`] before any allocation happens.
//!
//! The rendering side consumes the buffers as-is; jitter is deliberately
//! kept out of the base positions so a vertex stage can animate it
//! independently.

pub mod generator;
pub mod parameters;
pub mod presets;
pub mod random;

pub use generator::{PointAttributeBuffers, generate};
pub use parameters::{GalaxyParameters, ParameterError, Rgb};
pub use presets::{GalaxyPreset, builtin_presets, find};
pub use random::{RandomSource, SequenceSource};
