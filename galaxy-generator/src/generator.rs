use std::f32::consts::TAU;

use crate::parameters::{GalaxyParameters, ParameterError};
use crate::random::RandomSource;

/// Four parallel per-point attribute buffers, recreated wholesale on every
/// generation call.
///
/// `positions`, `colors` and `jitter` hold 3 floats per point, `scales` one.
/// Jitter is not folded into the positions; the vertex stage applies it so
/// it can be animated independently of regeneration.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAttributeBuffers {
    /// Base spiral positions (x, y, z), y always 0.
    pub positions: Vec<f32>,
    /// Linear RGB in [0, 1], interpolated inside -> outside by normalised radius.
    pub colors: Vec<f32>,
    /// Uniform-random per-point size factor in [0, 1).
    pub scales: Vec<f32>,
    /// Random offsets (dx, dy, dz), bounded per axis by randomness * radius.
    pub jitter: Vec<f32>,
}

impl PointAttributeBuffers {
    pub fn point_count(&self) -> usize {
        self.scales.len()
    }
}

/// Generate the galaxy point cloud for `params`.
///
/// Pure and synchronous: validates first, pre-allocates all four buffers to
/// their exact final size, then fills them in a single pass. Deterministic
/// given a deterministic `rng`. Draw order per point is fixed: radius, then
/// magnitude and sign per axis (x, y, z), then scale.
pub fn generate(
    params: &GalaxyParameters,
    rng: &mut impl RandomSource,
) -> Result<PointAttributeBuffers, ParameterError> {
    params.validate()?;

    let count = params.count;
    let branches = params.branches as usize;

    let mut positions = vec![0.0f32; count * 3];
    let mut colors = vec![0.0f32; count * 3];
    let mut scales = vec![0.0f32; count];
    let mut jitter = vec![0.0f32; count * 3];

    for i in 0..count {
        let i3 = i * 3;

        let radius = rng.next_f32() * params.radius;

        // Round-robin branch assignment by index, giving evenly spaced arms.
        let branch_angle = (i % branches) as f32 / branches as f32 * TAU;

        let jx = jitter_component(rng, params, radius);
        let jy = jitter_component(rng, params, radius);
        let jz = jitter_component(rng, params, radius);

        // Spin couples twist to radius, producing the spiral.
        let angle = branch_angle + radius * params.spin;

        positions[i3] = angle.cos() * radius;
        positions[i3 + 1] = 0.0;
        positions[i3 + 2] = angle.sin() * radius;

        jitter[i3] = jx;
        jitter[i3 + 1] = jy;
        jitter[i3 + 2] = jz;

        let mixed = params
            .inside_color
            .lerp(params.outside_color, radius / params.radius);
        colors[i3] = mixed.r;
        colors[i3 + 1] = mixed.g;
        colors[i3 + 2] = mixed.b;

        scales[i] = rng.next_f32();
    }

    Ok(PointAttributeBuffers {
        positions,
        colors,
        scales,
        jitter,
    })
}

/// One jitter axis: magnitude draw raised to the concentration exponent,
/// independent 50/50 sign draw, scaled by the point's own radius.
fn jitter_component(rng: &mut impl RandomSource, params: &GalaxyParameters, radius: f32) -> f32 {
    let magnitude = rng.next_f32().powf(params.randomness_power);
    let sign = if rng.next_f32() < 0.5 { 1.0 } else { -1.0 };
    magnitude * sign * params.randomness * radius
}
