/// Galaxy point cloud shader material with per-point attribute textures.
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use crate::constants::render_settings::POINT_SIZE_PIXELS_PER_UNIT;
use crate::engine::scene::galaxy_cloud::GalaxyConfig;

/// Per-point attributes packed into `Rgba32Float` data textures, fetched by
/// point index in the vertex stage:
///
/// - position + scale: (x, y, z, scale)
/// - colour: (r, g, b, 0)
/// - jitter: (dx, dy, dz, 0)
///
/// `params` carries (elapsed seconds, point size in pixels, texture
/// dimension, point count). Additive blending with no depth write.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct GalaxyPointShader {
    #[texture(0, sample_type = "float", filterable = false)]
    #[sampler(1, sampler_type = "non_filtering")]
    pub position_scale_texture: Handle<Image>,

    #[texture(2, sample_type = "float", filterable = false)]
    #[sampler(3, sampler_type = "non_filtering")]
    pub colour_texture: Handle<Image>,

    #[texture(4, sample_type = "float", filterable = false)]
    #[sampler(5, sampler_type = "non_filtering")]
    pub jitter_texture: Handle<Image>,

    #[uniform(6)]
    pub params: Vec4,
}

impl Material for GalaxyPointShader {
    fn vertex_shader() -> ShaderRef {
        "shaders/galaxy_points.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/galaxy_points.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }
}

/// Next frame's uniform vector: elapsed time drives the spin animation and
/// the point size tracks the live `size` parameter, so size edits land
/// without a rebuild. Texture dimension and point count are fixed until the
/// next regeneration.
pub fn frame_params(params: Vec4, elapsed: f32, size: f32) -> Vec4 {
    Vec4::new(
        elapsed,
        size * POINT_SIZE_PIXELS_PER_UNIT,
        params.z,
        params.w,
    )
}

/// Refresh the per-frame uniforms on every live galaxy material.
pub fn update_frame_uniforms(
    time: Res<Time>,
    config: Res<GalaxyConfig>,
    mut materials: ResMut<Assets<GalaxyPointShader>>,
) {
    for (_, material) in materials.iter_mut() {
        material.params = frame_params(material.params, time.elapsed_secs(), config.params.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_params_tracks_time_and_size() {
        let params = Vec4::new(0.0, 30.0, 448.0, 200_000.0);
        let updated = frame_params(params, 2.5, 0.01);
        assert_eq!(updated.x, 2.5);
        assert_eq!(updated.y, 0.01 * POINT_SIZE_PIXELS_PER_UNIT);
        // Generation-bound components stay put.
        assert_eq!(updated.z, 448.0);
        assert_eq!(updated.w, 200_000.0);
    }
}
