use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use galaxy_generator::{GalaxyParameters, generate};

use crate::constants::render_settings::POINT_SIZE_PIXELS_PER_UNIT;
use crate::engine::mesh::attribute_textures::build_attribute_textures;
use crate::engine::mesh::point_index_mesh::{GalaxyPointCloud, create_point_index_mesh};
use crate::engine::shaders::GalaxyPointShader;

/// The single owned parameter set. GUI adapters are the only writers; the
/// regeneration system reads it once per call.
#[derive(Resource)]
pub struct GalaxyConfig {
    pub params: GalaxyParameters,
    pub regenerate: bool,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            params: GalaxyParameters::default(),
            // Build the first galaxy on the opening frame.
            regenerate: true,
        }
    }
}

/// Handles of the live galaxy entity and its GPU assets, so a regeneration
/// can release them once the replacement is fully built.
#[derive(Resource, Default)]
pub struct GalaxyCloud {
    pub entity: Option<Entity>,
    pub mesh: Handle<Mesh>,
    pub material: Handle<GalaxyPointShader>,
    pub position_scale_texture: Handle<Image>,
    pub colour_texture: Handle<Image>,
    pub jitter_texture: Handle<Image>,
}

/// Rebuild the point cloud whenever a parameter change requests it.
///
/// The new buffer set, textures, mesh and material are built completely
/// before the previous entity and assets are released, so a failed
/// generation leaves the old galaxy on screen.
pub fn regenerate_galaxy(
    mut config: ResMut<GalaxyConfig>,
    mut cloud: ResMut<GalaxyCloud>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointShader>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !config.regenerate {
        return;
    }
    config.regenerate = false;

    let buffers = match generate(&config.params, &mut rand::thread_rng()) {
        Ok(buffers) => buffers,
        Err(error) => {
            println!("Galaxy regeneration rejected: {error}");
            return;
        }
    };

    let textures = build_attribute_textures(&buffers);
    let mesh = create_point_index_mesh(buffers.point_count());

    let position_scale_texture = images.add(textures.position_scale);
    let colour_texture = images.add(textures.colour);
    let jitter_texture = images.add(textures.jitter);
    let mesh_handle = meshes.add(mesh);
    let material_handle = materials.add(GalaxyPointShader {
        position_scale_texture: position_scale_texture.clone(),
        colour_texture: colour_texture.clone(),
        jitter_texture: jitter_texture.clone(),
        params: Vec4::new(
            0.0,
            config.params.size * POINT_SIZE_PIXELS_PER_UNIT,
            textures.dimension as f32,
            buffers.point_count() as f32,
        ),
    });

    let entity = commands
        .spawn((
            Mesh3d(mesh_handle.clone()),
            MeshMaterial3d(material_handle.clone()),
            Transform::from_translation(Vec3::ZERO),
            GalaxyPointCloud,
            // The cloud spans the whole scene; culling it as one bound is
            // counter-productive.
            NoFrustumCulling,
        ))
        .id();

    release_previous(
        cloud.as_mut(),
        &mut commands,
        meshes.as_mut(),
        materials.as_mut(),
        images.as_mut(),
    );

    cloud.entity = Some(entity);
    cloud.mesh = mesh_handle;
    cloud.material = material_handle;
    cloud.position_scale_texture = position_scale_texture;
    cloud.colour_texture = colour_texture;
    cloud.jitter_texture = jitter_texture;

    println!(
        "Galaxy regenerated: {} points across {} branches",
        buffers.point_count(),
        config.params.branches
    );
}

fn release_previous(
    cloud: &mut GalaxyCloud,
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<GalaxyPointShader>,
    images: &mut Assets<Image>,
) {
    if let Some(entity) = cloud.entity.take() {
        commands.entity(entity).despawn();
        meshes.remove(&cloud.mesh);
        materials.remove(&cloud.material);
        images.remove(&cloud.position_scale_texture);
        images.remove(&cloud.colour_texture);
        images.remove(&cloud.jitter_texture);
    }
}
