use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

#[derive(Component)]
pub struct GalaxyPointCloud;

/// Create point index mesh for GPU-side vertex expansion.
/// Generates triangle-based geometry that expands to screen-aligned quads
/// per point; the vertex shader derives point and corner from the vertex
/// index and ignores the placeholder positions.
pub fn create_point_index_mesh(point_count: usize) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );

    // 6 vertices per point, two triangles forming a screen-aligned quad.
    let vertex_count = point_count * 6;
    let indices: Vec<[f32; 3]> = (0..vertex_count).map(|i| [i as f32, 0.0, 0.0]).collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, indices);
    mesh
}
