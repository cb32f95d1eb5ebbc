pub mod attribute_textures;
pub mod point_index_mesh;
