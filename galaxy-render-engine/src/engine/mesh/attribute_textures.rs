use bevy::image::{ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use galaxy_generator::PointAttributeBuffers;

/// Side length of the square data texture holding `count` texels.
pub fn texture_dimension(count: usize) -> u32 {
    (count as f64).sqrt().ceil().max(1.0) as u32
}

/// Interleave a 3-float-per-point buffer (plus an optional 1-float alpha
/// buffer) into RGBA texels, padded with zeroes to `dimension`².
pub fn pack_rgba(triples: &[f32], alpha: Option<&[f32]>, dimension: u32) -> Vec<f32> {
    let count = triples.len() / 3;
    let mut texels = vec![0.0f32; dimension as usize * dimension as usize * 4];
    for i in 0..count {
        texels[i * 4] = triples[i * 3];
        texels[i * 4 + 1] = triples[i * 3 + 1];
        texels[i * 4 + 2] = triples[i * 3 + 2];
        if let Some(alpha) = alpha {
            texels[i * 4 + 3] = alpha[i];
        }
    }
    texels
}

/// The three per-point attribute textures the galaxy material binds.
pub struct AttributeTextures {
    pub position_scale: Image,
    pub colour: Image,
    pub jitter: Image,
    pub dimension: u32,
}

/// Pack the generator's four buffers into `Rgba32Float` data textures.
/// Scale rides in the alpha channel of the position texture.
pub fn build_attribute_textures(buffers: &PointAttributeBuffers) -> AttributeTextures {
    let dimension = texture_dimension(buffers.point_count());
    AttributeTextures {
        position_scale: data_texture(
            pack_rgba(&buffers.positions, Some(&buffers.scales), dimension),
            dimension,
        ),
        colour: data_texture(pack_rgba(&buffers.colors, None, dimension), dimension),
        jitter: data_texture(pack_rgba(&buffers.jitter, None, dimension), dimension),
        dimension,
    }
}

fn data_texture(texels: Vec<f32>, dimension: u32) -> Image {
    let mut image = Image::new(
        Extent3d {
            width: dimension,
            height: dimension,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        bytemuck::cast_slice(&texels).to_vec(),
        TextureFormat::Rgba32Float,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        mag_filter: ImageFilterMode::Nearest,
        min_filter: ImageFilterMode::Nearest,
        ..default()
    });
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_dimension_covers_count() {
        assert_eq!(texture_dimension(1), 1);
        assert_eq!(texture_dimension(4), 2);
        assert_eq!(texture_dimension(5), 3);
        assert_eq!(texture_dimension(200_000), 448);
        let d = texture_dimension(300_000);
        assert!(d as usize * d as usize >= 300_000);
    }

    #[test]
    fn pack_rgba_interleaves_and_pads() {
        let triples = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let alpha = [0.5, 0.25];
        let texels = pack_rgba(&triples, Some(&alpha), 2);
        assert_eq!(texels.len(), 16);
        assert_eq!(&texels[0..4], &[1.0, 2.0, 3.0, 0.5]);
        assert_eq!(&texels[4..8], &[4.0, 5.0, 6.0, 0.25]);
        assert!(texels[8..].iter().all(|&t| t == 0.0));
    }

    #[test]
    fn pack_rgba_zero_alpha_without_buffer() {
        let texels = pack_rgba(&[1.0, 2.0, 3.0], None, 1);
        assert_eq!(texels, vec![1.0, 2.0, 3.0, 0.0]);
    }
}
