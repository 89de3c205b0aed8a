//! Icon decoding and scaling.

use fab_assets::{AssetManager, ResourceId};
use fab_ui_graphics::{FilterQuality, ImageBitmap};
use image::DynamicImage;

#[derive(Debug)]
pub enum IconError {
    MissingResource(ResourceId),
    Decode(image::ImageError),
    /// No image was supplied, or it has no pixels to scale.
    Empty,
}

impl std::fmt::Display for IconError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconError::MissingResource(id) => write!(f, "resource {id} not found"),
            IconError::Decode(err) => write!(f, "icon could not be decoded: {err}"),
            IconError::Empty => write!(f, "icon has no pixels"),
        }
    }
}

impl std::error::Error for IconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IconError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for IconError {
    fn from(err: image::ImageError) -> Self {
        IconError::Decode(err)
    }
}

pub fn decode_icon(bytes: &[u8]) -> Result<DynamicImage, IconError> {
    Ok(image::load_from_memory(bytes)?)
}

pub fn load_resource_icon(
    assets: &AssetManager,
    id: ResourceId,
) -> Result<DynamicImage, IconError> {
    let bytes = assets.open(id).ok_or(IconError::MissingResource(id))?;
    decode_icon(&bytes)
}

/// Scales `image` to an `edge` x `edge` square. Aspect ratio is not kept.
pub fn scale_icon(image: &DynamicImage, edge: u32) -> Result<ImageBitmap, IconError> {
    if edge == 0 || image.width() == 0 || image.height() == 0 {
        return Err(IconError::Empty);
    }
    ImageBitmap::from_image(image)
        .scaled(edge, edge, FilterQuality::None)
        .ok_or(IconError::Empty)
}
