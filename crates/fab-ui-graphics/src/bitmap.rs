//! Owned raster images with explicit release.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Sampling used when a bitmap is scaled or drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterQuality {
    /// Nearest neighbour, no smoothing.
    #[default]
    None,
    Bilinear,
}

impl FilterQuality {
    fn filter_type(self) -> FilterType {
        match self {
            FilterQuality::None => FilterType::Nearest,
            FilterQuality::Bilinear => FilterType::Triangle,
        }
    }
}

/// RGBA bitmap handle.
///
/// Clones share the same pixel buffer. [`ImageBitmap::recycle`] frees the
/// pixels for every clone at once; afterwards the handle only remembers its
/// dimensions and every pixel access yields `None`.
#[derive(Clone)]
pub struct ImageBitmap {
    pixels: Rc<RefCell<Option<RgbaImage>>>,
    width: u32,
    height: u32,
}

impl ImageBitmap {
    pub fn from_rgba(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            pixels: Rc::new(RefCell::new(Some(image))),
            width,
            height,
        }
    }

    pub fn from_image(image: &DynamicImage) -> Self {
        Self::from_rgba(image.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_recycled(&self) -> bool {
        self.pixels.borrow().is_none()
    }

    /// Frees the pixel buffer. Safe to call more than once.
    pub fn recycle(&self) {
        if self.pixels.borrow_mut().take().is_some() {
            log::trace!("recycled {}x{} bitmap", self.width, self.height);
        }
    }

    pub fn with_pixels<R>(&self, f: impl FnOnce(&RgbaImage) -> R) -> Option<R> {
        self.pixels.borrow().as_ref().map(f)
    }

    /// Returns a new bitmap resized to exactly `width` x `height`, ignoring
    /// the source aspect ratio. `None` if this bitmap was recycled.
    pub fn scaled(&self, width: u32, height: u32, filter: FilterQuality) -> Option<ImageBitmap> {
        self.with_pixels(|pixels| {
            ImageBitmap::from_rgba(imageops::resize(
                pixels,
                width.max(1),
                height.max(1),
                filter.filter_type(),
            ))
        })
    }

    pub fn same_pixels(&self, other: &ImageBitmap) -> bool {
        Rc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl PartialEq for ImageBitmap {
    fn eq(&self, other: &Self) -> bool {
        self.same_pixels(other)
    }
}

impl fmt::Debug for ImageBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("recycled", &self.is_recycled())
            .finish()
    }
}
