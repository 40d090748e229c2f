use std::ops::Deref;

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage};

use crate::geometry::Rect;

/// A readable 2-D image with 8-bit RGBA pixels
pub trait PixelBuffer {
    /// Full extent of the buffer, anchored at the origin
    fn extent(&self) -> Rect;

    /// Pixel at `(x, y)`, converted to RGBA
    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8>;

    /// Cropping capability, if this buffer supports region-of-interest views
    fn croppable(&self) -> Option<&dyn CroppableBuffer> {
        None
    }
}

/// A pixel buffer that can extract a rectangular region of interest
pub trait CroppableBuffer: PixelBuffer {
    /// Copy the pixels under `rect` into a new RGBA buffer.
    ///
    /// `rect` must lie within [`PixelBuffer::extent`].
    fn region_of_interest(&self, rect: Rect) -> RgbaImage;
}

impl<P, C> PixelBuffer for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn extent(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        self.get_pixel(x, y).to_rgba()
    }

    fn croppable(&self) -> Option<&dyn CroppableBuffer> {
        Some(self)
    }
}

impl<P, C> CroppableBuffer for ImageBuffer<P, C>
where
    P: Pixel<Subpixel = u8>,
    C: Deref<Target = [u8]>,
{
    fn region_of_interest(&self, rect: Rect) -> RgbaImage {
        RgbaImage::from_fn(rect.width, rect.height, |x, y| {
            self.get_pixel(rect.x + x, rect.y + y).to_rgba()
        })
    }
}

impl PixelBuffer for DynamicImage {
    fn extent(&self) -> Rect {
        let (width, height) = GenericImageView::dimensions(self);
        Rect::from_size(width, height)
    }

    fn pixel_at(&self, x: u32, y: u32) -> Rgba<u8> {
        GenericImageView::get_pixel(self, x, y)
    }

    fn croppable(&self) -> Option<&dyn CroppableBuffer> {
        Some(self)
    }
}

impl CroppableBuffer for DynamicImage {
    fn region_of_interest(&self, rect: Rect) -> RgbaImage {
        self.view(rect.x, rect.y, rect.width, rect.height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbImage};

    #[test]
    fn test_rgba_region_of_interest() {
        let img = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]));

        let roi = img.region_of_interest(Rect::new(1, 2, 2, 2));

        assert_eq!(roi.dimensions(), (2, 2));
        assert_eq!(*roi.get_pixel(0, 0), Rgba([1, 2, 0, 255]));
        assert_eq!(*roi.get_pixel(1, 1), Rgba([2, 3, 0, 255]));
    }

    #[test]
    fn test_gray_converts_to_rgba() {
        let img = GrayImage::from_pixel(3, 3, Luma([90]));

        let roi = img.region_of_interest(Rect::new(0, 0, 2, 1));

        assert_eq!(roi.dimensions(), (2, 1));
        assert_eq!(*roi.get_pixel(1, 0), Rgba([90, 90, 90, 255]));
        assert_eq!(img.pixel_at(2, 2), Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn test_dynamic_image_is_croppable() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 3, image::Rgb([1, 2, 3])));

        assert_eq!(img.extent(), Rect::from_size(5, 3));
        let croppable = img.croppable();
        assert!(croppable.is_some());

        let roi = img.region_of_interest(Rect::new(4, 2, 1, 1));
        assert_eq!(*roi.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
    }
}
