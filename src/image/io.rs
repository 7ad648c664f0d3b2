//! Conversions to and from the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Palette, grayscale, and
//! 16-bit inputs are normalized to 8-bit RGBA on the way in.

use crate::image::PixelBuffer;
use crate::util::{ImKernelError, ImKernelResult};
use std::path::Path;

/// Creates a pixel buffer from an RGBA image buffer.
pub fn buffer_from_rgba_image(img: &image::RgbaImage) -> ImKernelResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_rgba8(img.as_raw(), width, height)
}

/// Creates a pixel buffer from any decoded image, converting it to RGBA first.
pub fn buffer_from_dynamic_image(img: &image::DynamicImage) -> ImKernelResult<PixelBuffer> {
    buffer_from_rgba_image(&img.to_rgba8())
}

/// Converts a pixel buffer back into an `image::RgbaImage`.
pub fn buffer_to_rgba_image(buffer: &PixelBuffer) -> ImKernelResult<image::RgbaImage> {
    let width = u32::try_from(buffer.width()).map_err(|_| ImKernelError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    })?;
    let height = u32::try_from(buffer.height()).map_err(|_| ImKernelError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    })?;
    image::RgbaImage::from_raw(width, height, buffer.to_rgba8()).ok_or(
        ImKernelError::BufferTooSmall {
            needed: buffer.width() * buffer.height() * 4,
            got: buffer.pixels().len() * 4,
        },
    )
}

/// Loads an image from disk as an RGBA pixel buffer.
pub fn load_image<P: AsRef<Path>>(path: P) -> ImKernelResult<PixelBuffer> {
    let img = image::open(path).map_err(|err| ImKernelError::ImageIo {
        reason: err.to_string(),
    })?;
    buffer_from_dynamic_image(&img)
}

/// Saves a pixel buffer; the format is chosen from the file extension.
pub fn save_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> ImKernelResult<()> {
    let img = buffer_to_rgba_image(buffer)?;
    let path = path.as_ref();
    // JPEG has no alpha channel.
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let result = if is_jpeg {
        image::DynamicImage::ImageRgba8(img).to_rgb8().save(path)
    } else {
        img.save(path)
    };
    result.map_err(|err| ImKernelError::ImageIo {
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{buffer_from_dynamic_image, buffer_to_rgba_image};
    use crate::image::Pixel;

    #[test]
    fn gray_images_are_expanded_to_rgba() {
        let gray = image::GrayImage::from_raw(2, 1, vec![10, 200]).unwrap();
        let buffer = buffer_from_dynamic_image(&image::DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(buffer.get(0, 0), Some(&Pixel::rgb(10, 10, 10)));
        assert_eq!(buffer.get(1, 0), Some(&Pixel::rgb(200, 200, 200)));

        let back = buffer_to_rgba_image(&buffer).unwrap();
        assert_eq!(back.get_pixel(1, 0).0, [200, 200, 200, 255]);
    }
}
