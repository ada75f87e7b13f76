use crate::{
    avatar::Avatar,
    error::{Error, Result},
};
use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

const WHITE: Luma<u8> = Luma([u8::MAX]);
const BLACK: Luma<u8> = Luma([0]);

/// Lowest luma that still counts as a set pixel when reading images back
const THRESHOLD: u8 = 128;

/// Rasterizes the avatar into an 8-bit grayscale image, set pixels white
pub fn to_gray_image(avatar: &Avatar) -> GrayImage {
    GrayImage::from_fn(avatar.width(), avatar.height(), |x, y| {
        if avatar.get(x as i32, y as i32) {
            WHITE
        } else {
            BLACK
        }
    })
}

/// Encodes the avatar as a grayscale PNG
pub fn encode_png(avatar: &Avatar) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_gray_image(avatar)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(Error::Encoding)?;

    Ok(buf)
}

/// Thresholds an image back into an avatar
pub fn from_gray_image(image: &GrayImage) -> Result<Avatar> {
    let mut avatar = Avatar::blank(image.width() as i32, image.height() as i32)?;
    for (x, y, Luma([luma])) in image.enumerate_pixels() {
        avatar.set(x as i32, y as i32, *luma >= THRESHOLD);
    }

    Ok(avatar)
}

/// Decodes image bytes (any supported format, any color type) into an avatar
pub fn decode_png(bytes: &[u8]) -> Result<Avatar> {
    let image = image::load_from_memory(bytes).map_err(Error::Decoding)?;
    from_gray_image(&image.to_luma8())
}

impl Avatar {
    /// See [`encode_png`]
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(self)
    }
}
