use super::refs::{ObjectReferences, RefType};
use crate::error::PdfError;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

enum Pixels {
    /// Baseline RGB JPEG, passed through to the PDF unchanged
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster picture loaded from disk, in its pixel dimensions
pub struct Image {
    pixels: Pixels,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn from_disk<P: AsRef<Path>>(path: P) -> Result<Image, PdfError> {
        let data = std::fs::read(path.as_ref())?;
        let format = image::guess_format(&data)?;
        let decoded = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = decoded.dimensions();

        // the decoder converts CMYK to RGB, so check what the file itself holds
        let pixels = match (format, decoded.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) if jpeg_components(&data) == Some(3) => Pixels::Jpeg(data),
            _ => Pixels::Decoded(decoded),
        };
        Ok(Image {
            pixels,
            width,
            height,
        })
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(index));
        let level = CompressionLevel::DefaultLevel as u8;

        let (filter, bytes, alpha) = match &self.pixels {
            Pixels::Jpeg(bytes) => (Filter::DctDecode, bytes.clone(), None),
            Pixels::Decoded(image) => {
                let alpha = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });
                let rgb = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);
                (Filter::FlateDecode, rgb, alpha)
            }
        };

        let mask_id = alpha.as_ref().map(|_| refs.gen(RefType::ImageMask(index)));

        let mut xobject = writer.image_xobject(id, &bytes);
        xobject.filter(filter);
        xobject.width(self.width as i32);
        xobject.height(self.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobject.s_mask(mask_id);
        }
        xobject.finish();

        if let (Some(mask_id), Some(alpha)) = (mask_id, alpha) {
            let mut mask = writer.image_xobject(mask_id, &alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(self.width as i32);
            mask.height(self.height as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
        }
    }
}

/// Number of colour components in a JPEG's frame header
fn jpeg_components(data: &[u8]) -> Option<u8> {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut at = 2;
    loop {
        if *data.get(at)? != 0xFF {
            return None;
        }
        let marker = *data.get(at + 1)?;
        match marker {
            // fill byte
            0xFF => at += 1,
            // markers without a length
            0x01 | 0xD0..=0xD7 => at += 2,
            // end of image or start of scan before any frame header
            0xD9 | 0xDA => return None,
            // SOFn, apart from DHT, JPG and DAC which share the range
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => return data.get(at + 9).copied(),
            _ => {
                let length = u16::from_be_bytes([*data.get(at + 2)?, *data.get(at + 3)?]) as usize;
                at += 2 + length;
            }
        }
    }
}
