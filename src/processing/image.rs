use crate::models::BoundingBox;
use crate::utils::{ExtractionError, Result};
use image::DynamicImage;
use std::path::Path;

pub struct ImageProcessor;

impl ImageProcessor {
    pub fn load(image_path: &Path) -> Result<DynamicImage> {
        image::open(image_path).map_err(|e| {
            ExtractionError::ImageProcessingError(format!(
                "Failed to read {}: {}",
                image_path.display(),
                e
            ))
        })
    }

    /// Crops `region` out of `img`, clamped to the image bounds. Returns
    /// `None` when nothing of the region lies inside the image.
    pub fn crop(img: &DynamicImage, region: &BoundingBox) -> Option<DynamicImage> {
        let (w, h) = (img.width() as i64, img.height() as i64);
        let x1 = (region.x1 as i64).clamp(0, w);
        let y1 = (region.y1 as i64).clamp(0, h);
        let x2 = (region.x2 as i64).clamp(0, w);
        let y2 = (region.y2 as i64).clamp(0, h);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(img.crop_imm(
            x1 as u32,
            y1 as u32,
            (x2 - x1) as u32,
            (y2 - y1) as u32,
        ))
    }

    pub fn save_to_temp_file(img: &DynamicImage) -> Result<tempfile::TempPath> {
        let temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| ExtractionError::ImageProcessingError(e.to_string()))?;
        let path = temp_file.into_temp_path();
        img.save(&path)
            .map_err(|e| ExtractionError::ImageProcessingError(e.to_string()))?;
        Ok(path)
    }
}
