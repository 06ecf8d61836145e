// src/grid/render.rs
// Debug raster of a grid: one flat coloured square per tile.

use crate::error::{PathError, Result};
use crate::grid::Grid;
use image::{Rgb, RgbImage};
use std::path::Path;

impl Grid {
    pub fn to_image(&self, tile_px: u32) -> Result<RgbImage> {
        if tile_px == 0 {
            return Err(PathError::InvalidArgument("tile size must be at least 1px".to_string()));
        }
        let side = (self.size() as u32)
            .checked_mul(tile_px)
            .ok_or_else(|| PathError::InvalidArgument("image would be too large".to_string()))?;

        let mut img = RgbImage::new(side, side);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let col = (x / tile_px) as usize;
            let row = (y / tile_px) as usize;
            if let Some(terrain) = self.get(row, col) {
                *pixel = Rgb(terrain.color());
            }
        }
        Ok(img)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P, tile_px: u32) -> Result<()> {
        let img = self.to_image(tile_px)?;
        img.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
