//! In-memory raster figure sized in inches at a given dpi.

use eframe::egui;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::error::BenchError;

/// Converts typographic points into pixels for a given dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    dpi: u32,
}

impl Scale {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Pixel length of `points` (1/72 inch), never less than one pixel.
    pub fn px(self, points: f64) -> u32 {
        ((points * self.dpi as f64 / 72.0).round() as u32).max(1)
    }

    /// Signed pixel length, for element-relative offsets.
    pub fn offset(self, points: f64) -> i32 {
        (points * self.dpi as f64 / 72.0).round() as i32
    }
}

/// RGB pixel buffer that charts draw into.
pub struct Figure {
    width: u32,
    height: u32,
    dpi: u32,
    pixels: Vec<u8>,
}

impl Figure {
    /// Create a white figure of `width_in` x `height_in` inches.
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        let width = ((width_in * dpi as f64).round() as u32).max(1);
        let height = ((height_in * dpi as f64).round() as u32).max(1);
        Self {
            width,
            height,
            dpi,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale(&self) -> Scale {
        Scale::new(self.dpi)
    }

    /// Drawing area backed by this figure's pixels.
    pub fn drawing_area(&mut self) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height)).into_drawing_area()
    }

    /// Encode the figure as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), BenchError> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BenchError::Render(format!("failed to write {}: {}", path.display(), e)))
    }

    /// Copy the pixels into an egui image for on-screen display.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgb([self.width as usize, self.height as usize], &self.pixels)
    }
}

/// Largest size with the same aspect ratio whose longer side is at most `max_side`.
pub fn fit_within((width, height): (usize, usize), max_side: usize) -> (usize, usize) {
    let longest = width.max(height);
    if longest <= max_side || longest == 0 {
        return (width, height);
    }
    let ratio = max_side as f64 / longest as f64;
    let shrink = |side: usize| ((side as f64 * ratio).round() as usize).clamp(1, max_side);
    (shrink(width), shrink(height))
}

/// Downscale `chart` so neither side exceeds `max_side`; smaller images pass through.
pub fn fit_color_image(chart: egui::ColorImage, max_side: usize) -> egui::ColorImage {
    let [width, height] = chart.size;
    let (new_width, new_height) = fit_within((width, height), max_side);
    if (new_width, new_height) == (width, height) {
        return chart;
    }
    let Some(rgba) = image::RgbaImage::from_raw(width as u32, height as u32, chart.as_raw().to_vec()) else {
        return chart;
    };
    log::debug!("Downscaling chart from {}x{} to {}x{} for display", width, height, new_width, new_height);
    let resized = image::imageops::resize(
        &rgba,
        new_width as u32,
        new_height as u32,
        image::imageops::FilterType::Triangle,
    );
    egui::ColorImage::from_rgba_unmultiplied([new_width, new_height], resized.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_size_follows_dpi() {
        let figure = Figure::new(15.0, 6.0, 100);
        assert_eq!(figure.size(), (1500, 600));
        assert_eq!(Figure::new(12.0, 8.0, 300).size(), (3600, 2400));
    }

    #[test]
    fn test_scale_points_to_pixels() {
        assert_eq!(Scale::new(72).px(10.0), 10);
        assert_eq!(Scale::new(144).px(10.0), 20);
        assert_eq!(Scale::new(10).px(1.0), 1);
        assert_eq!(Scale::new(144).offset(-5.0), -10);
    }

    #[test]
    fn test_draw_and_save_png() {
        let mut figure = Figure::new(1.0, 0.5, 40);
        {
            let root = figure.drawing_area();
            root.fill(&RED).unwrap();
            root.present().unwrap();
        }
        assert_eq!(&figure.pixels[..3], &[255, 0, 0]);

        let path = std::env::temp_dir().join(format!("powerset-bench-viz-{}.png", std::process::id()));
        figure.save_png(&path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (40, 20));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_color_image_matches_size() {
        let figure = Figure::new(2.0, 1.0, 50);
        assert_eq!(figure.to_color_image().size, [100, 50]);
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        // Dual-scale figure at the highest accepted dpi.
        assert_eq!(fit_within((9000, 3600), 8192), (8192, 3277));
        assert_eq!(fit_within((3600, 7200), 2048), (1024, 2048));
        assert_eq!(fit_within((1500, 600), 8192), (1500, 600));
    }

    #[test]
    fn test_oversized_figure_is_downscaled_for_display() {
        let mut figure = Figure::new(3.0, 1.0, 100);
        {
            let root = figure.drawing_area();
            root.fill(&BLUE).unwrap();
            root.present().unwrap();
        }
        let image = fit_color_image(figure.to_color_image(), 120);
        assert_eq!(image.size, [120, 40]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(0, 0, 255));

        let small = fit_color_image(Figure::new(1.0, 1.0, 50).to_color_image(), 120);
        assert_eq!(small.size, [50, 50]);
    }
}
