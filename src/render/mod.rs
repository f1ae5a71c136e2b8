//! Raster chart rendering for both benchmark paths.
//!
//! Charts are drawn with plotters into an in-memory RGB buffer, which is then
//! written out as PNG and handed to the viewer.

pub mod dual_scale;
pub mod figure;
pub mod trend_chart;

pub use dual_scale::render_dual_scale;
pub use figure::{Figure, fit_color_image};
pub use trend_chart::render_trend_chart;
