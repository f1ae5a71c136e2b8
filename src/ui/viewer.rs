//! # Plot Viewer
//!
//! Window that shows a rendered chart next to its statistics summary and the
//! records it was drawn from. The chart is uploaded to the GPU once, on the
//! first frame, shrunk to the backend's texture size limit if needed, and
//! scaled down to fit the central panel.

use eframe::egui;

use crate::pipeline::{PipelineOutput, RecordTable};
use crate::render::fit_color_image;

/// Interactive display surface for one finished pipeline run.
pub struct PlotViewer {
    /// Chart pixels waiting to be uploaded as a texture.
    pending_image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    summary: Vec<String>,
    table: RecordTable,
}

impl PlotViewer {
    pub fn new(output: &PipelineOutput) -> Self {
        Self {
            pending_image: Some(output.figure.to_color_image()),
            texture: None,
            summary: output.summary.lines().map(str::to_owned).collect(),
            table: output.table.clone(),
        }
    }
}

impl eframe::App for PlotViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending_image.take() {
            let max_side = ctx.input(|i| i.max_texture_side);
            let image = fit_color_image(image, max_side);
            self.texture = Some(ctx.load_texture("benchmark-plot", image, egui::TextureOptions::LINEAR));
        }

        egui::SidePanel::right("statistics_panel")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Statistics");
                ui.add_space(4.0);
                for line in &self.summary {
                    ui.label(line);
                }
                ui.separator();
                ui.heading("Records");
                render_record_table(ui, &self.table);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.texture {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                });
            }
        });
    }
}

/// Render the per-record table with one column per header.
fn render_record_table(ui: &mut egui::Ui, table: &RecordTable) {
    use egui_extras::{Column, TableBuilder};

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center));
    for _ in &table.headers {
        builder = builder.column(Column::auto().at_least(50.0));
    }

    builder
        .header(row_height, |mut header| {
            for title in &table.headers {
                header.col(|ui| {
                    ui.strong(*title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

/// Open the viewer window and block until it is closed.
pub fn show(output: &PipelineOutput) -> anyhow::Result<()> {
    let (width, height) = output.figure.size();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(output.title)
            .with_inner_size([(width as f32).min(1600.0) + 360.0, (height as f32).min(900.0) + 20.0]),
        ..Default::default()
    };

    let viewer = PlotViewer::new(output);
    eframe::run_native(output.title, native_options, Box::new(move |_cc| Ok(Box::new(viewer))))
        .map_err(|e| anyhow::anyhow!("Failed to open plot window: {}", e))
}
