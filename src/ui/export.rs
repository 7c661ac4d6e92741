//! Export utilities: render the current view to SVG and PNG.
//!
//! Both formats are built from the same [`DrawCommand`] list the canvas paints, so
//! an export shows exactly what is on screen.

use super::state::{FileOperationResult, PendingExportOperation, TourCanvasApp};
use crate::render::DrawCommand;
use eframe::egui;
use log::error;
use std::fmt::Write as _;

impl TourCanvasApp {
    /// Builds the export for the current view and asks where to write it.
    pub fn export_image(&mut self, ctx: &egui::Context, kind: PendingExportOperation) {
        let (width, height) = self.editor.viewport.canvas_size();
        let width = width.round().max(1.0) as u32;
        let height = height.round().max(1.0) as u32;
        let svg = build_svg(&self.editor.render(), width, height);

        let (bytes, extension) = match kind {
            PendingExportOperation::Svg => (svg.into_bytes(), "svg"),
            PendingExportOperation::Png => match rasterize(&svg, width, height) {
                Ok(png) => (png, "png"),
                Err(message) => {
                    error!("PNG export failed: {message}");
                    self.set_status(message);
                    return;
                }
            },
        };

        let ctx = ctx.clone();
        let sender = self.file.file_operation_sender.clone();
        tokio::spawn(async move {
            if let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter(extension.to_uppercase(), &[extension])
                .set_file_name(format!("points.{extension}"))
                .save_file()
                .await
            {
                let path = handle.path().to_path_buf();
                let result = match std::fs::write(&path, bytes) {
                    Ok(()) => FileOperationResult::ExportCompleted(path),
                    Err(e) => FileOperationResult::OperationFailed(format!(
                        "Failed to write {}: {e}",
                        path.display()
                    )),
                };
                let _ = sender.send(result);
            }
            ctx.request_repaint();
        });
    }
}

fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Serializes draw commands as a standalone SVG document of the given size.
pub fn build_svg(commands: &[DrawCommand], width: u32, height: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for command in commands {
        match command {
            DrawCommand::Background { rgb } => {
                let _ = writeln!(
                    out,
                    r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
                    hex(*rgb)
                );
            }
            DrawCommand::Tour { vertices, rgb, width: stroke, .. } => {
                if vertices.len() < 2 {
                    continue;
                }
                let points: Vec<String> = vertices
                    .iter()
                    .map(|(x, y)| format!("{x:.2},{y:.2}"))
                    .collect();
                let _ = writeln!(
                    out,
                    r#"<polygon points="{}" fill="none" stroke="{}" stroke-width="{stroke:.2}" stroke-linejoin="round"/>"#,
                    points.join(" "),
                    hex(*rgb)
                );
            }
            DrawCommand::Marker { center, radius, rgb } => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{}"/>"#,
                    center.0,
                    center.1,
                    hex(*rgb)
                );
            }
        }
    }
    let _ = writeln!(out, "</svg>");
    out
}

/// Renders an SVG document into PNG bytes.
pub fn rasterize(svg: &str, width: u32, height: u32) -> Result<Vec<u8>, String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
        .map_err(|e| format!("Failed to parse SVG for PNG export: {e}"))?;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("Failed to create pixmap {width}x{height}"))?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| format!("Failed to encode PNG: {e}"))
}
