//! SVG backend: collects elements and emits a standalone document.

use crate::figure::{Color, Figure};
use crate::render::{render_figure, DevicePoint, FigureRenderer, Viewport};
use crate::telemetry::RenderMetrics;
use std::fmt::Write;

const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";

#[derive(Debug, Default)]
pub struct SvgRenderer {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drawing elements emitted so far.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn into_document(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w:.0} {h:.0}" width="{w:.0}" height="{h:.0}" font-family="{FONT_FAMILY}">"#,
            w = self.width,
            h = self.height,
        );
        svg.push('\n');
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn paint(color: Color) -> String {
    if color.a == 255 {
        format!(r#""{}""#, color.to_hex())
    } else {
        format!(r#""{}" fill-opacity="{:.3}""#, color.to_hex(), color.opacity())
    }
}

fn stroke(color: Color) -> String {
    if color.a == 255 {
        format!(r#"stroke="{}""#, color.to_hex())
    } else {
        format!(
            r#"stroke="{}" stroke-opacity="{:.3}""#,
            color.to_hex(),
            color.opacity()
        )
    }
}

fn point_list(points: &[DevicePoint]) -> String {
    let mut list = String::with_capacity(points.len() * 14);
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            list.push(' ');
        }
        let _ = write!(list, "{:.2},{:.2}", x, y);
    }
    list
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl FigureRenderer for SvgRenderer {
    fn begin(&mut self, width: f64, height: f64) {
        self.elements.clear();
        self.width = width;
        self.height = height;
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color) {
        self.elements.push(format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill={}/>"#,
            x,
            y,
            width,
            height,
            paint(fill)
        ));
    }

    fn polyline(&mut self, points: &[DevicePoint], color: Color, width: f64) {
        self.elements.push(format!(
            r#"<polyline points="{}" fill="none" {} stroke-width="{:.2}" stroke-linecap="square" stroke-linejoin="round"/>"#,
            point_list(points),
            stroke(color),
            width
        ));
    }

    fn polygon(&mut self, points: &[DevicePoint], fill: Color) {
        self.elements.push(format!(
            r#"<polygon points="{}" fill={}/>"#,
            point_list(points),
            paint(fill)
        ));
    }

    fn circle(&mut self, center: DevicePoint, radius: f64, fill: Color) {
        self.elements.push(format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill={}/>"#,
            center.0,
            center.1,
            radius,
            paint(fill)
        ));
    }

    fn text(&mut self, at: DevicePoint, content: &str, size: f64, color: Color) {
        self.elements.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill={} xml:space="preserve">{}</text>"#,
            at.0,
            at.1,
            size,
            paint(color),
            escape(content)
        ));
    }

    fn finish(&mut self) {}
}

/// Renders `figure` to an SVG document at `dpi`.
pub fn figure_to_svg(figure: &Figure, dpi: f64, metrics: &RenderMetrics) -> String {
    let viewport = Viewport::for_figure(figure, dpi);
    let mut renderer = SvgRenderer::new();
    render_figure(figure, &viewport, &mut renderer, metrics);
    renderer.into_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{MarkerShape, Point};
    use crate::overlay::{plot_frame, FrameOptions};
    use crate::pitch::{plot_pitch, PitchStyle};
    use crate::records::TrackingRecord;

    #[test]
    fn document_size_follows_figure_and_dpi() {
        let svg = figure_to_svg(&Figure::default(), 100.0, &RenderMetrics::new());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1200" height="800""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn pitch_renders_face_lines_and_spots() {
        let figure = plot_pitch(&PitchStyle::default());
        let metrics = RenderMetrics::new();
        let svg = figure_to_svg(&figure, 100.0, &metrics);
        assert!(svg.contains(r##"fill="#3cb371""##));
        // 25 markings plus the axes frame
        assert_eq!(svg.matches("<polyline").count(), 26);
        // centre spot and two penalty spots; posts are squares
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<polygon").count(), 4);
        assert_eq!(metrics.snapshot().skipped, 0);
    }

    #[test]
    fn one_circle_per_visible_player() {
        let home = TrackingRecord::new()
            .with("Home_1_x", -40.0)
            .with("Home_1_y", 0.0)
            .with("Home_2_x", f64::NAN)
            .with("Home_2_y", f64::NAN)
            .with("ball_x", 0.0)
            .with("ball_y", 0.0);
        let away = TrackingRecord::new()
            .with("Away_7_x", 20.0)
            .with("Away_7_y", 5.0);
        let mut figure =
            plot_frame(&home, &away, Some(Figure::default()), FrameOptions::default()).unwrap();
        figure.x_limits = (-53.0, 53.0);
        figure.y_limits = (-34.0, 34.0);

        let metrics = RenderMetrics::new();
        let svg = figure_to_svg(&figure, 100.0, &metrics);
        // two visible players and the ball
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(r#"fill-opacity="0.702""#));
        assert_eq!(metrics.snapshot().skipped, 1);
    }

    #[test]
    fn text_is_escaped() {
        let mut figure = Figure::default();
        figure.text(Point::new(0.5, 0.5), "A<B & C", Color::BLACK, 10.0);
        figure.plot_markers([(0.5, 0.5)], MarkerShape::Cross, Color::RED, 6.0);
        let svg = figure_to_svg(&figure, 72.0, &RenderMetrics::new());
        assert!(svg.contains("A&lt;B &amp; C"));
        assert!(svg.contains(r#"font-size="10.0""#));
    }
}
