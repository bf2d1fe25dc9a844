//! Figure rasterization.
//!
//! [`render_figure`] maps a [`Figure`] from data coordinates onto a device
//! surface and dispatches the result to a [`FigureRenderer`]. Backends only
//! see device-space shapes:
//!
//! - origin at the top-left, y increasing downward
//! - lengths in device pixels (points are converted with `dpi / 72`)
//! - non-finite input already removed
//!
//! Markers other than circles and both arrow kinds arrive as polygons, so a
//! backend needs only a handful of drawing calls.

pub mod svg;

pub use svg::{figure_to_svg, SvgRenderer};

use crate::figure::{
    Arrow, Color, Figure, MarkerShape, Markers, Point, Polyline, Primitive, Quiver, Text,
};
use crate::telemetry::RenderMetrics;

pub type DevicePoint = (f64, f64);

/// Width of the axes frame, in points.
const SPINE_WIDTH: f64 = 0.8;
const TICK_COUNT: usize = 5;
const TICK_LENGTH: f64 = 3.5;

/// Trait for drawing targets (SVG documents, GUI canvases, ...).
pub trait FigureRenderer {
    /// Start a page of `width` x `height` pixels.
    fn begin(&mut self, width: f64, height: f64);

    /// Fill an axis-aligned rectangle.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Color);

    /// Stroke an open path.
    fn polyline(&mut self, points: &[DevicePoint], color: Color, width: f64);

    /// Fill a closed polygon.
    fn polygon(&mut self, points: &[DevicePoint], fill: Color);

    /// Fill a circle.
    fn circle(&mut self, center: DevicePoint, radius: f64, fill: Color);

    /// Draw text with its baseline starting at `at`.
    fn text(&mut self, at: DevicePoint, content: &str, size: f64, color: Color);

    fn finish(&mut self);
}

/// Maps figure data coordinates onto a pixel surface.
///
/// The axes box follows matplotlib's default subplot parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpi: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Viewport {
    pub const DEFAULT_DPI: f64 = 100.0;

    pub fn new(width: f64, height: f64, dpi: f64) -> Self {
        Self {
            width,
            height,
            dpi,
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
        }
    }

    /// Page-sized viewport for `figure` at `dpi`.
    pub fn for_figure(figure: &Figure, dpi: f64) -> Self {
        let (w, h) = figure.size_inches;
        Self::new(w * dpi, h * dpi, dpi)
    }

    /// Axes box as `(x, y, width, height)` in device pixels.
    pub fn axes_rect(&self) -> (f64, f64, f64, f64) {
        let x = self.left * self.width;
        let y = (1.0 - self.top) * self.height;
        let w = (self.right - self.left) * self.width;
        let h = (self.top - self.bottom) * self.height;
        (x, y, w, h)
    }

    pub fn to_device(&self, figure: &Figure, point: Point) -> DevicePoint {
        let (ax, ay, aw, ah) = self.axes_rect();
        let (xmin, xmax) = figure.x_limits;
        let (ymin, ymax) = figure.y_limits;
        let fx = (point.x - xmin) / (xmax - xmin);
        let fy = (point.y - ymin) / (ymax - ymin);
        (ax + fx * aw, ay + (1.0 - fy) * ah)
    }

    /// Converts a length in points to pixels.
    pub fn points(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }

    fn contains(&self, device: DevicePoint) -> bool {
        let (x, y, w, h) = self.axes_rect();
        device.0 >= x && device.0 <= x + w && device.1 >= y && device.1 <= y + h
    }
}

/// Draws `figure` through `renderer`, counting drawn and skipped items.
pub fn render_figure<R: FigureRenderer>(
    figure: &Figure,
    viewport: &Viewport,
    renderer: &mut R,
    metrics: &RenderMetrics,
) {
    let mut pass = RenderPass {
        figure,
        viewport,
        renderer,
        drawn: 0,
        skipped: 0,
    };
    pass.run();
    metrics.record_figure();
    metrics.record_drawn(pass.drawn);
    metrics.record_skipped(pass.skipped);
}

struct RenderPass<'a, R> {
    figure: &'a Figure,
    viewport: &'a Viewport,
    renderer: &'a mut R,
    drawn: usize,
    skipped: usize,
}

impl<R: FigureRenderer> RenderPass<'_, R> {
    fn run(&mut self) {
        let vp = *self.viewport;
        self.renderer.begin(vp.width, vp.height);
        self.renderer.rect(0.0, 0.0, vp.width, vp.height, Color::WHITE);

        let (ax, ay, aw, ah) = vp.axes_rect();
        if let Some(face) = self.figure.face_color {
            self.renderer.rect(ax, ay, aw, ah, face);
        }

        for primitive in &self.figure.primitives {
            match primitive {
                Primitive::Polyline(line) => self.polyline(line),
                Primitive::Markers(markers) => self.markers(markers),
                Primitive::Quiver(quiver) => self.quiver(quiver),
                Primitive::Arrow(arrow) => self.arrow(arrow),
                Primitive::Text(text) => self.text(text),
            }
        }

        self.frame(ax, ay, aw, ah);
        self.renderer.finish();
    }

    fn device(&self, point: Point) -> DevicePoint {
        self.viewport.to_device(self.figure, point)
    }

    fn polyline(&mut self, line: &Polyline) {
        let width = self.viewport.points(line.width);
        let mut segment: Vec<DevicePoint> = Vec::new();
        for point in &line.points {
            if point.is_finite() {
                segment.push(self.device(*point));
                continue;
            }
            self.skipped += 1;
            self.flush_segment(&mut segment, line.color, width);
        }
        self.flush_segment(&mut segment, line.color, width);
    }

    fn flush_segment(&mut self, segment: &mut Vec<DevicePoint>, color: Color, width: f64) {
        if segment.len() >= 2 {
            self.renderer.polyline(segment, color, width);
            self.drawn += 1;
        }
        segment.clear();
    }

    fn markers(&mut self, markers: &Markers) {
        let radius = self.viewport.points(markers.size) / 2.0;
        for point in &markers.points {
            if !point.is_finite() {
                self.skipped += 1;
                continue;
            }
            let center = self.device(*point);
            match markers.shape {
                MarkerShape::Circle => self.renderer.circle(center, radius, markers.color),
                MarkerShape::Point => self.renderer.circle(center, radius / 2.0, markers.color),
                shape if shape.is_stroked() => {
                    let stroke = (radius / 4.0).max(1.0);
                    for bar in stroked_marker(shape, center, radius) {
                        self.renderer.polyline(&bar, markers.color, stroke);
                    }
                }
                shape => {
                    let outline = marker_outline(shape, center, radius);
                    self.renderer.polygon(&outline, markers.color);
                }
            }
            self.drawn += 1;
        }
    }

    fn quiver(&mut self, quiver: &Quiver) {
        let (_, _, axes_width, _) = self.viewport.axes_rect();
        let shaft = quiver.shaft_width * axes_width;
        for (origin, vector) in quiver.origins.iter().zip(&quiver.vectors) {
            let magnitude = vector.x.hypot(vector.y);
            if !origin.is_finite() || !vector.is_finite() || magnitude == 0.0 {
                self.skipped += 1;
                continue;
            }
            let length = magnitude / quiver.units_per_inch * self.viewport.dpi;
            let from = self.device(*origin);
            // Direction is taken in screen space, so y flips.
            let to = (
                from.0 + vector.x / magnitude * length,
                from.1 - vector.y / magnitude * length,
            );
            let outline = arrow_outline(
                from,
                to,
                shaft,
                quiver.head_length * shaft,
                quiver.head_width * shaft,
            );
            self.renderer.polygon(&outline, quiver.color);
            self.drawn += 1;
        }
    }

    fn arrow(&mut self, arrow: &Arrow) {
        if !arrow.from.is_finite() || !arrow.to.is_finite() {
            self.skipped += 1;
            return;
        }
        let from = self.device(arrow.from);
        let to = self.device(arrow.to);
        if arrow.clip && !self.viewport.contains(to) {
            self.skipped += 1;
            return;
        }
        let outline = arrow_outline(
            from,
            to,
            self.viewport.points(arrow.shaft_width),
            self.viewport.points(arrow.head_length),
            self.viewport.points(arrow.head_width),
        );
        if outline.is_empty() {
            self.skipped += 1;
            return;
        }
        self.renderer.polygon(&outline, arrow.color);
        self.drawn += 1;
    }

    fn text(&mut self, text: &Text) {
        if !text.at.is_finite() {
            self.skipped += 1;
            return;
        }
        let at = self.device(text.at);
        let size = self.viewport.points(text.font_size);
        self.renderer.text(at, &text.content, size, text.color);
        self.drawn += 1;
    }

    fn frame(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let spine = self.viewport.points(SPINE_WIDTH);
        let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)];
        self.renderer.polyline(&corners, Color::BLACK, spine);

        if !self.figure.show_ticks {
            return;
        }
        let tick = self.viewport.points(TICK_LENGTH);
        for i in 0..TICK_COUNT {
            let f = i as f64 / (TICK_COUNT - 1) as f64;
            let tx = x + f * w;
            let ty = y + h - f * h;
            self.renderer
                .polyline(&[(tx, y + h), (tx, y + h + tick)], Color::BLACK, spine);
            self.renderer
                .polyline(&[(x - tick, ty), (x, ty)], Color::BLACK, spine);
        }
    }
}

/// Filled arrow from `from` to `to`: a shaft of `shaft_width` ending in a
/// triangular head. Empty when the arrow has no length.
pub fn arrow_outline(
    from: DevicePoint,
    to: DevicePoint,
    shaft_width: f64,
    head_length: f64,
    head_width: f64,
) -> Vec<DevicePoint> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);
    let (nx, ny) = (-uy, ux);
    let head = head_length.min(length);
    let base = (to.0 - ux * head, to.1 - uy * head);
    let shaft = shaft_width / 2.0;
    let wing = (head_width / 2.0).max(shaft);
    let offset = |p: DevicePoint, d: f64| (p.0 + nx * d, p.1 + ny * d);
    vec![
        offset(from, shaft),
        offset(base, shaft),
        offset(base, wing),
        to,
        offset(base, -wing),
        offset(base, -shaft),
        offset(from, -shaft),
    ]
}

/// Polygon for filled marker shapes around `center`.
pub fn marker_outline(shape: MarkerShape, center: DevicePoint, radius: f64) -> Vec<DevicePoint> {
    let (cx, cy) = center;
    let polar = |angle_deg: f64, r: f64| {
        let a = angle_deg.to_radians();
        (cx + r * a.cos(), cy - r * a.sin())
    };
    match shape {
        MarkerShape::Square => vec![
            (cx - radius, cy - radius),
            (cx + radius, cy - radius),
            (cx + radius, cy + radius),
            (cx - radius, cy + radius),
        ],
        MarkerShape::Diamond => [0.0, 90.0, 180.0, 270.0]
            .iter()
            .map(|&a| polar(a, radius))
            .collect(),
        MarkerShape::TriangleUp => [90.0, 210.0, 330.0]
            .iter()
            .map(|&a| polar(a, radius))
            .collect(),
        MarkerShape::TriangleDown => [270.0, 30.0, 150.0]
            .iter()
            .map(|&a| polar(a, radius))
            .collect(),
        MarkerShape::Star => (0..10)
            .map(|i| {
                let r = if i % 2 == 0 { radius } else { radius * 0.38 };
                polar(90.0 + 36.0 * i as f64, r)
            })
            .collect(),
        // Round and stroked shapes have no polygon; approximate with an octagon.
        MarkerShape::Circle | MarkerShape::Point | MarkerShape::Plus | MarkerShape::Cross => {
            (0..8).map(|i| polar(45.0 * i as f64, radius)).collect()
        }
    }
}

fn stroked_marker(shape: MarkerShape, center: DevicePoint, r: f64) -> [[DevicePoint; 2]; 2] {
    let (cx, cy) = center;
    match shape {
        MarkerShape::Cross => [
            [(cx - r, cy - r), (cx + r, cy + r)],
            [(cx - r, cy + r), (cx + r, cy - r)],
        ],
        _ => [[(cx - r, cy), (cx + r, cy)], [(cx, cy - r), (cx, cy + r)]],
    }
}
