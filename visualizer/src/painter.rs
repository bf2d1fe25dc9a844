use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{Color, Pixels, Point, Size};
use metricaviz::figure::Color as FigureColor;
use metricaviz::render::{DevicePoint, FigureRenderer};

/// Paints rendered figure shapes onto an iced canvas frame.
pub struct CanvasPainter<'a> {
    frame: &'a mut Frame,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

fn to_iced(color: FigureColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.opacity() as f32)
}

fn to_point((x, y): DevicePoint) -> Point {
    Point::new(x as f32, y as f32)
}

fn trace(points: &[DevicePoint], close: bool) -> Path {
    Path::new(|builder| {
        let mut iter = points.iter().copied().map(to_point);
        if let Some(first) = iter.next() {
            builder.move_to(first);
            for point in iter {
                builder.line_to(point);
            }
            if close {
                builder.close();
            }
        }
    })
}

impl FigureRenderer for CanvasPainter<'_> {
    fn begin(&mut self, _width: f64, _height: f64) {}

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: FigureColor) {
        self.frame.fill_rectangle(
            Point::new(x as f32, y as f32),
            Size::new(width as f32, height as f32),
            to_iced(fill),
        );
    }

    fn polyline(&mut self, points: &[DevicePoint], color: FigureColor, width: f64) {
        self.frame.stroke(
            &trace(points, false),
            Stroke::default()
                .with_width(width as f32)
                .with_color(to_iced(color)),
        );
    }

    fn polygon(&mut self, points: &[DevicePoint], fill: FigureColor) {
        self.frame.fill(&trace(points, true), to_iced(fill));
    }

    fn circle(&mut self, center: DevicePoint, radius: f64, fill: FigureColor) {
        self.frame
            .fill(&Path::circle(to_point(center), radius as f32), to_iced(fill));
    }

    fn text(&mut self, at: DevicePoint, content: &str, size: f64, color: FigureColor) {
        // Canvas text is anchored at its top-left corner, figure text at the baseline.
        self.frame.fill_text(canvas::Text {
            content: content.to_string(),
            position: Point::new(at.0 as f32, (at.1 - size) as f32),
            color: to_iced(color),
            size: Pixels(size as f32),
            ..canvas::Text::default()
        });
    }

    fn finish(&mut self) {}
}
