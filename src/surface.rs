use crate::scene::{ArrowMarker, Frame, LinePrimitive, RectPrimitive, TextPrimitive};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface rejected {primitive}: {message}")]
    Rejected {
        primitive: &'static str,
        message: String,
    },
    #[error("failed to format SVG output")]
    Format,
}

impl From<std::fmt::Error> for SurfaceError {
    fn from(_: std::fmt::Error) -> Self {
        Self::Format
    }
}

/// A 2D target that accepts primitive draw calls. Hosts implement this for
/// whatever backs their view (an SVG element, a canvas, a test recorder).
pub trait DrawingSurface {
    /// Drops everything drawn so far, including marker definitions.
    fn clear(&mut self) -> Result<(), SurfaceError>;
    fn set_frame(&mut self, frame: &Frame) -> Result<(), SurfaceError>;
    fn define_marker(&mut self, marker: &ArrowMarker) -> Result<(), SurfaceError>;
    fn draw_rect(&mut self, rect: &RectPrimitive) -> Result<(), SurfaceError>;
    fn draw_text(&mut self, text: &TextPrimitive) -> Result<(), SurfaceError>;
    fn draw_line(&mut self, line: &LinePrimitive) -> Result<(), SurfaceError>;
}

/// Writes primitives as SVG elements. [`SvgSurface::finish`] wraps them in the
/// root `<svg>` element.
#[derive(Debug, Default, Clone)]
pub struct SvgSurface {
    frame: Option<Frame>,
    defs: String,
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&self) -> String {
        let (width, height) = self
            .frame
            .as_ref()
            .map(|frame| (frame.width, frame.height))
            .unwrap_or((0.0, 0.0));
        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        if let Some(frame) = &self.frame {
            svg.push_str(&format!(
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
                escape_xml(&frame.background)
            ));
        }
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }
}

impl DrawingSurface for SvgSurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.frame = None;
        self.defs.clear();
        self.body.clear();
        Ok(())
    }

    fn set_frame(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        self.frame = Some(frame.clone());
        Ok(())
    }

    fn define_marker(&mut self, marker: &ArrowMarker) -> Result<(), SurfaceError> {
        write!(
            self.defs,
            "<marker id=\"{}\" viewBox=\"0 -5 10 10\" refX=\"8\" refY=\"0\" markerWidth=\"{}\" markerHeight=\"{}\" orient=\"auto\"><path d=\"M0,-5L10,0L0,5\" fill=\"{}\"/></marker>",
            escape_xml(&marker.id),
            marker.size,
            marker.size,
            escape_xml(&marker.fill)
        )?;
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> Result<(), SurfaceError> {
        write!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" ry=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.corner_radius,
            rect.corner_radius,
            escape_xml(&rect.fill),
            escape_xml(&rect.stroke),
            rect.stroke_width
        )?;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> Result<(), SurfaceError> {
        write!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}px\" fill=\"{}\">{}</text>",
            text.x,
            text.y,
            escape_xml(&text.font_family),
            text.font_size,
            escape_xml(&text.fill),
            escape_xml(&text.text)
        )?;
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> Result<(), SurfaceError> {
        let marker = match &line.marker_end {
            Some(id) => format!(" marker-end=\"url(#{})\"", escape_xml(id)),
            None => String::new(),
        };
        write!(
            self.body,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"{marker}/>",
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            escape_xml(&line.stroke),
            line.stroke_width
        )?;
        Ok(())
    }
}

/// Keeps every primitive it receives. Optionally rejects draw calls after a
/// budget is spent, which lets hosts exercise failed passes.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub clears: usize,
    pub frame: Option<Frame>,
    pub markers: Vec<ArrowMarker>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub lines: Vec<LinePrimitive>,
    fail_after: Option<usize>,
    fail_once: bool,
    rejected: bool,
    draws: usize,
}

impl RecordingSurface {
    pub fn failing_after(draws: usize) -> Self {
        Self {
            fail_after: Some(draws),
            ..Self::default()
        }
    }

    /// Like [`RecordingSurface::failing_after`], but the budget is lifted by
    /// the first `clear` that follows a rejected draw.
    pub fn failing_once_after(draws: usize) -> Self {
        Self {
            fail_after: Some(draws),
            fail_once: true,
            ..Self::default()
        }
    }

    fn admit(&mut self, primitive: &'static str) -> Result<(), SurfaceError> {
        if let Some(limit) = self.fail_after {
            if self.draws >= limit {
                self.rejected = true;
                return Err(SurfaceError::Rejected {
                    primitive,
                    message: format!("draw budget of {limit} exhausted"),
                });
            }
        }
        self.draws += 1;
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.clears += 1;
        self.frame = None;
        self.markers.clear();
        self.rects.clear();
        self.texts.clear();
        self.lines.clear();
        self.draws = 0;
        if self.fail_once && self.rejected {
            self.fail_after = None;
        }
        Ok(())
    }

    fn set_frame(&mut self, frame: &Frame) -> Result<(), SurfaceError> {
        self.frame = Some(frame.clone());
        Ok(())
    }

    fn define_marker(&mut self, marker: &ArrowMarker) -> Result<(), SurfaceError> {
        self.admit("marker")?;
        self.markers.push(marker.clone());
        Ok(())
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) -> Result<(), SurfaceError> {
        self.admit("rect")?;
        self.rects.push(rect.clone());
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> Result<(), SurfaceError> {
        self.admit("text")?;
        self.texts.push(text.clone());
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> Result<(), SurfaceError> {
        self.admit("line")?;
        self.lines.push(line.clone());
        Ok(())
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
