//! SVG document assembly and serialization
//!
//! Turns a finished [`Tessellation`] plus a [`ColorSampler`] into a vector
//! markup document: one polygon per triangle, an optional `<defs>` block for
//! gradient fills, and optional debug overlays (hollow disk outlines and the
//! colored dead-edge loops).

use std::fmt;
use std::io::{self, Write};

use glam::Vec2;

use crate::color::{ColorSampler, HslColor};
use crate::tessellation::Tessellation;

/// How triangle fills are derived from the color sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// One flat color per triangle, sampled at its centroid
    #[default]
    Solid,
    /// One linear gradient per triangle between two of its vertices, with
    /// the stop colors sampled at those vertices
    Gradient,
}

/// Options for rendering a tessellation into a document
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Triangle fill style
    pub fill: FillMode,
    /// Overlay every disk as a hollow black outline
    pub draw_disks: bool,
    /// Overlay the closed dead-edge loops as colored line segments
    pub draw_loops: bool,
}

/// A single drawable SVG element
#[derive(Debug, Clone)]
pub enum Shape {
    /// Filled polygon
    Polygon {
        /// Vertex positions in drawing order
        points: Vec<Vec2>,
        /// Fill paint (a color string or a `url(#id)` reference)
        fill: String,
    },
    /// Circle outline or dot
    Circle {
        /// Center position
        center: Vec2,
        /// Radius
        radius: f32,
        /// Stroke color, omitted when `None`
        stroke: Option<String>,
        /// Stroke width, omitted when `None`
        stroke_width: Option<f32>,
        /// Fill opacity, omitted when `None`
        fill_opacity: Option<f32>,
    },
    /// Straight line segment
    Line {
        /// Start position
        from: Vec2,
        /// End position
        to: Vec2,
        /// Stroke color
        stroke: String,
        /// Stroke width
        width: f32,
    },
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Polygon { points, fill } => {
                write!(f, "<polygon points=\"")?;
                for p in points {
                    write!(f, "{:.1},{:.1} ", p.x, p.y)?;
                }
                write!(f, "\" style=\"fill:{};\" />", fill)
            }
            Shape::Circle {
                center,
                radius,
                stroke,
                stroke_width,
                fill_opacity,
            } => {
                write!(
                    f,
                    "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.1}\" ",
                    center.x, center.y, radius
                )?;
                if let Some(stroke) = stroke {
                    write!(f, "stroke=\"{}\" ", stroke)?;
                }
                if let Some(width) = stroke_width {
                    write!(f, "stroke-width=\"{}\" ", width)?;
                }
                if let Some(opacity) = fill_opacity {
                    write!(f, "fill-opacity=\"{}\" ", opacity)?;
                }
                write!(f, "/>")
            }
            Shape::Line {
                from,
                to,
                stroke,
                width,
            } => write!(
                f,
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\" />",
                from.x, from.y, to.x, to.y, stroke, width
            ),
        }
    }
}

/// A linear gradient definition for the document's `<defs>` block
#[derive(Debug, Clone)]
pub struct LinearGradient {
    /// Element id referenced by `url(#id)` fills
    pub id: String,
    /// Gradient axis start, in user space
    pub from: Vec2,
    /// Gradient axis end, in user space
    pub to: Vec2,
    /// Color at the start of the axis
    pub start: HslColor,
    /// Color at the end of the axis
    pub end: HslColor,
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\">",
            self.id, self.from.x, self.from.y, self.to.x, self.to.y
        )?;
        write!(f, "<stop offset=\"0%\" stop-color=\"{}\" />", self.start)?;
        write!(f, "<stop offset=\"100%\" stop-color=\"{}\" />", self.end)?;
        write!(f, "</linearGradient>")
    }
}

/// A complete SVG document
#[derive(Debug, Clone)]
pub struct Document {
    /// Canvas width attribute
    pub width: f32,
    /// Canvas height attribute
    pub height: f32,
    /// Gradient definitions, emitted inside `<defs>` when non-empty
    pub defs: Vec<LinearGradient>,
    /// Drawable elements in paint order
    pub shapes: Vec<Shape>,
}

impl Document {
    /// Create an empty document with the given canvas dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            defs: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Serialize the document to a writer
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "<!DOCTYPE svg>")?;
        writeln!(
            w,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
            self.width, self.height
        )?;
        if !self.defs.is_empty() {
            writeln!(w, "<defs>")?;
            for def in &self.defs {
                writeln!(w, "{}", def)?;
            }
            writeln!(w, "</defs>")?;
        }
        for shape in &self.shapes {
            writeln!(w, "{}", shape)?;
        }
        writeln!(w, "</svg>")
    }

    /// Serialize the document to a string
    pub fn to_svg_string(&self) -> String {
        let mut out = Vec::new();
        self.write_to(&mut out)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("SVG output is always UTF-8")
    }
}

/// Render a tessellation into an SVG document
///
/// # Example
///
/// ```
/// use rust_circle_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(42)
///     .canvas_size(CanvasSize::Small)
///     .build()
///     .unwrap();
/// let tess = Tessellation::generate(config).unwrap();
///
/// let field = PerlinColorField::new(config.color_seed, config.width(), config.height());
/// let doc = render(&tess, &field, &RenderOptions::default());
/// assert!(doc.to_svg_string().contains("<polygon"));
/// ```
pub fn render(
    tess: &Tessellation,
    sampler: &impl ColorSampler,
    options: &RenderOptions,
) -> Document {
    let config = tess.config();
    let mut doc = Document::new(config.width(), config.height());

    for (i, tri) in tess.triangles().iter().enumerate() {
        let points = tess.triangle_vertices(tri);
        let fill = match options.fill {
            FillMode::Solid => sampler.sample(tess.triangle_centroid(tri)).to_css(),
            FillMode::Gradient => {
                let id = format!("tri-grad-{}", i);
                doc.defs.push(LinearGradient {
                    id: id.clone(),
                    from: points[0],
                    to: points[2],
                    start: sampler.sample(points[0]),
                    end: sampler.sample(points[2]),
                });
                format!("url(#{})", id)
            }
        };
        doc.shapes.push(Shape::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    if options.draw_disks {
        for disk in tess.disks().iter() {
            doc.shapes.push(Shape::Circle {
                center: disk.center,
                radius: disk.radius,
                stroke: Some("black".to_string()),
                stroke_width: Some(2.0),
                fill_opacity: Some(0.0),
            });
        }
    }

    if options.draw_loops {
        for (i, l) in tess.loops().iter().enumerate() {
            let color = loop_color(i);
            for &(a, b) in l {
                doc.shapes.push(Shape::Line {
                    from: tess.disks().disk(a).center,
                    to: tess.disks().disk(b).center,
                    stroke: color.to_css(),
                    width: 2.0,
                });
            }
        }
    }

    doc
}

/// Deterministic highlight color for the i-th loop
///
/// Golden-angle hue steps keep consecutive loops visually distinct.
fn loop_color(index: usize) -> HslColor {
    HslColor::new((index as f32 * 137.508) % 360.0, 100.0, 60.0)
}
