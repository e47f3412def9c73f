//! SVG generation from layout primitives

use crate::layout::{BoundingBox, Point, Primitive, Rgb, Size, TextBlock, TextRole};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn class_attr(&self, kind: &str) -> String {
        match &self.config.class_prefix {
            Some(prefix) => format!(r#" class="{}{}""#, prefix, kind),
            None => String::new(),
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add an image element
    pub fn add_image(&mut self, href: &str, bounds: &BoundingBox) {
        self.elements.push(format!(
            r#"{}<image{} href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            self.class_attr("background"),
            escape_xml(href),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        ));
    }

    /// Add an unfilled zone outline
    pub fn add_rect(&mut self, bounds: &BoundingBox) {
        self.elements.push(format!(
            r#"{}<rect{} x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            self.class_attr("zone"),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            self.config.zone_stroke,
            self.config.zone_stroke_width
        ));
    }

    /// Add a text element with one tspan per line
    pub fn add_text_block(&mut self, block: &TextBlock) {
        let kind = match block.role {
            TextRole::ZoneLabel => "label",
            TextRole::Badge => "badge",
        };
        let spans: String = block
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let dy = if i == 0 { 0.0 } else { block.font_size };
                format!(
                    r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                    block.x,
                    dy,
                    escape_xml(line)
                )
            })
            .collect();

        self.elements.push(format!(
            r#"{}<text{} x="{}" y="{}" font-size="{}" fill="{}">{}</text>"#,
            self.indent_str(),
            self.class_attr(kind),
            block.x,
            block.y,
            block.font_size,
            self.config.text_fill,
            spans
        ));
    }

    /// Add a filled marker circle
    pub fn add_circle(&mut self, center: Point, radius: f64, color: Rgb) {
        self.elements.push(format!(
            r#"{}<circle{} cx="{}" cy="{}" r="{}" fill="{}" stroke="{}"/>"#,
            self.indent_str(),
            self.class_attr("marker"),
            center.x,
            center.y,
            radius,
            color,
            color
        ));
    }

    /// Build the final SVG string
    pub fn build(self, canvas: Size) -> String {
        let nl = self.newline();

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg{} viewBox="0 0 {} {}" width="100%" height="100%" xmlns="http://www.w3.org/2000/svg">"#,
            self.class_attr("scene"),
            canvas.width,
            canvas.height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render primitives over a background image to an SVG string
///
/// The background is drawn first at canvas size, then each primitive in the
/// order given. Coordinates are written as-is, including ones that fall
/// outside the canvas.
pub fn render_svg(
    primitives: &[Primitive],
    canvas: Size,
    background_ref: &str,
    config: &SvgConfig,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    let background = Primitive::Image {
        href: background_ref.to_string(),
        bounds: BoundingBox::new(0.0, 0.0, canvas.width, canvas.height),
    };
    render_primitive(&background, &mut builder);

    for primitive in primitives {
        render_primitive(primitive, &mut builder);
    }

    builder.build(canvas)
}

/// Render a single primitive to the builder
fn render_primitive(primitive: &Primitive, builder: &mut SvgBuilder) {
    match primitive {
        Primitive::Image { href, bounds } => builder.add_image(href, bounds),
        Primitive::Rect { bounds } => builder.add_rect(bounds),
        Primitive::Text(block) => builder.add_text_block(block),
        Primitive::Circle {
            center,
            radius,
            color,
        } => builder.add_circle(*center, *radius, *color),
    }
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> SvgConfig {
        SvgConfig::default()
            .with_pretty_print(false)
            .without_class_prefix()
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("Bob's \"Den\""), "Bob&apos;s &quot;Den&quot;");
    }

    #[test]
    fn test_background_comes_first() {
        let svg = render_svg(&[], Size::new(640.0, 480.0), "bg.jpg", &compact());
        assert_eq!(
            svg,
            r#"<svg viewBox="0 0 640 480" width="100%" height="100%" xmlns="http://www.w3.org/2000/svg"><image href="bg.jpg" x="0" y="0" width="640" height="480"/></svg>"#
        );
    }

    #[test]
    fn test_rect_outline() {
        let primitives = [Primitive::Rect {
            bounds: BoundingBox::new(0.0, 0.0, 100.0, 40.0),
        }];
        let svg = render_svg(&primitives, Size::new(100.0, 100.0), "bg.jpg", &compact());
        assert!(svg.contains(
            r#"<rect x="0" y="0" width="100" height="40" fill="none" stroke="black" stroke-width="2"/>"#
        ));
    }

    #[test]
    fn test_text_block_tspans() {
        let mut builder = SvgBuilder::new(compact());
        builder.add_text_block(&TextBlock {
            x: 8.0,
            y: 30.0,
            lines: vec!["Master Bedroom".into(), "Suite".into()],
            font_size: 20.0,
            role: TextRole::ZoneLabel,
        });
        insta::assert_snapshot!(
            builder.elements[0],
            @r#"<text x="8" y="30" font-size="20" fill="black"><tspan x="8" dy="0">Master Bedroom</tspan><tspan x="8" dy="20">Suite</tspan></text>"#
        );
    }

    #[test]
    fn test_circle_uses_color_for_fill_and_stroke() {
        let primitives = [Primitive::Circle {
            center: Point::new(5.0, 6.0),
            radius: 10.0,
            color: Rgb::new(255, 0, 0),
        }];
        let svg = render_svg(&primitives, Size::new(100.0, 100.0), "bg.jpg", &compact());
        assert!(svg.contains(
            r#"<circle cx="5" cy="6" r="10" fill="rgb(255, 0, 0)" stroke="rgb(255, 0, 0)"/>"#
        ));
    }

    #[test]
    fn test_class_prefix_and_pretty_print() {
        let primitives = [Primitive::Rect {
            bounds: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
        }];
        let svg = render_svg(&primitives, Size::new(10.0, 10.0), "bg.png", &SvgConfig::default());
        let lines: Vec<&str> = svg.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(r#"<svg class="zo-scene""#));
        assert!(lines[1].starts_with(r#"  <image class="zo-background""#));
        assert!(lines[2].starts_with(r#"  <rect class="zo-zone""#));
        assert_eq!(lines[3], "</svg>");
    }

    #[test]
    fn test_primitive_order_preserved() {
        let primitives = [
            Primitive::Circle {
                center: Point::new(0.0, 0.0),
                radius: 1.0,
                color: Rgb::BLACK,
            },
            Primitive::Rect {
                bounds: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            },
        ];
        let svg = render_svg(&primitives, Size::new(10.0, 10.0), "bg", &compact());
        let circle = svg.find("<circle").unwrap();
        let rect = svg.find("<rect").unwrap();
        assert!(circle < rect);
    }

    #[test]
    fn test_off_canvas_written_as_is() {
        let primitives = [Primitive::Rect {
            bounds: BoundingBox::new(-50.0, 900.0, 10.0, 10.0),
        }];
        let svg = render_svg(&primitives, Size::new(100.0, 100.0), "bg", &compact());
        assert!(svg.contains(r#"x="-50" y="900""#));
    }
}
