//! Minimal HTML page around the rendered SVG

use crate::layout::{Primitive, Size};

use super::svg::{escape_xml, render_svg};
use super::{PageConfig, SvgConfig};

/// Wrap an SVG document in a full-viewport, centered HTML page
pub fn wrap_page(svg: &str, config: &PageConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <style>
        body, html {{
            margin: 0;
            padding: 0;
            height: 100%;
            width: 100%;
            display: flex;
            justify-content: center;
            align-items: center;
            overflow: hidden;
        }}
    </style>
</head>
<body>
{svg}
</body>
</html>
"#,
        title = escape_xml(&config.title),
        svg = svg
    )
}

/// Serialize positioned primitives into a complete HTML page
pub fn serialize(
    primitives: &[Primitive],
    canvas: Size,
    background_ref: &str,
    svg_config: &SvgConfig,
    page_config: &PageConfig,
) -> String {
    let svg = render_svg(primitives, canvas, background_ref, svg_config);
    wrap_page(&svg, page_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shell() {
        let page = wrap_page("<svg></svg>", &PageConfig::default());
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Output Image</title>"));
        assert!(page.contains("justify-content: center;"));
        assert!(page.contains("overflow: hidden;"));
        assert!(page.contains("<body>\n<svg></svg>\n</body>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = wrap_page("", &PageConfig::default().with_title("Floor <1>"));
        assert!(page.contains("<title>Floor &lt;1&gt;</title>"));
    }

    #[test]
    fn test_serialize_embeds_svg() {
        let page = serialize(
            &[],
            Size::new(10.0, 20.0),
            "bg.jpg",
            &SvgConfig::default(),
            &PageConfig::default(),
        );
        assert!(page.contains(r#"viewBox="0 0 10 20""#));
        assert!(page.contains(r#"href="bg.jpg""#));
    }
}
