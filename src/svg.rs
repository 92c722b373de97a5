//! Scene -> SVG string. Pure presentation glue: the viewBox is the
//! scene's local frame and the width/height attributes carry the scaled
//! figure size, so the markup preserves the engine's uniform scaling.

use std::fmt::Write as _;

use crate::scene::Scene;

/// Chart background, matching the viewer's dark canvas.
const BACKGROUND: &str = "black";

pub fn scene_to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.1}\" height=\"{:.1}\" \
         viewBox=\"0 0 {:.1} {:.1}\">\n",
        scene.figure.width, scene.figure.height, scene.frame.width, scene.frame.height
    );
    let _ = write!(
        out,
        "  <rect width=\"{:.1}\" height=\"{:.1}\" fill=\"{BACKGROUND}\"/>\n",
        scene.frame.width, scene.frame.height
    );

    for shape in &scene.shapes {
        let _ = write!(
            out,
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
            shape.origin.x,
            shape.origin.y,
            shape.side,
            shape.side,
            shape.fill.css()
        );
    }

    // Label size follows the patch so text stays inside its square.
    let font_size = scene.shapes.first().map_or(12.0, |s| s.side * 0.18);
    for ann in &scene.annotations {
        let _ = write!(
            out,
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"Arial\" \
             font-size=\"{font_size:.1}\" text-anchor=\"middle\" \
             dominant-baseline=\"central\" fill=\"{}\">{}</text>\n",
            ann.center.x,
            ann.center.y,
            ann.color.css(),
            escape(&ann.text)
        );
    }

    out.push_str("</svg>\n");
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colorspace::Encoding,
        core::GridShape,
        dsl::{ColorTableBuilder, VersionChartBuilder},
        engine::render,
        model::DisplayConfig,
    };

    fn scene(show_labels: bool) -> Scene {
        let chart = VersionChartBuilder::new(GridShape::new(1, 2).unwrap())
            .space("sRGB", Encoding::Rgb8)
            .patch(1, None, [("sRGB", [255.0, 0.0, 0.0])])
            .patch(2, None, [("sRGB", [0.0, 0.0, 0.0])])
            .build("V")
            .unwrap();
        let table = ColorTableBuilder::new()
            .version("V", chart)
            .unwrap()
            .build()
            .unwrap();
        let mut cfg = DisplayConfig::new("V", "sRGB");
        cfg.show_labels = show_labels;
        render(&table, &cfg).unwrap()
    }

    #[test]
    fn svg_carries_figure_size_and_one_rect_per_patch() {
        let svg = scene_to_svg(&scene(false));
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("width=\"100.0\" height=\"50.0\""));
        assert!(svg.contains("viewBox=\"0 0 100.0 50.0\""));
        // Background plus two patches.
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains("fill=\"rgb(255,0,0)\""));
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn labels_render_as_centered_text() {
        let svg = scene_to_svg(&scene(true));
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.contains("text-anchor=\"middle\""));
        // Black patch gets a white label.
        assert!(svg.contains("fill=\"rgb(255,255,255)\">0, 0, 0</text>"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape("a<b&c"), "a&lt;b&amp;c");
    }
}
