//! The layout and color-mapping core: a pure function from
//! (table, config) to [`Scene`]. No clock, no RNG, no state across calls;
//! identical inputs produce identical output.

use crate::{
    colorspace::contrast_text_color,
    core::{Point, Size},
    error::{PatchgridError, PatchgridResult},
    model::{ColorTable, DisplayConfig},
    scene::{Annotation, Scene, Shape},
};

/// Compute the scene for one render request.
///
/// Patches are laid out row-major from the 1-based patch index
/// (left-to-right, top-to-bottom, matching the physical chart), each a
/// square of side `patch_size` in the local frame; `screen_ratio` scales
/// the figure uniformly, so the grid's aspect ratio is preserved. Fails
/// without producing a partial scene on the first invalid input.
#[tracing::instrument(skip(table, config), fields(version = %config.version, space = %config.color_space))]
pub fn render(table: &ColorTable, config: &DisplayConfig) -> PatchgridResult<Scene> {
    config.validate()?;
    let chart = table.version(&config.version)?;
    chart.validate(&config.version)?;

    let encoding = *chart
        .spaces
        .get(&config.color_space)
        .ok_or_else(|| PatchgridError::unknown_color_space(&config.color_space))?;

    let grid = chart.grid;
    let ps = config.patch_size;
    let frame = Size::new(f64::from(grid.cols) * ps, f64::from(grid.rows) * ps);
    let figure = Size::new(frame.width * config.screen_ratio, frame.height * config.screen_ratio);

    let entries = chart.ordered_entries();
    let mut shapes = Vec::with_capacity(entries.len());
    let mut annotations = Vec::new();

    for entry in entries {
        let raw = *entry
            .values
            .get(&config.color_space)
            .ok_or_else(|| PatchgridError::unknown_color_space(&config.color_space))?;
        let fill = encoding.to_rgb8(raw);

        // Unreachable after the validation above.
        let (row, col) = grid.cell_of(entry.patch_index).ok_or_else(|| {
            PatchgridError::data_load(format!(
                "patch index {} outside the {}x{} grid",
                entry.patch_index, grid.rows, grid.cols
            ))
        })?;
        let origin = Point::new(f64::from(col) * ps, f64::from(row) * ps);

        if config.show_labels {
            annotations.push(Annotation {
                center: Point::new(origin.x + ps / 2.0, origin.y + ps / 2.0),
                text: format_triple(raw),
                color: contrast_text_color(fill),
            });
        }

        shapes.push(Shape {
            patch_index: entry.patch_index,
            name: entry.name.clone(),
            origin,
            side: ps,
            fill,
        });
    }

    Ok(Scene {
        figure,
        frame,
        shapes,
        annotations,
    })
}

/// Raw triple as label text: whole channels print as integers, fractional
/// ones with one decimal, joined by ", ".
fn format_triple(v: [f64; 3]) -> String {
    fn channel(x: f64) -> String {
        if (x - x.round()).abs() < 1e-9 {
            format!("{}", x.round() as i64)
        } else {
            format!("{x:.1}")
        }
    }
    format!("{}, {}, {}", channel(v[0]), channel(v[1]), channel(v[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        colorspace::Encoding,
        core::{GridShape, Rgb8},
        dsl::{ColorTableBuilder, VersionChartBuilder},
    };

    fn classic_24() -> ColorTable {
        let mut chart = VersionChartBuilder::new(GridShape::new(4, 6).unwrap())
            .space("sRGB", Encoding::Rgb8)
            .space("Lab", Encoding::Lab);
        for i in 1..=24u32 {
            let v = f64::from(i) * 10.0 % 256.0;
            let name = format!("patch {i}");
            chart = chart.patch(
                i,
                Some(name.as_str()),
                [("sRGB", [v, 255.0 - v, 128.0]), ("Lab", [50.0, 10.0, -10.0])],
            );
        }
        ColorTableBuilder::new()
            .version("V1", chart.build("V1").unwrap())
            .unwrap()
            .build()
            .unwrap()
    }

    fn config() -> DisplayConfig {
        DisplayConfig::new("V1", "sRGB")
    }

    #[test]
    fn classic_4x6_layout() {
        // 24 patches, 4x6, patch_size 50, ratio 1.0.
        let table = classic_24();
        let scene = render(&table, &config()).unwrap();

        assert_eq!(scene.shapes.len(), 24);
        assert_eq!(scene.figure, Size::new(300.0, 200.0));
        assert_eq!(scene.frame, Size::new(300.0, 200.0));

        // patch_index 7 -> row 1, col 0 -> top-left (0, 50).
        let p7 = &scene.shapes[6];
        assert_eq!(p7.patch_index, 7);
        assert_eq!(p7.origin, Point::new(0.0, 50.0));
        assert_eq!(p7.side, 50.0);
    }

    #[test]
    fn shapes_follow_patch_index_order() {
        let table = classic_24();
        let scene = render(&table, &config()).unwrap();
        let order: Vec<u32> = scene.shapes.iter().map(|s| s.patch_index).collect();
        assert_eq!(order, (1..=24).collect::<Vec<u32>>());
    }

    #[test]
    fn screen_ratio_scales_figure_not_frame() {
        let table = classic_24();
        let mut cfg = config();
        cfg.screen_ratio = 0.6;
        let scene = render(&table, &cfg).unwrap();

        assert_eq!(scene.figure, Size::new(180.0, 120.0));
        assert_eq!(scene.frame, Size::new(300.0, 200.0));
        // Aspect ratio invariant under scaling.
        assert!((scene.figure.width / scene.figure.height - 6.0 / 4.0).abs() < 1e-12);
        // Shape coordinates stay in the local frame.
        assert_eq!(scene.shapes[6].origin, Point::new(0.0, 50.0));
    }

    #[test]
    fn dimensions_scale_linearly_with_patch_size() {
        let table = classic_24();
        let mut cfg = config();
        cfg.patch_size = 25.0;
        let scene = render(&table, &cfg).unwrap();
        assert_eq!(scene.figure, Size::new(150.0, 100.0));
        assert_eq!(scene.shapes[6].origin, Point::new(0.0, 25.0));
    }

    #[test]
    fn render_is_idempotent() {
        let table = classic_24();
        let mut cfg = config();
        cfg.show_labels = true;
        let a = render(&table, &cfg).unwrap();
        let b = render(&table, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn labels_only_when_enabled() {
        let table = classic_24();
        let scene = render(&table, &config()).unwrap();
        assert!(scene.annotations.is_empty());

        let mut cfg = config();
        cfg.show_labels = true;
        let scene = render(&table, &cfg).unwrap();
        assert_eq!(scene.annotations.len(), 24);

        // Centered in the patch square.
        assert_eq!(scene.annotations[6].center, Point::new(25.0, 75.0));
    }

    #[test]
    fn label_text_and_contrast() {
        let chart = VersionChartBuilder::new(GridShape::new(1, 2).unwrap())
            .space("sRGB", Encoding::Rgb8)
            .patch(1, None, [("sRGB", [250.0, 250.0, 250.0])])
            .patch(2, None, [("sRGB", [128.0, 64.5, 32.0])])
            .build("V")
            .unwrap();
        let table = ColorTableBuilder::new()
            .version("V", chart)
            .unwrap()
            .build()
            .unwrap();

        let mut cfg = DisplayConfig::new("V", "sRGB");
        cfg.show_labels = true;
        let scene = render(&table, &cfg).unwrap();

        assert_eq!(scene.annotations[0].text, "250, 250, 250");
        assert_eq!(scene.annotations[0].color, Rgb8::BLACK); // near-white fill
        assert_eq!(scene.annotations[1].text, "128, 64.5, 32");
    }

    #[test]
    fn unknown_color_space_produces_no_partial_scene() {
        let table = classic_24();
        let mut cfg = config();
        cfg.color_space = "XYZ".to_string();
        assert!(matches!(
            render(&table, &cfg),
            Err(PatchgridError::UnknownColorSpace(s)) if s == "XYZ"
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let table = classic_24();
        let mut cfg = config();
        cfg.version = "V9".to_string();
        assert!(matches!(
            render(&table, &cfg),
            Err(PatchgridError::UnknownVersion(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected_before_lookup() {
        let table = classic_24();
        let mut cfg = config();
        cfg.version = "V9".to_string(); // would also fail, but config goes first
        cfg.patch_size = 0.0;
        assert!(matches!(
            render(&table, &cfg),
            Err(PatchgridError::InvalidConfig(_))
        ));
    }
}
