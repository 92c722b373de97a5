//! Spreadsheet loader for the BabelColor ColorChecker workbook.
//!
//! The `RGB_8_bit` sheet carries three 24-patch chart versions stacked
//! vertically, with 19 RGB working-space column groups (three columns
//! each). All sheet values are 8-bit RGB, so every loaded space carries
//! [`Encoding::Rgb8`]. The loader's only job is mapping raw cells into
//! the [`ColorTable`] shape; everything downstream is the engine's.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::{
    colorspace::Encoding,
    core::GridShape,
    dsl::{ColorTableBuilder, VersionChartBuilder},
    error::{PatchgridError, PatchgridResult},
    model::ColorTable,
};

const SHEET: &str = "RGB_8_bit";

/// Rows holding the chart version names (0-based, column 0).
const VERSION_NAME_ROWS: [u32; 3] = [1, 30, 59];
/// First data row of each version block.
const VERSION_DATA_ROWS: [u32; 3] = [4, 33, 62];
/// Patches per version block.
const PATCHES_PER_VERSION: u32 = 24;

/// Row holding the color-space labels.
const SPACE_HEADER_ROW: u32 = 1;
/// First column of the first space group; groups are three columns wide.
const SPACE_FIRST_COL: u32 = 8;
const SPACE_COUNT: u32 = 19;

/// Column holding the patch name within a data row.
const NAME_COL: u32 = 1;

/// Load a ColorTable from a BabelColor workbook. Fails with a data load
/// error when the file, sheet, or any declared triple is missing or
/// malformed; never returns a partially loaded table.
#[tracing::instrument]
pub fn load_xlsx(path: &Path) -> PatchgridResult<ColorTable> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        PatchgridError::data_load(format!("cannot open workbook '{}': {e}", path.display()))
    })?;
    let range = workbook.worksheet_range(SHEET).map_err(|e| {
        PatchgridError::data_load(format!("workbook has no '{SHEET}' sheet: {e}"))
    })?;

    let spaces = read_space_labels(&range)?;
    tracing::debug!(spaces = spaces.len(), "workbook color spaces");

    let mut table = ColorTableBuilder::new();
    for (&name_row, &data_row) in VERSION_NAME_ROWS.iter().zip(&VERSION_DATA_ROWS) {
        let version = cell_str(&range, name_row, 0).ok_or_else(|| {
            PatchgridError::data_load(format!("missing version name at row {name_row}"))
        })?;
        let chart = read_version_block(&range, &version, data_row, &spaces)?;
        table = table.version(version, chart)?;
    }
    table.build()
}

fn read_space_labels(range: &Range<Data>) -> PatchgridResult<Vec<(String, u32)>> {
    let mut spaces = Vec::with_capacity(SPACE_COUNT as usize);
    for i in 0..SPACE_COUNT {
        let col = SPACE_FIRST_COL + i * 3;
        let label = cell_str(range, SPACE_HEADER_ROW, col).ok_or_else(|| {
            PatchgridError::data_load(format!(
                "missing color space label at row {SPACE_HEADER_ROW}, column {col}"
            ))
        })?;
        spaces.push((label, col));
    }
    Ok(spaces)
}

fn read_version_block(
    range: &Range<Data>,
    version: &str,
    data_row: u32,
    spaces: &[(String, u32)],
) -> PatchgridResult<crate::model::VersionChart> {
    let grid = GridShape::for_patch_count(PATCHES_PER_VERSION).ok_or_else(|| {
        PatchgridError::data_load(format!("no known grid shape for {PATCHES_PER_VERSION} patches"))
    })?;

    let mut chart = VersionChartBuilder::new(grid);
    for (label, _) in spaces {
        chart = chart.space(label, Encoding::Rgb8);
    }

    for offset in 0..PATCHES_PER_VERSION {
        let row = data_row + offset;
        let patch_index = offset + 1;
        let name = cell_str(range, row, NAME_COL);

        let mut values = Vec::with_capacity(spaces.len());
        for (label, col) in spaces {
            let triple = read_triple(range, row, *col).ok_or_else(|| {
                PatchgridError::data_load(format!(
                    "version '{version}' patch {patch_index} lacks a complete \
                     '{label}' triple at row {row}"
                ))
            })?;
            values.push((label.as_str(), triple));
        }
        chart = chart.patch(patch_index, name.as_deref(), values);
    }

    chart.build(version)
}

fn read_triple(range: &Range<Data>, row: u32, col: u32) -> Option<[f64; 3]> {
    Some([
        cell_f64(range, row, col)?,
        cell_f64(range, row, col + 1)?,
        cell_f64(range, row, col + 2)?,
    ])
}

fn cell_f64(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col))? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

fn cell_str(range: &Range<Data>, row: u32, col: u32) -> Option<String> {
    match range.get_value((row, col))? {
        Data::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_data_load_error() {
        let err = load_xlsx(Path::new("does/not/exist.xlsx")).unwrap_err();
        assert!(matches!(err, PatchgridError::DataLoad(_)));
        assert!(err.to_string().contains("does/not/exist.xlsx"));
    }

    #[test]
    fn cell_readers_filter_by_type() {
        let mut range = Range::new((0, 0), (0, 3));
        range.set_value((0, 0), Data::Float(1.5));
        range.set_value((0, 1), Data::Int(2));
        range.set_value((0, 2), Data::String("  sRGB  ".to_owned()));
        range.set_value((0, 3), Data::String(String::new()));

        assert_eq!(cell_f64(&range, 0, 0), Some(1.5));
        assert_eq!(cell_f64(&range, 0, 1), Some(2.0));
        assert_eq!(cell_f64(&range, 0, 2), None);
        assert_eq!(cell_str(&range, 0, 2).as_deref(), Some("sRGB"));
        assert_eq!(cell_str(&range, 0, 3), None);
        assert_eq!(cell_f64(&range, 1, 0), None);
    }

    #[test]
    fn read_triple_requires_all_three_channels() {
        let mut range = Range::new((0, 0), (0, 2));
        range.set_value((0, 0), Data::Float(10.0));
        range.set_value((0, 1), Data::Float(20.0));
        assert_eq!(read_triple(&range, 0, 0), None);

        range.set_value((0, 2), Data::Float(30.0));
        assert_eq!(read_triple(&range, 0, 0), Some([10.0, 20.0, 30.0]));
    }
}
