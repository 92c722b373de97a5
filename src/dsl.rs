use std::collections::BTreeMap;

use crate::{
    colorspace::Encoding,
    core::GridShape,
    error::{PatchgridError, PatchgridResult},
    model::{ColorEntry, ColorTable, VersionChart},
};

/// Builds a [`ColorTable`] in memory; `build()` runs full validation so a
/// table that came out of a builder is always renderable.
pub struct ColorTableBuilder {
    versions: BTreeMap<String, VersionChart>,
}

impl Default for ColorTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTableBuilder {
    pub fn new() -> Self {
        Self {
            versions: BTreeMap::new(),
        }
    }

    pub fn version(mut self, name: impl Into<String>, chart: VersionChart) -> PatchgridResult<Self> {
        let name = name.into();
        if self.versions.contains_key(&name) {
            return Err(PatchgridError::data_load(format!(
                "duplicate chart version '{name}'"
            )));
        }
        self.versions.insert(name, chart);
        Ok(self)
    }

    pub fn build(self) -> PatchgridResult<ColorTable> {
        let table = ColorTable {
            versions: self.versions,
        };
        table.validate()?;
        Ok(table)
    }
}

pub struct VersionChartBuilder {
    grid: GridShape,
    spaces: BTreeMap<String, Encoding>,
    entries: Vec<ColorEntry>,
}

impl VersionChartBuilder {
    pub fn new(grid: GridShape) -> Self {
        Self {
            grid,
            spaces: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn space(mut self, name: impl Into<String>, encoding: Encoding) -> Self {
        self.spaces.insert(name.into(), encoding);
        self
    }

    pub fn patch<'a>(
        mut self,
        patch_index: u32,
        name: Option<&str>,
        values: impl IntoIterator<Item = (&'a str, [f64; 3])>,
    ) -> Self {
        self.entries.push(ColorEntry {
            patch_index,
            name: name.map(str::to_owned),
            values: values
                .into_iter()
                .map(|(space, triple)| (space.to_owned(), triple))
                .collect(),
        });
        self
    }

    pub fn build(self, version: &str) -> PatchgridResult<VersionChart> {
        if self.spaces.is_empty() {
            return Err(PatchgridError::data_load(format!(
                "version '{version}' declares no color spaces"
            )));
        }
        let chart = VersionChart {
            grid: self.grid,
            spaces: self.spaces,
            entries: self.entries,
        };
        chart.validate(version)?;
        Ok(chart)
    }
}
