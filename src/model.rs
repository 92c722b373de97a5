use std::collections::BTreeMap;

use crate::{
    colorspace::Encoding,
    core::GridShape,
    error::{PatchgridError, PatchgridResult},
};

/// One patch of one chart version. `values` holds the raw three-channel
/// value per declared color space, in that space's native range.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColorEntry {
    pub patch_index: u32, // 1-based, defines grid position and reading order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub values: BTreeMap<String, [f64; 3]>,
}

/// All entries of one chart version plus its fixed grid shape and the
/// color spaces it declares (with how each one encodes its triples).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VersionChart {
    pub grid: GridShape,
    pub spaces: BTreeMap<String, Encoding>, // stable keys
    pub entries: Vec<ColorEntry>,
}

/// Immutable collection of chart versions, loaded once per process and
/// passed by reference into every render call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ColorTable {
    pub versions: BTreeMap<String, VersionChart>,
}

/// One render request. Transient; nothing outlives the call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DisplayConfig {
    pub version: String,
    pub color_space: String,
    pub screen_ratio: f64,
    pub patch_size: f64,
    pub show_labels: bool,
}

pub const DEFAULT_SCREEN_RATIO: f64 = 1.0;
pub const DEFAULT_PATCH_SIZE: f64 = 50.0;

impl DisplayConfig {
    pub fn new(version: impl Into<String>, color_space: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            color_space: color_space.into(),
            screen_ratio: DEFAULT_SCREEN_RATIO,
            patch_size: DEFAULT_PATCH_SIZE,
            show_labels: false,
        }
    }

    pub fn validate(&self) -> PatchgridResult<()> {
        if !(self.screen_ratio > 0.0) || !self.screen_ratio.is_finite() {
            return Err(PatchgridError::invalid_config(
                "screen_ratio must be a positive finite number",
            ));
        }
        if !(self.patch_size > 0.0) || !self.patch_size.is_finite() {
            return Err(PatchgridError::invalid_config(
                "patch_size must be a positive finite number",
            ));
        }
        Ok(())
    }
}

impl VersionChart {
    pub fn validate(&self, version: &str) -> PatchgridResult<()> {
        let count = self.entries.len() as u32;
        if u64::from(count) != self.grid.patch_count() {
            return Err(PatchgridError::data_load(format!(
                "version '{version}' has {count} entries but a {}x{} grid",
                self.grid.rows, self.grid.cols
            )));
        }

        // patch_index values must be the contiguous range 1..=count.
        let mut seen = vec![false; count as usize];
        for entry in &self.entries {
            let i = entry.patch_index;
            if i == 0 || i > count {
                return Err(PatchgridError::data_load(format!(
                    "version '{version}' patch index {i} outside 1..={count}"
                )));
            }
            if std::mem::replace(&mut seen[(i - 1) as usize], true) {
                return Err(PatchgridError::data_load(format!(
                    "version '{version}' has duplicate patch index {i}"
                )));
            }

            for space in self.spaces.keys() {
                let triple = entry.values.get(space).ok_or_else(|| {
                    PatchgridError::data_load(format!(
                        "version '{version}' patch {i} lacks a complete triple for '{space}'"
                    ))
                })?;
                if triple.iter().any(|v| !v.is_finite()) {
                    return Err(PatchgridError::data_load(format!(
                        "version '{version}' patch {i} has a non-finite '{space}' channel"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Entries in patch-index (reading) order.
    pub fn ordered_entries(&self) -> Vec<&ColorEntry> {
        let mut out: Vec<&ColorEntry> = self.entries.iter().collect();
        out.sort_by_key(|e| e.patch_index);
        out
    }
}

impl ColorTable {
    pub fn validate(&self) -> PatchgridResult<()> {
        if self.versions.is_empty() {
            return Err(PatchgridError::data_load(
                "color table has no chart versions",
            ));
        }
        for (version, chart) in &self.versions {
            chart.validate(version)?;
        }
        Ok(())
    }

    /// Available chart version identifiers, in stable order.
    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    pub fn version(&self, name: &str) -> PatchgridResult<&VersionChart> {
        self.versions
            .get(name)
            .ok_or_else(|| PatchgridError::unknown_version(name))
    }

    /// Available color spaces for one version, in stable order.
    pub fn color_spaces(&self, version: &str) -> PatchgridResult<impl Iterator<Item = &str>> {
        Ok(self.version(version)?.spaces.keys().map(String::as_str))
    }
}
