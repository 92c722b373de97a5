//! Self-contained interactive viewer page.
//!
//! Every (version, color space) pair is rendered by the engine once, at
//! page build time, and embedded as SVG. The page's controls only select
//! which embedded chart is visible and apply the engine's documented
//! uniform scaling (screen ratio and patch size both scale the figure
//! linearly, labels toggle via CSS), so no layout or color math runs in
//! the browser.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::{
    engine::render,
    error::PatchgridResult,
    model::{ColorTable, DisplayConfig, DEFAULT_PATCH_SIZE},
    svg::scene_to_svg,
};

/// Screen-ratio choices offered by the viewer (10%..100%).
const RATIO_STEPS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
const DEFAULT_RATIO_STEP: f64 = 0.6;
/// Patch-size choices, as a fraction of the largest patch.
const SIZE_STEPS: [f64; 10] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
const DEFAULT_SIZE_STEP: f64 = 0.5;

/// Build the viewer page for a loaded table.
#[tracing::instrument(skip(table))]
pub fn viewer_page(table: &ColorTable) -> PatchgridResult<String> {
    // chart id per (version, space), plus the rendered SVG markup.
    let mut chart_ids: BTreeMap<&str, BTreeMap<&str, String>> = BTreeMap::new();
    let mut charts = String::new();

    for (vi, (version, chart)) in table.versions.iter().enumerate() {
        for (si, space) in chart.spaces.keys().enumerate() {
            let mut cfg = DisplayConfig::new(version.clone(), space.clone());
            cfg.show_labels = true; // labels are hidden or shown via CSS
            let scene = render(table, &cfg)?;

            let id = format!("chart-{vi}-{si}");
            let _ = write!(
                charts,
                "<div class=\"chart\" id=\"{id}\" data-frame-w=\"{:.1}\" data-frame-h=\"{:.1}\">\n{}</div>\n",
                scene.frame.width,
                scene.frame.height,
                scene_to_svg(&scene)
            );
            chart_ids
                .entry(version.as_str())
                .or_default()
                .insert(space.as_str(), id);
        }
    }

    let chart_map = serde_json::to_string(&chart_ids).map_err(anyhow::Error::from)?;
    let ratio_options = select_options(&RATIO_STEPS, DEFAULT_RATIO_STEP);
    let size_options = select_options(&SIZE_STEPS, DEFAULT_SIZE_STEP);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Color chart viewer</title>
<style>
  body {{ background: black; color: white; font-family: Arial, sans-serif; padding: 10px; }}
  .controls {{ display: flex; gap: 24px; align-items: center; margin-bottom: 12px; flex-wrap: wrap; }}
  .controls label {{ margin-right: 6px; }}
  .chart {{ display: none; }}
  .chart.active {{ display: block; }}
  .labels-off text {{ display: none; }}
</style>
</head>
<body>
<div class="controls">
  <span><label for="version">Chart version:</label><select id="version"></select></span>
  <span><label for="space">Color space:</label><select id="space"></select></span>
  <span><label for="ratio">Screen size ratio:</label><select id="ratio">{ratio_options}</select></span>
  <span><label for="size">Patch size:</label><select id="size">{size_options}</select></span>
  <span><label for="labels">Show values:</label><input type="checkbox" id="labels" checked></span>
</div>
<div id="charts">
{charts}</div>
<script>
const CHARTS = {chart_map};
const EMBEDDED_PATCH = {DEFAULT_PATCH_SIZE};
const version = document.getElementById('version');
const space = document.getElementById('space');
const ratio = document.getElementById('ratio');
const size = document.getElementById('size');
const labels = document.getElementById('labels');

function fill(select, names) {{
  const prev = select.value;
  select.innerHTML = '';
  for (const n of names) {{
    const o = document.createElement('option');
    o.value = n; o.textContent = n;
    select.appendChild(o);
  }}
  if (names.includes(prev)) select.value = prev;
}}

function update() {{
  fill(space, Object.keys(CHARTS[version.value]));
  const id = CHARTS[version.value][space.value];
  for (const div of document.querySelectorAll('.chart')) {{
    div.classList.toggle('active', div.id === id);
  }}
  const active = document.getElementById(id);
  // Patch size n% means a patch of n% of 100 units; the whole figure
  // scales uniformly with it and with the screen ratio.
  const scale = (parseFloat(size.value) * 100 / EMBEDDED_PATCH) * parseFloat(ratio.value);
  const svg = active.querySelector('svg');
  svg.setAttribute('width', (parseFloat(active.dataset.frameW) * scale).toFixed(1));
  svg.setAttribute('height', (parseFloat(active.dataset.frameH) * scale).toFixed(1));
  active.classList.toggle('labels-off', !labels.checked);
}}

fill(version, Object.keys(CHARTS));
for (const el of [version, space, ratio, size, labels]) el.addEventListener('change', update);
update();
</script>
</body>
</html>
"#
    ))
}

fn select_options(steps: &[f64], default_step: f64) -> String {
    let mut out = String::new();
    for &s in steps {
        let selected = if (s - default_step).abs() < 1e-9 {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            "<option value=\"{s}\"{selected}>{:.0}%</option>",
            s * 100.0
        );
    }
    out
}
