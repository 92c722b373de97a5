use patchgrid::{render, ColorTable, DisplayConfig};

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 mixing function.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn fixture() -> ColorTable {
    let s = include_str!("data/classic_table.json");
    serde_json::from_str(s).unwrap()
}

fn scene_digest(table: &ColorTable, cfg: &DisplayConfig) -> u64 {
    let scene = render(table, cfg).unwrap();
    digest_u64(&serde_json::to_vec(&scene).unwrap())
}

#[test]
fn scene_is_byte_identical_across_calls() {
    let table = fixture();
    let version = "ColorChecker24 (before Nov 2014)";

    for space in ["sRGB", "Lab"] {
        for labels in [false, true] {
            let mut cfg = DisplayConfig::new(version, space);
            cfg.show_labels = labels;
            cfg.screen_ratio = 0.6;
            assert_eq!(
                scene_digest(&table, &cfg),
                scene_digest(&table, &cfg),
                "scene for {space} labels={labels} drifted between calls"
            );
        }
    }
}

#[test]
fn scene_digest_depends_on_inputs() {
    let table = fixture();
    let version = "ColorChecker24 (before Nov 2014)";

    let srgb = DisplayConfig::new(version, "sRGB");
    let lab = DisplayConfig::new(version, "Lab");
    assert_ne!(scene_digest(&table, &srgb), scene_digest(&table, &lab));

    let mut scaled = srgb.clone();
    scaled.screen_ratio = 0.5;
    assert_ne!(scene_digest(&table, &srgb), scene_digest(&table, &scaled));
}

#[test]
fn full_fixture_renders_every_patch() {
    let table = fixture();
    let mut cfg = DisplayConfig::new("ColorChecker24 (before Nov 2014)", "sRGB");
    cfg.show_labels = true;
    let scene = render(&table, &cfg).unwrap();

    assert_eq!(scene.shapes.len(), 24);
    assert_eq!(scene.annotations.len(), 24);

    // White patch (index 19) gets a dark label, black patch (24) a light one.
    let white = &scene.annotations[18];
    let black = &scene.annotations[23];
    assert_eq!(white.color, patchgrid::Rgb8::BLACK);
    assert_eq!(black.color, patchgrid::Rgb8::WHITE);
    assert_eq!(white.text, "243, 243, 242");
}
