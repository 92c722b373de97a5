use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use patchgrid::{loader, page, svg, DisplayConfig};

#[derive(Parser, Debug)]
#[command(name = "patchgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the chart versions and color spaces of a workbook.
    Info(InfoArgs),
    /// Compute one chart's scene and dump it as JSON.
    Scene(SceneArgs),
    /// Render one chart as an SVG file.
    Svg(SvgArgs),
    /// Write the self-contained interactive viewer page.
    Page(PageArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input workbook (BabelColor ColorChecker_RGB_and_spectra.xlsx).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ChartArgs {
    /// Input workbook.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Chart version to display.
    #[arg(long)]
    version: String,

    /// Color space to display.
    #[arg(long)]
    space: String,

    /// Uniform figure scale factor.
    #[arg(long, default_value_t = patchgrid::model::DEFAULT_SCREEN_RATIO)]
    screen_ratio: f64,

    /// Side length of one patch, in plot units.
    #[arg(long, default_value_t = patchgrid::model::DEFAULT_PATCH_SIZE)]
    patch_size: f64,

    /// Label each patch with its raw channel values.
    #[arg(long, default_value_t = false)]
    labels: bool,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    chart: ChartArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Input workbook.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Page(args) => cmd_page(args),
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let table = loader::load_xlsx(&args.in_path)?;
    for version in table.version_names() {
        println!("{version}");
        for space in table.color_spaces(version)? {
            println!("  {space}");
        }
    }
    Ok(())
}

fn config_of(args: &ChartArgs) -> DisplayConfig {
    let mut cfg = DisplayConfig::new(args.version.clone(), args.space.clone());
    cfg.screen_ratio = args.screen_ratio;
    cfg.patch_size = args.patch_size;
    cfg.show_labels = args.labels;
    cfg
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let table = loader::load_xlsx(&args.chart.in_path)?;
    let scene = patchgrid::render(&table, &config_of(&args.chart))?;
    let json = serde_json::to_string_pretty(&scene).context("serialize scene")?;
    match args.out {
        Some(path) => fs::write(&path, json)
            .with_context(|| format!("write scene '{}'", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let table = loader::load_xlsx(&args.chart.in_path)?;
    let scene = patchgrid::render(&table, &config_of(&args.chart))?;
    fs::write(&args.out, svg::scene_to_svg(&scene))
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_page(args: PageArgs) -> anyhow::Result<()> {
    let table = loader::load_xlsx(&args.in_path)?;
    let html = page::viewer_page(&table)?;
    fs::write(&args.out, html)
        .with_context(|| format!("write page '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}
