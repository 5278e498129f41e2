use crate::config::{Config, load_config};
use crate::dataset::builtin_monitors;
use crate::ir::{MonitorSpec, SizeKey};
use crate::layout::Layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_monitors;
use crate::render::{render_html, render_svg, write_output};
use crate::state::ComparisonState;
use crate::store::MonitorStore;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "moncmp", version, about = "To-scale comparison of monitor sizes and resolutions")]
pub struct Args {
    /// Monitor list (.json5 or .js data file) or '-' for stdin. Uses the built-in list if omitted.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for text formats if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Compare physical sizes or pixel resolutions
    #[arg(short = 'm', long = "mode", value_enum, default_value = "display")]
    pub mode: Mode,

    /// Width of the graphics region in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// PNG canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Fixed scale, as X in 1:X
    #[arg(short = 's', long = "scale", value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,

    /// Enable every monitor before applying per-monitor switches
    #[arg(long = "all-on", conflicts_with = "all_off")]
    pub all_on: bool,

    /// Disable every monitor before applying per-monitor switches
    #[arg(long = "all-off")]
    pub all_off: bool,

    /// Flip every monitor before applying per-monitor switches
    #[arg(long = "toggle-all")]
    pub toggle_all: bool,

    /// Enable a monitor by id (repeatable)
    #[arg(long = "enable", value_name = "ID")]
    pub enable: Vec<String>,

    /// Disable a monitor by id (repeatable)
    #[arg(long = "disable", value_name = "ID")]
    pub disable: Vec<String>,

    /// Flip a monitor by id (repeatable)
    #[arg(long = "toggle", value_name = "ID")]
    pub toggle: Vec<String>,

    /// Draw one monitor in focus and dim the others
    #[arg(long = "highlight", value_name = "ID")]
    pub highlight: Option<String>,

    /// Caption rectangles with their legend index instead of the label
    #[arg(long = "index-labels")]
    pub index_labels: bool,

    /// Print the thumbnail image URL of a monitor and exit
    #[arg(long = "thumbnail", value_name = "ID")]
    pub thumbnail: Option<String>,

    /// Print monitor ids and their state and exit
    #[arg(long = "list")]
    pub list: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Display,
    Resolution,
}

impl From<Mode> for SizeKey {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Display => SizeKey::Display,
            Mode::Resolution => SizeKey::Resolution,
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = build_config(&args)?;

    let specs = read_monitors(args.input.as_deref())?;
    if specs.is_empty() {
        return Err(anyhow::anyhow!("No monitors found in input"));
    }
    let store = MonitorStore::new(specs, config.layout.default_enabled);
    let mut state = ComparisonState::new(store, config, args.mode.into());

    if let Some(id) = args.thumbnail.as_deref() {
        println!("{}", state.thumbnail_url(id)?);
        return Ok(());
    }
    if args.list {
        for monitor in state.store().iter_by_id() {
            let flag = if monitor.enabled { "on" } else { "off" };
            println!("{}\t{}\t{}", monitor.id, flag, monitor.label);
        }
        return Ok(());
    }

    let layout = apply_switches(&mut state, &args)?;
    let config = state.config();
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output(&svg, args.output.as_deref())?;
        }
        OutputFormat::Html => {
            let html = render_html(&layout, &config.theme, &config.layout);
            write_output(&html, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            write_layout_dump(args.output.as_deref(), &layout)?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&layout, config, &output)?;
        }
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.layout.container_width = width;
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if args.index_labels {
        config.layout.show_labels = false;
    }
    Ok(config)
}

/// Replays the command line switches as user actions, in the order a
/// page would see them, and returns the final layout.
fn apply_switches(state: &mut ComparisonState, args: &Args) -> Result<Layout> {
    let now = Instant::now();
    if args.all_on {
        state.enable_all(now);
    }
    if args.all_off {
        state.disable_all(now);
    }
    if args.toggle_all {
        state.toggle_all(now);
    }
    for id in &args.enable {
        state.set_enabled(id, true, now)?;
    }
    for id in &args.disable {
        state.set_enabled(id, false, now)?;
    }
    for id in &args.toggle {
        state.toggle(id, now)?;
    }

    let mut layout = match args.scale {
        Some(ratio) => state.set_scale(ratio),
        None => state.render(),
    };
    if let Some(id) = args.highlight.as_deref()
        && !layout.focus(id)
    {
        warn!(id, "highlighted monitor is not drawn");
    }
    Ok(layout)
}

fn read_monitors(path: Option<&Path>) -> Result<Vec<MonitorSpec>> {
    let Some(path) = path else {
        return Ok(builtin_monitors()?);
    };
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(parse_monitors(&content)?)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(layout: &Layout, config: &Config, output: &Path) -> Result<()> {
    let svg = render_svg(layout, &config.theme, &config.layout);
    crate::render::write_output_png(&svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_layout: &Layout, _config: &Config, _output: &Path) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
