use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Instant;

use visitmap::config::FileConfig;
use visitmap::domain::{FeatureSet, HighlightSet};
use visitmap::gesture::{self, GestureController, MapEvent, MapListener};
use visitmap::loader::{load_features, load_highlights};
use visitmap::render::{self, HitTester, SvgSurface, anchor_point, build_path, write_svg};
use visitmap::{Projector, ViewportTransform};

/// Render and explore a world map of visited countries
///
/// Examples:
///   # Render countries with visited ones highlighted
///   visitmap render countries.geojson --visited visited.txt -o map.svg
///
///   # Render the view left behind by a recorded pan/zoom session
///   visitmap render countries.geojson --events session.json
///
///   # Replay a gesture recording and print clicks and transforms
///   visitmap replay countries.geojson session.json
#[derive(Parser, Debug)]
#[command(name = "visitmap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches visitmap.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logical canvas width in plane units
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Logical canvas height in plane units
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the map to SVG
    Render {
        /// GeoJSON FeatureCollection of country boundaries
        geojson: PathBuf,

        /// Visited ids (JSON array or one id per line)
        #[arg(long)]
        visited: Option<PathBuf>,

        /// Gesture recording to replay before rendering
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output SVG file path
        #[arg(short = 'o', long, default_value = "map.svg")]
        output: PathBuf,

        /// Skip country labels
        #[arg(long)]
        no_labels: bool,
    },
    /// Replay a gesture recording and report clicks and transforms
    Replay {
        /// GeoJSON FeatureCollection of country boundaries
        geojson: PathBuf,

        /// JSON array of input events
        script: PathBuf,

        /// Visited ids to start from; clicks toggle membership
        #[arg(long)]
        visited: Option<PathBuf>,
    },
    /// Print the loaded features with their label anchors
    Info {
        /// GeoJSON FeatureCollection of country boundaries
        geojson: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            FileConfig::load_from(config_path)
                .with_context(|| format!("Failed to load config file: {:?}", config_path))?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    if !config.canvas.is_valid() {
        bail!(
            "Canvas size must be finite and positive, got {}x{}",
            config.canvas.width,
            config.canvas.height
        );
    }

    match args.command {
        Command::Render {
            geojson,
            visited,
            events,
            output,
            no_labels,
        } => {
            if no_labels {
                config.style.labels = false;
            }
            run_render(
                &config,
                &geojson,
                visited.as_deref(),
                events.as_deref(),
                &output,
            )
        }
        Command::Replay {
            geojson,
            script,
            visited,
        } => run_replay(&config, &geojson, &script, visited.as_deref()),
        Command::Info { geojson } => run_info(&config, &geojson),
    }
}

fn run_render(
    config: &FileConfig,
    geojson: &Path,
    visited: Option<&Path>,
    events: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let total_start = Instant::now();
    let projector = Projector::new(config.canvas.width, config.canvas.height);
    let features = load_map(config, geojson)?;
    let highlights = load_visited(visited, &features)?;

    let transform = match events {
        Some(script) => {
            let hits = HitTester::new(&features, &projector);
            let (transform, _) = replay_script(config, script, &hits)?;
            transform
        }
        None => ViewportTransform::default(),
    };

    let spinner = create_spinner("Rendering map...");
    let start = Instant::now();
    let mut surface = SvgSurface::new(
        config.canvas.width,
        config.canvas.height,
        transform,
        config.style.clone(),
    );
    let stats = render::render_map(
        &mut surface,
        &features,
        &highlights,
        &transform,
        &projector,
        &config.style,
    );
    let svg = surface.finish();
    write_svg(output, &svg).context("Failed to write SVG file")?;
    spinner.finish_with_message(format!(
        "Drew {} countries ({} visited, {} labels, {} empty) [{:.1}s]",
        stats.drawn,
        stats.highlighted,
        stats.labels,
        stats.skipped,
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!("Output: {}", output.display());

    Ok(())
}

/// Prints every map event and toggles visited countries on click
struct ReplayLog {
    visited: HighlightSet,
    clicks: usize,
}

impl MapListener for ReplayLog {
    fn on_feature_clicked(&mut self, id: &str) {
        self.clicks += 1;
        let now_visited = self.visited.toggle(id);
        println!(
            "click    {} ({})",
            id,
            if now_visited { "visited" } else { "unvisited" }
        );
    }

    fn on_transform_changed(&mut self, transform: &ViewportTransform) {
        println!(
            "view     k={:.3} x={:.2} y={:.2}",
            transform.k(),
            transform.x(),
            transform.y()
        );
    }
}

fn run_replay(
    config: &FileConfig,
    geojson: &Path,
    script: &Path,
    visited: Option<&Path>,
) -> Result<()> {
    let projector = Projector::new(config.canvas.width, config.canvas.height);
    let features = load_map(config, geojson)?;
    let hits = HitTester::new(&features, &projector);

    let mut log = ReplayLog {
        visited: load_visited(visited, &features)?,
        clicks: 0,
    };

    let (transform, events) = replay_script(config, script, &hits)?;
    for event in &events {
        event.dispatch(&mut log);
    }

    println!();
    println!("Clicks: {}", log.clicks);
    println!("Visited: {} of {}", log.visited.len(), features.len());
    println!(
        "Final transform: {}",
        serde_json::to_string(&transform).context("Failed to serialise transform")?
    );

    Ok(())
}

fn run_info(config: &FileConfig, geojson: &Path) -> Result<()> {
    let projector = Projector::new(config.canvas.width, config.canvas.height);
    let features = load_map(config, geojson)?;

    println!("{:<8} {:<40} {:>9} {:>18}", "ID", "NAME", "SUBPATHS", "ANCHOR");
    for feature in features.iter() {
        let subpaths = build_path(feature, &projector).subpaths();
        let anchor = anchor_point(feature, &projector)
            .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<40} {:>9} {:>18}",
            feature.id, feature.name, subpaths, anchor
        );
    }
    println!();
    println!("{} features", features.len());

    Ok(())
}

fn load_map(config: &FileConfig, geojson: &Path) -> Result<FeatureSet> {
    let spinner = create_spinner("Loading country boundaries...");
    let start = Instant::now();
    let features = load_features(geojson, &config.loader)
        .with_context(|| format!("Failed to load GeoJSON: {}", geojson.display()))?;
    if features.is_empty() {
        bail!("No usable features found in {}", geojson.display());
    }
    spinner.finish_with_message(format!(
        "Loaded {} countries [{:.1}s]",
        features.len(),
        start.elapsed().as_secs_f32()
    ));
    Ok(features)
}

fn load_visited(path: Option<&Path>, features: &FeatureSet) -> Result<HighlightSet> {
    let Some(path) = path else {
        return Ok(HighlightSet::new());
    };
    let visited = load_highlights(path, features)
        .with_context(|| format!("Failed to load visited list: {}", path.display()))?;
    info!("{} visited ids loaded", visited.len());
    Ok(visited)
}

fn replay_script(
    config: &FileConfig,
    script: &Path,
    hits: &HitTester,
) -> Result<(ViewportTransform, Vec<MapEvent>)> {
    let events = gesture::load_script(script)
        .with_context(|| format!("Failed to load gesture script: {}", script.display()))?;

    let mut controller = GestureController::new(config.gesture, config.canvas);
    let output = gesture::replay(&mut controller, &events, Some(hits));
    info!(
        "Replayed {} input events into {} map events",
        events.len(),
        output.len()
    );

    Ok((controller.transform(), output))
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
