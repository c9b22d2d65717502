#![deny(unsafe_code)]
//! CLI binary for the plexus particle renderer.
//!
//! Subcommands:
//! - `render [preset]`: run a scene N frames, write PNG
//! - `trace [preset]`: run a scene headless, print per-frame stats as JSON
//! - `list`: print presets, themes and boundary policies
//! - `schema [preset]`: print the field parameter schema

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use log::{info, LevelFilter};
use plexus_core::{BoundaryPolicy, Pointer, Preset, RecordingSurface, Scene, Theme};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "plexus", about = "Particle field and proximity link renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SceneArgs {
    /// Preset name (drift, ember).
    #[arg(default_value = "drift")]
    preset: String,

    /// Load the whole scene from a JSON file; other scene flags are ignored.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Theme name (red-black, gray-white, blue-yellow).
    #[arg(short, long)]
    theme: Option<String>,

    /// Viewport width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Viewport height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Field parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Pointer position as "x,y" in viewport fractions.
    #[arg(long)]
    pointer: Option<String>,

    /// Output brightness in [0, 1].
    #[arg(short, long, default_value_t = 1.0)]
    brightness: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scene for N frames and write a PNG of the last one.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output file path.
        #[arg(short, long, default_value = "plexus.png")]
        output: PathBuf,
    },
    /// Run a scene headless and print per-frame stats as JSON.
    Trace {
        #[command(flatten)]
        scene: SceneArgs,

        /// Print the draw commands of the last frame instead of stats.
        #[arg(long)]
        commands: bool,
    },
    /// List presets, themes and boundary policies.
    List,
    /// Print the field parameter schema of a preset.
    Schema {
        /// Preset name (drift, ember).
        #[arg(default_value = "drift")]
        preset: String,
    },
}

fn parse_pointer(text: &str) -> Result<Pointer, CliError> {
    let bad = || CliError::BadPointer(text.to_string());
    let (x, y) = text.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(bad());
    }
    Ok(Pointer::new(x, y))
}

fn build_scene(args: SceneArgs) -> Result<Scene, CliError> {
    if let Some(path) = &args.scene {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::ReadScene {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let scene: Scene = serde_json::from_str(&text).map_err(|e| CliError::BadScene {
            path: path.clone(),
            message: e.to_string(),
        })?;
        scene.validate()?;
        return Ok(scene);
    }
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::BadParams(e.to_string()))?;
    let mut scene = Scene::new(&args.preset, args.width, args.height, args.seed);
    scene.theme = args.theme;
    scene.params = params;
    scene.frames = args.frames;
    scene.pointer = args.pointer.as_deref().map(parse_pointer).transpose()?;
    scene.brightness = args.brightness;
    scene.validate()?;
    Ok(scene)
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let themes = Theme::list_names();
            let boundaries = BoundaryPolicy::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "themes": themes,
                    "boundaries": boundaries,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Themes:");
                println!("  {}", themes.join(", "));
                println!("Boundaries:");
                println!("  {}", boundaries.join(", "));
            }
        }
        Command::Schema { preset } => {
            let config = Preset::from_name(&preset)?.field_config();
            println!("{}", serde_json::to_string_pretty(&config.param_schema())?);
        }
        Command::Trace { scene, commands } => {
            let scene = build_scene(scene)?;
            let mut driver = scene.driver()?;
            let mut surface = RecordingSurface::new(scene.width as f64, scene.height as f64);
            let stats: Vec<_> = (0..scene.frames.max(1))
                .map_while(|_| driver.tick(&mut surface))
                .collect();
            driver.stop();
            info!("traced {} frames", stats.len());
            if commands {
                println!("{}", serde_json::to_string_pretty(surface.commands())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
        }
        Command::Render { scene, output } => {
            let scene = build_scene(scene)?;
            let (pixmap, stats) = plexus_raster::render_scene(&scene)?;
            plexus_raster::snapshot::write_png(&pixmap, scene.brightness, &output)
                .map_err(|e| CliError::write_png(&output, e))?;

            let links = stats.last().map_or(0, |s| s.links);
            if cli.json {
                let info = serde_json::json!({
                    "preset": scene.preset,
                    "theme": scene.theme,
                    "width": scene.width,
                    "height": scene.height,
                    "frames": stats.len(),
                    "seed": scene.seed,
                    "links": links,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} frames, seed {}, {links} links) -> {}",
                    scene.preset,
                    scene.width,
                    scene.height,
                    stats.len(),
                    scene.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
