use anyhow::Context;
use clap::{Parser, Subcommand};
use planepal_common::error::PlotError;
use planepal_common::parser::CommandParser;
use planepal_common::util::config::Config;
use planepal_common::util::logger;
use planepal_plotter::Plotter;
use planepal_plotter::generator::generate_base_map;
use planepal_plotter::output::OutputStore;
use planepal_plotter::showcase::{SHOWCASE, render_showcase};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot a plane path, e.g. `plot erangel ak1 90`
    Plot {
        map: String,
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Delete the image again once it has been written
        #[arg(long)]
        discard: bool,
    },
    /// Show how a plot command is understood
    Parse {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Render the example paths for every loaded map
    Showcase {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Write a synthetic base map with the grid drawn in
    Generate {
        #[arg(long, default_value_t = 1024)]
        size: u32,
        #[arg(long, default_value = "resources/generated.png")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    match args.command {
        Commands::Plot {
            map,
            message,
            discard,
        } => {
            let message = message.join(" ");
            let plotter = Plotter::from_config(&config)?;
            let plotted = plotter.plot(&map, &message).map_err(|e| match e {
                PlotError::UnknownMap(_) => anyhow::anyhow!(
                    "{} (available: {})",
                    e,
                    plotter.maps().names().join(", ")
                ),
                _ => anyhow::anyhow!("I couldn't understand the command '{}': {}", message, e),
            })?;

            let store = OutputStore::new(&config.output.dir, &config.output.extension)?;
            store.prepare()?;
            let path = store.save(&plotted)?;
            log::info!("Plotted '{}' on {}", message, map);
            println!("{}", path.display());
            if discard {
                store.remove(&path)?;
            }
        }
        Commands::Parse { message } => {
            let message = message.join(" ");
            let parser = CommandParser::new(&config.parser)?;
            let path = parser
                .parse(&message)
                .map_err(|e| anyhow::anyhow!("I couldn't understand '{}': {}", message, e))?;

            let grid = path.grid();
            println!("{}", path);
            println!(
                "  cell {} (x {}, y {}), section {}",
                grid,
                grid.x_index(),
                grid.y_index(),
                grid.section()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "center".to_string())
            );
            println!(
                "  heading {} deg, drawing angle {} deg",
                path.heading().degrees(),
                path.heading().drawing_angle_degrees()
            );
        }
        Commands::Showcase { output } => {
            let plotter = Plotter::from_config(&config)?;
            let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.showcase_dir));
            let store = OutputStore::new(dir, &config.output.extension)?;

            log::info!("Rendering showcase into {:?}...", store.dir());
            let saved = render_showcase(&plotter, &store, SHOWCASE, config.output.showcase_size)?;
            log::info!("Rendered {}/{} showcase images.", saved.len(), SHOWCASE.len());
        }
        Commands::Generate { size, output } => {
            if size < 8 {
                return Err(anyhow::anyhow!("Map size {} is too small for an 8x8 grid", size));
            }
            prepare_output_dir(&output)?;

            let parser = CommandParser::new(&config.parser)?;
            let map = generate_base_map(size, parser.subdivision());
            map.save(&output)
                .with_context(|| format!("Failed to write {:?}", output))?;
            log::info!("Generated: {:?}", output);
        }
    }

    Ok(())
}

fn prepare_output_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            log::info!("Creating output directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
