use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eclipixel::config::AppConfig;
use eclipixel::utils::composite::{composite_centered, placeholder_canvas};
use eclipixel::{analyze, binarize, histogram, server};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

#[derive(Parser)]
#[command(name = "eclipixel", version, about = "Image binarization and histogram tools")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./eclipixel.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Threshold an image at 127 and write it as PNG
    Binarize {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Render the intensity histogram chart of an image as PNG
    Histogram {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Write binarized.png and histogram.png for an image into a directory
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Serve the pipeline over HTTP
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render the upload placeholder with a centered overlay
    Placeholder {
        #[arg(long)]
        overlay: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = init_tracing(cli.verbose);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(handle) = filter {
        if let Err(e) = handle.reload(EnvFilter::new(&config.logging.level)) {
            warn!("Failed to apply log level {:?}: {}", config.logging.level, e);
        }
    }

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Install the subscriber before configuration is read.
///
/// `RUST_LOG` wins, then `-v`. With neither, logging starts at `info` and the
/// returned handle swaps in the configured level once it is known.
fn init_tracing(verbose: u8) -> Option<reload::Handle<EnvFilter, Registry>> {
    let (filter, configurable) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, false),
        Err(_) => match verbose {
            0 => (EnvFilter::new("info"), true),
            1 => (EnvFilter::new("debug"), false),
            _ => (EnvFilter::new("trace"), false),
        },
    };
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    configurable.then_some(handle)
}

fn run(command: Command, mut config: AppConfig) -> Result<()> {
    match command {
        Command::Binarize { input, output } => {
            let raw = read_input(&input)?;
            let png = binarize(&raw).with_context(|| format!("binarizing {}", input.display()))?;
            write_output(&output, &png)
        }
        Command::Histogram { input, output } => {
            let raw = read_input(&input)?;
            let png = histogram(&raw)
                .with_context(|| format!("building histogram of {}", input.display()))?;
            write_output(&output, &png)
        }
        Command::Analyze { input, out_dir } => {
            let raw = read_input(&input)?;
            let result = analyze(&raw).with_context(|| format!("analyzing {}", input.display()))?;
            write_output(&out_dir.join("binarized.png"), &result.binary_png)?;
            write_output(&out_dir.join("histogram.png"), &result.chart_png)
        }
        Command::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("starting async runtime")?;
            runtime.block_on(server::serve(&config.server))?;
            Ok(())
        }
        Command::Placeholder { overlay, output } => {
            let overlay_img = image::open(&overlay)
                .with_context(|| format!("loading overlay {}", overlay.display()))?;
            let settings = &config.placeholder;
            let mut canvas = placeholder_canvas(settings.size, settings.fill);
            composite_centered(&mut canvas, &overlay_img, settings.overlay_fraction);

            ensure_parent(&output)?;
            canvas
                .save(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("Placeholder saved to {}", output.display());
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

fn write_output(path: &Path, png: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, png).with_context(|| format!("writing {}", path.display()))?;
    info!("Image saved to {}", path.display());
    Ok(())
}
