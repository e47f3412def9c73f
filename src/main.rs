//! Zone Overlay CLI
//!
//! Usage:
//!   zone-overlay [OPTIONS] [DATA]
//!
//! Options:
//!   -o, --output <FILE>  Page to write (default docs/index.html)
//!   -c, --config <FILE>  Settings file (TOML format)
//!   --check              List rows that will be skipped, then exit
//!   --lint               Report layout defects after placement
//!   --stdout             Print the page instead of writing a file
//!   -d, --debug          Log every label placement
//!   -h, --help           Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zone_overlay::{render_scene, RenderConfig, SceneData, Settings};

#[derive(Parser)]
#[command(name = "zone-overlay")]
#[command(about = "Overlay labeled zones and profile markers on a background image")]
struct Cli {
    /// Scene file (TOML)
    #[arg(default_value = "data/scene.toml")]
    data: PathBuf,

    /// Output HTML page
    #[arg(short, long, default_value = "docs/index.html")]
    output: PathBuf,

    /// Settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List rows that will be skipped, then exit
    #[arg(long)]
    check: bool,

    /// Report layout defects after placement
    #[arg(long)]
    lint: bool,

    /// Print the page to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Debug mode: log every label placement
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let scene = match SceneData::from_file(&cli.data) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error reading scene '{}': {}", cli.data.display(), e);
            std::process::exit(1);
        }
    };

    if cli.check {
        let diagnostics = scene.diagnostics();
        for diagnostic in &diagnostics {
            eprintln!("{}", diagnostic.render());
        }
        if diagnostics.is_empty() {
            println!("{}: all rows usable", cli.data.display());
        } else {
            println!("{}: {} problem(s)", cli.data.display(), diagnostics.len());
        }
        return;
    }

    let config = RenderConfig::from_settings(settings)
        .with_lint(cli.lint)
        .with_debug(cli.debug);

    let (html, warnings) = match render_scene(&scene, cli.data.parent(), &config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for warning in &warnings {
        eprintln!("lint [{}]: {}", warning.category, warning.message);
    }

    if cli.stdout {
        println!("{}", html);
        return;
    }

    if let Err(e) = write_page(&cli.output, &html) {
        eprintln!("Error writing '{}': {}", cli.output.display(), e);
        std::process::exit(1);
    }
    println!("Saved {}", cli.output.display());
}

fn init_tracing(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Write the page, creating its directory, and confirm it landed
fn write_page(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, html)?;
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found after writing",
        ));
    }
    info!(path = %path.display(), bytes = html.len(), "page written");
    Ok(())
}
