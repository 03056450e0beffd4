use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flag_importer::assets::{AssetCategory, AssetLoader};
use flag_importer::models::AppConfig;
use flag_importer::services::FlagService;
use uv_codec::{Color, DistanceMetric};

#[derive(Parser)]
#[command(name = "flag-importer")]
#[command(about = "Encode 100x66 flag images as palette-coordinate strings and back")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a 100x66 image into a coordinate string
    Encode {
        /// Input image (PNG or JPEG), exactly 100x66 pixels
        image: PathBuf,

        /// Write the encoded string to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write a PNG of the matched palette colors
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Color distance metric: "ciede2000" or "rgb"
        #[arg(short, long)]
        metric: Option<DistanceMetric>,

        /// Palette image to use instead of the configured one
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Decode a coordinate string into a PNG
    Decode {
        /// File holding the encoded string ("-" or omitted reads stdin)
        input: Option<PathBuf>,

        /// Output PNG file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Paint undecodable pixels with this color (e.g. "#000000")
        #[arg(long)]
        fill: Option<Color>,

        /// Palette image to use instead of the configured one
        #[arg(long)]
        palette: Option<PathBuf>,
    },
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract the reference palette image
        #[arg(long)]
        palette: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flag_importer=warn,uv_codec=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .init();

    match cli.command {
        Some(Commands::Encode {
            image,
            output,
            preview,
            metric,
            palette,
        }) => run_encode_command(&image, output.as_deref(), preview, metric, palette),
        Some(Commands::Decode {
            input,
            output,
            fill,
            palette,
        }) => run_decode_command(input.as_deref(), output, fill, palette),
        Some(Commands::Init {
            palette,
            config,
            all,
            force,
            list,
        }) => run_init_command(palette, config, all, force, list),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Build the asset loader and config, applying the palette precedence
/// `--palette` > `PALETTE_FILE` > config `palette` > embedded.
fn load_environment(palette: Option<PathBuf>) -> (AssetLoader, AppConfig) {
    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader);

    let palette = palette
        .or_else(|| loader.palette_file().map(Path::to_path_buf))
        .or_else(|| config.palette.clone());
    let loader = match palette {
        Some(path) => loader.with_palette_file(path),
        None => loader,
    };
    (loader, config)
}

/// Encode an image file and print or save the string
fn run_encode_command(
    image: &Path,
    output: Option<&Path>,
    preview: Option<PathBuf>,
    metric: Option<DistanceMetric>,
    palette: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (loader, config) = load_environment(palette);

    let mut service = FlagService::new(&loader, &config)?;
    if let Some(metric) = metric {
        service = service.with_metric(metric);
    }

    let preview_path = preview.or_else(|| config.preview.then(|| PathBuf::from("preview.png")));
    let encoded = service.encode_file(image, preview_path.is_some())?;

    if let (Some(path), Some(png)) = (&preview_path, service.preview_png(&encoded)?) {
        std::fs::write(path, &png)?;
        eprintln!("Wrote preview {} ({} bytes)", path.display(), png.len());
    }

    match output {
        Some(path) => {
            std::fs::write(path, encoded.as_str())?;
            eprintln!(
                "Encoded {} into {} ({} entries)",
                image.display(),
                path.display(),
                encoded.entry_count()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{encoded}")?;
        }
    }

    Ok(())
}

/// Decode a string from a file or stdin and save it as a PNG
fn run_decode_command(
    input: Option<&Path>,
    output: Option<PathBuf>,
    fill: Option<Color>,
    palette: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (loader, config) = load_environment(palette);
    let service = FlagService::new(&loader, &config)?;

    let flag = match input {
        Some(path) if path != Path::new("-") => service.decode_file(path)?,
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            service.decode_bytes(&buf)
        }
    };

    let png = service.decoded_png(&flag, fill.or(config.fill_color))?;

    let output = output.unwrap_or(config.output);
    std::fs::write(&output, &png)?;
    eprintln!(
        "Decoded {} pixels into {} ({} bytes)",
        flag.decoded(),
        output.display(),
        png.len()
    );
    if flag.skipped() > 0 {
        eprintln!("{} malformed entries were left blank", flag.skipped());
    }

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    palette: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Palette:");
        for f in AssetLoader::list_embedded(AssetCategory::Palette) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    // Determine which categories to extract
    let mut categories = Vec::new();
    if all || palette {
        categories.push(AssetCategory::Palette);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --palette, or --config");
        eprintln!("\nRun 'flag-importer init --list' to see embedded assets.");
        std::process::exit(1);
    }

    // Paths from env vars (or defaults)
    let loader = AssetLoader::from_env();

    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let palette_file = std::env::var("PALETTE_FILE").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let (loader, config) = load_environment(None);

    println!("flag-importer v{VERSION}");
    println!("Palette-coordinate encoder for 100x66 flags\n");

    println!("Environment Variables:");
    println!(
        "  PALETTE_FILE = {}",
        palette_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");

    let config_source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    println!("  Palette: {}", loader.palette_origin());
    println!("  Metric:  {}", config.metric);

    println!("\nCommands:");
    println!("  flag-importer encode <IMAGE>   Encode a 100x66 image");
    println!("  flag-importer decode [INPUT]   Decode a string to {}", config.output.display());
    println!("  flag-importer init             Extract embedded assets");
    println!("\nRun 'flag-importer --help' for more details.");
}
