use clap::{Parser, Subcommand};
use meatspace::exif::MetadataReader;
use meatspace::{NomExifReader, PhotoRenderer, check, config, meatspace_logo, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meatspace")]
#[command(about = "Logo and EXIF photo-caption helpers for the meatspace site")]
#[command(long_about = "\
Logo and EXIF photo-caption helpers for the meatspace site

Prints the HTML fragments a page template embeds. Photos are read from
<root>/assets/photos/ unless meatspace.toml says otherwise.

Site structure:

  site/
  ├── meatspace.toml        # Optional overrides (see gen-config)
  └── assets/
      └── photos/
          ├── alley.jpg     # JPEG with ExposureTime, FNumber, ISO tags
          └── 2012/dock.jpg # Nested: pass \"2012/dock.jpg\" as PHOTO

Run 'meatspace gen-config' to print a documented meatspace.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the site logo fragment
    Logo,
    /// Print the <img> + caption fragment for a photo
    Caption {
        /// Photo path relative to the photos directory
        photo: String,
        /// Caption title
        #[arg(long)]
        title: String,
        /// Caption year
        #[arg(long)]
        year: String,
    },
    /// Show the EXIF fields a caption is built from
    Exif {
        /// Photo path relative to the photos directory
        photo: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify every photo carries the EXIF tags captions need
    Check,
    /// Print a stock meatspace.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Logo => {
            println!("{}", meatspace_logo());
        }
        Command::Caption { photo, title, year } => {
            let site_config = config::load_config(&cli.root)?;
            let renderer = PhotoRenderer::new(&cli.root, site_config.photos);
            println!("{}", renderer.display_photo(&photo, &title, &year)?);
        }
        Command::Exif { photo, json } => {
            let site_config = config::load_config(&cli.root)?;
            let renderer = PhotoRenderer::new(&cli.root, site_config.photos);
            let snapshot = NomExifReader.read_snapshot(&renderer.photo_path(&photo))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                output::print_snapshot(&photo, &snapshot);
            }
        }
        Command::Check => {
            let site_config = config::load_config(&cli.root)?;
            let report = check::check_photos(&cli.root, &site_config.photos, &NomExifReader)?;
            output::print_check_report(&report);
            if !report.is_ok() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
