//! Command-line access to the survey data: grid snapping, term lookups, and the UV-B classifiers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use geo::Point;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wcs::analysis::{self, Classifier, ExemplarClassifier, MedianClassifier};
use wcs::prelude::*;
use wcs::sites::read_sites_from_path;

#[derive(Debug, Parser)]
#[command(name = "wcs", about = "World Color Survey data tools", version)]
struct Cli {
    /// Configuration file (defaults to ./wcs.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Axis {
    Lat,
    Lon,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Snap values to one axis of the UV-B grid
    Nearest {
        /// Which axis to snap to
        #[arg(long, value_enum, default_value = "lat")]
        grid: Axis,
        /// Values to snap
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Snap a coordinate to its UV-B grid cell
    Snap {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Translate a term abbreviation using the term dictionary
    Translate { language: u32, abbreviation: String },
    /// Look up the term a speaker used for a chip (by number or code, e.g. E29)
    Term {
        language: u32,
        speaker: u32,
        chip: String,
    },
    /// Classify languages' blue/green category from UV-B incidence
    Classify {
        /// Exemplar similarity scale, overriding the configuration
        #[arg(long)]
        scale: Option<f64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = WcsConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Nearest { grid, values } => {
            let axis = match grid {
                Axis::Lat => UV_GRID.latitudes(),
                Axis::Lon => UV_GRID.longitudes(),
            };
            for v in values {
                println!("{}\t{}", v, axis.nearest(v));
            }
        }
        Commands::Snap { lat, lon } => {
            let cell = UV_GRID.snap(Point::new(lon, lat));
            if let Some(center) = UV_GRID.cell_center(cell) {
                println!(
                    "row {} col {}\tlat {} lon {}",
                    cell.row,
                    cell.col,
                    center.y(),
                    center.x()
                );
            }
        }
        Commands::Translate {
            language,
            abbreviation,
        } => {
            let dict = TermDictionary::from_path(config.dictionary_path())?;
            match dict.translate(language, &abbreviation) {
                Some(t) => println!("{}", t),
                None => println!("no entry for {} in language {}", abbreviation, language),
            }
        }
        Commands::Term {
            language,
            speaker,
            chip,
        } => {
            let chips = ChipTable::from_path(config.chips_path())?;
            let number = match chips.resolve(&chip) {
                Some(n) => n,
                None => {
                    println!("no chip {}", chip);
                    return Ok(());
                }
            };
            let naming = NamingData::from_path(config.terms_path())?;
            match naming.term(language, speaker, number) {
                Some(term) => println!("{}", term),
                None => println!(
                    "speaker {} of language {} gave no term for chip {}",
                    speaker, language, number
                ),
            }
        }
        Commands::Classify { scale } => {
            let scale = scale.unwrap_or(config.exemplar_scale);
            if !(scale > 0.0) {
                return Err(WcsError::InvalidSetting(format!(
                    "scale must be positive, got {}",
                    scale
                )));
            }
            let sites = read_sites_from_path(config.sites_path())?;
            let climatology = UvClimatology::from_dir(config.uv_path())?;
            let observations = analysis::observations(&sites, &climatology);
            info!(languages = observations.len(), "joined sites to UV-B grid");

            for summary in analysis::summarize(&observations).iter() {
                println!(
                    "{}\tn={}\tmean={}\tmedian={}",
                    summary.category,
                    summary.count,
                    fmt_opt(summary.mean),
                    fmt_opt(summary.median)
                );
            }
            let classifiers: [&dyn Classifier; 2] =
                [&MedianClassifier, &ExemplarClassifier { scale }];
            for c in classifiers.iter() {
                let eval = c.evaluate(&observations);
                println!(
                    "{}\t{}/{}\taccuracy={}",
                    c.name(),
                    eval.correct(),
                    eval.total(),
                    fmt_opt(eval.accuracy())
                );
            }
        }
    }
    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{:.3}", x))
        .unwrap_or_else(|| "-".to_string())
}
