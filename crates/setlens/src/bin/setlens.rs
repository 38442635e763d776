use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use setlens::core::Point2;
use setlens::overlay::io::{load_response, OverlayConfig};
use setlens::pipeline::{build_report, hit_test_file, parse_transform};

#[derive(Parser, Debug)]
#[command(
    name = "setlens",
    version,
    about = "Overlay solver detections on card photos"
)]
struct Cli {
    /// JSON config (render params, default transform, output path).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a solver response and write the overlay report as JSON.
    Render {
        response: PathBuf,
        /// Report destination; overrides the config's `output_path`.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Override the ring stroke width.
        #[arg(long, allow_negative_numbers = true)]
        stroke_width: Option<f64>,
        /// Override the outward step between nested rings.
        #[arg(long, allow_negative_numbers = true)]
        ring_spacing: Option<f64>,
        /// Include the card-label group audit.
        #[arg(long)]
        audit: bool,
    },
    /// Resolve a view-space tap to a card label.
    Hit {
        response: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Image-to-view transform `sx,kx,tx,ky,sy,ty`; identity by default.
        #[arg(long, allow_hyphen_values = true)]
        transform: Option<String>,
    },
    /// Check listed groups against the card-label set rule.
    Audit { response: PathBuf },
    /// Paint the highlight rings onto a photo.
    #[cfg(feature = "image")]
    Paint {
        response: PathBuf,
        image: PathBuf,
        output: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_log::LogTracer::init();
        let level = setlens::core::level_from_verbosity(verbose);
        let lvl = level.as_str().to_ascii_lowercase();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(lvl));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = setlens::core::init_with_level(setlens::core::level_from_verbosity(verbose));
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut cfg = match &cli.config {
        Some(path) => OverlayConfig::load_json(path)?,
        None => OverlayConfig::default(),
    };

    match cli.command {
        Command::Render {
            response,
            output,
            stroke_width,
            ring_spacing,
            audit,
        } => {
            if let Some(w) = stroke_width {
                cfg.render.stroke_width = w;
            }
            if let Some(s) = ring_spacing {
                cfg.render.ring_spacing = s;
            }
            cfg.render.validate()?;
            cfg.audit |= audit;

            let report = build_report(&response, &cfg);
            let output = output.unwrap_or_else(|| cfg.output_path());
            report.write_json(&output)?;
            println!("wrote report JSON to {}", output.display());
            if let Some(err) = &report.error {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Hit {
            response,
            x,
            y,
            transform,
        } => {
            let t = match transform {
                Some(raw) => parse_transform(&raw)?,
                None => cfg.view_transform(),
            };
            match hit_test_file(&response, Point2::new(x, y), &t)? {
                Some(label) => println!("{label}"),
                None => println!("none"),
            }
        }
        Command::Audit { response } => {
            let snapshot = load_response(&response)?;
            let audit = snapshot.audit_groups();
            println!("{}", serde_json::to_string_pretty(&audit)?);
            if !audit.is_clean() {
                return Ok(ExitCode::from(2));
            }
        }
        #[cfg(feature = "image")]
        Command::Paint {
            response,
            image,
            output,
        } => {
            let n = setlens::pipeline::paint_file(&response, &image, &output, &cfg)?;
            println!("painted {n} rings to {}", output.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
