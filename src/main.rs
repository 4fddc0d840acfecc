//! `deblur` CLI - restore motion-blurred photos with a pretrained generator.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deblur::{Config, Pipeline};

/// Deblur a single image using a pretrained generator network.
#[derive(Parser, Debug)]
#[command(name = "deblur")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image path. Format is inferred from the extension.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Generator artifact path. Defaults to deblur_generator.onnx next to
    /// the executable.
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "95", value_name = "INT")]
    quality: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    // Usage errors exit 1, the same status as every other failure
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("deblur={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    // Validate input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    // Build configuration
    let config = Config {
        model_path: args.model.clone(),
        output_quality: args.quality,
    };

    // Create and run pipeline
    let mut pipeline = Pipeline::new(config).context("Failed to load model")?;

    pipeline
        .process(&args.input, &args.output)
        .context("Failed to process image")?;

    println!(
        "Successfully deblurred {} -> {}",
        args.input.display(),
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_positionals_parse() {
        let args = Args::try_parse_from(["deblur", "in.png", "out.png"]).expect("parse");

        assert_eq!(args.input, PathBuf::from("in.png"));
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(args.quality, 95);
        assert!(args.model.is_none());
    }

    #[test]
    fn test_wrong_argument_counts_are_rejected() {
        assert!(Args::try_parse_from(["deblur"]).is_err());
        assert!(Args::try_parse_from(["deblur", "in.png"]).is_err());
        assert!(Args::try_parse_from(["deblur", "in.png", "out.png", "extra.png"]).is_err());
    }

    #[test]
    fn test_model_override_parses() {
        let args =
            Args::try_parse_from(["deblur", "in.png", "out.png", "--model", "g.onnx"])
                .expect("parse");

        assert_eq!(args.model, Some(PathBuf::from("g.onnx")));
    }
}
