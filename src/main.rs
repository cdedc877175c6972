//! Entry point for the BagVis application.
//! Handles CLI parsing, opens the raster, prints the report and renders the requested images.

use bag_vis::cli::Args;
use bag_vis::gdal_io::GdalRaster;
use bag_vis::render::{render_figure, render_raw, save_png};
use bag_vis::report::Report;
use bag_vis::summary::summarize;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bag_vis={default_level},bagvis={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> bag_vis::Result<()> {
    if !args.json {
        println!(
            r#"
------------------------------------------------------------------
         ____              __      ___
        |  _ \             \ \    / (_)
        | |_) | __ _  __ _  \ \  / / _ ___
        |  _ < / _` |/ _` |  \ \/ / | / __|
        | |_) | (_| | (_| |   \  /  | \__ \
        |____/ \__,_|\__, |    \/   |_|___/
                      __/ |
                     |___/   Rust-based BAG tool
------------------------------------------------------------------
"#
        );
    }

    // The dataset is closed when `raster` goes out of scope, on error paths too
    let raster = GdalRaster::open(&args.file)?;
    let summary = summarize(&raster, &args.summary_config())?;

    let report = Report::new(&summary);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    if let Some(path) = &args.raw_image {
        let img = render_raw(&summary.depth, &summary.depth_range)?;
        save_png(&img, path)?;
    }

    if let Some(path) = &args.figure {
        let img = render_figure(&summary, &args.figure_config())?;
        save_png(&img, path)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
