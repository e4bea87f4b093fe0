use clap::Parser;
use clap::error::ErrorKind;
use hough_lines::pipeline::{self, PipelineReport};
use hough_lines::{HoughConfig, HoughError, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "houghlines",
    version,
    about = "Detect straight lines in an edge image and mark their intersections",
    long_about = "Writes accumulator.png and result.png to the current directory."
)]
struct Cli {
    /// Edge image; pure black pixels are edges
    image: PathBuf,
}

fn parse_cli() -> Result<Cli> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => Err(HoughError::Usage(err.render().to_string().trim().to_string())),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match parse_cli().and_then(|cli| detect_cmd(&cli.image)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("houghlines: {err}");
            ExitCode::FAILURE
        }
    }
}

fn detect_cmd(image: &Path) -> Result<()> {
    let report = pipeline::run(image, Path::new("."), &HoughConfig::default())?;
    print_report(image, &report);
    Ok(())
}

fn print_report(image: &Path, report: &PipelineReport) {
    println!(
        "Image: {} ({}x{}), edge_pixels={}",
        image.display(),
        report.width,
        report.height,
        report.edge_pixels
    );
    println!("Found {} lines", report.lines.len());
    for (i, line) in report.lines.iter().enumerate() {
        println!(
            "  Line {}: slope={:.4}, intercept={:.2}",
            i, line.slope, line.intercept
        );
    }
    println!("Marked {} intersections", report.intersections);
    if let Some(path) = &report.accumulator_path {
        println!("Wrote {}", path.display());
    }
    println!("Wrote {} ({:.2?})", report.result_path.display(), report.elapsed);
}
