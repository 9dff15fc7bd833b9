// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Medreport — command line patient report generator.
//
// Entry point. Initialises logging, parses the command line and runs the
// masker, composer or inspector.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use medreport_core::error::Result;
use medreport_core::human_errors::humanize_error;
use medreport_core::{LayoutVariant, ReportConfig, ReportRequest};
use medreport_document::{ReportPipeline, ReportReader, mask_file};

#[derive(Parser)]
#[command(name = "medreport")]
#[command(about = "Generate one-page patient report PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop a logo into a circle
    Mask {
        /// Source image (PNG, JPEG, ...)
        input: PathBuf,
        /// Destination image; use .png to keep the transparency
        output: PathBuf,
    },
    /// Generate a report from a JSON request
    Compose {
        /// Request file
        #[arg(long)]
        request: PathBuf,
        /// Report PDF to write
        #[arg(long)]
        output: PathBuf,
        /// Style and layout configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Layout variant (stacked, banner, compact, centered)
        #[arg(long)]
        variant: Option<LayoutVariant>,
        /// Also write the masked logo here
        #[arg(long)]
        keep_logo: Option<PathBuf>,
    },
    /// Generate the built-in sample report
    Sample {
        /// Report PDF to write
        #[arg(long, default_value = "patient_summary_report.pdf")]
        output: PathBuf,
        /// Hospital logo
        #[arg(long, default_value = "Logo.png")]
        logo: PathBuf,
        /// Layout variant (stacked, banner, compact, centered)
        #[arg(long)]
        variant: Option<LayoutVariant>,
        /// Print the sample request as JSON instead of rendering it
        #[arg(long)]
        print_request: bool,
    },
    /// Show page count, page size and text of a PDF
    Inspect {
        /// PDF to read
        pdf: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "medreport failed");
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Mask { input, output } => {
            let masked = mask_file(&input, &output)?;
            println!(
                "Wrote {} ({}x{})",
                masked.output_path.display(),
                masked.width,
                masked.height
            );
        }
        Commands::Compose {
            request,
            output,
            config,
            variant,
            keep_logo,
        } => {
            let request = load_request(&request)?;
            let config = build_config(config.as_deref(), variant, keep_logo)?;
            generate(&request, config, &output)?;
        }
        Commands::Sample {
            output,
            logo,
            variant,
            print_request,
        } => {
            let request = sample_request(logo);
            if print_request {
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }
            let config = build_config(None, variant, None)?;
            generate(&request, config, &output)?;
        }
        Commands::Inspect { pdf } => {
            let reader = ReportReader::open(&pdf)?;
            println!("pages: {}", reader.page_count());
            for page in 1..=reader.page_count() as u32 {
                let (width, height) = reader.page_size_pt(page)?;
                println!("page {page}: {width:.2} x {height:.2} pt");
                for run in reader.text_runs(page)? {
                    println!("  {run}");
                }
            }
            println!("images: {}", reader.image_count());
        }
    }
    Ok(())
}

fn generate(request: &ReportRequest, config: ReportConfig, output: &Path) -> Result<()> {
    let pipeline = ReportPipeline::new(config)?;
    let document = pipeline.run(request, output)?;
    println!("Generated {} ({} bytes)", output.display(), document.len());
    Ok(())
}

fn load_request(path: &Path) -> Result<ReportRequest> {
    let text = std::fs::read_to_string(path)?;
    let mut request = ReportRequest::from_json(&text)?;

    // Relative logo paths are relative to the request file.
    let resolved = match (&request.logo_path, path.parent()) {
        (Some(logo), Some(dir)) if logo.is_relative() => Some(dir.join(logo)),
        _ => None,
    };
    if resolved.is_some() {
        request.logo_path = resolved;
    }
    Ok(request)
}

/// Configuration file (or defaults), then command line overrides.
fn build_config(
    path: Option<&Path>,
    variant: Option<LayoutVariant>,
    keep_logo: Option<PathBuf>,
) -> Result<ReportConfig> {
    let mut config = match path {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(variant) = variant {
        config.variant = variant;
    }
    if keep_logo.is_some() {
        config.masked_logo_path = keep_logo;
    }
    config.validate()?;
    Ok(config)
}

/// The sample patient shipped with the tool.
fn sample_request(logo: PathBuf) -> ReportRequest {
    ReportRequest {
        doctor_name: "Dr. John Doe".into(),
        patient_name: "Muhammad AbuBakar".into(),
        patient_id: "12345-6789012-3".into(),
        gender: "Male".into(),
        age: "25".into(),
        diagnosis: "Flu".into(),
        medicines: vec!["Calpol 25mg".into(), "Panadol 2 tablets".into()],
        instructions: "Stay hydrated and rest.".into(),
        hospital_name: "City Hospital".into(),
        logo_path: Some(logo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compose_with_variant() {
        let cli = Cli::try_parse_from([
            "medreport",
            "compose",
            "--request",
            "req.json",
            "--output",
            "out.pdf",
            "--variant",
            "banner",
        ])
        .unwrap();
        match cli.command {
            Commands::Compose { variant, .. } => assert_eq!(variant, Some(LayoutVariant::Banner)),
            _ => panic!("expected compose"),
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        let result = Cli::try_parse_from(["medreport", "sample", "--variant", "wide"]);
        assert!(result.is_err());
    }

    #[test]
    fn sample_request_round_trips_through_json() {
        let request = sample_request(PathBuf::from("Logo.png"));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(ReportRequest::from_json(&json).unwrap(), request);
    }

    #[test]
    fn relative_logo_resolves_against_request_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        let json = serde_json::to_string(&sample_request(PathBuf::from("Logo.png"))).unwrap();
        std::fs::write(&path, json).unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.logo_path, Some(dir.path().join("Logo.png")));
    }

    #[test]
    fn command_line_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "variant": "compact", "include_time": true }"#).unwrap();

        let config = build_config(
            Some(&path),
            Some(LayoutVariant::Centered),
            Some(PathBuf::from("round.png")),
        )
        .unwrap();
        assert_eq!(config.variant, LayoutVariant::Centered);
        assert!(config.include_time);
        assert_eq!(config.masked_logo_path, Some(PathBuf::from("round.png")));
    }

    #[test]
    fn sample_command_writes_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.pdf");
        run(Commands::Sample {
            output: output.clone(),
            logo: dir.path().join("Logo.png"),
            variant: None,
            print_request: false,
        })
        .unwrap();
        assert_eq!(ReportReader::open(&output).unwrap().page_count(), 1);
    }
}
