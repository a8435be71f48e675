use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use report_pdf::{Error, Orientation, PageSize, ReportResult, Template, TextOptions};

/// Render report data or plain text to PDF.
#[derive(Debug, Parser)]
#[command(name = "report-pdf", about, version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a report (JSON: definition, data, totals, metadata) as a paginated table
    Report {
        /// Path to the report JSON file
        #[arg(value_name = "REPORT")]
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// Template JSON (header, footer, orientation, pageSize, margins)
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Render a text file as wrapped, paginated plain text
    Text {
        /// Path to the input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PDF path
        #[arg(short, long)]
        output: PathBuf,

        /// Treat the input as XHTML and use its text content
        #[arg(long)]
        markup: bool,

        #[arg(long, value_enum, default_value_t = OrientationArg::Portrait)]
        orientation: OrientationArg,

        #[arg(long, value_enum, default_value_t = PageSizeArg::Letter)]
        page_size: PageSizeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageSizeArg {
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Legal => PageSize::Legal,
            PageSizeArg::Tabloid => PageSize::Tabloid,
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Report {
            input,
            output,
            template,
        } => {
            let report: ReportResult = read_json(&input)?;
            let template = template
                .as_deref()
                .map(read_json::<Template>)
                .transpose()?;
            report_pdf::write_report_pdf(&report, template.as_ref(), &output)?;
            println!("Converted: {} -> {}", input.display(), output.display());
        }
        Commands::Text {
            input,
            output,
            markup,
            orientation,
            page_size,
        } => {
            let raw = std::fs::read_to_string(&input)?;
            let text = if markup {
                report_pdf::parse_markup_text(&raw)?
            } else {
                raw
            };
            let options = TextOptions {
                orientation: Some(orientation.into()),
                page_size: Some(page_size.into()),
            };
            report_pdf::write_text_pdf(text.as_str(), Some(&options), &output)?;
            println!("Converted: {} -> {}", input.display(), output.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
