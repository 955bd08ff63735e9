mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use pdf_margin::{Deliverable, DocumentFailure, MarginOptions, MarginSide, RangeMode, SourceFile};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfm", about = "Add blank margins to PDF pages", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a margin to one or more PDF files
    Add {
        /// Input PDF file(s) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Margin width in points
        #[arg(long)]
        margin: Option<u32>,

        /// Which edge(s) receive the margin
        #[arg(long, value_enum)]
        side: Option<SideArg>,

        /// Which pages receive the margin
        #[arg(long, value_enum)]
        pages: Option<PagesArg>,

        /// Range expression for `--pages custom`, e.g. "1-3, 5"
        #[arg(long)]
        range: Option<String>,

        /// Load options from a JSON file; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,

        /// Write several outputs as a single ZIP archive
        #[arg(long)]
        zip: bool,
    },

    /// Show page count and page sizes of a PDF
    Info {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Left,
    Right,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum PagesArg {
    All,
    Odd,
    Even,
    Custom,
}

impl From<SideArg> for MarginSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => Self::Left,
            SideArg::Right => Self::Right,
            SideArg::Both => Self::Both,
        }
    }
}

impl PagesArg {
    fn as_str(self) -> &'static str {
        match self {
            PagesArg::All => "all",
            PagesArg::Odd => "odd",
            PagesArg::Even => "even",
            PagesArg::Custom => "custom",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A logger can only be installed once; ignore the error if one exists
    let _ = CliLogger::new(CliLogger::level_for(cli.verbose, cli.quiet)).init();

    match cli.command {
        Commands::Add {
            input,
            output,
            margin,
            side,
            pages,
            range,
            config,
            save_config,
            stats_only,
            zip,
        } => {
            let mut options = match &config {
                Some(path) => MarginOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => MarginOptions::default(),
            };

            if let Some(size) = margin {
                options.margin.size = size;
            }
            if let Some(side) = side {
                options.margin.side = side.into();
            }
            match (pages, range) {
                (Some(pages), range) => {
                    options.pages = RangeMode::from_parts(pages.as_str(), range.as_deref())?;
                }
                // A bare --range implies custom selection
                (None, Some(range)) => options.pages = RangeMode::Custom(range),
                (None, None) => {}
            }
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                println!("Saved options → {}", path.display());
            }

            if stats_only {
                print_statistics(&input, &options).await?;
                return Ok(());
            }

            add_margins(&input, &output, &options, zip).await?;
        }

        Commands::Info { input } => {
            let document = pdf_margin::load_pdf(&input)
                .await
                .with_context(|| format!("Failed to load {}", input.display()))?;

            println!("{}", input.display());
            println!("  Pages: {}", document.page_count());
            for index in 0..document.page_count() {
                if let Some((width, height)) = document.page_size(index) {
                    println!("  Page {}: {} x {} pt", index + 1, width, height);
                }
            }
        }
    }

    Ok(())
}

async fn print_statistics(input: &[PathBuf], options: &MarginOptions) -> Result<()> {
    for path in input {
        let document = pdf_margin::load_pdf(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let stats = pdf_margin::calculate_statistics(&document, options)?;

        println!("Margin Statistics for {}:", path.display());
        println!("  Total pages: {}", stats.total_pages);
        println!("  Pages with margin: {}", stats.pages_with_margin);
        if let Some((min, max)) = stats.output_width_range {
            println!("  Output width: {} - {} pt", min, max);
        }
        println!("  Width added: {} pt", stats.added_width_total);
    }
    Ok(())
}

async fn add_margins(
    input: &[PathBuf],
    output_dir: &Path,
    options: &MarginOptions,
    zip: bool,
) -> Result<()> {
    let (sources, mut failures) = read_sources(input).await;

    let result = pdf_margin::run_batch(sources, options, |progress| {
        log::info!(
            "[{}%] {}/{} {}",
            progress.percent(),
            progress.completed,
            progress.total,
            progress.source_name.as_deref().unwrap_or("")
        );
    })
    .await?;

    failures.extend(result.failures.iter().cloned());
    for failure in &failures {
        eprintln!("Failed: {} ({})", failure.source_name, failure.error);
    }
    if result.outputs.is_empty() {
        anyhow::bail!("No input could be processed");
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    match pdf_margin::package(result, &options.margin)? {
        Deliverable::Single { file_name, bytes } => {
            let path = output_dir.join(file_name);
            pdf_margin::save_bytes(&path, &bytes).await?;
            println!("Added margin → {}", path.display());
        }
        Deliverable::Archive(archive) if zip => {
            let path = output_dir.join(&archive.name);
            pdf_margin::save_bytes(&path, &archive.to_zip()?).await?;
            println!(
                "Added margin to {} files → {}",
                archive.entries.len(),
                path.display()
            );
        }
        Deliverable::Archive(archive) => {
            for entry in &archive.entries {
                let path = output_dir.join(&entry.file_name);
                pdf_margin::save_bytes(&path, &entry.bytes).await?;
                println!("Added margin → {}", path.display());
            }
        }
    }

    Ok(())
}

/// Read every input, recording unreadable paths as failures instead of
/// aborting the run
async fn read_sources(input: &[PathBuf]) -> (Vec<SourceFile>, Vec<DocumentFailure>) {
    let mut sources = Vec::with_capacity(input.len());
    let mut failures = Vec::new();

    for path in input {
        match pdf_margin::read_source_file(path).await {
            Ok(source) => sources.push(source),
            Err(e) => {
                log::warn!("Skipping '{}': {}", path.display(), e);
                failures.push(DocumentFailure {
                    source_name: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    (sources, failures)
}
