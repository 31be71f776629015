//! pdfoutline CLI - heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{self, BatchOptions, DocumentStatus};
use pdfoutline::infer::{self, InferOptions};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{Outliner, PageSelection, ParseOptions};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer title and H1-H4 heading outlines from PDF files", long_about = None)]
struct Cli {
    /// Directory containing PDF files
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory for the JSON outlines
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    batch: BatchArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct BatchArgs {
    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Process one document at a time
    #[arg(long)]
    sequential: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Use the file name as the title when none is found
    #[arg(long)]
    filename_title: bool,

    /// Keep headings whose text repeats
    #[arg(long)]
    keep_duplicates: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one JSON outline per PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        #[command(flatten)]
        args: BatchArgs,
    },

    /// Infer the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Show the collected text runs and how each one was classified
    Runs {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON outline
    Json,
    /// Indented text listing
    Text,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            args,
        }) => cmd_batch(&input, &output, &args),
        Some(Commands::File {
            input,
            output,
            format,
            compact,
            pages,
            lenient,
        }) => cmd_file(
            &input,
            output.as_deref(),
            format,
            compact,
            pages.as_deref(),
            lenient,
        ),
        Some(Commands::Runs { input, pages }) => cmd_runs(&input, pages.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_batch(&input, &output, &cli.batch),
            _ => {
                println!("{}", "Usage: pdfoutline <INPUT_DIR> <OUTPUT_DIR>".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn page_selection(pages: Option<&str>) -> pdfoutline::Result<PageSelection> {
    pages.map_or(Ok(PageSelection::All), PageSelection::parse)
}

fn cmd_batch(input: &Path, output: &Path, args: &BatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parse = ParseOptions::new().with_pages(page_selection(args.pages.as_deref())?);
    let infer = InferOptions::default().with_dedupe(!args.keep_duplicates);

    let mut options = BatchOptions::new()
        .with_parse_options(parse)
        .with_infer_options(infer)
        .with_filename_title(args.filename_title);
    if args.compact {
        options = options.with_format(JsonFormat::Compact);
    }
    if args.sequential {
        options = options.sequential();
    }

    let total = batch::discover_pdfs(input)?.len();
    log::debug!(
        "Batch {} -> {}: {} files, parallel: {}",
        input.display(),
        output.display(),
        total,
        options.parallel
    );
    if total == 0 {
        println!("{} {}", "No PDF files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::process_directory_with_progress(input, output, &options, |doc| {
        if let Some(name) = doc.input.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!();
    for doc in &report.documents {
        let name = doc.input.file_name().unwrap_or_default().to_string_lossy();
        match &doc.status {
            DocumentStatus::Ok => println!(
                "  {} {} ({} headings)",
                "✓".green(),
                name,
                doc.headings
            ),
            DocumentStatus::Empty => println!("  {} {} (no text)", "○".yellow(), name),
            other => println!("  {} {} {}", "✗".red(), name, other.to_string().dimmed()),
        }
    }

    println!(
        "\n{} {} documents, {} headings → {}",
        "Processed".green().bold(),
        report.total(),
        report.total_headings(),
        output.display()
    );
    if report.degraded() > 0 || report.failed() > 0 {
        println!(
            "{} {} degraded, {} failed",
            "Warning:".yellow().bold(),
            report.degraded(),
            report.failed()
        );
    }

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    pages: Option<&str>,
    lenient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut outliner = Outliner::new().with_pages(page_selection(pages)?);
    if lenient {
        outliner = outliner.lenient();
    }
    let outline = outliner.outline_file(input)?;
    log::info!(
        "{}: title {:?}, {} headings",
        input.display(),
        outline.title,
        outline.total_headings()
    );

    let rendered = match format {
        OutputFormat::Json if compact => render::to_json(&outline, JsonFormat::Compact)?,
        OutputFormat::Json => render::to_json(&outline, JsonFormat::Pretty)?,
        OutputFormat::Text => render::to_text(&outline),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered.trim_end());
    }

    Ok(())
}

fn cmd_runs(input: &Path, pages: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let outliner = Outliner::new().lenient().with_pages(page_selection(pages)?);
    let doc = outliner.collect_file(input)?;
    log::debug!("Collected {} runs from {}", doc.runs.len(), input.display());
    let analysis = infer::analyze(&doc, outliner.infer_options());

    println!("{}", "Document Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), doc.page_count);
    println!("{}: {:.1}pt", "Page height".bold(), doc.page_height);
    println!("{}: {:.1}pt", "Body size".bold(), analysis.profile.body_font_size);
    println!("{}: {}", "Repeated texts".bold(), analysis.profile.repeated_texts.len());
    println!("{}: {}", "Title".bold(), analysis.title.text);
    println!();

    for (i, run) in doc.runs.iter().enumerate() {
        let verdict = match (&analysis.noise[i], analysis.candidate_for(i)) {
            (Some(kind), _) => kind.as_str().dimmed(),
            (None, Some(candidate)) => candidate.level.as_str().green().bold(),
            (None, None) => "-".normal(),
        };
        let is_title = analysis.title.sources.contains(&i);
        println!(
            "p{:<3} y={:>6.1} {:>5.1}pt {} {:<12} {}{}",
            run.page,
            run.bbox.y0,
            run.font_size,
            if run.bold { "B" } else { " " },
            verdict,
            if is_title { "★ ".yellow() } else { "".normal() },
            run.text
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline inference tool");
    println!();
    println!("License: MIT");
}
