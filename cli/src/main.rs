//! papersketch CLI - render paper summaries into sketch images

mod fetch;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use papersketch::{
    load_input, pick_figures, render, FontOptions, ImageSource, JsonFormat, NoImages,
    OutputFormat, SketchOptions,
};

use crate::fetch::{HttpImageSource, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(name = "papersketch")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render paper summaries into a single sketch image", long_about = None)]
struct Cli {
    /// Input summary (JSON record or markdown)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output image
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a summary to PNG or JPEG
    Render {
        /// Input summary (JSON record or markdown)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output image (defaults to the input name with the format's extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the parsed document as JSON
    #[command(alias = "json")]
    Parse {
        /// Input summary (JSON record or markdown)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show what a summary contains
    Info {
        /// Input summary (JSON record or markdown)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Output format (inferred from the output extension when omitted)
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,

    /// JPEG quality (1-100)
    #[arg(long, default_value = "95")]
    quality: u8,

    /// Device scale factor
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Acquire images concurrently
    #[arg(long)]
    parallel: bool,

    /// Font file for regular text
    #[arg(long, value_name = "FILE", env = "PAPERSKETCH_FONT")]
    font: Option<PathBuf>,

    /// Font file for bold text
    #[arg(long, value_name = "FILE", env = "PAPERSKETCH_BOLD_FONT")]
    bold_font: Option<PathBuf>,

    /// Per-image acquisition timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "PAPERSKETCH_TIMEOUT")]
    timeout: u64,

    /// Skip image acquisition entirely
    #[arg(long)]
    no_images: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            format: None,
            quality: 95,
            scale: 1.0,
            parallel: false,
            font: None,
            bold_font: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            no_images: false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ImageFormat {
    /// Lossless PNG
    Png,
    /// JPEG
    #[value(alias = "jpg")]
    Jpeg,
}

impl From<ImageFormat> for OutputFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => OutputFormat::Png,
            ImageFormat::Jpeg => OutputFormat::Jpeg,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            render,
        }) => cmd_render(&input, output.as_deref(), &render),
        Some(Commands::Parse {
            input,
            output,
            compact,
        }) => cmd_parse(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: papersketch <FILE> [OUTPUT]".yellow());
                println!("       papersketch --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn resolve_format(format: Option<ImageFormat>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = format {
        return format.into();
    }
    output
        .and_then(|p| p.extension())
        .and_then(|ext| OutputFormat::from_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let name = format!("{}.{}", stem, format.extension());
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

fn sketch_options(args: &RenderArgs, format: OutputFormat) -> SketchOptions {
    SketchOptions::new()
        .with_format(format)
        .with_quality(args.quality)
        .with_scale(args.scale)
        .with_parallel(args.parallel)
        .with_fonts(FontOptions {
            regular: args.font.clone(),
            bold: args.bold_font.clone(),
            ..Default::default()
        })
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(args.format, output);
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input, format));
    let options = sketch_options(args, format);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Parsing summary...");
    let doc = load_input(input)?.parse();

    let source: Box<dyn ImageSource> = if args.no_images {
        Box::new(NoImages)
    } else {
        Box::new(HttpImageSource::new(Duration::from_secs(args.timeout))?)
    };

    pb.set_message("Acquiring images and rendering...");
    let sketch = render(&doc, source.as_ref(), &options)?;
    fs::write(&output, &sketch.bytes)?;

    pb.finish_and_clear();

    let stats = &sketch.stats;
    println!(
        "{} {} ({}x{} {}, {} bytes)",
        "Saved to".green(),
        output.display(),
        sketch.width,
        sketch.height,
        sketch.format,
        sketch.byte_len()
    );
    println!(
        "  {} images: {} rendered, {} failed",
        "├─".dimmed(),
        stats.images_rendered,
        stats.images_failed
    );
    println!(
        "  {} bullets: {} of {}",
        "├─".dimmed(),
        stats.bullets_drawn,
        stats.bullets_available
    );
    let truncated = match (stats.title_truncated, stats.body_truncated) {
        (true, true) => "title, body",
        (true, false) => "title",
        (false, true) => "body",
        (false, false) => "none",
    };
    println!("  {} truncated: {}", "└─".dimmed(), truncated);

    Ok(())
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = papersketch::parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = papersketch::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let format = papersketch::detect_format_from_bytes(&data)?;
    let doc = papersketch::load_input_from_bytes(&data)?.parse();

    println!("{}", "Summary Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if !doc.authors.is_empty() {
        println!("{}: {}", "Authors".bold(), doc.display_authors());
    }
    if !doc.institutions.is_empty() {
        println!("{}: {}", "Institutions".bold(), doc.institutions.join("; "));
    }
    if let Some(ref venue) = doc.venue {
        println!("{}: {}", "Venue".bold(), venue);
    }
    if let Some(year) = doc.year {
        println!("{}: {}", "Year".bold(), year);
    }
    if let Some(ref url) = doc.url {
        println!("{}: {}", "Source".bold(), url);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Bullets".bold(), doc.bullet_count());
    println!("{}: {}", "Images".bold(), doc.images.len());

    let selection = pick_figures(&doc.images);
    for url in &selection.urls {
        println!("  {} {}", "→".dimmed(), url);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "papersketch".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Paper summary sketch renderer");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/papersketch".dimmed()
    );
    println!("License: MIT");
}
