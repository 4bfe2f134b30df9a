use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;
use resume_render::{classify_text, ClassifiedLine, PaperSize, PdfRenderer, RenderOptions};

/// Renders plain-text resumes into PDF or DOCX documents.
///
/// PDF output measures text with Liberation Sans when it is installed or
/// `RESUME_RENDER_FONTS_DIR` / `--fonts-dir` point at its TTF files, and with
/// the bundled DejaVu Sans metrics otherwise.
#[derive(Parser)]
#[command(author, version, about = "Render plain-text resumes as PDF or DOCX")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a styled, paginated PDF.
    Pdf {
        #[command(flatten)]
        io: IoArgs,

        /// Paper size (`a4` or `letter`); defaults to `RESUME_RENDER_PAPER` or A4.
        #[arg(long, value_parser = parse_paper)]
        paper: Option<PaperSize>,

        /// Directory searched first for the metric fonts.
        #[arg(long)]
        fonts_dir: Option<PathBuf>,

        /// Title stored in the PDF metadata.
        #[arg(long)]
        title: Option<String>,

        /// Skip the heading outline even when bookmarks are compiled in.
        #[arg(long)]
        no_bookmarks: bool,
    },

    /// Write one plain paragraph per input line into a DOCX file.
    Docx {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Print the category assigned to every input line.
    Classify {
        /// Input text file, `-` for stdin.
        #[arg(default_value = "-")]
        input: PathBuf,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input text file, `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file; binary output goes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_paper(value: &str) -> Result<PaperSize, String> {
    PaperSize::parse(value).ok_or_else(|| format!("unknown paper size '{value}'"))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Pdf {
            io,
            paper,
            fonts_dir,
            title,
            no_bookmarks,
        } => {
            let mut options = RenderOptions::from_env();
            if let Some(paper) = paper {
                options = options.with_paper(paper);
            }
            if let Some(dir) = fonts_dir {
                options = options.with_fonts_dir(dir);
            }
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if no_bookmarks {
                options = options.with_bookmarks(false);
            }

            let text = read_input(&io.input)?;
            let rendered = PdfRenderer::new(options).render_text(&text)?;
            info!(
                "Rendered {} page(s), {} section heading(s)",
                rendered.page_count,
                rendered.headings.len()
            );
            write_output(io.output.as_deref(), &rendered.bytes)
        }
        Commands::Docx { io } => {
            let text = read_input(&io.input)?;
            let bytes = resume_render::render_docx(&text)?;
            write_output(io.output.as_deref(), &bytes)
        }
        Commands::Classify { input } => {
            let text = read_input(&input)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for line in classify_text(&text) {
                writeln!(out, "{}", format_classified(&line))?;
            }
            Ok(())
        }
    }
}

/// One `classify` output row: 1-based line number, category, display text.
fn format_classified(line: &ClassifiedLine) -> String {
    format!(
        "{:>4}  {:<15}  {}",
        line.line().index() + 1,
        line.category(),
        line.text()
    )
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) => {
            fs::write(path, bytes)?;
            info!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(bytes)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
