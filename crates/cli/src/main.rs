//! CLI tool for turning line-per-slide text files into PPTX slideshows.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slidegen_core::{secure_filename, RenderConfig, TextColor, TextParser};
use slidegen_pptx::{DeckReader, DeckSummary};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Build a slideshow with one slide per line of text.
#[derive(Parser, Debug)]
#[command(name = "slidegen")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the caption JSON for a text file
    Parse {
        /// Input text file, one caption per line
        input: PathBuf,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a text file and a background image into a .pptx
    Convert {
        /// Input text file, one caption per line
        input: PathBuf,

        /// Background image (.png, .jpg, .jpeg)
        #[arg(short, long)]
        image: PathBuf,

        /// Caption color; "white" (any case) or black for anything else
        #[arg(short, long, default_value = "black")]
        color: String,

        /// Directory to copy the inputs into and write results to
        /// (default: next to the input file)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Summarize the slides of a .pptx
    Inspect {
        /// Presentation to read
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Parse { input, output } => parse(&input, output.as_deref()),
        Command::Convert {
            input,
            image,
            color,
            out_dir,
        } => convert(&input, &image, &color, out_dir.as_deref()),
        Command::Inspect { input, json } => inspect(&input, json),
    }
}

fn parse(input: &Path, output: Option<&Path>) -> Result<()> {
    let captions = TextParser::new()
        .parse_file(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    match output {
        Some(path) => captions
            .write_json(path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let json = serde_json::to_string_pretty(&captions)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn convert(input: &Path, image: &Path, color: &str, out_dir: Option<&Path>) -> Result<()> {
    let (text_path, image_path) = match out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            (stage_input(input, dir)?, stage_input(image, dir)?)
        }
        None => (input.to_path_buf(), image.to_path_buf()),
    };

    let config = RenderConfig::new(image_path, TextColor::resolve(color));
    log::debug!("Rendering with {} captions", config.text_color);

    let conversion = slidegen_pptx::convert(&text_path, &config)
        .with_context(|| format!("Failed to convert {}", text_path.display()))?;

    log::info!(
        "{} slides, captions in {}",
        conversion.slide_count(),
        conversion.json_path.display()
    );
    println!("{}", conversion.pptx_path.display());
    Ok(())
}

/// Copy an input into `dir` under a sanitized name.
fn stage_input(path: &Path, dir: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(secure_filename)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Unusable file name: {}", path.display()))?;

    let target = dir.join(name);
    if target != path {
        std::fs::copy(path, &target).with_context(|| {
            format!("Failed to copy {} to {}", path.display(), target.display())
        })?;
    }
    Ok(target)
}

fn inspect(input: &Path, json: bool) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let deck = DeckReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &deck)?;
        writeln!(out)?;
    } else {
        write_summary(&mut out, &deck)?;
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, deck: &DeckSummary) -> Result<()> {
    writeln!(
        out,
        "{} slides, {:.2}in x {:.2}in",
        deck.slides.len(),
        deck.slide_width as f64 / slidegen_pptx::layout::EMU_PER_INCH as f64,
        deck.slide_height as f64 / slidegen_pptx::layout::EMU_PER_INCH as f64
    )?;

    for slide in &deck.slides {
        let mut details = Vec::new();
        if let Some(name) = &slide.name {
            details.push(format!("name={:?}", name));
        }
        if slide.has_picture {
            details.push("picture".to_string());
        }
        if let Some(bg) = &slide.background {
            details.push(format!("background=#{}", bg));
        }
        writeln!(out, "  [{}] {}", slide.number, details.join(" "))?;

        for shape in &slide.texts {
            let color = shape.color.as_deref().unwrap_or("inherit");
            let align = if shape.centered { "center" } else { "left" };
            writeln!(out, "      {:?} ({}, {})", shape.text, color, align)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_input_sanitizes_name() {
        let src_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("quarterly report.txt");
        std::fs::write(&src, "line").unwrap();

        let staged = stage_input(&src, out_dir.path()).unwrap();
        assert_eq!(staged, out_dir.path().join("quarterly_report.txt"));
        assert_eq!(std::fs::read_to_string(staged).unwrap(), "line");
    }

    #[test]
    fn test_stage_input_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("notes.txt");
        std::fs::write(&src, "line").unwrap();

        assert_eq!(stage_input(&src, dir.path()).unwrap(), src);
    }

    #[test]
    fn test_write_summary() {
        let deck = DeckSummary {
            slide_width: 14_630_400,
            slide_height: 8_229_600,
            slides: vec![slidegen_pptx::SlideSummary {
                number: 1,
                name: Some("Slide 1".to_string()),
                texts: vec![slidegen_pptx::ShapeText {
                    text: "Revenue".to_string(),
                    color: Some("FFFFFF".to_string()),
                    centered: true,
                }],
                has_picture: true,
                background: None,
            }],
        };

        let mut out = Vec::new();
        write_summary(&mut out, &deck).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("1 slides, 16.00in x 9.00in"));
        assert!(text.contains("[1] name=\"Slide 1\" picture"));
        assert!(text.contains("\"Revenue\" (FFFFFF, center)"));
    }
}
