//! CLI tool for turning generated lesson text into paginated slides.

mod sources;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lesson_core::{
    generate_document, Document, DocumentComposer, ImageLookup, LessonRequest, LineClassifier,
    LineKind, MarkdownHeadingClassifier, NoImageLookup, PageGeometry, SentenceAwareClassifier,
    TextGenerator, TextNormalizer, TextRenderer, UppercaseClassifier,
};
use lesson_pptx::PptxWriter;
use sources::{slug, CommandGenerator, DirectoryImageLookup};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Turn generated lesson text into a paginated slide document.
#[derive(Parser, Debug)]
#[command(name = "lesson-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lesson text file; reads stdin when absent or "-"
    input: Option<PathBuf>,

    /// Lesson topic
    #[arg(short, long, default_value = "")]
    topic: String,

    /// Grade the lesson is for
    #[arg(short, long, default_value = "")]
    grade: String,

    /// Lesson duration in minutes
    #[arg(short, long, default_value = "")]
    duration: String,

    /// Program that prints lesson text for the prompt given on its stdin
    #[arg(long, value_name = "PROGRAM", conflicts_with = "input")]
    generator: Option<String>,

    /// Argument passed to the generator program (repeatable)
    #[arg(long = "generator-arg", value_name = "ARG", requires = "generator")]
    generator_args: Vec<String>,

    /// Usable slide height
    #[arg(long, default_value_t = PageGeometry::default().max_content_height)]
    max_content_height: f64,

    /// Height taken by the slide title
    #[arg(long, default_value_t = PageGeometry::default().title_reserve)]
    title_reserve: f64,

    /// Height taken by each body line
    #[arg(long, default_value_t = PageGeometry::default().line_height)]
    line_height: f64,

    /// How subtopic headings are detected
    #[arg(long, value_enum, default_value_t = HeadingMode::Sentence)]
    headings: HeadingMode,

    /// Strip markdown heading, bullet and emphasis markers before segmenting
    #[arg(long)]
    strip_markup: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file (default: stdout for text/json, <title>.pptx for pptx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding <topic>.png/.jpg images for the title slide
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Prefix page titles with [n/total] in text output
    #[arg(long)]
    page_numbers: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeadingMode {
    /// Uppercase start, unless the line ends like a sentence
    Sentence,
    /// Any line starting with an uppercase letter
    Uppercase,
    /// Only `#` lines or lines wrapped in `**`
    Markdown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Pptx,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let geometry = PageGeometry::new()
        .with_max_content_height(args.max_content_height)
        .with_title_reserve(args.title_reserve)
        .with_line_height(args.line_height);

    let mode = args.headings;
    let classify = move |line: &str| -> LineKind {
        match mode {
            HeadingMode::Sentence => SentenceAwareClassifier.classify(line),
            HeadingMode::Uppercase => UppercaseClassifier.classify(line),
            HeadingMode::Markdown => MarkdownHeadingClassifier.classify(line),
        }
    };
    let composer = DocumentComposer::new(geometry)
        .context("Invalid page geometry")?
        .with_classifier(classify);
    let normalizer = TextNormalizer::new().with_strip_markup(args.strip_markup);

    let request = LessonRequest::new(&args.topic, &args.grade, &args.duration);
    let images: Box<dyn ImageLookup> = match &args.image_dir {
        Some(dir) => Box::new(DirectoryImageLookup::new(dir)),
        None => Box::new(NoImageLookup),
    };

    let generator: Box<dyn TextGenerator> = match &args.generator {
        Some(program) => Box::new(CommandGenerator::new(
            program.as_str(),
            args.generator_args.clone(),
        )),
        None => {
            let text = read_input(args.input.as_deref())?;
            Box::new(move |_: &str| -> lesson_core::Result<String> { Ok(text.clone()) })
        }
    };

    let document = generate_document(
        generator.as_ref(),
        &normalizer,
        &composer,
        &request,
        images.as_ref(),
    )
    .context("Failed to build lesson document")?;

    log::info!(
        "Composed {} pages ({} body lines per page)",
        document.len(),
        geometry.lines_per_page()
    );

    write_document(&document, &args)
}

/// Read lesson text from a file, or from stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    let mut text = String::new();
    match path {
        Some(path) if path != Path::new("-") => {
            File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?
                .read_to_string(&mut text)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        _ => {
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
        }
    }
    Ok(text)
}

/// Write the document in the requested format.
fn write_document(document: &Document, args: &Args) -> Result<()> {
    match args.format {
        OutputFormat::Text => {
            let renderer = TextRenderer::new().with_page_numbers(args.page_numbers);
            emit(&renderer.render_with_newline(document), args.output.as_deref())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(document)
                .context("Failed to serialize document")?;
            emit(&format!("{}\n", json), args.output.as_deref())
        }
        OutputFormat::Pptx => {
            let path = args
                .output
                .clone()
                .unwrap_or_else(|| default_pptx_path(document));
            PptxWriter::new()
                .write_to_path(document, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
            Ok(())
        }
    }
}

/// `<title-slug>.pptx` in the current directory.
fn default_pptx_path(document: &Document) -> PathBuf {
    let stem = document
        .title_page()
        .map(|page| slug(&page.title))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "lesson".to_string());
    PathBuf::from(format!("{}.pptx", stem))
}

/// Print to stdout, or write to the given file.
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::Page;

    #[test]
    fn test_default_pptx_path() {
        let doc = Document::new(Page::title_page("The Water Cycle", vec![]));
        assert_eq!(default_pptx_path(&doc), PathBuf::from("the-water-cycle.pptx"));

        let untitled = Document::new(Page::title_page("", vec![]));
        assert_eq!(default_pptx_path(&untitled), PathBuf::from("lesson.pptx"));
    }

    #[test]
    fn test_args_defaults_match_geometry() {
        let args = Args::parse_from(["lesson-slides", "lesson.txt"]);
        let defaults = PageGeometry::default();
        assert_eq!(args.max_content_height, defaults.max_content_height);
        assert_eq!(args.title_reserve, defaults.title_reserve);
        assert_eq!(args.line_height, defaults.line_height);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.headings, HeadingMode::Sentence);
    }

    #[test]
    fn test_generator_conflicts_with_input() {
        let result = Args::try_parse_from([
            "lesson-slides",
            "lesson.txt",
            "--generator",
            "gen",
        ]);
        assert!(result.is_err());
    }
}
