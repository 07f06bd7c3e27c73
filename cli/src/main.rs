use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use folio::api::documents::{process_document, process_slide, process_slides, process_toc};
use folio::api::search::{process_search, MatchList, SearchParams};
use folio::config::{Loader, ViewerConfig};
use folio::models::document::DocumentId;
use folio::rendering::toc::EMPTY_TOC_MESSAGE;
use folio::rendering::Renderer;
use folio::storage::client::{DocumentSource, FsDocumentSource, MemoryDocumentSource};
use folio::views::ViewMode;

#[derive(Parser)]
#[command(version, about = "Folio - inspect markdown documents as pages and slides", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Resolve <file> against this docs root instead of its own directory
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file layered over the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the slides a document splits into
    Slides {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },
    /// Print the table of contents
    Toc {
        /// Markdown file, or `-` for stdin
        file: PathBuf,
    },
    /// Search a document
    Search {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// Text or pattern to look for
        query: String,

        #[arg(long)]
        case_sensitive: bool,

        /// Treat the query as a regular expression
        #[arg(long)]
        regex: bool,

        /// Search each slide's markdown instead of the rendered page text
        #[arg(long)]
        slides: bool,
    },
    /// Render a document (or one slide of it) to HTML
    Render {
        /// Markdown file, or `-` for stdin
        file: PathBuf,

        /// 1-based slide number
        #[arg(long)]
        slide: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let renderer = Renderer::from_config(&config.render);

    match cli.command {
        Commands::Slides { file } => {
            let (source, id) = open(&file, cli.root.as_deref())?;
            let deck = process_slides(source.as_ref(), &renderer, &id, config.view.preview_length).await?;
            if cli.json {
                return print_json(&deck);
            }
            for slide in &deck.slides {
                println!("{:>3}. {}", slide.index + 1, slide.title);
            }
            println!("{} slide(s)", deck.total);
        }
        Commands::Toc { file } => {
            let (source, id) = open(&file, cli.root.as_deref())?;
            let toc = process_toc(source.as_ref(), &renderer, &id).await?;
            if cli.json {
                return print_json(&toc);
            }
            if toc.entries.is_empty() {
                println!("{EMPTY_TOC_MESSAGE}");
            }
            for entry in &toc.entries {
                let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                println!("{indent}- {} (#{})", entry.text, entry.id);
            }
        }
        Commands::Search {
            file,
            query,
            case_sensitive,
            regex,
            slides,
        } => {
            let (source, id) = open(&file, cli.root.as_deref())?;
            let params = SearchParams {
                file: Some(id.to_string()),
                q: query,
                case_sensitive,
                regex,
                mode: if slides { ViewMode::Slides } else { ViewMode::Page },
            };
            let response = process_search(
                source.as_ref(),
                &renderer,
                &id,
                &params,
                config.view.context_radius,
            )
            .await?;
            if cli.json {
                return print_json(&response);
            }
            if let Some(summary) = &response.summary {
                println!("{summary}");
            }
            print_matches(&response.matches);
        }
        Commands::Render { file, slide } => {
            let (source, id) = open(&file, cli.root.as_deref())?;
            match slide {
                Some(0) => bail!("Slide numbers start at 1"),
                Some(number) => {
                    let current = process_slide(source.as_ref(), &renderer, &id, number - 1).await?;
                    if cli.json {
                        return print_json(&current);
                    }
                    println!("{}", current.slide.html);
                }
                None => {
                    let page = process_document(source.as_ref(), &renderer, &id).await?;
                    if cli.json {
                        return print_json(&page);
                    }
                    println!("{}", page.html);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "folio=warn",
        1 => "folio=debug",
        _ => "folio=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    let loader = match path {
        Some(path) => Loader::new().with_file(path).with_environment(),
        None => Loader::standard(),
    };
    loader.build().context("Failed to load configuration")
}

/// Identifier given to markdown read from stdin.
const STDIN_DOCUMENT: &str = "stdin.md";

/// Split a file argument into a document source and an identifier.
///
/// Without `--root` the file's own directory is the docs root, so relative
/// links resolve the same way the server resolves them. `-` reads the
/// document from stdin.
fn open(file: &Path, root: Option<&Path>) -> Result<(Box<dyn DocumentSource>, DocumentId)> {
    if file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        let id = DocumentId::parse(STDIN_DOCUMENT)?;
        let source = MemoryDocumentSource::new().with_document(&id, content);
        return Ok((Box::new(source), id));
    }

    let (root, relative) = match root {
        Some(root) => {
            let relative = file.strip_prefix(root).unwrap_or(file);
            (root.to_path_buf(), relative.to_path_buf())
        }
        None => {
            let name = file
                .file_name()
                .with_context(|| format!("Not a file: {}", file.display()))?;
            let parent = match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (parent, PathBuf::from(name))
        }
    };

    let id = DocumentId::parse(&relative.to_string_lossy())?;
    tracing::debug!(root = %root.display(), document = %id, "opening document");
    Ok((Box::new(FsDocumentSource::new(root)), id))
}

fn print_matches(matches: &MatchList) {
    match matches {
        MatchList::Page(matches) => {
            for m in matches {
                println!("{:>3}. @{}  ...{}...", m.index + 1, m.position, one_line(&m.context));
            }
        }
        MatchList::Slides(matches) => {
            for m in matches {
                println!(
                    "Slide {} ({}) @{}  ...{}...",
                    m.slide_index + 1,
                    m.slide_title,
                    m.position,
                    one_line(&m.context)
                );
            }
        }
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
