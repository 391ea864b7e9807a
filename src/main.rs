use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use lessonmark::clipboard::FileClipboard;
use lessonmark::export::{self, CopyStatus, StatusIndicator};
use lessonmark::stream::LiveDocument;
use lessonmark::{Config, Error, Grammar, Presentation, Result};

#[derive(Parser)]
#[command(name = "lessonmark")]
#[command(about = "Render generated lesson plans as styled HTML or plain text")]
struct Cli {
    /// TOML config file (defaults to the bundled config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the standalone styled HTML document
    Html {
        /// Input plan text, or `-` for stdin
        input: PathBuf,
    },
    /// Print the plain-text rendering
    Text {
        /// Input plan text, or `-` for stdin
        input: PathBuf,
    },
    /// Print the parsed document tree as JSON
    Tree {
        /// Input plan text, or `-` for stdin
        input: PathBuf,
    },
    /// Copy the rendered plan into a clipboard directory
    Copy {
        /// Input plan text, or `-` for stdin
        input: PathBuf,

        /// Directory receiving clipboard.html and clipboard.txt
        #[arg(long)]
        to: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(CopyStatus::Failed) => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<CopyStatus> {
    let config = match &cli.config {
        Some(path) => {
            log::debug!("Using config from: {}", path.display());
            Config::load(path)?
        }
        None => {
            log::debug!("Using default config");
            Config::compiled_default()
        }
    };
    let grammar = Grammar::from_markers(&config.markers)?;
    let math = config.export.math_renderer();

    match cli.command {
        Command::Html { input } => {
            let live = read_input(&input, grammar)?;
            let presentation = Presentation::render(live.document(), math);
            print!(
                "{}",
                export::styled_document(&presentation.html, &config.export)
            );
        }
        Command::Text { input } => {
            let live = read_input(&input, grammar)?;
            let presentation = Presentation::render(live.document(), math);
            println!("{}", presentation.text);
        }
        Command::Tree { input } => {
            let live = read_input(&input, grammar)?;
            println!("{}", serde_json::to_string_pretty(live.document())?);
        }
        Command::Copy { input, to } => {
            let live = read_input(&input, grammar)?;
            let presentation = Presentation::render(live.document(), math);
            let mut clipboard = FileClipboard::new(to);
            let mut indicator = StatusIndicator::for_export(&config.export);
            let now = Instant::now();
            let status =
                indicator.copy(&mut clipboard, &presentation, live.text(), &config.export, now);
            println!("{}", indicator.label_at(now, &config.export.labels));
            log::debug!("status reverts after {:?}", config.export.status_hold());
            return Ok(status);
        }
    }

    Ok(CopyStatus::Idle)
}

/// Read the whole input. Stdin is fed line by line through the live buffer,
/// the way generated text arrives.
fn read_input(input: &Path, grammar: Grammar) -> Result<LiveDocument> {
    let mut live = LiveDocument::new(grammar);

    if input == Path::new("-") {
        let mut reader = io::stdin().lock();
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let blocks = live.push(&line).blocks.len();
            log::trace!("{} bytes read, {} blocks", live.text().len(), blocks);
        }
    } else {
        let text = fs::read_to_string(input).map_err(|source| Error::Read {
            path: input.to_path_buf(),
            source,
        })?;
        live.replace(&text);
    }

    log::debug!("{} blocks parsed", live.document().blocks.len());
    Ok(live)
}
