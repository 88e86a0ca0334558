mod codegen;
mod parser;
mod walker;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use parser::endpoint::{parse_endpoint_title, PathSegment};
use parser::segment::Section;

#[derive(Parser)]
#[command(name = "routegen", about = "Typed endpoint declarations from markdown API docs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the Endpoints module for a docs directory
    Generate {
        /// Directory of markdown documentation
        docs: PathBuf,
        /// Write the module to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List every request section found in the docs
    Endpoints {
        /// Directory of markdown documentation
        docs: PathBuf,
        /// Dump parsed endpoint descriptors as JSON
        #[arg(long)]
        json: bool,
    },
    /// Corpus statistics
    Stats {
        /// Directory of markdown documentation
        docs: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { docs, output } => {
            let pages = segment_corpus(&docs)?;
            let trees: Vec<Section> = pages.into_iter().map(|(_, tree)| tree).collect();
            let count = parser::collect_requests(&trees).len();
            let module = codegen::emit_endpoints(&trees)?;
            match output {
                Some(path) => {
                    fs::write(&path, &module)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "Wrote {} ({} endpoints from {} files)",
                        path.display(),
                        count,
                        trees.len()
                    );
                }
                None => print!("{module}"),
            }
            Ok(())
        }
        Commands::Endpoints { docs, json } => {
            let pages = segment_corpus(&docs)?;
            let rows = endpoint_rows(&pages)?;
            if rows.is_empty() {
                println!("No request sections found.");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            println!(
                "{:>3} | {:<28} | {:<6} | {:<44} | {}",
                "#", "Identifier", "Verb", "Path", "File"
            );
            println!("{}", "-".repeat(110));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<28} | {:<6} | {:<44} | {}",
                    i + 1,
                    truncate(&r.identifier, 28),
                    r.verb,
                    truncate(&r.path, 44),
                    r.file
                );
            }
            println!("\n{} endpoints", rows.len());
            Ok(())
        }
        Commands::Stats { docs } => {
            let pages = segment_corpus(&docs)?;
            let mut stats = CorpusStats {
                files: pages.len(),
                ..CorpusStats::default()
            };
            for (_, tree) in &pages {
                tally(tree, &mut stats);
            }
            println!("Files:       {}", stats.files);
            println!("Sections:    {}", stats.sections);
            println!("Requests:    {}", stats.requests);
            println!("Tables:      {}", stats.tables);
            println!("Code blocks: {}", stats.code_blocks);
            println!("Notes:       {}", stats.notes);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

/// Load and segment every markdown file under `docs`, in walker order.
/// Segmentation runs in parallel per file; the collected order is stable.
fn segment_corpus(docs: &Path) -> Result<Vec<(PathBuf, Section)>> {
    let files = walker::load_docs(docs)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")?
            .progress_chars("=> "),
    );

    let pages: Vec<(PathBuf, Section)> = files
        .into_par_iter()
        .map(|doc| {
            let tree = parser::segment_document(&doc.text);
            pb.inc(1);
            (doc.path, tree)
        })
        .collect();

    pb.finish_and_clear();
    Ok(pages)
}

#[derive(Serialize)]
struct EndpointRow {
    file: String,
    identifier: String,
    display_name: String,
    verb: String,
    path: String,
}

fn endpoint_rows(pages: &[(PathBuf, Section)]) -> Result<Vec<EndpointRow>> {
    let mut rows = Vec::new();
    for (path, tree) in pages {
        for section in parser::collect_requests(std::slice::from_ref(tree)) {
            let endpoint = parse_endpoint_title(&section.title)?;
            rows.push(EndpointRow {
                file: path.display().to_string(),
                identifier: codegen::format::identifier(&endpoint.display_name),
                display_name: endpoint.display_name.clone(),
                verb: endpoint.verb.clone(),
                path: render_path(&endpoint.path_segments),
            });
        }
    }
    Ok(rows)
}

/// Render path segments back into template form, params in braces.
fn render_path(segments: &[PathSegment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|s| match s {
            PathSegment::Literal(text) => text.clone(),
            PathSegment::Param(name) => format!("{{{name}}}"),
        })
        .collect();
    format!("/{}", parts.join("/"))
}

#[derive(Default)]
struct CorpusStats {
    files: usize,
    sections: usize,
    requests: usize,
    tables: usize,
    code_blocks: usize,
    notes: usize,
}

fn tally(section: &Section, stats: &mut CorpusStats) {
    stats.sections += 1;
    if section.title.contains(parser::REQUEST_DELIMITER) {
        stats.requests += 1;
    }
    stats.tables += section.tables.len();
    stats.code_blocks += section.code.len();
    stats.notes += section.notes.len();
    for child in &section.children {
        tally(child, stats);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
