use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use askdocs_core::config::{expand_path, Config, Settings};
use askdocs_core::loader::DocumentLoader;
use askdocs_core::types::{Document, QueryResponse};
use askdocs_engine::QaEngine;
use askdocs_text::keywords::{detect_language, extract_keywords};

const DOCUMENT_KEYWORDS: usize = 10;
const USAGE: &str = "Usage:\n  askdocs ingest [dir] \"<question>\" [--top-k N] [--json]\n  askdocs stats [dir] [--json]";

struct Options {
    positional: Vec<String>,
    top_k: Option<usize>,
    json: bool,
}

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    args.remove(0);
    if args.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options { positional: Vec::new(), top_k: None, json: false };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--top-k" | "-k" => {
                let value = args.get(i + 1).context("--top-k requires a number")?;
                options.top_k = Some(value.parse().with_context(|| format!("--top-k expects a number, got {value}"))?);
                i += 1;
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ => options.positional.push(args[i].clone()),
        }
        i += 1;
    }
    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Load every text file under `dir`, fill in keywords and language, and index
/// it with a progress bar.
fn build_engine(settings: &Settings, dir: &Path) -> anyhow::Result<QaEngine> {
    let engine = QaEngine::new(settings)?;
    let documents = DocumentLoader::new(settings.data.owner_id.clone())
        .load_directory(dir)
        .with_context(|| format!("loading documents from {}", dir.display()))?;

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let mut chunks = 0usize;
    for document in documents {
        pb.set_message(document.filename.clone());
        let id = document.id.clone();
        match engine.index_document(enrich(document)) {
            Ok(report) => chunks += report.chunks,
            Err(err) => warn!(document = %id, error = %err, "skipping document"),
        }
        pb.inc(1);
    }
    pb.finish_with_message("indexed");
    info!(chunks, dir = %dir.display(), "index ready");
    Ok(engine)
}

fn enrich(document: Document) -> Document {
    let keywords = extract_keywords(&document.text, DOCUMENT_KEYWORDS);
    let language = detect_language(&document.text);
    document.with_keywords(keywords).with_language(language)
}

fn print_response(response: &QueryResponse) {
    println!("\n[{}] confidence {:.2}\n", response.query_type, response.confidence);
    println!("{}", response.answer);
    if !response.sources.is_empty() {
        println!("\nSources:");
        for (i, source) in response.sources.iter().enumerate() {
            println!("  {}. {} (relevance {:.3})", i + 1, source.filename, source.relevance);
            println!("     {}", source.excerpt.replace('\n', " "));
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();
    let options = parse_options(&args)?;
    let default_dir = || expand_path(&settings.data.docs_dir);

    match cmd.as_str() {
        "ingest" => {
            let (dir, question) = match options.positional.as_slice() {
                [question] => (default_dir(), question.clone()),
                [dir, question] => (PathBuf::from(dir), question.clone()),
                _ => bail!("ingest expects [dir] \"<question>\"\n{USAGE}"),
            };
            let engine = build_engine(&settings, &dir)?;
            let top_k = options.top_k.unwrap_or_else(|| engine.default_top_k());
            let response = engine.query(&question, &settings.data.owner_id, top_k)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_response(&response);
            }
        }
        "stats" => {
            let dir = options.positional.first().map(PathBuf::from).unwrap_or_else(default_dir);
            let engine = build_engine(&settings, &dir)?;
            let stats = engine.stats()?;
            let documents = engine.documents(&settings.data.owner_id)?;
            if options.json {
                let value = serde_json::json!({ "stats": stats, "documents": documents });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!(
                    "documents={} chunks={} vocabulary={} dimensions={}",
                    stats.documents, stats.chunks, stats.vocabulary_size, stats.dimensions
                );
                for doc in documents {
                    println!(
                        "  {}  words={} chunks={} lang={} keywords=[{}]",
                        doc.id,
                        doc.word_count,
                        doc.chunks,
                        doc.language,
                        doc.keywords.join(", ")
                    );
                }
            }
        }
        other => bail!("unknown command {other}\n{USAGE}"),
    }
    Ok(())
}
