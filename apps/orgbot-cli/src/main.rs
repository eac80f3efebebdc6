use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use orgbot_core::config::{Config, Settings};
use orgbot_core::types::Answer;
use orgbot_core::data_loader::{load_documents, load_raw_documents, merge_collections, write_raw_documents};
use orgbot_facts::FactTable;
use orgbot_llm::get_default_chat_model;
use orgbot_router::{AnswerEngine, Session};
use orgbot_text::LexicalIndex;

#[derive(Parser)]
#[command(name = "orgbot", version, about = "Corporate question answering over a fact table and a crawled knowledge base")]
struct Cli {
    /// Directory holding config.toml and the data files it references
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question and exit
    Ask { question: String },
    /// Interactive conversation (/new, /route, /history, /salir)
    Chat,
    /// Show the knowledge base pages retrieved for a query
    Search {
        query: String,
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Merge two crawled collections, keeping the first page per url
    MergeKb { base: PathBuf, extra: PathBuf, out: PathBuf },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::MergeKb { base, extra, out } => merge_kb(&base, &extra, &out),
        Command::Search { query, top_k } => {
            let config = Config::load_from(&cli.config_dir).context("loading configuration")?;
            search(&config, &query, top_k)
        }
        Command::Ask { question } => {
            let config = Config::load_from(&cli.config_dir).context("loading configuration")?;
            let engine = build_engine(&config)?;
            let mut session = Session::new();
            let answer = engine.answer(&question, &mut session);
            println!("{}", render_answer(&answer));
            Ok(())
        }
        Command::Chat => {
            let config = Config::load_from(&cli.config_dir).context("loading configuration")?;
            let engine = build_engine(&config)?;
            repl(&engine)
        }
    }
}

/// One answer as shown to the user, prefixed with the route that produced it.
fn render_answer(answer: &Answer) -> String {
    format!("[{}] {}", answer.route, answer.text)
}

fn build_engine(config: &Config) -> anyhow::Result<AnswerEngine> {
    let settings = config.settings()?;
    let documents = load_documents(&config.data_path(&settings.data.knowledge_base))?;
    let facts = FactTable::from_path(&config.data_path(&settings.data.structured_data))?;
    let chat = get_default_chat_model(&settings.llm)?;
    Ok(AnswerEngine::from_settings(&settings, documents, facts, chat))
}

fn search(config: &Config, query: &str, top_k: Option<usize>) -> anyhow::Result<()> {
    let Settings { data, search, .. } = config.settings()?;
    let documents = load_documents(&config.data_path(&data.knowledge_base))?;
    let index = LexicalIndex::build_with_excerpt_chars(&documents, search.excerpt_chars);
    let hits = index.search(query, top_k.unwrap_or(search.top_k), search.min_similarity);

    println!("🔍 {} results for: \"{}\"", hits.len(), query);
    for (i, hit) in hits.iter().enumerate() {
        let Some(doc) = documents.get(hit.document_id) else { continue };
        println!("\n  {}. score={:.4}  {}  {}", i + 1, hit.score, doc.title, doc.url);
        let preview: String = hit.excerpt.chars().take(200).collect();
        println!("     📝 {preview}");
    }
    Ok(())
}

fn merge_kb(base: &Path, extra: &Path, out: &Path) -> anyhow::Result<()> {
    let base_docs = load_raw_documents(base)?;
    let extra_docs = load_raw_documents(extra)?;
    let (n_base, n_extra) = (base_docs.len(), extra_docs.len());
    let merged = merge_collections(base_docs, extra_docs);
    write_raw_documents(out, &merged)?;
    info!(base = n_base, extra = n_extra, merged = merged.len(), out = %out.display(), "knowledge base merged");
    println!("✅ {} pages written to {}", merged.len(), out.display());
    Ok(())
}

fn repl(engine: &AnswerEngine) -> anyhow::Result<()> {
    let mut session = Session::new();
    let style = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?;
    println!("💬 Conversación {} (/new, /route, /history, /salir)", session.thread_id);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("tú> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        match input {
            "" => continue,
            "/salir" | "/exit" => break,
            "/new" => {
                session.reset();
                println!("🆕 Nueva conversación {}", session.thread_id);
            }
            "/route" => match session.last_route {
                Some(route) => println!("ruta: {route}"),
                None => println!("ruta: (ninguna)"),
            },
            "/history" => {
                for (i, turn) in session.history.iter().enumerate() {
                    println!("{}. [{}] tú: {}\n   bot: {}", i + 1, turn.route, turn.user, turn.bot);
                }
            }
            question => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(style.clone());
                pb.set_message("pensando...");
                pb.enable_steady_tick(Duration::from_millis(100));
                let answer = engine.answer(question, &mut session);
                pb.finish_and_clear();
                println!("bot> {}", render_answer(&answer));
            }
        }
    }
    Ok(())
}
