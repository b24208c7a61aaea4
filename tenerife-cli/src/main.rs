//! Interactive console for the Tenerife tourism assistant.
//!
//! Loads the reference document, builds the vector index, wires the model
//! and weather tool into a [`RagChain`], and runs a read-eval-print loop.
//!
//! Requires: `OPENAI_API_KEY` environment variable (a `.env` file works).

mod loader;
mod settings;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tenerife_chain::RagChain;
use tenerife_model::{ModelConfig, OpenAiChatClient};
use tenerife_rag::{OpenAiEmbeddingProvider, RagConfig, VectorIndex};
use tenerife_weather::{WeatherService, WeatherTool};

use crate::loader::DocumentLoader;
use crate::settings::Settings;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a friendly and knowledgeable tourism assistant for \
Tenerife. Answer questions using the context provided from the official visitor guide. If the \
context does not contain the answer, say so honestly instead of guessing. When the user asks \
about the weather on a specific date, call the get_weather function. Keep answers concise and \
practical, and mention concrete places and activities where the guide supports it.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (for OPENAI_API_KEY).
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let settings = Settings::from_env()?;

    // -- 1. Load and index the visitor guide -------------------------------
    let pages = DocumentLoader::load(&settings.doc_path)?;
    let stats = DocumentLoader::stats(&pages);
    println!(
        "Loaded {} page(s), {} words from {}",
        stats.num_pages, stats.total_words, settings.doc_path
    );

    let rag_config = RagConfig::builder()
        .chunk_size(settings.chunk_size)
        .chunk_overlap(settings.chunk_overlap)
        .build()?;
    let embedder = Arc::new(OpenAiEmbeddingProvider::new(&settings.api_key)?);
    let index = Arc::new(VectorIndex::new(embedder, rag_config));

    println!("Building the vector index (this embeds every chunk)...");
    let chunk_count = index.build(&pages).await?;
    anyhow::ensure!(chunk_count > 0, "the document produced no indexable text");
    info!(chunk_count, "vector index ready");

    // -- 2. Model client ----------------------------------------------------
    let client = Arc::new(
        OpenAiChatClient::new(&settings.api_key)?.with_config(ModelConfig::default()),
    );
    if !client.ping().await {
        warn!("model connectivity check failed; queries may not succeed");
    }

    // -- 3. Assemble the chain ----------------------------------------------
    let system_prompt = match &settings.system_prompt_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read system prompt at {path}"))?,
        None => DEFAULT_SYSTEM_PROMPT.to_string(),
    };

    let weather = Arc::new(WeatherTool::new(Arc::new(WeatherService::simulated())));
    let mut chain = RagChain::builder()
        .llm(client)
        .index(index)
        .tool(weather)
        .system_prompt(system_prompt)
        .max_history(settings.max_history)
        .build()?;

    // -- 4. REPL ------------------------------------------------------------
    println!("\nAsk me about Tenerife. Commands: /clear resets the conversation, /quit exits.\n");
    run_console(&mut chain, settings.top_k).await
}

async fn run_console(chain: &mut RagChain, top_k: usize) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let question = line.trim();

        match question {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                chain.clear_history();
                println!("Conversation cleared.");
                continue;
            }
            _ => {}
        }

        match chain.query(question, top_k).await {
            Ok(response) => {
                println!("\n{}\n", response.answer);
                if !response.sources.is_empty() {
                    let pages: Vec<String> =
                        response.sources.iter().map(|s| format!("page {}", s.page)).collect();
                    println!("  sources: {}", pages.join(", "));
                }
                if response.tool_called {
                    println!("  (weather forecast consulted)");
                }
                println!();
            }
            Err(err) => {
                eprintln!("error: {err}");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
