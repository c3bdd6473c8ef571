//! End-to-end walkthrough of the Nataris API.
//!
//! Run:
//!     NATARIS_API_KEY=your_key cargo run --bin walkthrough [audio-file]
//!
//! Passing an audio file path adds a transcription step.

use anyhow::{Context, Result};
use nataris::chat::{ChatParams, Message, Orchestration};
use nataris::inference::InferenceParams;
use nataris::NatarisApi;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = match std::env::var("NATARIS_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Error: NATARIS_API_KEY environment variable is required");
            eprintln!("Usage: NATARIS_API_KEY=your_key cargo run --bin walkthrough");
            std::process::exit(1);
        }
    };
    let api = NatarisApi::new(&api_key)?;

    println!("=== Nataris API - Rust Example ===\n");

    println!("1. Checking balance...");
    let usage = api.get_usage().await?;
    println!("   Balance: ${}", usage.balance_usd);
    println!("   Requests this period: {}\n", usage.total_requests);

    println!("2. Available models:");
    for model in api.list_models().await? {
        println!("   - {} ({})", model.id, model.kind);
    }
    println!();

    println!("3. Making inference request...");
    let result = api
        .run_inference(InferenceParams::new(
            "Explain machine learning in one sentence.",
        ))
        .await?;
    println!("   Model: {}", result.model);
    println!("   Response: {}", result.output);
    println!("   Tokens used: {}\n", result.usage.total_tokens);

    println!("4. Chat completion...");
    let chat = api
        .chat_completion(
            ChatParams::new(vec![Message::user("What is quantum computing?")])
                .with_max_tokens(100),
        )
        .await?;
    let content = chat.content.unwrap_or_default();
    println!("   Response: {}...\n", truncate(&content, 80));

    println!("5. Orchestrated research workflow...");
    let orch = api
        .chat_completion(
            ChatParams::new(vec![Message::user(
                "Research the impact of AI on healthcare",
            )])
            .with_orchestration(Orchestration::workflow("research", 1.0)),
        )
        .await?;
    let report = orch.workflow.unwrap_or_default();
    println!(
        "   Workflow: {}",
        report.workflow_id.as_deref().unwrap_or("N/A")
    );
    match report.steps_executed {
        Some(steps) => println!("   Steps: {steps}"),
        None => println!("   Steps: N/A"),
    }
    match report.total_cost_usd {
        Some(cost) => println!("   Cost: ${cost}\n"),
        None => println!("   Cost: N/A\n"),
    }

    if let Some(path) = std::env::args().nth(1) {
        println!("6. Transcribing {path}...");
        let audio = std::fs::read(&path).with_context(|| format!("failed to read {path}"))?;
        let transcript = api.transcribe(audio, "whisper-small").await?;
        println!("   Text: {}\n", transcript.text);
    }

    println!("=== Done ===");
    Ok(())
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
