//! Docsight — summarize a PDF or DOCX document with a chat model.

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docsight_chat::{ChatClient, ChatConfig};
use docsight_cli::{menu, output, Pipeline};
use docsight_core::DocsightConfig;
use docsight_ingest::{DocumentAnalyzer, DocumentIntelligenceClient, DocumentIntelligenceConfig};

fn print_help() {
    println!("Docsight — document summaries and key points");
    println!();
    println!("Usage: docsight [path-or-url]");
    println!();
    println!("  (none)         Choose a document interactively");
    println!("  <path>         PDF/DOCX file; relative paths start in REPO_DOCS_DIR");
    println!("  <url>          http(s) link to a PDF/DOCX file (GitHub blob links work)");
    println!("  help           Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DocsightConfig::from_env(std::env::current_dir()?);
    let args: Vec<String> = std::env::args().collect();

    let target = match args.get(1).map(String::as_str) {
        Some("--help" | "-h" | "help") => {
            print_help();
            return Ok(());
        }
        Some(target) => target.to_string(),
        None => {
            info!("No path or URL given, starting interactive selection...");
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            menu::choose_document(&mut input, &mut out, &config.data_paths.docs_dir)?
        }
    };

    let analyzer = DocumentIntelligenceConfig::from_env().map(DocumentIntelligenceClient::new);
    if analyzer.is_none() {
        warn!("Document analysis service not configured; PDF files cannot be read");
    }

    let chat_config = ChatConfig::from_env();
    if chat_config.resolve_provider().is_none() {
        warn!("No chat provider configured; summaries will be empty");
    }
    let (max_tokens, temperature) = (chat_config.max_tokens, chat_config.temperature);
    let model = ChatClient::new(chat_config);

    let pipeline = Pipeline::new(
        &config,
        analyzer.as_ref().map(|a| a as &dyn DocumentAnalyzer),
        &model,
    )
    .with_limits(max_tokens, temperature);

    let result = pipeline.run(&target).await?;
    if let Some(pages) = result.document.page_count {
        info!("Document has {} pages", pages);
    }

    print!("{}", output::render(&result.insights));
    Ok(())
}
