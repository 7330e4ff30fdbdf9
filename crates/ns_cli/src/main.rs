use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ns_core::{ErrorResponse, Settings, SummarizeRequest};
use ns_inference::{create_summarizer, GoogleTranslator};
use ns_scrapers::ExtractionPipeline;
use ns_web::{create_app, summarize_request, AppState};
use tracing::{info, warn};

mod logging;

const TRANSLATION_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
        if duration.is_zero() {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(duration))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize news articles into three bullet points", long_about = None)]
pub struct Cli {
    /// Summarization backend: huggingface (default), chat, extractive
    #[arg(long, global = true, default_value = "huggingface")]
    summarizer: String,
    /// Override the summarization endpoint
    #[arg(long, global = true)]
    summarizer_url: Option<String>,
    /// Model name for the chat backend
    #[arg(long, global = true)]
    model: Option<String>,
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
    /// Timeout for article fetches (e.g. 15s, 1m)
    #[arg(long, global = true, default_value = "15s")]
    fetch_timeout: HumanDuration,
    /// Words of article text sent to the summarizer
    #[arg(long, global = true, default_value_t = 900)]
    max_words: usize,
    /// Minimum words of article text required to summarize
    #[arg(long, global = true, default_value_t = 50)]
    min_words: usize,
    /// Reader proxy base URL, e.g. https://r.jina.ai/ (the article URL is
    /// appended). Off by default; when set it runs after the local strategies.
    #[arg(long, global = true)]
    reader_proxy: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
        /// Directory holding the front end, served for every GET path
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Summarize one article and print the JSON reply
    Summarize {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        text: Option<String>,
        /// Target language code, e.g. fr
        #[arg(long)]
        language: Option<String>,
        /// short, medium or long
        #[arg(long)]
        length: Option<String>,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.fetch.timeout = self.fetch_timeout.0;
        settings.max_input_words = self.max_words;
        settings.min_words = self.min_words;
        settings.reader_proxy = self.reader_proxy.clone();
        settings
    }

    fn inference_config(&self) -> ns_inference::Config {
        let api_key = match self.summarizer.to_lowercase().as_str() {
            "chat" | "openai" => self.openai_api_key.clone(),
            _ => self.hf_token.clone(),
        };
        ns_inference::Config {
            backend: self.summarizer.clone(),
            api_key,
            api_url: self.summarizer_url.clone(),
            model_name: self.model.clone(),
            ..ns_inference::Config::default()
        }
    }
}

fn build_state(cli: &Cli) -> anyhow::Result<AppState> {
    let settings = cli.settings();
    let config = cli.inference_config();

    if config.api_key.is_none() {
        match config.backend.to_lowercase().as_str() {
            "extractive" | "local" => {}
            "chat" | "openai" => warn!("OPENAI_API_KEY is not set; summarize calls will fail"),
            _ => warn!("HF_API_TOKEN is not set; summarize calls will fail"),
        }
    }

    let pipeline = ExtractionPipeline::default_chain(&settings)?;
    info!("🦗 Extraction strategies: {}", pipeline.strategy_names().join(", "));

    let summarizer = create_summarizer(&config)?;
    info!("🧠 Summarizer initialized (using {})", summarizer.name());

    let translator = GoogleTranslator::new(TRANSLATION_TIMEOUT)?;

    Ok(AppState::new(
        pipeline,
        summarizer,
        std::sync::Arc::new(translator),
        settings,
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let state = build_state(&cli)?;

    match cli.command {
        Commands::Serve { bind, static_dir } => {
            if let Some(dir) = &static_dir {
                if !dir.is_dir() {
                    warn!("Static directory {} does not exist", dir.display());
                }
            }
            let app = create_app(state, static_dir);
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!("🚀 Listening on http://{}", bind);
            axum::serve(listener, app).await?;
        }
        Commands::Summarize {
            url,
            text,
            language,
            length,
        } => {
            let request = SummarizeRequest::new(url, text, language, length.as_deref());
            let reply = match summarize_request(&state, request).await {
                Ok(summary) => serde_json::to_string_pretty(&summary)?,
                Err(e) => serde_json::to_string_pretty(&ErrorResponse::new(e.to_string()))?,
            };
            println!("{}", reply);
        }
    }

    Ok(())
}
