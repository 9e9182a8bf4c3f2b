use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tb_core::config::{
    InferenceSettings, Limits, SearchSettings, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_GEMINI_MODEL,
    DEFAULT_MAX_CHARS, DEFAULT_MAX_RESULTS, DEFAULT_PROMPT_CEILING, DEFAULT_WORKERS,
};
use tb_core::logging::init_logging;
use tb_core::{Settings, SummaryReport};
use tb_pipeline::Pipeline;
use tb_web::AppState;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Grounded bullet-point summaries of the web on any topic", long_about = None)]
pub struct Cli {
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,
    #[arg(long, env = "GOOGLE_CSE_ID")]
    google_cse_id: Option<String>,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
    #[arg(long, env = "TB_MODEL", default_value = "gemini", help = "Model backend to use. Available: gemini (default), dummy")]
    model: String,
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_CHARS, help = "Characters kept per article")]
    max_chars: usize,
    #[arg(long, default_value_t = DEFAULT_WORKERS, help = "Concurrent article downloads")]
    workers: usize,
    #[arg(long, default_value_t = DEFAULT_PROMPT_CEILING, help = "Characters of article text sent to the model")]
    prompt_ceiling: usize,
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,
    #[arg(long, env = "TB_LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the web interface
    Serve {
        #[arg(long, env = "TB_HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, env = "TB_PORT", default_value_t = 5000)]
        port: u16,
    },
    /// Summarize a topic once and print the summary as HTML, followed by its sources
    Summarize {
        /// The topic; several words are joined with spaces
        #[arg(required = true)]
        topic: Vec<String>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            search: SearchSettings {
                api_key: self.google_api_key.clone(),
                engine_id: self.google_cse_id.clone(),
            },
            inference: InferenceSettings {
                model: self.model.clone(),
                api_key: self.gemini_api_key.clone(),
                model_name: self.gemini_model.clone(),
            },
            limits: Limits {
                max_results: self.max_results,
                max_chars: self.max_chars,
                workers: self.workers,
                prompt_ceiling: self.prompt_ceiling,
                fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            },
        }
    }
}

fn print_report(report: &SummaryReport) {
    println!("{}", report.summary_html);
    if !report.links.is_empty() {
        println!("\nSources:");
        for link in &report.links {
            println!("  - {}", link);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let settings = cli.settings();
    debug!("Loaded settings: {:?}", settings);
    let pipeline = Pipeline::from_settings(&settings)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            tb_web::serve(addr, AppState::new(pipeline)).await?;
        }
        Commands::Summarize { topic, json } => {
            let topic = topic.join(" ");
            info!("Summarizing {:?}", topic);
            let report = pipeline.run(&topic).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}
