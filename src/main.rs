//! CLI: turn a webpage into a shared presentation.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

use webpage_presenter::auth::PasswordAuthenticator;
use webpage_presenter::firecrawl::FirecrawlClient;
use webpage_presenter::gemini::{GeminiClient, TextGenerator};
use webpage_presenter::{AlaiClient, Config, Pipeline, PlannerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Planner {
    /// Title slide and main points from the extracted content
    Content,
    /// Layouts chosen by the language model
    Llm,
}

impl From<Planner> for PlannerKind {
    fn from(planner: Planner) -> Self {
        match planner {
            Planner::Content => PlannerKind::Content,
            Planner::Llm => PlannerKind::LanguageModel,
        }
    }
}

/// Create a presentation from the content of a webpage.
#[derive(Parser, Debug)]
#[command(name = "webpage-presenter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the webpage to present
    url: String,

    /// How slides are planned
    #[arg(short, long, value_enum, default_value_t = Planner::Content)]
    planner: Planner,

    /// Write the planned slides as JSON to this file before building them
    #[arg(long)]
    dump_plan: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let planner = PlannerKind::from(args.planner);

    let http = reqwest::Client::new();
    let gemini = match planner {
        PlannerKind::LanguageModel => Some(GeminiClient::new(&config, http.clone())?),
        PlannerKind::Content => None,
    };
    let scraper = FirecrawlClient::new(&config, http.clone());
    let authenticator = PasswordAuthenticator::new(&config, http.clone());
    let service = AlaiClient::new(&config, http);

    let pipeline = Pipeline {
        scraper: &scraper,
        generator: gemini.as_ref().map(|g| g as &dyn TextGenerator),
        authenticator: &authenticator,
        service: &service,
    };

    let plan = pipeline
        .plan(&args.url, planner)
        .await
        .context("Failed to plan slides")?;
    if let Some(path) = &args.dump_plan {
        fs::write(path, serde_json::to_string_pretty(&plan.slides)?)
            .with_context(|| format!("Unable to write plan to {}", path.display()))?;
        log::info!("Slide plan written to {}", path.display());
    }

    let published = pipeline
        .publish(&plan)
        .await
        .context("Failed to create presentation")?;

    println!("Presentation created successfully!");
    println!("Shareable link: {}", published.share_url);
    Ok(())
}
