use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use sauce_resolver::adapters::{RemoteImageStash, ReqwestHttpTransport};
use sauce_resolver::core::interfaces::adapters::HttpTransport;
use sauce_resolver::global_constants;
use sauce_resolver::presentation::ReportMarkup;
use sauce_resolver::{SauceBackend, SauceError, SauceOrchestrator, SauceSettings};

#[derive(Debug, Parser)]
#[command(name = "sauce-resolver", version, about = "Find the source of an image")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "SAUCE_RESOLVER_CONFIG")]
    config: Option<PathBuf>,

    /// google (alias: images) or saucenao (alias: anime)
    #[arg(short, long, default_value = "google")]
    backend: SauceBackend,

    /// Print without <b> markup
    #[arg(long)]
    plain: bool,

    /// Local image paths or http(s) URLs
    #[arg(required = true)]
    images: Vec<String>,
}

struct SauceSession {
    orchestrator: SauceOrchestrator,
    stash: RemoteImageStash,
    backend: SauceBackend,
}

impl SauceSession {
    async fn lookup(&self, image: &str) -> Result<String, SauceError> {
        if RemoteImageStash::is_remote(image) {
            let stashed = self.stash.fetch(image).await?;
            return self.orchestrator.resolve(self.backend, stashed.path()).await;
        }
        self.orchestrator.resolve(self.backend, Path::new(image)).await
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let settings = Arc::new(SauceSettings::load(cli.config.as_deref())?);
    settings.validate_for_backend(cli.backend)?;

    let http_transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestHttpTransport::from_settings(&settings).context("Failed to create HTTP client")?,
    );
    let markup = if cli.plain {
        ReportMarkup::Plain
    } else {
        ReportMarkup::Html
    };

    let session = SauceSession {
        orchestrator: SauceOrchestrator::from_settings(Arc::clone(&http_transport), &settings, markup),
        stash: RemoteImageStash::new(http_transport),
        backend: cli.backend,
    };

    let lookups = cli.images.iter().map(|image| session.lookup(image));
    let results = futures::future::join_all(lookups).await;

    let mut all_succeeded = true;
    for (image, result) in cli.images.iter().zip(results) {
        match result {
            Ok(report) => println!("{}", report),
            Err(error) => {
                all_succeeded = false;
                log::error!("{} {}: {}", global_constants::LOG_TAG_MAIN, image, error);
                eprintln!("error: {}: {}", image, error);
            }
        }
    }

    Ok(all_succeeded)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!(
        "{} Starting {} with backend {}",
        global_constants::LOG_TAG_MAIN,
        global_constants::APPLICATION_NAME,
        cli.backend
    );

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            log::error!("{} {:#}", global_constants::LOG_TAG_MAIN, error);
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
