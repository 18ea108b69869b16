use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr, bail};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use emojibox::application::{EmojiPipeline, LoginRequest, SyncReport};
use emojibox::domain::errors::PipelineError;
use emojibox::domain::ports::{EmojiCachePort, ImageNormalizerPort, NormalizeReport};
use emojibox::infrastructure::{
    AppConfig, CliArgs, Command, DiscordClient, DiskEmojiCache, GifsicleResizer, ImageNormalizer,
    StorageManager,
};

const PASSWORD_ENV: &str = "EMOJIBOX_PASSWORD";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

/// Cancels `token` on Ctrl+C or SIGTERM.
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("Interrupted, cancelling");
    token.cancel();
}

fn print_normalize_report(report: &NormalizeReport) {
    println!(
        "static: {} resized, {} unchanged, {} failed",
        report.static_images.resized.len(),
        report.static_images.unchanged,
        report.static_images.failures.len()
    );
    for (path, error) in &report.static_images.failures {
        println!("  {}: {error}", path.display());
    }

    println!(
        "animated: {} resized, {} unchanged, {} failed",
        report.animated.submitted.len(),
        report.animated.unchanged,
        report.animated.failures.len()
    );
    for (path, error) in &report.animated.failures {
        println!("  {}: {error}", path.display());
    }
    if let Some(error) = &report.animated.batch_error {
        println!("  batch: {error}");
    }
}

fn print_sync_report(report: &SyncReport) {
    for community in &report.communities {
        println!("{} ({} emoji)", community.name(), community.emoji().len());
    }
    println!(
        "{} emoji: {} downloaded, {} already cached, {} failed",
        report.emoji_count(),
        report.downloaded,
        report.already_cached,
        report.failed.len()
    );
    for failure in &report.failed {
        println!("  {}: {}", failure.emoji.shortcode(), failure.error);
    }
    print_normalize_report(&report.normalize);
}

fn explain(error: PipelineError) -> Report {
    if error.is_network_error() {
        Report::new(error).wrap_err("Could not reach the server, check api_base_url in config.toml")
    } else {
        Report::new(error)
    }
}

async fn sync(
    pipeline: &mut EmojiPipeline,
    token: Option<String>,
    email: Option<String>,
) -> Result<SyncReport> {
    if let Some(token) = token {
        let token = Zeroizing::new(token);
        pipeline.login_with_token(&token)?;
        return pipeline.load_session().await.map_err(explain);
    }

    let Some(email) = email else {
        bail!("pass --token or --email (with {} set)", PASSWORD_ENV);
    };
    let password = Zeroizing::new(
        std::env::var(PASSWORD_ENV).wrap_err_with(|| format!("{PASSWORD_ENV} is not set"))?,
    );

    let request = LoginRequest::new(email, password.as_str());
    pipeline.run(&request).await.map_err(explain)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = emojibox::VERSION, "Starting emojibox");

    let client = Arc::new(DiscordClient::with_endpoints(
        config.api_base_url.as_str(),
        config.cdn_base_url.as_str(),
        config.request_timeout(),
    )?);
    let cache = Arc::new(DiskEmojiCache::new(config.effective_cache_dir()).await?);
    let resizer = Arc::new(GifsicleResizer::new(
        config.normalizer.gifsicle_program.clone(),
        config.normalizer.resize_timeout(),
    ));
    let normalizer = Arc::new(ImageNormalizer::new(
        config.normalizer.max_dimension,
        resizer,
    ));

    let mut pipeline = EmojiPipeline::new(
        client.clone(),
        client,
        cache.clone(),
        normalizer.clone(),
    );
    tokio::spawn(cancel_on_signal(pipeline.cancellation_token()));

    match args.command {
        Command::Sync { token, email } => {
            let report = sync(&mut pipeline, token, email).await?;
            print_sync_report(&report);
        }
        Command::Add { id, animated } => {
            let result = pipeline.add_manual_emoji(&id, animated).await?;
            println!(
                "{} -> {} ({:?}, {:?})",
                result.emoji.shortcode(),
                result.path.display(),
                result.fetch,
                result.normalize
            );
        }
        Command::Resize => {
            let report = normalizer.normalize_dir(cache.root()).await?;
            print_normalize_report(&report);
        }
        Command::List => {
            for entry in cache.entries().await? {
                println!("{}\t{}\t{}", entry.id, entry.format, entry.path.display());
            }
        }
    }

    Ok(())
}
