pub mod logging;
pub mod scheduler;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use arrsweep_service::{CycleEngine, CycleSettings, HttpProvider};
use arrsweep_storage::db::Db;

use scheduler::SchedulerState;

#[derive(Debug, Parser)]
#[command(
	version = arrsweep_cli::VERSION,
	rename_all = "kebab",
	styles = arrsweep_cli::styles(),
)]
pub struct Args {
	/// TOML config file; environment variables override its values.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = arrsweep_config::load(args.config.as_deref())?;
	let filter = logging::env_filter(&config.service.log_level);

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Db::connect(&config.storage).await?;

	db.ensure_schema().await?;

	let categories = config.categories();

	if categories.is_empty() {
		tracing::warn!("No Sonarr or Radarr instance is configured; every run will be a no-op.");
	}
	for cfg in &categories {
		tracing::info!(
			category = %cfg.category,
			url = %cfg.base_url,
			limit = cfg.limit,
			include_cutoff = cfg.include_cutoff,
			"Category enabled."
		);
	}

	tracing::info!(
		version = arrsweep_cli::VERSION,
		run_every_minutes = config.service.run_every_minutes,
		request_delay_seconds = config.service.request_delay_seconds,
		max_cycle_days = config.service.max_cycle_days,
		ledger = %config.storage.sqlite_path.display(),
		"Worker started."
	);

	let engine = CycleEngine::new(
		db.clone(),
		Arc::new(HttpProvider),
		CycleSettings::from_service(&config.service),
	);
	let state = SchedulerState { engine, categories, interval: config.service.run_every() };

	scheduler::run_scheduler(&state, shutdown_signal()).await;

	db.close().await;

	tracing::info!("Worker stopped.");

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for the shutdown signal.");

		std::future::pending::<()>().await;
	}
}
