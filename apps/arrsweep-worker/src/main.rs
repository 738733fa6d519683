use clap::Parser;

use arrsweep_worker::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	arrsweep_worker::run(Args::parse()).await
}
