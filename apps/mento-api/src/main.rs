use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = mento_api::Args::parse();

	mento_api::run(args).await
}
