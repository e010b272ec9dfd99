use clap::Parser;
use ogone_cli::{app, configs, consts, logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = app::Cli::parse();
    let config = configs::Config::new_with_config_path(cli.config.clone())?;

    let _guard = logger::setup(
        &config.log,
        ogone_cli::service_name!(),
        consts::LOGGED_CRATES,
    )?;

    let output = app::run(cli.command, &config)
        .await
        .map_err(|error| format!("{error:?}"))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
