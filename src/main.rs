mod api;
mod catalog;
mod cli;
mod config;
mod draft;
mod macros;
mod model;

use std::{error::Error, path::PathBuf};

use catalog::Catalog;
use clap::Parser;
use log::{debug, info};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Compose and submit an order interactively")]
    #[command(long_about = None)]
    Compose(ComposeArgs),
}

#[derive(clap::Args)]
struct ComposeArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Compose(args) => {
            debug!("Подгружаем конфиг из {:?}", args.config_path);
            let cfg = config::load(args.config_path)?;

            let client = api::Client::new(&cfg)?;

            info!("Загружаем справочники из {}", cfg.api_url);
            let catalog = Catalog::load(&client)?;

            info!(
                "Клиентов: {}, товаров: {}",
                catalog.clients().len(),
                catalog.products().len()
            );

            cli::run(catalog, &client)?;
        }
    };

    Ok(())
}
