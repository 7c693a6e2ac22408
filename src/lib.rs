pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use anyhow::Result;
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::holdings::Holdings;
use crate::providers::{CoinGeckoProvider, ExchangeRateProvider};
use crate::store::RestStore;

pub enum AppCommand {
    Add {
        description: String,
        amount: Decimal,
    },
    List {
        search: Option<String>,
    },
    Edit {
        id: String,
        description: String,
        amount: Decimal,
    },
    Remove {
        id: String,
    },
    CategoryAdd {
        name: String,
        keywords: Vec<String>,
    },
    CategoryList,
    CategoryRemove {
        id: String,
    },
    Dashboard {
        holdings: Holdings,
    },
    Advise {
        holdings: Holdings,
    },
    Export {
        out: PathBuf,
    },
    Watch {
        holdings: Holdings,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Finance Tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = RestStore::new(&config.store.base_url)?;
    let currency = config.currency.as_str();

    match command {
        AppCommand::Add {
            description,
            amount,
        } => {
            cli::transactions::add(&store, &description, amount, currency).await?;
        }
        AppCommand::List { search } => {
            cli::transactions::list(&store, search.as_deref(), currency).await?;
        }
        AppCommand::Edit {
            id,
            description,
            amount,
        } => {
            cli::transactions::edit(&store, &id, &description, amount, currency).await?;
        }
        AppCommand::Remove { id } => {
            cli::transactions::remove(&store, &id, currency).await?;
        }
        AppCommand::CategoryAdd { name, keywords } => {
            cli::category::add(&store, &name, &keywords).await?;
        }
        AppCommand::CategoryList => {
            cli::category::list(&store).await?;
        }
        AppCommand::CategoryRemove { id } => {
            cli::category::remove(&store, &id).await?;
        }
        AppCommand::Dashboard { holdings } => {
            let (crypto, fx) = build_providers(&config)?;
            cli::dashboard::run(&store, &crypto, &fx, holdings, currency).await?;
        }
        AppCommand::Advise { holdings } => {
            let (crypto, fx) = build_providers(&config)?;
            cli::advise::run(&store, &crypto, &fx, holdings, currency).await?;
        }
        AppCommand::Export { out } => {
            cli::export::run(&store, &out).await?;
        }
        AppCommand::Watch { holdings } => {
            let (crypto, fx) = build_providers(&config)?;
            cli::watch::run(&crypto, &fx, holdings, currency).await?;
        }
    }
    Ok(())
}

fn build_providers(config: &AppConfig) -> Result<(CoinGeckoProvider, ExchangeRateProvider)> {
    let crypto = CoinGeckoProvider::new(config.coingecko_base_url())?;
    let fx = ExchangeRateProvider::new(config.exchange_rate_base_url())?;
    Ok((crypto, fx))
}
