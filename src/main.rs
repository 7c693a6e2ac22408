use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use moneta::core::holdings::Holdings;
use moneta::core::log::init_logging;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct HoldingsArgs {
    /// Bitcoin quantity held
    #[arg(long, default_value_t = 0.0)]
    bitcoin: f64,

    /// US dollars held
    #[arg(long, default_value_t = 0.0)]
    dollars: f64,
}

impl From<HoldingsArgs> for Holdings {
    fn from(args: HoldingsArgs) -> Holdings {
        Holdings {
            bitcoin: args.bitcoin,
            dollars: args.dollars,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record a transaction (negative amount = expense)
    Add {
        description: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// List transactions
    List {
        /// Filter by description or amount
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Replace a transaction's description and amount
    Edit {
        id: String,
        description: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Delete a transaction
    Rm { id: String },
    /// Manage classifier categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Display balance, recent transactions, and holdings
    Dashboard {
        #[command(flatten)]
        holdings: HoldingsArgs,
    },
    /// Generate a financial advice report
    Advise {
        #[command(flatten)]
        holdings: HoldingsArgs,
    },
    /// Export transactions to CSV
    Export {
        /// Output file path
        out: PathBuf,
    },
    /// Refresh prices every 5 minutes until interrupted
    Watch {
        #[command(flatten)]
        holdings: HoldingsArgs,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category with keyword mappings
    Add {
        name: String,
        /// Keywords matched against transaction descriptions
        keywords: Vec<String>,
    },
    /// List categories
    List,
    /// Remove a category
    Rm { id: String },
}

impl From<Commands> for moneta::AppCommand {
    fn from(cmd: Commands) -> moneta::AppCommand {
        match cmd {
            Commands::Add {
                description,
                amount,
            } => moneta::AppCommand::Add {
                description,
                amount,
            },
            Commands::List { search } => moneta::AppCommand::List { search },
            Commands::Edit {
                id,
                description,
                amount,
            } => moneta::AppCommand::Edit {
                id,
                description,
                amount,
            },
            Commands::Rm { id } => moneta::AppCommand::Remove { id },
            Commands::Category { action } => match action {
                CategoryAction::Add { name, keywords } => {
                    moneta::AppCommand::CategoryAdd { name, keywords }
                }
                CategoryAction::List => moneta::AppCommand::CategoryList,
                CategoryAction::Rm { id } => moneta::AppCommand::CategoryRemove { id },
            },
            Commands::Dashboard { holdings } => moneta::AppCommand::Dashboard {
                holdings: holdings.into(),
            },
            Commands::Advise { holdings } => moneta::AppCommand::Advise {
                holdings: holdings.into(),
            },
            Commands::Export { out } => moneta::AppCommand::Export { out },
            Commands::Watch { holdings } => moneta::AppCommand::Watch {
                holdings: holdings.into(),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => moneta::cli::setup::setup(),
        Some(cmd) => moneta::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
