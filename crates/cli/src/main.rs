//! EKETAR CLI - Drive the cart store from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two medium home jerseys with a name and number
//! eketar add --id 1 --name "Home Jersey" --price "₦25,000" --size M -q 2 \
//!     --custom-name ADE --custom-number 9
//!
//! # Change the quantity (0 removes the row)
//! eketar update --id 1 --size M -q 3
//!
//! # Show the cart and badge count
//! eketar show
//! eketar count
//! ```
//!
//! # Commands
//!
//! - `add` - Add a product (same validation as the product page)
//! - `remove` - Remove a product/size row
//! - `update` - Set a row's quantity
//! - `clear` - Empty the cart
//! - `show` - List the cart
//! - `count` - Print the badge count

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use eketar_core::binding::ProductSelection;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "eketar")]
#[command(author, version, about = "EKETAR cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: Option<String>,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Price as displayed (e.g. "₦25,000")
        #[arg(short, long)]
        price: String,

        /// Size label
        #[arg(short, long)]
        size: Option<String>,

        /// Quantity
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,

        /// Name to print on the item
        #[arg(long)]
        custom_name: Option<String>,

        /// Number to print on the item
        #[arg(long)]
        custom_number: Option<String>,
    },
    /// Remove a product/size row
    Remove {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Size label
        #[arg(short, long)]
        size: String,
    },
    /// Set a row's quantity (0 or less removes it)
    Update {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Size label
        #[arg(short, long)]
        size: String,

        /// New quantity
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// List the cart
    Show,
    /// Print the cart badge count
    Count,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "eketar=info,eketar_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;
    execute(&config, cli.command)
}

fn execute(config: &CliConfig, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Add {
            id,
            name,
            price,
            size,
            quantity,
            custom_name,
            custom_number,
        } => {
            let selection = ProductSelection {
                product_id: id,
                name,
                price_text: price,
                size,
                quantity,
                custom_name,
                custom_number,
            };
            commands::cart::add(config, selection)?;
        }
        Commands::Remove { id, size } => commands::cart::remove(config, &id, &size),
        Commands::Update { id, size, quantity } => {
            commands::cart::update(config, &id, &size, quantity);
        }
        Commands::Clear => commands::cart::clear(config),
        Commands::Show => commands::cart::show(config),
        Commands::Count => commands::cart::count(config),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;
    use eketar_core::CartConfig;
    use eketar_core::binding::SelectionError;

    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_accepts_negative_quantity() {
        let cli = Cli::try_parse_from(["eketar", "update", "--id", "1", "-s", "M", "-q", "-2"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Update { quantity: -2, .. })
        ));
    }

    #[test]
    fn test_add_without_size_parses() {
        // Size is validated by the product selection, not by clap.
        let cli = Cli::try_parse_from(["eketar", "add", "--id", "1", "-n", "Scarf", "-p", "5000"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Add { size: None, .. })
        ));
    }

    #[test]
    fn test_execute_add_without_size_fails() {
        let dir = std::env::temp_dir().join(format!("eketar-cli-main-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = CliConfig {
            storage_path: dir.join("storage.json"),
            cart: CartConfig::default(),
        };

        let err = execute(
            &config,
            parse(&["eketar", "add", "--id", "1", "-n", "Scarf", "-p", "5000"]),
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<SelectionError>(),
            Some(&SelectionError::MissingSize)
        );

        execute(
            &config,
            parse(&["eketar", "add", "--id", "1", "-n", "Scarf", "-p", "5000", "-s", "One Size"]),
        )
        .unwrap();
        execute(&config, parse(&["eketar", "count"])).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
