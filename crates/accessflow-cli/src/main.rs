mod commands;

use accessflow_forms::FormKind;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "accessflow")]
#[command(version, about = "AccessFlow storefront - browse, validate and check out from the terminal", long_about = None)]
struct Cli {
    /// Store configuration file
    #[arg(long, global = true, default_value = accessflow::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Catalog JSON file (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching a search and filters
    Products {
        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category to show ("All" for every category)
        #[arg(short, long, default_value = accessflow::ALL_CATEGORIES)]
        category: String,

        /// Index of the price range (see `accessflow filters`)
        #[arg(short, long, default_value = "0")]
        price_range: usize,

        /// Sort key: name-asc, name-desc, price-asc, price-desc, rating-desc
        #[arg(long, default_value = "name-asc")]
        sort: String,
    },

    /// Show one product
    Product {
        /// Product id
        id: u32,
    },

    /// List categories, price ranges and sort keys
    Filters,

    /// Validate form values against one of the built-in forms
    Validate {
        /// Form to validate: login, register, profile or checkout
        form: FormKind,

        /// Field value as NAME=VALUE (repeatable)
        #[arg(short, long = "field", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Fill a cart and run it through checkout
    Checkout {
        /// Cart item as ID or ID:QTY (repeatable)
        #[arg(short, long = "item", value_parser = commands::parse_item, required = true)]
        items: Vec<(u32, u32)>,

        /// Checkout field as NAME=VALUE (repeatable)
        #[arg(short, long = "field", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,

        /// Sign in with this email so the order is saved to the account
        #[arg(long, requires = "password")]
        email: Option<String>,

        #[arg(long, requires = "email")]
        password: Option<String>,

        /// Register a new account with this name instead of signing in
        #[arg(long, requires = "email")]
        name: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();
    let ctx = commands::Context::load(&cli.config, cli.catalog.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Products {
            search,
            category,
            price_range,
            sort,
        } => {
            commands::products::list(&ctx, &search, category, price_range, &sort)?;
        }
        Commands::Product { id } => {
            commands::products::show(&ctx, id);
        }
        Commands::Filters => {
            commands::products::filters(&ctx);
        }
        Commands::Validate { form, fields } => {
            commands::validate::execute(form, fields)?;
        }
        Commands::Checkout {
            items,
            fields,
            email,
            password,
            name,
        } => {
            let sign_in = commands::checkout::SignIn::from_args(email, password, name);
            commands::checkout::execute(&ctx, &items, fields, sign_in)?;
        }
    }

    Ok(())
}
