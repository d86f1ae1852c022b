use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tattva::core::catalog::{Category, CategoryFilter, DEFAULT_IMAGE, StoreItem};
use tattva::core::log::init_logging;
use tattva::core::order::OrderStatus;
use tattva::core::shop::new_product_id;
use tattva::{AppCommand, SignalOverrides};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// IANA time zone used to pick the display currency, e.g. Europe/Paris
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Locale used to pick and format the display currency, e.g. fr-FR
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the display currency and how it was chosen
    Currency,
    /// List supported currencies and their rates
    Rates {
        /// Amount in INR to show in every currency
        #[arg(long, default_value_t = 1000.0)]
        sample: f64,
    },
    /// Convert INR amounts to the display currency
    Price {
        #[arg(required = true)]
        amounts: Vec<f64>,
    },
    /// Browse products
    Catalog {
        /// all, handmade or homemade
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// Text to look for in product names and descriptions
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Pay for the cart and place an order
    Checkout {
        /// Name the order is placed under
        #[arg(long, default_value = "Guest Customer")]
        name: String,
    },
    /// Print the cart as an order message with a chat link
    Whatsapp,
    /// Store administration
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Suggest blog post ideas for a topic
    Ideas { topic: String },
    /// Draft a course outline
    Outline { course_name: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Revenue, inventory and recent orders
    Dashboard,
    /// List orders
    Orders,
    /// Add a product, or replace the one with the same id
    Product {
        /// Generated when omitted
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        /// Price in INR
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        long_description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Category,
        #[arg(long, default_value_t = 0)]
        stock: u32,
    },
    /// Delete a product
    RemoveProduct { id: String },
    /// Change an order's status
    Status { id: String, status: OrderStatus },
    /// Set the number that receives order messages
    Whatsapp { number: String },
}

impl From<CartAction> for AppCommand {
    fn from(action: CartAction) -> AppCommand {
        match action {
            CartAction::Show => AppCommand::CartShow,
            CartAction::Add { id, quantity } => AppCommand::CartAdd { id, quantity },
            CartAction::Remove { id } => AppCommand::CartRemove { id },
            CartAction::Clear => AppCommand::CartClear,
        }
    }
}

impl From<AdminAction> for AppCommand {
    fn from(action: AdminAction) -> AppCommand {
        match action {
            AdminAction::Dashboard => AppCommand::Dashboard,
            AdminAction::Orders => AppCommand::Orders,
            AdminAction::Product {
                id,
                name,
                price,
                description,
                long_description,
                image,
                category,
                stock,
            } => AppCommand::ProductUpsert(StoreItem {
                id: id.unwrap_or_else(new_product_id),
                name,
                price,
                description,
                long_description,
                image: image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
                category,
                stock,
            }),
            AdminAction::RemoveProduct { id } => AppCommand::ProductRemove { id },
            AdminAction::Status { id, status } => AppCommand::OrderStatus { id, status },
            AdminAction::Whatsapp { number } => AppCommand::SetWhatsApp { number },
        }
    }
}

impl From<Commands> for AppCommand {
    fn from(cmd: Commands) -> AppCommand {
        match cmd {
            Commands::Currency => AppCommand::Currency,
            Commands::Rates { sample } => AppCommand::Rates { sample },
            Commands::Price { amounts } => AppCommand::Price { amounts },
            Commands::Catalog { category, search } => AppCommand::Catalog {
                filter: category,
                search,
            },
            Commands::Cart { action } => action.unwrap_or(CartAction::Show).into(),
            Commands::Checkout { name } => AppCommand::Checkout {
                customer_name: name,
            },
            Commands::Whatsapp => AppCommand::WhatsApp,
            Commands::Admin { action } => action.into(),
            Commands::Ideas { topic } => AppCommand::Ideas { topic },
            Commands::Outline { course_name } => AppCommand::Outline { course_name },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let overrides = SignalOverrides {
        timezone: cli.timezone,
        locale: cli.locale,
    };
    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => tattva::cli::setup::setup_at_path(path),
            None => tattva::cli::setup::setup(),
        },
        Some(cmd) => tattva::run_command(cmd.into(), cli.config_path.as_deref(), &overrides).await,
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
