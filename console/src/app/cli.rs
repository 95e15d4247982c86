//! Command surface: the console's route table.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Args, Parser, Subcommand};

/// `console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "console",
    about = "Back-office console for the store backend",
    version
)]
pub struct Cli {
    /// Backend base URL override.
    #[arg(long, value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Session directory override.
    #[arg(long, value_name = "path", global = true)]
    pub session_dir: Option<PathBuf>,
    /// Request timeout override in seconds.
    #[arg(long, value_name = "secs", global = true)]
    pub timeout_secs: Option<u64>,
    /// Answer yes to every confirmation prompt.
    #[arg(long, global = true)]
    pub yes: bool,
    /// Screen to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level screens.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and persist the session.
    Login {
        /// Sign-in email.
        #[arg(long)]
        email: String,
        /// Credential; falls back to the CONSOLE_CLAVE environment variable.
        #[arg(long)]
        clave: Option<String>,
    },
    /// Sign out and clear the persisted session.
    Logout,
    /// Show the current session.
    Whoami,
    /// Product screens.
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Customer screens.
    #[command(subcommand)]
    Customers(CustomersCommand),
    /// Catalog screens.
    #[command(subcommand)]
    Catalogs(CatalogsCommand),
    /// Order screens.
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// User administration (administrators only).
    #[command(subcommand)]
    Users(UsersCommand),
    /// Sales reports (administrators only).
    #[command(subcommand)]
    Reports(ReportsCommand),
}

/// One `product:quantity` selection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineArg {
    /// Product identifier.
    pub product_id: u64,
    /// Requested units.
    pub quantity: u32,
}

impl FromStr for LineArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (product, quantity) = raw
            .split_once(':')
            .or_else(|| raw.split_once('x'))
            .ok_or_else(|| format!("expected PRODUCT:QTY, got `{raw}`"))?;
        let product_id = product
            .trim()
            .parse::<u64>()
            .map_err(|err| format!("product id in `{raw}` is not a number: {err}"))?;
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|err| format!("quantity in `{raw}` is not a number: {err}"))?;
        if quantity == 0 {
            return Err(format!("quantity in `{raw}` must be at least 1"));
        }
        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// Product screens.
#[derive(Debug, Clone, Subcommand)]
pub enum ProductsCommand {
    /// List every product.
    List,
    /// Show one product.
    Show {
        /// Product identifier.
        id: u64,
    },
    /// Create a product.
    Add(ProductFields),
    /// Update a product; omitted fields keep their stored values.
    Edit {
        /// Product identifier.
        id: u64,
        #[command(flatten)]
        fields: ProductPatch,
    },
    /// Delete a product (guarded against order references).
    Rm {
        /// Product identifier.
        id: u64,
    },
}

/// Fields of the product form.
#[derive(Debug, Clone, Args)]
pub struct ProductFields {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Description.
    #[arg(long)]
    pub description: String,
    /// Unit price.
    #[arg(long)]
    pub price: f64,
    /// Declared stock.
    #[arg(long)]
    pub availability: u32,
    /// Owning catalog id.
    #[arg(long)]
    pub catalog: u64,
    /// Image URL; defaults to the store placeholder when omitted.
    #[arg(long)]
    pub url: Option<String>,
}

/// Partial product form for edits.
#[derive(Debug, Clone, Args)]
pub struct ProductPatch {
    /// Display name.
    #[arg(long)]
    pub name: Option<String>,
    /// Description.
    #[arg(long)]
    pub description: Option<String>,
    /// Unit price.
    #[arg(long)]
    pub price: Option<f64>,
    /// Declared stock.
    #[arg(long)]
    pub availability: Option<u32>,
    /// Owning catalog id.
    #[arg(long)]
    pub catalog: Option<u64>,
    /// Image URL.
    #[arg(long)]
    pub url: Option<String>,
}

/// Customer screens.
#[derive(Debug, Clone, Subcommand)]
pub enum CustomersCommand {
    /// List every customer.
    List,
    /// Show one customer.
    Show {
        /// Customer identifier.
        id: u64,
    },
    /// Create a customer.
    Add(CustomerFields),
    /// Update a customer; omitted fields keep their stored values.
    Edit {
        /// Customer identifier.
        id: u64,
        #[command(flatten)]
        fields: CustomerPatch,
    },
    /// Delete a customer (guarded against order references).
    Rm {
        /// Customer identifier.
        id: u64,
    },
}

/// Fields of the customer form.
#[derive(Debug, Clone, Args)]
pub struct CustomerFields {
    /// Full name.
    #[arg(long)]
    pub name: String,
    /// Contact email.
    #[arg(long)]
    pub email: String,
    /// Contact phone (at most nine digits).
    #[arg(long)]
    pub phone: String,
    /// Postal address.
    #[arg(long)]
    pub address: String,
    /// Image URL.
    #[arg(long)]
    pub url: Option<String>,
}

/// Partial customer form for edits.
#[derive(Debug, Clone, Args)]
pub struct CustomerPatch {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,
    /// Contact phone (at most nine digits).
    #[arg(long)]
    pub phone: Option<String>,
    /// Postal address.
    #[arg(long)]
    pub address: Option<String>,
    /// Image URL.
    #[arg(long)]
    pub url: Option<String>,
}

/// Catalog screens.
#[derive(Debug, Clone, Subcommand)]
pub enum CatalogsCommand {
    /// List every catalog.
    List,
    /// Create a catalog (name must be unique, checked client-side).
    Add {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Description.
        #[arg(long)]
        description: String,
        /// Image URL.
        #[arg(long)]
        url: Option<String>,
    },
    /// Update a catalog; omitted fields keep their stored values.
    Edit {
        /// Catalog identifier.
        id: u64,
        /// Display name.
        #[arg(long)]
        name: Option<String>,
        /// Description.
        #[arg(long)]
        description: Option<String>,
        /// Image URL.
        #[arg(long)]
        url: Option<String>,
    },
    /// Delete a catalog (guarded against owned products).
    Rm {
        /// Catalog identifier.
        id: u64,
    },
}

/// Order screens.
#[derive(Debug, Clone, Subcommand)]
pub enum OrdersCommand {
    /// List every order.
    List,
    /// Show one order with its lines.
    Show {
        /// Order identifier.
        id: u64,
    },
    /// Compose and submit a new order.
    Add {
        /// Customer the order is for.
        #[arg(long)]
        customer: u64,
        /// Selection entries as PRODUCT:QTY; repeatable.
        #[arg(long = "line", value_name = "PRODUCT:QTY", required = true)]
        lines: Vec<LineArg>,
        /// Free-text notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Replace an order's lines (full replace, not a diff).
    Edit {
        /// Order identifier.
        id: u64,
        /// New selection as PRODUCT:QTY; omitting keeps the stored lines.
        #[arg(long = "line", value_name = "PRODUCT:QTY")]
        lines: Vec<LineArg>,
        /// Replace the free-text notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Flip an order's completion flag.
    Status {
        /// Order identifier.
        id: u64,
        /// New completion value.
        #[arg(long, action = ArgAction::Set, value_name = "bool")]
        completed: bool,
    },
    /// Delete an order and its lines.
    Rm {
        /// Order identifier.
        id: u64,
    },
}

/// User-administration screens.
#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    /// List every account.
    List,
    /// Create an account.
    Add {
        /// Login name.
        #[arg(long)]
        username: String,
        /// Contact email.
        #[arg(long)]
        email: String,
        /// Credential; falls back to the CONSOLE_CLAVE environment variable.
        #[arg(long)]
        clave: Option<String>,
        /// Grant the administrator role.
        #[arg(long)]
        admin: bool,
    },
    /// Update an account (credential required again; it is write-only).
    Edit {
        /// Account identifier.
        id: u64,
        /// Login name.
        #[arg(long)]
        username: String,
        /// Contact email.
        #[arg(long)]
        email: String,
        /// Credential; falls back to the CONSOLE_CLAVE environment variable.
        #[arg(long)]
        clave: Option<String>,
        /// Grant the administrator role.
        #[arg(long)]
        admin: bool,
        /// Keep the account enabled.
        #[arg(long, action = ArgAction::Set, value_name = "bool", default_value_t = true)]
        active: bool,
    },
    /// Delete an account.
    Rm {
        /// Account identifier.
        id: u64,
    },
    /// Allow an account to sign in again.
    Enable {
        /// Account identifier.
        id: u64,
    },
    /// Bar an account from signing in.
    Disable {
        /// Account identifier.
        id: u64,
    },
}

/// Report screens.
#[derive(Debug, Clone, Subcommand)]
pub enum ReportsCommand {
    /// Sales summary over a date range (defaults to the last seven days).
    Sales {
        /// First day included, YYYY-MM-DD.
        #[arg(long, value_name = "date")]
        from: Option<String>,
        /// Last day included, YYYY-MM-DD.
        #[arg(long, value_name = "date")]
        to: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn the_command_surface_is_internally_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("3:2", 3, 2)]
    #[case("3x2", 3, 2)]
    #[case(" 10 : 1 ", 10, 1)]
    fn line_args_parse_both_separators(
        #[case] raw: &str,
        #[case] product_id: u64,
        #[case] quantity: u32,
    ) {
        let parsed: LineArg = raw.trim().parse().expect("line parses");
        assert_eq!(
            parsed,
            LineArg {
                product_id,
                quantity
            }
        );
    }

    #[rstest]
    #[case("3")]
    #[case("a:2")]
    #[case("3:zero")]
    #[case("3:0")]
    fn bad_line_args_are_rejected(#[case] raw: &str) {
        assert!(raw.parse::<LineArg>().is_err());
    }

    #[rstest]
    fn orders_add_parses_repeated_lines() {
        let cli = Cli::try_parse_from([
            "console", "orders", "add", "--customer", "7", "--line", "3:2", "--line", "4:1",
        ])
        .expect("valid invocation");
        let Command::Orders(OrdersCommand::Add {
            customer, lines, ..
        }) = cli.command
        else {
            panic!("expected orders add");
        };
        assert_eq!(customer, 7);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, 3);
        assert_eq!(lines[1].quantity, 1);
    }
}
