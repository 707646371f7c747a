//! CLI argument definitions using clap

use std::path::PathBuf;
use std::str::FromStr;

use admin::models::{
    BlockDuration, DurationPreset, OrderFilter, OrderStatus, OrderType, Pagination, SortOrder,
    TimeUnit, UserFilter,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

/// Ride-hailing admin console
#[derive(Parser, Debug)]
#[command(name = "admin-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with an SMS code
    #[command(subcommand)]
    Login(LoginCommand),

    /// Sign out and forget the stored token
    Logout,

    /// Check whether the stored session is still valid
    Session,

    /// Client accounts
    #[command(subcommand)]
    Clients(UserCommand),

    /// Driver accounts
    #[command(subcommand)]
    Drivers(UserCommand),

    /// Orders
    #[command(subcommand)]
    Orders(OrderCommand),

    /// Block an account
    Block(BlockArgs),

    /// Lift a block
    Unblock { user_id: String },

    /// Release every block whose expiry has passed
    CheckUnblock,

    /// Dashboard statistics
    Stats,

    /// Write a filtered list to a CSV file
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Subcommand, Debug)]
pub enum LoginCommand {
    /// Text a sign-in code to a phone number
    SendCode {
        #[arg(long)]
        phone: String,
    },

    /// Exchange the SMS code for a session token
    Confirm {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        code: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// List accounts
    List(UserFilterArgs),

    /// Show one account
    Show { id: String },

    /// Orders of one account in this role
    Orders {
        id: String,
        #[command(flatten)]
        filter: OrderFilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// List orders
    List(OrderFilterArgs),

    /// Show one order
    Show { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    Clients {
        #[command(flatten)]
        filter: UserFilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },
    Drivers {
        #[command(flatten)]
        filter: UserFilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },
    Orders {
        #[command(flatten)]
        filter: OrderFilterArgs,
        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Directory the CSV file is written to
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// First row (inclusive)
    #[arg(long)]
    pub start: Option<u32>,
    /// Last row (exclusive)
    #[arg(long)]
    pub end: Option<u32>,
    /// Field to sort by, e.g. createdAt
    #[arg(long)]
    pub sort: Option<String>,
    /// ASC or DESC
    #[arg(long)]
    pub order: Option<SortOrder>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination {
            start: args.start,
            end: args.end,
            sort: args.sort,
            order: args.order,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct UserFilterArgs {
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// true for blocked accounts only, false for active ones only
    #[arg(long)]
    pub blocked: Option<bool>,
    #[arg(long, value_parser = OrderStatus::from_str)]
    pub order_status: Option<OrderStatus>,
    #[arg(long, value_parser = OrderType::from_str)]
    pub order_type: Option<OrderType>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<NaiveDate>,
    #[arg(long)]
    pub min_orders: Option<u32>,
    #[arg(long)]
    pub max_orders: Option<u32>,
    #[command(flatten)]
    pub page: PageArgs,
}

impl From<UserFilterArgs> for UserFilter {
    fn from(args: UserFilterArgs) -> Self {
        UserFilter {
            phone: args.phone,
            first_name: args.first_name,
            last_name: args.last_name,
            is_blocked: args.blocked,
            order_status: args.order_status,
            order_type: args.order_type,
            date_from: args.date_from,
            date_to: args.date_to,
            min_orders: args.min_orders,
            max_orders: args.max_orders,
            page: args.page.into(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OrderFilterArgs {
    #[arg(long = "type", value_parser = OrderType::from_str)]
    pub order_type: Option<OrderType>,
    #[arg(long = "status", value_parser = OrderStatus::from_str)]
    pub order_status: Option<OrderStatus>,
    #[arg(long)]
    pub client_id: Option<String>,
    #[arg(long)]
    pub driver_id: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<NaiveDate>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    #[command(flatten)]
    pub page: PageArgs,
}

impl From<OrderFilterArgs> for OrderFilter {
    fn from(args: OrderFilterArgs) -> Self {
        OrderFilter {
            order_type: args.order_type,
            order_status: args.order_status,
            client_id: args.client_id.map(Into::into),
            driver_id: args.driver_id.map(Into::into),
            date_from: args.date_from,
            date_to: args.date_to,
            min_price: args.min_price,
            max_price: args.max_price,
            page: args.page.into(),
        }
    }
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("duration")
        .required(true)
        .args(["preset", "hours", "days", "weeks", "months", "until", "permanent"]),
))]
pub struct BlockArgs {
    pub user_id: String,

    /// Why the account is blocked
    #[arg(long)]
    pub reason: String,

    /// One of 1h, 3h, 6h, 12h, 1d, 3d, 1w, 2w, 1m
    #[arg(long = "for")]
    pub preset: Option<DurationPreset>,
    #[arg(long)]
    pub hours: Option<u32>,
    #[arg(long)]
    pub days: Option<u32>,
    #[arg(long)]
    pub weeks: Option<u32>,
    /// Calendar months
    #[arg(long)]
    pub months: Option<u32>,
    /// RFC 3339 instant, e.g. 2025-01-31T18:00:00Z
    #[arg(long)]
    pub until: Option<DateTime<Utc>>,
    #[arg(long)]
    pub permanent: bool,
}

impl BlockArgs {
    /// The single duration the argument group allows
    pub fn duration(&self) -> BlockDuration {
        let custom = |amount, unit| BlockDuration::Custom { amount, unit };
        if let Some(preset) = self.preset {
            BlockDuration::Preset(preset)
        } else if let Some(n) = self.hours {
            custom(n, TimeUnit::Hours)
        } else if let Some(n) = self.days {
            custom(n, TimeUnit::Days)
        } else if let Some(n) = self.weeks {
            custom(n, TimeUnit::Weeks)
        } else if let Some(n) = self.months {
            custom(n, TimeUnit::Months)
        } else if let Some(at) = self.until {
            BlockDuration::Until(at)
        } else {
            BlockDuration::Permanent
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
