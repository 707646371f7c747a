//! CLI command implementations
//!
//! Each command is a thin call into [`AdminClient`]; everything it prints
//! comes from the typed results.

use std::fs;
use std::path::Path;

use admin::models::{ActionResponse, BlockRequest, Order, Page, StatsData, User, UserKind};
use admin::{AdminClient, AppError, AppResult, CsvExport, ReqwestTransport};
use chrono::Utc;
use serde::Serialize;

use crate::cli::{Cli, Command, ExportCommand, LoginCommand, OrderCommand, UserCommand};

type Client = AdminClient<ReqwestTransport>;

pub async fn run(client: &Client, cli: Cli) -> AppResult<()> {
    let json = cli.json;

    match cli.command {
        Command::Login(LoginCommand::SendCode { phone }) => {
            match client.send_sms_code(&phone).await? {
                Some(code) => println!("Code sent (development code: {})", code),
                None => println!("Code sent"),
            }
        }
        Command::Login(LoginCommand::Confirm { phone, code }) => {
            client.confirm_sms_code(&phone, &code).await?;
            println!("Signed in");
        }
        Command::Logout => {
            client.logout();
            println!("Signed out");
        }
        Command::Session => {
            if client.validate_session().await? {
                println!("Session is valid");
            } else {
                println!("Not signed in");
            }
        }
        Command::Clients(command) => user_command(client, UserKind::Client, command, json).await?,
        Command::Drivers(command) => user_command(client, UserKind::Driver, command, json).await?,
        Command::Orders(OrderCommand::List(filter)) => {
            let page = client.get_orders(&filter.into()).await?;
            print_orders(&page, json)?;
        }
        Command::Orders(OrderCommand::Show { id }) => {
            let order = client.get_order(&id.into()).await?;
            print_json(&order)?;
        }
        Command::Block(args) => {
            let request = BlockRequest::for_duration(
                args.user_id.as_str(),
                args.reason.as_str(),
                &args.duration(),
                Utc::now(),
            )?;
            let ack = client.block_user(&request).await?;
            print_action(&ack, "User blocked");
        }
        Command::Unblock { user_id } => {
            let ack = client.unblock_user(&user_id.into()).await?;
            print_action(&ack, "User unblocked");
        }
        Command::CheckUnblock => {
            let ack = client.check_unblock().await?;
            print_action(&ack, "Expired blocks released");
        }
        Command::Stats => {
            let stats = client.get_stats().await;
            print_stats(&stats, json)?;
        }
        Command::Export(command) => {
            let (export, dir) = match command {
                ExportCommand::Clients { filter, out } => (
                    client.export_users(UserKind::Client, &filter.into()).await?,
                    out.dir,
                ),
                ExportCommand::Drivers { filter, out } => (
                    client.export_users(UserKind::Driver, &filter.into()).await?,
                    out.dir,
                ),
                ExportCommand::Orders { filter, out } => {
                    (client.export_orders(&filter.into()).await?, out.dir)
                }
            };
            match export {
                Some(export) => {
                    let path = write_export(&export, &dir)?;
                    println!("Wrote {} rows to {}", export.rows, path);
                }
                None => println!("Nothing to export"),
            }
        }
    }

    Ok(())
}

async fn user_command(
    client: &Client,
    kind: UserKind,
    command: UserCommand,
    json: bool,
) -> AppResult<()> {
    match command {
        UserCommand::List(filter) => {
            let page = client.get_users(kind, &filter.into()).await?;
            print_users(&page, json)?;
        }
        UserCommand::Show { id } => {
            let user = client.get_user(kind, &id.into()).await?;
            print_json(&user)?;
        }
        UserCommand::Orders { id, filter } => {
            let page = client
                .get_user_orders(&id.into(), kind, &filter.into())
                .await?;
            print_orders(&page, json)?;
        }
    }
    Ok(())
}

/// Write `export` into `dir`, returning the written path
fn write_export(export: &CsvExport, dir: &Path) -> AppResult<String> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&export.filename);
    fs::write(&path, &export.content)?;
    tracing::info!(path = %path.display(), rows = export.rows, "Export written");
    Ok(path.display().to_string())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn total_line<T>(page: &Page<T>) -> String {
    if page.total_known {
        format!("{} of {}", page.len(), page.total)
    } else {
        format!("{} (total unknown)", page.len())
    }
}

fn print_users(page: &Page<User>, json: bool) -> AppResult<()> {
    if json {
        return print_json(page);
    }
    let now = Utc::now();
    for user in &page.data {
        let status = if user.is_blocked_at(now) {
            "blocked"
        } else {
            "active"
        };
        println!("{}  {}  {}  {}", user.id, user.phone, user.full_name(), status);
    }
    println!("{}", total_line(page));
    Ok(())
}

fn print_orders(page: &Page<Order>, json: bool) -> AppResult<()> {
    if json {
        return print_json(page);
    }
    for order in &page.data {
        println!(
            "{}  {}  {}  {} -> {}  {}",
            order.id,
            order.order_type.label(),
            order.order_status.label(),
            order.from,
            order.to,
            order.price
        );
    }
    println!("{}", total_line(page));
    Ok(())
}

fn print_stats(stats: &StatsData, json: bool) -> AppResult<()> {
    if json {
        return print_json(stats);
    }
    println!("Clients:          {}", stats.total_users);
    println!("Drivers:          {}", stats.total_drivers);
    println!("Orders:           {}", stats.total_orders);
    println!("  active:         {}", stats.active_orders);
    println!("  completed:      {}", stats.completed_orders);
    println!("  rejected:       {}", stats.rejected_orders);
    println!("  today:          {}", stats.today_orders);
    println!("Revenue:          {:.2}", stats.revenue);
    Ok(())
}

fn print_action(ack: &ActionResponse, fallback: &str) {
    if ack.message.is_empty() {
        println!("{}", fallback);
    } else {
        println!("{}", ack.message);
    }
}

/// Print an error and its suggested next step
pub fn report(error: &AppError) {
    eprintln!("Error: {}", error.message());
    if let Some(action) = error.action() {
        eprintln!("  -> {}", action);
    }
}
