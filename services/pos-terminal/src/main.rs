use std::io::Write as _;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use common::config::AppConfig;
use common::telemetry::{init_telemetry, TelemetryConfig};
use domain::{Category, DeliveryStatus, DeliveryType};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::state::SessionState;

mod handlers;
mod state;

const HELP: &str = "\
Commands:
  products [category]             list cached products (bread|cake|dessert|other)
  refresh                         re-fetch the catalog from the backend
  newproduct <name> <category> <price> [stock]
  cart                            show the cart
  add <product_id>                add one unit to the cart
  qty <line> <quantity>           set a line's quantity (0 removes it)
  remove <line>                   remove a cart line
  clear                           empty the cart
  checkout <counter|delivery|pickup> [client_id]
  sales                           list sales
  sale <id>                       show a sale with its items
  clients                         list clients
  newclient <name> [phone] [email]
  deliveries [status]             list deliveries (pending|en_route|delivered|cancelled)
  newdelivery <sale_id> <address...>
  status <delivery_id> <status>   update a delivery's status
  help                            show this help
  quit                            exit";

fn parse_arg<T: FromStr>(args: &[&str], index: usize, name: &str) -> Result<T> {
    args.get(index)
        .ok_or_else(|| anyhow!("Missing argument: {}", name))?
        .parse()
        .map_err(|_| anyhow!("Invalid {}: {}", name, args[index]))
}

/// Dispatch one terminal command. `Ok(None)` means quit.
async fn run_command(state: &SessionState, line: &str) -> Result<Option<String>> {
    let mut parts = line.split_whitespace();
    let command = match parts.next() {
        Some(command) => command,
        None => return Ok(Some(String::new())),
    };
    let args: Vec<&str> = parts.collect();

    let output = match command {
        "help" => HELP.to_string(),
        "quit" | "exit" => return Ok(None),

        "products" => {
            let filter = match args.first() {
                Some(s) => {
                    Some(Category::parse(s).ok_or_else(|| anyhow!("Unknown category: {}", s))?)
                }
                None => None,
            };
            handlers::catalog::list_products(state, filter)?
        }
        "refresh" => handlers::catalog::refresh(state).await?,
        "newproduct" => {
            let name: String = parse_arg(&args, 0, "name")?;
            let category = Category::parse(args.get(1).copied().unwrap_or_default())
                .ok_or_else(|| anyhow!("Unknown category"))?;
            let price: f64 = parse_arg(&args, 2, "price")?;
            let stock: u32 = args.get(3).map_or(Ok(0), |s| {
                s.parse().map_err(|_| anyhow!("Invalid stock: {}", s))
            })?;
            handlers::catalog::create_product(state, name, category, price, stock).await?
        }

        "cart" => handlers::cart::show(state)?,
        "add" => handlers::cart::add_to_cart(state, parse_arg(&args, 0, "product id")?)?,
        "qty" => handlers::cart::set_quantity(
            state,
            parse_arg(&args, 0, "line index")?,
            parse_arg(&args, 1, "quantity")?,
        )?,
        "remove" => handlers::cart::remove_line(state, parse_arg(&args, 0, "line index")?)?,
        "clear" => handlers::cart::clear(state)?,

        "checkout" => {
            let delivery_type = DeliveryType::parse(args.first().copied().unwrap_or_default())
                .ok_or_else(|| anyhow!("Delivery type must be counter, delivery or pickup"))?;
            let client_id = match args.get(1) {
                Some(s) => Some(
                    s.parse()
                        .map_err(|_| anyhow!("Invalid client id: {}", s))?,
                ),
                None => None,
            };
            handlers::sales::complete_sale(state, delivery_type, client_id).await?
        }
        "sales" => handlers::sales::list_sales(state).await?,
        "sale" => handlers::sales::show_sale(state, parse_arg(&args, 0, "sale id")?).await?,

        "clients" => handlers::clients::list_clients(state).await?,
        "newclient" => {
            let name: String = parse_arg(&args, 0, "name")?;
            let phone = args.get(1).map(|s| s.to_string());
            let email = args.get(2).map(|s| s.to_string());
            handlers::clients::create_client(state, name, phone, email).await?
        }

        "deliveries" => {
            let status = match args.first() {
                Some(s) => Some(
                    DeliveryStatus::parse(s).ok_or_else(|| anyhow!("Unknown status: {}", s))?,
                ),
                None => None,
            };
            handlers::deliveries::list_deliveries(state, status).await?
        }
        "newdelivery" => {
            let sale_id: i64 = parse_arg(&args, 0, "sale id")?;
            let address = args[1..].join(" ");
            if address.is_empty() {
                return Err(anyhow!("Missing argument: address"));
            }
            handlers::deliveries::create_delivery(state, sale_id, address).await?
        }
        "status" => handlers::deliveries::update_status(
            state,
            parse_arg(&args, 0, "delivery id")?,
            DeliveryStatus::parse(args.get(1).copied().unwrap_or_default())
                .ok_or_else(|| anyhow!("Unknown status"))?,
        )
        .await?,

        other => return Err(anyhow!("Unknown command: {} (try `help`)", other)),
    };

    Ok(Some(output))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    init_telemetry(TelemetryConfig {
        service_name: "pos-terminal".to_string(),
        log_level: config.log_level.clone(),
    })?;

    tracing::info!("Starting POS terminal...");

    let state = SessionState::new(&config)?;

    // Initial catalog load; failures are transient, the session starts anyway
    if let Err(e) = state.catalog.refresh().await {
        println!("Error: {}", e);
    }

    println!("Bakery POS. Type `help` for commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("pos> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        match run_command(&state, &line).await {
            Ok(Some(output)) => {
                if !output.is_empty() {
                    println!("{}", output);
                }
            }
            Ok(None) => break,
            // Every failure is a transient message; the session stays up
            Err(e) => println!("Error: {}", e),
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
