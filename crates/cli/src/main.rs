use account_models::{Account, AccountRequest, ErrorShape, HealthStatus};
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use reqwest::{Client, Response};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "account-cli")]
#[command(about = "CLI tool for the Account Service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "ACCOUNT_ENDPOINT", default_value = "http://localhost:8080")]
    endpoint: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Create {
        /// Account holder name
        name: String,
        /// Contact email
        email: String,
        /// Postal address
        address: String,
        #[command(flatten)]
        extra: ExtraFields,
    },
    /// List accounts
    List {
        /// Only accounts with exactly this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show one account
    Get {
        /// Account ID
        id: i64,
    },
    /// Change fields of an existing account
    Update {
        /// Account ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[command(flatten)]
        extra: ExtraFields,
    },
    /// Delete an account
    Delete {
        /// Account ID
        id: i64,
    },
    /// Check service health
    Health,
}

#[derive(Args)]
struct ExtraFields {
    /// Phone number
    #[arg(long)]
    phone: Option<String>,
    /// Join date (YYYY-MM-DD)
    #[arg(long)]
    date_joined: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    match cli.command {
        Commands::Create {
            name,
            email,
            address,
            extra,
        } => {
            let request = AccountRequest {
                name: Some(name),
                email: Some(email),
                address: Some(address),
                phone_number: extra.phone,
                date_joined: extra.date_joined,
            };
            create_account(&client, endpoint, &request).await?;
        }
        Commands::List { name } => {
            list_accounts(&client, endpoint, name).await?;
        }
        Commands::Get { id } => {
            let account = fetch_account(&client, endpoint, id).await?;
            print_json(&account)?;
        }
        Commands::Update {
            id,
            name,
            email,
            address,
            extra,
        } => {
            let current = fetch_account(&client, endpoint, id).await?;
            let request = AccountRequest {
                name: Some(name.unwrap_or(current.name)),
                email: Some(email.unwrap_or(current.email)),
                address: Some(address.unwrap_or(current.address)),
                phone_number: extra.phone.or(current.phone_number),
                date_joined: Some(
                    extra
                        .date_joined
                        .unwrap_or_else(|| current.date_joined.to_string()),
                ),
            };
            update_account(&client, endpoint, id, &request).await?;
        }
        Commands::Delete { id } => {
            delete_account(&client, endpoint, id).await?;
        }
        Commands::Health => {
            let response = client.get(format!("{endpoint}/health")).send().await?;
            let health: HealthStatus = ensure_success(response, "Health check").await?.json().await?;
            println!("{}", health.status);
        }
    }

    Ok(())
}

async fn create_account(client: &Client, endpoint: &str, request: &AccountRequest) -> Result<()> {
    info!("Creating account: {:?}", request.name);

    let response = client
        .post(format!("{endpoint}/accounts"))
        .json(request)
        .send()
        .await?;
    let account: Account = ensure_success(response, "Create account").await?.json().await?;
    print_json(&account)
}

async fn list_accounts(client: &Client, endpoint: &str, name: Option<String>) -> Result<()> {
    info!("Listing accounts");

    let mut request = client.get(format!("{endpoint}/accounts"));
    if let Some(name) = name {
        request = request.query(&[("name", name)]);
    }
    let accounts: Vec<Account> = ensure_success(request.send().await?, "List accounts")
        .await?
        .json()
        .await?;
    print_json(&accounts)
}

async fn fetch_account(client: &Client, endpoint: &str, id: i64) -> Result<Account> {
    let response = client
        .get(format!("{endpoint}/accounts/{id}"))
        .send()
        .await?;
    Ok(ensure_success(response, "Get account").await?.json().await?)
}

async fn update_account(
    client: &Client,
    endpoint: &str,
    id: i64,
    request: &AccountRequest,
) -> Result<()> {
    info!("Updating account: {}", id);

    let response = client
        .put(format!("{endpoint}/accounts/{id}"))
        .json(request)
        .send()
        .await?;
    let account: Account = ensure_success(response, "Update account").await?.json().await?;
    print_json(&account)
}

async fn delete_account(client: &Client, endpoint: &str, id: i64) -> Result<()> {
    info!("Deleting account: {}", id);

    let response = client
        .delete(format!("{endpoint}/accounts/{id}"))
        .send()
        .await?;
    ensure_success(response, "Delete account").await?;
    println!("Account {id} deleted");
    Ok(())
}

async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorShape>(&text)
        .map(|shape| shape.message)
        .unwrap_or(text);
    error!("{} failed: {}", action, message);
    bail!("{action} failed ({status}): {message}")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
