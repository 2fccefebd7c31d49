use std::path::PathBuf;

use clap::{Parser, Subcommand};
use droplinked_state_lib::config::Settings;
use droplinked_state_lib::errors::CustomError;
use droplinked_state_lib::logs::{init_logger, CLI_TARGET};
use droplinked_state_lib::state::build_snapshot_report;
use droplinked_state_lib::types::RecordId;
use droplinked_state_lib::DroplinkedContract;
use near_client::{RpcResult, ViewClient};
use serde::Serialize;

#[derive(Parser, Debug)]
#[clap(version, about = "Reads Droplinked contract state from a NEAR RPC node")]
struct Cli {
    /// JSON settings file; defaults and DROPLINKED__* variables apply without it
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Holdings, requests and approvals of the producer, publisher and customer accounts
    Snapshot,
    Holder { holder_id: RecordId },
    Approved { approved_id: RecordId },
    Request { request_id: RecordId },
    TokenMetadata { token_id: RecordId },
    OwnerTokens { account_id: String },
    /// Owner of the contract
    Owner,
    /// Call any view method with JSON arguments
    Call {
        method_name: String,
        #[clap(default_value = "{}")]
        args: String,
    },
}

fn render<V: Serialize>(value: &V) -> Result<(), CustomError> {
    let output = serde_json::to_string_pretty(value).map_err(CustomError::FailedRenderOutput)?;
    println!("{}", output);
    Ok(())
}

fn view<V: Serialize>(method_name: &str, result: RpcResult<V>) -> Result<(), CustomError> {
    let value = result.map_err(|e| CustomError::FailedViewMethod(method_name.to_string(), e))?;
    render(&value)
}

#[tokio::main]
async fn main() -> Result<(), CustomError> {
    dotenv::dotenv().ok();
    init_logger();

    let cli = Cli::parse();
    let settings = Settings::init(cli.config.as_deref())?;
    tracing::debug!(target: CLI_TARGET, "Using settings {:?}", settings);

    let contract = DroplinkedContract::new(ViewClient::connect(
        settings.near.rpc_url.clone(),
        settings.near.contract_account_id.clone(),
    ));

    match cli.command.unwrap_or(Command::Snapshot) {
        Command::Snapshot => {
            let report = build_snapshot_report(&contract, &settings.accounts).await;
            render(&report.snapshot)
        }
        Command::Holder { holder_id } => view("get_holder", contract.get_holder(holder_id).await),
        Command::Approved { approved_id } => {
            view("get_approved", contract.get_approved(approved_id).await)
        }
        Command::Request { request_id } => view("get_request", contract.get_request(request_id).await),
        Command::TokenMetadata { token_id } => {
            view("get_token_metadata", contract.get_token_metadata(token_id).await)
        }
        Command::OwnerTokens { account_id } => {
            view("get_owner_tokens", contract.get_owner_tokens(&account_id).await)
        }
        Command::Owner => view("get_owner", contract.get_owner().await),
        Command::Call { method_name, args } => {
            let args: serde_json::Value = serde_json::from_str(&args).map_err(CustomError::InvalidCallArgs)?;
            let result = contract.view_raw(&method_name, &args).await;
            view(&method_name, result)
        }
    }
}
