use chroma_gateway::cli::commands::{Cli, Commands};
use chroma_gateway::config::GatewayConfig;
use chroma_gateway::domain::entities::item::Item;
use chroma_gateway::http::dto::{DeleteResponse, QueryRequest, QueryResponse, UpsertRequest, UpsertResponse};
use chroma_gateway::ChromaGateway;
use clap::Parser;
use std::sync::Arc;
use validator::Validate;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };
    chroma_gateway::telemetry::init_tracing(config.log_format);

    let gateway = match ChromaGateway::new(&config.persist_path) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!(path = %config.persist_path, error = %e, "failed to open embedding store");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(config, gateway, cli.command).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run_command(
    mut config: GatewayConfig,
    gateway: ChromaGateway,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            chroma_gateway::http::serve(&config, Arc::new(gateway)).await?;
        }
        Commands::Upsert { collection, json } => {
            let items: Vec<Item> = serde_json::from_str(&json)?;
            let req = UpsertRequest { collection, items };
            req.validate()?;
            let count = gateway.upsert(req.collection, req.items).await?;
            println!("{}", serde_json::to_string_pretty(&UpsertResponse { ok: true, count })?);
        }
        Commands::Query {
            collection,
            embedding,
            n_results,
        } => {
            let query_embedding: Vec<f32> = serde_json::from_str(&embedding)?;
            let req = QueryRequest {
                collection,
                query_embedding,
                n_results,
            };
            req.validate()?;
            let results = gateway
                .query(req.collection, req.query_embedding, req.n_results)
                .await?;
            println!("{}", serde_json::to_string_pretty(&QueryResponse { results })?);
        }
        Commands::Delete { collection, ids } => {
            let outcome = gateway.delete(collection, ids).await;
            println!("{}", serde_json::to_string_pretty(&DeleteResponse::from(outcome))?);
        }
    }
    Ok(())
}
