use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chroma-gateway", about = "HTTP gateway over an embedded embedding store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address (overrides CHROMA_GATEWAY_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides CHROMA_GATEWAY_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Upsert items into a collection
    Upsert {
        collection: String,
        /// JSON array of {id, embedding, metadata?, document?}
        json: String,
    },
    /// Nearest-neighbour query against a collection
    Query {
        collection: String,
        /// JSON array of floats
        embedding: String,
        #[arg(long, default_value = "5")]
        n_results: usize,
    },
    /// Delete ids from a collection
    Delete {
        collection: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
