//! `nerd serve` command - run the HTTP server

use nerd_core::config::ServerConfig;
use nerd_core::error::Result;
use nerd_core::server;

use crate::cli::ServeArgs;

/// Resolve the effective configuration: file (or defaults), then flags
pub fn resolve_config(args: &ServeArgs) -> Result<ServerConfig> {
    let mut config = ServerConfig::load_or_default(args.config.as_deref())?;

    if let Some(address) = &args.address {
        config.address = address.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(doc_root) = &args.doc_root {
        config.doc_root = doc_root.display().to_string();
    }
    if let Some(database) = &args.database {
        config.database = database.display().to_string();
    }

    Ok(config)
}

/// Execute the serve command
pub fn execute(args: &ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;
    // Fail on a bad address before starting the runtime
    config.socket_addr()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(&config))
}
