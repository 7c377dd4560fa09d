//! Example server for axum-route-ext.
//!
//! ```text
//! route-ext [--config app.toml] serve    run the example application
//! route-ext [--config app.toml] routes   print every group's route settings
//! route-ext [--config app.toml] acl      print routes that require ACL checks
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use axum_route_ext::config::{load_config, AppConfig};
use axum_route_ext::http::HttpServer;
use axum_route_ext::observability::init_logging;
use axum_route_ext::RouteSetting;

#[derive(Parser)]
#[command(name = "route-ext")]
#[command(about = "Example server for route settings and group fallbacks", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the example application
    Serve,
    /// Print the route settings of every group as JSON
    Routes,
    /// Print the routes that require an ACL check as JSON
    Acl,
}

type GroupListing = BTreeMap<String, BTreeMap<String, RouteSetting>>;

fn listing<F>(server: &HttpServer, select: F) -> GroupListing
where
    F: Fn(&axum_route_ext::RouteGroup) -> std::collections::HashMap<String, RouteSetting>,
{
    server
        .app()
        .engine
        .groups()
        .iter()
        .map(|group| {
            let routes: BTreeMap<_, _> = select(group).into_iter().collect();
            (group.base_path().to_string(), routes)
        })
        .filter(|(_, routes)| !routes.is_empty())
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.observability)?;

    let server = HttpServer::new(config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Routes => {
            let routes = listing(&server, |group| group.routes_map());
            println!("{}", serde_json::to_string_pretty(&routes)?);
        }
        Commands::Acl => {
            let items = listing(&server, |group| group.acl_items());
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Serve => {
            tracing::info!(
                acl_items = server.app().admin.acl_items().len(),
                "route-ext v{} starting",
                env!("CARGO_PKG_VERSION")
            );

            let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
            server.run(listener).await?;

            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}
