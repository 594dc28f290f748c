//! WebServer entry point

use clap::Parser;
use planner::PlannerConfig;
use shared::{logging, process_debug, ProcessId};
use std::net::SocketAddr;

use webserver::{WebServer, WebServerError, WebServerResult, WebServerState};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "HTTP API for the driver and job planner")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    dotenv::dotenv().ok();
    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "planner webserver");

    let defaults = PlannerConfig::from_env()?;
    process_debug!(ProcessId::current(), "Planner defaults: {:?}", defaults);

    let bind_address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::ServerStartup(format!("Invalid address {}:{}: {}", args.host, args.port, e)))?;

    WebServer::new(WebServerState::new(defaults)).run(bind_address).await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}
