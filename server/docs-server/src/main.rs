use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use docs_engine::config::load_dotenv;
use docs_engine::{DocsConfig, DocsStore, DocumentBuilder, GatewayConfiguration, ServiceManifest};
use docs_server::{create_app, DocsServer};

/// Documentation server for resource microservices
#[derive(Parser, Debug)]
#[command(name = "docs-server")]
#[command(about = "Publishes OpenAPI documents and serves the Swagger UI viewer")]
struct Args {
    /// Service manifest (YAML or JSON)
    #[arg(short, long, env = "APIDOCS_MANIFEST", default_value = "apidocs.yaml")]
    manifest: PathBuf,

    /// Server bind address, overrides APIDOCS_HOST
    #[arg(long)]
    host: Option<String>,

    /// Server port, overrides PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Gateway root folder, overrides APIDOCS_GATEWAY_ROOT
    #[arg(long)]
    gateway_root: Option<PathBuf>,

    /// Operation path prefix, overrides APIDOCS_BASE_PATH
    #[arg(long)]
    base_path: Option<String>,

    /// Upstream address for gateway routes, overrides APIDOCS_SERVICE_ADDRESS
    #[arg(long)]
    service_address: Option<String>,

    /// Do not write documents and gateway routes at startup
    #[arg(long)]
    no_publish: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Load `.env` before clap and the tracing filter read the environment
fn load_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    load_dotenv();
    Args::try_parse_from(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = load_args(env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing(args.verbose);

    let mut config = DocsConfig::from_env().context("Failed to read environment configuration")?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(root) = args.gateway_root {
        config.gateway_root = root;
    }
    if let Some(base_path) = args.base_path {
        config.base_path = base_path;
    }
    if let Some(address) = args.service_address {
        config.service_address = Some(address);
    }
    if args.no_publish {
        config.publish = false;
    }

    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());

    let manifest = ServiceManifest::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;
    let service_id = manifest.service_id.clone();

    let document = DocumentBuilder::new(service_id.clone())
        .base_path(config.base_path.clone())
        .build(&manifest.services)
        .context("Failed to build API description document")?;

    let store = DocsStore::new(config.gateway_root.clone());
    if config.publish {
        store
            .publish(&service_id, &document)
            .context("Failed to publish API description document")?;

        let routes = GatewayConfiguration::for_services(
            &service_id,
            &config.service_address(),
            &config.base_path,
            &manifest.services,
        )
        .context("Failed to build gateway routes")?;
        store
            .publish_gateway(&service_id, &routes)
            .context("Failed to publish gateway routes")?;
    } else {
        info!("Publishing disabled, gateway root left untouched");
    }

    let server = DocsServer::new(service_id.clone(), &document, store)?;
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("🚀 {}", format!("Documenting '{service_id}' on http://{addr}").bright_green());
    info!("📋 {}", format!("Swagger UI available at: http://{addr}/swagger/index.html").bright_blue());
    info!("📋 {}", format!("Catalog available at: http://{addr}/catalog").bright_blue());

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    // Check if we're in development or production
    let is_development =
        env::var("APIDOCS_ENV").unwrap_or_else(|_| "development".to_string()) == "development";
    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("docs_server={level},docs_engine={level},error_common={level},tower_http=info").into()
    });

    if is_development && use_colors {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true)
                    .with_level(true),
            )
            .init();

        print_startup_banner();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .init();
    }
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║              📚 APIDOCS SERVER               ║".bright_cyan());
    println!("{}", "║   OpenAPI documents and Swagger UI viewer    ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════╝".bright_cyan());
    println!();
}
