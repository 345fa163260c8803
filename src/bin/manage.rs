//! Management entrypoint.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use gearcalc::conf::Settings;
use gearcalc::middleware::{CorsMiddleware, LoggingMiddleware};
use gearcalc::server::HttpServer;
use gearcalc::urls::{AppContext, build_router};

#[derive(Parser)]
#[command(name = "manage", about = "gearcalc backend management commands")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Start the HTTP server.
	Runserver {
		/// Override the bind address from settings.
		#[arg(long)]
		bind: Option<std::net::SocketAddr>,
	},
	/// Print the configured routes.
	Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.init();

	let cli = Cli::parse();
	let mut settings = Settings::from_env()?;

	match cli.command {
		Command::Runserver { bind } => {
			if let Some(bind) = bind {
				settings.bind_addr = bind;
			}
			let addr = settings.bind_addr;
			let ctx = AppContext::with_memory_stores(settings);
			let router = Arc::new(build_router(&ctx));

			let server = HttpServer::new(router)
				.with_middleware(Arc::new(LoggingMiddleware::new()))
				.with_middleware(Arc::new(CorsMiddleware::permissive()));

			server.listen(addr).await
		}
		Command::Routes => {
			let ctx = AppContext::with_memory_stores(settings);
			let router = build_router(&ctx);
			for route in router.routes() {
				println!("{:7} {}", route.method.as_str(), route.path);
			}
			Ok(())
		}
	}
}
