use clap::Parser;
use fuzzgate::cli::{self, Cli, Commands};
use fuzzgate::config;
use fuzzgate::errors::FuzzgateError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let server = cli.server.as_str();
    let result = match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
        Commands::Start(args) => cli::start::handle_start(server, args).await,
        Commands::Stop(args) => cli::stop::handle_stop(server, args).await,
        Commands::Query(args) => cli::query::handle_query(server, args).await,
        Commands::Report(args) => cli::report::handle_report(server, args).await,
        Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            FuzzgateError::Config(_) | FuzzgateError::Yaml(_) => 2,
            FuzzgateError::NotFound(_) => 3,
            FuzzgateError::InvalidParameter(_) => 4,
            FuzzgateError::Network(_) => 5,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), FuzzgateError> {
    let path = std::path::PathBuf::from(&args.config);
    let config = config::parse_config(&path).await?;
    println!(
        "Configuration is valid: {} (deployment: {})",
        args.config, config.fuzzer.deployment_type
    );
    Ok(())
}
