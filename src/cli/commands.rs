use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "fuzzgate", version, about = "Fuzz test lifecycle controller for discovered APIs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of a running fuzzgate server
    #[arg(long, global = true, default_value = "http://localhost:8080", env = "FUZZGATE_SERVER")]
    pub server: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server hosting the fuzzer module
    Serve(ServeArgs),
    /// Start a fuzzing session against an API
    Start(StartArgs),
    /// Cancel the running fuzzing session of an API
    Stop(StopArgs),
    /// Query fuzzing progress of an API
    Query(QueryArgs),
    /// Show the latest report and findings of an API
    Report(ReportArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen port (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// SQLite database path (overrides config)
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct StartArgs {
    /// API identifier
    pub api_id: u32,

    /// Fuzzing depth: quick, default, deep
    #[arg(long, default_value = "default")]
    pub depth: String,

    /// Auth scheme used while probing: none, basic, bearer, apikey
    #[arg(long, default_value = "none")]
    pub auth_type: String,

    /// Username for basic auth
    #[arg(long)]
    pub username: Option<String>,

    /// Password for basic auth
    #[arg(long)]
    pub password: Option<String>,

    /// Token for bearer auth
    #[arg(long)]
    pub token: Option<String>,

    /// Header name for API key auth
    #[arg(long)]
    pub key: Option<String>,

    /// Header value for API key auth
    #[arg(long)]
    pub value: Option<String>,
}

#[derive(Args, Clone)]
pub struct StopArgs {
    /// API identifier
    pub api_id: u32,
}

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// API identifier
    pub api_id: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Continuously poll until the session finishes
    #[arg(long)]
    pub follow: bool,

    /// Poll interval in seconds
    #[arg(long, default_value = "10")]
    pub interval: u64,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    /// API identifier
    pub api_id: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
