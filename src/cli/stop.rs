use crate::cli::commands::StopArgs;
use crate::cli::ServerClient;
use crate::errors::FuzzgateError;
use tracing::info;

pub async fn handle_stop(server: &str, args: StopArgs) -> Result<(), FuzzgateError> {
    info!(api_id = args.api_id, "Stopping fuzzing session");
    ServerClient::new(server)
        .post::<()>(&format!("/{}/stop", args.api_id), None)
        .await?;
    println!("Fuzzing stopped for API {}", args.api_id);
    Ok(())
}
