use crate::cli::commands::QueryArgs;
use crate::cli::ServerClient;
use crate::errors::FuzzgateError;
use crate::models::{ShortTestProgress, ShortTestReport};
use tracing::info;

pub async fn handle_query(server: &str, args: QueryArgs) -> Result<(), FuzzgateError> {
    info!(api_id = args.api_id, "Querying fuzzing progress");
    let client = ServerClient::new(server);

    loop {
        match client.get::<ShortTestProgress>(&format!("/{}/progress", args.api_id)).await {
            Ok(progress) => {
                if args.json {
                    println!("{}", serde_json::to_string(&progress)?);
                } else {
                    println!("API {}: {}% (started {})", progress.api_id, progress.progress, format_time(progress.starttime));
                }
            }
            // Nothing running: show how the last session ended.
            Err(FuzzgateError::NotFound(_)) => {
                let report: ShortTestReport = client.get(&format!("/{}/shortreport", args.api_id)).await?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("API {}: {} (started {})", report.api_id, report.status, format_time(report.starttime));
                    if let Some(message) = &report.status_message {
                        println!("Message: {}", message);
                    }
                }
                break;
            }
            Err(e) => return Err(e),
        }

        if !args.follow {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_secs(args.interval)).await;
    }

    Ok(())
}

pub(crate) fn format_time(unix: i64) -> String {
    chrono::DateTime::from_timestamp(unix, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| unix.to_string())
}
