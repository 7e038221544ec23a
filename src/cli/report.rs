use crate::cli::commands::ReportArgs;
use crate::cli::query::format_time;
use crate::cli::ServerClient;
use crate::errors::FuzzgateError;
use crate::models::{ApiFindings, ShortTestReport};

pub async fn handle_report(server: &str, args: ReportArgs) -> Result<(), FuzzgateError> {
    let client = ServerClient::new(server);
    let report: ShortTestReport = client.get(&format!("/{}/shortreport", args.api_id)).await?;
    let findings: ApiFindings = client.get(&format!("/{}/findings", args.api_id)).await?;

    if args.json {
        let combined = serde_json::json!({ "report": report, "findings": findings.items });
        println!("{}", serde_json::to_string_pretty(&combined)?);
        return Ok(());
    }

    println!("API {} fuzzing report", report.api_id);
    println!("  Started:  {}", format_time(report.starttime));
    println!("  Status:   {}", report.status);
    if let Some(severity) = report.highest_severity {
        println!("  Highest:  {:?}", severity);
    }
    if let Some(message) = &report.status_message {
        println!("  Message:  {}", message);
    }
    for tag in &report.tags {
        let severity = tag.highest_severity.map(|s| format!("{:?}", s)).unwrap_or_else(|| "-".into());
        println!("  [{}] highest {} across {} operations", tag.name, severity, tag.operations.len());
    }
    println!("  Findings: {}", findings.items.len());
    Ok(())
}
