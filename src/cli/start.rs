use crate::api::models::StartTestResponse;
use crate::cli::commands::StartArgs;
use crate::cli::ServerClient;
use crate::errors::FuzzgateError;
use crate::models::{AuthInput, Depth, FuzzingInput};
use tracing::info;

pub async fn handle_start(server: &str, args: StartArgs) -> Result<(), FuzzgateError> {
    // Fail fast on a bad depth instead of round-tripping to the server.
    let depth: Depth = args.depth.parse()?;
    let input = FuzzingInput::new(depth.as_str(), build_auth(&args)?);
    info!(api_id = args.api_id, depth = %depth, auth = %input.auth_kind(), "Starting fuzzing session");

    let client = ServerClient::new(server);
    let resp = client.post(&format!("/{}/start", args.api_id), Some(&input)).await?;
    let started: StartTestResponse = resp
        .json()
        .await
        .map_err(|e| FuzzgateError::Network(format!("Invalid response: {}", e)))?;

    println!("Fuzzing started for API {} (test {})", started.api_id, started.timestamp);
    Ok(())
}

fn build_auth(args: &StartArgs) -> Result<AuthInput, FuzzgateError> {
    let field = |value: &Option<String>, name: &str| {
        value
            .clone()
            .ok_or_else(|| FuzzgateError::InvalidParameter(format!("--{} is required for {} auth", name, args.auth_type)))
    };

    let auth = match args.auth_type.to_ascii_lowercase().as_str() {
        "none" => AuthInput::None,
        "basic" => AuthInput::Basic {
            username: field(&args.username, "username")?,
            password: field(&args.password, "password")?,
        },
        "bearer" => AuthInput::Bearer { token: field(&args.token, "token")? },
        "apikey" => AuthInput::ApiKey {
            key: field(&args.key, "key")?,
            value: field(&args.value, "value")?,
        },
        other => return Err(FuzzgateError::InvalidParameter(format!("Invalid auth type: {}", other))),
    };
    // Same validation the server applies.
    auth.auth_material()?;
    Ok(auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(auth_type: &str) -> StartArgs {
        StartArgs {
            api_id: 1,
            depth: "quick".into(),
            auth_type: auth_type.into(),
            username: None,
            password: None,
            token: None,
            key: None,
            value: None,
        }
    }

    #[test]
    fn test_build_auth_none() {
        assert_eq!(build_auth(&args("none")).unwrap(), AuthInput::None);
    }

    #[test]
    fn test_build_auth_requires_fields() {
        let err = build_auth(&args("bearer")).unwrap_err();
        assert!(err.to_string().contains("--token"));

        let mut basic = args("basic");
        basic.username = Some("bob".into());
        basic.password = Some("pw".into());
        assert!(matches!(build_auth(&basic).unwrap(), AuthInput::Basic { .. }));
    }

    #[test]
    fn test_build_auth_unknown_type() {
        assert!(matches!(build_auth(&args("oauth")), Err(FuzzgateError::InvalidParameter(_))));
    }
}
