use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
                    "db": { "type": "string" }
                },
                "additionalProperties": false
            },
            "fuzzer": {
                "type": "object",
                "properties": {
                    "deployment_type": { "type": "string", "enum": ["docker", "kubernetes", "fake"] },
                    "platform_host": { "type": "string" },
                    "docker": {
                        "type": "object",
                        "properties": {
                            "image": { "type": "string" },
                            "network_mode": { "type": "string" },
                            "container_prefix": { "type": "string", "pattern": "^[a-zA-Z0-9][a-zA-Z0-9_.-]*$" }
                        },
                        "additionalProperties": false
                    }
                },
                "additionalProperties": false
            },
            "notifications": {
                "type": "object",
                "properties": {
                    "url": { "type": "string", "format": "uri" }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
});
