//! `post`: send JSON to a path under the context
//!
//! Unlike the other commands, both the result and any error are written to
//! stdout as JSON.

use cns_core::{Method, Settings, paths};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{CnsCtlError, Result};

/// POST `data` to `path` and return the broker's full response
pub async fn handle_post(settings: &Settings, path: &str, data: Option<&str>) -> Result<Value> {
    let context = settings.require_context()?;
    let client = super::client(settings)?;

    let body = super::parse_json(data)?;
    let target = paths::location(context, path);
    debug!("Posting to {}", target);

    Ok(client
        .invoke(&settings.dapr_app_id, &target, Method::POST, Some(&body))
        .await?)
}

/// The JSON document printed when a post fails
pub fn error_document(err: &CnsCtlError) -> Value {
    json!({ "error": err.message() })
}
