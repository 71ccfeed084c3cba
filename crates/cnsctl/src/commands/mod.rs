//! Command implementations

pub mod conns;
pub mod post;
pub mod profile;
pub mod publish;
pub mod subscribe;
pub mod watch;

use cns_core::{CnsError, DaprClient, Settings};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Client for the sidecar named in `settings`
pub(crate) fn client(settings: &Settings) -> Result<DaprClient> {
    Ok(DaprClient::from_settings(settings)?)
}

/// Parse a JSON argument; anything missing or malformed is a bad request
pub(crate) fn parse_json(arg: Option<&str>) -> Result<Value> {
    let Some(text) = arg else {
        debug!("No JSON argument given");
        return Err(CnsError::BadRequest.into());
    };
    serde_json::from_str(text).map_err(|e| {
        debug!("JSON argument does not parse: {}", e);
        CnsError::BadRequest.into()
    })
}
