//! `conns`: connection table for the context's capabilities

use cns_core::display::{connection_rows, render_connections};
use cns_core::{Method, Settings, paths, wildcard};
use tracing::{debug, info};

use crate::error::Result;

pub async fn handle_conns(settings: &Settings, filter: Option<&str>) -> Result<()> {
    let context = settings.require_context()?;
    let client = super::client(settings)?;

    let data = client
        .invoke_data(
            &settings.dapr_app_id,
            &paths::capabilities_path(context),
            Method::GET,
            None,
        )
        .await?;

    let pattern = filter.map(wildcard::contains_pattern);
    debug!("Connection filter: {:?}", pattern);

    let rows = connection_rows(&data, pattern.as_deref())?;
    info!("Showing {} connection(s)", rows.len());
    println!("{}", render_connections(&rows));
    Ok(())
}
