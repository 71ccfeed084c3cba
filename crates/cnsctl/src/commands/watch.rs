//! `watch`: show the context tree, then render each update as it arrives

use cns_core::display::TreeFormatter;
use cns_core::display::table::banner;
use cns_core::{Method, Settings, SubscriptionServer, paths};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

pub async fn handle_watch(settings: &Settings) -> Result<()> {
    let context = settings.require_context()?;
    let client = super::client(settings)?;
    let topic = paths::context_path(context);

    let data = client
        .invoke_data(&settings.dapr_app_id, &topic, Method::GET, None)
        .await?;

    let mut formatter = TreeFormatter::new(context);
    formatter.display(&data);

    println!("{}", banner(&format!("Subscribing to {}", topic)));

    let server = SubscriptionServer::from_settings(
        settings,
        &topic,
        Box::new(move |update: Value| {
            debug!("Update #{} received", formatter.updates());
            formatter.display(&update);
        }),
    )?;

    server.serve().await?;
    Ok(())
}
