//! `subscribe`: echo every message on the context topic

use cns_core::{Settings, SubscriptionServer, paths};
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

pub async fn handle_subscribe(settings: &Settings) -> Result<()> {
    let context = settings.require_context()?;
    let topic = paths::context_path(context);
    println!("Subscribing: {}", topic);

    let label = topic.clone();
    let server = SubscriptionServer::from_settings(
        settings,
        &topic,
        Box::new(move |data: Value| match serde_json::to_string_pretty(&data) {
            Ok(text) => println!("{} = {}", label, text),
            Err(e) => warn!("Could not format message: {}", e),
        }),
    )?;

    server.serve().await?;
    Ok(())
}
