//! `publish`: send a message on the context topic

use cns_core::{Settings, paths};
use tracing::info;

use crate::error::Result;

pub async fn handle_publish(settings: &Settings, data: Option<&str>) -> Result<()> {
    let context = settings.require_context()?;
    let client = super::client(settings)?;

    let message = super::parse_json(data)?;
    let topic = paths::context_path(context);

    client.publish(&settings.pubsub, &topic, &message).await?;
    info!("Published on {}/{}", settings.pubsub, topic);

    println!("Published: {}", topic);
    Ok(())
}
