//! One row per connection across all capabilities of a context

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::field::{Field, scalar_text};
use crate::error::{CnsError, Result};
use crate::wildcard;

const HEADERS: [&str; 5] = ["Capability", "Provider", "Consumer", "Status", "Connection ID"];

/// A connection together with the capability it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRow {
    pub capability: String,
    pub provider: String,
    pub consumer: String,
    pub status: String,
    pub id: String,
}

impl ConnectionRow {
    fn cells(&self) -> Vec<&str> {
        vec![
            &self.capability,
            &self.provider,
            &self.consumer,
            &self.status,
            &self.id,
        ]
    }
}

/// Collect connection rows in source order
///
/// With a `pattern`, only capabilities whose name matches the wildcard are
/// included. Fails with `NoConnections` when nothing is left.
pub fn connection_rows(data: &Value, pattern: Option<&str>) -> Result<Vec<ConnectionRow>> {
    let mut rows = Vec::new();
    if let Some(capabilities) = Field::from(data).as_object() {
        for (name, capability) in capabilities {
            if let Some(pattern) = pattern
                && !wildcard::matches(name, pattern)
            {
                continue;
            }
            let Some(connections) = capability
                .get("connections")
                .and_then(|c| Field::from(c).as_object())
            else {
                continue;
            };

            for (id, connection) in connections {
                let Some(connection) = connection.as_object() else {
                    continue;
                };
                rows.push(ConnectionRow {
                    capability: name.clone(),
                    provider: scalar_text(connection, "provider"),
                    consumer: scalar_text(connection, "consumer"),
                    status: scalar_text(connection, "status"),
                    id: id.clone(),
                });
            }
        }
    }

    debug!("Collected {} connection row(s)", rows.len());
    if rows.is_empty() {
        return Err(CnsError::NoConnections);
    }
    Ok(rows)
}

/// Render connection rows as a single bordered table
pub fn render_connections(rows: &[ConnectionRow]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(HEADERS.to_vec());

    for row in rows {
        table.add_row(row.cells());
    }
    table.to_string()
}
