//! Tree rendering of a context and its capabilities
//!
//! Used for the initial fetch of a context and for every update delivered
//! afterwards. A `null` entry in a capability or connection map means the item
//! was removed; it gets a notice and nothing else.

use serde_json::{Map, Value};
use tracing::trace;

use super::field::{Field, metadata};
use super::table::{LABEL_WIDTH, banner, borderless, record_table};

/// Nested property values are cut so a property line fits the value column
const PROPERTY_VALUE_WIDTH: usize = 39;

/// Renders context snapshots and updates, numbering every render after the first
#[derive(Debug, Clone)]
pub struct TreeFormatter {
    context: String,
    updates: u64,
}

impl TreeFormatter {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            updates: 0,
        }
    }

    /// Number of renders done so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Render one snapshot or update
    ///
    /// Every call after the first is preceded by an `Update #N` banner.
    pub fn render(&mut self, data: &Value) -> String {
        let mut blocks = Vec::new();

        if self.updates > 0 {
            blocks.push(banner(&format!("Update #{}", self.updates)));
        }
        self.updates += 1;

        if let Some(obj) = data.as_object() {
            let rows = metadata(obj);
            if !rows.is_empty() {
                blocks.push(record_table("Context", &self.context, rows));
            }
            if let Some(capabilities) = obj.get("capabilities") {
                let list = render_list("Capability", capabilities);
                if !list.is_empty() {
                    blocks.push(list);
                }
            }
        }

        blocks.join("\n")
    }

    /// Render and print to stdout
    pub fn display(&mut self, data: &Value) {
        let out = self.render(data);
        if !out.is_empty() {
            println!("{}", out);
        }
    }
}

/// Render every entry of `collection` as `<kind> <name>` tables
pub fn render_list(kind: &str, collection: &Value) -> String {
    let mut blocks = Vec::new();
    list_into(kind, collection, &mut blocks);
    blocks.join("\n")
}

fn list_into(kind: &str, collection: &Value, blocks: &mut Vec<String>) {
    let Some(entries) = Field::from(collection).as_object() else {
        trace!("{} list is not an object, skipping", kind);
        return;
    };

    for (name, value) in entries {
        match Field::from(value) {
            Field::Null => {
                blocks.push(banner(&format!("{} {} removed", kind, name)));
            }
            Field::Object(entry) => {
                let mut rows = metadata(entry);
                if let Some(properties) = entry.get("properties").and_then(Value::as_object)
                    && !properties.is_empty()
                {
                    rows.push(("properties".to_string(), property_table(properties)));
                }
                if !rows.is_empty() {
                    blocks.push(record_table(kind, name, rows));
                }
                if let Some(connections) = entry.get("connections") {
                    list_into("Connection", connections, blocks);
                }
            }
            Field::Scalar(_) | Field::Array(_) => {
                trace!("{} {} is not an object, skipping", kind, name);
            }
        }
    }
}

fn property_table(properties: &Map<String, Value>) -> String {
    let rows = properties
        .iter()
        .map(|(name, value)| vec![name.clone(), Field::from(value).to_cell()])
        .collect();
    borderless(rows, &[LABEL_WIDTH, PROPERTY_VALUE_WIDTH])
}
