//! Profile definitions

use serde_json::{Map, Value};

use super::field::{Field, metadata, scalar_text};
use super::table::{LABEL_WIDTH, borderless, record_table};

const COMMENT_WIDTH: usize = 37;
const FLAGS_WIDTH: usize = 2;

/// Render a profile as a `Profile Definition` table
///
/// Each property becomes one line of a nested sub-table: its name, its
/// comment, and a flags column (`R` required, `P` propagate).
pub fn render_profile(data: &Value) -> String {
    let Some(profile) = Field::from(data).as_object() else {
        return record_table("Profile", "Definition", Vec::new());
    };

    let mut rows = metadata(profile);
    if let Some(properties) = profile.get("properties").and_then(Value::as_object)
        && !properties.is_empty()
    {
        rows.push(("properties".to_string(), property_table(properties)));
    }
    record_table("Profile", "Definition", rows)
}

fn property_table(properties: &Map<String, Value>) -> String {
    let rows = properties
        .iter()
        .map(|(name, property)| match property.as_object() {
            Some(property) => vec![
                name.clone(),
                scalar_text(property, "comment"),
                flags(property),
            ],
            None => vec![name.clone(), String::new(), "--".to_string()],
        })
        .collect();
    borderless(rows, &[LABEL_WIDTH, COMMENT_WIDTH, FLAGS_WIDTH])
}

fn flags(property: &Map<String, Value>) -> String {
    let set = |name: &str| property.get(name).and_then(Value::as_bool) == Some(true);
    format!(
        "{}{}",
        if set("required") { 'R' } else { '-' },
        if set("propagate") { 'P' } else { '-' },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flags() {
        let both = json!({"required": true, "propagate": true});
        let none = json!({"required": false});
        let propagate = json!({"propagate": true, "required": "yes"});

        assert_eq!(flags(both.as_object().unwrap()), "RP");
        assert_eq!(flags(none.as_object().unwrap()), "--");
        assert_eq!(flags(propagate.as_object().unwrap()), "-P");
    }

    #[test]
    fn test_render_profile() {
        let profile = json!({
            "version": "1.0",
            "title": "Test profile",
            "properties": {
                "rate": {"comment": "Rate per hour", "required": true},
                "unit": {"comment": "Measurement unit", "propagate": true}
            }
        });
        let out = render_profile(&profile);

        assert!(out.contains("Profile"));
        assert!(out.contains("Definition"));
        assert!(out.contains("Test profile"));
        assert!(out.contains("Rate per hour"));
        assert!(out.contains("R-"));
        assert!(out.contains("-P"));
        assert!(out.find("rate").unwrap() < out.find("unit").unwrap());
    }

    #[test]
    fn test_long_comment_is_cut() {
        let comment = "c".repeat(60);
        let profile = json!({"properties": {"p": {"comment": comment}}});
        let out = render_profile(&profile);

        assert!(out.contains(&"c".repeat(COMMENT_WIDTH)));
        assert!(!out.contains(&"c".repeat(COMMENT_WIDTH + 1)));
    }

    #[test]
    fn test_profile_without_properties() {
        let out = render_profile(&json!({"title": "Bare"}));
        assert!(out.contains("Bare"));
        assert!(!out.contains("properties"));
    }
}
