//! Settings for CNS client tools
//!
//! Every setting has a built-in default and can be overridden, in increasing
//! order of precedence, by a `.env` file in the working directory, the process
//! environment, and command-line flags. An empty value never overrides: it
//! falls back to whatever the lower layer produced.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use ::config::Environment;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{CnsError, Result};

pub const CNS_CONTEXT: &str = "CNS_CONTEXT";
pub const CNS_DAPR: &str = "CNS_DAPR";
pub const CNS_DAPR_HOST: &str = "CNS_DAPR_HOST";
pub const CNS_DAPR_PORT: &str = "CNS_DAPR_PORT";
pub const CNS_PUBSUB: &str = "CNS_PUBSUB";
pub const CNS_SERVER_HOST: &str = "CNS_SERVER_HOST";
pub const CNS_SERVER_PORT: &str = "CNS_SERVER_PORT";

/// All recognized setting keys
pub const KEYS: &[&str] = &[
    CNS_CONTEXT,
    CNS_DAPR,
    CNS_DAPR_HOST,
    CNS_DAPR_PORT,
    CNS_PUBSUB,
    CNS_SERVER_HOST,
    CNS_SERVER_PORT,
];

/// Default name of the dotenv-style file read by [`Settings::load`]
pub const DOTENV_FILE: &str = ".env";

/// Resolved settings, built once at startup and passed to every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Context identifier; required by every context-scoped command
    pub context: String,
    /// App id of the CNS service behind the sidecar
    pub dapr_app_id: String,
    pub dapr_host: String,
    pub dapr_port: String,
    /// Pub/sub component name
    pub pubsub: String,
    /// Local server address the sidecar delivers subscriptions to
    pub server_host: String,
    pub server_port: String,
}

/// Command-line overrides; `None` leaves the resolved value untouched
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub context: Option<String>,
    pub dapr_app_id: Option<String>,
    pub dapr_host: Option<String>,
    pub dapr_port: Option<String>,
    pub pubsub: Option<String>,
    pub server_host: Option<String>,
    pub server_port: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            context: String::new(),
            dapr_app_id: "cns-dapr".to_string(),
            dapr_host: "localhost".to_string(),
            dapr_port: "3500".to_string(),
            pubsub: "cns-pubsub".to_string(),
            server_host: "localhost".to_string(),
            server_port: "3100".to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings through a key-value lookup layered over the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        for key in KEYS {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty())
                && let Some(slot) = settings.field_mut(key)
            {
                trace!("Setting {} overridden", key);
                *slot = value;
            }
        }
        settings
    }

    /// Resolve settings from `.env` in the working directory and the environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(Path::new(DOTENV_FILE))
    }

    /// Resolve settings from a specific dotenv-style file and the environment
    ///
    /// A missing file is not an error, and neither is a line that does not
    /// parse. Environment variables win over values from the file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file_values = read_dotenv(path)?;
        debug!(
            "Loaded {} setting(s) from {}",
            file_values.len(),
            path.display()
        );

        let mut builder = ::config::Config::builder();
        for (key, value) in file_values {
            if !value.is_empty() {
                builder = builder.set_default(key.to_lowercase(), value)?;
            }
        }
        let layered = builder
            .add_source(
                Environment::with_prefix("CNS")
                    .keep_prefix(true)
                    .ignore_empty(true),
            )
            .build()?;

        Ok(Self::from_lookup(|key| {
            layered.get_string(&key.to_lowercase()).ok()
        }))
    }

    /// Apply command-line overrides on top of the resolved values
    pub fn apply(mut self, overrides: &SettingsOverrides) -> Self {
        let pairs = [
            (CNS_CONTEXT, &overrides.context),
            (CNS_DAPR, &overrides.dapr_app_id),
            (CNS_DAPR_HOST, &overrides.dapr_host),
            (CNS_DAPR_PORT, &overrides.dapr_port),
            (CNS_PUBSUB, &overrides.pubsub),
            (CNS_SERVER_HOST, &overrides.server_host),
            (CNS_SERVER_PORT, &overrides.server_port),
        ];
        for (key, value) in pairs {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty())
                && let Some(slot) = self.field_mut(key)
            {
                debug!("Setting {} overridden from command line", key);
                *slot = value.clone();
            }
        }
        self
    }

    /// The context identifier, or `MissingContext` when none is configured
    pub fn require_context(&self) -> Result<&str> {
        if self.context.is_empty() {
            return Err(CnsError::MissingContext);
        }
        Ok(&self.context)
    }

    /// Sidecar HTTP port
    pub fn dapr_port(&self) -> Result<u16> {
        parse_port(CNS_DAPR_PORT, &self.dapr_port)
    }

    /// Local subscription server port
    pub fn server_port(&self) -> Result<u16> {
        parse_port(CNS_SERVER_PORT, &self.server_port)
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let field = match key {
            CNS_CONTEXT => &mut self.context,
            CNS_DAPR => &mut self.dapr_app_id,
            CNS_DAPR_HOST => &mut self.dapr_host,
            CNS_DAPR_PORT => &mut self.dapr_port,
            CNS_PUBSUB => &mut self.pubsub,
            CNS_SERVER_HOST => &mut self.server_host,
            CNS_SERVER_PORT => &mut self.server_port,
            _ => return None,
        };
        Some(field)
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| CnsError::Config(format!("{} is not a valid port: '{}'", key, value)))
}

/// Read recognized keys from a dotenv file
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => {
            return Err(CnsError::Config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    Ok(parse_dotenv(&text)
        .into_iter()
        .filter(|(key, _)| KEYS.contains(&key.as_str()))
        .collect())
}

/// Parse dotenv text into assignments, in file order
///
/// Lines that are not assignments are skipped. Unquoted values are trimmed
/// and end at `#`; quoted values keep everything between the quotes, and
/// double-quoted ones expand `\n` and `\r`.
fn parse_dotenv(text: &str) -> Vec<(String, String)> {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINE_RE.get_or_init(|| {
        // KEY=value with optional `export`, quoting and a trailing comment
        Regex::new(
            r#"(?m)^\s*(?:export\s+)?([\w.-]+)(?:\s*=\s*?|:\s+?)(\s*'(?:\\'|[^'])*'|\s*"(?:\\"|[^"])*"|\s*`(?:\\`|[^`])*`|[^#\r\n]+)?\s*(?:#.*)?$"#,
        )
        .unwrap()
    });

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    re.captures_iter(&text)
        .map(|caps| {
            let key = caps[1].to_string();
            let raw = caps.get(2).map_or("", |m| m.as_str()).trim();
            trace!("Dotenv assignment for {}", key);
            (key, dotenv_value(raw))
        })
        .collect()
}

fn dotenv_value(raw: &str) -> String {
    let Some(quote) = raw.chars().next().filter(|c| matches!(c, '\'' | '"' | '`')) else {
        return raw.to_string();
    };

    let inner = match raw.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
        Some(inner) => inner,
        None => return raw.to_string(),
    };
    if quote == '"' {
        inner.replace("\\n", "\n").replace("\\r", "\r")
    } else {
        inner.to_string()
    }
}
