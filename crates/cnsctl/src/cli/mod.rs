//! CLI structure and command definitions

use clap::{Parser, Subcommand};
use cns_core::SettingsOverrides;

/// Command-line client for CNS nodes
#[derive(Parser, Debug)]
#[command(name = "cnsctl")]
#[command(version, about = "Command-line client for CNS contexts over Dapr")]
#[command(long_about = "
Command-line client for CNS contexts over Dapr

Talks to the CNS broker through a local Dapr sidecar. Settings come from
built-in defaults, a .env file in the working directory, CNS_* environment
variables and the flags below, in increasing order of precedence.

EXAMPLES:
    # Show the context and follow its updates
    CNS_CONTEXT=my-context cnsctl watch

    # List connections whose capability name contains 'test'
    cnsctl --context my-context conns test

    # Change a context property
    cnsctl post '' '{\"title\":\"New title\"}'

    # Show a profile definition
    cnsctl profile cp:padi.test.v1

For more help on a specific command, run:
    cnsctl <command> --help
")]
pub struct Cli {
    /// Context identifier
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// App id of the CNS broker's Dapr sidecar
    #[arg(long, global = true)]
    pub dapr_app_id: Option<String>,

    /// Host of the local Dapr sidecar
    #[arg(long, global = true)]
    pub dapr_host: Option<String>,

    /// HTTP port of the local Dapr sidecar
    #[arg(long, global = true)]
    pub dapr_port: Option<String>,

    /// Pub/sub component name
    #[arg(long, global = true)]
    pub pubsub: Option<String>,

    /// Host the subscription server binds to
    #[arg(long, global = true)]
    pub server_host: Option<String>,

    /// Port the subscription server binds to
    #[arg(long, global = true)]
    pub server_port: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flag values to layer over the loaded settings
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            context: self.context.clone(),
            dapr_app_id: self.dapr_app_id.clone(),
            dapr_host: self.dapr_host.clone(),
            dapr_port: self.dapr_port.clone(),
            pubsub: self.pubsub.clone(),
            server_host: self.server_host.clone(),
            server_port: self.server_port.clone(),
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List connections of the context's capabilities
    #[command(after_help = "EXAMPLES:
    # All connections
    cnsctl conns

    # Connections of capabilities whose name contains 'padi'
    cnsctl conns padi

    # Wildcards are allowed inside the filter
    cnsctl conns 'test*v1'
")]
    Conns {
        /// Only show capabilities whose name contains this text (`*` is a wildcard)
        filter: Option<String>,
    },

    /// Show the context, then follow its updates
    #[command(after_help = "EXAMPLES:
    # Follow the configured context
    cnsctl watch

    # Receive updates on another port
    cnsctl watch --server-port 3101
")]
    Watch,

    /// POST JSON to a path relative to the context
    #[command(after_help = "EXAMPLES:
    # Update the context itself
    cnsctl post '' '{\"title\":\"New title\"}'

    # Relative to the context root
    cnsctl post capabilities/cp:padi.test.v1 '{\"version\":\"1.0\"}'

    # Appended to the context root without a separator
    cnsctl post '~/capabilities' '{}'

    # Absolute path
    cnsctl post /node '{}'
")]
    Post {
        /// Target path: '' for the context, '~rest', '/absolute' or 'relative'
        path: Option<String>,

        /// JSON request body
        data: Option<String>,
    },

    /// Show a profile definition
    #[command(after_help = "EXAMPLES:
    cnsctl profile cp:padi.test.v1
")]
    Profile {
        /// Profile identifier
        profile: Option<String>,
    },

    /// Publish JSON on the context topic
    #[command(after_help = "EXAMPLES:
    cnsctl publish '{\"title\":\"Hello\"}'
")]
    Publish {
        /// JSON message
        data: Option<String>,
    },

    /// Print every message published on the context topic
    #[command(after_help = "EXAMPLES:
    cnsctl subscribe

    # Through a different pub/sub component
    cnsctl subscribe --pubsub other-pubsub
")]
    Subscribe,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_become_overrides() {
        let cli = Cli::parse_from([
            "cnsctl",
            "conns",
            "--context",
            "ctx-a",
            "--dapr-port",
            "3600",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.context.as_deref(), Some("ctx-a"));
        assert_eq!(overrides.dapr_port.as_deref(), Some("3600"));
        assert!(overrides.pubsub.is_none());
    }

    #[test]
    fn test_post_path_defaults_to_context() {
        let cli = Cli::parse_from(["cnsctl", "post"]);
        match cli.command {
            Commands::Post { path, data } => {
                assert!(path.is_none());
                assert!(data.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
