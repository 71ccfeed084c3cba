//! # cns-core
//!
//! Shared engine for the CNS client tools. Everything the `cnsctl` binary
//! needs that is not argument parsing lives here:
//!
//! - **Settings** - broker and server coordinates resolved from defaults,
//!   an optional `.env` file, the environment and command-line overrides
//! - **Client** - service invocation and publishing through the Dapr sidecar
//! - **Server** - the app-side HTTP endpoints Dapr calls to deliver pub/sub
//!   messages
//! - **Display** - table rendering for capabilities, connections, profiles
//!   and live context updates
//!
//! ## Crate Structure
//!
//! ```text
//! cns-core/
//! ├── src/
//! │   ├── lib.rs
//! │   ├── config.rs       # Settings
//! │   ├── client.rs       # DaprClient (invoke, publish)
//! │   ├── server.rs       # SubscriptionServer
//! │   ├── paths.rs        # CNS path and topic conventions
//! │   ├── wildcard.rs     # `*` glob matching
//! │   ├── display/        # table formatters
//! │   └── error.rs        # CnsError
//! ```

pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod paths;
pub mod server;
pub mod wildcard;

pub use client::{DaprClient, InvokeResponse};
pub use config::{Settings, SettingsOverrides};
pub use error::{CnsError, Result};
pub use reqwest::Method;
pub use server::{Subscription, SubscriptionServer};
