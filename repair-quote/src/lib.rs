//! Screen repair quote wizard for ElecStore.
//!
//! The wizard walks a customer through brand, model, issue and damage details,
//! then asks a [`QuoteProvider`] for an estimate in Argentine pesos. Requests
//! that are not screen replacements are routed to an advanced diagnosis screen
//! instead of being quoted.

pub mod cli;
pub mod config;
pub mod controller;
pub mod handoff;
pub mod models;
pub mod provider;
pub mod render;
pub mod tasks;
pub mod workflow;

pub use config::{ConfigError, ProviderKind, QuoteConfig};
pub use controller::{SessionHandle, SessionView, WizardController};
pub use models::{QuoteRequest, QuoteResult};
pub use provider::{QuoteProvider, QuoteProviderError, create_provider};
pub use tasks::{Step, WizardAction};
