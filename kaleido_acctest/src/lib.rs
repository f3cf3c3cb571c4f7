//! Acceptance-test harness for Kaleido consortium and environment
//! provisioning.
//!
//! The crate renders HCL resource configuration from in-memory fixtures,
//! drives a three-phase acceptance protocol (pre-check, apply plus checks,
//! destroy plus destroy-check) against an injected [`Provider`], and
//! verifies the applied state through the remote Kaleido API.
//!
//! The applier itself is deliberately opaque: anything able to turn a
//! configuration document into a [`State`] can sit behind the [`Provider`]
//! trait, from a full provisioning engine to a scripted stub in tests.

mod check;
mod client;
mod config;
mod driver;
mod error;
mod model;
mod settings;
mod state;

pub use check::{
    CheckFn, check_environment_exists, check_resource_attr, check_state_empty, compose_aggregate,
};
pub use client::{ApiResponse, EnvironmentApi, KaleidoClient};
pub use config::{environment_config, environment_config_basic, environment_config_with_release};
pub use driver::{Provider, TestCase, TestStep, run};
pub use error::{AggregatedCheckErrors, ApiError, CheckError, HarnessError, ProviderError};
pub use model::{Consortium, Environment};
pub use settings::HarnessSettings;
pub use state::{ResourceInstance, State};
