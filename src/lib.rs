//! Per-deployment environment settings for the Coffee Shop client.

pub mod environment;

pub use environment::{Auth0Config, Environment, EnvironmentError, Target};
