//! Core components of the `shareholder-sync` crate.
//!
//! This module contains the foundational building blocks:
//! - The session-holding [`RegistryClient`] and its builder.
//! - The run [`Config`] and its builder.
//! - The primary [`Error`] type.
//! - Internal networking helpers.

/// The registry client (`RegistryClient`), builder, and endpoint constants.
pub mod client;
/// Run configuration loaded from the environment.
pub mod config;
/// The primary error type (`Error`) for the crate.
pub mod error;

pub(crate) mod html;
pub(crate) mod net;

pub use client::{RegistryClient, RegistryClientBuilder};
pub use config::{Config, ConfigBuilder};
pub use error::Error;
