//! Shared test utilities for the extension-manager workspace.
//!
//! This crate is a dev-dependency only. It deliberately depends on no other
//! workspace crate so any of them can use it from unit tests.
//!
//! # Modules
//!
//! - [`extensions`]: [`ExtensionsDir`], a fake editor extensions directory
//! - [`env`]: [`TestEnv`], isolated config, workspace and extensions roots

pub mod env;
pub mod extensions;

pub use env::TestEnv;
pub use extensions::ExtensionsDir;
