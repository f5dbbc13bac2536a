//! Admin login and bearer token handling.
//!
//! `CredentialVerifier` is the seam to whatever holds admin accounts; the
//! shipped verifier reads a single account from the environment.

mod credentials;

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use credentials::ConfiguredCredentialVerifier;
