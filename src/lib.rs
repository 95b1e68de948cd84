//! jvmsec - Java security properties for buildpack layers
//!
//! Contributes a `java-security.properties` file to a Cloud Native
//! Buildpacks layer and wires `JAVA_OPTS` and `JAVA_SECURITY_PROPERTIES`
//! to it through the layer's environment files.

pub mod buildpack;
pub mod cli;
pub mod config;
pub mod error;
pub mod layer;
pub mod security;

pub use error::{JvmsecError, JvmsecResult};
