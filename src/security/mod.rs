//! Java security properties contribution
//!
//! Writes `java-security.properties` into a layer and points the JVM at
//! it through `JAVA_OPTS` and `JAVA_SECURITY_PROPERTIES`.

pub mod contributor;
pub mod properties;

pub use contributor::{
    JavaSecurityProperties, CONTRIBUTOR_NAME, JAVA_OPTS, JAVA_SECURITY_PROPERTIES,
    PROPERTIES_FILE,
};
pub use properties::{PropertiesSource, PropertiesTemplate};
