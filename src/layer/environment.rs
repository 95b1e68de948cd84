//! Layer environment entries
//!
//! The lifecycle reads environment modifications from files named
//! `NAME.op` inside a layer's `env/`, `env.build/` and `env.launch/`
//! directories. Each file holds the raw value, with no trailing newline.

use crate::error::{JvmsecError, JvmsecResult};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// How a value combines with an existing variable of the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnvOp {
    /// Concatenate after the existing value
    Append,

    /// Concatenate before the existing value
    Prepend,

    /// Replace the existing value
    Override,

    /// Set only when the variable is unset
    Default,

    /// Delimiter used by append/prepend
    Delimiter,
}

impl EnvOp {
    /// File suffix understood by the lifecycle
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Override => "override",
            Self::Default => "default",
            Self::Delimiter => "delim",
        }
    }

    #[cfg(test)]
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "append" => Some(Self::Append),
            "prepend" => Some(Self::Prepend),
            "override" => Some(Self::Override),
            "default" => Some(Self::Default),
            "delim" => Some(Self::Delimiter),
            _ => None,
        }
    }
}

/// Variable name plus operation, rendered as `NAME.op`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnvKey {
    pub name: String,
    pub op: EnvOp,
}

impl EnvKey {
    pub fn new(name: impl Into<String>, op: EnvOp) -> Self {
        Self {
            name: name.into(),
            op,
        }
    }

    /// Parse a `NAME.op` file name
    #[cfg(test)]
    pub fn parse(s: &str) -> Option<Self> {
        let (name, suffix) = s.rsplit_once('.')?;
        if name.is_empty() {
            return None;
        }
        EnvOp::from_suffix(suffix).map(|op| Self::new(name, op))
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.op.suffix())
    }
}

impl Serialize for EnvKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered set of environment modifications for one layer scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Environment(BTreeMap<EnvKey, String>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to `name` with no delimiter
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.set(EnvKey::new(name, EnvOp::Append), value);
    }

    /// Replace `name` with `value`
    pub fn override_value(&mut self, name: &str, value: impl Into<String>) {
        self.set(EnvKey::new(name, EnvOp::Override), value);
    }

    pub fn default_value(&mut self, name: &str, value: impl Into<String>) {
        self.set(EnvKey::new(name, EnvOp::Default), value);
    }

    pub fn set(&mut self, key: EnvKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, name: &str, op: EnvOp) -> Option<&str> {
        self.0.get(&EnvKey::new(name, op)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EnvKey, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Write one file per entry into `dir`, replacing whatever was there.
    ///
    /// An empty environment removes `dir` entirely.
    pub fn write_to(&self, dir: &Path) -> JvmsecResult<()> {
        if dir.exists() {
            std::fs::remove_dir_all(dir)
                .map_err(|e| JvmsecError::io(format!("removing {}", dir.display()), e))?;
        }

        if self.is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(dir)
            .map_err(|e| JvmsecError::io(format!("creating {}", dir.display()), e))?;

        for (key, value) in &self.0 {
            let path = dir.join(key.to_string());
            debug!("Writing env file {}", path.display());
            std::fs::write(&path, value)
                .map_err(|e| JvmsecError::io(format!("writing {}", path.display()), e))?;
        }

        Ok(())
    }

    /// Read `NAME.op` files from `dir`. Unknown suffixes are skipped.
    #[cfg(test)]
    pub fn read_from(dir: &Path) -> JvmsecResult<Self> {
        let mut env = Self::new();
        if !dir.is_dir() {
            return Ok(env);
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| JvmsecError::io(format!("reading {}", dir.display()), e))?;

        for entry in entries {
            let entry =
                entry.map_err(|e| JvmsecError::io(format!("reading {}", dir.display()), e))?;
            let file_name = entry.file_name();
            let Some(key) = file_name.to_str().and_then(EnvKey::parse) else {
                continue;
            };
            let value = std::fs::read_to_string(entry.path()).map_err(|e| {
                JvmsecError::io(format!("reading {}", entry.path().display()), e)
            })?;
            env.set(key, value);
        }

        Ok(env)
    }
}
