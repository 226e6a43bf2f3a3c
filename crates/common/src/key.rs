//! Definition keys of the OpenAPI specification

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Key of a definition in the OpenAPI specification (e.g. `io.k8s.api.core.v1.Pod`)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the key, the type name (`Pod`)
    pub fn resource_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Key without its last segment (`io.k8s.api.core.v1`)
    pub fn container(&self) -> Key {
        match self.0.rfind('.') {
            Some(idx) => Key(self.0[..idx].to_string()),
            None => Key(String::new()),
        }
    }

    /// Go import path hint for the package holding this key
    ///
    /// The first two segments are swapped into a domain and the rest becomes
    /// the path, so `io.k8s.api.core.v1` gives `k8s.io/api/core/v1`. Keys with
    /// fewer than three segments are returned unchanged.
    pub fn go_import_prefix(&self) -> String {
        let parts: Vec<&str> = self.0.split('.').collect();
        if parts.len() < 3 {
            return self.0.clone();
        }
        format!("{}.{}/{}", parts[1], parts[0], parts[2..].join("/"))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}
