// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity keys for jobs and triggers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Group used when a document leaves the group out
pub const DEFAULT_GROUP: &str = "DEFAULT";

/// Group wildcard accepted by the group delete commands
pub const ALL_GROUPS: &str = "*";

/// A `(name, group)` identity pair.
///
/// Two keys are equal only when both fields match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key {
    pub name: String,
    pub group: String,
}

impl Key {
    pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
        }
    }

    /// Key in the default group
    pub fn in_default_group(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_GROUP)
    }

    /// `group.name`, used to associate triggers with the job they fire
    pub fn fully_qualified_name(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.name)
    }
}

macro_rules! key_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Key);

        impl $name {
            pub fn new(name: impl Into<String>, group: impl Into<String>) -> Self {
                Self(Key::new(name, group))
            }

            pub fn name(&self) -> &str {
                &self.0.name
            }

            pub fn group(&self) -> &str {
                &self.0.group
            }

            pub fn fully_qualified_name(&self) -> String {
                self.0.fully_qualified_name()
            }
        }

        impl From<Key> for $name {
            fn from(key: Key) -> Self {
                Self(key)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

key_newtype!(
    /// Identity of a job in the scheduler namespace
    JobKey
);
key_newtype!(
    /// Identity of a trigger in the scheduler namespace
    TriggerKey
);

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
