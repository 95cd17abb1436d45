//! EnabledFlags - the persisted `plugins_enabled` table

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping of plugin id to its stored enabled flag.
///
/// Order is the document order of the config file; startup replays the
/// flags in that order. Setting an id that already exists updates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledFlags {
    entries: Vec<(String, bool)>,
}

impl EnabledFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, enabled)| *enabled)
    }

    pub fn set(&mut self, id: impl Into<String>, enabled: bool) {
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = enabled,
            None => self.entries.push((id, enabled)),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<bool> {
        let pos = self.entries.iter().position(|(existing, _)| existing == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(id, enabled)| (id.as_str(), *enabled))
    }

    /// Ids stored as `true`, in stored order
    pub fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, enabled)| *enabled).map(|(id, _)| id)
    }

    /// Overlay `other` onto `self`; ids present in `other` win
    pub fn merge(&mut self, other: EnabledFlags) {
        for (id, enabled) in other.entries {
            self.set(id, enabled);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for EnabledFlags {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut flags = Self::new();
        for (id, enabled) in iter {
            flags.set(id, enabled);
        }
        flags
    }
}

impl Serialize for EnabledFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, enabled) in &self.entries {
            map.serialize_entry(id, enabled)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EnabledFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagsVisitor;

        impl<'de> Visitor<'de> for FlagsVisitor {
            type Value = EnabledFlags;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of plugin ids to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut flags = EnabledFlags::new();
                while let Some((id, enabled)) = access.next_entry::<String, bool>()? {
                    flags.set(id, enabled);
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_map(FlagsVisitor)
    }
}
