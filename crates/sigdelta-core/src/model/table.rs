use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::model::routine_map::deserialize_routine_map;
use crate::model::signature::Signature;

/// Every known routine's signature at one version
///
/// Keyed by routine name (exact match, e.g. `strlen` or
/// `DateTime::format`). Iteration order is by name, so serialized tables
/// are deterministic. Loading a table that names a routine twice fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SignatureTable {
    routines: BTreeMap<String, Signature>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a routine's signature, returning the previous one
    pub fn insert(&mut self, routine: impl Into<String>, signature: Signature) -> Option<Signature> {
        self.routines.insert(routine.into(), signature)
    }

    /// Remove a routine, returning its signature
    pub fn remove(&mut self, routine: &str) -> Option<Signature> {
        self.routines.remove(routine)
    }

    pub fn get(&self, routine: &str) -> Option<&Signature> {
        self.routines.get(routine)
    }

    pub fn contains(&self, routine: &str) -> bool {
        self.routines.contains_key(routine)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Signature)> {
        self.routines.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routines.keys().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for SignatureTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Self {
            routines: deserialize_routine_map(deserializer)?,
        })
    }
}

impl<K: Into<String>> FromIterator<(K, Signature)> for SignatureTable {
    fn from_iter<I: IntoIterator<Item = (K, Signature)>>(iter: I) -> Self {
        Self {
            routines: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SignatureTable {
    type Item = (&'a String, &'a Signature);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.routines.iter()
    }
}
