//! Routine-keyed maps that refuse repeated keys on load.
//!
//! Both JSON and YAML parsers hand every entry of an object to the visitor,
//! so a plain `BTreeMap` silently keeps the last copy of a repeated routine.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

struct RoutineMapVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for RoutineMapVisitor<V> {
    type Value = BTreeMap<String, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map keyed by routine name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut routines = BTreeMap::new();
        while let Some(routine) = access.next_key::<String>()? {
            if routines.contains_key(&routine) {
                return Err(de::Error::custom(format!(
                    "routine {} appears more than once",
                    routine
                )));
            }
            let value = access.next_value::<V>()?;
            routines.insert(routine, value);
        }
        Ok(routines)
    }
}

/// Deserialize a routine-keyed map, failing on the first repeated routine
///
/// Usable with `#[serde(deserialize_with = "...")]`.
///
/// # Errors
///
/// Returns the deserializer's error if the input is not a map, a value is
/// malformed, or a routine name occurs twice.
pub fn deserialize_routine_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_map(RoutineMapVisitor {
        marker: PhantomData,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_routine_map")]
        routines: BTreeMap<String, u32>,
    }

    #[test]
    fn test_distinct_routines_load() {
        let holder: Holder = serde_json::from_str(r#"{"routines":{"b":2,"a":1}}"#).unwrap();
        assert_eq!(holder.routines.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_repeated_routine_is_rejected() {
        let err = serde_json::from_str::<Holder>(r#"{"routines":{"f":1,"f":2}}"#).unwrap_err();
        assert!(err.to_string().contains("routine f appears more than once"));
    }
}
