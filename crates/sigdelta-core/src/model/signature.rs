use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::errors::{Result, SigDeltaError};
use crate::model::parameter::{Parameter, ParameterKey, TypeExpr, RETURN_KEY};

/// A routine's return type plus its ordered parameter list
///
/// Base names are unique within a signature. Equality is structural: same
/// return type, same parameters (name, marker, type) in the same order.
///
/// Persisted as an ordered map where key `0` is the return type and every
/// other entry is a parameter, in positional order:
///
/// ```json
/// {"0": "mixed", "value": "int", "flags=": "int"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    return_type: TypeExpr,
    params: Vec<Parameter>,
}

impl Signature {
    /// Create a signature with no parameters
    pub fn new(return_type: impl Into<TypeExpr>) -> Self {
        Self {
            return_type: return_type.into(),
            params: Vec::new(),
        }
    }

    /// Build a signature from persisted `(key, type)` entries
    ///
    /// The return slot may appear anywhere; parameter order is entry order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSignature` if the return slot is missing or repeated,
    /// a key is malformed, or two parameters share a base name.
    pub fn from_entries<I, K, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: Into<TypeExpr>,
    {
        let mut return_type: Option<TypeExpr> = None;
        let mut params: Vec<Parameter> = Vec::new();

        for (raw_key, type_expr) in entries {
            match ParameterKey::parse(raw_key.as_ref())? {
                ParameterKey::Return => {
                    if return_type.is_some() {
                        return Err(SigDeltaError::InvalidSignature {
                            reason: "return slot appears more than once".to_string(),
                        });
                    }
                    return_type = Some(type_expr.into());
                }
                ParameterKey::Named { name, optional } => {
                    push_unique(&mut params, Parameter::new(name, optional, type_expr))?;
                }
            }
        }

        let return_type = return_type.ok_or_else(|| SigDeltaError::InvalidSignature {
            reason: format!("return slot '{}' is missing", RETURN_KEY),
        })?;

        Ok(Self {
            return_type,
            params,
        })
    }

    /// Append a parameter given its persisted key (`name` or `name=`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidSignature` for the return key, a malformed key, or a
    /// base name that is already present.
    pub fn with_param(mut self, key: &str, type_expr: impl Into<TypeExpr>) -> Result<Self> {
        match ParameterKey::parse(key)? {
            ParameterKey::Return => Err(SigDeltaError::InvalidSignature {
                reason: "return slot cannot be added as a parameter".to_string(),
            }),
            ParameterKey::Named { name, optional } => {
                push_unique(&mut self.params, Parameter::new(name, optional, type_expr))?;
                Ok(self)
            }
        }
    }

    pub fn return_type(&self) -> &TypeExpr {
        &self.return_type
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Look up a parameter by base name, ignoring the optionality marker
    pub fn param(&self, base_name: &str) -> Option<(usize, &Parameter)> {
        self.params
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == base_name)
    }

    /// Persisted entries, return slot first
    pub fn entries(&self) -> impl Iterator<Item = (ParameterKey, &TypeExpr)> {
        std::iter::once((ParameterKey::Return, &self.return_type))
            .chain(self.params.iter().map(|p| (p.key(), &p.type_expr)))
    }
}

/// Render a routine's presence on one side of a transition for diagnostics
pub(crate) fn describe_presence(signature: Option<&Signature>) -> String {
    match signature {
        Some(sig) => format!("present as {}", sig),
        None => "absent".to_string(),
    }
}

fn push_unique(params: &mut Vec<Parameter>, param: Parameter) -> Result<()> {
    if params.iter().any(|p| p.name == param.name) {
        return Err(SigDeltaError::InvalidSignature {
            reason: format!("parameter '{}' appears more than once", param.name),
        });
    }
    params.push(param);
    Ok(())
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, "): {}", self.return_type)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len() + 1))?;
        for (key, type_expr) in self.entries() {
            map.serialize_entry(&key.to_string(), type_expr.as_str())?;
        }
        map.end()
    }
}

struct SignatureVisitor;

impl<'de> Visitor<'de> for SignatureVisitor {
    type Value = Signature;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of parameter names to type expressions with return slot \"0\"")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Signature, A::Error> {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, type_expr)) = access.next_entry::<KeyRepr, String>()? {
            entries.push((key.0, type_expr));
        }
        Signature::from_entries(entries).map_err(de::Error::custom)
    }
}

/// Map key accepting both `"0"` and a bare integer `0` (YAML writes it unquoted)
struct KeyRepr(String);

impl<'de> Deserialize<'de> for KeyRepr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = KeyRepr;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a parameter name or the return slot 0")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<KeyRepr, E> {
                Ok(KeyRepr(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<KeyRepr, E> {
                Ok(KeyRepr(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<KeyRepr, E> {
                Ok(KeyRepr(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SignatureVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(entries: &[(&str, &str)]) -> Signature {
        Signature::from_entries(entries.iter().copied()).unwrap()
    }

    #[test]
    fn test_from_entries_keeps_positional_order() {
        let s = sig(&[("0", "mixed"), ("b", "int"), ("a=", "string")]);
        let names: Vec<&str> = s.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert!(s.params()[1].optional);
        assert_eq!(s.return_type().as_str(), "mixed");
    }

    #[test]
    fn test_return_slot_may_appear_anywhere() {
        let a = sig(&[("x", "int"), ("0", "void")]);
        let b = sig(&[("0", "void"), ("x", "int")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_or_repeated_return_is_rejected() {
        assert!(Signature::from_entries([("x", "int")]).is_err());
        assert!(Signature::from_entries([("0", "int"), ("0", "string")]).is_err());
    }

    #[test]
    fn test_duplicate_base_name_is_rejected() {
        let result = Signature::from_entries([("0", "void"), ("status", "int"), ("status=", "int")]);
        assert!(matches!(
            result,
            Err(SigDeltaError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = sig(&[("0", "void"), ("a", "int"), ("b", "int")]);
        let b = sig(&[("0", "void"), ("b", "int"), ("a", "int")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_is_marker_sensitive() {
        let a = sig(&[("0", "mixed"), ("status", "int|string")]);
        let b = sig(&[("0", "mixed"), ("status=", "int|string")]);
        assert_ne!(a, b);
        assert_eq!(a.param("status").map(|(i, _)| i), Some(0));
        assert_eq!(b.param("status").map(|(i, _)| i), Some(0));
    }

    #[test]
    fn test_with_param_builder() {
        let s = Signature::new("bool")
            .with_param("haystack", "string")
            .unwrap()
            .with_param("offset=", "int")
            .unwrap();
        assert_eq!(s.to_string(), "(haystack: string, offset=: int): bool");
        assert!(Signature::new("bool").with_param("0", "int").is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let json = r#"{"0":"string|false","subject":"string","limit=":"int","flags=":"int"}"#;
        let s: Signature = serde_json::from_str(json).unwrap();
        assert_eq!(s.params()[0].name, "subject");
        assert_eq!(s.params()[2].name, "flags");
        assert_eq!(serde_json::to_string(&s).unwrap(), json);
    }

    #[test]
    fn test_json_rejects_missing_return() {
        let result: std::result::Result<Signature, _> = serde_json::from_str(r#"{"x":"int"}"#);
        assert!(result.is_err());
    }
}
