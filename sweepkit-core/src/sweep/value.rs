//! Concrete hyperparameter values and assignments.

use crate::error::ExtensionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single hyperparameter value chosen by the search process.
///
/// `Auto` asks the trainer to keep its library default and serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Auto,
}

impl ParamValue {
    /// Parse a command-line style literal: `true`/`false`, integers, floats,
    /// `auto` (or `<Auto>`), anything else is text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("auto") || trimmed == "<Auto>" {
            return Self::Auto;
        }
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(trimmed.to_string())
    }

    /// Numeric view; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view; floats are accepted only when they carry no fraction.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Equality that treats `Int(1)` and `Float(1.0)` as the same value.
    pub fn matches(&self, other: &ParamValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0),
            _ => self == other,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Auto => write!(f, "<Auto>"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// A concrete assignment of hyperparameter values, keyed by name.
///
/// Iteration order is the lexical order of names so that every consumer
/// (options builders, pipeline nodes) sees the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperparams {
    values: BTreeMap<String, ParamValue>,
}

impl Hyperparams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from name/value pairs. A name given twice is rejected.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ExtensionError>
    where
        I: IntoIterator<Item = (K, ParamValue)>,
        K: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.insert(name, value)?;
        }
        Ok(params)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: ParamValue,
    ) -> Result<(), ExtensionError> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(ExtensionError::DuplicateHyperparameter { name });
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Builder-style insert that overwrites an existing value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> IntoIterator for &'a Hyperparams {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(ParamValue::parse("true"), ParamValue::Bool(true));
        assert_eq!(ParamValue::parse("42"), ParamValue::Int(42));
        assert_eq!(ParamValue::parse("0.25"), ParamValue::Float(0.25));
        assert_eq!(ParamValue::parse("1e-5"), ParamValue::Float(1e-5));
        assert_eq!(ParamValue::parse("auto"), ParamValue::Auto);
        assert_eq!(ParamValue::parse("<Auto>"), ParamValue::Auto);
        assert_eq!(
            ParamValue::parse("HingeLoss"),
            ParamValue::Text("HingeLoss".into())
        );
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(ParamValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ParamValue::Float(20.0).as_i64(), Some(20));
        assert_eq!(ParamValue::Float(2.5).as_i64(), None);
        assert_eq!(ParamValue::Bool(true).as_f64(), None);
        assert!(ParamValue::Int(1).matches(&ParamValue::Float(1.0)));
        assert!(!ParamValue::Int(1).matches(&ParamValue::Float(0.1)));
    }

    #[test]
    fn test_auto_serializes_as_null() {
        let json = serde_json::to_string(&ParamValue::Auto).unwrap();
        assert_eq!(json, "null");
        let back: ParamValue = serde_json::from_str("null").unwrap();
        assert_eq!(back, ParamValue::Auto);
        let int: ParamValue = serde_json::from_str("10").unwrap();
        assert_eq!(int, ParamValue::Int(10));
        let float: ParamValue = serde_json::from_str("0.5").unwrap();
        assert_eq!(float, ParamValue::Float(0.5));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Hyperparams::from_pairs([
            ("NumberOfTrees", ParamValue::Int(20)),
            ("NumberOfTrees", ParamValue::Int(100)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ExtensionError::DuplicateHyperparameter {
                name: "NumberOfTrees".into()
            }
        );
    }

    #[test]
    fn test_iteration_is_sorted() {
        let params = Hyperparams::new()
            .with("Shuffle", true)
            .with("L2Regularization", 1e-6)
            .with("NumberOfIterations", 10i64);
        let names: Vec<_> = params.names().collect();
        assert_eq!(
            names,
            vec!["L2Regularization", "NumberOfIterations", "Shuffle"]
        );
    }
}
