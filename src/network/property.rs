//! Pass-through attribute values for nodes and edges
//!
//! Dataset columns the analysis does not interpret (phase, status, dates,
//! funding amount, strength, ...) are carried on the graph as typed values
//! inferred from the raw CSV cell.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute value inferred from a tabular cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
}

impl PropertyValue {
    /// Infer a value from a raw cell: empty → Null, then integer, float,
    /// boolean (`true`/`false`, any case), and finally a plain string.
    pub fn from_cell(raw: &str) -> Self {
        let cell = raw.trim();
        if cell.is_empty() {
            return PropertyValue::Null;
        }
        if let Ok(i) = cell.parse::<i64>() {
            return PropertyValue::Integer(i);
        }
        if let Ok(f) = cell.parse::<f64>() {
            if f.is_finite() {
                return PropertyValue::Float(f);
            }
        }
        match cell.to_ascii_lowercase().as_str() {
            "true" => PropertyValue::Boolean(true),
            "false" => PropertyValue::Boolean(false),
            _ => PropertyValue::String(cell.to_string()),
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: integers widen to floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Null => Ok(()),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Ordered attribute map; keeps the column order of the source table
pub type PropertyMap = IndexMap<String, PropertyValue>;
