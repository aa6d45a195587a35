//! Typed tag values
//!
//! Every value carries its own data type, decided where the flattener
//! produces it, so auto-created tags never need to guess.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse data type of a tag in the target database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagDataType {
    Boolean,
    Int8,
    Float8,
    String,
    DateTime,
}

impl TagDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int8 => "Int8",
            Self::Float8 => "Float8",
            Self::String => "String",
            Self::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for TagDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagDataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Boolean" => Ok(Self::Boolean),
            "Int8" => Ok(Self::Int8),
            "Float8" => Ok(Self::Float8),
            "String" => Ok(Self::String),
            "DateTime" => Ok(Self::DateTime),
            other => Err(format!("unknown tag data type '{}'", other)),
        }
    }
}

/// A value to be written into a tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum TagValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
}

impl TagValue {
    pub fn data_type(&self) -> TagDataType {
        match self {
            Self::Boolean(_) => TagDataType::Boolean,
            Self::Integer(_) => TagDataType::Int8,
            Self::Float(_) => TagDataType::Float8,
            Self::String(_) => TagDataType::String,
            Self::DateTime(_) => TagDataType::DateTime,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<bool> for TagValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for TagValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for TagValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for TagValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for TagValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for TagValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for TagValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}
