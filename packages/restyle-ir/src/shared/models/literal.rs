//! JS literal values used in variant conditions and enumerated prop types

use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A literal a prop can be compared against.
///
/// Numbers keep their source text so literals stay hashable and print back
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(NumberText),
    String(String),
}

/// Source text of a numeric literal (`1`, `0.5`)
///
/// Serialized as a number: only numbers deserialize into it, so an untagged
/// `Literal` sends strings on to its `String` case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumberText(pub String);

impl Serialize for NumberText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number = serde_json::Number::from_str(&self.0).map_err(|err| {
            ser::Error::custom(format!("`{}` is not a JSON number: {}", self.0, err))
        })?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NumberText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Number::deserialize(deserializer).map(|number| NumberText(number.to_string()))
    }
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        Literal::Number(NumberText(text.into()))
    }

    /// Fragment used when deriving style key names (`small` → `Small`)
    pub fn key_fragment(&self) -> String {
        match self {
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Number(n) => n.0.replace(['.', '-'], "_"),
            Literal::String(s) => crate::shared::utils::naming::to_pascal_case(s),
        }
    }

    /// Plain text of the value, without quotes
    pub fn as_text(&self) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            Literal::Number(n) => n.0.clone(),
            Literal::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Literal {
    /// JS source form: strings are double-quoted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n.0),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}
