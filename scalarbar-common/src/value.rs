#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A value annotated by a color source.
///
/// Annotated values are usually numbers, but categorical tables may annotate
/// arbitrary strings. Strings that parse as numbers can still be positioned on a
/// continuous bar.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotatedValue {
    Number(f64),
    Text(String),
}

impl AnnotatedValue {
    /// Numeric interpretation of the value, if it has one
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            AnnotatedValue::Number(v) => Some(*v),
            AnnotatedValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl Display for AnnotatedValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotatedValue::Number(v) => write!(f, "{v}"),
            AnnotatedValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for AnnotatedValue {
    fn from(value: f64) -> Self {
        AnnotatedValue::Number(value)
    }
}

impl From<&str> for AnnotatedValue {
    fn from(value: &str) -> Self {
        AnnotatedValue::Text(value.to_string())
    }
}

impl From<String> for AnnotatedValue {
    fn from(value: String) -> Self {
        AnnotatedValue::Text(value)
    }
}

/// A value paired with the label text drawn next to it
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub value: AnnotatedValue,
    pub label: String,
}

impl Annotation {
    pub fn new(value: impl Into<AnnotatedValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}
