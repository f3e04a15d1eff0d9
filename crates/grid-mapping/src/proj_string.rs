//! PROJ proj-string assembly.
//!
//! A proj-string is `+proj=<id>` followed by ` +key=value` terms. PROJ
//! accepts terms in any order; terms are written in insertion order so the
//! output is stable for a given input.

use crate::angular::encode_proj_angle;
use crate::error::{GridMappingError, GridMappingResult};
use cf_common::{Data, Number};

/// Prefix of the projection term.
pub const PROJ_PREFIX: &str = "+proj";

/// A value that can appear on the right of a proj-string term.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjValue {
    /// A plain number, written as is
    Number(Number),
    /// A bare word such as an ellipsoid or axis name
    Text(String),
    /// An angle, written in PROJ angular notation
    Angle(Data),
}

impl ProjValue {
    /// Render the value for the term `key`.
    fn render(&self, key: &str) -> GridMappingResult<String> {
        let non_representable = |reason: String| GridMappingError::NonRepresentable {
            key: key.to_string(),
            reason,
        };

        match self {
            ProjValue::Number(n) => {
                if n.as_f64().is_finite() {
                    Ok(n.to_string())
                } else {
                    Err(non_representable(format!("{} is not finite", n)))
                }
            }
            ProjValue::Text(text) => {
                if text.is_empty() {
                    Err(non_representable("empty value".to_string()))
                } else if text.chars().any(|c| c.is_whitespace() || c == '+') {
                    Err(non_representable(format!(
                        "'{}' contains whitespace or '+'",
                        text
                    )))
                } else {
                    Ok(text.clone())
                }
            }
            ProjValue::Angle(data) => {
                encode_proj_angle(data).map_err(|e| non_representable(e.to_string()))
            }
        }
    }
}

impl From<Number> for ProjValue {
    fn from(n: Number) -> Self {
        ProjValue::Number(n)
    }
}

impl From<f64> for ProjValue {
    fn from(v: f64) -> Self {
        ProjValue::Number(Number::Float(v))
    }
}

impl From<i64> for ProjValue {
    fn from(v: i64) -> Self {
        ProjValue::Number(Number::Int(v))
    }
}

impl From<&str> for ProjValue {
    fn from(s: &str) -> Self {
        ProjValue::Text(s.to_string())
    }
}

impl From<String> for ProjValue {
    fn from(s: String) -> Self {
        ProjValue::Text(s)
    }
}

impl From<Data> for ProjValue {
    fn from(data: Data) -> Self {
        ProjValue::Angle(data)
    }
}

/// Form the ` +key=value` tail of a proj-string from ordered terms.
///
/// Fails without producing partial output if any value cannot be rendered.
pub fn make_proj_string_comp<'a, I>(terms: I) -> GridMappingResult<String>
where
    I: IntoIterator<Item = (&'a str, &'a ProjValue)>,
{
    let mut tail = String::new();
    for (key, value) in terms {
        if key.is_empty() || key.chars().any(|c| c.is_whitespace() || c == '=' || c == '+') {
            return Err(GridMappingError::NonRepresentable {
                key: key.to_string(),
                reason: "invalid key".to_string(),
            });
        }
        let rendered = value.render(key)?;
        tail.push_str(" +");
        tail.push_str(key);
        tail.push('=');
        tail.push_str(&rendered);
    }
    Ok(tail)
}

/// Ordered builder for a complete proj-string.
#[derive(Debug, Clone)]
pub struct ProjStringBuilder {
    proj_id: String,
    terms: Vec<(String, ProjValue)>,
}

impl ProjStringBuilder {
    pub fn new(proj_id: impl Into<String>) -> Self {
        Self {
            proj_id: proj_id.into(),
            terms: Vec::new(),
        }
    }

    /// Append a term.
    pub fn term(mut self, key: impl Into<String>, value: impl Into<ProjValue>) -> Self {
        self.terms.push((key.into(), value.into()));
        self
    }

    /// Append a term in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ProjValue>) {
        self.terms.push((key.into(), value.into()));
    }

    pub fn build(&self) -> GridMappingResult<String> {
        let tail = make_proj_string_comp(self.terms.iter().map(|(k, v)| (k.as_str(), v)))?;
        Ok(format!("{}={}{}", PROJ_PREFIX, self.proj_id, tail))
    }
}
