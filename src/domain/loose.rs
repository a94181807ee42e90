use serde::{Deserialize, Serialize};

/// A wire scalar the server sends either as a JSON number or as a numeric
/// string (`"12.50"`, `"0"`). Coercion happens during normalisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loose {
    Number(serde_json::Number),
    Text(String),
}

impl Loose {
    /// Numeric value; blank or unparseable text coerces to 0.
    pub fn to_f64(&self) -> f64 {
        match self {
            Loose::Number(n) => n.as_f64().unwrap_or(0.0),
            Loose::Text(s) => parse_number(s),
        }
    }

    pub fn to_i64(&self) -> i64 {
        match self {
            Loose::Number(n) => n
                .as_i64()
                .unwrap_or_else(|| n.as_f64().map(|f| f as i64).unwrap_or(0)),
            Loose::Text(s) => parse_number(s) as i64,
        }
    }

    /// String form used for enumerated codes: `5`, `5.0` and `"5"` all give
    /// `"5"`.
    pub fn to_code(&self) -> String {
        match self {
            Loose::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 => (f as i64).to_string(),
                _ => n.to_string(),
            },
            Loose::Number(n) => n.to_string(),
            Loose::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for Loose {
    fn from(value: i64) -> Self {
        Loose::Number(value.into())
    }
}

impl From<&str> for Loose {
    fn from(value: &str) -> Self {
        Loose::Text(value.to_string())
    }
}

pub fn number_or_zero(value: Option<&Loose>) -> f64 {
    value.map(Loose::to_f64).unwrap_or(0.0)
}

pub fn integer_or_zero(value: Option<&Loose>) -> i64 {
    value.map(Loose::to_i64).unwrap_or(0)
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
