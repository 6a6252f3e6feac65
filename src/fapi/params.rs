use rust_decimal::Decimal;
use std::fmt;

/// A single request parameter value.
///
/// Wire rendering goes through `Display`: booleans as `true`/`false`, numbers
/// in plain decimal notation, never scientific.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Num(f64),
    Bool(bool),
}

impl ParamValue {
    /// Boolean value when this parameter holds one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String value when this parameter holds one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Num(n) => write!(f, "{}", n),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Ordered parameter set for one request.
///
/// `set` replaces an existing key in place, keeping its original position, so
/// merging caller flags over a base set overrides values without disturbing
/// the serialization order. Identical inputs always render to byte-identical
/// wire pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Set a parameter, overriding any existing value for the key.
    pub fn set(&mut self, key: &str, value: impl Into<ParamValue>) {
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.0.push((key.to_string(), value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Overlay another parameter set; its entries win on key collisions.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.set(key, value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.0.iter()
    }

    /// Render every parameter to its exact request string.
    pub fn to_wire(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// Borrow rendered wire pairs in the form the transport takes.
pub fn as_query(wire: &[(String, String)]) -> Vec<(&str, &str)> {
    wire.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Price argument accepted by order operations.
///
/// `Raw` strings pass through untouched; `Numeric` values are rendered once
/// at the boundary as fixed-point strings with exactly 8 fractional digits.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    Raw(String),
    Numeric(f64),
}

impl PriceInput {
    /// Canonical decimal-string form of this price.
    pub fn normalize(&self) -> String {
        match self {
            Self::Raw(s) => s.clone(),
            Self::Numeric(v) => format!("{:.8}", v),
        }
    }
}

impl From<f64> for PriceInput {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<&str> for PriceInput {
    fn from(v: &str) -> Self {
        Self::Raw(v.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(v: String) -> Self {
        Self::Raw(v)
    }
}

impl From<Decimal> for PriceInput {
    fn from(v: Decimal) -> Self {
        Self::Raw(format!("{:.8}", v))
    }
}
