//! Normalization of Rust values into bindable query parameters.
//!
//! Every field a record exposes goes through [`ToValue`] before it reaches the
//! query. Normalization decides two things at once: the wire-independent form
//! of the value ([`Value`]) and whether it is present at all. `None`, nested
//! `Some(None)` and anything else that normalizes to [`Value::Null`] counts as
//! "not provided".

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use uuid::Uuid;

/// A normalized parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value. Never bound by the UPDATE compiler.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    NaiveTimestamp(NaiveDateTime),
    Date(NaiveDate),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// Check if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the variant, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamptz",
            Self::NaiveTimestamp(_) => "timestamp",
            Self::Date(_) => "date",
            Self::Uuid(_) => "uuid",
            Self::Json(_) => "json",
        }
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    bool => Bool,
    i32 => Int,
    i64 => Int,
    f64 => Float,
    String => Text,
    &str => Text,
    Vec<u8> => Bytes,
    DateTime<Utc> => Timestamp,
    NaiveDateTime => NaiveTimestamp,
    NaiveDate => Date,
    Uuid => Uuid,
    serde_json::Value => Json,
}

/// Error raised when a value cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValueError {
    message: String,
}

impl ValueError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Conversion of a field value into a [`Value`].
///
/// Return `Ok(Value::Null)` for "not provided". Return an error when the value
/// has no faithful bindable representation (e.g. a `u64` above `i64::MAX`).
pub trait ToValue {
    fn to_value(&self) -> Result<Value, ValueError>;
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value, ValueError> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Result<Value, ValueError> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Result<Value, ValueError> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Result<Value, ValueError> {
        (**self).to_value()
    }
}

macro_rules! impl_lossless_int {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Result<Value, ValueError> {
                    Ok(Value::Int(i64::from(*self)))
                }
            }
        )*
    };
}

impl_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_checked_int {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Result<Value, ValueError> {
                    i64::try_from(*self).map(Value::Int).map_err(|_| {
                        ValueError::new(format!(
                            "{} value {} does not fit in a signed 64-bit integer",
                            stringify!($ty),
                            self
                        ))
                    })
                }
            }
        )*
    };
}

impl_checked_int!(u64, usize, isize, i128, u128);

impl ToValue for f32 {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Float(f64::from(*self)))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Float(*self))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Bool(*self))
    }
}

impl ToValue for str {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Text(self.to_string()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Text(self.clone()))
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Text(self.to_string()))
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Bytes(self.to_vec()))
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Bytes(self.clone()))
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Timestamp(*self))
    }
}

impl ToValue for DateTime<FixedOffset> {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Timestamp(self.with_timezone(&Utc)))
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::NaiveTimestamp(*self))
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Date(*self))
    }
}

impl ToValue for Uuid {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Uuid(*self))
    }
}

// A JSON `null` is a provided value, not an absent one.
impl ToValue for serde_json::Value {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Json(self.clone()))
    }
}

/// Wrapper that binds any `Serialize` type as a JSON parameter.
///
/// ```ignore
/// #[derive(UpdateRecord)]
/// struct SettingsPatch {
///     #[sql(column = "user_id")]
///     user_id: i64,
///     #[sql(column = "prefs")]
///     prefs: Option<Json<Prefs>>,
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> ToValue for Json<T> {
    fn to_value(&self) -> Result<Value, ValueError> {
        serde_json::to_value(&self.0)
            .map(Value::Json)
            .map_err(|e| ValueError::new(format!("failed to serialize JSON value: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn option_none_is_null() {
        let v: Option<String> = None;
        assert_eq!(v.to_value().unwrap(), Value::Null);
    }

    #[test]
    fn nested_option_none_is_null() {
        let v: Option<Option<i32>> = Some(None);
        assert_eq!(v.to_value().unwrap(), Value::Null);
    }

    #[test]
    fn ints_widen_to_i64() {
        assert_eq!(7_i16.to_value().unwrap(), Value::Int(7));
        assert_eq!(u32::MAX.to_value().unwrap(), Value::Int(4_294_967_295));
    }

    #[test]
    fn u64_above_i64_max_fails() {
        let err = u64::MAX.to_value().unwrap_err();
        assert!(err.message().contains("does not fit"));
        assert_eq!((i64::MAX as u64).to_value().unwrap(), Value::Int(i64::MAX));
    }

    #[test]
    fn references_and_smart_pointers_delegate() {
        let s = String::from("Ann");
        assert_eq!((&s).to_value().unwrap(), Value::Text("Ann".into()));
        assert_eq!(Box::new(3_u8).to_value().unwrap(), Value::Int(3));
        assert_eq!(Arc::new(true).to_value().unwrap(), Value::Bool(true));
        assert_eq!("x".to_value().unwrap(), Value::Text("x".into()));
    }

    #[test]
    fn fixed_offset_timestamps_are_utc() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap();
        let Value::Timestamp(utc) = ts.to_value().unwrap() else {
            panic!("expected timestamp");
        };
        assert_eq!(utc.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn json_null_is_present() {
        let v = serde_json::Value::Null;
        assert_eq!(v.to_value().unwrap(), Value::Json(serde_json::Value::Null));
    }

    #[test]
    fn json_wrapper_serializes() {
        let mut prefs = BTreeMap::new();
        prefs.insert("theme", "dark");
        let v = Json(prefs).to_value().unwrap();
        assert_eq!(v, Value::Json(serde_json::json!({"theme": "dark"})));
    }

    #[test]
    fn json_wrapper_reports_serialize_failure() {
        // Non-string map keys cannot be represented in JSON.
        let mut bad = BTreeMap::new();
        bad.insert((1, 2), "pair");
        let err = Json(bad).to_value().unwrap_err();
        assert!(err.message().starts_with("failed to serialize JSON value"));
    }
}
