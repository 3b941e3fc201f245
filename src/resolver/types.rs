//! Statement Parameter Types
//!
//! 구문 바인딩 파라미터 타입 정의

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Value - 바인딩 값
// ============================================================================

/// 구문에 바인딩되는 파라미터 값
///
/// 라우터는 값을 해석하지 않고 데이터 소스와 훅에 그대로 전달합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null
    Null,
    /// Boolean
    Boolean(bool),
    /// Integer (i64)
    Integer(i64),
    /// Float (f64)
    Float(f64),
    /// String
    String(String),
    /// Bytes
    Bytes(Vec<u8>),
    /// List
    List(Vec<Value>),
}

impl Value {
    /// String으로 변환
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "'{}'", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::List(l) => write!(f, "[{} items]", l.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
        assert_eq!(Value::from(7), Value::Integer(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Boolean(true));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from("abc").as_str(), Some("abc"));
        assert_eq!(Value::from(3i64).as_str(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("a").to_string(), "'a'");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bytes(vec![1, 2]).to_string(), "<2 bytes>");
    }

    #[test]
    fn test_params_macro() {
        let empty: Vec<Value> = crate::params![];
        assert!(empty.is_empty());

        let params = crate::params!["x", 1, true];
        assert_eq!(
            params,
            vec![Value::from("x"), Value::Integer(1), Value::Boolean(true)]
        );
    }
}
