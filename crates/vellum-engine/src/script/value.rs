use crate::scene::Handle;

/// A dynamically-typed value crossing the script/native boundary.
///
/// Coercion helpers are deliberately lenient, matching the semantics of a
/// dynamically-typed caller: a missing or mistyped numeric argument reads
/// as zero, a missing byte string as empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Int(i64),
    Num(f64),
    Bytes(Vec<u8>),
    Handle(Handle),
}

impl Value {
    /// Integer coercion: numbers truncate, everything non-numeric is 0.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int(v) => *v,
            Value::Num(v) => *v as i64,
            _ => 0,
        }
    }

    /// Float coercion: non-numeric values read as 0.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Num(v) => *v,
            _ => 0.0,
        }
    }

    /// Byte-string coercion: non-bytes values read as empty.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Bytes(bytes) => bytes,
            _ => &[],
        }
    }

    #[inline]
    pub fn as_handle(&self) -> Option<Handle> {
        match self {
            Value::Handle(handle) => Some(*handle),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Num(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Bytes(v.as_bytes().to_vec())
    }
}

impl From<Handle> for Value {
    fn from(v: Handle) -> Value {
        Value::Handle(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercions_are_lenient() {
        assert_eq!(Value::Nil.as_i64(), 0);
        assert_eq!(Value::Num(3.9).as_i64(), 3);
        assert_eq!(Value::Int(7).as_f64(), 7.0);
        assert_eq!(Value::from("x").as_i64(), 0);
    }

    #[test]
    fn byte_coercion_defaults_to_empty() {
        assert_eq!(Value::Nil.as_bytes(), &[] as &[u8]);
        assert_eq!(Value::from("ab").as_bytes(), b"ab");
    }
}
