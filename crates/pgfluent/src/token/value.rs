//! Typed values carried by constant and prepared tokens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::fmt;
use uuid::Uuid;

use super::ident::write_literal;

/// A typed scalar value.
///
/// Constants render as SQL literals; prepared tokens bind the value and render
/// a placeholder instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// Whether this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text payload, if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Append the SQL literal form of this value to `out`.
    ///
    /// Numbers and booleans are unquoted. Everything else is single-quoted
    /// with embedded quotes doubled.
    pub fn write_sql(&self, out: &mut String) {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Value::Int(v) => out.push_str(&v.to_string()),
            Value::Float(v) => write_float(*v, out),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(v) => out.push_str(&v.to_string()),
            Value::Text(s) => write_literal(s, out),
            Value::Bytes(bytes) => {
                out.push_str("'\\x");
                for b in bytes {
                    out.push_str(&format!("{b:02x}"));
                }
                out.push('\'');
            }
            Value::Date(d) => write_literal(&d.to_string(), out),
            Value::Time(t) => write_literal(&t.to_string(), out),
            Value::Timestamp(ts) => write_literal(&ts.to_string(), out),
            Value::TimestampTz(ts) => write_literal(&ts.to_rfc3339(), out),
            Value::Uuid(u) => write_literal(&u.hyphenated().to_string(), out),
            Value::Json(v) => write_literal(&v.to_string(), out),
        }
    }
}

fn write_float(v: f64, out: &mut String) {
    if v.is_nan() {
        out.push_str("'NaN'");
    } else if v.is_infinite() {
        out.push_str(if v > 0.0 { "'Infinity'" } else { "'-Infinity'" });
    } else {
        // Debug keeps a fractional part (`2.0`), Display would print `2`.
        out.push_str(&format!("{v:?}"));
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_sql(&mut out);
        f.write_str(&out)
    }
}

macro_rules! value_from {
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

value_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f64 => Float,
    String => Text,
    Vec<u8> => Bytes,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => TimestampTz,
    Uuid => Uuid,
    serde_json::Value => Json,
}

#[cfg(feature = "rust_decimal")]
value_from! { rust_decimal::Decimal => Decimal }

/// Widened through the shortest decimal form, so `0.1f32` stays `0.1`.
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.to_string().parse().unwrap_or(f64::from(v)))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type};

    /// Largest magnitude an `f64` holds without rounding (2^53).
    const MAX_EXACT_FLOAT8: u64 = 1 << 53;

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql_checked(ty, out),
                Value::Int(v) => match *ty {
                    Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                    Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                    Type::FLOAT8 => {
                        if v.unsigned_abs() > MAX_EXACT_FLOAT8 {
                            return Err(format!("{v} is not exactly representable as float8").into());
                        }
                        (*v as f64).to_sql(ty, out)
                    }
                    _ => v.to_sql_checked(ty, out),
                },
                Value::Float(v) => match *ty {
                    Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                    _ => v.to_sql_checked(ty, out),
                },
                #[cfg(feature = "rust_decimal")]
                Value::Decimal(v) => v.to_sql_checked(ty, out),
                Value::Text(v) => v.to_sql_checked(ty, out),
                Value::Bytes(v) => v.to_sql_checked(ty, out),
                Value::Date(v) => v.to_sql_checked(ty, out),
                Value::Time(v) => v.to_sql_checked(ty, out),
                Value::Timestamp(v) => v.to_sql_checked(ty, out),
                Value::TimestampTz(v) => v.to_sql_checked(ty, out),
                Value::Uuid(v) => v.to_sql_checked(ty, out),
                Value::Json(v) => v.to_sql_checked(ty, out),
            }
        }

        // Each variant checks the concrete type itself.
        fn accepts(_ty: &Type) -> bool {
            true
        }

        tokio_postgres::types::to_sql_checked!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: impl Into<Value>) -> String {
        v.into().to_string()
    }

    #[test]
    fn numbers_render_unquoted() {
        assert_eq!(lit(20), "20");
        assert_eq!(lit(-7i64), "-7");
        assert_eq!(lit(0.4), "0.4");
        assert_eq!(lit(2.0), "2.0");
        assert_eq!(lit(f64::NAN), "'NaN'");
    }

    #[test]
    fn f32_keeps_its_written_precision() {
        assert_eq!(lit(0.1f32), "0.1");
        assert_eq!(lit(2.5f32), "2.5");
        assert_eq!(lit(1.0f32), "1.0");
        assert_eq!(lit(f32::INFINITY), "'Infinity'");
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn float8_rejects_inexact_integers() {
        use bytes::BytesMut;
        use tokio_postgres::types::{ToSql, Type};

        let mut out = BytesMut::new();
        assert!(Value::Int(1 << 53).to_sql(&Type::FLOAT8, &mut out).is_ok());
        assert!(Value::Int((1 << 53) + 1).to_sql(&Type::FLOAT8, &mut out).is_err());
        assert!(Value::Int(i64::MIN).to_sql(&Type::FLOAT8, &mut out).is_err());
    }

    #[test]
    fn text_is_single_quoted_with_doubling() {
        assert_eq!(lit("a string"), "'a string'");
        assert_eq!(lit("it's"), "'it''s'");
    }

    #[test]
    fn null_and_bool() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(lit(None::<i32>), "NULL");
        assert_eq!(lit(Some(true)), "true");
    }

    #[test]
    fn temporal_and_binary_values_are_quoted() {
        let date = NaiveDate::from_ymd_opt(2018, 3, 1).unwrap();
        assert_eq!(lit(date), "'2018-03-01'");
        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        assert_eq!(lit(time), "'10:30:00'");
        assert_eq!(lit(vec![0x0a_u8, 0xff]), "'\\x0aff'");
    }

    #[test]
    fn json_renders_compact_text() {
        let v = serde_json::json!({"a": 1});
        assert_eq!(lit(v), r#"'{"a":1}'"#);
    }
}
