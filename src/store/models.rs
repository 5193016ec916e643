//! Row types returned by the store

use rusqlite::types::{FromSql, FromSqlResult, ValueRef};
use std::fmt;

/// A reference column value as SQLite actually holds it
///
/// Reference columns are declared INTEGER, but in permissive mode any string
/// is accepted; SQLite's affinity rules then keep numeric strings as integers
/// and everything else as text.
#[derive(Debug, Clone, PartialEq)]
pub enum RefValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FromSql for RefValue {
    #[inline]
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(int) => Self::Integer(int),
            ValueRef::Real(real) => Self::Real(real),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Self::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        })
    }
}

impl fmt::Display for RefValue {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Null => f.write_str("None"),
            Self::Integer(int) => write!(f, "{int}"),
            Self::Real(real) => f.write_str(&format_real(real)),
            Self::Text(ref text) => f.write_str(text),
        }
    }
}

/// Shortest round-trip form of a float, switching to exponent notation
/// below 1e-4 or from 1e16 on, with a signed two-digit exponent (`1e+20`)
fn format_real(real: f64) -> String {
    if real.is_nan() {
        return "nan".to_owned();
    }
    if real.is_infinite() {
        return if real > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let scientific = format!("{real:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .map_or((scientific.as_str(), 0), |(mantissa, exponent)| {
            (mantissa, exponent.parse::<i32>().unwrap_or(0))
        });

    if (-4..16).contains(&exponent) {
        let fixed = format!("{real}");
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub teacher_id: RefValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub class_id: RefValue,
}

/// Id and name of a student matched by a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
}

/// One student of a class together with the class and teacher names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub student: String,
    pub class: String,
    pub teacher: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_value_display() {
        assert_eq!(RefValue::Null.to_string(), "None");
        assert_eq!(RefValue::Integer(7).to_string(), "7");
        assert_eq!(RefValue::Real(1.5).to_string(), "1.5");
        assert_eq!(RefValue::Text("abc".to_owned()).to_string(), "abc");
    }

    #[test]
    fn test_real_display_uses_exponent_at_extremes() {
        assert_eq!(RefValue::Real(1e20).to_string(), "1e+20");
        assert_eq!(RefValue::Real(-2.5e16).to_string(), "-2.5e+16");
        assert_eq!(RefValue::Real(1.5e-7).to_string(), "1.5e-07");
        assert_eq!(RefValue::Real(1e15).to_string(), "1000000000000000.0");
        assert_eq!(RefValue::Real(0.0001).to_string(), "0.0001");
        assert_eq!(RefValue::Real(2.0).to_string(), "2.0");
        assert_eq!(RefValue::Real(-0.0).to_string(), "-0.0");
    }
}
