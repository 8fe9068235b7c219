//! Cell values produced by column accessors.

use std::cmp::Ordering;
use std::fmt;

/// A single cell value as seen by the sort comparator.
///
/// Accessors return one of these so that numbers sort numerically and text
/// sorts lexicographically, whatever the display string looks like.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Integer(_) | Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total ordering used for sorting.
    ///
    /// Empty values come first, then numbers (integers and floats compared
    /// against each other), then text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Integer(a), Self::Number(b)) => compare_integer_to_float(*a, *b),
            (Self::Number(a), Self::Integer(b)) => compare_integer_to_float(*b, *a).reverse(),
            // `==` first so that -0.0 and 0.0 tie, as they do against Integer(0).
            (Self::Number(a), Self::Number(b)) if a == b => Ordering::Equal,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Convert a JSON value picked out of a serialized row.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Text(b.to_string()),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Number))
                .unwrap_or(Self::Empty),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Exact `a` vs `b`, without rounding `a` through `f64`.
///
/// NaNs sit where `f64::total_cmp` puts them: negative below every integer,
/// positive above.
fn compare_integer_to_float(a: i64, b: f64) -> Ordering {
    // 2^63: the smallest float above every i64.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return if b.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if b >= BOUND {
        return Ordering::Less;
    }
    if b < -BOUND {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    a.cmp(&(whole as i64)).then_with(|| whole.total_cmp(&b))
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(CellValue::Integer(9).compare(&CellValue::Integer(10)), Ordering::Less);
        assert_eq!(CellValue::Integer(2).compare(&CellValue::Number(1.5)), Ordering::Greater);
        assert_eq!(CellValue::Number(2.0).compare(&CellValue::Integer(2)), Ordering::Equal);
    }

    #[test]
    fn test_large_integers_compare_exactly() {
        let two_53 = 1i64 << 53;
        let a = CellValue::Integer(two_53);
        let b = CellValue::Number(two_53 as f64);
        let c = CellValue::Integer(two_53 + 1);
        assert_eq!(a.compare(&b), Ordering::Equal);
        assert_eq!(b.compare(&c), Ordering::Less);
        assert_eq!(c.compare(&b), Ordering::Greater);
        assert_eq!(a.compare(&c), Ordering::Less);

        let past_max = CellValue::Number(9_223_372_036_854_775_808.0);
        assert_eq!(CellValue::Integer(i64::MAX).compare(&past_max), Ordering::Less);
        assert_eq!(
            CellValue::Integer(i64::MIN).compare(&CellValue::Number(i64::MIN as f64)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_fractions_and_special_floats() {
        assert_eq!(CellValue::Integer(-1).compare(&CellValue::Number(-0.5)), Ordering::Less);
        assert_eq!(CellValue::Integer(0).compare(&CellValue::Number(-0.5)), Ordering::Greater);
        assert_eq!(CellValue::Number(-0.0).compare(&CellValue::Number(0.0)), Ordering::Equal);
        assert_eq!(CellValue::Integer(0).compare(&CellValue::Number(-0.0)), Ordering::Equal);
        assert_eq!(
            CellValue::Integer(i64::MAX).compare(&CellValue::Number(f64::NAN)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Integer(i64::MIN).compare(&CellValue::Number(-f64::NAN)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sorting_mixed_numbers_is_consistent() {
        let two_53 = 1i64 << 53;
        let mut values = vec![
            CellValue::Integer(two_53 + 1),
            CellValue::Number(two_53 as f64),
            CellValue::Integer(two_53),
            CellValue::Number(f64::INFINITY),
            CellValue::Integer(-3),
            CellValue::Number(-2.5),
        ];
        values.sort_by(|a, b| a.compare(b));
        for pair in values.windows(2) {
            assert_ne!(pair[0].compare(&pair[1]), Ordering::Greater, "{pair:?}");
        }
        assert_eq!(values.first(), Some(&CellValue::Integer(-3)));
        assert_eq!(values.last(), Some(&CellValue::Number(f64::INFINITY)));
    }

    #[test]
    fn test_text_compares_lexicographically() {
        assert_eq!(CellValue::text("10").compare(&CellValue::text("9")), Ordering::Less);
    }

    #[test]
    fn test_mixed_kinds() {
        assert_eq!(CellValue::Empty.compare(&CellValue::Integer(-5)), Ordering::Less);
        assert_eq!(CellValue::Number(1e9).compare(&CellValue::text("a")), Ordering::Less);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(CellValue::from_json(&serde_json::json!(3)), CellValue::Integer(3));
        assert_eq!(CellValue::from_json(&serde_json::json!(2.5)), CellValue::Number(2.5));
        assert_eq!(CellValue::from_json(&serde_json::json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from_json(&serde_json::json!("x")), CellValue::text("x"));
    }
}
