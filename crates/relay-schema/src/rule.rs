use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use crate::schema::ObjectSchema;

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid pattern compiles")
});

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-f0-9]{40}$").expect("address pattern compiles"));

static TX_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[a-fA-F0-9]{64}$").expect("tx hash pattern compiles"));

/// Format rule for a single field.
#[derive(Clone, Copy, Debug)]
pub enum Rule {
    /// Any non-empty string.
    NonEmptyString,
    /// RFC 4122 UUID (versions 1-5), case-insensitive.
    Uuid,
    /// ISO-8601 date or date-time.
    IsoDateTime,
    /// Lowercase `0x`-prefixed 20-byte hex address.
    Address,
    /// `0x`-prefixed 32-byte hex hash, either case.
    TxHash,
    /// Absolute URL.
    Url,
    /// Non-empty string of ASCII digits.
    DigitString,
    /// Exactly this string.
    Literal(&'static str),
    /// One of these strings.
    OneOf(&'static [&'static str]),
    /// Integer >= 1 that fits in 64 bits. Integral floats such as `1.0` are
    /// rejected, matching the typed model they decode into.
    PositiveInt,
    /// Integer >= 0 that fits in 32 bits. Integral floats are rejected.
    NonNegativeInt,
    /// Array whose elements are all non-empty strings.
    StringList,
    /// Nested object checked against its own schema.
    Object(&'static ObjectSchema),
}

impl Rule {
    /// Check a scalar rule. [`Rule::Object`] is handled by the evaluator and
    /// only reports whether the value is an object at all.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Object(_) => value.is_object(),
            Self::PositiveInt => value.as_u64().is_some_and(|n| n >= 1),
            Self::NonNegativeInt => value.as_u64().is_some_and(|n| u32::try_from(n).is_ok()),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| non_empty(item).is_some())),
            _ => non_empty(value).is_some_and(|s| self.accepts_str(s)),
        }
    }

    fn accepts_str(&self, s: &str) -> bool {
        match self {
            Self::NonEmptyString => true,
            Self::Uuid => UUID_RE.is_match(s),
            Self::IsoDateTime => is_iso_datetime(s),
            Self::Address => ADDRESS_RE.is_match(s),
            Self::TxHash => TX_HASH_RE.is_match(s),
            Self::Url => url::Url::parse(s).is_ok(),
            Self::DigitString => s.bytes().all(|b| b.is_ascii_digit()),
            Self::Literal(expected) => s == *expected,
            Self::OneOf(allowed) => allowed.contains(&s),
            Self::PositiveInt
            | Self::NonNegativeInt
            | Self::StringList
            | Self::Object(_) => false,
        }
    }
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn is_iso_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uuid_accepts_mixed_case_v4() {
        assert!(Rule::Uuid.accepts(&json!("0B9C4C56-1C2F-4B7E-9A3D-2F5E6D7C8B9A")));
        assert!(Rule::Uuid.accepts(&json!(uuid::Uuid::new_v4().to_string())));
        assert!(!Rule::Uuid.accepts(&json!("0b9c4c56-1c2f-6b7e-9a3d-2f5e6d7c8b9a")));
        assert!(!Rule::Uuid.accepts(&json!("not-a-uuid")));
        assert!(!Rule::Uuid.accepts(&json!(42)));
    }

    #[test]
    fn address_must_be_lowercase() {
        let lower = format!("0x{}", "ab".repeat(20));
        let upper = format!("0x{}", "AB".repeat(20));
        assert!(Rule::Address.accepts(&json!(lower)));
        assert!(!Rule::Address.accepts(&json!(upper)));
        assert!(!Rule::Address.accepts(&json!("0x1234")));
    }

    #[test]
    fn tx_hash_allows_either_case() {
        assert!(Rule::TxHash.accepts(&json!(format!("0x{}", "aB".repeat(32)))));
        assert!(!Rule::TxHash.accepts(&json!(format!("0x{}", "a".repeat(63)))));
    }

    #[test]
    fn iso_datetime_variants() {
        assert!(Rule::IsoDateTime.accepts(&json!("2026-03-01T12:30:00.123Z")));
        assert!(Rule::IsoDateTime.accepts(&json!("2026-03-01T12:30:00+02:00")));
        assert!(Rule::IsoDateTime.accepts(&json!("2026-03-01T12:30:00")));
        assert!(Rule::IsoDateTime.accepts(&json!("2026-03-01")));
        assert!(!Rule::IsoDateTime.accepts(&json!("yesterday")));
        assert!(!Rule::IsoDateTime.accepts(&json!("2026-13-01")));
    }

    #[test]
    fn url_requires_scheme() {
        assert!(Rule::Url.accepts(&json!("https://explorer.example/tx/0x1")));
        assert!(!Rule::Url.accepts(&json!("explorer.example/tx")));
    }

    #[test]
    fn integers() {
        assert!(Rule::PositiveInt.accepts(&json!(1)));
        assert!(!Rule::PositiveInt.accepts(&json!(0)));
        assert!(!Rule::PositiveInt.accepts(&json!(-1)));
        assert!(!Rule::PositiveInt.accepts(&json!(1.5)));
        assert!(!Rule::PositiveInt.accepts(&json!("1")));
        assert!(Rule::NonNegativeInt.accepts(&json!(0)));
        assert!(!Rule::NonNegativeInt.accepts(&json!(u64::MAX)));
        assert!(!Rule::PositiveInt.accepts(&json!(1.0)));
        assert!(!Rule::NonNegativeInt.accepts(&json!(6.0)));
    }

    #[test]
    fn digit_string_and_lists() {
        assert!(Rule::DigitString.accepts(&json!("1000")));
        assert!(!Rule::DigitString.accepts(&json!("1.5")));
        assert!(!Rule::DigitString.accepts(&json!("")));
        assert!(Rule::StringList.accepts(&json!([])));
        assert!(Rule::StringList.accepts(&json!(["a", "b"])));
        assert!(!Rule::StringList.accepts(&json!(["a", ""])));
        assert!(!Rule::StringList.accepts(&json!("a")));
    }

    #[test]
    fn literal_and_one_of() {
        assert!(Rule::Literal("x").accepts(&json!("x")));
        assert!(!Rule::Literal("x").accepts(&json!("y")));
        assert!(Rule::OneOf(&["a", "b"]).accepts(&json!("b")));
        assert!(!Rule::OneOf(&["a", "b"]).accepts(&json!("")));
    }
}
