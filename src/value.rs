//! # NSE Value Types
//!
//! Self-validating wire-format primitives for the USG XML protocol.
//! Each constructor is pure: it either yields a canonical, immutable value
//! or a [`ValueError`] describing the rejection.
//!
//! ## Field kinds
//!
//! | Kind | Wire form | Constraint |
//! |------|-----------|------------|
//! | Text | text | none |
//! | Char(n) | text | length <= n |
//! | FixedChar(n) | text | length == n |
//! | Int | decimal | parses as i64 |
//! | Float | decimal | parses as f64 |
//! | Bool | `TRUE`/`FALSE` | case-insensitive |
//! | MacAddr | `001A2B3C4D5E` | 6 hex pairs, uniform separator on input |
//! | Choice | listed token | case-insensitive prefix, first match wins |

use std::fmt;

use thiserror::Error;

/// Rejection raised by a value-type constructor.
///
/// These are local and synchronous; the command engine wraps them into
/// [`crate::error::NseError::FieldInvalid`] with the field name attached.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Input exceeds the maximum length of a bounded text field.
    #[error("input is {len} characters, maximum is {max}")]
    TooLong {
        /// Supplied length
        len: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Input length differs from the exact size of a fixed text field.
    #[error("input is {len} characters, expected exactly {expected}")]
    WrongLength {
        /// Supplied length
        len: usize,
        /// Required length
        expected: usize,
    },

    /// Input is not a well-formed MAC address.
    #[error("not a valid MAC address: {input:?}")]
    InvalidMac {
        /// The rejected input
        input: String,
    },

    /// Input matched no entry of an enumerated token set.
    #[error("{input:?} is not one of {set}")]
    NotInSet {
        /// The rejected input
        input: String,
        /// Rendered allowed set, e.g. `TimeUnit(DAYS, HOURS, ...)`
        set: String,
    },

    /// The bound value has the wrong shape for the field's kind.
    #[error("expected {expected}, got {got}")]
    WrongType {
        /// Kind the schema declares
        expected: &'static str,
        /// Shape the caller supplied
        got: &'static str,
    },

    /// Input could not be parsed as the declared numeric kind.
    #[error("{input:?} is not a valid {expected}")]
    NotNumeric {
        /// The rejected input
        input: String,
        /// Numeric kind name
        expected: &'static str,
    },
}

// ============================================================================
// Bounded / Fixed Text
// ============================================================================

/// Length-validated text, canonical form identical to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(String);

impl Text {
    /// Construct text that must not exceed `max` characters. No minimum.
    pub fn bounded(raw: &str, max: usize) -> Result<Self, ValueError> {
        let len = raw.chars().count();
        if len > max {
            return Err(ValueError::TooLong { len, max });
        }
        Ok(Text(raw.to_string()))
    }

    /// Construct text that must be exactly `expected` characters long.
    pub fn fixed(raw: &str, expected: usize) -> Result<Self, ValueError> {
        let len = raw.chars().count();
        if len != expected {
            return Err(ValueError::WrongLength { len, expected });
        }
        Ok(Text(raw.to_string()))
    }

    /// Borrow the validated content.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// MAC Address
// ============================================================================

/// A validated MAC address in canonical wire form.
///
/// Accepts colon- or hyphen-delimited or bare 12-hex-digit input,
/// case-insensitive; the separator must be used consistently or be absent
/// entirely. Canonical form is uppercase with no separator, stored as six
/// 2-character segments. Equality compares canonical forms, so
/// `"00:1a:2b:3c:4d:5e"` and `"00-1A-2B-3C-4D-5E"` are equal.
///
/// # Example
///
/// ```rust
/// use nse_xmlapi::MacAddress;
///
/// let mac = MacAddress::parse("00:1a:2b:3c:4d:5e").unwrap();
/// assert_eq!(mac.to_string(), "001A2B3C4D5E");
/// assert_eq!(mac.segment(0), "00");
/// assert_eq!(mac.format(":"), "00:1A:2B:3C:4D:5E");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress {
    /// 12 uppercase hex characters
    canonical: String,
}

/// Number of 2-character segments in a MAC address.
pub const MAC_SEGMENTS: usize = 6;

impl MacAddress {
    /// Parse a MAC address from any of the accepted input styles.
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let reject = || ValueError::InvalidMac {
            input: raw.to_string(),
        };

        let bytes = raw.as_bytes();
        let mut hex = Vec::with_capacity(12);
        match bytes.len() {
            // Bare form: 12 hex digits
            12 => hex.extend_from_slice(bytes),
            // Separated form: 6 pairs joined by a uniform ':' or '-'
            17 => {
                let sep = bytes[2];
                if sep != b':' && sep != b'-' {
                    return Err(reject());
                }
                for (i, &b) in bytes.iter().enumerate() {
                    if i % 3 == 2 {
                        if b != sep {
                            return Err(reject());
                        }
                    } else {
                        hex.push(b);
                    }
                }
            }
            _ => return Err(reject()),
        }

        if hex.len() != 12 || !hex.iter().all(u8::is_ascii_hexdigit) {
            return Err(reject());
        }
        hex.make_ascii_uppercase();

        // hex is all-ASCII at this point
        let canonical = String::from_utf8(hex).map_err(|_| reject())?;
        Ok(MacAddress { canonical })
    }

    /// 0-based access to one of the six 2-character segments.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`.
    pub fn segment(&self, index: usize) -> &str {
        assert!(index < MAC_SEGMENTS, "MAC segment index out of range");
        &self.canonical[index * 2..index * 2 + 2]
    }

    /// Iterate over the six segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        (0..MAC_SEGMENTS).map(|i| self.segment(i))
    }

    /// Re-join the segments with a caller-supplied separator.
    ///
    /// An empty separator yields the canonical 12-character form.
    pub fn format(&self, separator: &str) -> String {
        self.segments().collect::<Vec<_>>().join(separator)
    }

    /// Borrow the canonical 12-character form.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl std::str::FromStr for MacAddress {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MacAddress::parse(s)
    }
}

// ============================================================================
// Field Values
// ============================================================================

/// A value bound to a command field before or after validation.
///
/// Callers bind loose scalars; validation coerces them to the canonical
/// form demanded by the field's [`ValueKind`]. `WithAttrs` carries a
/// primary value plus nested attribute values for elements that render
/// with their own XML attributes (e.g. `EXPIRY_TIME` with `UNITS`).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value, rendered as `TRUE`/`FALSE`
    Bool(bool),
    /// Validated MAC address, rendered in canonical form
    Mac(MacAddress),
    /// Structured element value: primary value plus nested attributes
    WithAttrs {
        /// The element's text content, validated against the element's kind
        value: Box<FieldValue>,
        /// Nested attribute values by (unnormalized) name
        attrs: Vec<(String, FieldValue)>,
    },
}

impl FieldValue {
    /// Build a structured element value from a primary value and nested
    /// attribute pairs.
    pub fn with_attrs<V, S, I>(value: V, attrs: I) -> Self
    where
        V: Into<FieldValue>,
        S: Into<String>,
        I: IntoIterator<Item = (S, FieldValue)>,
    {
        FieldValue::WithAttrs {
            value: Box::new(value.into()),
            attrs: attrs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Shape name for error reporting and logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "str",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Mac(_) => "mac",
            FieldValue::WithAttrs { .. } => "structured value",
        }
    }
}

impl fmt::Display for FieldValue {
    /// Renders the wire string form of the value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => f.write_str(if *v { "TRUE" } else { "FALSE" }),
            FieldValue::Mac(mac) => f.write_str(mac.as_str()),
            FieldValue::WithAttrs { value, .. } => value.fmt(f),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<MacAddress> for FieldValue {
    fn from(v: MacAddress) -> Self {
        FieldValue::Mac(v)
    }
}

// ============================================================================
// Value Kinds
// ============================================================================

/// The type constructor a schema declares for one field.
///
/// `coerce` validates a caller-supplied [`FieldValue`] and returns the
/// canonical value stored in its place. Coercion is idempotent: feeding a
/// canonical value back through the same kind yields an equal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Unconstrained text; non-text scalars are rendered to text
    Text,
    /// Text with a maximum length
    Char(usize),
    /// Text with an exact length
    FixedChar(usize),
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean, accepts `TRUE`/`FALSE` text
    Bool,
    /// MAC address, canonicalized on validation
    MacAddr,
    /// Enumerated token set matched case-insensitively by prefix,
    /// in declaration order, first match wins
    Choice {
        /// Set name used in help text and error messages
        name: &'static str,
        /// Allowed tokens in declaration order
        allowed: &'static [&'static str],
    },
}

impl ValueKind {
    /// Human-readable type name used by schema help text.
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueKind::Text => "str",
            ValueKind::Char(_) => "char",
            ValueKind::FixedChar(_) => "char",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::MacAddr => "mac",
            ValueKind::Choice { name, .. } => name,
        }
    }

    /// Validate a bound value and return its canonical form.
    pub fn coerce(&self, value: &FieldValue) -> Result<FieldValue, ValueError> {
        if let FieldValue::WithAttrs { .. } = value {
            // The engine unwraps structured values before coercing; a
            // structured value reaching a scalar kind is a shape error.
            return Err(ValueError::WrongType {
                expected: self.type_name(),
                got: value.type_name(),
            });
        }

        match self {
            ValueKind::Text => Ok(FieldValue::Str(value.to_string())),

            ValueKind::Char(max) => match value {
                FieldValue::Str(s) => Text::bounded(s, *max).map(|t| FieldValue::Str(t.0)),
                other => Err(ValueError::WrongType {
                    expected: "char",
                    got: other.type_name(),
                }),
            },

            ValueKind::FixedChar(len) => match value {
                FieldValue::Str(s) => Text::fixed(s, *len).map(|t| FieldValue::Str(t.0)),
                other => Err(ValueError::WrongType {
                    expected: "char",
                    got: other.type_name(),
                }),
            },

            ValueKind::Int => match value {
                FieldValue::Int(v) => Ok(FieldValue::Int(*v)),
                FieldValue::Str(s) => {
                    s.trim()
                        .parse::<i64>()
                        .map(FieldValue::Int)
                        .map_err(|_| ValueError::NotNumeric {
                            input: s.clone(),
                            expected: "int",
                        })
                }
                other => Err(ValueError::WrongType {
                    expected: "int",
                    got: other.type_name(),
                }),
            },

            ValueKind::Float => match value {
                FieldValue::Float(v) => Ok(FieldValue::Float(*v)),
                FieldValue::Int(v) => Ok(FieldValue::Float(*v as f64)),
                FieldValue::Str(s) => {
                    s.trim()
                        .parse::<f64>()
                        .map(FieldValue::Float)
                        .map_err(|_| ValueError::NotNumeric {
                            input: s.clone(),
                            expected: "float",
                        })
                }
                other => Err(ValueError::WrongType {
                    expected: "float",
                    got: other.type_name(),
                }),
            },

            ValueKind::Bool => match value {
                FieldValue::Bool(v) => Ok(FieldValue::Bool(*v)),
                FieldValue::Str(s) if s.eq_ignore_ascii_case("TRUE") => Ok(FieldValue::Bool(true)),
                FieldValue::Str(s) if s.eq_ignore_ascii_case("FALSE") => {
                    Ok(FieldValue::Bool(false))
                }
                other => Err(ValueError::WrongType {
                    expected: "bool",
                    got: other.type_name(),
                }),
            },

            ValueKind::MacAddr => match value {
                FieldValue::Mac(mac) => Ok(FieldValue::Mac(mac.clone())),
                FieldValue::Str(s) => MacAddress::parse(s).map(FieldValue::Mac),
                other => Err(ValueError::WrongType {
                    expected: "mac",
                    got: other.type_name(),
                }),
            },

            ValueKind::Choice { name, allowed } => {
                let input = value.to_string();
                match match_token(allowed, &input) {
                    Some(token) => Ok(FieldValue::Str(token.to_string())),
                    None => Err(ValueError::NotInSet {
                        input,
                        set: format!("{}({})", name, allowed.join(", ")),
                    }),
                }
            }
        }
    }
}

/// Case-insensitive exact-or-prefix match over an ordered token set.
///
/// Declaration order is the tie-break: the first listed token the input is
/// a prefix of wins, even when a later token would match more characters.
fn match_token<'a>(allowed: &[&'a str], input: &str) -> Option<&'a str> {
    if input.is_empty() {
        return None;
    }
    allowed.iter().copied().find(|candidate| {
        candidate.len() >= input.len()
            && candidate[..input.len()].eq_ignore_ascii_case(input)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounded_text_round_trip() {
        let text = Text::bounded("test", 5).unwrap();
        assert_eq!(text.to_string(), "test");
        assert_eq!(Text::bounded("", 5).unwrap().as_str(), "");
    }

    #[test]
    fn test_bounded_text_too_long() {
        let err = Text::bounded("too_long", 5).unwrap_err();
        assert_eq!(err, ValueError::TooLong { len: 8, max: 5 });
    }

    #[test]
    fn test_fixed_text_exact_length_only() {
        assert_eq!(Text::fixed("valid", 5).unwrap().as_str(), "valid");
        assert_eq!(
            Text::fixed("short", 6).unwrap_err(),
            ValueError::WrongLength {
                len: 5,
                expected: 6
            }
        );
    }

    #[test]
    fn test_mac_separator_permutations_canonicalize_identically() {
        let inputs = [
            "00:1a:2b:3c:4d:5e",
            "00:1A:2B:3C:4D:5E",
            "00-1a-2b-3c-4d-5e",
            "00-1A-2B-3C-4D-5E",
            "001a2b3c4d5e",
            "001A2B3C4D5E",
        ];
        for input in inputs {
            let mac = MacAddress::parse(input).unwrap();
            assert_eq!(mac.as_str(), "001A2B3C4D5E", "input {input:?}");
        }
    }

    #[test]
    fn test_mac_equality_compares_canonical_form() {
        let a = MacAddress::parse("00:1A:2B:3C:4D:5E").unwrap();
        let b = MacAddress::parse("00-1a-2b-3c-4d-5e").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mac_segment_access_and_format() {
        let mac = MacAddress::parse("00:1A:2B:3C:4D:5E").unwrap();
        assert_eq!(mac.segment(0), "00");
        assert_eq!(mac.segment(5), "5E");
        assert_eq!(mac.segments().count(), MAC_SEGMENTS);
        assert_eq!(mac.format("-"), "00-1A-2B-3C-4D-5E");
        assert_eq!(mac.format(""), "001A2B3C4D5E");
    }

    #[test]
    fn test_mac_invalid_inputs() {
        let rejected = [
            "invalid_mac",
            "00:1A:2B:3C:4D",          // 5 groups
            "00:1A:2B:3C:4D:5E:6F",    // 7 groups
            "00:1A-2B:3C:4D:5E",       // mixed separators
            "00.1A.2B.3C.4D.5E",       // unsupported separator
            "0G1A2B3C4D5E",            // non-hex
            "001A2B3C4D5",             // 11 digits
            "",
        ];
        for input in rejected {
            assert!(
                MacAddress::parse(input).is_err(),
                "accepted bad input {input:?}"
            );
        }
    }

    #[test]
    fn test_choice_first_listed_match_wins() {
        // "r" is a prefix of both; declaration order is the tie-break.
        let allowed: &[&str] = &["RADIUS", "ROOM_OPEN"];
        assert_eq!(match_token(allowed, "r"), Some("RADIUS"));
        assert_eq!(match_token(allowed, "ro"), Some("ROOM_OPEN"));
        assert_eq!(match_token(allowed, "radius"), Some("RADIUS"));
        assert_eq!(match_token(allowed, "x"), None);
        assert_eq!(match_token(allowed, ""), None);
    }

    #[test]
    fn test_choice_coerce_returns_canonical_token() {
        let kind = ValueKind::Choice {
            name: "TimeUnit",
            allowed: &["DAYS", "HOURS", "MINUTES", "SECONDS"],
        };
        assert_eq!(
            kind.coerce(&FieldValue::Str("days".into())).unwrap(),
            FieldValue::Str("DAYS".into())
        );
        assert_eq!(
            kind.coerce(&FieldValue::Str("h".into())).unwrap(),
            FieldValue::Str("HOURS".into())
        );
        let err = kind.coerce(&FieldValue::Str("weeks".into())).unwrap_err();
        assert!(matches!(err, ValueError::NotInSet { .. }));
    }

    #[test]
    fn test_int_kind_accepts_int_and_numeric_text() {
        assert_eq!(
            ValueKind::Int.coerce(&FieldValue::Int(128)).unwrap(),
            FieldValue::Int(128)
        );
        assert_eq!(
            ValueKind::Int.coerce(&FieldValue::Str("128".into())).unwrap(),
            FieldValue::Int(128)
        );
        assert!(ValueKind::Int
            .coerce(&FieldValue::Str("1.5".into()))
            .is_err());
        assert!(ValueKind::Int.coerce(&FieldValue::Float(1.5)).is_err());
    }

    #[test]
    fn test_char_kind_rejects_non_text() {
        let err = ValueKind::Char(5).coerce(&FieldValue::Float(1.2)).unwrap_err();
        assert_eq!(
            err,
            ValueError::WrongType {
                expected: "char",
                got: "float"
            }
        );
    }

    #[test]
    fn test_bool_rendering_and_coercion() {
        assert_eq!(FieldValue::Bool(true).to_string(), "TRUE");
        assert_eq!(FieldValue::Bool(false).to_string(), "FALSE");
        assert_eq!(
            ValueKind::Bool
                .coerce(&FieldValue::Str("true".into()))
                .unwrap(),
            FieldValue::Bool(true)
        );
        assert!(ValueKind::Bool.coerce(&FieldValue::Str("yes".into())).is_err());
    }

    #[test]
    fn test_mac_kind_coerces_text_input() {
        let coerced = ValueKind::MacAddr
            .coerce(&FieldValue::Str("00:1a:2b:3c:4d:5e".into()))
            .unwrap();
        assert_eq!(coerced.to_string(), "001A2B3C4D5E");
        // Idempotent on the canonical value
        assert_eq!(ValueKind::MacAddr.coerce(&coerced).unwrap(), coerced);
    }

    proptest! {
        #[test]
        fn prop_bounded_text_within_limit_round_trips(s in "[ -~]{0,96}") {
            let text = Text::bounded(&s, 96).unwrap();
            prop_assert_eq!(text.to_string(), s);
        }

        #[test]
        fn prop_bounded_text_over_limit_rejected(s in "[ -~]{97,120}") {
            prop_assert!(Text::bounded(&s, 96).is_err());
        }

        #[test]
        fn prop_mac_canonical_form_separator_independent(
            segs in proptest::array::uniform6("[0-9a-fA-F]{2}"),
            sep in prop_oneof![Just(""), Just(":"), Just("-")],
        ) {
            let joined = segs.join(sep);
            let mac = MacAddress::parse(&joined).unwrap();
            let expected: String = segs.join("").to_ascii_uppercase();
            prop_assert_eq!(mac.as_str(), expected.as_str());
        }
    }
}
