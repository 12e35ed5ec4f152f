use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::openapi::schema::{ObjectBuilder, OneOfBuilder, Schema, Type};
use utoipa::openapi::RefOr;

/// Identifier of the note image being analyzed.
///
/// Callers send either a JSON number or a string. The value is republished
/// in the same JSON type so the consumer can correlate without conversion.
/// Any JSON number is accepted, including fractions and values past `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteImageId {
    Number(Number),
    Text(String),
}

impl NoteImageId {
    /// `0` and `""` are treated the same as an absent id.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl std::fmt::Display for NoteImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NoteImageId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<Number> for NoteImageId {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NoteImageId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for NoteImageId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl utoipa::PartialSchema for NoteImageId {
    fn schema() -> RefOr<Schema> {
        OneOfBuilder::new()
            .item(ObjectBuilder::new().schema_type(Type::Number))
            .item(ObjectBuilder::new().schema_type(Type::String))
            .description(Some("Note image id, a JSON number or string"))
            .into()
    }
}

impl utoipa::ToSchema for NoteImageId {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("NoteImageId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_number_and_string() {
        let id: NoteImageId = serde_json::from_str("42").unwrap();
        assert_eq!(id, NoteImageId::from(42));

        let id: NoteImageId = serde_json::from_str("\"img-7\"").unwrap();
        assert_eq!(id, NoteImageId::Text("img-7".to_string()));
    }

    #[test]
    fn test_serializes_in_original_json_type() {
        assert_eq!(serde_json::to_string(&NoteImageId::from(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&NoteImageId::from("42")).unwrap(),
            "\"42\""
        );
    }

    #[test]
    fn test_display_is_bare_value() {
        assert_eq!(NoteImageId::from(17).to_string(), "17");
        assert_eq!(NoteImageId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_blank_ids() {
        assert!(NoteImageId::from(0).is_blank());
        assert!(NoteImageId::from("").is_blank());
        assert!(!NoteImageId::from(1).is_blank());
        assert!(!NoteImageId::from("0").is_blank());
    }

    #[test]
    fn test_fractional_id_is_kept_as_sent() {
        let id: NoteImageId = serde_json::from_str("1.5").unwrap();
        assert!(!id.is_blank());
        assert_eq!(id.to_string(), "1.5");
        assert_eq!(serde_json::to_string(&id).unwrap(), "1.5");
    }

    #[test]
    fn test_id_beyond_i64_is_kept_as_sent() {
        let id: NoteImageId = serde_json::from_str("9223372036854775808").unwrap();
        assert!(!id.is_blank());
        assert_eq!(id.to_string(), "9223372036854775808");
        assert_eq!(serde_json::to_string(&id).unwrap(), "9223372036854775808");
    }

    #[test]
    fn test_zero_float_is_blank() {
        let id: NoteImageId = serde_json::from_str("0.0").unwrap();
        assert!(id.is_blank());
    }

    #[test]
    fn test_rejects_other_json_types() {
        assert!(serde_json::from_str::<NoteImageId>("true").is_err());
        assert!(serde_json::from_str::<NoteImageId>("{}").is_err());
    }
}
