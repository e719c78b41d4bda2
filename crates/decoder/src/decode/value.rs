// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoded value tree and its JSON rendering.
//!
//! JSON rendering follows these rules:
//! - 64- and 128-bit integers become decimal strings, smaller ones stay numbers
//! - Pubkeys become base58 strings
//! - Unit-only enums serialize as the variant name: `"Active"`
//! - Enums whose variant carries data serialize as objects: `{"Closed": {...}}`
//! - Absent options are `null`

use crate::types::Pubkey;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered field name to value mapping of a decoded struct.
pub type Fields = IndexMap<String, DecodedValue>;

/// A decoded leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
    String(String),
    Pubkey(Pubkey),
}

impl Scalar {
    /// Unsigned integer value, if this is an unsigned integer that fits.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v),
            Self::U128(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::U8(v) => Some(v.into()),
            Self::U16(v) => Some(v.into()),
            Self::U32(v) => Some(v.into()),
            Self::U64(v) => Some(v.into()),
            Self::U128(v) => i128::try_from(v).ok(),
            Self::I8(v) => Some(v.into()),
            Self::I16(v) => Some(v.into()),
            Self::I32(v) => Some(v.into()),
            Self::I64(v) => Some(v.into()),
            Self::I128(v) => Some(v),
            _ => None,
        }
    }
}

/// Value tree mirroring the shape of the [`TypeNode`](crate::schema::TypeNode)
/// it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Scalar(Scalar),
    /// Elements of a fixed array or a length-prefixed sequence.
    Sequence(Vec<DecodedValue>),
    Struct(Fields),
    Enum {
        variant: String,
        payload: Option<Box<DecodedValue>>,
    },
    /// `None` when the presence byte was 0.
    Option(Option<Box<DecodedValue>>),
}

impl DecodedValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Fields> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            Self::Sequence(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Look up a struct field by name.
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        self.as_struct()?.get(field)
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.as_scalar()?.as_u64()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_pubkey(&self) -> Option<&Pubkey> {
        match self {
            Self::Scalar(Scalar::Pubkey(key)) => Some(key),
            _ => None,
        }
    }

    /// Variant name of a decoded enum.
    pub fn variant(&self) -> Option<&str> {
        match self {
            Self::Enum { variant, .. } => Some(variant.as_str()),
            _ => None,
        }
    }

    /// True for an option whose presence byte was 0.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Option(None))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<Scalar> for DecodedValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::U8(v) => serializer.serialize_u8(*v),
            Self::U16(v) => serializer.serialize_u16(*v),
            Self::U32(v) => serializer.serialize_u32(*v),
            Self::I8(v) => serializer.serialize_i8(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            // Wider integers do not survive a round trip through a JS number.
            Self::U64(v) => serializer.collect_str(v),
            Self::U128(v) => serializer.collect_str(v),
            Self::I64(v) => serializer.collect_str(v),
            Self::I128(v) => serializer.collect_str(v),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Pubkey(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Struct(fields) => serializer.collect_map(fields),
            Self::Enum {
                variant,
                payload: None,
            } => serializer.serialize_str(variant),
            Self::Enum {
                variant,
                payload: Some(payload),
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(variant, payload)?;
                map.end()
            }
            Self::Option(None) => serializer.serialize_none(),
            Self::Option(Some(value)) => serializer.serialize_some(value),
        }
    }
}

/// A successfully decoded event.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EventValue {
    pub name: String,
    pub data: Fields,
}

impl EventValue {
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        self.data.get(name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_json() {
        assert_eq!(DecodedValue::from(Scalar::U32(7)).to_json(), json!(7));
        assert_eq!(DecodedValue::from(Scalar::I16(-7)).to_json(), json!(-7));
        assert_eq!(
            DecodedValue::from(Scalar::U64(u64::MAX)).to_json(),
            json!("18446744073709551615")
        );
        assert_eq!(
            DecodedValue::from(Scalar::I128(-1)).to_json(),
            json!("-1")
        );
        assert_eq!(DecodedValue::from(Scalar::F64(0.5)).to_json(), json!(0.5));
        assert_eq!(
            DecodedValue::from(Scalar::Pubkey(Pubkey([0; 32]))).to_json(),
            json!("11111111111111111111111111111111")
        );
    }

    #[test]
    fn test_enum_json() {
        let unit = DecodedValue::Enum {
            variant: "Active".to_string(),
            payload: None,
        };
        assert_eq!(unit.to_json(), json!("Active"));

        let mut fields = Fields::new();
        fields.insert(
            "reason".to_string(),
            DecodedValue::from(Scalar::String("expired".to_string())),
        );
        let with_data = DecodedValue::Enum {
            variant: "Closed".to_string(),
            payload: Some(Box::new(DecodedValue::Struct(fields))),
        };
        assert_eq!(with_data.to_json(), json!({"Closed": {"reason": "expired"}}));
    }

    #[test]
    fn test_option_and_sequence_json() {
        let absent = DecodedValue::Option(None);
        assert!(absent.is_absent());
        assert_eq!(absent.to_json(), json!(null));

        let present = DecodedValue::Option(Some(Box::new(Scalar::Bool(true).into())));
        assert_eq!(present.to_json(), json!(true));

        let seq = DecodedValue::Sequence(vec![Scalar::U8(1).into(), Scalar::U8(2).into()]);
        assert_eq!(seq.to_json(), json!([1, 2]));
    }

    #[test]
    fn test_event_json_preserves_field_order() {
        let mut data = Fields::new();
        data.insert("zeta".to_string(), Scalar::U8(1).into());
        data.insert("alpha".to_string(), Scalar::U8(2).into());
        let event = EventValue {
            name: "Ordered".to_string(),
            data,
        };

        let rendered = serde_json::to_string(&event).unwrap();
        assert_eq!(rendered, r#"{"name":"Ordered","data":{"zeta":1,"alpha":2}}"#);
        assert_eq!(event.field("alpha").and_then(DecodedValue::as_u64), Some(2));
    }

    #[test]
    fn test_accessors() {
        let mut data = Fields::new();
        data.insert("amount".to_string(), Scalar::U64(42).into());
        let value = DecodedValue::Struct(data);

        assert_eq!(value.get("amount").and_then(DecodedValue::as_u64), Some(42));
        assert!(value.get("missing").is_none());
        assert_eq!(Scalar::I8(-3).as_i128(), Some(-3));
        assert_eq!(Scalar::U128(u128::MAX).as_u64(), None);
    }
}
