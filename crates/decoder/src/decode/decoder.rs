// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type-directed decoding of a [`TypeNode`] against a [`BinaryCursor`].

use super::cursor::BinaryCursor;
use super::error::DecodeError;
use super::value::{DecodedValue, Fields, Scalar};
use crate::schema::{DefinedTypes, EncodingParams, MinSizes, PrimitiveKind, SchemaModel, TypeNode};
use config::DecodeConfig;
use std::borrow::Cow;

/// Bounds applied to untrusted input while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Largest element count accepted for a length-prefixed sequence.
    pub max_sequence_len: u32,
    /// Deepest nesting of composite types.
    pub max_depth: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_sequence_len: 1 << 20,
            max_depth: 64,
        }
    }
}

impl From<&DecodeConfig> for DecodeLimits {
    fn from(config: &DecodeConfig) -> Self {
        Self {
            max_sequence_len: config.max_sequence_len,
            max_depth: config.max_depth,
        }
    }
}

/// Walks type nodes against a cursor, resolving named references through a
/// borrowed table of definitions. Holds no mutable state of its own.
#[derive(Debug, Clone)]
pub struct Decoder<'s> {
    types: &'s DefinedTypes,
    sizes: Cow<'s, MinSizes>,
    enum_tag_width: u8,
    limits: DecodeLimits,
}

impl<'s> Decoder<'s> {
    pub fn new(types: &'s DefinedTypes) -> Self {
        let enum_tag_width = EncodingParams::default().enum_tag_width;
        Self {
            types,
            sizes: Cow::Owned(MinSizes::compute(types, enum_tag_width)),
            enum_tag_width,
            limits: DecodeLimits::default(),
        }
    }

    /// Decoder using the schema's definitions, size bounds and enum tag width.
    pub fn for_schema(schema: &'s SchemaModel, limits: DecodeLimits) -> Self {
        Self {
            types: schema.types(),
            sizes: Cow::Borrowed(schema.min_sizes()),
            enum_tag_width: schema.encoding().enum_tag_width,
            limits,
        }
    }

    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_enum_tag_width(mut self, width: u8) -> Self {
        if width != self.enum_tag_width {
            self.sizes = Cow::Owned(MinSizes::compute(self.types, width));
            self.enum_tag_width = width;
        }
        self
    }

    pub fn decode(
        &self,
        node: &TypeNode,
        cursor: &mut BinaryCursor<'_>,
    ) -> Result<DecodedValue, DecodeError> {
        self.decode_node(node, cursor, 0)
    }

    fn decode_node(
        &self,
        node: &TypeNode,
        cursor: &mut BinaryCursor<'_>,
        depth: usize,
    ) -> Result<DecodedValue, DecodeError> {
        if depth > self.limits.max_depth {
            return Err(DecodeError::DepthLimitExceeded {
                max_depth: self.limits.max_depth,
                offset: cursor.offset(),
            });
        }

        match node {
            TypeNode::Primitive(kind) => decode_primitive(*kind, cursor).map(DecodedValue::Scalar),
            TypeNode::FixedArray { element, len } => {
                let mut items = Vec::with_capacity((*len).min(cursor.remaining()));
                for _ in 0..*len {
                    items.push(self.decode_node(element, cursor, depth + 1)?);
                }
                Ok(DecodedValue::Sequence(items))
            }
            TypeNode::Sequence(element) => self.decode_sequence(element, cursor, depth),
            TypeNode::Option(inner) => {
                let offset = cursor.offset();
                match cursor.read_u8()? {
                    0 => Ok(DecodedValue::Option(None)),
                    1 => {
                        let value = self.decode_node(inner, cursor, depth + 1)?;
                        Ok(DecodedValue::Option(Some(Box::new(value))))
                    }
                    tag => Err(DecodeError::InvalidOptionTag { tag, offset }),
                }
            }
            TypeNode::Struct(fields) => {
                let mut decoded = Fields::with_capacity(fields.len());
                for field in fields {
                    let value = self.decode_node(&field.ty, cursor, depth + 1)?;
                    decoded.insert(field.name.clone(), value);
                }
                Ok(DecodedValue::Struct(decoded))
            }
            TypeNode::Enum(variants) => {
                let offset = cursor.offset();
                let tag = cursor.read_uint(self.enum_tag_width)?;
                let variant = usize::try_from(tag)
                    .ok()
                    .and_then(|index| variants.get(index))
                    .ok_or(DecodeError::InvalidVariantTag {
                        tag,
                        variants: variants.len(),
                        offset,
                    })?;
                let payload = match &variant.payload {
                    Some(payload) => Some(Box::new(self.decode_node(payload, cursor, depth + 1)?)),
                    None => None,
                };
                Ok(DecodedValue::Enum {
                    variant: variant.name.clone(),
                    payload,
                })
            }
            TypeNode::NamedRef(name) => {
                let target = self
                    .types
                    .get(name)
                    .ok_or_else(|| DecodeError::UnknownType {
                        name: name.clone(),
                        offset: cursor.offset(),
                    })?;
                self.decode_node(target, cursor, depth + 1)
            }
        }
    }

    fn decode_sequence(
        &self,
        element: &TypeNode,
        cursor: &mut BinaryCursor<'_>,
        depth: usize,
    ) -> Result<DecodedValue, DecodeError> {
        let offset = cursor.offset();
        let len = cursor.read_u32()?;
        let remaining = cursor.remaining();

        // Zero-width elements are charged one byte each so that nested
        // sequences of them stay bounded by the input.
        let min_size = self.sizes.of(element).max(1);
        let needed = (len as usize).saturating_mul(min_size);
        if len > self.limits.max_sequence_len || needed > remaining {
            return Err(DecodeError::LengthOverflow {
                len,
                remaining,
                offset,
            });
        }

        let mut items = Vec::with_capacity((len as usize).min(remaining));
        for _ in 0..len {
            items.push(self.decode_node(element, cursor, depth + 1)?);
        }
        Ok(DecodedValue::Sequence(items))
    }
}

fn decode_primitive(kind: PrimitiveKind, cursor: &mut BinaryCursor<'_>) -> Result<Scalar, DecodeError> {
    let scalar = match kind {
        PrimitiveKind::U8 => Scalar::U8(cursor.read_u8()?),
        PrimitiveKind::U16 => Scalar::U16(cursor.read_u16()?),
        PrimitiveKind::U32 => Scalar::U32(cursor.read_u32()?),
        PrimitiveKind::U64 => Scalar::U64(cursor.read_u64()?),
        PrimitiveKind::U128 => Scalar::U128(cursor.read_u128()?),
        PrimitiveKind::I8 => Scalar::I8(cursor.read_i8()?),
        PrimitiveKind::I16 => Scalar::I16(cursor.read_i16()?),
        PrimitiveKind::I32 => Scalar::I32(cursor.read_i32()?),
        PrimitiveKind::I64 => Scalar::I64(cursor.read_i64()?),
        PrimitiveKind::I128 => Scalar::I128(cursor.read_i128()?),
        PrimitiveKind::F32 => Scalar::F32(cursor.read_f32()?),
        PrimitiveKind::F64 => Scalar::F64(cursor.read_f64()?),
        PrimitiveKind::Bool => Scalar::Bool(cursor.read_bool()?),
        PrimitiveKind::String => Scalar::String(cursor.read_string()?.to_owned()),
        PrimitiveKind::Pubkey => Scalar::Pubkey(cursor.read_pubkey()?),
    };
    Ok(scalar)
}

/// Decode one value of `node` with default limits and 1-byte enum tags.
pub fn decode(
    node: &TypeNode,
    cursor: &mut BinaryCursor<'_>,
    types: &DefinedTypes,
) -> Result<DecodedValue, DecodeError> {
    Decoder::new(types).decode(node, cursor)
}
