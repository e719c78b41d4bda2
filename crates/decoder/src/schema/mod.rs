// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory schema built from a program IDL.
//!
//! The schema is a closed set of [`TypeNode`] shapes plus a table of named
//! definitions. Named references are kept as names and resolved while
//! decoding, which is what lets a type refer to itself.

mod error;
mod idl;

pub use error::LoadError;

use crate::discriminator;
use config::{ByteOrder, DecodeConfig};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Fixed-width and length-prefixed leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    F32,
    F64,
    Bool,
    /// u32 length prefix followed by UTF-8 bytes.
    String,
    /// 32 opaque bytes.
    Pubkey,
}

impl PrimitiveKind {
    /// Map an IDL primitive name to its kind.
    ///
    /// Both `pubkey` and the older `publicKey` spelling are accepted.
    pub fn from_idl_name(name: &str) -> Option<Self> {
        let kind = match name {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "bool" => Self::Bool,
            "string" => Self::String,
            "pubkey" | "publicKey" => Self::Pubkey,
            _ => return None,
        };
        Some(kind)
    }

    /// Bytes consumed by a value of this kind. For strings this is only the
    /// length prefix.
    pub fn min_encoded_size(self) -> usize {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 | Self::String => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
            Self::U128 | Self::I128 => 16,
            Self::Pubkey => 32,
        }
    }
}

/// Binary shape of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Primitive(PrimitiveKind),
    FixedArray { element: Box<TypeNode>, len: usize },
    /// u32 count prefix followed by that many elements.
    Sequence(Box<TypeNode>),
    /// Presence byte (0 or 1) followed by the value when present.
    Option(Box<TypeNode>),
    Struct(Vec<Field>),
    /// Variant tag followed by the selected variant's payload.
    Enum(Vec<Variant>),
    /// Reference into [`SchemaModel::types`], resolved at decode time.
    NamedRef(String),
}

impl TypeNode {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    pub fn array(element: TypeNode, len: usize) -> Self {
        Self::FixedArray {
            element: Box::new(element),
            len,
        }
    }

    pub fn sequence(element: TypeNode) -> Self {
        Self::Sequence(Box::new(element))
    }

    pub fn option(inner: TypeNode) -> Self {
        Self::Option(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::NamedRef(name.into())
    }

    /// Lower bound of the bytes a value of this type occupies.
    ///
    /// Computes the bounds of every definition in `types` first; callers
    /// decoding many values should build a [`MinSizes`] once instead.
    pub fn min_encoded_size(&self, types: &DefinedTypes, enum_tag_width: u8) -> usize {
        MinSizes::compute(types, enum_tag_width).of(self)
    }
}

/// Lower bounds of encoded sizes for a set of definitions.
///
/// Used to reject sequence counts that cannot possibly fit in the bytes
/// left. Bounds of named types are computed once as the least fixed point of
/// their definitions, so a reference costs a lookup and recursive types
/// terminate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinSizes {
    named: HashMap<String, usize>,
    enum_tag_width: u8,
}

impl MinSizes {
    pub fn compute(types: &DefinedTypes, enum_tag_width: u8) -> Self {
        let mut sizes = Self {
            named: types.keys().map(|name| (name.clone(), 0)).collect(),
            enum_tag_width,
        };

        // Bounds only grow between rounds and are lower bounds throughout.
        // Types with a finite encoding settle within one round per definition;
        // the round cap stops types that have none.
        for _ in 0..=types.len() {
            let mut changed = false;
            for (name, node) in types {
                let size = sizes.of(node);
                if let Some(current) = sizes.named.get_mut(name) {
                    if *current != size {
                        *current = size;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        sizes
    }

    /// Bound of a named definition, if it is known.
    pub fn named(&self, name: &str) -> Option<usize> {
        self.named.get(name).copied()
    }

    /// Bound of `node`; unknown references count as zero.
    pub fn of(&self, node: &TypeNode) -> usize {
        match node {
            TypeNode::Primitive(kind) => kind.min_encoded_size(),
            TypeNode::FixedArray { element, len } => self.of(element).saturating_mul(*len),
            TypeNode::Sequence(_) => 4,
            TypeNode::Option(_) => 1,
            TypeNode::Struct(fields) => fields
                .iter()
                .fold(0usize, |acc, field| acc.saturating_add(self.of(&field.ty))),
            TypeNode::Enum(variants) => {
                let smallest_payload = variants
                    .iter()
                    .map(|variant| variant.payload.as_ref().map_or(0, |payload| self.of(payload)))
                    .min()
                    .unwrap_or(0);
                usize::from(self.enum_tag_width).saturating_add(smallest_payload)
            }
            TypeNode::NamedRef(name) => self.named(name).unwrap_or(0),
        }
    }
}

/// A named struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeNode,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An enum variant; `payload` is `None` for unit variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub payload: Option<TypeNode>,
}

impl Variant {
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: TypeNode) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
        }
    }
}

/// Named type definitions, in declaration order.
pub type DefinedTypes = IndexMap<String, TypeNode>;

/// An event declared by the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDef {
    name: String,
    discriminator: Vec<u8>,
    layout: TypeNode,
}

impl EventDef {
    pub fn new(name: impl Into<String>, discriminator: Vec<u8>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            discriminator,
            layout: TypeNode::Struct(fields),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> &[u8] {
        &self.discriminator
    }

    /// The event's field struct. Always a [`TypeNode::Struct`].
    pub fn layout(&self) -> &TypeNode {
        &self.layout
    }

    pub fn fields(&self) -> &[Field] {
        match &self.layout {
            TypeNode::Struct(fields) => fields,
            _ => &[],
        }
    }
}

/// Wire conventions shared by every type in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingParams {
    /// Width of discriminators computed from event names.
    pub discriminator_len: usize,
    pub byte_order: ByteOrder,
    /// Width of enum variant tags: 1, 2 or 4 bytes.
    pub enum_tag_width: u8,
}

impl Default for EncodingParams {
    fn default() -> Self {
        Self {
            discriminator_len: discriminator::ANCHOR_DISCRIMINATOR_LEN,
            byte_order: ByteOrder::Little,
            enum_tag_width: 1,
        }
    }
}

/// Options applied while loading an IDL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub encoding: EncodingParams,
    /// Rename field names to snake_case (legacy IDLs use camelCase).
    pub snake_case_fields: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: EncodingParams::default(),
            snake_case_fields: true,
        }
    }
}

impl From<&DecodeConfig> for LoadOptions {
    fn from(config: &DecodeConfig) -> Self {
        Self {
            encoding: EncodingParams {
                discriminator_len: config.discriminator_len,
                byte_order: config.byte_order,
                enum_tag_width: config.enum_tag_width,
            },
            snake_case_fields: config.snake_case_fields,
        }
    }
}

/// Validated, read-only schema for one program.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    program: Option<String>,
    types: DefinedTypes,
    events: Vec<EventDef>,
    encoding: EncodingParams,
    min_discriminator_len: usize,
    min_sizes: MinSizes,
}

impl SchemaModel {
    /// Load an Anchor IDL JSON document with default options.
    pub fn load(idl_source: &str) -> Result<Self, LoadError> {
        Self::load_with(idl_source, &LoadOptions::default())
    }

    pub fn load_with(idl_source: &str, options: &LoadOptions) -> Result<Self, LoadError> {
        let schema = idl::parse(idl_source, options)?;
        tracing::info!(
            program = schema.program.as_deref().unwrap_or("<unnamed>"),
            types = schema.types.len(),
            events = schema.events.len(),
            "Loaded IDL schema"
        );
        Ok(schema)
    }

    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Program name taken from the IDL metadata, if any.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    pub fn types(&self) -> &DefinedTypes {
        &self.types
    }

    /// Events in declaration order.
    pub fn events(&self) -> &[EventDef] {
        &self.events
    }

    pub fn event(&self, name: &str) -> Option<&EventDef> {
        self.events.iter().find(|event| event.name == name)
    }

    pub fn encoding(&self) -> &EncodingParams {
        &self.encoding
    }

    /// Encoded size bounds of the defined types.
    pub fn min_sizes(&self) -> &MinSizes {
        &self.min_sizes
    }

    /// Length of the shortest declared discriminator, 0 when there are no events.
    pub fn min_discriminator_len(&self) -> usize {
        self.min_discriminator_len
    }

    fn new(
        program: Option<String>,
        types: DefinedTypes,
        events: Vec<EventDef>,
        encoding: EncodingParams,
    ) -> Result<Self, LoadError> {
        if !matches!(encoding.enum_tag_width, 1 | 2 | 4) {
            return Err(LoadError::malformed(format!(
                "enum tag width must be 1, 2 or 4, got {}",
                encoding.enum_tag_width
            )));
        }

        for (name, ty) in &types {
            validate_node(ty, &types, name)?;
        }

        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(event.name.as_str()) {
                return Err(LoadError::malformed(format!(
                    "event '{}' is declared more than once",
                    event.name
                )));
            }
            if event.discriminator.is_empty() {
                return Err(LoadError::malformed(format!(
                    "event '{}' has an empty discriminator",
                    event.name
                )));
            }
            validate_node(&event.layout, &types, &event.name)?;
        }

        let min_discriminator_len = events
            .iter()
            .map(|event| event.discriminator.len())
            .min()
            .unwrap_or(0);
        let min_sizes = MinSizes::compute(&types, encoding.enum_tag_width);

        Ok(Self {
            program,
            types,
            events,
            encoding,
            min_discriminator_len,
            min_sizes,
        })
    }
}

/// Checks that every reference resolves and that field and variant lists
/// are well formed. `context` names the enclosing definition for messages.
fn validate_node(node: &TypeNode, types: &DefinedTypes, context: &str) -> Result<(), LoadError> {
    match node {
        TypeNode::Primitive(_) => Ok(()),
        TypeNode::FixedArray { element, .. }
        | TypeNode::Sequence(element)
        | TypeNode::Option(element) => validate_node(element, types, context),
        TypeNode::Struct(fields) => {
            let mut names = HashSet::new();
            for field in fields {
                if field.name.is_empty() {
                    return Err(LoadError::malformed(format!(
                        "'{context}' has a field without a name"
                    )));
                }
                if !names.insert(field.name.as_str()) {
                    return Err(LoadError::malformed(format!(
                        "'{context}' declares field '{}' twice",
                        field.name
                    )));
                }
                validate_node(&field.ty, types, context)?;
            }
            Ok(())
        }
        TypeNode::Enum(variants) => {
            if variants.is_empty() {
                return Err(LoadError::malformed(format!(
                    "enum '{context}' has no variants"
                )));
            }
            let mut names = HashSet::new();
            for variant in variants {
                if !names.insert(variant.name.as_str()) {
                    return Err(LoadError::malformed(format!(
                        "enum '{context}' declares variant '{}' twice",
                        variant.name
                    )));
                }
                if let Some(payload) = &variant.payload {
                    validate_node(payload, types, context)?;
                }
            }
            Ok(())
        }
        TypeNode::NamedRef(name) => {
            if types.contains_key(name) {
                Ok(())
            } else {
                Err(LoadError::UnresolvedReference(name.clone()))
            }
        }
    }
}

/// Programmatic construction of a [`SchemaModel`], validated on `build`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    program: Option<String>,
    types: DefinedTypes,
    events: Vec<EventDef>,
    encoding: EncodingParams,
    duplicate_type: Option<String>,
}

impl SchemaBuilder {
    pub fn program(mut self, name: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self
    }

    pub fn encoding(mut self, encoding: EncodingParams) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn define_type(mut self, name: impl Into<String>, node: TypeNode) -> Self {
        let name = name.into();
        if self.types.contains_key(&name) {
            self.duplicate_type.get_or_insert(name);
        } else {
            self.types.insert(name, node);
        }
        self
    }

    /// Declare an event whose discriminator is derived from its name.
    ///
    /// The derivation uses the discriminator width in effect when `build` runs.
    pub fn event(mut self, name: impl Into<String>, fields: Vec<Field>) -> Self {
        self.events.push(EventDef::new(name, Vec::new(), fields));
        self
    }

    pub fn event_with_discriminator(
        mut self,
        name: impl Into<String>,
        discriminator: impl Into<Vec<u8>>,
        fields: Vec<Field>,
    ) -> Self {
        self.events
            .push(EventDef::new(name, discriminator.into(), fields));
        self
    }

    pub fn build(self) -> Result<SchemaModel, LoadError> {
        if let Some(name) = self.duplicate_type {
            return Err(LoadError::malformed(format!(
                "type '{name}' is defined more than once"
            )));
        }
        let encoding = self.encoding;
        let events = self
            .events
            .into_iter()
            .map(|mut event| {
                if event.discriminator.is_empty() {
                    event.discriminator =
                        discriminator::event_discriminator(&event.name, encoding.discriminator_len)?;
                }
                Ok(event)
            })
            .collect::<Result<Vec<_>, LoadError>>()?;
        SchemaModel::new(self.program, self.types, events, encoding)
    }
}
