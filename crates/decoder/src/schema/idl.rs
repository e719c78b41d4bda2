// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Anchor IDL JSON to [`SchemaModel`] conversion.
//!
//! Both IDL generations are accepted:
//! - legacy (Anchor 0.29 and older): events list their fields inline, there
//!   are no discriminators and references look like `{"defined": "Name"}`
//! - current (Anchor 0.30 and newer): events carry a discriminator and point
//!   at a struct of the same name in `types`, references look like
//!   `{"defined": {"name": "Name"}}`

use super::{EventDef, Field, LoadError, LoadOptions, SchemaModel, TypeNode, Variant};
use super::{DefinedTypes, PrimitiveKind};
use crate::discriminator::event_discriminator;
use heck::ToSnakeCase;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawIdl {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    events: Vec<RawEvent>,
    #[serde(default)]
    types: Vec<RawTypeDef>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    discriminator: Option<Vec<u8>>,
    /// Present in legacy IDLs only.
    #[serde(default)]
    fields: Option<Vec<RawField>>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: RawType,
}

#[derive(Debug, Deserialize)]
struct RawTypeDef {
    name: String,
    #[serde(default)]
    generics: Vec<serde_json::Value>,
    #[serde(rename = "type")]
    ty: RawTypeDefKind,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RawTypeDefKind {
    Struct {
        #[serde(default)]
        fields: Option<RawFields>,
    },
    Enum {
        variants: Vec<RawVariant>,
    },
    Type {
        alias: RawType,
    },
}

#[derive(Debug, Deserialize)]
struct RawVariant {
    name: String,
    #[serde(default)]
    fields: Option<RawFields>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFields {
    Named(Vec<RawField>),
    Tuple(Vec<RawType>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawType {
    Name(String),
    Compound(RawCompound),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawCompound {
    Vec(Box<RawType>),
    Option(Box<RawType>),
    #[serde(rename = "coption")]
    COption(serde::de::IgnoredAny),
    Array(Box<RawType>, RawArrayLen),
    Defined(RawDefined),
    Generic(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawArrayLen {
    Fixed(usize),
    Generic { generic: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDefined {
    Name(String),
    Ref {
        name: String,
        #[serde(default)]
        generics: Vec<serde_json::Value>,
    },
}

/// Parse and validate an IDL document.
pub(crate) fn parse(source: &str, options: &LoadOptions) -> Result<SchemaModel, LoadError> {
    let raw: RawIdl = serde_json::from_str(source)
        .map_err(|e| LoadError::malformed(format!("invalid IDL JSON: {e}")))?;

    let converter = Converter { options };
    let types = converter.types(&raw.types)?;

    let events = raw
        .events
        .iter()
        .map(|event| converter.event(event, &types))
        .collect::<Result<Vec<_>, _>>()?;

    let program = raw
        .metadata
        .and_then(|metadata| metadata.name)
        .or(raw.name);

    SchemaModel::new(program, types, events, options.encoding)
}

struct Converter<'a> {
    options: &'a LoadOptions,
}

impl Converter<'_> {
    fn types(&self, defs: &[RawTypeDef]) -> Result<DefinedTypes, LoadError> {
        let mut types = DefinedTypes::with_capacity(defs.len());
        for def in defs {
            if !def.generics.is_empty() {
                tracing::warn!(
                    type_name = %def.name,
                    "Skipping generic type definition, generics are not supported"
                );
                continue;
            }
            let node = self.type_def(&def.ty)?;
            if types.insert(def.name.clone(), node).is_some() {
                return Err(LoadError::malformed(format!(
                    "type '{}' is defined more than once",
                    def.name
                )));
            }
        }
        Ok(types)
    }

    fn type_def(&self, kind: &RawTypeDefKind) -> Result<TypeNode, LoadError> {
        match kind {
            RawTypeDefKind::Struct { fields } => {
                let fields = match fields {
                    Some(fields) => self.fields(fields)?,
                    None => Vec::new(),
                };
                Ok(TypeNode::Struct(fields))
            }
            RawTypeDefKind::Enum { variants } => variants
                .iter()
                .map(|variant| -> Result<Variant, LoadError> {
                    Ok(match &variant.fields {
                        Some(fields) => Variant::with_payload(
                            variant.name.clone(),
                            TypeNode::Struct(self.fields(fields)?),
                        ),
                        None => Variant::unit(variant.name.clone()),
                    })
                })
                .collect::<Result<Vec<_>, LoadError>>()
                .map(TypeNode::Enum),
            RawTypeDefKind::Type { alias } => self.ty(alias),
        }
    }

    /// Tuple members are named by position: "0", "1", ...
    fn fields(&self, fields: &RawFields) -> Result<Vec<Field>, LoadError> {
        match fields {
            RawFields::Named(fields) => fields.iter().map(|field| self.field(field)).collect(),
            RawFields::Tuple(types) => types
                .iter()
                .enumerate()
                .map(|(index, ty)| -> Result<Field, LoadError> {
                    Ok(Field::new(index.to_string(), self.ty(ty)?))
                })
                .collect(),
        }
    }

    fn field(&self, field: &RawField) -> Result<Field, LoadError> {
        let name = if self.options.snake_case_fields {
            field.name.to_snake_case()
        } else {
            field.name.clone()
        };
        Ok(Field::new(name, self.ty(&field.ty)?))
    }

    fn ty(&self, raw: &RawType) -> Result<TypeNode, LoadError> {
        match raw {
            RawType::Name(name) if name == "bytes" => {
                Ok(TypeNode::sequence(TypeNode::primitive(PrimitiveKind::U8)))
            }
            RawType::Name(name) => PrimitiveKind::from_idl_name(name)
                .map(TypeNode::primitive)
                .ok_or_else(|| LoadError::malformed(format!("unsupported type '{name}'"))),
            RawType::Compound(compound) => match compound {
                RawCompound::Vec(inner) => Ok(TypeNode::sequence(self.ty(inner)?)),
                RawCompound::Option(inner) => Ok(TypeNode::option(self.ty(inner)?)),
                RawCompound::COption(_) => {
                    Err(LoadError::malformed("coption types are not supported"))
                }
                RawCompound::Array(inner, RawArrayLen::Fixed(len)) => {
                    Ok(TypeNode::array(self.ty(inner)?, *len))
                }
                RawCompound::Array(_, RawArrayLen::Generic { generic }) => Err(
                    LoadError::malformed(format!("array length generic '{generic}' is not supported")),
                ),
                RawCompound::Defined(RawDefined::Name(name)) => Ok(TypeNode::named(name.clone())),
                RawCompound::Defined(RawDefined::Ref { name, generics }) => {
                    if generics.is_empty() {
                        Ok(TypeNode::named(name.clone()))
                    } else {
                        Err(LoadError::malformed(format!(
                            "reference to '{name}' with generic arguments is not supported"
                        )))
                    }
                }
                RawCompound::Generic(name) => Err(LoadError::malformed(format!(
                    "generic type parameter '{name}' is not supported"
                ))),
            },
        }
    }

    fn event(&self, event: &RawEvent, types: &DefinedTypes) -> Result<EventDef, LoadError> {
        let fields = match &event.fields {
            Some(fields) => fields
                .iter()
                .map(|field| self.field(field))
                .collect::<Result<Vec<_>, _>>()?,
            None => match types.get(&event.name) {
                Some(TypeNode::Struct(fields)) => fields.clone(),
                Some(_) => {
                    return Err(LoadError::malformed(format!(
                        "event '{}' must refer to a struct type",
                        event.name
                    )));
                }
                None => return Err(LoadError::UnresolvedReference(event.name.clone())),
            },
        };

        let discriminator = match &event.discriminator {
            Some(discriminator) => discriminator.clone(),
            None => event_discriminator(&event.name, self.options.encoding.discriminator_len)?,
        };

        Ok(EventDef::new(event.name.clone(), discriminator, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;

    fn load(source: &str) -> Result<SchemaModel, LoadError> {
        parse(source, &LoadOptions::default())
    }

    #[test]
    fn test_load_current_idl() {
        let schema = load(test_fixtures::MINT_PROGRAM_IDL).unwrap();
        assert_eq!(schema.program(), Some("mint_program"));

        let event = schema.event("TokensMinted").unwrap();
        assert_eq!(event.discriminator(), &[207, 212, 128, 194, 175, 54, 64, 24]);
        let names: Vec<_> = event.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["mint", "recipient", "amount"]);
        assert_eq!(
            event.fields()[0].ty,
            TypeNode::primitive(PrimitiveKind::Pubkey)
        );
    }

    #[test]
    fn test_load_legacy_idl_computes_discriminators() {
        let schema = load(test_fixtures::RED_PACKET_IDL).unwrap();
        assert_eq!(schema.program(), Some("red_packet"));
        assert_eq!(schema.events().len(), 4);

        let claimed = schema.event("RedPacketClaimed").unwrap();
        assert_eq!(hex::encode(claimed.discriminator()), "5ecee22f159d8e24");
        let names: Vec<_> = claimed.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["claimer", "red_packet", "amount", "red_packet_id"]);
    }

    #[test]
    fn test_legacy_field_names_kept_when_renaming_disabled() {
        let options = LoadOptions {
            snake_case_fields: false,
            ..Default::default()
        };
        let schema = parse(test_fixtures::RED_PACKET_IDL, &options).unwrap();
        let claimed = schema.event("RedPacketClaimed").unwrap();
        assert_eq!(claimed.fields()[1].name, "redPacket");
    }

    #[test]
    fn test_load_composite_types() {
        let schema = load(test_fixtures::GOVERNANCE_IDL).unwrap();
        let types = schema.types();

        assert_eq!(
            types.get("ProposalState"),
            Some(&TypeNode::Enum(vec![
                Variant::unit("Draft"),
                Variant::with_payload(
                    "Voting",
                    TypeNode::Struct(vec![Field::new(
                        "ends_at",
                        TypeNode::primitive(PrimitiveKind::I64)
                    )])
                ),
                Variant::with_payload(
                    "Closed",
                    TypeNode::Struct(vec![
                        Field::new("0", TypeNode::primitive(PrimitiveKind::Bool)),
                        Field::new("1", TypeNode::primitive(PrimitiveKind::U32)),
                    ])
                ),
            ]))
        );

        let created = schema.event("ProposalCreated").unwrap();
        let by_name = |name: &str| {
            created
                .fields()
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.ty.clone())
        };
        assert_eq!(
            by_name("options"),
            Some(TypeNode::sequence(TypeNode::primitive(PrimitiveKind::String)))
        );
        assert_eq!(
            by_name("quorum"),
            Some(TypeNode::option(TypeNode::primitive(PrimitiveKind::U64)))
        );
        assert_eq!(
            by_name("tags"),
            Some(TypeNode::array(TypeNode::primitive(PrimitiveKind::U8), 4))
        );
        assert_eq!(by_name("state"), Some(TypeNode::named("ProposalState")));
        assert_eq!(
            by_name("memo"),
            Some(TypeNode::sequence(TypeNode::primitive(PrimitiveKind::U8)))
        );
    }

    #[test]
    fn test_legacy_defined_string_and_alias() {
        let idl = r#"{
            "name": "legacy",
            "types": [
                { "name": "Amount", "type": { "kind": "type", "alias": "u64" } },
                { "name": "Pair", "type": { "kind": "struct", "fields": [
                    { "name": "left", "type": { "defined": "Amount" } },
                    { "name": "right", "type": { "defined": "Amount" } }
                ] } }
            ],
            "events": [
                { "name": "Paired", "fields": [{ "name": "pair", "type": { "defined": "Pair" } }] }
            ]
        }"#;
        let schema = load(idl).unwrap();
        assert_eq!(
            schema.types().get("Amount"),
            Some(&TypeNode::primitive(PrimitiveKind::U64))
        );
        assert_eq!(schema.event("Paired").unwrap().fields()[0].ty, TypeNode::named("Pair"));
    }

    #[test]
    fn test_event_without_matching_type() {
        let idl = r#"{ "events": [{ "name": "Ghost", "discriminator": [1, 2, 3, 4, 5, 6, 7, 8] }] }"#;
        assert_eq!(
            load(idl).unwrap_err(),
            LoadError::UnresolvedReference("Ghost".to_string())
        );
    }

    #[test]
    fn test_event_type_must_be_struct() {
        let idl = r#"{
            "events": [{ "name": "Flag", "discriminator": [1, 2, 3, 4, 5, 6, 7, 8] }],
            "types": [{ "name": "Flag", "type": { "kind": "enum", "variants": [{ "name": "On" }] } }]
        }"#;
        assert!(matches!(load(idl), Err(LoadError::MalformedSchema(_))));
    }

    #[test]
    fn test_unresolved_field_reference() {
        let idl = r#"{
            "events": [{ "name": "E", "fields": [{ "name": "x", "type": { "defined": { "name": "Nope" } } }] }]
        }"#;
        assert_eq!(
            load(idl).unwrap_err(),
            LoadError::UnresolvedReference("Nope".to_string())
        );
    }

    #[test]
    fn test_unsupported_types_are_malformed() {
        for ty in [
            r#""u256""#,
            r#"{ "coption": "u64" }"#,
            r#"{ "generic": "T" }"#,
            r#"{ "array": ["u8", { "generic": "N" }] }"#,
        ] {
            let idl = format!(
                r#"{{ "events": [{{ "name": "E", "fields": [{{ "name": "x", "type": {ty} }}] }}] }}"#
            );
            assert!(
                matches!(load(&idl), Err(LoadError::MalformedSchema(_))),
                "{ty} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(load("{ not json"), Err(LoadError::MalformedSchema(_))));
        assert!(matches!(
            load(r#"{ "events": [{ "fields": [] }] }"#),
            Err(LoadError::MalformedSchema(_))
        ));
    }

    #[test]
    fn test_generic_type_definitions_are_skipped() {
        let idl = r#"{
            "types": [
                { "name": "Wrapper", "generics": [{ "kind": "type", "name": "T" }],
                  "type": { "kind": "struct", "fields": [{ "name": "inner", "type": { "generic": "T" } }] } },
                { "name": "Plain", "type": { "kind": "struct", "fields": [] } }
            ]
        }"#;
        let schema = load(idl).unwrap();
        assert!(!schema.types().contains_key("Wrapper"));
        assert!(schema.types().contains_key("Plain"));
    }

    #[test]
    fn test_duplicate_type_definitions() {
        let idl = r#"{
            "types": [
                { "name": "A", "type": { "kind": "struct", "fields": [] } },
                { "name": "A", "type": { "kind": "struct", "fields": [] } }
            ]
        }"#;
        assert!(matches!(load(idl), Err(LoadError::MalformedSchema(_))));
    }

    #[test]
    fn test_discriminator_width_option() {
        let options = LoadOptions {
            encoding: crate::schema::EncodingParams {
                discriminator_len: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let schema = parse(test_fixtures::RED_PACKET_IDL, &options).unwrap();
        assert_eq!(
            schema.event("RedPacketClaimed").unwrap().discriminator(),
            &[0x5e, 0xce, 0xe2, 0x2f]
        );
        assert_eq!(schema.min_discriminator_len(), 4);
    }
}
