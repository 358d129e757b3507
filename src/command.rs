//! Command engine: field binding, validation and XML serialization
//!
//! A [`Command`] is a short-lived, single-writer builder: bind values
//! positionally or by name, then call [`Command::to_xml`] once to validate
//! and serialize. Serialization is deterministic (schema declaration order,
//! not insertion order) and idempotent — a second call on a valid instance
//! yields byte-identical output.
//!
//! # Example
//!
//! ```rust
//! use nse_xmlapi::commands::RADIUS_LOGIN;
//! use nse_xmlapi::Command;
//!
//! let xml = Command::new(&RADIUS_LOGIN)
//!     .set("SUB_USER_NAME", "alice")
//!     .set("SUB_PASSWORD", "secret")
//!     .set("SUB_MAC_ADDR", "00:1A:2B:3C:4D:5E")
//!     .to_xml()
//!     .unwrap();
//! assert!(xml.contains(r#"COMMAND="RADIUS_LOGIN""#));
//! ```

use std::collections::HashMap;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, warn};

use crate::commands;
use crate::constants::{COMMAND_ATTR, ROOT_TAG};
use crate::error::{NseError, NseResult};
use crate::schema::{CommandSchema, FieldSpec, NamedField, TypedField};
use crate::value::FieldValue;

/// One command instance being built for a single serialization.
///
/// Each instance owns its field store; nothing is shared between
/// instances. Field names are normalized to uppercase on binding.
#[derive(Debug, Clone)]
pub struct Command {
    schema: &'static CommandSchema,
    /// Positional values not yet mapped onto field names
    positional: Vec<FieldValue>,
    /// Bound values by normalized field name
    fields: HashMap<String, FieldValue>,
}

impl Command {
    /// Start an empty command for the given schema.
    pub fn new(schema: &'static CommandSchema) -> Self {
        Command {
            schema,
            positional: Vec::new(),
            fields: HashMap::new(),
        }
    }

    /// Look up a schema by command-type name and start a command for it.
    ///
    /// An unregistered name is a programmer error and yields
    /// [`NseError::UnknownCommand`].
    pub fn for_type(name: &str) -> NseResult<Self> {
        let normalized = name.to_ascii_uppercase();
        commands::lookup(&normalized)
            .map(Command::new)
            .ok_or(NseError::UnknownCommand(normalized))
    }

    /// Bind positional and named values in one call.
    ///
    /// Named keys are normalized to uppercase. Positional values are mapped
    /// in call order onto schema field order (attributes first, then
    /// elements), skipping fixed-literal fields and fields already bound by
    /// name — a named value always takes precedence over a positional one
    /// for the same field.
    pub fn bind<P, N, S>(schema: &'static CommandSchema, positional: P, named: N) -> Self
    where
        P: IntoIterator<Item = FieldValue>,
        N: IntoIterator<Item = (S, FieldValue)>,
        S: AsRef<str>,
    {
        let mut cmd = Command::new(schema);
        for (name, value) in named {
            cmd.fields
                .insert(name.as_ref().to_ascii_uppercase(), value);
        }
        cmd.positional.extend(positional);
        cmd
    }

    /// Bind the next positional value (builder form).
    pub fn arg(mut self, value: impl Into<FieldValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Bind a value by field name (builder form). Unknown names are
    /// accepted and carried; the engine is forgiving of extra fields.
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.fields
            .insert(name.to_ascii_uppercase(), value.into());
        self
    }

    /// The schema this command is bound to.
    pub fn schema(&self) -> &'static CommandSchema {
        self.schema
    }

    /// Read a bound value by field name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(&name.to_ascii_uppercase())
    }

    /// Human-readable help rendered from the schema.
    pub fn help(&self) -> String {
        format!("Help on class {}\n{}", self.schema.command, self.schema.describe())
    }

    /// Map pending positional values onto unbound field names.
    fn resolve_positional(&mut self) {
        if self.positional.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.positional);
        let unbound: Vec<&'static str> = self
            .schema
            .positional_names()
            .filter(|name| !self.fields.contains_key(*name))
            .collect();
        let mut names = unbound.into_iter();
        for value in pending {
            match names.next() {
                Some(name) => {
                    self.fields.insert(name.to_string(), value);
                }
                None => {
                    warn!(
                        command = self.schema.command,
                        "positional value beyond schema field list dropped"
                    );
                }
            }
        }
    }

    /// Validate every bound field against the schema.
    ///
    /// Attributes are checked first in declaration order, then elements;
    /// the first failure aborts. Present values are replaced by their
    /// canonical coerced form, which makes repeated validation (and hence
    /// repeated serialization) stable.
    pub fn validate(&mut self) -> NseResult<()> {
        self.resolve_positional();
        for part in [self.schema.attributes, self.schema.elements] {
            for named in part {
                self.validate_field(named)?;
            }
        }
        Ok(())
    }

    fn validate_field(&mut self, named: &NamedField) -> NseResult<()> {
        let field = match &named.spec {
            // Fixed literals are never caller-supplied
            FieldSpec::Fixed { .. } => return Ok(()),
            FieldSpec::Typed(field) => field,
        };

        let Some(value) = self.fields.get(named.name) else {
            if field.required {
                return Err(NseError::field_missing(self.schema.command, named.name));
            }
            return Ok(());
        };

        let canonical = match value {
            FieldValue::WithAttrs { value, attrs } => {
                self.coerce_structured(named.name, field, value.as_ref(), attrs)?
            }
            plain => {
                // A plain value supplies no nested attributes, so any
                // required one is missing.
                for spec in field.attrs {
                    if let FieldSpec::Typed(attr_field) = &spec.spec {
                        if attr_field.required {
                            return Err(NseError::field_missing(
                                self.schema.command,
                                &format!("{}.{}", named.name, spec.name),
                            ));
                        }
                    }
                }
                field
                    .kind
                    .coerce(plain)
                    .map_err(|e| NseError::field_invalid(self.schema.command, named.name, e))?
            }
        };
        self.fields.insert(named.name.to_string(), canonical);
        Ok(())
    }

    /// Validate a structured element value: the primary value against the
    /// element's kind, and each nested attribute
    /// against the element's nested attribute specs. Nested attributes
    /// without a spec pass through unvalidated; required nested attributes
    /// must be present.
    fn coerce_structured(
        &self,
        elem_name: &str,
        field: &TypedField,
        primary: &FieldValue,
        attrs: &[(String, FieldValue)],
    ) -> NseResult<FieldValue> {
        let value = field
            .kind
            .coerce(primary)
            .map_err(|e| NseError::field_invalid(self.schema.command, elem_name, e))?;

        let normalized: Vec<(String, FieldValue)> = attrs
            .iter()
            .map(|(k, v)| (k.to_ascii_uppercase(), v.clone()))
            .collect();

        let mut coerced = Vec::with_capacity(normalized.len());
        for spec in field.attrs {
            let qualified = format!("{}.{}", elem_name, spec.name);
            let bound = normalized.iter().find(|(k, _)| k == spec.name);
            match (&spec.spec, bound) {
                (FieldSpec::Fixed { .. }, _) => {}
                (FieldSpec::Typed(attr_field), Some((_, v))) => {
                    let canonical = attr_field.kind.coerce(v).map_err(|e| {
                        NseError::field_invalid(self.schema.command, &qualified, e)
                    })?;
                    coerced.push((spec.name.to_string(), canonical));
                }
                (FieldSpec::Typed(attr_field), None) => {
                    if attr_field.required {
                        return Err(NseError::field_missing(self.schema.command, &qualified));
                    }
                }
            }
        }
        // Carry nested attributes the schema does not know about
        for (k, v) in normalized {
            if field.attrs.iter().all(|spec| spec.name != k) {
                coerced.push((k, v));
            }
        }

        Ok(FieldValue::WithAttrs {
            value: Box::new(value),
            attrs: coerced,
        })
    }

    /// Validate and serialize to the USG wire format.
    ///
    /// Emits a single `USG` root with a `COMMAND` attribute, one wire
    /// attribute per bound or fixed schema attribute, and one child element
    /// per bound or fixed schema element, all in schema declaration order.
    pub fn to_xml(&mut self) -> NseResult<String> {
        self.validate()?;
        debug!(command = self.schema.command, "serializing command");

        let encode_err =
            |e: quick_xml::Error| NseError::RequestEncode { message: e.to_string() };

        let mut writer = Writer::new(Vec::new());
        let mut root = BytesStart::new(ROOT_TAG);
        root.push_attribute((COMMAND_ATTR, self.schema.command));
        for named in self.schema.attributes {
            match &named.spec {
                FieldSpec::Fixed { value } => root.push_attribute((named.name, *value)),
                FieldSpec::Typed(_) => {
                    if let Some(value) = self.fields.get(named.name) {
                        root.push_attribute((named.name, value.to_string().as_str()));
                    }
                }
            }
        }

        // Elements actually present in this instance, schema order
        let present: Vec<(&NamedField, Option<&FieldValue>)> = self
            .schema
            .elements
            .iter()
            .filter_map(|named| match &named.spec {
                FieldSpec::Fixed { .. } => Some((named, None)),
                FieldSpec::Typed(_) => self.fields.get(named.name).map(|v| (named, Some(v))),
            })
            .collect();

        if present.is_empty() {
            writer.write_event(Event::Empty(root)).map_err(encode_err)?;
        } else {
            writer.write_event(Event::Start(root)).map_err(encode_err)?;
            for (named, value) in present {
                let mut elem = BytesStart::new(named.name);
                let text = match (&named.spec, value) {
                    (FieldSpec::Fixed { value }, _) => (*value).to_string(),
                    (_, Some(FieldValue::WithAttrs { value, attrs })) => {
                        for (k, v) in attrs {
                            elem.push_attribute((k.as_str(), v.to_string().as_str()));
                        }
                        value.to_string()
                    }
                    (_, Some(plain)) => plain.to_string(),
                    // unreachable: typed elements are only listed when bound
                    (_, None) => String::new(),
                };
                writer.write_event(Event::Start(elem)).map_err(encode_err)?;
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(encode_err)?;
                writer
                    .write_event(Event::End(BytesEnd::new(named.name)))
                    .map_err(encode_err)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
                .map_err(encode_err)?;
        }

        String::from_utf8(writer.into_inner()).map_err(|e| NseError::RequestEncode {
            message: e.to_string(),
        })
    }
}
