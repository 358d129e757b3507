//! Declarative command schemas
//!
//! Each NSE command type is described by a [`CommandSchema`]: an ordered
//! list of attribute specifications (XML attributes on the `USG` root) and
//! an ordered list of element specifications (XML child elements, possibly
//! carrying their own attributes). Schemas are `'static` read-only data,
//! resolved at compile time and safe to share across threads.
//!
//! A field is either an attribute or an element, never both; attribute and
//! element name sets of one schema are disjoint.

use crate::value::ValueKind;

/// Specification of one attribute or element.
///
/// The two variants are mutually exclusive by construction: a fixed-literal
/// field is never supplied by the caller and is always emitted; a typed
/// field is bound by the caller and validated against its [`ValueKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    /// Fixed literal, emitted verbatim on every serialization.
    Fixed {
        /// The literal wire value
        value: &'static str,
    },
    /// Caller-supplied field with a type constructor.
    Typed(TypedField),
}

/// A caller-supplied field: type constructor, required flag, optional help
/// text, and optionally nested attribute specifications (for elements that
/// render with their own XML attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedField {
    /// Type constructor applied during validation
    pub kind: ValueKind,
    /// Whether validation fails when the field is absent
    pub required: bool,
    /// Human-readable description for generated help text
    pub help: Option<&'static str>,
    /// Nested attribute specs; empty for plain fields
    pub attrs: &'static [NamedField],
}

impl TypedField {
    /// A required field of the given kind.
    pub const fn required(kind: ValueKind) -> Self {
        TypedField {
            kind,
            required: true,
            help: None,
            attrs: &[],
        }
    }

    /// An optional field of the given kind.
    pub const fn optional(kind: ValueKind) -> Self {
        TypedField {
            kind,
            required: false,
            help: None,
            attrs: &[],
        }
    }

    /// Attach help text.
    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Attach nested attribute specifications.
    pub const fn attrs(mut self, attrs: &'static [NamedField]) -> Self {
        self.attrs = attrs;
        self
    }
}

/// A field specification together with its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedField {
    /// Wire name of the attribute or element (uppercase by convention)
    pub name: &'static str,
    /// The field's specification
    pub spec: FieldSpec,
}

impl NamedField {
    /// A named, caller-supplied field.
    pub const fn typed(name: &'static str, field: TypedField) -> Self {
        NamedField {
            name,
            spec: FieldSpec::Typed(field),
        }
    }

    /// A named fixed-literal field.
    pub const fn fixed(name: &'static str, value: &'static str) -> Self {
        NamedField {
            name,
            spec: FieldSpec::Fixed { value },
        }
    }
}

/// Declarative description of one command type.
#[derive(Debug, Clone, Copy)]
pub struct CommandSchema {
    /// Wire protocol `COMMAND` discriminator
    pub command: &'static str,
    /// Attributes of the root element, in declaration order
    pub attributes: &'static [NamedField],
    /// Child elements, in declaration order
    pub elements: &'static [NamedField],
}

impl CommandSchema {
    /// All fields in wire order: attributes first, then elements.
    pub fn fields(&self) -> impl Iterator<Item = &NamedField> {
        self.attributes.iter().chain(self.elements.iter())
    }

    /// Names positional values bind to, in wire order. Fixed-literal
    /// fields are never caller-supplied, so they are skipped.
    pub fn positional_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields().filter_map(|f| match f.spec {
            FieldSpec::Fixed { .. } => None,
            FieldSpec::Typed(_) => Some(f.name),
        })
    }

    /// Look up a field by its (already normalized) wire name.
    pub fn find(&self, name: &str) -> Option<&NamedField> {
        self.fields().find(|f| f.name == name)
    }

    /// Render human-readable help: every attribute then every element,
    /// with type name, required/optional marker, and help text when
    /// present. Fixed literals render as `name = value`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if !self.attributes.is_empty() {
            out.push_str("\nAttributes:\n");
            out.push_str(&render_fields(self.attributes));
        }
        if !self.elements.is_empty() {
            out.push_str("\nElements:\n");
            out.push_str(&render_fields(self.elements));
        }
        out
    }
}

fn render_fields(fields: &[NamedField]) -> String {
    fields
        .iter()
        .map(|f| match &f.spec {
            FieldSpec::Fixed { value } => format!("  {} = {}", f.name, value),
            FieldSpec::Typed(field) => {
                let mut line = format!(
                    "  {} ({}, {})",
                    f.name,
                    field.kind.type_name(),
                    if field.required { "required" } else { "optional" }
                );
                if let Some(help) = field.help {
                    line.push_str(": ");
                    line.push_str(help);
                }
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    static UNITS: &[NamedField] = &[NamedField::typed(
        "UNITS",
        TypedField::optional(ValueKind::Choice {
            name: "TimeUnit",
            allowed: &["DAYS", "HOURS", "MINUTES", "SECONDS"],
        }),
    )];

    static SCHEMA: CommandSchema = CommandSchema {
        command: "TEST_TYPE",
        attributes: &[
            NamedField::typed("ATTR1", TypedField::required(ValueKind::Text)),
            NamedField::fixed("ATTR2", "100"),
        ],
        elements: &[
            NamedField::typed(
                "ELEM1",
                TypedField::required(ValueKind::FixedChar(13)).help("thirteen chars"),
            ),
            NamedField::typed(
                "ELEM2",
                TypedField::optional(ValueKind::Int).attrs(UNITS),
            ),
        ],
    };

    #[test]
    fn test_fields_iterate_attributes_then_elements() {
        let names: Vec<_> = SCHEMA.fields().map(|f| f.name).collect();
        assert_eq!(names, ["ATTR1", "ATTR2", "ELEM1", "ELEM2"]);
    }

    #[test]
    fn test_positional_names_skip_fixed_literals() {
        let names: Vec<_> = SCHEMA.positional_names().collect();
        assert_eq!(names, ["ATTR1", "ELEM1", "ELEM2"]);
    }

    #[test]
    fn test_find_spans_both_field_lists() {
        assert!(SCHEMA.find("ATTR2").is_some());
        assert!(SCHEMA.find("ELEM1").is_some());
        assert!(SCHEMA.find("MISSING").is_none());
    }

    #[test]
    fn test_describe_renders_type_marker_and_literals() {
        let text = SCHEMA.describe();
        assert!(text.contains("Attributes:"));
        assert!(text.contains("  ATTR1 (str, required)"));
        assert!(text.contains("  ATTR2 = 100"));
        assert!(text.contains("Elements:"));
        assert!(text.contains("  ELEM1 (char, required): thirteen chars"));
        assert!(text.contains("  ELEM2 (int, optional)"));
    }
}
