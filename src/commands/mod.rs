//! Command catalogs: one [`CommandSchema`] per NSE command type
//!
//! These are plain configuration data consumed by the command engine.
//! Shared field shapes (time units, encrypted passwords, bandwidth counts)
//! are defined once here and referenced by the per-area catalogs.

mod network;
mod pms;
mod radius;
mod subscriber;

pub use network::{
    SET_BANDWIDTH_DOWN, SET_BANDWIDTH_MAX_DOWN, SET_BANDWIDTH_MAX_UP, SET_BANDWIDTH_UP,
};
pub use pms::{
    PMS_PENDING_TRANSACTION, ROOM_QUERY_ACCESS, ROOM_SET_ACCESS, USER_PAYMENT, USER_PURCHASE,
};
pub use radius::{RADIUS_LOGIN, RADIUS_LOGOUT};
pub use subscriber::{
    ACCESS_CODE_ADD, CACHE_UPDATE, DEVICE_ADD, DEVICE_DELETE, GROUP_ADD, SUBSCRIBER_ADD,
    SUBSCRIBER_QUERY_AUTH, SUBSCRIBER_QUERY_CURRENT, USER_AUTHORIZE, USER_DELETE, USER_QUERY,
};

use crate::schema::{CommandSchema, NamedField, TypedField};
use crate::value::ValueKind;

/// Expiry time unit set shared by several commands.
pub(crate) const TIME_UNIT: ValueKind = ValueKind::Choice {
    name: "TimeUnit",
    allowed: &["DAYS", "HOURS", "MINUTES", "SECONDS"],
};

/// `UNITS` attribute attached to `EXPIRY_TIME` elements.
pub(crate) static EXPIRY_UNITS: &[NamedField] =
    &[NamedField::typed("UNITS", TypedField::optional(TIME_UNIT))];

/// `ENCRYPT` attribute attached to `PASSWORD` elements.
pub(crate) static ENCRYPT_ATTR: &[NamedField] =
    &[NamedField::typed("ENCRYPT", TypedField::optional(ValueKind::Bool))];

/// Help text shared by the bandwidth elements.
pub(crate) const BANDWIDTH_HELP: &str =
    "Number measured in Kbps (i.e. for 128,000 bits per second, enter 128)";

/// Every schema this library knows about.
static REGISTRY: &[&CommandSchema] = &[
    &RADIUS_LOGIN,
    &RADIUS_LOGOUT,
    &SUBSCRIBER_ADD,
    &DEVICE_ADD,
    &GROUP_ADD,
    &ACCESS_CODE_ADD,
    &CACHE_UPDATE,
    &USER_DELETE,
    &DEVICE_DELETE,
    &USER_QUERY,
    &SUBSCRIBER_QUERY_CURRENT,
    &SUBSCRIBER_QUERY_AUTH,
    &USER_AUTHORIZE,
    &SET_BANDWIDTH_UP,
    &SET_BANDWIDTH_DOWN,
    &SET_BANDWIDTH_MAX_UP,
    &SET_BANDWIDTH_MAX_DOWN,
    &USER_PAYMENT,
    &USER_PURCHASE,
    &PMS_PENDING_TRANSACTION,
    &ROOM_SET_ACCESS,
    &ROOM_QUERY_ACCESS,
];

/// Look up a schema by its (uppercase) command-type name.
pub fn lookup(name: &str) -> Option<&'static CommandSchema> {
    REGISTRY.iter().copied().find(|s| s.command == name)
}

/// Iterate over all registered schemas.
pub fn all() -> impl Iterator<Item = &'static CommandSchema> {
    REGISTRY.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;

    #[test]
    fn test_registry_names_match_schemas() {
        for schema in all() {
            let found = lookup(schema.command).expect(schema.command);
            assert!(std::ptr::eq(found, schema));
        }
    }

    #[test]
    fn test_registry_names_are_unique() {
        let names: Vec<_> = all().map(|s| s.command).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(
                !names[i + 1..].contains(name),
                "duplicate command type {name}"
            );
        }
    }

    #[test]
    fn test_attribute_and_element_names_are_disjoint() {
        for schema in all() {
            for attr in schema.attributes {
                assert!(
                    schema.elements.iter().all(|e| e.name != attr.name),
                    "{}: {} is both attribute and element",
                    schema.command,
                    attr.name
                );
            }
        }
    }

    #[test]
    fn test_field_names_are_uppercase_and_unique_per_schema() {
        for schema in all() {
            let names: Vec<_> = schema.fields().map(|f| f.name).collect();
            for (i, name) in names.iter().enumerate() {
                assert_eq!(*name, name.to_ascii_uppercase(), "{}", schema.command);
                assert!(
                    !names[i + 1..].contains(name),
                    "{}: duplicate field {name}",
                    schema.command
                );
            }
        }
    }

    #[test]
    fn test_nested_attribute_specs_are_themselves_well_formed() {
        for schema in all() {
            for field in schema.fields() {
                if let FieldSpec::Typed(typed) = &field.spec {
                    for nested in typed.attrs {
                        assert_eq!(nested.name, nested.name.to_ascii_uppercase());
                    }
                }
            }
        }
    }
}
