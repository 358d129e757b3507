//! Bandwidth control commands
//!
//! All four commands share the same shape: the target subscriber as a MAC
//! attribute on the root, and a single required element carrying the rate.

use crate::commands::BANDWIDTH_HELP;
use crate::schema::{CommandSchema, NamedField, TypedField};
use crate::value::ValueKind;

macro_rules! bandwidth_schema {
    ($name:ident, $command:literal, $element:literal) => {
        pub static $name: CommandSchema = CommandSchema {
            command: $command,
            attributes: &[NamedField::typed(
                "SUBSCRIBER",
                TypedField::required(ValueKind::MacAddr).help("Subscriber's MAC address"),
            )],
            elements: &[NamedField::typed(
                $element,
                TypedField::required(ValueKind::Int).help(BANDWIDTH_HELP),
            )],
        };
    };
}

bandwidth_schema!(SET_BANDWIDTH_UP, "SET_BANDWIDTH_UP", "BANDWIDTH_UP");
bandwidth_schema!(SET_BANDWIDTH_DOWN, "SET_BANDWIDTH_DOWN", "BANDWIDTH_DOWN");
bandwidth_schema!(SET_BANDWIDTH_MAX_UP, "SET_BANDWIDTH_MAX_UP", "BANDWIDTH_MAX_UP");
bandwidth_schema!(
    SET_BANDWIDTH_MAX_DOWN,
    "SET_BANDWIDTH_MAX_DOWN",
    "BANDWIDTH_MAX_DOWN"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::error::NseError;

    #[test]
    fn test_set_bandwidth_shape() {
        let xml = Command::new(&SET_BANDWIDTH_MAX_DOWN)
            .set("SUBSCRIBER", "00:1A:2B:3C:4D:5E")
            .set("BANDWIDTH_MAX_DOWN", 2048)
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"SET_BANDWIDTH_MAX_DOWN\" SUBSCRIBER=\"001A2B3C4D5E\">\
             <BANDWIDTH_MAX_DOWN>2048</BANDWIDTH_MAX_DOWN></USG>"
        );
    }

    #[test]
    fn test_bandwidth_requires_subscriber() {
        let err = Command::new(&SET_BANDWIDTH_UP)
            .set("BANDWIDTH_UP", 128)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NseError::FieldMissing { ref field, .. } if field == "SUBSCRIBER"
        ));
    }

    #[test]
    fn test_bandwidth_value_must_be_numeric() {
        let err = Command::new(&SET_BANDWIDTH_UP)
            .set("SUBSCRIBER", "001A2B3C4D5E")
            .set("BANDWIDTH_UP", "fast")
            .validate()
            .unwrap_err();
        assert!(matches!(err, NseError::FieldInvalid { .. }));
    }
}
