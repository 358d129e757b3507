//! RADIUS session commands

use crate::schema::{CommandSchema, NamedField, TypedField};
use crate::value::ValueKind;

/// Logs a subscriber in through the NSE's RADIUS client.
pub static RADIUS_LOGIN: CommandSchema = CommandSchema {
    command: "RADIUS_LOGIN",
    attributes: &[],
    elements: &[
        NamedField::typed(
            "SUB_USER_NAME",
            TypedField::required(ValueKind::Char(96)).help("Subscriber's username"),
        ),
        NamedField::typed(
            "SUB_PASSWORD",
            TypedField::required(ValueKind::Char(128)).help("Subscriber's password"),
        ),
        NamedField::typed(
            "SUB_MAC_ADDR",
            TypedField::required(ValueKind::MacAddr).help("Subscriber's MAC address"),
        ),
        NamedField::typed(
            "PORTAL_SUB_ID",
            TypedField::optional(ValueKind::Char(37)).help(
                "Unique identifier that the Portal Page web server can send to the NSE \
                 which will be sent back with status response",
            ),
        ),
    ],
};

/// Logs a subscriber out; at least one of username or MAC address should
/// be supplied.
pub static RADIUS_LOGOUT: CommandSchema = CommandSchema {
    command: "RADIUS_LOGOUT",
    attributes: &[],
    elements: &[
        NamedField::typed(
            "SUB_USER_NAME",
            TypedField::optional(ValueKind::Char(96))
                .help("Subscriber's username (optional if MAC address is present)"),
        ),
        NamedField::typed(
            "SUB_MAC_ADDR",
            TypedField::optional(ValueKind::MacAddr)
                .help("Subscriber's MAC address (optional if username is present)"),
        ),
    ],
};
