//! PMS billing and room access commands
//!
//! Field semantics are opaque to this library; the property-management
//! system behind the NSE interprets them.

use crate::commands::{ENCRYPT_ATTR, EXPIRY_UNITS};
use crate::schema::{CommandSchema, NamedField, TypedField};
use crate::value::ValueKind;

/// `WFB_OPTION` attribute carried by `WFB_BUNDLED` elements.
static WFB_OPTION_ATTR: &[NamedField] = &[NamedField::typed(
    "WFB_OPTION",
    TypedField::optional(ValueKind::Choice {
        name: "WFB",
        allowed: &["A", "B", "C", "D"],
    }),
)];

/// Initiates subscriber authorization and payment through the PMS:
/// verifies room mapping, posts the access fee to the room bill, and adds
/// the subscriber to the internal database. If the subscriber is already
/// in the Current (active) memory table, CACHE_UPDATE must follow.
pub static USER_PAYMENT: CommandSchema = CommandSchema {
    command: "USER_PAYMENT",
    attributes: &[NamedField::fixed("PAYMENT_METHOD", "PMS")],
    elements: &[
        NamedField::typed(
            "USER_NAME",
            TypedField::required(ValueKind::Char(96)).help(
                "Subscriber's username. For 2-way PMS, the subscriber's MAC address \
                 is optional but recommended.",
            ),
        ),
        NamedField::typed(
            "REAL_NAME",
            TypedField::optional(ValueKind::Char(96))
                .help("Subscriber's real name as listed in PMS. Required for 2-way PMS"),
        ),
        NamedField::typed(
            "PASSWORD",
            TypedField::required(ValueKind::Char(128))
                .help("Password. ENCRYPT attribute: Either TRUE or FALSE")
                .attrs(ENCRYPT_ATTR),
        ),
        NamedField::typed(
            "EXPIRY_TIME",
            TypedField::optional(ValueKind::Int)
                .help("Expiry time. UNITS attribute: Either SECONDS, MINUTES, HOURS or DAYS")
                .attrs(EXPIRY_UNITS),
        ),
        NamedField::typed(
            "ROOM_NUMBER",
            TypedField::required(ValueKind::Char(8)).help(
                "Room number of access. For 2-way PMS, use the PMS database room number.",
            ),
        ),
        NamedField::typed(
            "PAYMENT",
            TypedField::optional(ValueKind::Float).help("Amount charged for access"),
        ),
        NamedField::typed(
            "MAC_ADDR",
            TypedField::required(ValueKind::MacAddr)
                .help("MAC address of user for post-paid PMS and 2-way PMS"),
        ),
        NamedField::typed(
            "REG_NUMBER",
            TypedField::required(ValueKind::Char(24)).help(
                "Reservation number of hotel guest for Micros Fidelio FIAS compliant \
                 Query and Post interface.",
            ),
        ),
        NamedField::typed(
            "BANDWIDTH_MAX_UP",
            TypedField::optional(ValueKind::Int).help(
                "This will set the Maximum Upstream bandwidth for the user without \
                 having to send any other Bandwidth XML Command.",
            ),
        ),
        NamedField::typed(
            "BANDWIDTH_MAX_DOWN",
            TypedField::optional(ValueKind::Int).help(
                "This will set the Maximum Downstream bandwidth for the user without \
                 having to send any other Bandwidth XML Command.",
            ),
        ),
        NamedField::typed(
            "COUNTDOWN",
            TypedField::optional(ValueKind::Bool).help(
                "This will set the user so that their allotted time will not start \
                 counting down, and the charge will not post, until they log in \
                 (note: only supported for 1-way PMS systems).",
            ),
        ),
        NamedField::typed(
            "BILLING_PLAN",
            TypedField::optional(ValueKind::Int).help(
                "This will allow selection of a specified billing plan for either an \
                 X over Y Setting or a WFB selection for the user.",
            ),
        ),
        NamedField::typed(
            "CC_SUFFIX",
            TypedField::optional(ValueKind::Text)
                .help("Last 4 Digits of the Credit Card for Marriott WFB PMS Verification."),
        ),
        NamedField::typed(
            "CC_EXPIRATION",
            TypedField::optional(ValueKind::Text).help(
                "Expiration Date on the Credit Card for Marriott WFB PMS Verification. \
                 Format = MMYY.",
            ),
        ),
        NamedField::typed(
            "WFB_BUNDLED",
            TypedField::optional(ValueKind::Int)
                .help("WFB Bundle Bill. 0 = Charge 1 = Bundle. WFB_OPTION: Either A, B, C or D")
                .attrs(WFB_OPTION_ATTR),
        ),
        NamedField::typed(
            "TRANS_ID",
            TypedField::optional(ValueKind::Int).help(
                "(32 bit unsigned Integer) Used to match commands with USER_STATUS \
                 messages. Information entered here will be mirrored on the \
                 USER_STATUS messages.",
            ),
        ),
        NamedField::typed(
            "REVENUE_CENTER",
            TypedField::optional(ValueKind::Text).help(
                "3 Digits to specify the Revenue Center for MICROS PMS, or 2 Digits to \
                 specify Revenue Code for Marriott WFB and Marriott FOSSE.",
            ),
        ),
        NamedField::typed(
            "CLASS_NAME",
            TypedField::optional(ValueKind::Char(64)).help(
                "Class name indicates the class that traffic to/from this subscriber \
                 should be assigned to for Class-Based Queuing purposes.",
            ),
        ),
    ],
};

/// Initiates a subscriber's e-commerce or special service purchase to be
/// charged via the PMS system.
pub static USER_PURCHASE: CommandSchema = CommandSchema {
    command: "USER_PURCHASE",
    attributes: &[NamedField::typed(
        "ROOM_NUMBER",
        TypedField::required(ValueKind::Char(8))
            .help("Room number (Port-Location 'Location' number)"),
    )],
    elements: &[
        NamedField::typed(
            "ITEM_CODE",
            TypedField::required(ValueKind::Text).help("Code of the item being purchased"),
        ),
        NamedField::typed(
            "ITEM_DESCRIPTION",
            TypedField::required(ValueKind::Text).help("Description of the item"),
        ),
        NamedField::typed(
            "ITEM_AMOUNT",
            TypedField::required(ValueKind::Float).help("Item amount"),
        ),
        NamedField::typed(
            "ITEM_TAX",
            TypedField::required(ValueKind::Float).help("Item tax"),
        ),
        NamedField::typed(
            "ITEM_TOTAL",
            TypedField::required(ValueKind::Float).help("Item total"),
        ),
        NamedField::typed(
            "REAL_NAME",
            TypedField::required(ValueKind::Text)
                .help("Name in the PMS database. Only needed for 2-way PMS"),
        ),
        NamedField::typed(
            "MAC_ADDRESS",
            TypedField::optional(ValueKind::MacAddr)
                .help("MAC Address of the Subscriber. Only needed for Post Paid PMS"),
        ),
        NamedField::typed(
            "REG_NUMBER",
            TypedField::required(ValueKind::Text)
                .help("Registration number required for 2-way FIAS PMS"),
        ),
        NamedField::typed(
            "CC_SUFFIX",
            TypedField::optional(ValueKind::Text)
                .help("Last 4 Digits of the Credit Card for Marriott WFB PMS Verification."),
        ),
        NamedField::typed(
            "CC_EXPIRATION",
            TypedField::optional(ValueKind::Text).help(
                "Expiration Date on the Credit Card for Marriott WFB PMS Verification. \
                 Format = MMYY.",
            ),
        ),
        NamedField::typed(
            "WFB_BUNDLED",
            TypedField::optional(ValueKind::Int)
                .help("WFB Bundle Bill. 0 = Charge 1 = Bundle. WFB_OPTION: Either A, B, C or D")
                .attrs(WFB_OPTION_ATTR),
        ),
        NamedField::typed(
            "TRANS_ID",
            TypedField::optional(ValueKind::Int).help(
                "(32 bit unsigned Integer) Used to match commands with USER_STATUS \
                 messages. Information entered here will be mirrored on the \
                 USER_STATUS messages.",
            ),
        ),
        NamedField::typed(
            "REVENUE_CENTER",
            TypedField::optional(ValueKind::Text).help(
                "3 Digits to specify the Revenue Center for MICROS PMS, or 2 Digits to \
                 specify Revenue Code for Marriott WFB and Marriott FOSSE.",
            ),
        ),
    ],
};

/// Submits a pending PMS transaction to be processed by the PMS Serial
/// Redirector.
pub static PMS_PENDING_TRANSACTION: CommandSchema = CommandSchema {
    command: "PMS_PENDING_TRANSACTION",
    attributes: &[],
    elements: &[
        NamedField::typed(
            "TRANSACTION_ID",
            TypedField::optional(ValueKind::Int).help(
                "(32 bit unsigned Integer) Used to match commands with \
                 PMS_TRANSACTION_RESPONSE messages. Information entered here will be \
                 mirrored on the PMS_TRANSACTION_RESPONSE messages.",
            ),
        ),
        NamedField::typed(
            "DATA",
            TypedField::required(ValueKind::Text).help(
                "The data that will be sent to the attached PMS system. Before \
                 sending, the data is framed with an ETX (hex 02) and an STX (hex 03) \
                 and appended with a checksum.",
            ),
        ),
    ],
};

/// Sets room access as per the Administrator's request to the NSE.
pub static ROOM_SET_ACCESS: CommandSchema = CommandSchema {
    command: "ROOM_SET_ACCESS",
    attributes: &[NamedField::typed(
        "ROOM_NUMBER",
        TypedField::required(ValueKind::Char(8))
            .help("Room number (Port-Location 'Location' number)"),
    )],
    elements: &[NamedField::typed(
        "ACCESS_MODE",
        TypedField::required(ValueKind::Choice {
            name: "AccessMode",
            allowed: &["ROOM_OPEN", "ROOM_CHARGE", "ROOM_BLOCK"],
        })
        .help("Either ROOM_OPEN, ROOM_CHARGE, or ROOM_BLOCK"),
    )],
};

/// Queries the access status of a room.
pub static ROOM_QUERY_ACCESS: CommandSchema = CommandSchema {
    command: "ROOM_QUERY_ACCESS",
    attributes: &[],
    elements: &[NamedField::typed(
        "ROOM_NUMBER",
        TypedField::required(ValueKind::Char(8))
            .help("Room number (Port-Location 'Location' number)"),
    )],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::value::FieldValue;

    #[test]
    fn test_user_payment_emits_fixed_payment_method() {
        let xml = Command::new(&USER_PAYMENT)
            .set("USER_NAME", "guest")
            .set("PASSWORD", "pw")
            .set("ROOM_NUMBER", "101")
            .set("MAC_ADDR", "00:1A:2B:3C:4D:5E")
            .set("REG_NUMBER", "R-1234")
            .to_xml()
            .unwrap();
        assert!(xml.starts_with("<USG COMMAND=\"USER_PAYMENT\" PAYMENT_METHOD=\"PMS\">"));
        assert!(xml.contains("<MAC_ADDR>001A2B3C4D5E</MAC_ADDR>"));
    }

    #[test]
    fn test_user_payment_encrypted_password() {
        let xml = Command::new(&USER_PAYMENT)
            .set("USER_NAME", "guest")
            .set(
                "PASSWORD",
                FieldValue::with_attrs("0a1b2c", [("encrypt", true.into())]),
            )
            .set("ROOM_NUMBER", "101")
            .set("MAC_ADDR", "001A2B3C4D5E")
            .set("REG_NUMBER", "R-1234")
            .to_xml()
            .unwrap();
        assert!(xml.contains("<PASSWORD ENCRYPT=\"TRUE\">0a1b2c</PASSWORD>"));
    }

    #[test]
    fn test_room_set_access_mode_is_canonicalized() {
        let xml = Command::new(&ROOM_SET_ACCESS)
            .set("ROOM_NUMBER", "204")
            .set("ACCESS_MODE", "room_c")
            .to_xml()
            .unwrap();
        assert!(xml.contains("<ACCESS_MODE>ROOM_CHARGE</ACCESS_MODE>"));
    }

    #[test]
    fn test_room_query_access_positional_binding() {
        let xml = Command::new(&ROOM_QUERY_ACCESS).arg("204").to_xml().unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"ROOM_QUERY_ACCESS\"><ROOM_NUMBER>204</ROOM_NUMBER></USG>"
        );
    }
}
