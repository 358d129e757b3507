//! Subscriber database commands
//!
//! The four `*_ADD` commands share a common block of profile elements
//! (bandwidth caps, class name, DHCP subnet, user-definable strings);
//! `profile_schema!` expands that block once per schema so every schema
//! owns an independent field list.

use crate::commands::{ENCRYPT_ATTR, EXPIRY_UNITS};
use crate::schema::{CommandSchema, NamedField, TypedField};
use crate::value::ValueKind;

macro_rules! profile_schema {
    ($name:ident, $command:literal,
     attributes: [$($attr:expr),* $(,)?],
     extras: [$($extra:expr),* $(,)?]) => {
        pub static $name: CommandSchema = CommandSchema {
            command: $command,
            attributes: &[$($attr),*],
            elements: &[
                NamedField::typed(
                    "BANDWIDTH_MAX_DOWN",
                    TypedField::optional(ValueKind::Int)
                        .help("Maximum Downstream bandwidth (int, optional)"),
                ),
                NamedField::typed(
                    "BANDWIDTH_MAX_UP",
                    TypedField::optional(ValueKind::Int)
                        .help("Maximum Upstream bandwidth (int, optional)"),
                ),
                NamedField::typed(
                    "CLASS_NAME",
                    TypedField::optional(ValueKind::Char(64)).help(
                        "Class name (char [64], optional). Indicates the class that \
                         traffic to/from this user should be assigned to for \
                         Class-Based Queuing purposes",
                    ),
                ),
                NamedField::typed(
                    "DHCP_SUBNET",
                    TypedField::optional(ValueKind::Char(10)).help(
                        "DHCP subnet (char [10], optional). Subnet based on configured \
                         DHCP subnets in the NSE",
                    ),
                ),
                NamedField::typed(
                    "QOS_POLICY",
                    TypedField::optional(ValueKind::Text).help(
                        "QoS Policy (str, optional). Select and add the QoS Policy that \
                         is configured on the NSE to the profile for the user",
                    ),
                ),
                NamedField::typed(
                    "SMTP_REDIRECT",
                    TypedField::optional(ValueKind::Bool).help(
                        "SMTP Redirection (bool, optional). Either TRUE or FALSE. If not \
                         included, the User will have this variable as TRUE for their profile",
                    ),
                ),
                NamedField::typed(
                    "USER_DEF1",
                    TypedField::optional(ValueKind::Char(128)).help(
                        "User definable string (char [128], optional). If not provided, \
                         NSE will empty it",
                    ),
                ),
                NamedField::typed(
                    "USER_DEF2",
                    TypedField::optional(ValueKind::Char(128)).help(
                        "User definable string (char [128], optional). If not provided, \
                         NSE will empty it",
                    ),
                ),
                $($extra),*
            ],
        };
    };
}

profile_schema! {
    SUBSCRIBER_ADD, "SUBSCRIBER_ADD",
    attributes: [
        NamedField::typed(
            "MAC_ADDR",
            TypedField::optional(ValueKind::MacAddr).help("Subscriber's MAC address"),
        ),
    ],
    extras: [
        NamedField::typed(
            "BANDWIDTH_DOWN",
            TypedField::optional(ValueKind::Int).help(
                "Downstream Bandwidth (int, optional). Legacy element that is obsolete \
                 because of Bandwidth_Max_Down",
            ),
        ),
        NamedField::typed(
            "BANDWIDTH_UP",
            TypedField::optional(ValueKind::Int).help(
                "Upstream Bandwidth (int, optional). Legacy element that is obsolete \
                 because of Bandwidth_Max_Up",
            ),
        ),
        NamedField::typed(
            "CONFIRMATION",
            TypedField::optional(ValueKind::Char(10))
                .help("Confirmation number/ID (char [10], optional)"),
        ),
        NamedField::typed(
            "COUNTDOWN",
            TypedField::optional(ValueKind::Choice {
                name: "Countdown",
                allowed: &["0", "1"],
            })
            .help(
                "Countdown (int, optional). 0 off, 1 enabled. If not present, defaults \
                 to off. Note: If a billing plan is specified and it is an X-over-Y \
                 billing plan, then the countdown element, if present, is irrelevant \
                 and is ignored",
            ),
        ),
        NamedField::typed(
            "EXPIRY_TIME",
            TypedField::optional(ValueKind::Int)
                .help("Expiry time (optional). UNITS attribute: Either SECONDS, MINUTES, HOURS or DAYS")
                .attrs(EXPIRY_UNITS),
        ),
        NamedField::typed(
            "IP_TYPE",
            TypedField::optional(ValueKind::Choice {
                name: "IPType",
                allowed: &["PRIVATE", "PUBLIC"],
            })
            .help("IP type (char [10], optional). Either 'PRIVATE' or 'PUBLIC'"),
        ),
        NamedField::typed(
            "PAYMENT",
            TypedField::optional(ValueKind::Int).help("Amount charged for access (int, optional)"),
        ),
        NamedField::typed(
            "PAYMENT_METHOD",
            TypedField::optional(ValueKind::Choice {
                name: "PaymentMethod",
                allowed: &["RADIUS", "PMS", "CREDIT_CARD", "ROOM_OPEN"],
            })
            .help(
                "Payment method (char [10], optional but recommended). Either 'RADIUS', \
                 'PMS', 'CREDIT_CARD', or 'ROOM_OPEN'",
            ),
        ),
        NamedField::typed(
            "PLAN",
            TypedField::optional(ValueKind::Int).help(
                "Billing plan number (int, optional). Relates to the X over Y plan \
                 number in Billing Plans setup. If used for X over Y, USER_NAME and \
                 PASSWORD are required",
            ),
        ),
        NamedField::typed(
            "ROOM_NUMBER",
            TypedField::optional(ValueKind::Char(8)).help("Room number (char [8], optional)"),
        ),
        NamedField::typed(
            "USER_NAME",
            TypedField::optional(ValueKind::Char(96))
                .help("Subscriber's username (char [96], optional)"),
        ),
        NamedField::typed(
            "PASSWORD",
            TypedField::optional(ValueKind::Char(128))
                .help("Subscriber's password (char [128], optional). ENCRYPT attribute: Either TRUE or FALSE")
                .attrs(ENCRYPT_ATTR),
        ),
    ]
}

profile_schema! {
    DEVICE_ADD, "DEVICE_ADD",
    attributes: [
        NamedField::typed(
            "MAC_ADDR",
            TypedField::required(ValueKind::MacAddr).help("Device's MAC address"),
        ),
    ],
    extras: [
        NamedField::typed(
            "DEVICE_NAME",
            TypedField::optional(ValueKind::Char(96)).help(
                "A short name for the device (char[96]) to assist administrator or \
                 operator recognition of it.",
            ),
        ),
        NamedField::typed(
            "IP6_ADDR",
            TypedField::optional(ValueKind::Char(45)).help(
                "The IPv6 address associated with the device, if any. The address must \
                 be on the proper IPv6 subnet for the interface to which the device is \
                 (to be) attached in order for the device to be accessible.",
            ),
        ),
        NamedField::typed(
            "IP_ADDR",
            TypedField::optional(ValueKind::Char(16))
                .help("The IP address associated with the device, if any."),
        ),
        NamedField::typed(
            "PROXY_ARP",
            TypedField::optional(ValueKind::Bool)
                .help("Enable (TRUE) or disable (FALSE) Proxied ARP for this device."),
        ),
        NamedField::typed(
            "VLAN",
            TypedField::optional(ValueKind::Int).help(
                "802.1Q VLAN port that device is attached to (0 \u{2264} VLAN \u{2264} 4095). \
                 If omitted or zero, the device will be granted access no matter where \
                 it has attached; but if a non-zero VLAN is specified, the device will \
                 only be granted access when attached to that VLAN.",
            ),
        ),
    ]
}

profile_schema! {
    GROUP_ADD, "GROUP_ADD",
    attributes: [],
    extras: [
        NamedField::typed(
            "DHCP_TYPE",
            TypedField::optional(ValueKind::Choice {
                name: "DHCPType",
                allowed: &["PRIVATE", "PUBLIC"],
            })
            .help("DHCP type (char[10], optional). Either 'PRIVATE', 'PUBLIC'"),
        ),
        NamedField::typed(
            "EXPIRY_TIME",
            TypedField::required(ValueKind::Int)
                .help("Expiry time. UNITS attribute: Either SECONDS, MINUTES, HOURS or DAYS")
                .attrs(EXPIRY_UNITS),
        ),
        NamedField::typed(
            "GROUP_NAME",
            TypedField::optional(ValueKind::Char(96)).help(
                "A short name for the group (char[96]) to assist administrator or \
                 operator recognition of it.",
            ),
        ),
        NamedField::typed(
            "GROUP_USERS_MAX",
            TypedField::optional(ValueKind::Int).help(
                "Maximum number of users in the group (int, optional). If not \
                 specified, the group will be created with no limit on the number of \
                 users.",
            ),
        ),
        NamedField::typed(
            "PAYMENT",
            TypedField::optional(ValueKind::Int).help("Amount charged for access (int, optional)."),
        ),
        NamedField::typed(
            "USER_NAME",
            TypedField::required(ValueKind::Char(96)).help("Group's username (char[96])."),
        ),
        NamedField::typed(
            "PASSWORD",
            TypedField::required(ValueKind::Char(128))
                .help("Group's password (char[128]). ENCRYPT attribute: Either TRUE or FALSE")
                .attrs(ENCRYPT_ATTR),
        ),
        NamedField::typed(
            "VALID_UNTIL",
            TypedField::optional(ValueKind::Text).help(
                "The date/time at which this group will cease to exist. If non-empty, \
                 must be expressed in a valid ISO 8601 format. Absence of this element \
                 or an empty string means the group will have permanent (until \
                 administratively deleted) existence. The granularity of this \
                 parameter is in minutes.",
            ),
        ),
    ]
}

profile_schema! {
    ACCESS_CODE_ADD, "ACCESS_CODE_ADD",
    attributes: [],
    extras: [
        NamedField::typed(
            "USER_NAME",
            TypedField::required(ValueKind::Char(96)).help("Access code username (char[96])."),
        ),
        NamedField::typed(
            "EXPIRY_TIME",
            TypedField::required(ValueKind::Int)
                .help("Expiry time. UNITS attribute: Either SECONDS, MINUTES, HOURS or DAYS")
                .attrs(EXPIRY_UNITS),
        ),
        NamedField::typed(
            "DHCP_TYPE",
            TypedField::optional(ValueKind::Choice {
                name: "DHCPType",
                allowed: &["PRIVATE", "PUBLIC"],
            })
            .help("DHCP type (char[10], optional). Either 'PRIVATE', 'PUBLIC'"),
        ),
        NamedField::typed(
            "GROUP_USERS_MAX",
            TypedField::optional(ValueKind::Int).help(
                "This will set the maximum number of concurrent users that can utilize \
                 this account. Must be greater than 0.",
            ),
        ),
        NamedField::typed(
            "VALID_UNTIL",
            TypedField::required(ValueKind::Text).help(
                "The date/time at which this access code will cease to exist, in a \
                 valid ISO 8601 format. A date/time that does not lie in the future \
                 (with respect to the NSE's current time) will be rejected as an error.",
            ),
        ),
    ]
}

/// Refreshes the Current (active) memory table entry for a subscriber.
/// Attributes only; the request renders as an empty `USG` element.
pub static CACHE_UPDATE: CommandSchema = CommandSchema {
    command: "CACHE_UPDATE",
    attributes: &[NamedField::typed(
        "MAC_ADDR",
        TypedField::required(ValueKind::MacAddr).help("Subscriber's MAC address"),
    )],
    elements: &[],
};

/// `ID_TYPE` attribute selecting how a `USER` element identifies the
/// subscriber.
const ID_TYPE_ATTR: &[NamedField] = &[NamedField::typed(
    "ID_TYPE",
    TypedField::required(ValueKind::Choice {
        name: "IdType",
        allowed: &["MAC_ADDR", "USER_NAME"],
    }),
)];

/// `USER` element shared by the delete and query commands.
const USER_ELEMENT: NamedField = NamedField::typed(
    "USER",
    TypedField::required(ValueKind::Text)
        .help(
            "ID_TYPE attribute: MAC_ADDR or USER_NAME. MAC_ADDR: Subscriber's \
             MAC address (char [12]) | USER_NAME: Subscriber's username (char [96])",
        )
        .attrs(ID_TYPE_ATTR),
);

/// Removes a subscriber from the internal database, identified by either
/// MAC address or username.
pub static USER_DELETE: CommandSchema = CommandSchema {
    command: "USER_DELETE",
    attributes: &[],
    elements: &[USER_ELEMENT],
};

/// Removes a device from the internal database.
pub static DEVICE_DELETE: CommandSchema = CommandSchema {
    command: "DEVICE_DELETE",
    attributes: &[NamedField::typed(
        "MAC_ADDR",
        TypedField::required(ValueKind::MacAddr).help("MAC address of the device"),
    )],
    elements: &[],
};

/// Queries a subscriber's profile, identified by either MAC address or
/// username.
pub static USER_QUERY: CommandSchema = CommandSchema {
    command: "USER_QUERY",
    attributes: &[],
    elements: &[USER_ELEMENT],
};

/// Queries the Current (active) memory table entry for a subscriber.
pub static SUBSCRIBER_QUERY_CURRENT: CommandSchema = CommandSchema {
    command: "SUBSCRIBER_QUERY_CURRENT",
    attributes: &[],
    elements: &[NamedField::typed(
        "MAC_ADDR",
        TypedField::required(ValueKind::MacAddr).help("Subscriber's MAC address"),
    )],
};

/// Queries the Authorized subscribers table by MAC address or username.
pub static SUBSCRIBER_QUERY_AUTH: CommandSchema = CommandSchema {
    command: "SUBSCRIBER_QUERY_AUTH",
    attributes: &[],
    elements: &[
        NamedField::typed(
            "MAC_ADDR",
            TypedField::optional(ValueKind::MacAddr).help("Subscriber's MAC address"),
        ),
        NamedField::typed(
            "USER_NAME",
            TypedField::optional(ValueKind::Char(96)).help("Subscriber's name"),
        ),
    ],
};

/// Authorizes a subscriber by MAC address without further profile data.
pub static USER_AUTHORIZE: CommandSchema = CommandSchema {
    command: "USER_AUTHORIZE",
    attributes: &[NamedField::typed(
        "MAC_ADDR",
        TypedField::required(ValueKind::MacAddr).help("Subscriber's MAC address"),
    )],
    elements: &[],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::error::NseError;
    use crate::value::FieldValue;

    #[test]
    fn test_cache_update_serializes_as_attributes_only() {
        let xml = Command::new(&CACHE_UPDATE)
            .arg("00:1A:2B:3C:4D:5E")
            .to_xml()
            .unwrap();
        assert_eq!(xml, "<USG COMMAND=\"CACHE_UPDATE\" MAC_ADDR=\"001A2B3C4D5E\"/>");
    }

    #[test]
    fn test_subscriber_add_expiry_time_with_units() {
        let xml = Command::new(&SUBSCRIBER_ADD)
            .set("MAC_ADDR", "00-1A-2B-3C-4D-5E")
            .set("USER_NAME", "guest")
            .set(
                "EXPIRY_TIME",
                FieldValue::with_attrs(60, [("units", "min".into())]),
            )
            .to_xml()
            .unwrap();
        assert!(xml.contains("MAC_ADDR=\"001A2B3C4D5E\""));
        assert!(xml.contains("<EXPIRY_TIME UNITS=\"MINUTES\">60</EXPIRY_TIME>"));
    }

    #[test]
    fn test_subscriber_add_rejects_bad_payment_method() {
        let err = Command::new(&SUBSCRIBER_ADD)
            .set("PAYMENT_METHOD", "bitcoin")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NseError::FieldInvalid { ref field, .. } if field == "PAYMENT_METHOD"
        ));
    }

    #[test]
    fn test_payment_method_prefix_honors_declaration_order() {
        // "r" prefixes both RADIUS and ROOM_OPEN; RADIUS is listed first
        let mut cmd = Command::new(&SUBSCRIBER_ADD).set("PAYMENT_METHOD", "r");
        cmd.validate().unwrap();
        assert_eq!(
            cmd.get("PAYMENT_METHOD"),
            Some(&FieldValue::Str("RADIUS".into()))
        );
    }

    #[test]
    fn test_group_add_requires_credentials() {
        let err = Command::new(&GROUP_ADD)
            .set("EXPIRY_TIME", 3)
            .set("USER_NAME", "conference")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NseError::FieldMissing { ref field, .. } if field == "PASSWORD"
        ));
    }

    #[test]
    fn test_device_add_requires_mac_address() {
        let err = Command::new(&DEVICE_ADD)
            .set("DEVICE_NAME", "printer-3f")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NseError::FieldMissing { ref field, .. } if field == "MAC_ADDR"
        ));
    }

    #[test]
    fn test_user_delete_requires_id_type() {
        // A bare USER value carries no ID_TYPE attribute
        let err = Command::new(&USER_DELETE)
            .set("USER", "alice")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            NseError::FieldMissing { ref field, .. } if field == "USER.ID_TYPE"
        ));
    }

    #[test]
    fn test_user_delete_serializes_id_type() {
        let xml = Command::new(&USER_DELETE)
            .set(
                "USER",
                FieldValue::with_attrs("alice", [("id_type", "user".into())]),
            )
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"USER_DELETE\"><USER ID_TYPE=\"USER_NAME\">alice</USER></USG>"
        );
    }

    #[test]
    fn test_user_authorize_and_device_delete_are_attribute_only() {
        let xml = Command::new(&USER_AUTHORIZE)
            .arg("00:1A:2B:3C:4D:5E")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"USER_AUTHORIZE\" MAC_ADDR=\"001A2B3C4D5E\"/>"
        );
        let xml = Command::new(&DEVICE_DELETE)
            .arg("001a2b3c4d5e")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"DEVICE_DELETE\" MAC_ADDR=\"001A2B3C4D5E\"/>"
        );
    }

    #[test]
    fn test_subscriber_query_auth_accepts_either_identifier() {
        let xml = Command::new(&SUBSCRIBER_QUERY_AUTH)
            .set("USER_NAME", "alice")
            .to_xml()
            .unwrap();
        assert_eq!(
            xml,
            "<USG COMMAND=\"SUBSCRIBER_QUERY_AUTH\"><USER_NAME>alice</USER_NAME></USG>"
        );
    }

    #[test]
    fn test_schemas_do_not_share_field_lists() {
        // DEVICE_ADD extras must not leak into SUBSCRIBER_ADD and vice versa
        assert!(SUBSCRIBER_ADD.find("DEVICE_NAME").is_none());
        assert!(DEVICE_ADD.find("PAYMENT_METHOD").is_none());
        assert!(GROUP_ADD.find("MAC_ADDR").is_none());
    }
}
