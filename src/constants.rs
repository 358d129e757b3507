//! NSE XML protocol constants
//!
//! Wire markers and defaults for the USG command protocol: every request and
//! response is a single `USG` element, requests carry a `COMMAND` attribute
//! naming the command type, and responses carry a `RESULT` attribute that is
//! either `OK` or `ERROR`.

// ============================================================================
// Wire Markers
// ============================================================================

/// Root element tag shared by requests and responses.
pub const ROOT_TAG: &str = "USG";

/// Attribute on the root element naming the command type.
pub const COMMAND_ATTR: &str = "COMMAND";

/// Attribute on the response root carrying the outcome.
pub const RESULT_ATTR: &str = "RESULT";

/// `RESULT` value signalling a failed command.
pub const RESULT_ERROR: &str = "ERROR";

/// Response attribute carrying the numeric device error code.
pub const ERROR_NUM_ATTR: &str = "ERROR_NUM";

/// Response attribute carrying the optional device error description.
pub const ERROR_DESC_ATTR: &str = "ERROR_DESC";

// ============================================================================
// Transport Defaults
// ============================================================================

/// Default TCP port of the NSE XML command interface.
pub const DEFAULT_PORT: u16 = 1111;

/// Path of the command endpoint on the device's HTTP server.
pub const COMMAND_PATH: &str = "/usg/command.xml";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Interval between TCP connection attempts while probing, in seconds.
pub const PROBE_INTERVAL_SECS: u64 = 1;

// ============================================================================
// Device Error Table
// ============================================================================

/// Description substituted when the device reports a code this library
/// does not know about.
pub const UNKNOWN_ERROR_DESC: &str = "Unknown error";

/// Static code → description table, used when the device omits `ERROR_DESC`.
const ERROR_DESCRIPTIONS: &[(u16, &str)] = &[
    (100, "Parsing error"),
    (101, "Unrecognized command"),
    (102, "Required attribute is missing"),
    (103, "Required data is missing"),
    (200, "Unknown room number"),
    (201, "Unknown user name"),
    (202, "Unknown user MAC address"),
    (203, "Wrong password"),
    (204, "User name already used"),
    (205, "Too many subscribers"),
    (206, "Unable to provide all requested data"),
    (
        207,
        "AAA internal error (when AAA is not configured correctly for the command request)",
    ),
    (208, "Wrong Plan Number"),
    (209, "User is already valid"),
    (210, "Specified valid-until time is invalid"),
    (211, "Specified DHCP subnet does not exist"),
    (300, "User RADIUS account not found"),
    (301, "User RADIUS authorization denied"),
    (302, "User PMS authorization denied"),
    (303, "Unsupported payment method"),
    (304, "MAC Address does not belong to room location"),
];

/// Resolve a numeric device error code to its documented description.
///
/// Unknown codes resolve to [`UNKNOWN_ERROR_DESC`] rather than failing.
pub fn error_description(code: u16) -> &'static str {
    ERROR_DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, desc)| *desc)
        .unwrap_or(UNKNOWN_ERROR_DESC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_resolve() {
        assert_eq!(error_description(100), "Parsing error");
        assert_eq!(error_description(201), "Unknown user name");
        assert_eq!(error_description(303), "Unsupported payment method");
    }

    #[test]
    fn test_unknown_code_resolves_to_generic_description() {
        assert_eq!(error_description(9999), UNKNOWN_ERROR_DESC);
        assert_eq!(error_description(0), UNKNOWN_ERROR_DESC);
    }

    #[test]
    fn test_table_codes_are_unique() {
        for (i, (code, _)) in ERROR_DESCRIPTIONS.iter().enumerate() {
            assert!(
                !ERROR_DESCRIPTIONS[i + 1..].iter().any(|(c, _)| c == code),
                "duplicate error code {code}"
            );
        }
    }
}
