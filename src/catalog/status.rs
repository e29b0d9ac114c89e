//! Semantic status labels for envelope `status` fields.
//!
//! Labels carry no behavior; callers use them to tag their own outcomes.

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";
pub const WARNING: &str = "warning";
pub const INFO: &str = "info";
pub const DATABASE_ERROR: &str = "database-error";
pub const SESSION_ERROR: &str = "session-error";
pub const ROUTE_ERROR: &str = "route-error";
pub const FILE_ERROR: &str = "file-error";
pub const MAIL_ERROR: &str = "mail-error";
pub const RULE_ERROR: &str = "rule-error";
/// Older spelling of [`RULE_ERROR`].
pub const RULES_ERROR: &str = "rules-error";
pub const AUTHENTICATION_ERROR: &str = "authentication-error";

const ERRORS: &[&str] = &[
    ERROR,
    DATABASE_ERROR,
    FILE_ERROR,
    MAIL_ERROR,
    ROUTE_ERROR,
    SESSION_ERROR,
    RULE_ERROR,
    AUTHENTICATION_ERROR,
];

/// The error-labeled subset, in a fixed order.
#[inline]
pub fn errors() -> &'static [&'static str] {
    ERRORS
}

/// Check whether a label denotes an error (either spelling of the rule label).
#[inline]
pub fn is_error(label: &str) -> bool {
    label == RULES_ERROR || ERRORS.contains(&label)
}
