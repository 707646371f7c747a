//! Backend Endpoint Paths

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::domain::value_object::UserKind;

pub const SEND_CODE: &str = "/v1/user/sing-in-by-phone";
pub const CONFIRM_CODE: &str = "/v1/user/sing-in-by-phone-confirm-code";
pub const CLIENTS: &str = "/admin/clients";
pub const DRIVERS: &str = "/admin/drivers";
pub const ORDERS: &str = "/admin/order-requests";
pub const BLOCK_USER: &str = "/admin/users/block";
pub const CHECK_UNBLOCK: &str = "/admin/users/check-unblock";
pub const STATS: &str = "/admin/stats";

/// Bytes escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Id that cannot stand for exactly one path segment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid id")]
pub struct InvalidId(pub String);

/// Encode `id` as one path segment
///
/// Empty and dot-only ids are refused: URL normalization would resolve
/// them to a different route even when escaped.
fn segment(id: &str) -> Result<String, InvalidId> {
    match id {
        "" | "." | ".." => Err(InvalidId(id.to_string())),
        _ => Ok(utf8_percent_encode(id, SEGMENT).to_string()),
    }
}

/// List endpoint for a user role
pub const fn users(kind: UserKind) -> &'static str {
    match kind {
        UserKind::Client => CLIENTS,
        UserKind::Driver => DRIVERS,
    }
}

pub fn user(kind: UserKind, id: &str) -> Result<String, InvalidId> {
    Ok(format!("{}/{}", users(kind), segment(id)?))
}

pub fn order(id: &str) -> Result<String, InvalidId> {
    Ok(format!("{}/{}", ORDERS, segment(id)?))
}

pub fn unblock_user(id: &str) -> Result<String, InvalidId> {
    Ok(format!("/admin/users/{}/unblock", segment(id)?))
}
