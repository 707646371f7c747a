use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Role a user account is viewed in
///
/// The same account can be both; the backend serves each role from its own
/// endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    #[display("client")]
    Client,
    #[display("driver")]
    Driver,
}

impl UserKind {
    pub const ALL: [UserKind; 2] = [UserKind::Client, UserKind::Driver];

    /// Plural form used in endpoint paths and export filenames
    #[inline]
    pub const fn plural(&self) -> &'static str {
        match self {
            UserKind::Client => "clients",
            UserKind::Driver => "drivers",
        }
    }
}
