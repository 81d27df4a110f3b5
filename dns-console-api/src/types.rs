use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Record Types ============

/// DNS record type accepted by the API.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
    /// Reverse pointer record.
    Ptr,
    /// Service locator record.
    Srv,
    /// Certificate Authority Authorization record.
    Caa,
}

impl RecordType {
    /// Every supported type, in the order forms present them.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Ptr,
        Self::Srv,
        Self::Caa,
    ];

    /// Uppercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
        }
    }

    /// MX and SRV records carry a priority; all others must not.
    #[must_use]
    pub fn requires_priority(self) -> bool {
        matches!(self, Self::Mx | Self::Srv)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported [`RecordType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecordType(pub String);

impl std::fmt::Display for UnknownRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported record type: {}", self.0)
    }
}

impl std::error::Error for UnknownRecordType {}

impl std::str::FromStr for RecordType {
    type Err = UnknownRecordType;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRecordType(s.to_string()))
    }
}

/// A DNS resource record as held by the remote authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Server-assigned identifier.
    pub id: String,
    /// Owning domain.
    pub domain_id: String,
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Relative name; empty or `@` for the zone apex.
    #[serde(default)]
    pub name: String,
    /// Record value (address, target, text, ...).
    pub value: String,
    /// TTL in seconds.
    pub ttl: u32,
    /// Priority, only present for MX/SRV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Creation time, if reported.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time, if reported.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Full, client-validated record body used for create and update.
///
/// Update always sends the complete body; the API has no partial patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInput {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Relative name.
    pub name: String,
    /// Record value.
    pub value: String,
    /// TTL in seconds, always > 0.
    pub ttl: u32,
    /// Priority, `Some` iff the type requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// `POST /records` body: the record plus the owning domain.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRecordBody<'a> {
    pub domain_id: &'a str,
    #[serde(flatten)]
    pub record: &'a RecordInput,
}

// ============ Domain Types ============

/// A DNS zone managed by the current user.
///
/// Only the remote authority mutates `verified` and `record_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Server-assigned identifier.
    pub id: String,
    /// Domain name, e.g. `example.com`.
    #[serde(rename = "domain_name", alias = "name")]
    pub name: String,
    /// Whether the nameserver delegation has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Number of records in the zone.
    #[serde(default)]
    pub record_count: u32,
    /// Last modification time, if reported.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::datetime"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /domains` body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateDomainBody<'a> {
    pub domain_name: &'a str,
}

// ============ Session Types ============

/// The authenticated user behind the ambient session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// User identifier; empty means "no identity".
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl User {
    /// Whether this value identifies a signed-in user.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        !self.id.trim().is_empty()
    }
}
