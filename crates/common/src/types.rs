//! Core data model for the Tenable.io scan workflow
//!
//! Request payloads are plain structs with consuming builder methods,
//! response records are deserialized snapshots. Fields the service may
//! omit or send as `null` default instead of failing the decode.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Accept `null` wherever a collection or default-able value is expected.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers the service sends sometimes as numbers, sometimes as strings.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

/// Template families exposed by the editor endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Scan,
    Policy,
    Remediation,
}

impl TemplateType {
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Scan => "scan",
            TemplateType::Policy => "policy",
            TemplateType::Remediation => "remediation",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan template definition (a snapshot; never cached).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub uuid: String,
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_agent: Option<bool>,
}

impl Template {
    #[must_use]
    pub fn new<S: Into<String>>(uuid: S, name: S, title: S) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            title: title.into(),
            description: None,
            cloud_only: None,
            is_agent: None,
        }
    }
}

/// Scan states reported by the service.
///
/// Anything the SDK does not recognise decodes as `Unknown` and is
/// treated as non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Aborted,
    #[serde(alias = "cancelled")]
    Canceled,
    Canceling,
    Completed,
    Empty,
    Imported,
    Initializing,
    Paused,
    Pausing,
    Pending,
    Processing,
    Publishing,
    Resuming,
    Running,
    Stopped,
    Stopping,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ScanStatus {
    /// States after which a scan makes no further progress.
    pub const TERMINAL: [ScanStatus; 6] = [
        ScanStatus::Stopped,
        ScanStatus::Aborted,
        ScanStatus::Completed,
        ScanStatus::Canceled,
        ScanStatus::Empty,
        ScanStatus::Imported,
    ];

    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanStatus::Stopped
                | ScanStatus::Aborted
                | ScanStatus::Completed
                | ScanStatus::Canceled
                | ScanStatus::Empty
                | ScanStatus::Imported
        )
    }

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Aborted => "aborted",
            ScanStatus::Canceled => "canceled",
            ScanStatus::Canceling => "canceling",
            ScanStatus::Completed => "completed",
            ScanStatus::Empty => "empty",
            ScanStatus::Imported => "imported",
            ScanStatus::Initializing => "initializing",
            ScanStatus::Paused => "paused",
            ScanStatus::Pausing => "pausing",
            ScanStatus::Pending => "pending",
            ScanStatus::Processing => "processing",
            ScanStatus::Publishing => "publishing",
            ScanStatus::Resuming => "resuming",
            ScanStatus::Running => "running",
            ScanStatus::Stopped => "stopped",
            ScanStatus::Stopping => "stopping",
            ScanStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings payload sent once when a scan is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSettings {
    pub name: String,
    /// Comma-separated target list.
    pub text_targets: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl ScanSettings {
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>, T: Into<String>>(name: S, targets: T) -> Self {
        Self {
            name: name.into(),
            text_targets: targets.into(),
            ..Default::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_scanner<S: Into<String>>(mut self, scanner_id: S) -> Self {
        self.scanner_id = Some(scanner_id.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

/// Body of a scan create request.
#[derive(Debug, Clone, Serialize)]
pub struct ScanCreateRequest<'a> {
    pub uuid: &'a str,
    pub settings: &'a ScanSettings,
}

/// Record returned after creating a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanCreated {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of a scan listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ScanStatus,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub creation_date: Option<i64>,
    #[serde(default)]
    pub last_modification_date: Option<i64>,
}

impl Scan {
    #[must_use]
    pub fn new<S: Into<String>>(id: i64, name: S, status: ScanStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            uuid: None,
            folder_id: None,
            owner: None,
            enabled: None,
            creation_date: None,
            last_modification_date: None,
        }
    }
}

/// Scan listing response, in the order the service returned it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub folders: Vec<Folder>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scans: Vec<Scan>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl ScanList {
    #[must_use]
    pub fn from_scans(scans: Vec<Scan>) -> Self {
        Self {
            scans,
            ..Default::default()
        }
    }
}

/// Summary block of a scan details response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanDetailsInfo {
    /// Identifier the service reports for this record.
    pub object_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ScanStatus,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub folder_id: Option<i64>,
    #[serde(default)]
    pub targets: Option<String>,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub scanner_name: Option<String>,
    #[serde(default)]
    pub hostcount: Option<i64>,
    #[serde(default)]
    pub scan_start: Option<i64>,
    #[serde(default)]
    pub scan_end: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanHost {
    pub host_id: i64,
    pub hostname: String,
    #[serde(default)]
    pub critical: i64,
    #[serde(default)]
    pub high: i64,
    #[serde(default)]
    pub medium: i64,
    #[serde(default)]
    pub low: i64,
    #[serde(default)]
    pub info: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanVulnerability {
    pub plugin_id: i64,
    #[serde(default)]
    pub plugin_name: String,
    #[serde(default)]
    pub plugin_family: Option<String>,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub severity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanHistory {
    pub history_id: i64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ScanStatus,
    #[serde(default)]
    pub creation_date: Option<i64>,
    #[serde(default)]
    pub last_modification_date: Option<i64>,
}

/// Full scan details. Result sections are passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanDetails {
    pub info: ScanDetailsInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hosts: Vec<ScanHost>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comphosts: Vec<ScanHost>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vulnerabilities: Vec<ScanVulnerability>,
    #[serde(rename = "compliance", default, deserialize_with = "null_as_default")]
    pub compliances: Vec<ScanVulnerability>,
    #[serde(rename = "history", default, deserialize_with = "null_as_default")]
    pub histories: Vec<ScanHistory>,
    #[serde(default)]
    pub remediations: Option<serde_json::Value>,
}

/// Authenticated user session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub permissions: Option<i64>,
}

/// Folder scans can be grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub default_tag: Option<i64>,
    #[serde(default)]
    pub custom: Option<i64>,
    #[serde(default)]
    pub unread_count: Option<i64>,
}

/// A scanner (cloud scanner, linked Nessus, agent manager).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scanner {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub engine_version: Option<String>,
    #[serde(default)]
    pub linked: Option<i64>,
}
