//! Outbound requests.
//!
//! Every request is addressed with `to` (an actor handle) and carries a
//! `type`. Optional fields are omitted when unset.

use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Actor that answers `listTabs`.
pub const ROOT_ACTOR: &str = "root";

/// Request types, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    ListTabs,
    UploadPackage,
    Chunk,
    Done,
    Install,
    Remove,
    Launch,
}

impl RequestType {
    /// Wire name (the `type` field).
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::ListTabs => "listTabs",
            RequestType::UploadPackage => "uploadPackage",
            RequestType::Chunk => "chunk",
            RequestType::Done => "done",
            RequestType::Install => "install",
            RequestType::Remove => "remove",
            RequestType::Launch => "launch",
        }
    }
}

impl Serialize for RequestType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One actor-addressed command.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    /// Destination actor.
    pub to: &'a str,
    /// Command (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub msg_type: RequestType,
    /// Escaped chunk literal, emitted as-is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk: Option<&'a RawValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload: Option<&'a str>,
    #[serde(rename = "appId", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<&'a str>,
    #[serde(rename = "manifestURL", skip_serializing_if = "Option::is_none")]
    pub manifest_url: Option<String>,
}

impl<'a> Request<'a> {
    fn bare(to: &'a str, msg_type: RequestType) -> Self {
        Self {
            to,
            msg_type,
            chunk: None,
            upload: None,
            app_id: None,
            manifest_url: None,
        }
    }

    pub fn list_tabs() -> Self {
        Self::bare(ROOT_ACTOR, RequestType::ListTabs)
    }

    pub fn upload_package(webapps_actor: &'a str) -> Self {
        Self::bare(webapps_actor, RequestType::UploadPackage)
    }

    pub fn chunk(upload_actor: &'a str, chunk: &'a RawValue) -> Self {
        Self {
            chunk: Some(chunk),
            ..Self::bare(upload_actor, RequestType::Chunk)
        }
    }

    pub fn done(upload_actor: &'a str) -> Self {
        Self::bare(upload_actor, RequestType::Done)
    }

    pub fn install(webapps_actor: &'a str, upload_actor: &'a str, app_id: &'a str) -> Self {
        Self {
            upload: Some(upload_actor),
            app_id: Some(app_id),
            ..Self::bare(webapps_actor, RequestType::Install)
        }
    }

    pub fn remove(upload_actor: &'a str) -> Self {
        Self::bare(upload_actor, RequestType::Remove)
    }

    pub fn launch(webapps_actor: &'a str, app_id: &str) -> Self {
        Self {
            manifest_url: Some(manifest_url(app_id)),
            ..Self::bare(webapps_actor, RequestType::Launch)
        }
    }
}

/// Manifest URL of an installed packaged app.
pub fn manifest_url(app_id: &str) -> String {
    format!("app://{app_id}/manifest.webapp")
}
