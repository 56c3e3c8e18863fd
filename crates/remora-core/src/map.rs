//! Wanderer map wire models and conversions from Tripwire records.
//!
//! Serialization mirrors the Wanderer API: zero-valued fields are omitted
//! except system positions and the connection `locked` flag, which are
//! always written even at their zero values.

use crate::error::{Error, Result};
use crate::tripwire::{RecordIndex, Signature, Wormhole, display_code_lenient};
use serde::{Deserialize, Serialize};

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One solar system on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSystem {
    #[serde(skip_serializing_if = "is_zero")]
    pub solar_system_id: i64,
    #[serde(skip_serializing_if = "is_false")]
    pub visible: bool,
    pub position_x: f64,
    pub position_y: f64,
}

/// One connection between two systems on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConnection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub custom_info: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub locked: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub map_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub mass_status: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub ship_size_type: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub solar_system_source: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub solar_system_target: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub time_status: i64,
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub connection_type: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wormhole_type: String,
}

/// Systems and connections of one map snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapData {
    pub connections: Vec<MapConnection>,
    pub systems: Vec<MapSystem>,
}

/// Envelope the Wanderer API wraps snapshots in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapEnvelope {
    pub data: MapData,
}

/// Body of a bulk delete call. Both lists are always serialized, empty or
/// not, so the server sees an explicit no-op rather than a missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    pub connection_ids: Vec<String>,
    pub system_ids: Vec<i64>,
}

/// One scanned signature in Wanderer's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSignature {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub character_eve_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub eve_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_system_id: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub solar_system_id: i64,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub sig_type: String,
}

/// Parses a Tripwire string-encoded system id. Tripwire uses short
/// placeholder values (`"0"`, `"9999"`) for unknown systems; anything under
/// five digits is rejected here.
pub(crate) fn parse_system_id(value: &str) -> Result<i64> {
    if value.len() < 5 {
        return Err(Error::InvalidSystemId {
            value: value.to_string(),
        });
    }
    value.parse().map_err(|_| Error::InvalidSystemId {
        value: value.to_string(),
    })
}

impl MapSystem {
    /// Derives a visible map system from the signature's owning system id.
    pub fn from_signature(signature: &Signature) -> Result<Self> {
        Ok(Self {
            solar_system_id: parse_system_id(&signature.system_id)?,
            visible: true,
            ..Default::default()
        })
    }
}

impl MapConnection {
    /// Derives a connection from a wormhole by resolving both endpoint
    /// signatures to their systems.
    ///
    /// An endpoint whose system id is a short placeholder leaves the
    /// corresponding field at zero; callers drop such half-built
    /// connections. A missing endpoint signature is an error.
    pub fn from_wormhole(wormhole: &Wormhole, index: &RecordIndex<'_>) -> Result<Self> {
        let mut connection = Self::default();

        let source = index.signature(&wormhole.initial_id)?;
        if source.system_id.len() < 5 {
            return Ok(connection);
        }
        connection.solar_system_source = parse_system_id(&source.system_id)?;

        let target = index.signature(&wormhole.secondary_id)?;
        if target.system_id.len() < 5 {
            return Ok(connection);
        }
        connection.solar_system_target = parse_system_id(&target.system_id)?;

        Ok(connection)
    }
}

impl MapSignature {
    /// Maps a Tripwire signature into Wanderer's signature shape.
    ///
    /// Unconvertible pieces degrade to their zero value instead of failing:
    /// a bad short code yields an empty `eve_id`, an unparsable system id
    /// yields zero, and an unparsable `linked_system_id` yields `None`.
    ///
    /// The scanner's raw label only selects `group` and `name`; the wire
    /// `type` field stays empty.
    pub fn from_signature(signature: &Signature, linked_system_id: Option<&str>) -> Self {
        let (name, group) = match signature.sig_type.to_ascii_lowercase().as_str() {
            "gas" => (signature.name.clone(), "Gas Site".to_string()),
            "data" => (signature.name.clone(), "Data Site".to_string()),
            "relic" => (signature.name.clone(), "Relic Site".to_string()),
            "wormhole" => (signature.name.clone(), "Wormhole".to_string()),
            "unknown" => ("Unknown".to_string(), "Cosmic Signature".to_string()),
            _ => (signature.name.clone(), String::new()),
        };

        Self {
            character_eve_id: signature.created_by_id.clone(),
            eve_id: display_code_lenient(&signature.signature_id).unwrap_or_default(),
            group,
            kind: "Cosmic Signature".to_string(),
            linked_system_id: linked_system_id.and_then(|value| value.parse().ok()),
            name,
            solar_system_id: signature.system_id.parse().unwrap_or(0),
            sig_type: String::new(),
        }
    }
}
