//! Flat Tripwire scanning records and read-only lookup helpers over them.
//!
//! Tripwire hands back everything the mask can see as two flat arrays:
//! signatures (one per scanned anomaly, owned by a solar system) and
//! wormholes (one per link, referencing two signature ids). [`RecordIndex`]
//! is the per-run view the chain builder walks; it borrows the fetched
//! slices and never mutates them.

use crate::error::{Error, Result};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One scanned signature as returned by the Tripwire API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub id: String,
    /// Six-character short code, e.g. `abc123`. `???` until scanned down.
    #[serde(rename = "signatureID")]
    pub signature_id: String,
    /// String-encoded id of the owning solar system; `"0"` when unknown.
    #[serde(rename = "systemID")]
    pub system_id: String,
    #[serde(rename = "type")]
    pub sig_type: String,
    pub name: String,
    pub bookmark: Option<String>,
    #[serde(rename = "lifeTime")]
    pub life_time: String,
    #[serde(rename = "lifeLeft")]
    pub life_left: String,
    #[serde(rename = "lifeLength")]
    pub life_length: String,
    #[serde(rename = "createdByID")]
    pub created_by_id: String,
    #[serde(rename = "createdByName")]
    pub created_by_name: String,
    #[serde(rename = "modifiedByID")]
    pub modified_by_id: String,
    #[serde(rename = "modifiedByName")]
    pub modified_by_name: String,
    #[serde(rename = "modifiedTime")]
    pub modified_time: String,
    #[serde(rename = "maskID")]
    pub mask_id: String,
}

/// One wormhole link between two signatures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wormhole {
    pub id: String,
    #[serde(rename = "initialID")]
    pub initial_id: String,
    #[serde(rename = "secondaryID")]
    pub secondary_id: String,
    #[serde(rename = "type")]
    pub wormhole_type: String,
    pub parent: String,
    pub life: String,
    pub mass: String,
    #[serde(rename = "maskID")]
    pub mask_id: String,
}

/// Converts a Tripwire short code to the in-game display form:
/// `abc123` becomes `ABC-123`.
///
/// The placeholder `???` (an unscanned signature) converts to the empty
/// string. Anything else that is not exactly six bytes is an error.
pub fn display_code(code: &str) -> Result<String> {
    if code == "???" {
        return Ok(String::new());
    }
    if code.len() != 6 || !code.is_char_boundary(3) {
        return Err(Error::InvalidSignatureCode {
            code: code.to_string(),
        });
    }
    Ok(format!("{}-{}", code[..3].to_ascii_uppercase(), &code[3..]))
}

/// Like [`display_code`], but never fails: an already-dashed `ABC-123` passes
/// through unchanged (Tripwire users sometimes enter the display form
/// directly), only letters-then-digits short codes convert, and anything
/// else yields `None`.
pub fn display_code_lenient(code: &str) -> Option<String> {
    if dashed_code_regex().is_match(code) {
        return Some(code.to_string());
    }
    if short_code_regex().is_match(code) {
        return display_code(code).ok();
    }
    None
}

fn dashed_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{3}-\d{3}$").expect("valid regex"))
}

fn short_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{3}\d{3}$").expect("valid regex"))
}

/// Read-only index over one run's fetched records.
///
/// Lookups preserve input order throughout; where two records share an id,
/// the first one in the slice wins.
#[derive(Debug)]
pub struct RecordIndex<'a> {
    signatures: &'a [Signature],
    wormholes: &'a [Wormhole],
    by_id: FxHashMap<&'a str, usize>,
    by_system: FxHashMap<&'a str, Vec<usize>>,
    wormholes_by_initial: FxHashMap<&'a str, Vec<usize>>,
}

impl<'a> RecordIndex<'a> {
    pub fn new(signatures: &'a [Signature], wormholes: &'a [Wormhole]) -> Self {
        let mut by_id: FxHashMap<&'a str, usize> = FxHashMap::default();
        let mut by_system: FxHashMap<&'a str, Vec<usize>> = FxHashMap::default();
        for (i, signature) in signatures.iter().enumerate() {
            by_id.entry(signature.id.as_str()).or_insert(i);
            by_system
                .entry(signature.system_id.as_str())
                .or_default()
                .push(i);
        }

        let mut wormholes_by_initial: FxHashMap<&'a str, Vec<usize>> = FxHashMap::default();
        for (i, wormhole) in wormholes.iter().enumerate() {
            wormholes_by_initial
                .entry(wormhole.initial_id.as_str())
                .or_default()
                .push(i);
        }

        Self {
            signatures,
            wormholes,
            by_id,
            by_system,
            wormholes_by_initial,
        }
    }

    /// Finds the first signature with the given id.
    pub fn signature(&self, id: &str) -> Result<&'a Signature> {
        self.by_id
            .get(id)
            .map(|&i| &self.signatures[i])
            .ok_or_else(|| Error::SignatureNotFound { id: id.to_string() })
    }

    /// Returns the signatures owned by a system, plus every wormhole whose
    /// initial endpoint is one of those signatures.
    ///
    /// Wormholes come out grouped by owning signature: all links leaving the
    /// system's first signature, then the second's, and so on.
    pub fn system_records(&self, system_id: &str) -> (Vec<&'a Signature>, Vec<&'a Wormhole>) {
        let signatures: Vec<&'a Signature> = self
            .by_system
            .get(system_id)
            .map(|indices| indices.iter().map(|&i| &self.signatures[i]).collect())
            .unwrap_or_default();

        let mut wormholes = Vec::new();
        for signature in &signatures {
            if let Some(indices) = self.wormholes_by_initial.get(signature.id.as_str()) {
                wormholes.extend(indices.iter().map(|&i| &self.wormholes[i]));
            }
        }

        (signatures, wormholes)
    }
}
