//! Typed content blocks: ids, payload traits, per-section variants.

pub mod faq;
pub mod footer;
pub mod integrity;
pub mod list;
pub mod registry;
pub mod rich_text;

pub use faq::FaqBlock;
pub use footer::FooterBlock;
pub use list::{BlockListOps, OrderedBlockList};
pub use registry::{catalogue, BlockRegistry, CatalogueEntry};
pub use rich_text::RichTextBlock;

use crate::buffer::merge_defaults;
use crate::section::SectionType;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown block type `{tag}` for {section} sections")]
    UnknownBlockType { section: SectionType, tag: String },
    #[error("{section} sections do not hold blocks")]
    NotBlockBearing { section: SectionType },
    #[error("Malformed block payload: {0}")]
    Malformed(String),
}

/// Identifier of a block, unique within its owning section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type-prefixed id that `taken` does not already claim.
    pub fn generate(tag: &str, strategy: IdStrategy, taken: impl Fn(&BlockId) -> bool) -> Self {
        let base = match strategy {
            IdStrategy::Timestamp => format!("{}-{}", tag, Utc::now().timestamp_millis()),
            IdStrategy::Uuid => format!("{}-{}", tag, Uuid::new_v4().simple()),
        };

        let mut candidate = BlockId(base.clone());
        let mut suffix = 1u32;
        while taken(&candidate) {
            candidate = BlockId(format!("{}-{}", base, suffix));
            suffix += 1;
        }
        candidate
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How fresh block ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Timestamp,
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Discriminator of a block variant, one closed enum per section type.
pub trait BlockKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    fn tag(self) -> &'static str;

    fn from_tag(tag: &str) -> Option<Self>;
}

/// Settings payload of a block; serialized as `{"type": tag, "settings": {...}}`.
pub trait BlockPayload:
    Clone + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Kind: BlockKind;

    const SECTION: SectionType;

    fn kind(&self) -> Self::Kind;

    /// Fresh default settings; never shares data with earlier calls.
    fn defaults(kind: Self::Kind) -> Self;

    fn catalogue() -> &'static [CatalogueEntry];

    /// Grouping blocks own references from other blocks in the section.
    fn is_group(&self) -> bool {
        false
    }

    fn group_ref(&self) -> Option<&BlockId> {
        None
    }

    fn clear_group_ref(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block<P> {
    pub id: BlockId,
    pub visible: bool,
    pub payload: P,
}

impl<P: BlockPayload> Block<P> {
    pub fn new(id: BlockId, payload: P) -> Self {
        Self {
            id,
            visible: true,
            payload,
        }
    }

    pub fn kind(&self) -> P::Kind {
        self.payload.kind()
    }

    pub fn tag(&self) -> &'static str {
        self.payload.kind().tag()
    }
}

// ------------------------------------------------------------------
// Wire form
// ------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default = "visible_by_default")]
    visible: bool,
    #[serde(default)]
    settings: Value,
}

fn visible_by_default() -> bool {
    true
}

fn payload_settings<P: BlockPayload>(payload: &P) -> Result<Value, serde_json::Error> {
    let mut tagged = serde_json::to_value(payload)?;
    Ok(tagged
        .get_mut("settings")
        .map(Value::take)
        .unwrap_or_else(|| json!({})))
}

/// Builds a payload from a tag and possibly partial settings; missing
/// fields take the variant's defaults.
pub fn hydrate_payload<P: BlockPayload>(tag: &str, settings: Value) -> Result<P, RegistryError> {
    let defaults = BlockRegistry::<P>::create_defaults(tag)?;
    let base = payload_settings(&defaults).map_err(|e| RegistryError::Malformed(e.to_string()))?;
    let stored = if settings.is_null() { json!({}) } else { settings };
    let merged = merge_defaults(base, stored);

    serde_json::from_value(json!({ "type": tag, "settings": merged }))
        .map_err(|e| RegistryError::Malformed(e.to_string()))
}

impl<P: BlockPayload> Serialize for Block<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawBlock {
            id: self.id.clone(),
            kind: self.tag().to_string(),
            visible: self.visible,
            settings: payload_settings(&self.payload).map_err(serde::ser::Error::custom)?,
        };
        raw.serialize(serializer)
    }
}

impl<'de, P: BlockPayload> Deserialize<'de> for Block<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBlock::deserialize(deserializer)?;
        let payload = hydrate_payload(&raw.kind, raw.settings).map_err(serde::de::Error::custom)?;
        Ok(Self {
            id: raw.id,
            visible: raw.visible,
            payload,
        })
    }
}
