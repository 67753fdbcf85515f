//! Sections of a page document and their type-specific settings.

use crate::blocks::{
    Alignment, Block, BlockId, BlockListOps, BlockPayload, BlockRegistry, CatalogueEntry, FaqBlock,
    FooterBlock, OrderedBlockList, RichTextBlock,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate section id `{0}`")]
    DuplicateSectionId(SectionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Footer,
    Faq,
    RichText,
    ImageBanner,
}

impl SectionType {
    pub fn holds_blocks(self) -> bool {
        !matches!(self, SectionType::ImageBanner)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionType::Footer => "footer",
            SectionType::Faq => "faq",
            SectionType::RichText => "rich-text",
            SectionType::ImageBanner => "image-banner",
        };
        f.write_str(name)
    }
}

/* ---------- section-level settings ---------- */

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FooterSettings {
    pub color_scheme: String,
    pub show_payment_icons: bool,
    pub copyright_text: String,
    pub blocks: OrderedBlockList<FooterBlock>,
}

impl Default for FooterSettings {
    fn default() -> Self {
        Self {
            color_scheme: "scheme-1".to_string(),
            show_payment_icons: true,
            copyright_text: String::new(),
            blocks: OrderedBlockList::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FaqSettings {
    pub heading: String,
    pub description: String,
    pub color_scheme: String,
    pub blocks: OrderedBlockList<FaqBlock>,
}

impl Default for FaqSettings {
    fn default() -> Self {
        Self {
            heading: "Frequently asked questions".to_string(),
            description: String::new(),
            color_scheme: "scheme-1".to_string(),
            blocks: OrderedBlockList::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RichTextSettings {
    pub alignment: Alignment,
    pub full_width: bool,
    pub color_scheme: String,
    pub blocks: OrderedBlockList<RichTextBlock>,
}

impl Default for RichTextSettings {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            full_width: false,
            color_scheme: "scheme-1".to_string(),
            blocks: OrderedBlockList::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BannerHeight {
    Small,
    #[default]
    Medium,
    Large,
    Adapt,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageBannerSettings {
    pub image: Option<String>,
    pub heading: String,
    pub subheading: String,
    pub button_label: String,
    pub button_link: String,
    /// Percent, 0..=100.
    pub overlay_opacity: u8,
    pub height: BannerHeight,
}

impl Default for ImageBannerSettings {
    fn default() -> Self {
        Self {
            image: None,
            heading: "Image banner".to_string(),
            subheading: "Give customers details about the banner image(s) or content on the template."
                .to_string(),
            button_label: "Shop all".to_string(),
            button_link: "/collections/all".to_string(),
            overlay_opacity: 0,
            height: BannerHeight::Medium,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SectionSettings {
    Footer(FooterSettings),
    Faq(FaqSettings),
    RichText(RichTextSettings),
    ImageBanner(ImageBannerSettings),
}

impl SectionSettings {
    pub fn defaults(section_type: SectionType) -> Self {
        match section_type {
            SectionType::Footer => SectionSettings::Footer(FooterSettings::default()),
            SectionType::Faq => SectionSettings::Faq(FaqSettings::default()),
            SectionType::RichText => SectionSettings::RichText(RichTextSettings::default()),
            SectionType::ImageBanner => SectionSettings::ImageBanner(ImageBannerSettings::default()),
        }
    }

    pub fn section_type(&self) -> SectionType {
        match self {
            SectionSettings::Footer(_) => SectionType::Footer,
            SectionSettings::Faq(_) => SectionType::Faq,
            SectionSettings::RichText(_) => SectionType::RichText,
            SectionSettings::ImageBanner(_) => SectionType::ImageBanner,
        }
    }

    pub fn blocks(&self) -> Option<&dyn BlockListOps> {
        match self {
            SectionSettings::Footer(s) => Some(&s.blocks),
            SectionSettings::Faq(s) => Some(&s.blocks),
            SectionSettings::RichText(s) => Some(&s.blocks),
            SectionSettings::ImageBanner(_) => None,
        }
    }

    pub fn blocks_mut(&mut self) -> Option<&mut dyn BlockListOps> {
        match self {
            SectionSettings::Footer(s) => Some(&mut s.blocks),
            SectionSettings::Faq(s) => Some(&mut s.blocks),
            SectionSettings::RichText(s) => Some(&mut s.blocks),
            SectionSettings::ImageBanner(_) => None,
        }
    }

    pub fn block(&self, id: &BlockId) -> Option<AnyBlock> {
        match self {
            SectionSettings::Footer(s) => s.blocks.get(id).cloned().map(AnyBlock::Footer),
            SectionSettings::Faq(s) => s.blocks.get(id).cloned().map(AnyBlock::Faq),
            SectionSettings::RichText(s) => s.blocks.get(id).cloned().map(AnyBlock::RichText),
            SectionSettings::ImageBanner(_) => None,
        }
    }

    /// False when the block is absent or belongs to another section type.
    pub fn replace_block(&mut self, block: AnyBlock) -> bool {
        match (self, block) {
            (SectionSettings::Footer(s), AnyBlock::Footer(b)) => s.blocks.replace_block(b),
            (SectionSettings::Faq(s), AnyBlock::Faq(b)) => s.blocks.replace_block(b),
            (SectionSettings::RichText(s), AnyBlock::RichText(b)) => s.blocks.replace_block(b),
            _ => false,
        }
    }

    pub fn catalogue(&self) -> &'static [CatalogueEntry] {
        crate::blocks::catalogue(self.section_type())
    }
}

/// A block of any section type; the payload the block panel edits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum AnyBlock {
    Footer(Block<FooterBlock>),
    Faq(Block<FaqBlock>),
    RichText(Block<RichTextBlock>),
}

impl AnyBlock {
    pub fn id(&self) -> &BlockId {
        match self {
            AnyBlock::Footer(b) => &b.id,
            AnyBlock::Faq(b) => &b.id,
            AnyBlock::RichText(b) => &b.id,
        }
    }

    pub fn set_id(&mut self, id: BlockId) {
        match self {
            AnyBlock::Footer(b) => b.id = id,
            AnyBlock::Faq(b) => b.id = id,
            AnyBlock::RichText(b) => b.id = id,
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            AnyBlock::Footer(b) => b.visible,
            AnyBlock::Faq(b) => b.visible,
            AnyBlock::RichText(b) => b.visible,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AnyBlock::Footer(b) => b.tag(),
            AnyBlock::Faq(b) => b.tag(),
            AnyBlock::RichText(b) => b.tag(),
        }
    }

    /// Panel heading from the section's catalogue.
    pub fn label(&self) -> &'static str {
        fn label_of<P: BlockPayload>(block: &Block<P>) -> &'static str {
            BlockRegistry::<P>::entry(block.kind())
                .map(|entry| entry.label)
                .unwrap_or("Block")
        }

        match self {
            AnyBlock::Footer(b) => label_of(b),
            AnyBlock::Faq(b) => label_of(b),
            AnyBlock::RichText(b) => label_of(b),
        }
    }

    /// Defaults for this block's type, same id and visibility.
    pub fn defaults(&self) -> AnyBlock {
        fn reset<P: BlockPayload>(block: &Block<P>) -> Block<P> {
            Block {
                id: block.id.clone(),
                visible: block.visible,
                payload: P::defaults(block.kind()),
            }
        }

        match self {
            AnyBlock::Footer(b) => AnyBlock::Footer(reset(b)),
            AnyBlock::Faq(b) => AnyBlock::Faq(reset(b)),
            AnyBlock::RichText(b) => AnyBlock::RichText(reset(b)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub settings: SectionSettings,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, settings: SectionSettings) -> Self {
        Self {
            id: id.into(),
            settings,
        }
    }

    pub fn section_type(&self) -> SectionType {
        self.settings.section_type()
    }
}

/// Sections of one page, in page order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PageDocument {
    pub sections: Vec<Section>,
}

impl PageDocument {
    pub fn new(sections: Vec<Section>) -> Result<Self, DocumentError> {
        let mut seen = HashSet::with_capacity(sections.len());
        for section in &sections {
            if !seen.insert(&section.id) {
                return Err(DocumentError::DuplicateSectionId(section.id.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// Parses a stored document; blocks missing settings fields get
    /// their type's defaults.
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        let document: PageDocument = serde_json::from_str(raw)?;
        Self::new(document.sections)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }
}

#[cfg(test)]
mod tests;
