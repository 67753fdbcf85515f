//! Per section type catalogue: block tag → default settings + label/icon.

use crate::blocks::{BlockKind, BlockPayload, FaqBlock, FooterBlock, RegistryError, RichTextBlock};
use crate::section::SectionType;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::error;

/// One row of an "add block" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    #[serde(rename = "type")]
    pub tag: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub struct BlockRegistry<P>(PhantomData<P>);

impl<P: BlockPayload> BlockRegistry<P> {
    pub fn kind(tag: &str) -> Result<P::Kind, RegistryError> {
        P::Kind::from_tag(tag).ok_or_else(|| {
            error!(section = %P::SECTION, tag, "unknown block type requested");
            RegistryError::UnknownBlockType {
                section: P::SECTION,
                tag: tag.to_string(),
            }
        })
    }

    pub fn create_defaults(tag: &str) -> Result<P, RegistryError> {
        Self::kind(tag).map(P::defaults)
    }

    pub fn entries() -> &'static [CatalogueEntry] {
        P::catalogue()
    }

    pub fn entry(kind: P::Kind) -> Option<&'static CatalogueEntry> {
        P::catalogue().iter().find(|entry| entry.tag == kind.tag())
    }
}

/// Catalogue exposed to the "add block" affordance of a section type.
pub fn catalogue(section: SectionType) -> &'static [CatalogueEntry] {
    match section {
        SectionType::Footer => BlockRegistry::<FooterBlock>::entries(),
        SectionType::Faq => BlockRegistry::<FaqBlock>::entries(),
        SectionType::RichText => BlockRegistry::<RichTextBlock>::entries(),
        SectionType::ImageBanner => &[],
    }
}
