//! FAQ blocks: categories and the question/answer items grouped under them.

use crate::blocks::{Alignment, BlockId, BlockKind, BlockPayload, CatalogueEntry};
use crate::section::SectionType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaqBlockType {
    Category,
    Item,
}

impl BlockKind for FaqBlockType {
    fn tag(self) -> &'static str {
        match self {
            FaqBlockType::Category => "category",
            FaqBlockType::Item => "item",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "category" => Some(FaqBlockType::Category),
            "item" => Some(FaqBlockType::Item),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "settings", rename_all = "kebab-case")]
pub enum FaqBlock {
    Category(CategorySettings),
    Item(ItemSettings),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategorySettings {
    pub title: String,
    pub alignment: Alignment,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ItemSettings {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<BlockId>,
}

static CATALOGUE: [CatalogueEntry; 2] = [
    CatalogueEntry { tag: "category", label: "Category", icon: "folder" },
    CatalogueEntry { tag: "item", label: "Question", icon: "help" },
];

impl BlockPayload for FaqBlock {
    type Kind = FaqBlockType;

    const SECTION: SectionType = SectionType::Faq;

    fn kind(&self) -> FaqBlockType {
        match self {
            FaqBlock::Category(_) => FaqBlockType::Category,
            FaqBlock::Item(_) => FaqBlockType::Item,
        }
    }

    fn defaults(kind: FaqBlockType) -> Self {
        match kind {
            FaqBlockType::Category => FaqBlock::Category(CategorySettings {
                title: "General".to_string(),
                alignment: Alignment::Left,
            }),
            FaqBlockType::Item => FaqBlock::Item(ItemSettings {
                question: "Question".to_string(),
                answer: "Use this space to answer a common customer question.".to_string(),
                category_id: None,
            }),
        }
    }

    fn catalogue() -> &'static [CatalogueEntry] {
        &CATALOGUE
    }

    fn is_group(&self) -> bool {
        matches!(self, FaqBlock::Category(_))
    }

    fn group_ref(&self) -> Option<&BlockId> {
        match self {
            FaqBlock::Item(item) => item.category_id.as_ref(),
            FaqBlock::Category(_) => None,
        }
    }

    fn clear_group_ref(&mut self) {
        if let FaqBlock::Item(item) = self {
            item.category_id = None;
        }
    }
}
