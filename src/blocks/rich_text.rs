//! Rich text blocks.

use crate::blocks::{BlockKind, BlockPayload, CatalogueEntry};
use crate::section::SectionType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RichTextBlockType {
    Icon,
    Subheading,
    Heading,
    Text,
    Buttons,
}

impl BlockKind for RichTextBlockType {
    fn tag(self) -> &'static str {
        match self {
            RichTextBlockType::Icon => "icon",
            RichTextBlockType::Subheading => "subheading",
            RichTextBlockType::Heading => "heading",
            RichTextBlockType::Text => "text",
            RichTextBlockType::Buttons => "buttons",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "icon" => Some(RichTextBlockType::Icon),
            "subheading" => Some(RichTextBlockType::Subheading),
            "heading" => Some(RichTextBlockType::Heading),
            "text" => Some(RichTextBlockType::Text),
            "buttons" => Some(RichTextBlockType::Buttons),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "settings", rename_all = "kebab-case")]
pub enum RichTextBlock {
    Icon(IconSettings),
    Subheading(SubheadingSettings),
    Heading(HeadingSettings),
    Text(TextSettings),
    Buttons(ButtonsSettings),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSize {
    Small,
    Medium,
    Large,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IconSettings {
    pub icon: String,
    pub size: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubheadingSettings {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeadingSettings {
    pub text: String,
    pub size: HeadingSize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextSettings {
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ButtonsSettings {
    pub primary_label: String,
    pub primary_link: String,
    pub secondary_label: Option<String>,
    pub secondary_link: Option<String>,
}

static CATALOGUE: [CatalogueEntry; 5] = [
    CatalogueEntry { tag: "icon", label: "Icon", icon: "star" },
    CatalogueEntry { tag: "subheading", label: "Subheading", icon: "type" },
    CatalogueEntry { tag: "heading", label: "Heading", icon: "heading" },
    CatalogueEntry { tag: "text", label: "Text", icon: "text" },
    CatalogueEntry { tag: "buttons", label: "Buttons", icon: "button" },
];

impl BlockPayload for RichTextBlock {
    type Kind = RichTextBlockType;

    const SECTION: SectionType = SectionType::RichText;

    fn kind(&self) -> RichTextBlockType {
        match self {
            RichTextBlock::Icon(_) => RichTextBlockType::Icon,
            RichTextBlock::Subheading(_) => RichTextBlockType::Subheading,
            RichTextBlock::Heading(_) => RichTextBlockType::Heading,
            RichTextBlock::Text(_) => RichTextBlockType::Text,
            RichTextBlock::Buttons(_) => RichTextBlockType::Buttons,
        }
    }

    fn defaults(kind: RichTextBlockType) -> Self {
        match kind {
            RichTextBlockType::Icon => RichTextBlock::Icon(IconSettings {
                icon: "star".to_string(),
                size: 48,
            }),
            RichTextBlockType::Subheading => RichTextBlock::Subheading(SubheadingSettings {
                text: "Subheading".to_string(),
            }),
            RichTextBlockType::Heading => RichTextBlock::Heading(HeadingSettings {
                text: "Talk about your brand".to_string(),
                size: HeadingSize::Medium,
            }),
            RichTextBlockType::Text => RichTextBlock::Text(TextSettings {
                body: "Share information about your brand with your customers.".to_string(),
            }),
            RichTextBlockType::Buttons => RichTextBlock::Buttons(ButtonsSettings {
                primary_label: "Shop now".to_string(),
                primary_link: "/collections/all".to_string(),
                secondary_label: None,
                secondary_link: None,
            }),
        }
    }

    fn catalogue() -> &'static [CatalogueEntry] {
        &CATALOGUE
    }
}
