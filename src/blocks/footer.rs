//! Footer blocks.

use crate::blocks::{BlockKind, BlockPayload, CatalogueEntry};
use crate::section::SectionType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FooterBlockType {
    LogoWithText,
    Subscribe,
    SocialMedia,
    Menu,
    Text,
    Image,
}

impl BlockKind for FooterBlockType {
    fn tag(self) -> &'static str {
        match self {
            FooterBlockType::LogoWithText => "logo-with-text",
            FooterBlockType::Subscribe => "subscribe",
            FooterBlockType::SocialMedia => "social-media",
            FooterBlockType::Menu => "menu",
            FooterBlockType::Text => "text",
            FooterBlockType::Image => "image",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "logo-with-text" => Some(FooterBlockType::LogoWithText),
            "subscribe" => Some(FooterBlockType::Subscribe),
            "social-media" => Some(FooterBlockType::SocialMedia),
            "menu" => Some(FooterBlockType::Menu),
            "text" => Some(FooterBlockType::Text),
            "image" => Some(FooterBlockType::Image),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "settings", rename_all = "kebab-case")]
pub enum FooterBlock {
    LogoWithText(LogoWithTextSettings),
    Subscribe(SubscribeSettings),
    SocialMedia(SocialMediaSettings),
    Menu(MenuSettings),
    Text(TextSettings),
    Image(ImageSettings),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogoWithTextSettings {
    pub logo: Option<String>,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscribeSettings {
    pub heading: String,
    pub description: String,
    pub placeholder: String,
    pub button_label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SocialMediaSettings {
    pub heading: String,
    pub links: Vec<SocialLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuLink {
    pub label: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuSettings {
    pub heading: String,
    pub links: Vec<MenuLink>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextSettings {
    pub heading: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub image: Option<String>,
    pub alt: String,
    pub width: u32,
}

fn menu_link(label: &str, url: &str) -> MenuLink {
    MenuLink {
        label: label.to_string(),
        url: url.to_string(),
    }
}

static CATALOGUE: [CatalogueEntry; 6] = [
    CatalogueEntry { tag: "logo-with-text", label: "Logo with text", icon: "logo" },
    CatalogueEntry { tag: "subscribe", label: "Email signup", icon: "mail" },
    CatalogueEntry { tag: "social-media", label: "Social media", icon: "share" },
    CatalogueEntry { tag: "menu", label: "Menu", icon: "list" },
    CatalogueEntry { tag: "text", label: "Text", icon: "text" },
    CatalogueEntry { tag: "image", label: "Image", icon: "image" },
];

impl BlockPayload for FooterBlock {
    type Kind = FooterBlockType;

    const SECTION: SectionType = SectionType::Footer;

    fn kind(&self) -> FooterBlockType {
        match self {
            FooterBlock::LogoWithText(_) => FooterBlockType::LogoWithText,
            FooterBlock::Subscribe(_) => FooterBlockType::Subscribe,
            FooterBlock::SocialMedia(_) => FooterBlockType::SocialMedia,
            FooterBlock::Menu(_) => FooterBlockType::Menu,
            FooterBlock::Text(_) => FooterBlockType::Text,
            FooterBlock::Image(_) => FooterBlockType::Image,
        }
    }

    fn defaults(kind: FooterBlockType) -> Self {
        match kind {
            FooterBlockType::LogoWithText => FooterBlock::LogoWithText(LogoWithTextSettings {
                logo: None,
                text: "Tell customers about your store.".to_string(),
            }),
            FooterBlockType::Subscribe => FooterBlock::Subscribe(SubscribeSettings {
                heading: "Subscribe to our emails".to_string(),
                description: "Be the first to know about new collections and offers.".to_string(),
                placeholder: "Email".to_string(),
                button_label: "Subscribe".to_string(),
            }),
            FooterBlockType::SocialMedia => FooterBlock::SocialMedia(SocialMediaSettings {
                heading: "Follow us".to_string(),
                links: vec![
                    SocialLink { platform: "instagram".to_string(), url: String::new() },
                    SocialLink { platform: "facebook".to_string(), url: String::new() },
                ],
            }),
            FooterBlockType::Menu => FooterBlock::Menu(MenuSettings {
                heading: "Quick links".to_string(),
                links: vec![
                    menu_link("Search", "/search"),
                    menu_link("About us", "/pages/about"),
                    menu_link("Contact", "/pages/contact"),
                ],
            }),
            FooterBlockType::Text => FooterBlock::Text(TextSettings {
                heading: "Heading".to_string(),
                body: "Share information about your brand with your customers.".to_string(),
            }),
            FooterBlockType::Image => FooterBlock::Image(ImageSettings {
                image: None,
                alt: String::new(),
                width: 100,
            }),
        }
    }

    fn catalogue() -> &'static [CatalogueEntry] {
        &CATALOGUE
    }
}
