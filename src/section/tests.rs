use super::*;
use crate::blocks::faq::{FaqBlockType, ItemSettings};
use crate::blocks::rich_text::RichTextBlockType;
use serde_json::json;

#[test]
fn block_bearing_types() {
    assert!(SectionType::Footer.holds_blocks());
    assert!(SectionType::Faq.holds_blocks());
    assert!(SectionType::RichText.holds_blocks());
    assert!(!SectionType::ImageBanner.holds_blocks());

    assert!(SectionSettings::defaults(SectionType::ImageBanner).blocks().is_none());
    assert!(SectionSettings::defaults(SectionType::Footer).blocks().is_some());
}

#[test]
fn type_follows_settings_variant() {
    let section = Section::new("s1", SectionSettings::defaults(SectionType::RichText));
    assert_eq!(section.section_type(), SectionType::RichText);
    assert_eq!(section.settings.catalogue().len(), 5);
}

#[test]
fn block_lookup_and_replace() {
    let mut settings = RichTextSettings::default();
    let id = settings.blocks.add_block(RichTextBlockType::Heading);
    let mut settings = SectionSettings::RichText(settings);

    let mut block = settings.block(&id).unwrap();
    assert_eq!(block.tag(), "heading");
    assert_eq!(block.label(), "Heading");

    if let AnyBlock::RichText(b) = &mut block {
        b.visible = false;
    }
    assert!(settings.replace_block(block));
    assert!(!settings.block(&id).unwrap().visible());
}

#[test]
fn replace_rejects_foreign_block() {
    let mut faq = FaqSettings::default();
    let id = faq.blocks.add_block(FaqBlockType::Item);
    let block = SectionSettings::Faq(faq).block(&id).unwrap();

    let mut rich_text = SectionSettings::defaults(SectionType::RichText);
    assert!(!rich_text.replace_block(block));
}

#[test]
fn any_block_defaults_keep_identity() {
    let mut faq = FaqSettings::default();
    let id = faq.blocks.add_block(FaqBlockType::Item);
    faq.blocks.toggle_visibility(&id);
    let block = SectionSettings::Faq(faq).block(&id).unwrap();

    let defaults = block.defaults();
    assert_eq!(defaults.id(), &id);
    assert!(!defaults.visible());
}

#[test]
fn document_loads_partial_settings() {
    let raw = json!({
        "sections": [
            {
                "id": "faq-main",
                "settings": {
                    "type": "faq",
                    "heading": "Shipping",
                    "blocks": [
                        {"id": "cat-1", "type": "category", "settings": {"title": "Delivery"}},
                        {"id": "q-1", "type": "item", "settings": {"question": "When?", "category_id": "cat-1"}}
                    ]
                }
            },
            {"id": "banner", "settings": {"type": "image-banner"}}
        ]
    })
    .to_string();

    let document = PageDocument::from_json(&raw).unwrap();
    let faq = document.section(&SectionId::from("faq-main")).unwrap();
    let SectionSettings::Faq(settings) = &faq.settings else {
        panic!("expected faq settings");
    };

    assert_eq!(settings.heading, "Shipping");
    assert_eq!(settings.color_scheme, "scheme-1");
    assert_eq!(settings.blocks.len(), 2);
    match &settings.blocks.get(&BlockId::from("q-1")).unwrap().payload {
        FaqBlock::Item(ItemSettings { question, answer, category_id }) => {
            assert_eq!(question, "When?");
            assert!(!answer.is_empty());
            assert_eq!(category_id.as_ref(), Some(&BlockId::from("cat-1")));
        }
        other => panic!("unexpected payload {:?}", other),
    }

    let banner = document.section(&SectionId::from("banner")).unwrap();
    assert_eq!(banner.settings, SectionSettings::defaults(SectionType::ImageBanner));
}

#[test]
fn document_rejects_duplicate_sections() {
    let raw = json!({
        "sections": [
            {"id": "a", "settings": {"type": "footer"}},
            {"id": "a", "settings": {"type": "faq"}}
        ]
    })
    .to_string();

    assert!(matches!(
        PageDocument::from_json(&raw),
        Err(DocumentError::DuplicateSectionId(_))
    ));
}

#[test]
fn document_survives_a_save_and_load() {
    let mut footer = FooterSettings::default();
    footer.blocks.add_block(crate::blocks::footer::FooterBlockType::Menu);
    let document = PageDocument::new(vec![Section::new("footer", SectionSettings::Footer(footer))]).unwrap();

    let raw = document.to_json().unwrap();
    assert_eq!(PageDocument::from_json(&raw).unwrap(), document);
}
