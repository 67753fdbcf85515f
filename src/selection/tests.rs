use super::*;
use crate::blocks::faq::FaqBlockType;
use crate::section::{FaqSettings, PageDocument, Section, SectionSettings, SectionType};
use crate::store::InMemoryStore;

#[test]
fn block_address_round_trips() {
    let address = SelectionAddress::block("s1", "b2");
    let encoded = address.encode();
    assert_eq!(encoded, "s1:child:b2");

    let decoded = SelectionAddress::decode(&encoded).unwrap();
    assert_eq!(decoded.section_id(), &SectionId::from("s1"));
    assert_eq!(decoded.block_id(), Some(&BlockId::from("b2")));
}

#[test]
fn section_address_round_trips() {
    let decoded = SelectionAddress::decode(&SelectionAddress::section("s1").encode()).unwrap();
    assert_eq!(decoded, SelectionAddress::Section(SectionId::from("s1")));
    assert_eq!(decoded.block_id(), None);
}

#[test]
fn malformed_addresses_decode_to_nothing() {
    assert_eq!(SelectionAddress::decode(""), None);
    assert_eq!(SelectionAddress::decode(":child:b2"), None);
    assert_eq!(SelectionAddress::decode("s1:child:"), None);
}

#[test]
fn block_id_may_contain_the_marker() {
    let decoded = SelectionAddress::decode("s1:child:b:child:2").unwrap();
    assert_eq!(decoded.section_id(), &SectionId::from("s1"));
    assert_eq!(decoded.block_id(), Some(&BlockId::from("b:child:2")));
}

#[test]
fn closing_block_returns_to_section() {
    let context = SelectionContext::in_memory();
    context.select_block(&SectionId::from("s1"), &BlockId::from("b2"));
    context.close_block();
    assert_eq!(context.address(), Some(SelectionAddress::section("s1")));

    // Closing again keeps the section selected.
    context.close_block();
    assert_eq!(context.address(), Some(SelectionAddress::section("s1")));
}

#[test]
fn context_shares_the_raw_slot() {
    let slot = Arc::new(SelectionSlot::default());
    let context = SelectionContext::new(slot.clone());

    slot.select(Some("faq:child:item-1".to_string()));
    assert_eq!(context.address(), Some(SelectionAddress::block("faq", "item-1")));

    context.clear();
    assert_eq!(slot.current(), None);
}

fn store_with_item() -> (InMemoryStore, BlockId) {
    let mut faq = FaqSettings::default();
    let item = faq.blocks.add_block(FaqBlockType::Item);
    let store = InMemoryStore::new(PageDocument {
        sections: vec![
            Section::new("faq", SectionSettings::Faq(faq)),
            Section::new("banner", SectionSettings::defaults(SectionType::ImageBanner)),
        ],
    });
    (store, item)
}

#[test]
fn router_picks_section_or_block_panel() {
    let (store, item) = store_with_item();

    let panel = PanelRouter::route(&store, Some(&SelectionAddress::section("faq")));
    assert!(matches!(panel, Panel::Section(ref s) if s.id == SectionId::from("faq")));

    let address = SelectionAddress::Block {
        section: SectionId::from("faq"),
        block: item.clone(),
    };
    match PanelRouter::route(&store, Some(&address)) {
        Panel::Block { section, block } => {
            assert_eq!(section.id, SectionId::from("faq"));
            assert_eq!(block.id(), &item);
            assert_eq!(block.label(), "Question");
        }
        other => panic!("expected block panel, got {:?}", other),
    }
}

#[test]
fn router_fails_soft() {
    let (store, _) = store_with_item();

    assert!(PanelRouter::route(&store, None).is_none());
    assert!(PanelRouter::route(&store, Some(&SelectionAddress::section("missing"))).is_none());
    assert!(PanelRouter::route(&store, Some(&SelectionAddress::block("faq", "missing"))).is_none());
    assert!(PanelRouter::route(&store, Some(&SelectionAddress::block("banner", "anything"))).is_none());
}
