//! Shared document store. Sections are replaced whole, never mutated in place.

use crate::section::{PageDocument, Section, SectionId, SectionSettings};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Synchronous from the editor's point of view.
pub trait Store: Send + Sync {
    fn get_section(&self, id: &SectionId) -> Option<Arc<Section>>;

    fn replace_section_settings(&self, id: &SectionId, settings: SectionSettings);

    /// Sections in page order.
    fn sections(&self) -> Vec<Arc<Section>>;

    /// Bumped on every successful replacement.
    fn revision(&self) -> u64;

    fn document(&self) -> PageDocument {
        PageDocument {
            sections: self.sections().iter().map(|s| Section::clone(s)).collect(),
        }
    }

    fn restore(&self, document: PageDocument);
}

#[derive(Default)]
struct StoreInner {
    sections: Vec<Arc<Section>>,
    revision: u64,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new(document: PageDocument) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                sections: document.sections.into_iter().map(Arc::new).collect(),
                revision: 0,
            }),
        }
    }
}

impl Store for InMemoryStore {
    fn get_section(&self, id: &SectionId) -> Option<Arc<Section>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.sections.iter().find(|s| &s.id == id).cloned()
    }

    fn replace_section_settings(&self, id: &SectionId, settings: SectionSettings) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = inner.sections.iter_mut().find(|s| &s.id == id) else {
            debug!(section = %id, "replace ignored, section not in store");
            return;
        };

        if slot.section_type() != settings.section_type() {
            warn!(
                section = %id,
                current = %slot.section_type(),
                attempted = %settings.section_type(),
                "replace rejected, section type mismatch"
            );
            return;
        }

        *slot = Arc::new(Section {
            id: id.clone(),
            settings,
        });
        inner.revision += 1;
    }

    fn sections(&self) -> Vec<Arc<Section>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.sections.clone()
    }

    fn revision(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    fn restore(&self, document: PageDocument) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.sections = document.sections.into_iter().map(Arc::new).collect();
        inner.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{FaqSettings, ImageBannerSettings, SectionType};

    fn store() -> InMemoryStore {
        InMemoryStore::new(PageDocument {
            sections: vec![
                Section::new("faq", SectionSettings::defaults(SectionType::Faq)),
                Section::new("banner", SectionSettings::defaults(SectionType::ImageBanner)),
            ],
        })
    }

    #[test]
    fn replacement_swaps_the_whole_section() {
        let store = store();
        let id = SectionId::from("faq");
        let before = store.get_section(&id).unwrap();

        let settings = SectionSettings::Faq(FaqSettings {
            heading: "Shipping questions".to_string(),
            ..FaqSettings::default()
        });
        store.replace_section_settings(&id, settings.clone());

        let after = store.get_section(&id).unwrap();
        assert_eq!(after.settings, settings);
        // Readers holding the old Arc still see the old object.
        assert_eq!(before.settings, SectionSettings::defaults(SectionType::Faq));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn unknown_section_is_ignored() {
        let store = store();
        store.replace_section_settings(
            &SectionId::from("missing"),
            SectionSettings::defaults(SectionType::Faq),
        );
        assert_eq!(store.revision(), 0);
        assert_eq!(store.sections().len(), 2);
    }

    #[test]
    fn type_change_is_rejected() {
        let store = store();
        let id = SectionId::from("banner");
        store.replace_section_settings(&id, SectionSettings::defaults(SectionType::Footer));

        let section = store.get_section(&id).unwrap();
        assert_eq!(
            section.settings,
            SectionSettings::ImageBanner(ImageBannerSettings::default())
        );
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn restore_round_trips_document() {
        let store = store();
        let snapshot = store.document();
        store.replace_section_settings(
            &SectionId::from("faq"),
            SectionSettings::Faq(FaqSettings {
                heading: "Changed".to_string(),
                ..FaqSettings::default()
            }),
        );
        store.restore(snapshot.clone());
        assert_eq!(store.document(), snapshot);
    }
}
