//! Section/block content-editing engine for the storefront theme editor.
//!
//! ```text
//! user action → OrderedBlockList → new SectionSettings → Store (+ EditBuffer)
//!                                                     ↘ SaveDispatcher (async)
//!                                                     ↘ HistorySink (structural only)
//! ```

pub mod blocks;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod history;
pub mod persistence;
pub mod section;
pub mod selection;
pub mod store;

pub use blocks::{Block, BlockId, OrderedBlockList, RegistryError};
pub use config::EditorConfig;
pub use editor::{EditorError, SectionEditor};
pub use section::{PageDocument, Section, SectionId, SectionSettings, SectionType};
pub use selection::{Panel, SelectionAddress, CHILD_MARKER};
