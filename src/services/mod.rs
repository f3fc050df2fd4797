//! Service layer for token resolution and session plumbing.
//!
//! Services turn catalog data and user choices into resolved values: colors,
//! expanded style values, interaction-state overlays, and the assembled
//! design configuration. Import and snapshot persistence also live here.

pub mod assembler;
pub mod color_resolver;
pub mod import;
pub mod interaction;
pub mod overlay;
pub mod placeholder;
pub mod snapshot;

// Re-export commonly used types and functions
pub use assembler::assemble;
pub use color_resolver::{default_color, resolve_colors, resolve_mode};
pub use import::{parse_import, ImportError, ImportedState};
pub use interaction::{InteractionEvent, InteractionState};
pub use overlay::{directives, merge_states, overlay, render_component, RenderedComponent};
pub use placeholder::{contains_token, expand, Effect};
pub use snapshot::{DebouncedPersister, Snapshot, SnapshotStore};
