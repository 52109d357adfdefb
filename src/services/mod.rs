//! Narrow interfaces to the collaborators the core only consumes.

pub mod blob;
pub mod notify;
pub mod textgen;

pub use blob::{BlobStore, DirBlobStore};
pub use notify::{LogNotifier, NotificationService, OutboxNotifier};
pub use textgen::{ChecklistSuggestion, CommandTextGenerator, TextGenerationService};
