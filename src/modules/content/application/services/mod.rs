pub mod content_store;
pub mod project_reconciler;
