pub mod reconcile;
pub mod structure;
