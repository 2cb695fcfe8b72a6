pub mod reconcile;
pub mod scoring;
