pub mod batch;
pub mod common;
pub mod certificate;
pub mod participant;
