pub mod certificate;
pub mod participants;
