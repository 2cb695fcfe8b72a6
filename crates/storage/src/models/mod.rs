mod participant;
mod score;

pub use participant::Participant;
pub use score::Score;
