pub mod competition;
pub mod score;

pub use competition::NewCompetition;
pub use score::NewScore;
