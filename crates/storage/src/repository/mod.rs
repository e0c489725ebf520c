pub mod competition;
pub mod gymnast;
pub mod score;

pub use competition::CompetitionRepository;
pub use gymnast::GymnastRepository;
pub use score::ScoreRepository;
