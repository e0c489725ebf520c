pub mod competition;
pub mod gymnast;
pub mod score;

pub use competition::Competition;
pub use gymnast::Gymnast;
pub use score::Score;
