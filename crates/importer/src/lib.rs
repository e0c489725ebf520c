pub mod apparatus;
pub mod commit;
pub mod dates;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod sources;
pub mod traits;

pub use apparatus::{Apparatus, ApparatusMapper, LabelTable};
pub use commit::{ImportCommitter, ImportOutcome};
pub use dates::DateRange;
pub use error::{ImporterError, Result};
pub use models::{MeetDetail, MeetSummary, ScrapedScore};
pub use reconcile::{MatchStrategy, Reconciler};
pub use traits::{ImportContext, MeetImporter};

// Re-export the MeetScoresOnline source
pub use sources::mso::{DetailParser, ListingParser, MsoClient, MsoImporter};
