use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Payload for inserting a competition, as produced by the import pipeline
/// or manual entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_date_range"))]
pub struct NewCompetition {
    pub user_id: Uuid,

    pub gymnast_id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 100))]
    pub level: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(range(min = 1))]
    pub all_around_place: Option<i32>,
}

fn validate_date_range(req: &NewCompetition) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        if end < start {
            return Err(ValidationError::new("end_date_before_start_date"));
        }
    }
    Ok(())
}
