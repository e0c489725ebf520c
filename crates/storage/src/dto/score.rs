use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for upserting one apparatus score. The competition id is
/// supplied separately by the writer, so the same list can be staged before
/// the competition row exists.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewScore {
    #[validate(length(min = 1, max = 50))]
    pub apparatus: String,

    pub value: Option<Decimal>,

    #[validate(range(min = 1))]
    pub place: Option<i32>,

    pub start_value: Option<Decimal>,
}
