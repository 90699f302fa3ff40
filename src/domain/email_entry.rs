use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single mailing-list address together with its confirmation and opt-out state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailEntry {
    pub id: i64,
    pub email: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub opt_out: bool,
}
