use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::email_entry::EmailEntry;

/// Body shared by `/email/create`, `/email/get` and `/email/delete`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EmailBody {
    pub email: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateEmailBody {
    pub id: Option<i64>,
    pub email: String,
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub opt_out: bool,
}

impl TryFrom<UpdateEmailBody> for EmailEntry {
    type Error = String;

    fn try_from(body: UpdateEmailBody) -> Result<Self, Self::Error> {
        let id = body
            .id
            .ok_or_else(|| format!("Id field is required to update {}", body.email))?;

        Ok(EmailEntry {
            id,
            email: body.email,
            confirmed_at: body.confirmed_at,
            opt_out: body.opt_out,
        })
    }
}
