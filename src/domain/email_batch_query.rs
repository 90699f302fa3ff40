use serde::Deserialize;

/// Raw pagination parameters as they arrive in a `/email/get_batch` body.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct EmailBatchBody {
    pub page: i64,
    pub count: i64,
}

/// A validated page request: `page` and `count` are both at least 1 and the
/// resulting offset fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailBatchQuery {
    page: i64,
    count: i64,
    offset: i64,
}

impl EmailBatchQuery {
    pub fn parse(page: i64, count: i64) -> Result<EmailBatchQuery, String> {
        if page <= 0 || count <= 0 {
            return Err(format!(
                "Page and Count fields are required and must be > 0 (got page {}, count {})",
                page, count
            ));
        }

        let offset = (page - 1)
            .checked_mul(count)
            .ok_or_else(|| format!("Page {} with Count {} is out of range", page, count))?;

        Ok(Self {
            page,
            count,
            offset,
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl TryFrom<EmailBatchBody> for EmailBatchQuery {
    type Error = String;

    fn try_from(body: EmailBatchBody) -> Result<Self, Self::Error> {
        EmailBatchQuery::parse(body.page, body.count)
    }
}
