pub mod email_batch_query;
pub mod email_body;
pub mod email_entry;
