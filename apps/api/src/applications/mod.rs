// Job applications: submission with uploaded documents, listings, status and interview lifecycle.

pub mod handlers;
pub mod upload;
