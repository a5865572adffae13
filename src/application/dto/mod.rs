pub mod output_format;
pub mod query_kind;
pub mod query_request;
pub mod query_response;

pub use output_format::OutputFormat;
pub use query_kind::QueryKind;
pub use query_request::QueryRequest;
pub use query_response::{QueryOutcome, QueryResponse};
