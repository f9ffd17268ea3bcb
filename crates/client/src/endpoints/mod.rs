//! HTTP plumbing shared by every service: query strings, path encoding,
//! sending and decoding.

pub mod query;
mod request;
pub mod url_encoding;

pub use query::QueryParams;
pub use request::RawBody;
pub(crate) use request::{read_envelope, read_json, read_raw, send_request};
pub use url_encoding::encode_path_segment;
