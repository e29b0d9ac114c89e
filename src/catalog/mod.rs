//! Static lookup tables: status codes, method verbs and status labels.
//!
//! Everything here is `const` data; nothing is computed at runtime except
//! the reason-phrase lookup.

pub mod http;
pub mod method;
pub mod status;
