//! Response envelopes.
//!
//! Every builder sets the transport status code on the per-request
//! [`Context`](crate::core::Context) and returns an [`Envelope`]:
//!
//! ```json
//! {"code": 200, "status": "success", "message": "saved", "data": {"id": 1}}
//! ```
//!
//! `data` appears only when the supplied value is non-empty.

mod emit;
mod envelope;

pub use emit::{finish, render};
pub use envelope::{
    build, custom, error, info, is_empty_value, success, warning, Envelope, DEFAULT_CODE,
    DEFAULT_ERROR_CODE,
};

pub use crate::catalog::status::errors;
