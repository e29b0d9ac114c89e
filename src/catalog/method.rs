//! HTTP method verbs.

/// Requests a representation of the resource.
pub const GET: &str = "GET";
/// Like GET, without the response body.
pub const HEAD: &str = "HEAD";
/// Submits an entity to the resource.
pub const POST: &str = "POST";
/// Replaces the resource with the payload.
pub const PUT: &str = "PUT";
/// Deletes the resource.
pub const DELETE: &str = "DELETE";
/// Establishes a tunnel to the server.
pub const CONNECT: &str = "CONNECT";
/// Describes the communication options.
pub const OPTIONS: &str = "OPTIONS";
/// Message loop-back test.
pub const TRACE: &str = "TRACE";
/// Partial modification of the resource.
pub const PATCH: &str = "PATCH";

/// Every method verb, in declaration order.
pub const ALL: &[&str] = &[GET, HEAD, POST, PUT, DELETE, CONNECT, OPTIONS, TRACE, PATCH];
