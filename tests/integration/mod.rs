//! Integration tests for http_envelope
//!
//! These tests drive the public API end to end: an `http::Request` goes in,
//! captured data and an `http::Response` come out.
//!
//! Run with: cargo test --test integration

mod helpers;

mod capture;
mod envelope;
