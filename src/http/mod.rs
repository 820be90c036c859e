//! HTTP access to the service under test

pub mod client;

pub use client::{HttpClient, HttpResponse, RequestSpec, Transport, REQUEST_TIMEOUT};
