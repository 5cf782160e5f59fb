#![allow(dead_code)]
mod mock_http;
mod pki;

pub use mock_http::*;
pub use pki::*;
