pub mod client_uid;

pub use client_uid::{require_client_uid, CLIENT_UID_HEADER};
