mod client;

pub use client::PowerDnsClient;
