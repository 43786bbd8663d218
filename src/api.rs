mod client;
mod models;

pub use client::Client;
