//! LG ThinQ cloud integration module
//!
//! - `token`: Access-token lifecycle (signed refresh requests, expiry tracking)
//! - `client`: Appliance status API client

pub mod client;
pub mod token;

pub use client::ThinqClient;
pub use token::TokenManager;
