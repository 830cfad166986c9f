//! YouTube search collaborator
//!
//! - `dto`: response shapes of the YouTube Data API search endpoint
//! - `client`: HTTP client implementing the `VideoSearch` port

mod client;
pub mod dto;

pub use client::YouTubeClient;
