//! Application services: the blog state provider, the access gate and the
//! thin relays behind each form.

pub mod access;
pub mod blog;
pub mod chrome;
pub mod contact;
pub mod content;
pub mod error;
pub mod feed;
pub mod newsletter;
pub mod notice;
pub mod pagination;
pub mod subscribers;
