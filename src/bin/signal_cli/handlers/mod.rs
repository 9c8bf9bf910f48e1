#![deny(clippy::all, clippy::pedantic)]

pub mod contact;
pub mod newsletter;
pub mod posts;
pub mod site;
pub mod subscribers;
