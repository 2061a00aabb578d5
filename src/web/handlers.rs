//! HTTP request handlers organized by domain

pub mod channels;
pub mod health;
