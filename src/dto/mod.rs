//! DTO modules that bridge services with templates.

pub mod calendar;
pub mod chat;
pub mod client;
pub mod main;
