mod auth;
mod client;
mod content;
mod credential;
mod evaluation;
mod infra;
mod interview;
mod intervu_services;
#[cfg(test)]
mod mock;

pub use auth::*;
pub use client::*;
pub use content::*;
pub use credential::*;
pub use evaluation::*;
pub use infra::*;
pub use interview::*;
pub use intervu_services::*;
