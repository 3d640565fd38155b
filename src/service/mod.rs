//! Backstage service module for HTTP communication

mod check;
mod client;
mod traits;

pub use check::{run_check, CheckOutcome, UniquenessQuery};
pub use client::{BackstageClient, DEFAULT_BASE_URL};
pub use traits::BackstageClientTrait;

#[cfg(test)]
pub use traits::MockBackstageClientTrait;
