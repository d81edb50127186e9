//! Terraform Cloud/Enterprise workspace variables API.

mod client;
pub mod models;
mod variable;

pub use client::{TfeClient, TfeSettings, UPDATABLE_ATTRIBUTES};
pub use models::NewVariable;
pub use variable::{Category, Variable};
