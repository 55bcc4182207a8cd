mod auth;
mod client;
pub mod domain;
mod timesheet_url;

pub(crate) use timesheet_url::*;

pub use auth::*;
pub use client::*;
pub use domain::*;
