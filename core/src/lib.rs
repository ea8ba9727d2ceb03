//! PageGuide core — an interactive tour layered over a host page.
//!
//! Annotated page elements become numbered overlays; the user steps through
//! them while a message pane shows each step's content. The guide reads the
//! page through the `Page` trait and writes to it only through queued
//! `Action`s, so every host (the CLI scene runner, a browser bridge, tests)
//! drives the same logic.

pub mod command;
pub mod data;
pub mod error;
pub mod events;
pub mod guide;
pub mod help;
pub mod navigation;
pub mod page;
pub mod response;
pub mod tracking;
pub mod types;
pub mod welcome;

pub use error::{GuideError, Result};
pub use guide::PageGuide;
pub use page::Page;
pub use response::{Action, Response};
