//! `formcollector` - A contact preference form collector
//!
//! This library renders a GOV.UK-styled form asking how a user wants to be
//! contacted, validates the email address or phone number they give, keeps
//! accepted submissions in memory and shows a confirmation page.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod server;
pub mod store;
pub mod submission;
pub mod validation;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use server::{app, build_router, serve, AppState};
pub use store::{MemoryStore, SubmissionStore};
pub use submission::{ContactPreference, NewSubmission, Submission};
pub use validation::{ContactValidator, FieldErrors};
pub use views::{TemplateRenderer, View, ViewRenderer};
