//! Vote and answer-accept widgets for a Q&A page.
//!
//! DESIGN
//! ======
//! `WidgetController` owns a registry of every widget on the page and turns
//! each click into one guarded POST. State changes are published as
//! `WidgetEvent`s; the `presenter` module turns them into what the page
//! shows.

pub mod config;
pub mod controller;
pub mod cookie;
pub mod error;
pub mod events;
pub mod page;
pub mod presenter;
pub mod registry;
pub mod transport;
pub mod widget;

pub use controller::{Submission, WidgetController};
pub use error::{ErrorKind, SubmitError};
pub use widget::{AnswerMarkWidget, Phase, VoteWidget, WidgetId};
