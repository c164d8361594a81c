//! Entity repositories.
//!
//! Each repository owns its collection, is rehydrated from the store at
//! startup and writes its full state back after every mutation. A revision
//! counter changes on every mutation so derived views can memoize.

mod focus;
mod ledger;
mod tasks;

pub use focus::{FocusChange, FocusRepo};
pub use ledger::{MoodRepo, SessionRepo};
pub use tasks::{TaskRepo, VISIBLE_TASKS};
