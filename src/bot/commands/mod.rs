//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Home-buying assistant command
pub mod chat;

/// Favorite homes commands
pub mod favorites;

/// Price forecast command
pub mod forecast;

/// General utility commands
pub mod general;

/// Home search and detail commands
pub mod homes;

/// Mortgage calculator commands
pub mod mortgage;

/// Home-buying checklist commands
pub mod tasks;

// Export commands
pub use chat::*;
pub use favorites::*;
pub use forecast::*;
pub use general::*;
pub use homes::*;
pub use mortgage::*;
pub use tasks::*;
