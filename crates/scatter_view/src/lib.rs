//! Scatter View
//!
//! The stateful layer around the scatter pipeline, for hosts that keep a
//! plot on screen:
//! - Persisted view settings (axis fields, colors, layout knobs)
//! - Debouncing of container resizes
//! - A view object that recomputes its layout on every change and answers
//!   hover/click queries with source record keys

mod error;
mod settings;
mod debounce;
mod view;

pub use error::*;
pub use settings::*;
pub use debounce::*;
pub use view::*;
