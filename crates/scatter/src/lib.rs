//! Scatter - the data pipeline behind a two-axis scatter plot
//!
//! This crate provides support for:
//! - Reading numeric and categorical fields from host records
//! - Building plottable points, with a reason for every skipped record
//! - Computing padded axis bounds
//! - Linear scales and their inverses
//! - Cyclic category color assignment
//! - Mapping points to screen coordinates
//! - Evenly spaced axis ticks
//! - Hit testing and zoom rescaling for interactive hosts
//!
//! Every function here is a pure computation: the same records and
//! configuration always produce the same layout.

mod model;
mod error;
mod record;
mod extract;
mod points;
mod bounds;
mod scale;
mod colors;
mod screen;
mod ticks;
mod layout;
mod interaction;

pub use model::*;
pub use error::*;
pub use record::*;
pub use extract::*;
pub use points::*;
pub use bounds::*;
pub use scale::*;
pub use colors::*;
pub use screen::*;
pub use ticks::*;
pub use layout::*;
pub use interaction::*;
