//! Data model for content handed to the renderers.
//!
//! Source adapters produce these shapes; the render pipeline consumes them.
//! Tables stay ragged until the projector normalizes them into a [`Grid`].

mod cell;
mod table;

pub use cell::Cell;
pub use table::{Grid, Row, Sheet, Table};
