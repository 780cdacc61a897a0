//! Small helpers with no page state of their own.

pub mod dates;
pub mod theme;
