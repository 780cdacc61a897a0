//! Pure widget state machines.
//!
//! DESIGN
//! ======
//! Nothing in here knows about the page. Each machine takes inputs (clicks,
//! ticks, dates, scroll offsets) and returns what changed; the runtime maps
//! those results onto elements and timers.

pub mod carousel;
pub mod counter;
pub mod pagination;
pub mod scroll;
pub mod toggle;
