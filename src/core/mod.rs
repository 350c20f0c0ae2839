// Core matching algorithm exports
pub mod compatibility;
pub mod height;
pub mod selector;

pub use compatibility::{is_compatible, MatchQuery};
pub use height::height_to_inches;
pub use selector::{MatchSelector, RecencyWindow, Selection, RECENT_WINDOW};
