//! Response and request models for the resource endpoints

pub mod catalog;
pub mod content;
pub mod delivery;
pub mod news;

pub use catalog::*;
pub use content::*;
pub use delivery::*;
pub use news::*;
