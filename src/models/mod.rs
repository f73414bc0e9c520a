pub mod item;
pub mod report;

pub use item::*;
pub use report::*;
