//! Application state module

mod forms;
mod notice;

pub use forms::*;
pub use notice::*;
