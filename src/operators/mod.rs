pub mod join;
pub mod select;

pub use join::join;
pub use select::sel;
