pub mod inverted;
pub mod payload;
pub mod posting;
