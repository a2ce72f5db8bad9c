pub mod executor;
pub mod prefix;
pub mod results;
