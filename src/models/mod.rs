pub mod foi_request;
pub mod markup;

pub use foi_request::*;
pub use markup::*;
