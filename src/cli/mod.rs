pub mod info;
pub mod options;
pub mod transform;

pub use info::*;
pub use options::*;
pub use transform::*;
