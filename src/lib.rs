pub mod codec;
pub mod display;
pub mod error;
pub mod node;
pub mod storage;
pub mod tree;
pub mod value;

pub use error::SdsError;
pub use tree::NaryTree;
pub use value::Value;
