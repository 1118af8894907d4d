//! Red-black ordered map.

mod print;
mod tree;
mod types;
mod util;

pub use print::print;
pub use tree::RbTree;
pub use types::{RbNode, TraversalInfo};
pub use util::TreeInvariantError;
