pub mod search;
pub mod tree;

pub use search::SearchState;
pub use tree::TreeState;
