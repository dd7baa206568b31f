pub mod loader;
pub mod morphy;
pub mod wordnet;

pub use loader::WordNetLoader;
pub use wordnet::{Pos, WordNet};
