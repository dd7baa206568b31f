pub mod clipboard;

pub use clipboard::{copy_text, read_text};
