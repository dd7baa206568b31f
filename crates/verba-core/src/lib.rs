pub mod chunk;
pub mod lexicon;
pub mod preprocess;
pub mod thesaurus;

pub use chunk::{Chunk, DEFAULT_MAX_CHARS, chunk_text, reassemble};
pub use lexicon::{Lemma, LexicalDatabase, LexiconError, Synset};
pub use thesaurus::{Thesaurus, ThesaurusEntry, WordChoice};
