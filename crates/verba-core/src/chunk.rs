//! Splitting input text into pieces small enough for one translation request.
//!
//! Text containing CJK characters is cut into fixed-width slices, since those
//! scripts give no safe word or paragraph boundary to split on. Everything else
//! is split on line breaks and consecutive paragraphs are packed greedily.

/// Characters per request accepted by the public translation API
pub const DEFAULT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the source text, 0-based
    pub index: usize,
    pub content: String,
    /// Set when this chunk continues the previous one mid-line, so no line
    /// break separated them in the source
    pub continuation: bool,
}

impl Chunk {
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Hiragana/Katakana, CJK Extension A, CJK Unified Ideographs, Hangul Syllables
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{AC00}'..='\u{D7AF}'
    )
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Empty input yields no chunks. A `max_chars` of zero is treated as one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    if text.is_empty() {
        return Vec::new();
    }

    let max_chars = max_chars.max(1);
    let pieces = if contains_cjk(text) {
        slice_chars(text, max_chars)
            .into_iter()
            .enumerate()
            .map(|(i, piece)| (piece, i > 0))
            .collect()
    } else {
        pack_paragraphs(text, max_chars)
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, (content, continuation))| Chunk {
            index,
            content,
            continuation,
        })
        .collect()
}

/// Rebuild the source text from its chunks
pub fn reassemble(chunks: &[Chunk]) -> String {
    let mut text = String::new();
    for chunk in chunks {
        if chunk.index > 0 && !chunk.continuation {
            text.push('\n');
        }
        text.push_str(&chunk.content);
    }
    text
}

fn slice_chars(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|slice| slice.iter().collect())
        .collect()
}

fn pack_paragraphs(text: &str, max_chars: usize) -> Vec<(String, bool)> {
    let mut packer = Packer::default();
    // `Some("")` is a pending blank line, which still has to survive
    let mut current: Option<String> = None;
    let mut current_len = 0;

    for paragraph in text.split('\n') {
        let paragraph_len = paragraph.chars().count();

        if current_len + paragraph_len + 1 > max_chars {
            if let Some(group) = current.take() {
                packer.flush(group, true);
            }
            current_len = 0;
        }

        if paragraph_len > max_chars {
            for (i, slice) in slice_chars(paragraph, max_chars).into_iter().enumerate() {
                packer.push(slice, i > 0);
            }
            continue;
        }

        match current.as_mut() {
            Some(group) => {
                group.push('\n');
                group.push_str(paragraph);
                current_len += paragraph_len + 1;
            }
            None => {
                current = Some(paragraph.to_string());
                current_len = paragraph_len;
            }
        }
    }

    if let Some(group) = current {
        packer.flush(group, false);
    }

    packer.chunks
}

#[derive(Default)]
struct Packer {
    chunks: Vec<(String, bool)>,
    glue_next: bool,
}

impl Packer {
    fn push(&mut self, content: String, continuation: bool) {
        self.chunks.push((content, continuation || self.glue_next));
        self.glue_next = false;
    }

    /// Emit a group of paragraphs. A group holding only a blank line becomes a
    /// bare line break glued to whichever side keeps the source intact.
    fn flush(&mut self, group: String, more_follows: bool) {
        if !group.is_empty() {
            self.push(group, false);
        } else if more_follows {
            self.push("\n".to_string(), false);
            self.glue_next = true;
        } else {
            self.push("\n".to_string(), true);
        }
    }
}
