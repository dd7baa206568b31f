use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use verba_core::{Lemma, LexicalDatabase, LexiconError, Synset};

use crate::morphy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    fn file_suffix(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adjective => "adj",
            Pos::Adverb => "adv",
        }
    }

    fn tag(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adjective => 'a',
            Pos::Adverb => 'r',
        }
    }

    /// Satellite adjectives (`s`) live in the adjective files
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Pos::Noun),
            "v" => Some(Pos::Verb),
            "a" | "s" => Some(Pos::Adjective),
            "r" => Some(Pos::Adverb),
            _ => None,
        }
    }
}

/// Synset as stored in a `data.*` line
#[derive(Debug)]
struct DataRecord {
    offset: u64,
    pos: Pos,
    words: Vec<String>,
    pointers: Vec<Pointer>,
}

#[derive(Debug)]
struct Pointer {
    symbol: String,
    offset: u64,
    pos: Pos,
    source: usize,
    target: usize,
}

/// WordNet database in the Princeton dictionary file format
/// (`index.*`, `data.*` and `*.exc` files in one directory).
///
/// Index and exception lists are held in memory, synsets are read from the
/// data files on demand by byte offset.
pub struct WordNet {
    dir: PathBuf,
    index: HashMap<Pos, HashMap<String, Vec<u64>>>,
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl WordNet {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(LexiconError::NotFound(dir.display().to_string()));
        }

        let mut index = HashMap::new();
        let mut exceptions = HashMap::new();

        for pos in Pos::ALL {
            let data_path = dir.join(format!("data.{}", pos.file_suffix()));
            if !data_path.is_file() {
                return Err(LexiconError::NotFound(data_path.display().to_string()));
            }

            let index_path = dir.join(format!("index.{}", pos.file_suffix()));
            index.insert(pos, read_index(&index_path)?);

            let exc_path = dir.join(format!("{}.exc", pos.file_suffix()));
            if exc_path.is_file() {
                exceptions.insert(pos, read_exceptions(&exc_path)?);
            } else {
                tracing::debug!("No exception list at {}", exc_path.display());
            }
        }

        let lemma_count: usize = index.values().map(HashMap::len).sum();
        tracing::info!("Opened WordNet at {} ({} index entries)", dir.display(), lemma_count);

        Ok(Self {
            dir,
            index,
            exceptions,
        })
    }

    fn offsets(&self, lemma: &str, pos: Pos) -> &[u64] {
        self.index
            .get(&pos)
            .and_then(|entries| entries.get(lemma))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn is_indexed(&self, lemma: &str, pos: Pos) -> bool {
        !self.offsets(lemma, pos).is_empty()
    }

    fn data_path(&self, pos: Pos) -> PathBuf {
        self.dir.join(format!("data.{}", pos.file_suffix()))
    }

    fn read_record(&self, pos: Pos, offset: u64) -> Result<DataRecord, LexiconError> {
        let path = self.data_path(pos);
        let mut reader = BufReader::new(File::open(&path)?);
        reader.seek(SeekFrom::Start(offset))?;

        let mut line = String::new();
        reader.read_line(&mut line)?;

        parse_data_line(&line).map_err(|reason| LexiconError::InvalidFormat {
            file: path.display().to_string(),
            reason: format!("offset {offset}: {reason}"),
        })
    }

    fn to_synset(&self, record: &DataRecord) -> Result<Synset, LexiconError> {
        let mut lemmas: Vec<Lemma> = record.words.iter().map(Lemma::new).collect();

        for pointer in &record.pointers {
            // Lexical antonyms only; semantic pointers (source 0) relate whole synsets
            if pointer.symbol != "!" || pointer.source == 0 || pointer.target == 0 {
                continue;
            }
            let Some(lemma) = lemmas.get_mut(pointer.source - 1) else {
                continue;
            };

            let target = self.read_record(pointer.pos, pointer.offset)?;
            if let Some(word) = target.words.get(pointer.target - 1) {
                lemma.antonyms.push(word.clone());
            }
        }

        Ok(Synset {
            id: format!("{:08}-{}", record.offset, record.pos.tag()),
            lemmas,
        })
    }
}

impl LexicalDatabase for WordNet {
    fn synsets(&self, word: &str) -> Result<Vec<Synset>, LexiconError> {
        let word = word.trim().to_lowercase().replace(' ', "_");
        if word.is_empty() {
            return Ok(Vec::new());
        }

        let mut synsets = Vec::new();
        let mut seen: Vec<(Pos, u64)> = Vec::new();

        for pos in Pos::ALL {
            let forms = morphy::base_forms(&word, pos, self.exceptions.get(&pos), |form| {
                self.is_indexed(form, pos)
            });

            for form in forms {
                for &offset in self.offsets(&form, pos) {
                    if seen.contains(&(pos, offset)) {
                        continue;
                    }
                    seen.push((pos, offset));

                    let record = self.read_record(pos, offset)?;
                    synsets.push(self.to_synset(&record)?);
                }
            }
        }

        tracing::trace!("WordNet: '{}' -> {} synsets", word, synsets.len());
        Ok(synsets)
    }

    fn name(&self) -> &str {
        "WordNet"
    }
}

fn is_license_line(line: &str) -> bool {
    line.starts_with(' ')
}

fn read_index(path: &Path) -> Result<HashMap<String, Vec<u64>>, LexiconError> {
    if !path.is_file() {
        return Err(LexiconError::NotFound(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut entries = HashMap::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if is_license_line(&line) || line.trim().is_empty() {
            continue;
        }

        let (lemma, offsets) = parse_index_line(&line).map_err(|reason| {
            LexiconError::InvalidFormat {
                file: path.display().to_string(),
                reason: format!("line {}: {reason}", number + 1),
            }
        })?;
        entries.insert(lemma, offsets);
    }

    Ok(entries)
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt offset...`
fn parse_index_line(line: &str) -> Result<(String, Vec<u64>), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 6 {
        return Err("too few fields".to_string());
    }

    let synset_count: usize = fields[2]
        .parse()
        .map_err(|_| format!("bad synset count '{}'", fields[2]))?;
    let pointer_count: usize = fields[3]
        .parse()
        .map_err(|_| format!("bad pointer count '{}'", fields[3]))?;

    let start = 4 + pointer_count + 2;
    let offsets = fields
        .get(start..start + synset_count)
        .ok_or_else(|| "missing synset offsets".to_string())?
        .iter()
        .map(|field| {
            field
                .parse::<u64>()
                .map_err(|_| format!("bad offset '{field}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((fields[0].to_string(), offsets))
}

fn read_exceptions(path: &Path) -> Result<HashMap<String, Vec<String>>, LexiconError> {
    let reader = BufReader::new(File::open(path)?);
    let mut exceptions = HashMap::new();

    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(inflected) = fields.next() else {
            continue;
        };
        let bases: Vec<String> = fields.map(str::to_string).collect();
        if !bases.is_empty() {
            exceptions.insert(inflected.to_string(), bases);
        }
    }

    Ok(exceptions)
}

/// `offset lex_filenum ss_type w_cnt [word lex_id]... p_cnt [ptr]... | gloss`
fn parse_data_line(line: &str) -> Result<DataRecord, String> {
    let head = line.split('|').next().unwrap_or_default();
    let fields: Vec<&str> = head.split_whitespace().collect();
    if fields.len() < 5 {
        return Err("too few fields".to_string());
    }

    let offset: u64 = fields[0]
        .parse()
        .map_err(|_| format!("bad offset '{}'", fields[0]))?;
    let pos = Pos::from_tag(fields[2]).ok_or_else(|| format!("bad synset type '{}'", fields[2]))?;
    let word_count = usize::from_str_radix(fields[3], 16)
        .map_err(|_| format!("bad word count '{}'", fields[3]))?;

    let words_end = 4 + word_count * 2;
    let words = fields
        .get(4..words_end)
        .ok_or_else(|| "missing words".to_string())?
        .chunks(2)
        .map(|pair| strip_marker(pair[0]).to_string())
        .collect();

    let pointer_count: usize = fields
        .get(words_end)
        .ok_or_else(|| "missing pointer count".to_string())?
        .parse()
        .map_err(|_| "bad pointer count".to_string())?;

    let pointers_start = words_end + 1;
    let pointers = fields
        .get(pointers_start..pointers_start + pointer_count * 4)
        .ok_or_else(|| "missing pointers".to_string())?
        .chunks(4)
        .map(parse_pointer)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DataRecord {
        offset,
        pos,
        words,
        pointers,
    })
}

fn parse_pointer(fields: &[&str]) -> Result<Pointer, String> {
    let offset = fields[1]
        .parse()
        .map_err(|_| format!("bad pointer offset '{}'", fields[1]))?;
    let pos = Pos::from_tag(fields[2]).ok_or_else(|| format!("bad pointer pos '{}'", fields[2]))?;

    let source_target = fields[3];
    let (source, target) = match (source_target.get(..2), source_target.get(2..)) {
        (Some(source), Some(target)) if source_target.len() == 4 => (source, target),
        _ => return Err(format!("bad source/target '{source_target}'")),
    };
    let source =
        usize::from_str_radix(source, 16).map_err(|_| format!("bad source '{source_target}'"))?;
    let target =
        usize::from_str_radix(target, 16).map_err(|_| format!("bad target '{source_target}'"))?;

    Ok(Pointer {
        symbol: fields[0].to_string(),
        offset,
        pos,
        source,
        target,
    })
}

/// Drop adjective position markers such as `(p)`, `(a)` and `(ip)`
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}
