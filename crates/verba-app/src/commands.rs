use std::path::PathBuf;

use verba_types::{AppEvent, Engine, Language, ParseError, SessionCommand, TextSource};

pub const HELP: &str = "\
Type text to translate it, or a command:
  :from LANG              set the source language
  :to LANG                set the target language
  :engine ENGINE          google, duckduckgo, yandex or deepl
  :swap                   swap source and target
  :file PATH              extract text from an image or PDF and translate it
  :clipboard              translate the clipboard contents
  :copy                   copy the last result to the clipboard
  :thesaurus WORD         thesaurus entry in the target language
  :thesaurus-langs L1,L2  languages whose single-word results get a thesaurus entry
  :settings               show the current selection
  :help                   show this help
  :quit                   exit
  ::TEXT                  translate text that starts with ':'";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: :{0} (try :help)")]
    Unknown(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Turn one line of interactive input into an event.
///
/// Lines starting with `:` are commands; anything else is text to translate.
/// A leading `::` escapes a literal `:`. Blank lines produce nothing.
pub fn parse_line(line: &str) -> Result<Option<AppEvent>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.starts_with("::") {
        return Ok(Some(AppEvent::TextInput {
            text: line.replacen("::", ":", 1),
            source: TextSource::Manual,
        }));
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return Ok(Some(AppEvent::TextInput {
            text: line.to_string(),
            source: TextSource::Manual,
        }));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let command = match name {
        "from" => SessionCommand::SetSource(required(arg, "from")?.parse()?),
        "to" => SessionCommand::SetTarget(required(arg, "to")?.parse()?),
        "engine" => SessionCommand::SetEngine(required(arg, "engine")?.parse::<Engine>()?),
        "swap" => SessionCommand::SwapLanguages,
        "file" => SessionCommand::ExtractFile(PathBuf::from(required(arg, "file")?)),
        "clipboard" => SessionCommand::TranslateClipboard,
        "copy" => SessionCommand::CopyResult,
        "thesaurus" => SessionCommand::Thesaurus(required(arg, "thesaurus")?.to_string()),
        "thesaurus-langs" => SessionCommand::SetThesaurusLanguages(parse_languages(arg)?),
        "settings" => SessionCommand::ShowSettings,
        "help" | "h" => SessionCommand::Help,
        "quit" | "q" | "exit" => return Ok(Some(AppEvent::Quit)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(AppEvent::Command(command)))
}

fn required<'a>(arg: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(arg)
    }
}

/// Comma or space separated list; empty disables the thesaurus everywhere
fn parse_languages(arg: &str) -> Result<Vec<Language>, ParseError> {
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> SessionCommand {
        match parse_line(line) {
            Ok(Some(AppEvent::Command(command))) => command,
            other => panic!("expected a command for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_translated_as_typed() {
        match parse_line("  Good morning, world ").unwrap() {
            Some(AppEvent::TextInput { text, source }) => {
                assert_eq!(text, "  Good morning, world ");
                assert_eq!(source, TextSource::Manual);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn double_colon_sends_literal_colon_text() {
        for (line, expected) in [
            ("::) smiley", ":) smiley"),
            (" ::from here", " :from here"),
            ("::", ":"),
        ] {
            match parse_line(line).unwrap() {
                Some(AppEvent::TextInput { text, source }) => {
                    assert_eq!(text, expected);
                    assert_eq!(source, TextSource::Manual);
                }
                other => panic!("unexpected for {line:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   \t").unwrap().is_none());
    }

    #[test]
    fn language_and_engine_commands() {
        assert_eq!(command(":from fr"), SessionCommand::SetSource(Language::French));
        assert_eq!(command(":to  German "), SessionCommand::SetTarget(Language::German));
        assert_eq!(command(":engine deepl"), SessionCommand::SetEngine(Engine::DeepL));
        assert_eq!(command(":swap"), SessionCommand::SwapLanguages);
    }

    #[test]
    fn file_path_keeps_spaces() {
        assert_eq!(
            command(":file /tmp/my scans/page 1.png"),
            SessionCommand::ExtractFile(PathBuf::from("/tmp/my scans/page 1.png"))
        );
    }

    #[test]
    fn thesaurus_languages_replace_the_set() {
        assert_eq!(
            command(":thesaurus-langs english, spanish,it"),
            SessionCommand::SetThesaurusLanguages(vec![
                Language::English,
                Language::Spanish,
                Language::Italian
            ])
        );
        assert_eq!(
            command(":thesaurus-langs"),
            SessionCommand::SetThesaurusLanguages(Vec::new())
        );
    }

    #[test]
    fn quit_aliases() {
        for line in [":quit", ":q", ":exit"] {
            assert!(matches!(parse_line(line), Ok(Some(AppEvent::Quit))));
        }
    }

    #[test]
    fn errors() {
        assert_eq!(
            parse_line(":frobnicate").unwrap_err().to_string(),
            "Unknown command: :frobnicate (try :help)"
        );
        assert_eq!(parse_line(":to").unwrap_err(), CommandError::MissingArgument("to"));
        assert_eq!(
            parse_line(":from klingon").unwrap_err().to_string(),
            "Unknown language: klingon"
        );
        assert_eq!(
            parse_line(":thesaurus-langs english,elvish").unwrap_err().to_string(),
            "Unknown language: elvish"
        );
        assert_eq!(
            parse_line(":engine bing").unwrap_err().to_string(),
            "Unknown engine: bing"
        );
    }
}
