use anyhow::Context;
use arboard::Clipboard;

/// Current clipboard text, `None` when the clipboard holds no text
pub fn read_text() -> Result<Option<String>, anyhow::Error> {
    let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;
    match clipboard.get_text() {
        Ok(text) => Ok(non_blank(text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e).context("Failed to read clipboard"),
    }
}

pub fn copy_text(text: &str) -> Result<(), anyhow::Error> {
    if text.trim().is_empty() {
        tracing::debug!("Nothing to copy");
        return Ok(());
    }

    let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write clipboard")?;

    tracing::info!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_clipboard_counts_as_empty() {
        assert_eq!(non_blank(String::new()), None);
        assert_eq!(non_blank(" \n\t".to_string()), None);
        assert_eq!(non_blank(" hola ".to_string()), Some(" hola ".to_string()));
    }

    #[test]
    fn copying_blank_text_is_a_no_op() {
        assert!(copy_text("   ").is_ok());
    }
}
