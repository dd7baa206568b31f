pub trait Preprocessor {
    // Default cleanup for OCR and PDF output
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Page breaks from PDF extraction become plain line breaks
        text.replace("\r\n", "\n")
            .replace(['\r', '\u{000C}'], "\n")
            .trim()
            .to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
