//! User-facing reply texts.

pub const DEFAULT_TRIGGER: &str = "📄 Передати слова";

pub const GREETING: &str = "Вітаю! Надсилайте слова англійською мовою. \
     Я їх збиратиму, а потім створю PDF з перекладом та транскрипцією.";

pub const NOTHING_TO_EXPORT: &str = "Немає слів для передавання.";

pub const DOCUMENT_CAPTION: &str = "Ось ваш PDF зі словами, транскрипцією та перекладами!";

pub const DOCUMENT_FILE_NAME: &str = "vocabulary.pdf";

pub fn word_added(word: &str, pronunciation: Option<&str>) -> String {
    match pronunciation {
        Some(pron) => format!("Додано слово: {word}\nТранскрипція: {pron}"),
        None => format!("Додано слово: {word}"),
    }
}

pub fn export_failed(error: &anyhow::Error) -> String {
    format!("Виникла помилка при створенні PDF: {error:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_added_with_pronunciation() {
        assert_eq!(
            word_added("cat", Some("/kæt/")),
            "Додано слово: cat\nТранскрипція: /kæt/"
        );
    }

    #[test]
    fn test_word_added_without_pronunciation() {
        assert_eq!(word_added("qwzx", None), "Додано слово: qwzx");
    }

    #[test]
    fn test_export_failed_includes_cause_chain() {
        let error = anyhow::anyhow!("status 500").context("Translation request failed");
        let text = export_failed(&error);
        assert!(text.contains("Translation request failed"));
        assert!(text.contains("status 500"));
    }
}
