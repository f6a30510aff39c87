/// Classified inbound text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `/start`, with or without a payload or `@botname` suffix.
    Start,
    /// Any other slash command; ignored by the bot.
    Command(String),
    /// Free text, passed through untouched (trigger matching is exact).
    Text(String),
}

pub fn classify(text: &str) -> Inbound {
    let Some(command) = text.strip_prefix('/') else {
        return Inbound::Text(text.to_string());
    };

    let name = command
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .split('@')
        .next()
        .unwrap_or_default();

    if name == "start" {
        Inbound::Start
    } else {
        Inbound::Command(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_start() {
        assert_eq!(classify("/start"), Inbound::Start);
        assert_eq!(classify("/start ref42"), Inbound::Start);
        assert_eq!(classify("/start@VocabBot"), Inbound::Start);
    }

    #[test]
    fn test_classify_other_commands() {
        assert_eq!(classify("/help"), Inbound::Command("help".to_string()));
        assert_eq!(classify("/"), Inbound::Command(String::new()));
    }

    #[test]
    fn test_classify_text_is_untouched() {
        assert_eq!(classify("  cat "), Inbound::Text("  cat ".to_string()));
        assert_eq!(
            classify("📄 Передати слова"),
            Inbound::Text("📄 Передати слова".to_string())
        );
    }
}
