// Prompt templates for the two supported languages.

/// Language of the text being checked.
///
/// Sorani Kurdish is the primary language of the app; English is the
/// secondary one and also the fallback for any unrecognised tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Sorani,
    English,
}

impl Language {
    /// Resolve a wire tag. Only "ku"/"primary" select Sorani; anything else,
    /// including an absent tag, is English.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("ku") | Some("primary") => Language::Sorani,
            _ => Language::English,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::Sorani => "ku",
            Language::English => "en",
        }
    }

    fn assistant_role(self) -> &'static str {
        match self {
            Language::Sorani => "You are a Kurdish Sorani grammar assistant.",
            Language::English => "You are an English grammar assistant.",
        }
    }
}

const INSTRUCTIONS: &str = r#"1. Detect wrong words.
2. Provide full corrected text.

Return ONLY a single JSON object, with no explanation and no markdown fences:
{
  "wrong": ["word1","word2"],
  "corrected": "full corrected text"
}"#;

/// Build the checking prompt. The user's text is embedded verbatim.
pub fn build_prompt(language: Language, text: &str) -> String {
    format!(
        "{role}\n\n{INSTRUCTIONS}\n\nText:\n\"{text}\"\n",
        role = language.assistant_role(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag(Some("ku")), Language::Sorani);
        assert_eq!(Language::from_tag(Some("primary")), Language::Sorani);
        assert_eq!(Language::from_tag(Some("en")), Language::English);
        assert_eq!(Language::from_tag(Some("fr")), Language::English);
        assert_eq!(Language::from_tag(None), Language::English);
        assert_eq!(Language::from_tag(Some(" ku ")), Language::Sorani);
        assert_eq!(Language::from_tag(Some("secondary")), Language::English);
    }

    #[test]
    fn test_tag_round_trips_through_from_tag() {
        for language in [Language::Sorani, Language::English] {
            assert_eq!(Language::from_tag(Some(language.tag())), language);
        }
    }

    #[test]
    fn test_prompt_selects_template_by_language() {
        let ku = build_prompt(Language::Sorani, "text");
        let en = build_prompt(Language::English, "text");
        assert!(ku.starts_with("You are a Kurdish Sorani grammar assistant."));
        assert!(en.starts_with("You are an English grammar assistant."));
    }

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let text = "ئەمە \"تاقیکردنەوە\" یە {x}";
        let prompt = build_prompt(Language::Sorani, text);
        assert!(prompt.contains(text));
        assert!(prompt.contains(r#""wrong""#));
        assert!(prompt.contains(r#""corrected""#));
    }
}
