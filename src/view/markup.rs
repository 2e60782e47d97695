//! Text markup collaborators for description and buff strings

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub trait TextMarkup {
    fn mark_up(&self, raw: &str) -> String;
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl TextMarkup for PlainText {
    fn mark_up(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Keyword phrases and the CSS class each one is wrapped in
pub const KEYWORD_CLASSES: &[(&str, &str)] = &[
    ("Physical ATK", "Physical-ATK"),
    ("Magic PWR", "Magic-PWR"),
    ("Physical DEF", "Physical-DEF"),
    ("Magic DEF", "Magic-DEF"),
    ("Physical DMG", "Physical-DMG"),
    ("Magic DMG", "Magic-DMG"),
    ("Quantum DMG", "Quantum-DMG"),
    ("Fusion DMG", "Fusion-DMG"),
    ("Destruction DMG", "Destruction-DMG"),
    ("Artificial DMG", "Artificial-DMG"),
    ("Sharp DMG", "Sharp-DMG"),
    ("Flame DMG", "Flame-DMG"),
    ("Frost DMG", "Frost-DMG"),
    ("Volte DMG", "Volte-DMG"),
    ("Tide DMG", "Tide-DMG"),
    ("Gale DMG", "Gale-DMG"),
    ("Special Active Skill", "Special-Active-Skill"),
];

/// HTML highlighter: escapes the input, wraps keyword phrases and numbers
/// (with optional decimals and `%`) in spans, turns newlines into `<br>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHighlighter;

impl KeywordHighlighter {
    fn keyword_pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            let alternation = KEYWORD_CLASSES
                .iter()
                .map(|(phrase, _)| regex::escape(phrase))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!("({})", alternation)).expect("valid keyword regex")
        })
    }

    fn number_pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?%?").expect("valid number regex"))
    }

    fn class_for(phrase: &str) -> &'static str {
        KEYWORD_CLASSES
            .iter()
            .find(|(p, _)| *p == phrase)
            .map(|(_, class)| *class)
            .unwrap_or("keyword")
    }
}

impl TextMarkup for KeywordHighlighter {
    fn mark_up(&self, raw: &str) -> String {
        let escaped = escape_html(raw);

        // Numbers first: class names and escapes below contain no digits
        let numbered = Self::number_pattern()
            .replace_all(&escaped, r#"<span class="highlight-number">$0</span>"#);

        let keyworded = Self::keyword_pattern().replace_all(&numbered, |caps: &Captures| {
            format!(
                r#"<span class="{}">{}</span>"#,
                Self::class_for(&caps[1]),
                &caps[1]
            )
        });

        keyworded.replace("\r\n", "<br>").replace('\n', "<br>")
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_identity() {
        assert_eq!(PlainText.mark_up("Deals 20% <b>"), "Deals 20% <b>");
    }

    #[test]
    fn test_keywords_and_numbers() {
        let out = KeywordHighlighter.mark_up("Deals 120% Flame DMG");
        assert_eq!(
            out,
            r#"Deals <span class="highlight-number">120%</span> <span class="Flame-DMG">Flame DMG</span>"#
        );
    }

    #[test]
    fn test_decimals_and_newlines() {
        let out = KeywordHighlighter.mark_up("Heals 2.5\nthen rests");
        assert_eq!(
            out,
            r#"Heals <span class="highlight-number">2.5</span><br>then rests"#
        );
    }

    #[test]
    fn test_escapes_markup() {
        let out = KeywordHighlighter.mark_up("<script>");
        assert_eq!(out, "&lt;script&gt;");
    }

    #[test]
    fn test_every_keyword_has_a_class() {
        for (phrase, class) in KEYWORD_CLASSES {
            let out = KeywordHighlighter.mark_up(phrase);
            assert_eq!(out, format!(r#"<span class="{}">{}</span>"#, class, phrase));
        }
    }
}
