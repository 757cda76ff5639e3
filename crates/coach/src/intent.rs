//! Telling side questions apart from questionnaire answers.

const QUESTION_WORDS: &[&str] = &[
    "how", "what", "why", "when", "where", "who", "can", "could", "should",
];

/// Whether the learner asked something instead of answering.
///
/// True when the text ends with `?` or its first word is a question word.
/// Only the whole first word counts, so "Candles" or "However" are answers.
/// The Streamlit app matched question words as a plain string prefix, which
/// sent such answers down the side-question path.
pub fn looks_like_question(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() {
        return false;
    }
    if t.ends_with('?') {
        return true;
    }

    t.split_whitespace()
        .next()
        .map(|w| {
            w.trim_end_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .is_some_and(|w| QUESTION_WORDS.contains(&w.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_question_mark() {
        assert!(looks_like_question("I want to sell shoes, is that ok?"));
        assert!(looks_like_question("  pricing?  "));
    }

    #[test]
    fn leading_question_word() {
        assert!(looks_like_question("How do I find customers"));
        assert!(looks_like_question("what is a market survey"));
        assert!(looks_like_question("Should, I rent a shop"));
    }

    #[test]
    fn answers_are_not_questions() {
        assert!(!looks_like_question("I am a trained tailor with 5 years experience"));
        assert!(!looks_like_question("Candles and soap for local shops"));
        assert!(!looks_like_question("However I also cook"));
        assert!(!looks_like_question("Whoever passes by the market"));
    }

    #[test]
    fn blank_is_not_a_question() {
        assert!(!looks_like_question(""));
        assert!(!looks_like_question("   "));
    }
}
