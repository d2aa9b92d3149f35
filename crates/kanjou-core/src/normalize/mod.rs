//! # Tweet Normalizer
//!
//! Rewrites raw tweet text into a lowercase, space-tokenizable form:
//! URLs, mentions, emoticons, hearts, and numbers become placeholder
//! tokens; hashtags are segmented; repeated punctuation and elongated
//! words are collapsed behind marker tokens.
//!
//! The substitutions are an ordered chain — later rules operate on
//! earlier output and never re-trigger an earlier rule. The chain is held
//! as an explicit rule list so the ordering contract stays testable.

mod rules;

pub use rules::Rule;

use crate::error::Result;

/// Ordered normalization chain over raw tweet text.
///
/// # Examples
/// ```
/// use kanjou_core::Normalizer;
///
/// let normalizer = Normalizer::new().unwrap();
/// let text = normalizer.normalize("@jo check https://ex.am/ple #ILoveYou :)");
/// assert_eq!(text, "<user> check <url> <hashtag>  i love you <smile>");
/// ```
pub struct Normalizer {
    rules: Vec<Rule>,
}

impl Normalizer {
    /// Constructs the normalizer with its pre-compiled rule chain.
    ///
    /// # Errors
    ///
    /// Returns `KanjouError::Regex` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: rules::build_rules()?,
        })
    }

    /// Normalizes `text` by folding it through the rule chain and
    /// lowercasing the result.
    ///
    /// Never fails: input that matches nothing passes through unchanged
    /// to the lowercase pass.
    pub fn normalize(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
            .to_lowercase()
    }

    /// The rules in application order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new().unwrap()
    }

    fn tokens(text: &str) -> Vec<String> {
        normalizer()
            .normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn rule_chain_is_exposed_in_application_order() {
        let n = normalizer();
        let names: Vec<_> = n.rules().iter().map(Rule::name).collect();
        assert_eq!(names.len(), 13);
        assert_eq!(names.first(), Some(&"url"));
        assert_eq!(names.last(), Some(&"allcaps"));
        // The isolated-slash rule must not run before the emoticon rules.
        let slash = names.iter().position(|n| *n == "slash").unwrap();
        let neutral = names.iter().position(|n| *n == "neutralface").unwrap();
        assert!(neutral < slash);
    }

    #[test]
    fn urls_become_placeholders() {
        let n = normalizer();
        let out = n.normalize("read this https://t.co/abc123 and www.example.com/x");
        assert!(!out.contains("t.co"));
        assert!(!out.contains("example"));
        assert_eq!(tokens("go to https://t.co/abc now"), ["go", "to", "<url>", "now"]);
    }

    #[test]
    fn mentions_become_placeholders() {
        assert_eq!(normalizer().normalize("hey @some_user_1"), "hey <user>");
        assert!(!normalizer().normalize("cc @a @b2c").contains('@'));
    }

    #[test]
    fn digits_never_survive() {
        for input in ["call me at 555,123.45", "-3.14 is negative", "10:30 sharp"] {
            let out = normalizer().normalize(input);
            assert!(
                !out.chars().any(|c| c.is_ascii_digit()),
                "digits survived in {out:?}"
            );
        }
    }

    #[test]
    fn emoticon_classes() {
        assert_eq!(tokens("happy :)"), ["happy", "<smile>"]);
        assert_eq!(tokens("funny :p"), ["funny", "<lolface>"]);
        assert_eq!(tokens("gutted :("), ["gutted", "<sadface>"]);
        assert_eq!(tokens("meh :|"), ["meh", "<neutralface>"]);
        // Reversed orientation with a nose
        assert_eq!(tokens("ok d-:"), ["ok", "<smile>"]);
    }

    #[test]
    fn heart_survives_the_number_rule() {
        assert_eq!(tokens("love you <3"), ["love", "you", "<heart>"]);
    }

    #[test]
    fn slashes_are_isolated() {
        assert_eq!(tokens("either/or"), ["either", "/", "or"]);
    }

    #[test]
    fn camel_case_hashtag_is_segmented() {
        assert_eq!(
            tokens("#ILoveYou"),
            ["<hashtag>", "i", "love", "you"]
        );
    }

    #[test]
    fn all_uppercase_hashtag_has_no_marker() {
        let out = normalizer().normalize("so #ALLCAPS here");
        assert_eq!(out, "so  allcaps  here");
        assert!(!out.contains("<hashtag>"));
    }

    #[test]
    fn lowercase_hashtag_is_a_single_token() {
        assert_eq!(tokens("#blessed"), ["<hashtag>", "blessed"]);
    }

    #[test]
    fn repeated_punctuation_per_run() {
        assert_eq!(normalizer().normalize("what??!"), "what? <repeat>!");
        assert_eq!(
            normalizer().normalize("no way!!! really???"),
            "no way! <repeat> really? <repeat>"
        );
    }

    #[test]
    fn elongation_before_lowercasing() {
        assert_eq!(normalizer().normalize("soooo"), "soo <elong>");
        assert_eq!(tokens("YESSS"), ["yess", "<allcaps>", "<elong>"]);
    }

    #[test]
    fn uppercase_runs_get_allcaps_marker() {
        assert_eq!(tokens("I am SO ANGRY"), ["i", "am", "so", "<allcaps>", "angry", "<allcaps>"]);
    }

    #[test]
    fn single_uppercase_letters_are_just_lowercased() {
        assert_eq!(tokens("I am Angry"), ["i", "am", "angry"]);
    }

    #[test]
    fn empty_and_plain_input_pass_through() {
        assert_eq!(normalizer().normalize(""), "");
        assert_eq!(normalizer().normalize("plain words here"), "plain words here");
    }

    #[test]
    fn renormalization_is_token_stable() {
        let n = normalizer();
        for input in [
            "@user OMG #ILoveYou soooo much!!! https://t.co/x :) <3 5/10",
            "plain text",
            "#ALLCAPS and :(",
        ] {
            let once = n.normalize(input);
            let twice = n.normalize(&once);
            let t1: Vec<&str> = once.split_whitespace().collect();
            let t2: Vec<&str> = twice.split_whitespace().collect();
            assert_eq!(t1, t2, "tokens drifted for {input:?}");
        }
    }
}
