//! The individual substitution rules of the normalization chain.
//!
//! Each rule is either a regex substitution or a character-level scan.
//! The chain owner (`Normalizer`) applies them in a fixed order; a rule
//! only ever sees the output of the rules before it.

use regex::{Captures, Regex};

use crate::error::Result;

/// Character class for emoticon eyes.
const EYES: &str = "[8:=;]";
/// Optional emoticon nose.
const NOSE: &str = r"['`\-]?";

type ReplFn = fn(&Captures) -> String;

enum Step {
    /// Regex substitution over the whole string.
    Sub { pattern: Regex, repl: Repl },
    /// Collapse elongated character runs (`soooo` -> `soo <elong>`).
    /// A scan step because the `regex` crate has no backreferences.
    CollapseElongated,
}

enum Repl {
    Text(&'static str),
    With(ReplFn),
}

/// A single named rule in the normalization chain.
pub struct Rule {
    name: &'static str,
    step: Step,
}

impl Rule {
    fn sub(name: &'static str, pattern: &str, repl: &'static str) -> Result<Self> {
        Ok(Self {
            name,
            step: Step::Sub {
                pattern: Regex::new(pattern)?,
                repl: Repl::Text(repl),
            },
        })
    }

    fn sub_with(name: &'static str, pattern: &str, repl: ReplFn) -> Result<Self> {
        Ok(Self {
            name,
            step: Step::Sub {
                pattern: Regex::new(pattern)?,
                repl: Repl::With(repl),
            },
        })
    }

    /// The rule's stable name, usable for targeted testing.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies this rule to `text`, returning the rewritten string.
    pub fn apply(&self, text: &str) -> String {
        match &self.step {
            Step::Sub { pattern, repl } => match repl {
                Repl::Text(t) => pattern.replace_all(text, *t).into_owned(),
                Repl::With(f) => pattern.replace_all(text, *f).into_owned(),
            },
            Step::CollapseElongated => collapse_elongated(text),
        }
    }
}

/// Builds the full rule chain in its contractual order.
///
/// The order is load-bearing: slashes are isolated only after the emoticon
/// rules so `:/` still reads as a neutral face, hearts are rewritten before
/// the number rule can eat the `3`, and the hashtag splitter runs before
/// the allcaps rule so an all-uppercase hashtag body never grows a marker.
pub fn build_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::sub("url", r"https?://\S+\b|www\.(\w+\.)+\S*", "<url>")?,
        Rule::sub("user", r"@\w+", "<user>")?,
        Rule::sub(
            "smile",
            &format!(r"{EYES}{NOSE}[)dD]+|[)dD]+{NOSE}{EYES}"),
            "<smile>",
        )?,
        Rule::sub("lolface", &format!(r"{EYES}{NOSE}p+"), "<lolface>")?,
        Rule::sub(
            "sadface",
            &format!(r"{EYES}{NOSE}\(+|\)+{NOSE}{EYES}"),
            "<sadface>",
        )?,
        Rule::sub(
            "neutralface",
            &format!(r"{EYES}{NOSE}[/|l*]"),
            "<neutralface>",
        )?,
        Rule::sub("slash", "/", " / ")?,
        Rule::sub("heart", "<3", "<heart>")?,
        Rule::sub("number", r"[-+]?[.\d]*[\d]+[:,.\d]*", "<number>")?,
        Rule::sub_with("hashtag", r"#\S+", hashtag)?,
        Rule::sub_with("repeat", r"!{2,}|\?{2,}|\.{2,}", punct_repeat)?,
        Rule {
            name: "elong",
            step: Step::CollapseElongated,
        },
        Rule::sub_with("allcaps", r"[A-Z]{2,}", allcaps)?,
    ])
}

/// Hashtag rewrite: an all-uppercase body is lowercased and space-bounded
/// with no marker; anything else is camel-case segmented behind `<hashtag>`.
fn hashtag(caps: &Captures) -> String {
    let body = &caps[0][1..];
    if is_all_uppercase(body) {
        format!(" {} ", body.to_lowercase())
    } else {
        let mut parts = vec!["<hashtag>".to_string()];
        parts.extend(camel_segments(body));
        parts.join(" ")
    }
}

/// Punctuation-run rewrite: each run of 2+ identical `!`, `?`, or `.`
/// collapses to one occurrence plus the marker. Runs of distinct
/// punctuation are handled independently.
fn punct_repeat(caps: &Captures) -> String {
    match caps[0].chars().next() {
        Some(c) => format!("{c} <repeat>"),
        None => String::new(),
    }
}

/// Uppercase-run rewrite: lowercase the run and append the marker.
fn allcaps(caps: &Captures) -> String {
    format!("{} <allcaps>", caps[0].to_lowercase())
}

/// True if `s` has at least one cased character and no lowercase ones.
fn is_all_uppercase(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Splits a hashtag body before every uppercase letter. A body that starts
/// uppercase yields a leading empty segment, which collapses harmlessly at
/// whitespace tokenization. A body with no uppercase letters comes back as
/// a single segment.
fn camel_segments(body: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for c in body.chars() {
        if c.is_uppercase() {
            segments.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    segments.push(current);
    segments
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Collapses runs of 3+ identical word characters that end at a word
/// boundary down to two occurrences plus an ` <elong>` marker.
fn collapse_elongated(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut j = i + 1;
        while j < chars.len() && chars[j] == c {
            j += 1;
        }
        let run = j - i;
        let ends_word = j >= chars.len() || !is_word_char(chars[j]);
        if run >= 3 && is_word_char(c) && ends_word {
            out.push(c);
            out.push(c);
            out.push_str(" <elong>");
        } else {
            for _ in 0..run {
                out.push(c);
            }
        }
        i = j;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_uppercase_detection() {
        assert!(is_all_uppercase("ALLCAPS"));
        assert!(is_all_uppercase("AB1"));
        assert!(!is_all_uppercase("ILoveYou"));
        assert!(!is_all_uppercase("2018"));
        assert!(!is_all_uppercase(""));
    }

    #[test]
    fn camel_segmentation() {
        assert_eq!(
            camel_segments("ILoveYou"),
            vec!["", "I", "Love", "You"]
        );
        assert_eq!(camel_segments("hello"), vec!["hello"]);
        assert_eq!(camel_segments("noMore"), vec!["no", "More"]);
    }

    #[test]
    fn elongation_collapses_word_final_runs() {
        assert_eq!(collapse_elongated("soooo"), "soo <elong>");
        assert_eq!(collapse_elongated("yayyy!"), "yayy <elong>!");
        assert_eq!(collapse_elongated("so good"), "so good");
    }

    #[test]
    fn elongation_ignores_mid_word_runs() {
        // The run must abut a word boundary, as in the chain's contract.
        assert_eq!(collapse_elongated("sooook"), "sooook");
    }

    #[test]
    fn rule_names_are_stable() {
        let rules = build_rules().unwrap();
        let names: Vec<_> = rules.iter().map(Rule::name).collect();
        assert_eq!(
            names,
            vec![
                "url", "user", "smile", "lolface", "sadface", "neutralface",
                "slash", "heart", "number", "hashtag", "repeat", "elong",
                "allcaps",
            ]
        );
    }
}
