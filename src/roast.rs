use rand::Rng;

/// The canned roast pool. Selection is uniform per sentence chunk.
pub const ROASTS: &[&str] = &[
    "Wow, what an achievement. Truly inspirational.",
    "That was a brave paragraph... for a 3-year-old.",
    "You're writing like you're getting paid in yawns.",
    "Plot twist: your diary roasted itself.",
    "This made my eyes roll into next week.",
    "Spicy? No. Lukewarm tea at best.",
    "Congratulations. You wasted pixels.",
    "This diary entry should come with a snooze button.",
    "If I had a rupee for every bad sentence...",
    "That was deep… like a puddle.",
    "This belongs in the Museum of Mediocrity.",
    "Even autocorrect gave up halfway.",
    "Your words are like WiFi in a train — weak and unstable.",
];

/// Where roast picks come from. Injectable so tests can supply a
/// deterministic sequence instead of thread-local randomness.
pub trait RoastSource: Send {
    fn pick(&mut self, roasts: &[&'static str]) -> &'static str;
}

/// Default source: uniform draw from the pool.
pub struct RandomRoasts;

impl RoastSource for RandomRoasts {
    fn pick(&mut self, roasts: &[&'static str]) -> &'static str {
        roasts[rand::thread_rng().gen_range(0..roasts.len())]
    }
}

/// Splits free text into sentence-like chunks at `.` `!` `?` boundaries.
///
/// Terminator runs ("...", "?!") stay attached to their chunk. Stray
/// terminators before any text are skipped. If no chunk is found the whole
/// trimmed entry counts as one chunk, so every non-empty entry gets at
/// least one roast.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut cur = String::new();
    let mut seen_text = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let terminator = matches!(ch, '.' | '!' | '?');
        if terminator && !seen_text {
            continue;
        }
        cur.push(ch);
        if !terminator {
            seen_text = true;
            continue;
        }
        // End of a terminator run closes the chunk.
        if !matches!(chars.peek(), Some('.' | '!' | '?')) {
            let chunk = cur.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }
            cur.clear();
            seen_text = false;
        }
    }

    if seen_text {
        let tail = cur.trim();
        if !tail.is_empty() {
            chunks.push(tail.to_string());
        }
    }

    if chunks.is_empty() {
        let whole = text.trim();
        if !whole.is_empty() {
            chunks.push(whole.to_string());
        }
    }

    chunks
}

/// A roasted entry: the composed text plus the individual picks, in order.
#[derive(Clone, Debug)]
pub struct RoastedEntry {
    pub text: String,
    pub picks: Vec<String>,
}

/// Appends one roast after every sentence chunk of `entry`.
pub fn roast_entry(entry: &str, source: &mut dyn RoastSource) -> RoastedEntry {
    let mut text = String::new();
    let mut picks = Vec::new();

    for chunk in split_sentences(entry) {
        let roast = source.pick(ROASTS);
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&chunk);
        text.push(' ');
        text.push_str(roast);
        picks.push(roast.to_string());
    }

    RoastedEntry { text, picks }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::RoastSource;

    /// Cycles through the pool in order, for deterministic tests.
    pub struct SequentialRoasts {
        next: usize,
    }

    impl SequentialRoasts {
        pub fn new() -> Self {
            Self { next: 0 }
        }
    }

    impl RoastSource for SequentialRoasts {
        fn pick(&mut self, roasts: &[&'static str]) -> &'static str {
            let roast = roasts[self.next % roasts.len()];
            self.next += 1;
            roast
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::SequentialRoasts;
    use super::*;

    #[test]
    fn splits_on_sentence_terminators() {
        assert_eq!(
            split_sentences("Hi there. How are you?"),
            vec!["Hi there.", "How are you?"]
        );
    }

    #[test]
    fn keeps_terminator_runs_attached() {
        assert_eq!(
            split_sentences("Well... that happened?! Sure."),
            vec!["Well...", "that happened?!", "Sure."]
        );
    }

    #[test]
    fn no_terminator_is_one_chunk() {
        assert_eq!(split_sentences("no punctuation at all"), vec!["no punctuation at all"]);
    }

    #[test]
    fn only_terminators_is_one_chunk() {
        assert_eq!(split_sentences("..."), vec!["..."]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_sentences("   ").is_empty());
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn roasts_every_chunk() {
        let mut source = SequentialRoasts::new();
        let roasted = roast_entry("Hi there. How are you?", &mut source);

        assert_eq!(roasted.picks.len(), 2);
        assert_eq!(roasted.picks[0], ROASTS[0]);
        assert_eq!(roasted.picks[1], ROASTS[1]);
        assert_eq!(
            roasted.text,
            format!("Hi there. {} How are you? {}", ROASTS[0], ROASTS[1])
        );
    }

    #[test]
    fn blank_entry_yields_nothing() {
        let mut source = SequentialRoasts::new();
        let roasted = roast_entry("  ", &mut source);
        assert!(roasted.picks.is_empty());
        assert!(roasted.text.is_empty());
    }
}
