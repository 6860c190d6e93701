//! Intent classification for confirmation replies.
//!
//! Maps a short free-text reply to affirm, reject or ambiguous. This is a
//! documented keyword heuristic, not language understanding: short replies
//! need a single positive cue, long replies need corroboration, and a
//! negative cue anywhere overrides any amount of positive signal so the
//! controller re-confirms instead of committing a false positive.
//!
//! All thresholds are named constants so tests can pin exact behavior.
//! Lengths are counted in characters, not bytes; Korean text would
//! otherwise hit the long-reply threshold after five syllables.

/// Classification of a user's reply during a confirm stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Commit the candidate and move on.
    Affirm,
    /// Discard the candidate and re-ask (or revise, for section drafts).
    Reject,
    /// Could not tell; re-prompt without changing anything.
    Ambiguous,
}

/// Replies that affirm on their own, matched exactly after stripping one
/// trailing `.` or `!`.
pub const EXACT_AFFIRMATIVES: &[&str] = &[
    "네",
    "예",
    "넵",
    "네네",
    "응",
    "ㅇㅇ",
    "좋아요",
    "좋습니다",
    "맞아요",
    "맞습니다",
    "그래",
    "오케이",
    "ok",
    "yes",
];

/// Substrings that signal rejection. Checked before positive scoring so a
/// mixed reply ("좋긴 한데 다시 해주세요") re-confirms rather than commits.
pub const NEGATIVE_SIGNALS: &[&str] = &[
    "아니",
    "아뇨",
    "다시",
    "수정",
    "변경",
    "바꿔",
    "바꾸",
    "별로",
    "싫",
    "그만",
    "취소",
    "안돼",
    "안 돼",
    "no",
];

/// Substrings that each add one point of positive signal.
pub const POSITIVE_SIGNALS: &[&str] = &[
    "네",
    "예",
    "응",
    "ㅇㅇ",
    "좋",
    "맞",
    "진행",
    "괜찮",
    "그래",
    "오케이",
    "확인",
    "고고",
    "ok",
    "yes",
];

/// Greeting-style openers that affirm a long reply with only one cue.
pub const LEADING_AFFIRMATIVES: &[&str] = &["좋아", "그래", "네,", "예,", "오케이"];

/// Replies shorter than this many characters cannot be classified at all
/// (after the exact-match check).
pub const MIN_CLASSIFIABLE_CHARS: usize = 2;

/// Replies shorter than this many characters are "short".
pub const SHORT_REPLY_CHAR_LIMIT: usize = 15;

/// Positive cues required to affirm a short reply.
pub const SHORT_REPLY_MIN_CUES: usize = 1;

/// Positive cues required to affirm a long reply.
pub const LONG_REPLY_MIN_CUES: usize = 2;

/// Classifies a confirmation reply.
pub fn classify(text: &str) -> Intent {
    let trimmed = text.trim();

    // 1. Unambiguous affirmatives, ignoring a single trailing '.' or '!'.
    let bare = trimmed.strip_suffix(['.', '!']).unwrap_or(trimmed);
    if EXACT_AFFIRMATIVES
        .iter()
        .any(|phrase| bare.eq_ignore_ascii_case(phrase))
    {
        return Intent::Affirm;
    }

    let char_len = trimmed.chars().count();
    if char_len < MIN_CLASSIFIABLE_CHARS {
        return Intent::Ambiguous;
    }

    let lowered = trimmed.to_lowercase();

    // 2. Negative signals take priority over positive ones.
    if NEGATIVE_SIGNALS.iter().any(|cue| lowered.contains(cue)) {
        return Intent::Reject;
    }

    // 3. Length-scaled positive scoring.
    let score = POSITIVE_SIGNALS
        .iter()
        .filter(|cue| lowered.contains(*cue))
        .count();
    if char_len < SHORT_REPLY_CHAR_LIMIT && score >= SHORT_REPLY_MIN_CUES {
        return Intent::Affirm;
    }
    if char_len >= SHORT_REPLY_CHAR_LIMIT && score >= LONG_REPLY_MIN_CUES {
        return Intent::Affirm;
    }

    // 4. Greeting-style affirmative opener.
    if LEADING_AFFIRMATIVES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return Intent::Affirm;
    }

    Intent::Ambiguous
}
