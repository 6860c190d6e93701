//! Values confirmed through the conversation, and the forgiving parsers
//! that turn free-text replies into them.

use serde::{Deserialize, Serialize};

/// Default style fields used when the user's reply omits a part.
const DEFAULT_FORMAT: &str = "일반 기술 글";
const DEFAULT_TONE: &str = "중립적";
const DEFAULT_AUDIENCE: &str = "일반적인 개발자 대상";

/// The writing style of the blog post: format, tone and target audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Article format, e.g. 튜토리얼 or 기술 리뷰.
    pub format: String,
    /// Writing tone, e.g. 친근한 or 공식적인.
    pub tone: String,
    /// Target audience, e.g. 초보자 or 실무자.
    pub audience: String,
}

impl StyleProfile {
    /// Parses a reply like "튜토리얼 형식, 친근한 톤, 초보자 대상".
    ///
    /// Comma-separated parts map to format, tone and audience in order.
    /// Missing or blank parts fall back to the defaults; nothing is ever
    /// rejected.
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split(',').map(str::trim).filter(|p| !p.is_empty());
        Self {
            format: parts.next().unwrap_or(DEFAULT_FORMAT).to_string(),
            tone: parts.next().unwrap_or(DEFAULT_TONE).to_string(),
            audience: parts.next().unwrap_or(DEFAULT_AUDIENCE).to_string(),
        }
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            tone: DEFAULT_TONE.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }
}

impl std::fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "형식: {}, 문체: {}, 독자 대상: {}",
            self.format, self.tone, self.audience
        )
    }
}

/// Splits a reply or a generated suggestion into a clean list of items.
///
/// Items are separated by newlines or commas. Leading list markers
/// ("-", "*", "•", "1.", "2)") are stripped so both user input and
/// model output parse the same way. Blank items are dropped.
pub fn parse_item_list(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(strip_list_marker)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(item: &str) -> &str {
    let item = item.trim();
    let item = item.trim_start_matches(['-', '*', '•']).trim_start();
    // Numbered markers: digits followed by '.' or ')'.
    let digits = item.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &item[digits..];
        if let Some(stripped) = rest.strip_prefix(['.', ')']) {
            return stripped.trim();
        }
    }
    item
}

/// Mapping from stage to the confirmed value collected at that stage.
///
/// Values are written only after the user affirms the candidate; see
/// `Session::commit_candidate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collected {
    topic: Option<String>,
    keywords: Vec<String>,
    style: Option<StyleProfile>,
    structure: Vec<String>,
    subtitles: Vec<String>,
}

impl Collected {
    /// Returns the confirmed topic, or an empty string before confirmation.
    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Keywords joined for prompt and message interpolation.
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }

    /// Returns the confirmed style, or the defaults before confirmation.
    pub fn style(&self) -> StyleProfile {
        self.style.clone().unwrap_or_default()
    }

    pub fn structure(&self) -> &[String] {
        &self.structure
    }

    pub fn subtitles(&self) -> &[String] {
        &self.subtitles
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        self.topic = Some(topic);
    }

    pub(crate) fn set_keywords(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }

    pub(crate) fn set_style(&mut self, style: StyleProfile) {
        self.style = Some(style);
    }

    pub(crate) fn set_structure(&mut self, structure: Vec<String>) {
        self.structure = structure;
    }

    pub(crate) fn set_subtitles(&mut self, subtitles: Vec<String>) {
        self.subtitles = subtitles;
    }
}
