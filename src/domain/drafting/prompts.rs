//! Prompt templates for the text generation service.
//!
//! Every request is prefixed with the system prompt via
//! [`with_system_prompt`]. Section prompts vary by position: the first
//! section is written as an introduction, the last as a conclusion, and
//! everything in between as body text that carries the previously drafted
//! sections for consistency.

use std::collections::HashMap;

use crate::domain::session::StyleProfile;

/// Persona and writing guidelines prepended to every generation request.
pub const SYSTEM_PROMPT: &str = "\
당신은 기술 블로그 작성을 도와주는 어시스턴트입니다.

기술 블로그 작성 시 다음 지침을 따르세요:
1. 기술적 정확성: 모든 기술 정보와 개념 설명은 정확해야 합니다.
2. 코드 예제: 실제 작동하는 코드 예제를 포함하고, 각 부분에 대한 설명을 추가하세요.
3. 비교 분석: 다른 기술이나 접근법과 비교하여 장단점을 제시하세요.
4. 실제 사용 사례: 실무에서 어떻게 활용될 수 있는지 구체적인 예시를 포함하세요.
5. 일관성: 이전에 작성된 섹션의 내용과 일관성을 유지하세요.";

/// Prepends the system prompt to a task prompt.
pub fn with_system_prompt(prompt: &str) -> String {
    format!("{}\n\n{}", SYSTEM_PROMPT, prompt)
}

/// Asks for keyword suggestions for a confirmed topic.
pub fn keyword_suggestion(topic: &str) -> String {
    format!(
        "'{}'이라는 주제에 관련된 기술 블로그 키워드를 5~7개 추천해주세요.\n\
         키워드는 한 줄에 하나씩, 다른 설명 없이 출력해주세요.",
        topic
    )
}

/// Asks for a structure proposal from the collected context.
pub fn structure_suggestion(topic: &str, keywords: &str, style: &StyleProfile) -> String {
    format!(
        "아래 주제, 키워드, 스타일을 바탕으로 기술 블로그 글의 전체 구조를 제안해주세요.\n\
         각 섹션의 제목만 한 줄에 하나씩, 다른 설명 없이 출력해주세요.\n\n\
         주제: {}\n키워드: {}\n스타일: {}",
        topic, keywords, style
    )
}

/// Asks for subtitles matching a confirmed structure.
pub fn subtitle_suggestion(topic: &str, structure: &[String]) -> String {
    format!(
        "주제 \"{}\"의 기술 블로그가 아래 구조로 확정되었습니다:\n\n{}\n\n\
         각 섹션에 어울리는 소제목을 한 줄에 하나씩, 다른 설명 없이 출력해주세요.",
        topic,
        bullet_list(structure)
    )
}

/// Builds the drafting prompt for the section at `index` of `total`.
///
/// Position picks the template: introduction for the first section,
/// conclusion for the last, body otherwise.
pub fn section(
    index: usize,
    total: usize,
    section_title: &str,
    topic: &str,
    keywords: &str,
    style: &StyleProfile,
    previous_sections: &str,
) -> String {
    if index == 0 {
        intro_section(section_title, topic, keywords, style)
    } else if index + 1 == total {
        conclusion_section(section_title, topic, keywords, style, previous_sections)
    } else {
        body_section(section_title, topic, keywords, style, previous_sections)
    }
}

fn intro_section(section_title: &str, topic: &str, keywords: &str, style: &StyleProfile) -> String {
    format!(
        "이 글의 서론 부분인 \"{}\"에 대한 초안을 작성해주세요.\n\n\
         다음 요소를 포함해주세요:\n\
         1. 주제에 대한 간결한 소개와 중요성\n\
         2. 독자가 이 글을 읽어야 하는 이유\n\
         3. 글에서 다룰 내용에 대한 간략한 개요\n\
         4. 독자의 관심을 끌 수 있는 흥미로운 시작점\n\n\
         주제: {}\n키워드: {}\n스타일: {}",
        section_title, topic, keywords, style
    )
}

fn body_section(
    section_title: &str,
    topic: &str,
    keywords: &str,
    style: &StyleProfile,
    previous_sections: &str,
) -> String {
    format!(
        "이 글의 본문 부분인 \"{}\"에 대한 초안을 작성해주세요.\n\n\
         다음 요소를 포함해주세요:\n\
         1. 해당 섹션의 핵심 개념 설명\n\
         2. 실제 작동하는 코드 예제와 설명\n\
         3. 다른 접근법과의 비교 분석\n\
         4. 실무 적용 사례 또는 예시\n\n\
         이전 섹션 내용을 참고하여 일관성을 유지하세요:\n{}\n\
         주제: {}\n키워드: {}\n스타일: {}",
        section_title, previous_sections, topic, keywords, style
    )
}

fn conclusion_section(
    section_title: &str,
    topic: &str,
    keywords: &str,
    style: &StyleProfile,
    previous_sections: &str,
) -> String {
    format!(
        "이 글의 결론 부분인 \"{}\"에 대한 초안을 작성해주세요.\n\n\
         다음 요소를 포함해주세요:\n\
         1. 글에서 다룬 핵심 내용 요약\n\
         2. 주요 시사점 또는 교훈\n\
         3. 독자가 다음으로 탐색할 수 있는 관련 주제 제안\n\
         4. 독자의 행동을 유도하는 마무리\n\n\
         이전 섹션 내용을 참고하여 일관성을 유지하세요:\n{}\n\
         주제: {}\n키워드: {}\n스타일: {}",
        section_title, previous_sections, topic, keywords, style
    )
}

/// Builds the revision prompt when a section draft is rejected.
pub fn revision(
    section_title: &str,
    user_request: &str,
    original_draft: &str,
    previous_sections: &str,
    topic: &str,
    keywords: &str,
    style: &StyleProfile,
) -> String {
    format!(
        "다음 섹션의 초안을 수정해주세요:\n\
         섹션 제목: {}\n\n\
         사용자 요청: {}\n\n\
         기존 초안:\n{}\n\n\
         이전 섹션 내용:\n{}\n\n\
         수정 시 다음 사항을 유의하세요:\n\
         1. 사용자의 요청사항을 정확히 반영\n\
         2. 기술적 정확성 유지\n\
         3. 글의 전체적인 일관성 유지\n\
         4. 코드 예제가 있다면 정확하게 수정\n\
         5. 기존 초안의 좋은 부분은 유지\n\n\
         주제: {}\n키워드: {}\n스타일: {}",
        section_title, user_request, original_draft, previous_sections, topic, keywords, style
    )
}

/// Renders the already-drafted sections that precede `upto` as Markdown,
/// for prompts that need earlier context.
pub fn previous_sections(
    subtitles: &[String],
    section_drafts: &HashMap<String, String>,
    upto: usize,
) -> String {
    let mut context = String::new();
    for subtitle in subtitles.iter().take(upto) {
        let body = section_drafts
            .get(subtitle)
            .map(String::as_str)
            .unwrap_or_default();
        context.push_str(&format!("## {}\n{}\n\n", subtitle, body));
    }
    context
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StyleProfile {
        StyleProfile {
            format: "튜토리얼".into(),
            tone: "친근한".into(),
            audience: "초보자".into(),
        }
    }

    #[test]
    fn with_system_prompt_prefixes_the_persona() {
        let prompt = with_system_prompt("task");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("task"));
    }

    #[test]
    fn keyword_suggestion_mentions_the_topic() {
        let prompt = keyword_suggestion("Docker 입문");
        assert!(prompt.contains("Docker 입문"));
        assert!(prompt.contains("키워드"));
    }

    #[test]
    fn structure_suggestion_carries_the_collected_context() {
        let prompt = structure_suggestion("Docker 입문", "Docker, 이미지", &style());
        assert!(prompt.contains("Docker 입문"));
        assert!(prompt.contains("Docker, 이미지"));
        assert!(prompt.contains("튜토리얼"));
    }

    #[test]
    fn first_section_uses_the_intro_template() {
        let prompt = section(0, 3, "들어가며", "T", "k", &style(), "");
        assert!(prompt.contains("서론"));
        assert!(prompt.contains("들어가며"));
    }

    #[test]
    fn last_section_uses_the_conclusion_template() {
        let prompt = section(2, 3, "마치며", "T", "k", &style(), "## 앞\n내용\n\n");
        assert!(prompt.contains("결론"));
        assert!(prompt.contains("## 앞"));
    }

    #[test]
    fn middle_section_uses_the_body_template_with_context() {
        let prompt = section(1, 3, "본문", "T", "k", &style(), "## 앞\n내용\n\n");
        assert!(prompt.contains("본문"));
        assert!(prompt.contains("일관성"));
        assert!(prompt.contains("## 앞"));
    }

    #[test]
    fn single_section_posts_are_written_as_intros() {
        let prompt = section(0, 1, "전부", "T", "k", &style(), "");
        assert!(prompt.contains("서론"));
    }

    #[test]
    fn revision_carries_request_and_original_draft() {
        let prompt = revision("본문", "예제를 추가해주세요", "원래 초안", "", "T", "k", &style());
        assert!(prompt.contains("예제를 추가해주세요"));
        assert!(prompt.contains("원래 초안"));
        assert!(prompt.contains("본문"));
    }

    #[test]
    fn previous_sections_renders_only_drafted_predecessors() {
        let subtitles = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut drafts = HashMap::new();
        drafts.insert("A".to_string(), "a-body".to_string());
        drafts.insert("B".to_string(), "b-body".to_string());

        let context = previous_sections(&subtitles, &drafts, 2);
        assert_eq!(context, "## A\na-body\n\n## B\nb-body\n\n");
    }

    #[test]
    fn previous_sections_is_empty_for_the_first_section() {
        let context = previous_sections(&["A".to_string()], &HashMap::new(), 0);
        assert!(context.is_empty());
    }
}
