//! User-facing message templates.
//!
//! These are presentation texts shown to the user, distinct from the
//! generation prompts in `domain::drafting::prompts`.

use crate::domain::session::StyleProfile;

pub const TOPIC_QUESTION: &str = "안녕하세요! 기술 블로그 초안 작성을 도와드리는 챗봇입니다. 😊\n\
    먼저, 어떤 주제로 블로그를 작성하고 싶으신가요? 간단히 말씀해 주세요.";

pub const TOPIC_REASK: &str = "그럼 주제를 다시 말씀해주세요.";

pub const KEYWORD_ACK: &str = "좋아요! 이제 이 주제와 관련된 키워드를 추천드릴게요.";

pub const KEYWORD_REASK: &str = "그럼 키워드를 다시 입력해주세요.";

pub const STYLE_QUESTION: &str = "이번엔 블로그의 스타일을 정해볼게요.\n\
    아래는 참고할 수 있는 예시입니다:\n\n\
    - 형식: 튜토리얼, 기술 리뷰, 문제 해결 사례\n\
    - 문체: 친근한, 공식적인, 중립적\n\
    - 독자 대상: 초보자, 중급 개발자, 전문가\n\n\
    예시에서 골라도 좋고, 자유롭게 원하는 스타일로 작성해주셔도 괜찮습니다.\n\
    예: \"튜토리얼 형식, 친근한 톤, 초보자 대상\"";

pub const STYLE_REASK: &str = "스타일을 다시 입력해주세요.";

pub const STRUCTURE_ACK: &str = "좋아요! 주제와 키워드, 스타일을 바탕으로 글 구조를 제안드릴게요.";

pub const STRUCTURE_REASK: &str =
    "원하시는 구조를 말씀해주세요. 섹션 제목을 한 줄에 하나씩 적어주시면 됩니다.";

pub const SUBTITLE_ACK: &str = "좋습니다. 이제 각 섹션의 소제목을 구성해볼게요.";

pub const SUBTITLE_REASK: &str =
    "원하시는 소제목을 말씀해주세요. 한 줄에 하나씩 적어주시면 됩니다.";

pub const DRAFT_ACK: &str = "이제 각 섹션별로 초안을 작성해드릴게요!";

pub const CLARIFY_NUDGE: &str = "죄송해요, 의도를 정확히 파악하지 못했어요.\n\
    맞으면 \"네\", 다시 하려면 \"아니요\"라고 답해주세요.";

pub const DONE_HELP: &str = "모든 초안 작성이 끝났어요.\n\
    \"전체 초안\"이라고 입력하시면 초안을 다시 보여드리고, \"다시 시작\"이라고 입력하시면 새로 시작합니다.";

pub fn topic_confirm(topic: &str) -> String {
    format!(
        "제가 이해한 주제는 다음과 같습니다: **{}**\n\n\
         이 주제로 블로그를 작성하시는 게 맞을까요? 맞으면 \"네\", 아니라면 다시 말씀해주세요.",
        topic
    )
}

pub fn keyword_question(topic: &str, suggestions: &[String]) -> String {
    format!(
        "주제 \"**{}**\"와 관련해서 아래 키워드를 추천드려요:\n\n{}\n\n\
         이 중에서 다루고 싶은 키워드를 쉼표로 구분해 알려주세요.\n\
         추천에 없더라도 추가하고 싶은 키워드가 있다면 자유롭게 말씀해주세요!",
        topic,
        bullet_list(suggestions)
    )
}

pub fn keyword_confirm(keywords: &str) -> String {
    format!(
        "제가 이해한 키워드는 다음과 같습니다: {}\n\n\
         이 키워드를 중심으로 글을 작성해도 괜찮을까요?",
        keywords
    )
}

pub fn style_confirm(style: &StyleProfile) -> String {
    format!(
        "제가 이해한 스타일은 다음과 같습니다:\n\n\
         - 형식: **{}**\n- 문체: **{}**\n- 대상 독자: **{}**\n\n\
         이 스타일로 글을 작성해도 괜찮을까요?",
        style.format, style.tone, style.audience
    )
}

pub fn structure_proposal(titles: &[String]) -> String {
    format!(
        "📝 제안된 구조:\n\n{}\n\n\
         이 구조로 괜찮을까요? 섹션을 추가하거나 순서를 바꾸고 싶으시면 알려주세요.",
        bullet_list(titles)
    )
}

pub fn subtitle_proposal(titles: &[String]) -> String {
    format!(
        "📌 소제목 목록:\n\n{}\n\n\
         이 흐름대로 글을 작성해도 괜찮을까요? 수정하고 싶은 항목이 있다면 말씀해주세요!",
        bullet_list(titles)
    )
}

pub fn section_draft(title: &str, body: &str) -> String {
    format!(
        "✍️ 섹션 \"**{}**\"의 초안입니다:\n\n{}\n\n\
         이 내용 괜찮으신가요? 수정하거나 다시 작성하고 싶으면 말씀해주세요.",
        title, body
    )
}

pub fn section_revised(body: &str) -> String {
    format!("🔁 다시 작성한 초안입니다:\n\n{}\n\n이제 괜찮으신가요?", body)
}

pub fn completed(document: &str) -> String {
    format!(
        "✅ 모든 초안 작성을 완료했어요! 아래는 전체 초안입니다:\n\n{}\n\
         필요한 경우 수정하거나 복사해서 사용하세요.",
        document
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
