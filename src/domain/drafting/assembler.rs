//! Final document assembly.

use std::collections::HashMap;

/// Assembles the full Markdown document from the confirmed topic, the
/// subtitle order and the committed section drafts.
///
/// Deterministic concatenation with no failure modes: a subtitle without a
/// committed draft renders with an empty body rather than erroring.
pub fn assemble(
    topic: &str,
    subtitles: &[String],
    section_drafts: &HashMap<String, String>,
) -> String {
    let mut document = format!("# {}\n\n", topic);
    for subtitle in subtitles {
        let body = section_drafts
            .get(subtitle)
            .map(String::as_str)
            .unwrap_or_default();
        document.push_str(&format!("## {}\n{}\n\n", subtitle, body));
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drafts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn concatenates_title_and_sections_in_order() {
        let document = assemble(
            "T",
            &["A".to_string(), "B".to_string()],
            &drafts(&[("A", "x"), ("B", "y")]),
        );
        assert_eq!(document, "# T\n\n## A\nx\n\n## B\ny\n\n");
    }

    #[test]
    fn missing_section_renders_empty_body() {
        let document = assemble("T", &["A".to_string()], &HashMap::new());
        assert_eq!(document, "# T\n\n## A\n\n\n");
    }

    #[test]
    fn no_subtitles_yields_title_only() {
        let document = assemble("T", &[], &HashMap::new());
        assert_eq!(document, "# T\n\n");
    }

    #[test]
    fn extra_drafts_without_a_subtitle_are_not_rendered() {
        let document = assemble("T", &["A".to_string()], &drafts(&[("A", "x"), ("B", "y")]));
        assert!(!document.contains("## B"));
    }

    proptest! {
        #[test]
        fn output_always_starts_with_the_title(
            topic in "[^\\r\\n]{0,40}",
            subtitles in proptest::collection::vec("[^\\r\\n]{1,20}", 0..5),
        ) {
            let document = assemble(&topic, &subtitles, &HashMap::new());
            let expected_prefix = format!("# {}\n\n", topic);
            prop_assert!(document.starts_with(&expected_prefix));
        }

        #[test]
        fn every_subtitle_appears_as_a_heading(
            subtitles in proptest::collection::vec("[a-z가-힣]{1,12}", 0..5),
        ) {
            let document = assemble("topic", &subtitles, &HashMap::new());
            for subtitle in &subtitles {
                let expected_heading = format!("## {}\n", subtitle);
                prop_assert!(document.contains(&expected_heading));
            }
        }
    }
}
