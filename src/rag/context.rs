//! Context-block formatting.

use super::retriever::ScoredResult;

/// Header prefixed to every context block.
pub const CONTEXT_HEADER: &str = "\nRelevant context:\n";

/// Per-document character ceiling inside the block.
const MAX_DOC_CHARS: usize = 500;
const TRUNCATION_MARKER: &str = "...";

/// Formats ranked results into a bounded context block.
///
/// Entries are numbered from 1 in ranked order, each with the document title
/// as a heading and the content truncated to at most [`MAX_DOC_CHARS`]
/// characters. An empty input yields just the header; callers treat that as
/// "no usable context".
pub fn format_context(results: &[ScoredResult]) -> String {
    let mut block = String::from(CONTEXT_HEADER);

    for (i, result) in results.iter().enumerate() {
        block.push_str(&format!("[{}] {}\n", i + 1, result.document.title));
        block.push_str(&truncate(&result.document.content));
        block.push_str("\n\n");
    }

    block
}

fn truncate(content: &str) -> String {
    if content.chars().count() <= MAX_DOC_CHARS {
        return content.to_string();
    }

    let kept: String = content
        .chars()
        .take(MAX_DOC_CHARS - TRUNCATION_MARKER.len())
        .collect();
    format!("{}{}", kept, TRUNCATION_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;

    fn make_result(title: &str, content: &str) -> ScoredResult {
        ScoredResult {
            document: Document {
                id: "1".to_string(),
                title: title.to_string(),
                content: content.to_string(),
                url: None,
                embedding_ref: None,
            },
            score: 1.0,
        }
    }

    #[test]
    fn empty_results_yield_header_only() {
        assert_eq!(format_context(&[]), CONTEXT_HEADER);
    }

    #[test]
    fn entries_numbered_in_ranked_order() {
        let results = vec![
            make_result("First", "alpha"),
            make_result("Second", "beta"),
        ];

        let block = format_context(&results);
        assert!(block.starts_with(CONTEXT_HEADER));
        assert!(block.contains("[1] First\nalpha"));
        assert!(block.contains("[2] Second\nbeta"));
    }

    #[test]
    fn long_content_is_truncated_with_marker() {
        let long = "x".repeat(1200);
        let block = format_context(&[make_result("Long", &long)]);

        assert!(block.contains(&format!("{}...", "x".repeat(497))));
        assert!(!block.contains(&"x".repeat(498)));
    }

    #[test]
    fn short_content_is_kept_verbatim() {
        let block = format_context(&[make_result("Short", "tiny body")]);
        assert!(block.contains("tiny body"));
        assert!(!block.contains("..."));
    }

    #[test]
    fn block_length_is_bounded() {
        let results: Vec<ScoredResult> = (0..4)
            .map(|i| make_result(&format!("Doc {}", i), &"y".repeat(5000)))
            .collect();

        let block = format_context(&results);
        // header + per-entry: numbering/title line + 500 chars + separators
        let per_entry_overhead = 16;
        let bound = CONTEXT_HEADER.len() + results.len() * (500 + per_entry_overhead);
        assert!(block.len() <= bound);
    }
}
