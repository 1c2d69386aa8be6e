//! Fenced code block extraction
//!
//! Pulls the interiors of triple-backtick fences out of free text, such as
//! a language-model completion. Matching is leftmost and non-greedy: a
//! fence closes at the first following triple backtick, and an opening
//! fence with no partner is skipped one character at a time.
//!
//! Language tags after the opening fence are left in the fragment.

use chumsky::prelude::*;
use tracing::{debug, trace};

/// The fence marker
pub const FENCE: &str = "```";

/// Parse one fenced block, yielding its raw interior.
pub fn fenced_block<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    let body = any().and_is(just(FENCE).not()).repeated().to_slice();
    just(FENCE).ignore_then(body).then_ignore(just(FENCE))
}

/// Parse a whole document into its fenced blocks, skipping everything else.
pub fn fenced_blocks<'src>() -> impl Parser<'src, &'src str, Vec<&'src str>> + Clone {
    choice((fenced_block().map(Some), any().to(None)))
        .repeated()
        .collect::<Vec<Option<&'src str>>>()
        .map(|blocks| blocks.into_iter().flatten().collect::<Vec<&'src str>>())
        .then_ignore(end())
}

/// Extract the trimmed interiors of all fenced blocks, in document order
///
/// Falls back to the whole trimmed input when no fence pair exists, so
/// the result is never empty.
///
/// # Example
/// ```
/// use codeflow::extract_code_blocks;
///
/// assert_eq!(extract_code_blocks("no fences here"), vec!["no fences here"]);
/// assert_eq!(extract_code_blocks("text ```a``` more ```b```"), vec!["a", "b"]);
/// ```
pub fn extract_code_blocks(text: &str) -> Vec<String> {
    trace!(input_len = text.len(), "Extracting code blocks");

    let blocks: Vec<String> = fenced_blocks()
        .parse(text)
        .into_result()
        .unwrap_or_default()
        .into_iter()
        .map(|block| block.trim().to_string())
        .collect();

    if blocks.is_empty() {
        debug!("No fenced blocks found, using whole text");
        return vec![text.trim().to_string()];
    }

    debug!(block_count = blocks.len(), "Extracted code blocks");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let parser = fenced_block().then_ignore(end());
        assert_eq!(parser.parse("```abc```").into_result().ok(), Some("abc"));
        assert_eq!(parser.parse("``````").into_result().ok(), Some(""));
        assert!(parser.parse("```abc").into_result().is_err());
        assert!(parser.parse("abc```").into_result().is_err());
    }

    #[test]
    fn test_no_fences() {
        assert_eq!(extract_code_blocks("no fences here"), vec!["no fences here"]);
    }

    #[test]
    fn test_fallback_trims() {
        assert_eq!(extract_code_blocks("  padded \n"), vec!["padded"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_code_blocks(""), vec![""]);
    }

    #[test]
    fn test_two_blocks_in_order() {
        assert_eq!(
            extract_code_blocks("text ```a``` more ```b```"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_three_blocks() {
        let blocks = extract_code_blocks("```first``` and then ```second``` and ```third```");
        assert_eq!(blocks, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_language_tag_is_kept() {
        let blocks = extract_code_blocks("Here:\n```python\nprint('hi')\n```\nDone.");
        assert_eq!(blocks, vec!["python\nprint('hi')"]);
    }

    #[test]
    fn test_unterminated_fence_is_ignored() {
        assert_eq!(extract_code_blocks("```a``` then ```b"), vec!["a"]);
        assert_eq!(extract_code_blocks("only ```open"), vec!["only ```open"]);
    }

    #[test]
    fn test_block_body_is_trimmed() {
        let blocks = extract_code_blocks("```\n\n  fn main() {}\n\n```");
        assert_eq!(blocks, vec!["fn main() {}"]);
    }

    #[test]
    fn test_empty_block_is_kept() {
        assert_eq!(extract_code_blocks("x `````` y ```z```"), vec!["", "z"]);
    }

    #[test]
    fn test_four_backticks() {
        // The first three open, the body runs until the next triple
        assert_eq!(extract_code_blocks("````a```"), vec!["`a"]);
    }
}
