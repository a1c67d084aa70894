//! Splits bot reply text into prose and fenced-code segments.
//!
//! The scanner is an explicit two-state tokenizer (outside/inside fence)
//! rather than a regex: one left-to-right pass, linear time, with the
//! unterminated-fence case an explicit branch.

const FENCE: &str = "```";

/// A contiguous unit of parsed message content.
///
/// Produced transiently per render; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Prose split into lines at `\n` boundaries; empty lines preserved.
    Text { lines: Vec<String> },
    /// Inner fence content, trimmed, tagged for per-block clipboard export.
    CodeBlock { content: String, block_id: String },
}

/// Sequential per-parse identifier for the `index`-th code block.
pub fn block_id(index: usize) -> String {
    format!("code-block-{index}")
}

/// Parses `text` into ordered segments.
///
/// Fence pairs are non-greedy: the first closing marker ends a block, and a
/// block needs at least one character of inner content. An opening fence
/// with no closing marker is plain text. Nested fences are unsupported.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0usize;
    let mut block_index = 0usize;

    while let Some(open_offset) = text[cursor..].find(FENCE) {
        let open = cursor + open_offset;
        let content_start = open + FENCE.len();
        let inner = &text[content_start..];

        // The earliest legal closing marker starts after one character of
        // inner content; an adjacent marker would make the block empty.
        let Some(first_char) = inner.chars().next() else {
            break;
        };
        let search_from = first_char.len_utf8();
        let Some(close_offset) = inner[search_from..].find(FENCE) else {
            // Unterminated fence: the marker and everything after it stay
            // plain text.
            break;
        };
        let close = content_start + search_from + close_offset;

        push_text(&mut segments, &text[cursor..open]);
        segments.push(Segment::CodeBlock {
            content: text[content_start..close].trim().to_string(),
            block_id: block_id(block_index),
        });
        block_index += 1;
        cursor = close + FENCE.len();
    }

    push_text(&mut segments, &text[cursor..]);
    segments
}

fn push_text(segments: &mut Vec<Segment>, span: &str) {
    if span.is_empty() {
        return;
    }

    segments.push(Segment::Text {
        lines: span.split('\n').map(str::to_string).collect(),
    });
}
