//! Text-block formatter for AI responses.
//!
//! The advice endpoint returns loosely structured multi-line text. This
//! module turns it into a sequence of typed display blocks that the
//! renderer can style: headings, list items, paragraphs, and blank lines.
//! The formatter is deliberately narrow — leading `#` headings, two bullet
//! styles, one level of `**bold**`, and cosmetic removal of table pipes.
//! Prompts are engineered to avoid anything richer, so a full Markdown
//! engine would be the wrong tool here.

/// One renderable unit derived from one input line. Blocks preserve the
/// original line order one-to-one; the formatter never merges or reorders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// A line starting with one or more `#` markers, markers stripped.
    /// The text may be empty (a bare `#` is a valid heading).
    Heading { text: String },
    /// A line starting with exactly `"* "` or `"- "`, marker stripped.
    ListItem { spans: Vec<InlineSpan> },
    /// Any other non-blank line.
    Paragraph { spans: Vec<InlineSpan> },
    /// An empty or whitespace-only line, rendered as vertical spacing.
    Blank,
}

/// A contiguous run of text within a block, tagged for emphasis. Spans
/// concatenate (markers stripped) to reconstruct the block's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Emphasized { text: String },
    Plain { text: String },
}

impl InlineSpan {
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Emphasized { text } | InlineSpan::Plain { text } => text,
        }
    }
}

/// Concatenate span contents back into the block's raw text (without
/// emphasis markers). Used by rendering and by the round-trip tests.
pub fn spans_text(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

/// Format a raw response into display blocks, one block per input line.
pub fn format_blocks(raw: &str) -> Vec<DisplayBlock> {
    raw.split('\n').map(format_line).collect()
}

fn format_line(line: &str) -> DisplayBlock {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return DisplayBlock::Blank;
    }

    // Headings: strip all leading markers and the whitespace after them.
    if trimmed.starts_with('#') {
        let text = trimmed.trim_start_matches('#').trim_start();
        return DisplayBlock::Heading {
            text: text.to_string(),
        };
    }

    // Table rows are not reconstructed; the pipes are replaced with spaces
    // so the cells read as ordinary text.
    let content = if trimmed.starts_with('|') {
        trimmed.replace('|', " ").trim().to_string()
    } else {
        trimmed.to_string()
    };

    // List detection requires the exact two-character "marker plus space"
    // prefix; "*no-space" stays a paragraph.
    let is_list = content.starts_with("* ") || content.starts_with("- ");
    let content = if is_list { &content[2..] } else { &content[..] };

    let spans = parse_spans(content);
    if is_list {
        DisplayBlock::ListItem { spans }
    } else {
        DisplayBlock::Paragraph { spans }
    }
}

/// Split a block's text on non-greedy `**...**` pairs into alternating
/// plain and emphasized spans. Segments between matches, including empty
/// ones, stay plain; an unpaired `**` is kept as literal text.
pub fn parse_spans(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = text;
    loop {
        let Some(open) = rest.find("**") else {
            spans.push(InlineSpan::Plain {
                text: rest.to_string(),
            });
            break;
        };
        let after = &rest[open + 2..];
        let Some(close) = after.find("**") else {
            // No closing pair anywhere to the right: the marker is literal.
            spans.push(InlineSpan::Plain {
                text: rest.to_string(),
            });
            break;
        };
        spans.push(InlineSpan::Plain {
            text: rest[..open].to_string(),
        });
        spans.push(InlineSpan::Emphasized {
            text: after[..close].to_string(),
        });
        rest = &after[close + 2..];
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> InlineSpan {
        InlineSpan::Plain {
            text: text.to_string(),
        }
    }

    fn emphasized(text: &str) -> InlineSpan {
        InlineSpan::Emphasized {
            text: text.to_string(),
        }
    }

    #[test]
    fn heading_markers_are_stripped() {
        assert_eq!(
            format_blocks("### Title"),
            vec![DisplayBlock::Heading {
                text: "Title".to_string()
            }]
        );
    }

    #[test]
    fn bare_heading_marker_yields_empty_heading() {
        assert_eq!(
            format_blocks("#"),
            vec![DisplayBlock::Heading {
                text: String::new()
            }]
        );
    }

    #[test]
    fn list_marker_with_space_is_stripped() {
        let blocks = format_blocks("* buy milk");
        assert_eq!(
            blocks,
            vec![DisplayBlock::ListItem {
                spans: vec![plain("buy milk")]
            }]
        );
    }

    #[test]
    fn dash_bullet_is_recognized() {
        let blocks = format_blocks("- second style");
        assert_eq!(
            blocks,
            vec![DisplayBlock::ListItem {
                spans: vec![plain("second style")]
            }]
        );
    }

    #[test]
    fn list_marker_without_space_stays_paragraph() {
        let blocks = format_blocks("*no-space");
        assert_eq!(
            blocks,
            vec![DisplayBlock::Paragraph {
                spans: vec![plain("*no-space")]
            }]
        );
    }

    #[test]
    fn blank_lines_become_blank_blocks() {
        assert_eq!(
            format_blocks("first\n\n   \nlast"),
            vec![
                DisplayBlock::Paragraph {
                    spans: vec![plain("first")]
                },
                DisplayBlock::Blank,
                DisplayBlock::Blank,
                DisplayBlock::Paragraph {
                    spans: vec![plain("last")]
                },
            ]
        );
    }

    #[test]
    fn table_pipes_are_replaced_with_spaces() {
        let blocks = format_blocks("| Hari | Kegiatan |");
        match &blocks[0] {
            DisplayBlock::Paragraph { spans } => {
                assert_eq!(spans_text(spans), "Hari   Kegiatan");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn blocks_preserve_line_order() {
        let blocks = format_blocks("# Judul\n* satu\n* dua\n\npenutup");
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], DisplayBlock::Heading { .. }));
        assert!(matches!(blocks[1], DisplayBlock::ListItem { .. }));
        assert!(matches!(blocks[2], DisplayBlock::ListItem { .. }));
        assert_eq!(blocks[3], DisplayBlock::Blank);
        assert!(matches!(blocks[4], DisplayBlock::Paragraph { .. }));
    }

    #[test]
    fn paragraph_round_trips_to_trimmed_input() {
        for line in ["plain words here", "  padded  ", "angka 1.234,56"] {
            let blocks = format_blocks(line);
            match &blocks[0] {
                DisplayBlock::Paragraph { spans } => {
                    assert_eq!(spans_text(spans), line.trim());
                }
                other => panic!("expected paragraph, got {other:?}"),
            }
        }
    }

    #[test]
    fn emphasis_pairs_alternate_with_plain() {
        assert_eq!(
            parse_spans("a **b** c"),
            vec![plain("a "), emphasized("b"), plain(" c")]
        );
    }

    #[test]
    fn unbalanced_marker_stays_literal() {
        assert_eq!(parse_spans("a ** b"), vec![plain("a ** b")]);
    }

    #[test]
    fn adjacent_markers_strip_to_empty_emphasis() {
        let spans = parse_spans("****");
        assert!(spans.contains(&emphasized("")));
        assert_eq!(spans_text(&spans), "");
    }

    #[test]
    fn multiple_emphasis_runs_reconstruct_content() {
        let spans = parse_spans("**Bahan:** telur dan **tempe** goreng");
        assert_eq!(
            spans,
            vec![
                plain(""),
                emphasized("Bahan:"),
                plain(" telur dan "),
                emphasized("tempe"),
                plain(" goreng"),
            ]
        );
        assert_eq!(spans_text(&spans), "Bahan: telur dan tempe goreng");
    }
}
