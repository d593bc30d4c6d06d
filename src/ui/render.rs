//! Turns display blocks into styled ratatui lines.

use crate::ui::blocks::{DisplayBlock, InlineSpan};
use crate::ui::theme::Theme;
use ratatui::text::{Line, Span};

/// Render a sequence of blocks, one line per block, preserving order.
pub fn render_blocks(blocks: &[DisplayBlock], theme: &Theme) -> Vec<Line<'static>> {
    blocks
        .iter()
        .map(|block| render_block(block, theme))
        .collect()
}

fn render_block(block: &DisplayBlock, theme: &Theme) -> Line<'static> {
    match block {
        DisplayBlock::Blank => Line::from(""),
        DisplayBlock::Heading { text } => {
            Line::from(Span::styled(text.clone(), theme.heading_style))
        }
        DisplayBlock::ListItem { spans } => {
            let mut rendered = vec![Span::styled("• ", theme.bullet_style)];
            rendered.extend(render_spans(spans, theme));
            Line::from(rendered)
        }
        DisplayBlock::Paragraph { spans } => Line::from(render_spans(spans, theme)),
    }
}

fn render_spans(spans: &[InlineSpan], theme: &Theme) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            InlineSpan::Emphasized { text } => Span::styled(text.clone(), theme.emphasis_style),
            InlineSpan::Plain { text } => Span::styled(text.clone(), theme.text_style),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::blocks::format_blocks;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.clone()).collect()
    }

    #[test]
    fn one_line_per_block_in_order() {
        let blocks = format_blocks("# Saran\n* pertama **penting**\n\nselesai");
        let theme = Theme::dark_default();
        let lines = render_blocks(&blocks, &theme);
        assert_eq!(lines.len(), 4);
        assert_eq!(line_text(&lines[0]), "Saran");
        assert_eq!(line_text(&lines[1]), "• pertama penting");
        assert_eq!(line_text(&lines[2]), "");
        assert_eq!(line_text(&lines[3]), "selesai");
    }

    #[test]
    fn emphasized_spans_get_the_emphasis_style() {
        let blocks = format_blocks("a **b** c");
        let theme = Theme::dark_default();
        let lines = render_blocks(&blocks, &theme);
        let styles: Vec<_> = lines[0].spans.iter().map(|span| span.style).collect();
        assert!(styles.contains(&theme.emphasis_style));
        assert!(styles.contains(&theme.text_style));
    }
}
