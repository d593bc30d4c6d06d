use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // AI response blocks
    pub heading_style: Style,
    pub text_style: Style,
    pub emphasis_style: Style,
    pub bullet_style: Style,

    // Chrome
    pub title_style: Style,
    pub nav_style: Style,
    pub nav_active_style: Style,
    pub label_style: Style,
    pub value_style: Style,
    pub accent_style: Style,
    pub muted_style: Style,
    pub busy_style: Style,
    pub positive_style: Style,
    pub negative_style: Style,
    pub selection_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            heading_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            text_style: Style::default().fg(Color::White),
            emphasis_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            bullet_style: Style::default().fg(Color::Blue),

            title_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            nav_style: Style::default().fg(Color::Gray),
            nav_active_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(Color::Gray),
            value_style: Style::default().fg(Color::White),
            accent_style: Style::default().fg(Color::Yellow),
            muted_style: Style::default().fg(Color::DarkGray),
            busy_style: Style::default().fg(Color::Magenta),
            positive_style: Style::default().fg(Color::Green),
            negative_style: Style::default().fg(Color::Red),
            selection_style: Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue),
        }
    }
}
