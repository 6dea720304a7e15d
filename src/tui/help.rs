use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(format!("{:width$}{}", "", action, width = pad)),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Sorting tab:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("s", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw("   Start bubble sort"),
        ]),
        key_line("g", 11, "Generate new array"),
        key_line("p", 11, "Pause/Resume"),
        key_line("c", 11, "Cancel the running sort"),
        key_line("e", 11, "Export last run as JSON"),
        Line::from(""),
        Line::from("Stack tab:"),
        key_line("i", 11, "Edit the input value"),
        key_line("Enter", 7, "Push the input value"),
        key_line("Esc", 9, "Stop editing"),
        key_line("o", 11, "Pop"),
        Line::from(""),
        Line::from("Quiz tab:"),
        key_line("1-4", 9, "Answer"),
        key_line("n", 11, "Next question / finish"),
        key_line("r", 11, "Try again"),
        Line::from(""),
        Line::from("Match tab:"),
        key_line("j/k", 9, "Highlight a description"),
        key_line("1-4", 9, "Drop it on that data structure"),
        key_line("r", 11, "Reset"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
