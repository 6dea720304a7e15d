use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::state::UiState;
use crate::engine::OptionMark;

fn mark_style(mark: OptionMark) -> Style {
    match mark {
        OptionMark::Open => Style::default().fg(Color::White),
        OptionMark::Correct => Style::default().fg(Color::Green),
        OptionMark::Wrong => Style::default().fg(Color::Red),
        OptionMark::Dimmed => Style::default().fg(Color::DarkGray),
    }
}

pub fn draw_quiz(area: Rect, f: &mut Frame, state: &UiState) {
    let quiz = &state.quiz;
    let Some(question) = quiz.current() else {
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                quiz.result_message(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press r to try again"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Quiz Result"));
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            question.prompt.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, option) in question.options.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), Style::default().fg(Color::Magenta)),
            Span::styled(option.clone(), mark_style(quiz.mark(i))),
        ]));
    }
    if quiz.selected().is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if quiz.is_last() {
                "n: Finish Quiz"
            } else {
                "n: Next Question"
            },
            Style::default().fg(Color::Gray),
        )));
    }

    let (n, total) = quiz.position();
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Question {n}/{total}  (score {})", quiz.score())),
        );
    f.render_widget(p, area);
}

pub fn draw_matching(area: Rect, f: &mut Frame, state: &UiState) {
    let matching = &state.matching;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(area);

    let mut left: Vec<Line> = if matching.all_matched() {
        vec![
            Line::from(Span::styled(
                "Congratulations!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("You've matched all the concepts correctly."),
            Line::from("Press r to play again."),
        ]
    } else {
        matching
            .pool()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == state.match_cursor {
                    Line::from(Span::styled(
                        format!("> {}", item.text),
                        Style::default().fg(Color::Yellow),
                    ))
                } else {
                    Line::from(format!("  {}", item.text))
                }
            })
            .collect()
    };
    left.insert(0, Line::from(""));
    let p = Paragraph::new(left).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Descriptions"),
    );
    f.render_widget(p, cols[0]);

    let mut right = vec![Line::from("")];
    for (i, target) in matching.targets().iter().enumerate() {
        let mut spans = vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::Magenta)),
            Span::raw(format!("{:<10}", target.text)),
        ];
        if let Some((item, correct)) = matching.placement(i) {
            let color = if correct { Color::Green } else { Color::Red };
            spans.push(Span::styled(
                format!(" ← {}", item.text),
                Style::default().fg(color),
            ));
        }
        right.push(Line::from(spans));
    }
    let p = Paragraph::new(right).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Data Structures  (matched {}/{})",
                matching.score(),
                matching.targets().len()
            )),
    );
    f.render_widget(p, cols[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answered_options_use_verdict_colours() {
        assert_eq!(mark_style(OptionMark::Correct).fg, Some(Color::Green));
        assert_eq!(mark_style(OptionMark::Wrong).fg, Some(Color::Red));
        assert_eq!(mark_style(OptionMark::Dimmed).fg, Some(Color::DarkGray));
    }
}
