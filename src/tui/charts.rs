use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::state::UiState;
use crate::engine::{StackModel, STACK_CAPACITY, VALUE_MAX};
use crate::model::PlaybackState;

/// Colour of bar `index` for the given playback state.
/// Sorted bars win over the comparison markers.
pub fn bar_color(index: usize, state: &PlaybackState) -> Color {
    if index >= state.sorted_boundary {
        Color::Green
    } else if state.current_index == Some(index) {
        Color::Red
    } else if state.compare_index == Some(index) {
        Color::Yellow
    } else {
        Color::Blue
    }
}

/// Width of each bar so that `num_bars` bars with a one-column gap fill `chart_width`.
pub fn bar_width_for(chart_width: usize, num_bars: usize) -> u16 {
    if num_bars == 0 {
        return 1;
    }
    let per_bar = chart_width / num_bars;
    per_bar.saturating_sub(1).max(1) as u16
}

/// Chart ceiling: the generator's range, raised to fit larger explicit values.
pub fn chart_max(values: &[u32]) -> u64 {
    values.iter().copied().max().unwrap_or(0).max(VALUE_MAX) as u64
}

/// Bar chart of the current sequence.
pub fn render_sort_bars(f: &mut Frame, area: Rect, state: &UiState) {
    let values = state.player.values();
    let playback = state.player.state();

    let title = Line::from(vec![
        Span::raw("Bubble Sort ("),
        Span::styled(
            format!("{}", values.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" values)"),
    ]);

    if values.is_empty() {
        let empty = Paragraph::new("Nothing to sort")
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    // Recalculate bar width for the actual chart area
    let chart_width = area.width.saturating_sub(2) as usize;
    let bar_width = bar_width_for(chart_width, values.len());

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let label = if bar_width >= 3 {
                v.to_string()
            } else {
                String::new()
            };
            Bar::default()
                .value(*v as u64)
                .text_value(label)
                .style(Style::default().fg(bar_color(i, &playback)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(chart_max(values));

    f.render_widget(chart, area);
}

/// Colour legend plus live counters, rendered as one line.
pub fn render_legend(f: &mut Frame, area: Rect, state: &UiState) {
    let swatch = |color: Color, label: &'static str| {
        vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::raw(label),
            Span::raw("   "),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(swatch(Color::Green, "Sorted"));
    spans.extend(swatch(Color::Red, "Current Element"));
    spans.extend(swatch(Color::Yellow, "Comparing"));
    spans.push(Span::styled("cmp ", Style::default().fg(Color::Gray)));
    spans.push(Span::raw(state.tally.comparisons.to_string()));
    spans.push(Span::styled("  swp ", Style::default().fg(Color::Gray)));
    spans.push(Span::raw(state.tally.swaps.to_string()));
    spans.push(Span::styled("  pass ", Style::default().fg(Color::Gray)));
    spans.push(Span::raw(state.tally.passes.to_string()));

    let p = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Legend"));
    f.render_widget(p, area);
}

/// Progress gauge: share of the sequence past the sorted boundary.
pub fn render_progress(f: &mut Frame, area: Rect, state: &UiState) {
    let playback = state.player.state();
    let len = state.player.values().len();
    let ratio = crate::metrics::sorted_fraction(len, playback.sorted_boundary);
    let label = if playback.running {
        if state.paused {
            format!("Paused (boundary {})", playback.sorted_boundary)
        } else {
            format!("Sorting (boundary {})", playback.sorted_boundary)
        }
    } else if playback.sorted_boundary == 0 {
        "Sorted".to_string()
    } else {
        "Idle".to_string()
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

/// Stack drawn top-down with the input line and last popped value beside it.
pub fn render_stack(f: &mut Frame, area: Rect, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(area);

    let mut controls = vec![
        Line::from("A stack follows a \"Last-In, First-Out\" (LIFO) principle."),
        Line::from("The last element added is the first one to be removed."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Input: ", Style::default().fg(Color::Gray)),
            Span::styled(
                if state.stack_editing {
                    format!("{}_", state.stack_input)
                } else {
                    state.stack_input.clone()
                },
                Style::default().fg(if state.stack_editing {
                    Color::Yellow
                } else {
                    Color::White
                }),
            ),
        ]),
    ];
    if state.stack.is_full() {
        controls.push(Line::from(Span::styled(
            "Stack is full.",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(popped) = state.stack.last_popped() {
        controls.push(Line::from(""));
        controls.push(Line::from(vec![
            Span::styled("Popped: ", Style::default().fg(Color::Yellow)),
            Span::styled(popped.to_string(), Style::default().fg(Color::Yellow)),
        ]));
    }
    let p = Paragraph::new(controls).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Stack (LIFO) Visualization"),
    );
    f.render_widget(p, cols[0]);

    let p = Paragraph::new(stack_lines(&state.stack))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{}/{}", state.stack.items().len(), STACK_CAPACITY)),
        );
    f.render_widget(p, cols[1]);
}

/// One boxed line per item, top of the stack first.
pub fn stack_lines(stack: &StackModel) -> Vec<Line<'static>> {
    if stack.items().is_empty() {
        return vec![Line::from(Span::styled(
            "Stack is empty",
            Style::default().fg(Color::Gray),
        ))];
    }
    stack
        .items()
        .iter()
        .rev()
        .map(|item| {
            Line::from(Span::styled(
                format!("[ {:^14} ]", item),
                Style::default().fg(Color::Blue),
            ))
        })
        .collect()
}
