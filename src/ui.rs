use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    session::Session,
    view::{COMPLETE_MESSAGE, CURSOR_MARK, TITLE},
};

const GAUGE_MIN_WIDTH: u16 = 24;
const GAUGE_LINES: u16 = 2;

/// Paints the session's current frame centered in the terminal, with an
/// optional progress bar underneath while a countdown exists.
pub struct SessionView<'s, 'a> {
    session: &'s Session<'a>,
    show_progress: bool,
}

impl<'s, 'a> SessionView<'s, 'a> {
    pub fn new(session: &'s Session<'a>, show_progress: bool) -> Self {
        Self {
            session,
            show_progress,
        }
    }
}

fn style_line(text: &str, is_last: bool) -> Line<'_> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let style = if text == TITLE {
        bold_style.fg(Color::Red)
    } else if text.starts_with(CURSOR_MARK) {
        bold_style.fg(Color::Green)
    } else if text == COMPLETE_MESSAGE {
        bold_style.fg(Color::Green).add_modifier(Modifier::ITALIC)
    } else if is_last {
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
    } else {
        Style::default()
    };

    Line::from(Span::styled(text, style))
}

impl Widget for SessionView<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.session.render();

        let line_count = frame.lines().count();
        let lines: Vec<Line> = frame
            .lines()
            .enumerate()
            .map(|(idx, text)| style_line(text, idx + 1 == line_count))
            .collect();

        let text_width = frame.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        let progress = self
            .session
            .countdown()
            .filter(|_| self.show_progress)
            .map(|cd| cd.progress().clamp(0.0, 1.0));

        let gauge_height = if progress.is_some() { GAUGE_LINES } else { 0 };
        let column_width = if progress.is_some() {
            text_width.max(GAUGE_MIN_WIDTH)
        } else {
            text_width
        }
        .min(area.width);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(line_count as u16),
                Constraint::Length(gauge_height),
                Constraint::Fill(1),
            ])
            .split(area);

        let column = |row: Rect| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Fill(1),
                    Constraint::Length(column_width),
                    Constraint::Fill(1),
                ])
                .split(row)[1]
        };

        Paragraph::new(lines).render(column(rows[1]), buf);

        if let Some(ratio) = progress {
            let gauge_area = column(rows[2]);
            let gauge_area = Rect {
                y: gauge_area.y + 1,
                height: gauge_area.height.saturating_sub(1),
                ..gauge_area
            };
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Red).bg(Color::DarkGray))
                .ratio(ratio)
                .label(format!("{:.0}%", ratio * 100.0))
                .render(gauge_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keys::Command, selection::DEFAULT_PRESETS, session::Event};
    use std::time::Duration;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_menu_into_buffer() {
        let session = Session::new(&DEFAULT_PRESETS).unwrap();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SessionView::new(&session, true).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("->> 30 Min"));
        assert!(text.contains("q quit"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn renders_progress_gauge_while_counting() {
        let mut session = Session::new(&DEFAULT_PRESETS).unwrap();
        session.handle(Event::Command(Command::Confirm));
        session.handle(Event::Tick(Duration::from_secs(900)));

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SessionView::new(&session, true).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("15:00"));
        assert!(text.contains("50%"));
    }

    #[test]
    fn gauge_can_be_disabled() {
        let mut session = Session::new(&DEFAULT_PRESETS).unwrap();
        session.handle(Event::Command(Command::Confirm));

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        SessionView::new(&session, false).render(area, &mut buf);

        assert!(!buffer_text(&buf).contains('%'));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let session = Session::new(&DEFAULT_PRESETS).unwrap();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        SessionView::new(&session, true).render(area, &mut buf);
    }
}
