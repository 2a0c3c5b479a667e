use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use deckdraft_core::{ContentKind, TITLE_WORD_LIMIT};

use crate::app::App;
use crate::model::editor::{EditState, EditTarget, Focus, FormRow, form_rows};
use crate::view::truncate;

/// Render the editing surface: sidebar, slide form, theme picker, footer.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui;

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Min(8),    // body
        Constraint::Length(1), // status
        Constraint::Length(1), // footer
    ])
    .split(area);

    let header = Line::from(vec![
        Span::styled(" deckdraft ", theme.header_style()),
        Span::styled(
            format!(
                " Slide {} of {}",
                app.deck.cursor() + 1,
                app.deck.len()
            ),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            match app.selected_theme_label() {
                Some(name) => format!("  theme: {name}"),
                None => "  theme: none".to_string(),
            },
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let body = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Min(30),
        Constraint::Length(36),
    ])
    .split(chunks[1]);

    render_sidebar(f, body[0], app);
    render_form(f, body[1], app);
    crate::view::themes::render_in(f, body[2], app);

    let status_line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(if status.is_error {
                theme.error
            } else {
                theme.ok
            }),
        )),
        None => Line::default(),
    };
    f.render_widget(Paragraph::new(status_line), chunks[2]);

    let footer = Line::from(Span::styled(
        " Tab pane  \u{2191}\u{2193} move  Enter edit/select  a add  d delete  t content  x image  u upload  G generate  ? help",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), chunks[3]);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui;
    let focused = app.focus == Focus::Sidebar;

    let items: Vec<ListItem> = app
        .deck
        .slides()
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let marker = if slide.title_over_limit() { "!" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>2}{} ", i + 1, marker),
                    Style::default().fg(if slide.title_over_limit() {
                        theme.warn
                    } else {
                        theme.dim
                    }),
                ),
                Span::styled(
                    truncate(&slide.title, area.width.saturating_sub(7) as usize),
                    Style::default().fg(theme.text),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(app, Focus::Sidebar))
        .title(" Slides ");
    let mut state = ListState::default().with_selected(Some(app.deck.cursor()));
    let list = List::new(items).block(block).highlight_style(if focused {
        theme.highlight_style()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    });
    f.render_stateful_widget(list, area, &mut state);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui;
    let Some(slide) = app.deck.current() else {
        return;
    };
    let rows = form_rows(slide);
    let focused = app.focus == Focus::Form;
    let width = area.width.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let selected = focused && i == app.form_cursor;
        let row_style = if selected {
            theme.highlight_style()
        } else {
            Style::default().fg(theme.text)
        };

        match row {
            FormRow::Title => {
                lines.push(Line::from(Span::styled(
                    "Title",
                    Style::default().fg(theme.dim),
                )));
                lines.push(field_line(
                    app,
                    EditTarget::Title,
                    selected,
                    &slide.title,
                    row_style,
                    width,
                ));
                if slide.title_over_limit() {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "  title has {} words; keep it under {}",
                            slide.title_word_count(),
                            TITLE_WORD_LIMIT + 1
                        ),
                        Style::default().fg(theme.warn),
                    )));
                }
                lines.push(Line::default());
                let label = match slide.kind() {
                    ContentKind::Bullets => "Bullet points",
                    ContentKind::TextBlock => "Text",
                };
                lines.push(Line::from(Span::styled(
                    label,
                    Style::default().fg(theme.dim),
                )));
            }
            FormRow::Bullet(b) => {
                let text = slide.bullets().get(*b).map(String::as_str).unwrap_or("");
                let mut spans = vec![Span::styled(
                    format!("{:>2}. ", b + 1),
                    Style::default().fg(theme.active),
                )];
                spans.extend(field_line(app, EditTarget::Bullet(*b), selected, text, row_style, width).spans);
                lines.push(Line::from(spans));
            }
            FormRow::TextBlock => {
                lines.push(field_line(
                    app,
                    EditTarget::TextBlock,
                    selected,
                    slide.text_block(),
                    row_style,
                    width,
                ));
            }
            FormRow::Image => {
                lines.push(Line::default());
                // A broken or empty reference degrades to a placeholder;
                // it never breaks the editor.
                let filename = match slide.image_filename.as_deref() {
                    Some(name) if !name.trim().is_empty() => name.to_string(),
                    _ => "(missing image)".to_string(),
                };
                lines.push(Line::from(vec![
                    Span::styled("Image \u{25A3} ", Style::default().fg(theme.dim)),
                    Span::styled(filename, row_style),
                    Span::styled("  (x to remove)", Style::default().fg(theme.dim)),
                ]));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(app, Focus::Form))
        .title(" Slide ");
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

/// One editable field: the live edit buffer with a block cursor when this
/// field is being edited, otherwise its current value.
fn field_line(
    app: &App,
    target: EditTarget,
    selected: bool,
    value: &str,
    style: Style,
    width: usize,
) -> Line<'static> {
    if selected && let Some(edit) = editing(app, target) {
        let before = &edit.buffer[..edit.cursor];
        let after = &edit.buffer[edit.cursor..];
        return Line::from(vec![
            Span::styled(before.to_string(), style),
            Span::styled("\u{2588}", Style::default().fg(app.ui.active)),
            Span::styled(after.to_string(), style),
        ]);
    }
    let display = if value.is_empty() { "(empty)" } else { value };
    Line::from(Span::styled(truncate(display, width), style))
}

fn editing(app: &App, target: EditTarget) -> Option<&EditState> {
    app.edit.as_ref().filter(|e| e.target == target)
}

fn pane_border(app: &App, pane: Focus) -> Style {
    if app.focus == pane {
        Style::default().fg(app.ui.active)
    } else {
        app.ui.border_style()
    }
}
