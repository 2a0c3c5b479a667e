use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use deckdraft_core::ThemeKind;

use crate::app::App;
use crate::model::editor::Focus;
use crate::view::hex_color;

/// Render the theme picker pane: a colors tab with swatch rows and a
/// backgrounds tab with preview-image names.
pub fn render_in(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.ui;
    let focused = app.focus == Focus::Themes;

    let mut lines: Vec<Line> = Vec::new();

    // Tab strip
    let tab = |kind: ThemeKind, active: bool| {
        Span::styled(
            format!(" {} ", kind.label()),
            if active {
                theme.header_style()
            } else {
                Style::default().fg(theme.dim)
            },
        )
    };
    lines.push(Line::from(vec![
        tab(ThemeKind::Color, app.theme_tab == ThemeKind::Color),
        Span::raw(" "),
        tab(ThemeKind::Background, app.theme_tab == ThemeKind::Background),
    ]));
    lines.push(Line::default());

    match app.theme_tab {
        ThemeKind::Color => {
            for (i, color_theme) in app.catalog.colors.iter().enumerate() {
                let selected = app
                    .selected_theme
                    .as_ref()
                    .is_some_and(|s| s.kind == ThemeKind::Color && s.name == color_theme.name);
                let under_cursor = focused && i == app.theme_cursor;

                let mut spans = vec![Span::styled(
                    if selected { "\u{2713} " } else { "  " },
                    Style::default().fg(theme.ok),
                )];
                // Swatches: primary / secondary / text colors.
                for hex in [
                    &color_theme.primary_color,
                    &color_theme.secondary_color,
                    &color_theme.text_color,
                ] {
                    let style = match hex_color(hex) {
                        Some(color) => Style::default().fg(color),
                        None => Style::default().fg(theme.dim),
                    };
                    spans.push(Span::styled("\u{25A0}", style));
                }
                spans.push(Span::styled(
                    format!(" {}", color_theme.display_name),
                    row_style(app, under_cursor, selected),
                ));
                lines.push(Line::from(spans));
            }
        }
        ThemeKind::Background => {
            for (i, background) in app.catalog.backgrounds.iter().enumerate() {
                let selected = app
                    .selected_theme
                    .as_ref()
                    .is_some_and(|s| s.kind == ThemeKind::Background && s.name == background.name);
                let under_cursor = focused && i == app.theme_cursor;

                lines.push(Line::from(vec![
                    Span::styled(
                        if selected { "\u{2713} " } else { "  " },
                        Style::default().fg(theme.ok),
                    ),
                    Span::styled(
                        background.display_name.clone(),
                        row_style(app, under_cursor, selected),
                    ),
                    Span::styled(
                        format!("  ({})", background.preview_image),
                        Style::default().fg(theme.dim),
                    ),
                ]));
            }
        }
    }

    lines.push(Line::default());
    if app.selected_theme.is_none() {
        lines.push(Line::from(Span::styled(
            "Pick a theme to enable G",
            Style::default().fg(theme.warn),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "G generates the presentation",
            Style::default().fg(theme.dim),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(theme.active)
        } else {
            theme.border_style()
        })
        .title(" Theme ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn row_style(app: &App, under_cursor: bool, selected: bool) -> Style {
    if under_cursor {
        app.ui.highlight_style()
    } else if selected {
        Style::default()
            .fg(app.ui.text)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.ui.text)
    }
}
