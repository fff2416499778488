use crate::app::{App, Focus, View};
use crate::braille::BrailleCanvas;
use crate::data::DatasetOrigin;
use crate::map::{render_silhouette, MapLayers};
use crate::model::{format_index, EnrichedRecord, Summary, NOT_AVAILABLE};
use crate::report::{self, BarTone, DetailReport, Difficulty, IndexBand};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

const ACCENT: Color = Color::Rgb(0xef, 0x44, 0x44);
const MUTED: Color = Color::DarkGray;

/// Screen regions; the same split is used for drawing and for mouse hit tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub header: Rect,
    pub stats: [Rect; 4],
    /// Everything between stats and footer
    pub body: Rect,
    /// Map panel, left part of the body
    pub main: Rect,
    pub top: Rect,
    pub bottom: Rect,
    pub footer: Rect,
}

impl Panels {
    /// Map drawing area inside the panel border
    pub fn map_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.main)
    }
}

pub fn panels(area: Rect) -> Panels {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Stats
            Constraint::Min(6),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let stats = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[2]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);

    Panels {
        header: rows[0],
        stats: [stats[0], stats[1], stats[2], stats[3]],
        body: rows[2],
        main: body[0],
        top: side[0],
        bottom: side[1],
        footer: rows[3],
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn band_color(band: IndexBand) -> Color {
    match band {
        IndexBand::Bearable => Color::Rgb(0xfb, 0xbf, 0x24),
        IndexBand::Strained => Color::Rgb(0xf5, 0x9e, 0x0b),
        IndexBand::Hard => Color::Rgb(0xf8, 0x71, 0x71),
        IndexBand::Crushing => Color::Rgb(0xdc, 0x26, 0x26),
    }
}

fn difficulty_color(d: Difficulty) -> Color {
    match d {
        Difficulty::Extreme => Color::Rgb(0xfb, 0x92, 0x3c),
        Difficulty::Hardcore => Color::Rgb(0xf8, 0x71, 0x71),
        Difficulty::Unlivable => Color::Rgb(0xfc, 0xa5, 0xa5),
    }
}

fn panel<'a>(title: String, focused: bool) -> Block<'a> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let p = panels(frame.area());

    render_header(frame, app, p.header);
    render_stats(frame, app, &p.stats);
    match &app.view {
        View::Overview => {
            render_map(frame, app, p.main);
            render_list(frame, app, p.top, Focus::Top);
            render_list(frame, app, p.bottom, Focus::Bottom);
        }
        View::Detail(_) => match app.selected_record() {
            Some(record) => render_detail(frame, app, record, p.body),
            None => render_map(frame, app, p.main),
        },
    }
    render_status_bar(frame, app, p.footer);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let l = &app.localizer;
    let mut title = vec![
        Span::styled(
            format!(" {} ", l.t("header.title")),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{}]", l.language().code()), Style::default().fg(MUTED)),
    ];
    if app.origin == Some(DatasetOrigin::Fallback) {
        title.push(Span::styled(" (fallback)", Style::default().fg(Color::Yellow)));
    }
    let lines = vec![
        Line::from(title),
        Line::from(Span::styled(format!(" {}", l.t("header.subtitle")), Style::default().fg(MUTED))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn standing_text(summary: Option<&Summary>, best: bool) -> String {
    let standing = summary.and_then(|s| if best { s.best.as_ref() } else { s.worst.as_ref() });
    match standing {
        Some(s) => format!("{} {:.2}", s.name, s.real_index),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn render_stats(frame: &mut Frame, app: &App, areas: &[Rect; 4]) {
    let l = &app.localizer;
    let summary = app.dataset.as_ref().map(|d| d.ranked().summary());
    let cards = [
        (
            l.t("stats.provinces"),
            summary.map(|s| s.count.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (l.t("stats.bestSurvival"), standing_text(summary, true)),
        (l.t("stats.worstSurvival"), standing_text(summary, false)),
        (l.t("stats.avgIndex"), format_index(summary.and_then(|s| s.mean_index))),
    ];
    for ((label, value), area) in cards.into_iter().zip(areas) {
        let widget = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(panel(label.to_string(), false));
        frame.render_widget(widget, *area);
    }
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let l = &app.localizer;
    let block = panel(l.t("map.realityMode").to_string(), app.focus == Focus::Map);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.is_map_ready() {
        let text = format!("{} {}", app.spinner(), l.t("map.loading"));
        let y = inner.y + inner.height / 2;
        let loading = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(ACCENT))))
            .alignment(Alignment::Center);
        frame.render_widget(loading, Rect::new(inner.x, y, inner.width, 1.min(inner.height)));
        return;
    }

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app.map_renderer.render(
        inner.width as usize,
        inner.height as usize,
        &viewport,
        &app.options,
        app.selected_canonical(),
    );

    let visual_map = app.options.visual_map;
    let band_colors = (0..layers.bands.len())
        .map(|b| rgb(visual_map.band_color(b)))
        .collect();
    let legend = Line::from(
        std::iter::once(Span::styled(format!(" {} ", l.t("map.vmCrushing")), Style::default().fg(MUTED)))
            .chain((0..visual_map.bands).map(|b| Span::styled("█", Style::default().fg(rgb(visual_map.band_color(b))))))
            .chain(std::iter::once(Span::styled(format!(" {} ", l.t("map.vmHard")), Style::default().fg(MUTED))))
            .collect::<Vec<_>>(),
    );

    frame.render_widget(
        MapWidget {
            layers,
            band_colors,
            show_outlines: app.map_renderer.settings.show_outlines,
        },
        inner,
    );

    if inner.height > 0 {
        let legend_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        frame.render_widget(Paragraph::new(legend), legend_area);
    }

    if let (Some(entry), Some((col, row))) = (app.hovered_entry(), app.mouse_pos) {
        let lines: Vec<Line> = report::tooltip(entry, l).into_iter().map(Line::from).collect();
        let width = 44.min(inner.width);
        let height = (lines.len() as u16 + 2).min(inner.height);
        let x = (col + 2).min((inner.x + inner.width).saturating_sub(width));
        let y = (row + 1).min((inner.y + inner.height).saturating_sub(height));
        let card = Rect::new(x, y, width, height);
        frame.render_widget(Clear, card);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(panel(entry.canonical_name.clone(), true)),
            card,
        );
    }
}

/// Custom widget that renders the colored braille layers with labels overlaid
struct MapWidget {
    layers: MapLayers,
    band_colors: Vec<Color>,
    show_outlines: bool,
}

/// Render a braille canvas layer with a specific color
fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
    for (row_idx, row_str) in canvas.rows().enumerate() {
        if row_idx >= area.height as usize {
            break;
        }
        let y = area.y + row_idx as u16;

        for (col_idx, ch) in row_str.chars().enumerate() {
            if col_idx >= area.width as usize {
                break;
            }
            // Skip empty braille characters (U+2800)
            if ch == '\u{2800}' {
                continue;
            }
            let x = area.x + col_idx as u16;
            buf[(x, y)].set_char(ch).set_fg(color);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: unmatched fills, band fills, borders, selection
        render_layer(&self.layers.unmatched, Color::Rgb(0x3f, 0x3f, 0x46), area, buf);
        for (canvas, color) in self.layers.bands.iter().zip(&self.band_colors) {
            render_layer(canvas, *color, area, buf);
        }
        if self.show_outlines {
            render_layer(&self.layers.outlines, Color::Rgb(0x52, 0x52, 0x5b), area, buf);
        }
        render_layer(&self.layers.highlight, Color::White, area, buf);

        let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        for (lx, ly, text) in &self.layers.labels {
            if *ly >= area.height || *lx >= area.width {
                continue;
            }
            let max_len = (area.width - *lx) as usize;
            buf.set_stringn(area.x + *lx, area.y + *ly, text, max_len, label_style);
        }
    }
}

fn list_line(rank: usize, record: &EnrichedRecord, selected: bool) -> Line<'static> {
    let color = band_color(IndexBand::for_index(record.real_index));
    let mut style = Style::default().fg(color);
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![
        Span::styled(format!("{rank:>2}. "), Style::default().fg(MUTED)),
        Span::styled(format!("{:<8}", record.name), style),
        Span::styled(format!(" {:.2}", record.real_index), style.add_modifier(Modifier::BOLD)),
    ])
}

fn render_list(frame: &mut Frame, app: &App, area: Rect, which: Focus) {
    let l = &app.localizer;
    let focused = app.focus == which;
    let (title, lines): (&str, Vec<Line>) = match which {
        Focus::Bottom => (
            l.t("sidebar.worstSurvival"),
            app.bottom_list()
                .into_iter()
                .enumerate()
                .map(|(i, r)| list_line(i + 1, r, focused && i == app.bottom_cursor))
                .collect(),
        ),
        _ => (
            l.t("sidebar.bestSurvival"),
            app.top_list()
                .iter()
                .enumerate()
                .map(|(i, r)| list_line(i + 1, r, focused && i == app.top_cursor))
                .collect(),
        ),
    };
    frame.render_widget(Paragraph::new(lines).block(panel(title.to_string(), focused)), area);
}

fn section(title: String, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {title} ──"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn render_detail(frame: &mut Frame, app: &App, record: &EnrichedRecord, area: Rect) {
    let l = &app.localizer;
    let report = DetailReport::new(record);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    // Left: identity
    let left = panel(l.t("detail.backButton").to_string(), false);
    let left_inner = left.inner(halves[0]);
    frame.render_widget(left, halves[0]);

    let identity = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(7)])
        .split(left_inner);

    match app.selected_shape() {
        Some(shape) => {
            let silhouette = identity[0];
            let (fill, outline) =
                render_silhouette(&shape.rings, silhouette.width as usize, silhouette.height as usize);
            let buf = frame.buffer_mut();
            render_layer(&fill, Color::Rgb(0x7f, 0x1d, 0x1d), silhouette, buf);
            render_layer(&outline, ACCENT, silhouette, buf);
        }
        None => {
            let spinner = Paragraph::new(app.spinner().to_string())
                .style(Style::default().fg(ACCENT))
                .alignment(Alignment::Center);
            frame.render_widget(spinner, identity[0]);
        }
    }

    let difficulty = report.difficulty();
    let identity_lines = vec![
        Line::from(Span::styled(
            record.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(l.t("detail.realityIndex"), Style::default().fg(MUTED))),
        Line::from(Span::styled(
            report::format_money(record.real_index),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            l.t(difficulty.label_key()),
            Style::default().fg(difficulty_color(difficulty)).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{} ", l.t("detail.realityWage")), Style::default().fg(MUTED)),
            Span::styled(
                format!("¥{}/hr", report.real_wage_text()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(identity_lines).alignment(Alignment::Center),
        identity[1],
    );

    // Right: the report
    let wage = report.real_wage_text();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("▮ ", Style::default().fg(ACCENT)),
            Span::styled(
                l.t("detail.survivalReport"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(l.t_with("detail.basedOn", &[("wage", &wage)]), Style::default().fg(MUTED))),
        Line::default(),
        section(l.t_with("section.survivalCombo", &[("wage", &wage)]), ACCENT),
    ];

    let items = report.receipt_items(l);
    let mut receipt = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            receipt.push(Span::styled(" + ", Style::default().fg(ACCENT)));
        }
        receipt.push(Span::styled(
            format!("{} {}", item.label, item.quantity),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        receipt.push(Span::styled(format!(" ({})", item.spend), Style::default().fg(MUTED)));
    }
    lines.push(Line::from(receipt));
    lines.push(Line::from(Span::styled(report.receipt_total(l), Style::default().fg(MUTED))));
    lines.push(Line::default());

    lines.push(section(l.t("section.timeCost").to_string(), Color::Rgb(0xfb, 0x92, 0x3c)));
    for bar in report.time_costs(l) {
        let color = match bar.tone() {
            BarTone::Severe => Color::Rgb(0x99, 0x1b, 0x1b),
            BarTone::Elevated => Color::Rgb(0xdc, 0x26, 0x26),
            BarTone::Mild => Color::Rgb(0xf5, 0x9e, 0x0b),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", bar.label), Style::default().fg(Color::Gray)),
            Span::styled(bar.display.clone(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(bar.text_bar(30), Style::default().fg(color))));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", l.t("time.mealsPerDay")), Style::default().fg(MUTED)),
        Span::styled(report.meals_per_day_text(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", l.t("time.workDay")), Style::default().fg(MUTED)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{}: ", l.t("time.rentPercent")), Style::default().fg(MUTED)),
        Span::styled(report.rent_percent_text(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", l.t("time.monthlyIncome")), Style::default().fg(MUTED)),
    ]));
    lines.push(Line::from(Span::styled(l.t("time.regionalNote"), Style::default().fg(MUTED))));
    lines.push(Line::default());

    lines.push(section(l.t("section.finePrint").to_string(), Color::Gray));
    lines.push(Line::from(Span::styled(report.fine_print(l), Style::default().fg(Color::Gray))));
    lines.push(Line::from(Span::styled(
        format!("“{}”", report.verdict(l)),
        Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("● {}", report.terminal_footer(l)),
        Style::default().fg(MUTED),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel(record.name.clone(), true)),
        halves[1],
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let l = &app.localizer;
    let keys = match app.view {
        View::Overview => l.t("keys.overview"),
        View::Detail(_) => l.t("keys.detail"),
    };
    let status = Line::from(vec![
        Span::styled(" Zoom: ", Style::default().fg(MUTED)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(MUTED)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(MUTED)),
        Span::styled(keys, Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}
