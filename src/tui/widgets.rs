//! TUI widget rendering: tab bar, per-tab body, banner, input, status bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use crate::app::{Dashboard, Tab};
use crate::classify::Quadrant;
use crate::client::{ScoredTask, Suggestion};
use crate::task::Task;

/// Main TUI layout rendering.
pub fn render(frame: &mut Frame, dashboard: &Dashboard, input: &str) {
    let [tabs_area, banner_area, body_area, input_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_tabs(frame, dashboard, tabs_area);
    render_banner(frame, dashboard, banner_area);

    match dashboard.active_tab() {
        Tab::Analyzer => render_analyzer(frame, dashboard, body_area),
        Tab::Eisenhower => render_matrix(frame, dashboard, body_area),
        Tab::Dependencies => render_dependencies(frame, dashboard, body_area),
        Tab::Insights => render_insights(frame, dashboard, body_area),
    }

    let input_widget = Paragraph::new(input)
        .block(Block::default().borders(Borders::ALL).title(" > "))
        .style(Style::default().fg(Color::White));
    frame.render_widget(input_widget, input_area);

    render_status(frame, dashboard, status_area);
}

fn render_tabs(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let titles = Tab::ALL.iter().map(|t| t.title());
    let tabs = Tabs::new(titles)
        .select(dashboard.active_tab().index())
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// One line: loading beats error beats notice.
fn render_banner(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let line = if dashboard.loading() {
        Line::from(Span::styled(
            " contacting analysis server…",
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = dashboard.error() {
        Line::from(Span::styled(
            format!(" ✗ {error} (Esc to dismiss)"),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(notice) = dashboard.notice() {
        Line::from(Span::styled(
            format!(" ✓ {notice}"),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Analyzer tab
// ---------------------------------------------------------------------------

fn render_analyzer(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let [list_area, results_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let mut lines: Vec<Line> = Vec::new();
    if dashboard.tasks().is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks added yet",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for task in dashboard.tasks() {
        lines.extend(task_lines(task));
    }
    let list = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tasks ({}) ", dashboard.task_count())),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(list, list_area);

    let results: Paragraph = if let Some(analysis) = dashboard.analysis() {
        let mut lines = Vec::new();
        for (rank, scored) in analysis.tasks.iter().enumerate() {
            lines.extend(scored_task_lines(rank + 1, scored));
        }
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Results · strategy: {} ", analysis.strategy_used)),
            )
            .wrap(Wrap { trim: false })
    } else if let Some(suggestions) = dashboard.suggestions() {
        let mut lines = Vec::new();
        for suggestion in suggestions {
            lines.extend(suggestion_lines(suggestion));
        }
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Suggestions "))
            .wrap(Wrap { trim: false })
    } else {
        Paragraph::new(Line::from(Span::styled(
            "/analyze to score tasks, /suggest for today's picks",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Results "))
    };
    frame.render_widget(results, results_area);
}

fn task_lines(task: &Task) -> Vec<Line<'static>> {
    let deps = if task.dependencies.is_empty() {
        "None".to_string()
    } else {
        task.dependencies.join(", ")
    };
    vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", task.id),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "   due {} | {}h | importance {}/10 | deps: {deps}",
                task.due_date, task.estimated_hours, task.importance
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn scored_task_lines(rank: usize, scored: &ScoredTask) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::raw(format!("{rank}. ")),
            Span::styled(
                scored.task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {:.3}", scored.priority_score),
                score_style(scored.priority_score),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", scored.explanation),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!(
                "   due {} | {}h | {}/10 | {} deps",
                scored.task.due_date,
                scored.task.estimated_hours,
                scored.task.importance,
                scored.task.dependencies.len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn suggestion_lines(suggestion: &Suggestion) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!("#{} ", suggestion.rank),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(
                suggestion.task.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {:.3}", suggestion.priority_score),
                score_style(suggestion.priority_score),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", suggestion.reason),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!(
                "   due {} | {}h | {}/10",
                suggestion.due_date, suggestion.estimated_hours, suggestion.importance
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// High scores draw the eye first.
fn score_style(score: f64) -> Style {
    if score >= 0.7 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if score >= 0.4 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    }
}

// ---------------------------------------------------------------------------
// Eisenhower tab
// ---------------------------------------------------------------------------

fn render_matrix(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let Some(view) = dashboard.matrix() else {
        let hint = Paragraph::new(Span::styled(
            "Switch to this tab again to load the matrix",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL).title(" Eisenhower Matrix "));
        frame.render_widget(hint, area);
        return;
    };

    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [q1, q2] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [q3, q4] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    for (quadrant, cell) in Quadrant::ALL.into_iter().zip([q1, q2, q3, q4]) {
        let tasks = view.matrix.quadrant(quadrant);
        let mut lines: Vec<Line> = Vec::new();
        if tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tasks",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for task in tasks {
            lines.push(Line::from(vec![
                Span::styled(
                    task.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}/10 · due {}", task.importance, task.due_date),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        let widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} · {} ", quadrant.title(), quadrant.subtitle()))
                    .title_style(quadrant_style(quadrant)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(widget, cell);
    }
}

fn quadrant_style(quadrant: Quadrant) -> Style {
    let color = match quadrant {
        Quadrant::DoFirst => Color::Red,
        Quadrant::Schedule => Color::Yellow,
        Quadrant::Delegate => Color::Blue,
        Quadrant::Eliminate => Color::DarkGray,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

// ---------------------------------------------------------------------------
// Dependencies tab
// ---------------------------------------------------------------------------

fn render_dependencies(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let Some(view) = dashboard.graph() else {
        let hint = Paragraph::new(Span::styled(
            "Add tasks, then switch to this tab to build the graph",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL).title(" Dependency Graph "));
        frame.render_widget(hint, area);
        return;
    };

    let [info_area, graph_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let mut info_lines = vec![Line::from(format!(
        "Nodes: {} | Links: {}",
        view.graph.nodes.len(),
        view.graph.links.len()
    ))];
    if view.has_circular_deps {
        info_lines.push(Line::from(Span::styled(
            "⚠ Circular dependencies detected!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    let info = Paragraph::new(info_lines)
        .block(Block::default().borders(Borders::ALL).title(" Graph Info "));
    frame.render_widget(info, info_area);

    let [nodes_area, links_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(graph_area);

    let node_lines: Vec<Line> = view
        .graph
        .nodes
        .iter()
        .map(|node| {
            Line::from(vec![
                Span::styled("● ", importance_style(node.importance)),
                Span::raw(node.name.clone()),
                Span::styled(
                    format!("  ({}/10)", node.importance),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    let nodes = Paragraph::new(node_lines)
        .block(Block::default().borders(Borders::ALL).title(" Nodes "))
        .wrap(Wrap { trim: false });
    frame.render_widget(nodes, nodes_area);

    let link_lines: Vec<Line> = if view.graph.links.is_empty() {
        vec![Line::from(Span::styled(
            "No dependencies declared",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        view.graph
            .links
            .iter()
            .map(|link| {
                let source = view
                    .graph
                    .node_name(&link.source)
                    .unwrap_or(link.source.as_str());
                let target = view
                    .graph
                    .node_name(&link.target)
                    .unwrap_or(link.target.as_str());
                Line::from(format!("{source} → {target}"))
            })
            .collect()
    };
    let links = Paragraph::new(link_lines)
        .block(Block::default().borders(Borders::ALL).title(" Depends On "))
        .wrap(Wrap { trim: false });
    frame.render_widget(links, links_area);
}

/// Node color by importance, matching the score coloring elsewhere.
fn importance_style(importance: u8) -> Style {
    if importance >= 9 {
        Style::default().fg(Color::Red)
    } else if importance >= 7 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    }
}

// ---------------------------------------------------------------------------
// Insights tab
// ---------------------------------------------------------------------------

fn render_insights(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [workload_area, tips_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [focus_area, trends_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(bottom);

    if dashboard.tasks().is_empty() {
        let placeholder = |text: &'static str, title: &'static str| {
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .block(Block::default().borders(Borders::ALL).title(title))
                .wrap(Wrap { trim: false })
        };
        frame.render_widget(
            placeholder(
                "Add tasks to see detailed workload analysis.",
                " Workload Analysis ",
            ),
            workload_area,
        );
        frame.render_widget(
            placeholder(
                "Time blocking and planning your week keep long backlogs moving.",
                " Time Optimization ",
            ),
            tips_area,
        );
        frame.render_widget(
            placeholder(
                "Recommendations appear once tasks are loaded.",
                " Focus Recommendations ",
            ),
            focus_area,
        );
        frame.render_widget(
            placeholder(
                "Add tasks to unlock workload trends.",
                " Productivity Trends ",
            ),
            trends_area,
        );
        return;
    }

    let report = dashboard.insights();

    let metric = |label: &str, value: String| {
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    };

    let workload = Paragraph::new(vec![
        metric("Total workload", format!("{} hours", report.total_hours)),
        metric(
            "Estimated days",
            format!("{:.1}", report.estimated_completion_days),
        ),
        metric(
            "Average importance",
            format!("{:.1}/10", report.avg_importance),
        ),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Workload Analysis "));
    frame.render_widget(workload, workload_area);

    let tips = Paragraph::new(vec![
        Line::from("Focus on high-impact tasks first"),
        Line::from("Batch similar tasks to reduce context switching"),
        Line::from("Schedule deep work for important tasks"),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Time Optimization "))
    .wrap(Wrap { trim: false });
    frame.render_widget(tips, tips_area);

    let focus = Paragraph::new(vec![
        Line::from(report.focus_advice()),
        metric(
            "High-importance tasks",
            report.high_importance_tasks.to_string(),
        ),
        metric("Need immediate attention", report.urgent_tasks.to_string()),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Focus Recommendations "))
    .wrap(Wrap { trim: false });
    frame.render_widget(focus, focus_area);

    let trends = Paragraph::new(vec![
        metric("Completion rate", format!("{:.0}%", report.completion_rate())),
        metric("Workload intensity", report.workload_intensity().to_string()),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Productivity Trends "));
    frame.render_widget(trends, trends_area);
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

fn render_status(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(format!(" tasks: {} ", dashboard.task_count()), dim),
        Span::raw("| "),
        Span::styled(format!("strategy: {} ", dashboard.strategy()), dim),
        Span::raw("| "),
        Span::styled(format!("server: {} ", dashboard.server_url()), dim),
    ];
    if let Some(view) = dashboard.matrix() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            format!("matrix: {} ", view.source.label()),
            dim,
        ));
    }
    if let Some(view) = dashboard.graph() {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(format!("graph: {} ", view.source.label()), dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
