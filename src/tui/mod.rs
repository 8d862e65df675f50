//! Interactive ratatui dashboard.
//!
//! Single-threaded event loop over the [`Dashboard`] state: a tab bar,
//! per-tab body, slash-command input line, and status bar. Network
//! operations are queued as a pending op so the loop can paint one frame
//! with the loading indicator before the blocking request starts; a hung
//! request therefore leaves the indicator visible.

pub mod widgets;

use std::time::Duration;

use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use miette::IntoDiagnostic;

use crate::app::{Dashboard, Tab};
use crate::client::Strategy;
use crate::ingest::TaskForm;

/// A network call queued behind one loading-indicator frame.
enum PendingOp {
    Analyze,
    Suggest,
    Matrix,
    Graph,
}

/// TUI application: dashboard state plus input handling.
pub struct DeckTui {
    dashboard: Dashboard,
    input_buffer: String,
    pending: Option<PendingOp>,
    should_quit: bool,
}

impl DeckTui {
    pub fn new(mut dashboard: Dashboard) -> Self {
        dashboard.set_notice("Welcome to taskdeck. /help for commands, /quit to exit.");
        Self {
            dashboard,
            input_buffer: String::new(),
            pending: None,
            should_quit: false,
        }
    }

    /// Run the TUI event loop.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();

        loop {
            terminal
                .draw(|frame| widgets::render(frame, &self.dashboard, &self.input_buffer))
                .into_diagnostic()?;

            if self.should_quit {
                break;
            }

            // The frame above showed the loading banner; now block on the
            // queued request.
            if let Some(op) = self.pending.take() {
                self.run_pending(op);
                continue;
            }

            if event::poll(Duration::from_millis(100)).into_diagnostic()? {
                if let Event::Key(key) = event::read().into_diagnostic()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        ratatui::restore();
        Ok(())
    }

    /// Queue a network call and flip the loading indicator on.
    fn queue(&mut self, op: PendingOp) {
        self.dashboard.begin_request();
        self.pending = Some(op);
    }

    fn run_pending(&mut self, op: PendingOp) {
        match op {
            PendingOp::Analyze => self.dashboard.analyze(),
            PendingOp::Suggest => self.dashboard.suggest(),
            PendingOp::Matrix => self.dashboard.refresh_matrix(),
            PendingOp::Graph => self.dashboard.refresh_graph(),
        }
    }

    /// Exclusive tab selection; the matrix and graph tabs load on entry.
    fn switch_tab(&mut self, tab: Tab) {
        self.dashboard.set_tab(tab);
        match tab {
            Tab::Eisenhower => self.queue(PendingOp::Matrix),
            Tab::Dependencies => self.queue(PendingOp::Graph),
            Tab::Analyzer | Tab::Insights => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => {
                let input = self.input_buffer.trim().to_string();
                self.input_buffer.clear();
                if !input.is_empty() {
                    self.process_input(&input);
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.switch_tab(self.dashboard.active_tab().next()),
            KeyCode::BackTab => self.switch_tab(self.dashboard.active_tab().prev()),
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Esc => {
                // Clear what the user is most likely looking at: the
                // half-typed input first, then the error banner, then quit.
                if !self.input_buffer.is_empty() {
                    self.input_buffer.clear();
                } else if self.dashboard.error().is_some() {
                    self.dashboard.dismiss_error();
                } else {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn process_input(&mut self, input: &str) {
        let Some(cmd) = input.strip_prefix('/') else {
            self.dashboard
                .set_error(format!("Not a command: \"{input}\". Type /help for commands."));
            return;
        };

        let (name, arg) = match cmd.split_once(' ') {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd, ""),
        };

        match name {
            "quit" | "q" => {
                self.should_quit = true;
            }
            "help" | "h" => {
                self.dashboard.set_notice(
                    "Commands: /add title|due|hours|importance[|deps], /load <file>, \
                     /rm <id>, /clear, /analyze, /suggest, /strategy <name>, /quit. \
                     Tab switches views.",
                );
            }
            "add" => self.add_task(arg),
            "load" => self.load_file(arg),
            "rm" | "remove" => {
                if arg.is_empty() {
                    self.dashboard.set_error("Usage: /rm <task id>");
                } else {
                    self.dashboard.remove_task(arg);
                }
            }
            "clear" => {
                self.dashboard.clear_tasks();
                self.dashboard.set_notice("All tasks cleared");
            }
            "analyze" => {
                self.dashboard.set_tab(Tab::Analyzer);
                self.queue(PendingOp::Analyze);
            }
            "suggest" => {
                self.dashboard.set_tab(Tab::Analyzer);
                self.queue(PendingOp::Suggest);
            }
            "matrix" => self.switch_tab(Tab::Eisenhower),
            "graph" => self.switch_tab(Tab::Dependencies),
            "insights" => self.switch_tab(Tab::Insights),
            "strategy" => self.set_strategy(arg),
            _ => {
                self.dashboard
                    .set_error(format!("Unknown command: /{name}. Type /help for commands."));
            }
        }
    }

    /// `/add title | due | hours | importance [| dep1,dep2]`
    fn add_task(&mut self, arg: &str) {
        let parts: Vec<&str> = arg.split('|').map(str::trim).collect();
        if parts.len() < 4 {
            self.dashboard
                .set_error("Usage: /add title | due date | hours | importance [| deps]");
            return;
        }
        let form = TaskForm {
            title: parts[0].to_string(),
            due_date: parts[1].to_string(),
            estimated_hours: parts[2].to_string(),
            importance: parts[3].to_string(),
            dependencies: parts.get(4).copied().unwrap_or("").to_string(),
        };
        self.dashboard.add_task(&form);
    }

    fn load_file(&mut self, arg: &str) {
        if arg.is_empty() {
            self.dashboard.set_error("Usage: /load <path to bulk JSON file>");
            return;
        }
        match std::fs::read_to_string(arg) {
            Ok(text) => self.dashboard.load_bulk(&text),
            Err(e) => self
                .dashboard
                .set_error(format!("Could not read \"{arg}\": {e}")),
        }
    }

    fn set_strategy(&mut self, arg: &str) {
        if arg.is_empty() {
            self.dashboard.set_notice(format!(
                "Current strategy: {}. Use /strategy <name> to switch.",
                self.dashboard.strategy()
            ));
            return;
        }
        match Strategy::from_str(arg, true) {
            Ok(strategy) => {
                self.dashboard.set_strategy(strategy);
                self.dashboard
                    .set_notice(format!("Strategy switched to: {strategy}"));
            }
            Err(_) => {
                self.dashboard.set_error(
                    "Unknown strategy. Options: smart_balance, fastest_wins, \
                     high_impact, deadline_driven",
                );
            }
        }
    }
}

/// Launch the TUI over a prepared dashboard.
pub fn launch(dashboard: Dashboard) -> miette::Result<()> {
    DeckTui::new(dashboard).run()
}
