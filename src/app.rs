//! Dashboard application state.
//!
//! [`Dashboard`] owns the task store, the analysis gateway, the active tab,
//! and the last-fetched view of every analysis — there is no ambient
//! global state. All visible transitions (loading indicator, error banner,
//! transient notice, which panels hold data) are fields here; the TUI and
//! the CLI render from this state and never talk to the gateway directly.
//!
//! Failure policy per operation:
//! - analyze / suggest: surface the error in the banner, keep no result;
//! - eisenhower: fall back to the local classifier silently;
//! - dependency-graph: surface the error AND fall back locally.
//!
//! Every operation ends with the dashboard interactive again; no failure
//! is fatal.

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::classify::{EisenhowerMatrix, build_matrix};
use crate::client::{Analysis, AnalysisGateway, Strategy, Suggestion};
use crate::graph::{DependencyGraph, build_graph, has_circular_deps};
use crate::ingest::{TaskForm, parse_bulk, validate_form};
use crate::insights::{self, InsightReport};
use crate::store::TaskStore;
use crate::task::Task;

/// The fixed set of dashboard tabs. Activating a tab triggers the
/// corresponding data load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Analyzer,
    Eisenhower,
    Dependencies,
    Insights,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Analyzer,
        Tab::Eisenhower,
        Tab::Dependencies,
        Tab::Insights,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Analyzer => "Analyzer",
            Tab::Eisenhower => "Eisenhower",
            Tab::Dependencies => "Dependencies",
            Tab::Insights => "Insights",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Where a displayed result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The analysis server.
    Remote,
    /// Computed locally after a failed remote call.
    Fallback,
    /// Static demonstration data for an empty store.
    Sample,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Remote => "remote",
            Source::Fallback => "local fallback",
            Source::Sample => "sample",
        }
    }
}

/// The matrix panel: buckets plus provenance.
#[derive(Debug, Clone)]
pub struct MatrixView {
    pub matrix: EisenhowerMatrix,
    pub source: Source,
}

/// The dependency-graph panel: graph, cycle flag, provenance.
#[derive(Debug, Clone)]
pub struct GraphView {
    pub graph: DependencyGraph,
    pub has_circular_deps: bool,
    pub source: Source,
}

/// All dashboard state, with every mutation going through a method.
pub struct Dashboard {
    store: TaskStore,
    gateway: AnalysisGateway,
    strategy: Strategy,
    active_tab: Tab,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    analysis: Option<Analysis>,
    suggestions: Option<Vec<Suggestion>>,
    matrix: Option<MatrixView>,
    graph: Option<GraphView>,
}

impl Dashboard {
    pub fn new(store: TaskStore, gateway: AnalysisGateway, strategy: Strategy) -> Self {
        Self {
            store,
            gateway,
            strategy,
            active_tab: Tab::Analyzer,
            loading: false,
            error: None,
            notice: None,
            analysis: None,
            suggestions: None,
            matrix: None,
            graph: None,
        }
    }

    // -- accessors ----------------------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task_count(&self) -> usize {
        self.store.len()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    pub fn server_url(&self) -> &str {
        self.gateway.base_url()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    pub fn suggestions(&self) -> Option<&[Suggestion]> {
        self.suggestions.as_deref()
    }

    pub fn matrix(&self) -> Option<&MatrixView> {
        self.matrix.as_ref()
    }

    pub fn graph(&self) -> Option<&GraphView> {
        self.graph.as_ref()
    }

    /// Compute the insights view for today's store. Always local.
    pub fn insights(&self) -> InsightReport {
        insights::compute(self.store.tasks(), today())
    }

    // -- banners ------------------------------------------------------------

    /// Mark a request as in flight so the loading indicator shows before a
    /// blocking call starts. Every operation clears it again on completion.
    pub fn begin_request(&mut self) {
        self.loading = true;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Surface a presentation-layer failure (e.g. an unreadable bulk file)
    /// in the same banner validation failures use.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Show a transient informational message.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    fn done(&mut self) {
        self.loading = false;
    }

    // -- store mutations ----------------------------------------------------

    /// Validate and append a single task from the form. Rejections surface
    /// in the banner and leave the store untouched.
    pub fn add_task(&mut self, form: &TaskForm) {
        self.notice = None;
        match validate_form(form) {
            Ok(fields) => {
                let id = self.store.add(fields);
                self.error = None;
                self.notice = Some(format!("Added task {id}"));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Parse a bulk JSON document and replace the whole store with it.
    pub fn load_bulk(&mut self, text: &str) {
        self.notice = None;
        match parse_bulk(text) {
            Ok(entries) => {
                let count = self.store.load_bulk(entries);
                self.error = None;
                self.notice = Some(format!("Loaded {count} tasks successfully!"));
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Remove every task matching the id.
    pub fn remove_task(&mut self, id: &str) {
        self.notice = None;
        let removed = self.store.remove(id);
        if removed == 0 {
            self.error = Some(format!("No task with id \"{id}\""));
        } else {
            self.notice = Some(format!("Removed {removed} task(s)"));
        }
    }

    /// Drop every task, reset the id counter, and hide stale results.
    pub fn clear_tasks(&mut self) {
        self.notice = None;
        self.store.clear();
        self.analysis = None;
        self.suggestions = None;
    }

    // -- tabs ---------------------------------------------------------------

    /// Set the active tab without triggering its load. The TUI uses this
    /// so it can paint a loading frame before the blocking refresh.
    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Exclusive tab selection plus the activation side effect: the matrix
    /// and graph tabs refresh their data on entry.
    pub fn activate_tab(&mut self, tab: Tab) {
        self.set_tab(tab);
        match tab {
            Tab::Eisenhower => self.refresh_matrix(),
            Tab::Dependencies => self.refresh_graph(),
            Tab::Analyzer | Tab::Insights => {}
        }
    }

    // -- analysis operations ------------------------------------------------

    /// Score the store remotely. No local fallback: a failure is surfaced
    /// and the results panel stays empty.
    pub fn analyze(&mut self) {
        self.notice = None;
        if self.store.is_empty() {
            self.fail("Please add some tasks first".into());
            return;
        }
        self.loading = true;
        self.error = None;
        self.analysis = None;
        self.suggestions = None;

        match self.gateway.analyze(self.store.tasks(), self.strategy) {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                self.done();
            }
            Err(e) => self.fail(format!("Analysis failed: {e}")),
        }
    }

    /// Fetch ranked suggestions. No local fallback.
    pub fn suggest(&mut self) {
        self.notice = None;
        self.loading = true;
        self.error = None;
        self.analysis = None;
        self.suggestions = None;

        match self.gateway.suggest() {
            Ok(suggestions) => {
                self.suggestions = Some(suggestions);
                self.done();
            }
            Err(e) => self.fail(format!("Failed to get suggestions: {e}")),
        }
    }

    /// Load the Eisenhower matrix. An empty store shows the static sample;
    /// any remote failure silently falls back to the local classifier so
    /// the user always sees a matrix.
    pub fn refresh_matrix(&mut self) {
        self.notice = None;
        if self.store.is_empty() {
            self.matrix = Some(MatrixView {
                matrix: EisenhowerMatrix::sample(today()),
                source: Source::Sample,
            });
            self.done();
            return;
        }
        self.loading = true;

        let view = match self.gateway.eisenhower() {
            Ok(matrix) => MatrixView {
                matrix,
                source: Source::Remote,
            },
            Err(e) => {
                warn!(error = %e, "eisenhower request failed, classifying locally");
                MatrixView {
                    matrix: build_matrix(self.store.tasks(), today()),
                    source: Source::Fallback,
                }
            }
        };
        self.matrix = Some(view);
        self.done();
    }

    /// Load the dependency graph. A remote failure is surfaced in the
    /// banner and the graph is rebuilt locally, cycle check included.
    pub fn refresh_graph(&mut self) {
        self.notice = None;
        if self.store.is_empty() {
            self.fail("Please add tasks to generate dependency graph".into());
            return;
        }
        self.loading = true;

        match self.gateway.dependency_graph(self.store.tasks()) {
            Ok(result) => {
                self.graph = Some(GraphView {
                    graph: result.graph,
                    has_circular_deps: result.has_circular_deps,
                    source: Source::Remote,
                });
                self.done();
            }
            Err(e) => {
                warn!(error = %e, "dependency-graph request failed, building locally");
                self.graph = Some(GraphView {
                    graph: build_graph(self.store.tasks()),
                    has_circular_deps: has_circular_deps(self.store.tasks()),
                    source: Source::Fallback,
                });
                self.fail(format!("Graph generation failed: {e}"));
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::sample_tasks;

    /// Nothing listens on port 1; every request fails at the transport
    /// layer, which is exactly what the fallback paths need.
    fn dead_gateway() -> AnalysisGateway {
        AnalysisGateway::new("http://127.0.0.1:1")
    }

    fn dashboard_with_samples() -> Dashboard {
        let store = TaskStore::with_tasks(sample_tasks(today()));
        Dashboard::new(store, dead_gateway(), Strategy::SmartBalance)
    }

    fn empty_dashboard() -> Dashboard {
        Dashboard::new(TaskStore::new(), dead_gateway(), Strategy::SmartBalance)
    }

    #[test]
    fn tabs_cycle_in_order() {
        assert_eq!(Tab::Analyzer.next(), Tab::Eisenhower);
        assert_eq!(Tab::Insights.next(), Tab::Analyzer);
        assert_eq!(Tab::Analyzer.prev(), Tab::Insights);
    }

    #[test]
    fn analyze_on_empty_store_sets_banner() {
        let mut dash = empty_dashboard();
        dash.analyze();
        assert_eq!(dash.error(), Some("Please add some tasks first"));
        assert!(dash.analysis().is_none());
        assert!(!dash.loading());
    }

    #[test]
    fn analyze_failure_surfaces_error_without_fallback() {
        let mut dash = dashboard_with_samples();
        dash.analyze();
        let error = dash.error().expect("banner should be set");
        assert!(error.starts_with("Analysis failed:"));
        assert!(dash.analysis().is_none());
        assert!(!dash.loading());
    }

    #[test]
    fn suggest_failure_surfaces_error() {
        let mut dash = dashboard_with_samples();
        dash.suggest();
        assert!(dash.error().unwrap().starts_with("Failed to get suggestions:"));
        assert!(dash.suggestions().is_none());
    }

    #[test]
    fn matrix_on_empty_store_shows_sample() {
        let mut dash = empty_dashboard();
        dash.refresh_matrix();
        let view = dash.matrix().expect("matrix should be set");
        assert_eq!(view.source, Source::Sample);
        assert_eq!(view.matrix.total(), 8);
        assert!(dash.error().is_none());
    }

    #[test]
    fn matrix_failure_falls_back_silently() {
        let mut dash = dashboard_with_samples();
        dash.refresh_matrix();
        let view = dash.matrix().expect("matrix should be set");
        assert_eq!(view.source, Source::Fallback);
        assert_eq!(view.matrix.total(), dash.task_count());
        // Silent: the banner stays clean on the matrix path.
        assert!(dash.error().is_none());
        assert!(!dash.loading());
    }

    #[test]
    fn graph_on_empty_store_sets_banner() {
        let mut dash = empty_dashboard();
        dash.refresh_graph();
        assert!(dash.graph().is_none());
        assert_eq!(
            dash.error(),
            Some("Please add tasks to generate dependency graph")
        );
    }

    #[test]
    fn graph_failure_surfaces_error_and_falls_back() {
        let mut dash = dashboard_with_samples();
        dash.refresh_graph();
        // Both: the banner is set and the fallback graph is shown.
        assert!(dash.error().unwrap().starts_with("Graph generation failed:"));
        let view = dash.graph().expect("fallback graph should be set");
        assert_eq!(view.source, Source::Fallback);
        assert_eq!(view.graph.nodes.len(), dash.task_count());
        assert!(!view.has_circular_deps);
    }

    #[test]
    fn graph_fallback_detects_cycles_locally() {
        let mut dash = empty_dashboard();
        dash.load_bulk(
            r#"[
                {"id":"1","title":"a","due_date":"2026-01-01","estimated_hours":1,"importance":5,"dependencies":["2"]},
                {"id":"2","title":"b","due_date":"2026-01-01","estimated_hours":1,"importance":5,"dependencies":["1"]}
            ]"#,
        );
        dash.refresh_graph();
        assert!(dash.graph().unwrap().has_circular_deps);
    }

    #[test]
    fn activating_tabs_triggers_loads() {
        let mut dash = empty_dashboard();
        dash.activate_tab(Tab::Eisenhower);
        assert_eq!(dash.active_tab(), Tab::Eisenhower);
        assert!(matches!(
            dash.matrix().map(|v| v.source),
            Some(Source::Sample)
        ));

        let mut dash = dashboard_with_samples();
        dash.activate_tab(Tab::Dependencies);
        assert!(dash.graph().is_some());

        // Analyzer and insights activation has no load side effect.
        let mut dash = empty_dashboard();
        dash.activate_tab(Tab::Insights);
        assert!(dash.error().is_none());
    }

    #[test]
    fn add_task_rejection_leaves_store_unchanged() {
        let mut dash = empty_dashboard();
        let form = TaskForm {
            title: "A".into(),
            due_date: "2026-03-01".into(),
            estimated_hours: "2".into(),
            importance: "11".into(),
            dependencies: String::new(),
        };
        dash.add_task(&form);
        assert_eq!(dash.task_count(), 0);
        assert!(dash.error().unwrap().contains("between 1 and 10"));
    }

    #[test]
    fn add_task_success_clears_banner() {
        let mut dash = empty_dashboard();
        dash.remove_task("7"); // sets an error banner
        assert!(dash.error().is_some());
        let form = TaskForm {
            title: "A".into(),
            due_date: "2026-03-01".into(),
            estimated_hours: "2".into(),
            importance: "5".into(),
            dependencies: "1, 2".into(),
        };
        dash.add_task(&form);
        assert!(dash.error().is_none());
        assert_eq!(dash.task_count(), 1);
        assert_eq!(dash.tasks()[0].dependencies, vec!["1", "2"]);
    }

    #[test]
    fn load_bulk_success_sets_notice() {
        let mut dash = empty_dashboard();
        dash.load_bulk(r#"[{"title":"A","due_date":"2025-01-01","estimated_hours":2,"importance":5}]"#);
        assert_eq!(dash.notice(), Some("Loaded 1 tasks successfully!"));
        assert_eq!(dash.task_count(), 1);
    }

    #[test]
    fn load_bulk_failure_leaves_store_untouched() {
        let mut dash = dashboard_with_samples();
        dash.load_bulk("not json");
        assert_eq!(dash.task_count(), 6);
        assert!(dash.error().unwrap().contains("invalid JSON"));
    }

    #[test]
    fn clear_tasks_resets_ids_and_hides_results() {
        let mut dash = dashboard_with_samples();
        dash.clear_tasks();
        assert_eq!(dash.task_count(), 0);
        assert!(dash.analysis().is_none());
        assert!(dash.suggestions().is_none());
        let form = TaskForm {
            title: "First".into(),
            due_date: "2026-03-01".into(),
            estimated_hours: "1".into(),
            importance: "5".into(),
            dependencies: String::new(),
        };
        dash.add_task(&form);
        assert_eq!(dash.tasks()[0].id, "1");
    }

    #[test]
    fn dismiss_error_clears_banner() {
        let mut dash = empty_dashboard();
        dash.analyze();
        assert!(dash.error().is_some());
        dash.dismiss_error();
        assert!(dash.error().is_none());
    }
}
