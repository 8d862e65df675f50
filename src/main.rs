//! taskdeck CLI: terminal task-prioritization dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use taskdeck::app::{Dashboard, Tab};
use taskdeck::classify::Quadrant;
use taskdeck::client::{AnalysisGateway, DEFAULT_SERVER, Strategy};
use taskdeck::ingest::parse_bulk;
use taskdeck::store::TaskStore;
use taskdeck::task::{Task, sample_tasks};

#[derive(Parser)]
#[command(name = "taskdeck", version, about = "Terminal task-prioritization dashboard")]
struct Cli {
    /// Base URL of the analysis server.
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Bulk JSON file to load the task list from (defaults to built-in
    /// sample tasks).
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard.
    Tui {
        /// Scoring strategy for /analyze.
        #[arg(long, value_enum, default_value_t = Strategy::SmartBalance)]
        strategy: Strategy,
    },

    /// Print the task list.
    List,

    /// Score and rank the tasks via the analysis server.
    Analyze {
        /// Scoring strategy.
        #[arg(long, value_enum, default_value_t = Strategy::SmartBalance)]
        strategy: Strategy,
    },

    /// Fetch today's ranked task suggestions.
    Suggest,

    /// Show the Eisenhower matrix (remote, with local fallback).
    Matrix,

    /// Show the dependency graph (remote, with local fallback).
    Graph,

    /// Show local productivity insights.
    Insights,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let store = build_store(cli.tasks.as_deref())?;
    let gateway = AnalysisGateway::new(&cli.server);

    match cli.command {
        Commands::Tui { strategy } => {
            let dashboard = Dashboard::new(store, gateway, strategy);
            taskdeck::tui::launch(dashboard)?;
        }

        Commands::List => {
            if store.is_empty() {
                println!("No tasks.");
            } else {
                println!("Tasks ({}):", store.len());
                for task in store.tasks() {
                    print_task(task);
                }
            }
        }

        Commands::Analyze { strategy } => {
            let analysis = gateway.analyze(store.tasks(), strategy)?;
            println!(
                "Analysis ({} tasks, strategy: {}):",
                analysis.tasks.len(),
                analysis.strategy_used
            );
            for (rank, scored) in analysis.tasks.iter().enumerate() {
                println!(
                    "  {}. \"{}\" score {:.3}",
                    rank + 1,
                    scored.task.title,
                    scored.priority_score
                );
                println!("     {}", scored.explanation);
            }
        }

        Commands::Suggest => {
            let suggestions = gateway.suggest()?;
            println!("Suggestions for today:");
            for suggestion in &suggestions {
                println!(
                    "  #{} \"{}\" score {:.3}",
                    suggestion.rank, suggestion.task, suggestion.priority_score
                );
                println!("     {}", suggestion.reason);
            }
        }

        Commands::Matrix => {
            let mut dashboard = Dashboard::new(store, gateway, Strategy::SmartBalance);
            dashboard.activate_tab(Tab::Eisenhower);
            if let Some(view) = dashboard.matrix() {
                println!("Eisenhower matrix ({}):", view.source.label());
                for quadrant in Quadrant::ALL {
                    let tasks = view.matrix.quadrant(quadrant);
                    println!("  {} ({}):", quadrant.title(), quadrant.subtitle());
                    if tasks.is_empty() {
                        println!("    (no tasks)");
                    }
                    for task in tasks {
                        println!(
                            "    \"{}\" importance {}/10, due {}",
                            task.title, task.importance, task.due_date
                        );
                    }
                }
            }
        }

        Commands::Graph => {
            let mut dashboard = Dashboard::new(store, gateway, Strategy::SmartBalance);
            dashboard.activate_tab(Tab::Dependencies);
            if let Some(error) = dashboard.error() {
                eprintln!("warning: {error}");
            }
            if let Some(view) = dashboard.graph() {
                println!(
                    "Dependency graph ({}): {} nodes, {} links",
                    view.source.label(),
                    view.graph.nodes.len(),
                    view.graph.links.len()
                );
                if view.has_circular_deps {
                    println!("  warning: circular dependencies detected");
                }
                for link in &view.graph.links {
                    let source = view.graph.node_name(&link.source).unwrap_or(&link.source);
                    let target = view.graph.node_name(&link.target).unwrap_or(&link.target);
                    println!("  \"{source}\" -> \"{target}\"");
                }
            }
        }

        Commands::Insights => {
            let dashboard = Dashboard::new(store, gateway, Strategy::SmartBalance);
            let report = dashboard.insights();
            println!("Insights ({} tasks):", report.total_tasks);
            println!("  total workload:     {} hours", report.total_hours);
            println!(
                "  estimated days:     {:.1}",
                report.estimated_completion_days
            );
            println!("  average importance: {:.1}/10", report.avg_importance);
            println!("  urgent tasks:       {}", report.urgent_tasks);
            println!("  high importance:    {}", report.high_importance_tasks);
            println!("  workload intensity: {}", report.workload_intensity());
            println!("  {}", report.focus_advice());
        }
    }

    Ok(())
}

/// Load the store from a bulk JSON file, or seed it with the samples.
fn build_store(tasks_file: Option<&std::path::Path>) -> Result<TaskStore> {
    match tasks_file {
        Some(path) => {
            let text = std::fs::read_to_string(path).into_diagnostic()?;
            let entries = parse_bulk(&text)?;
            let mut store = TaskStore::new();
            store.load_bulk(entries);
            Ok(store)
        }
        None => Ok(TaskStore::with_tasks(sample_tasks(
            chrono::Local::now().date_naive(),
        ))),
    }
}

fn print_task(task: &Task) {
    let deps = if task.dependencies.is_empty() {
        "none".to_string()
    } else {
        task.dependencies.join(", ")
    };
    println!("  {} \"{}\"", task.id, task.title);
    println!(
        "     due {} | {}h | importance {}/10 | deps: {deps}",
        task.due_date, task.estimated_hours, task.importance
    );
}
