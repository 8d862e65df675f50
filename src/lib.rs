//! # taskdeck
//!
//! A terminal task-prioritization dashboard. Tasks live in an in-memory
//! store; a remote analysis service scores them, builds an Eisenhower
//! matrix, and constructs dependency graphs; when the service is
//! unreachable, client-side fallbacks compute equivalent results so the
//! user always sees something.
//!
//! ## Architecture
//!
//! - **Task store** (`store`): ordered in-memory collection with a
//!   monotonically increasing id counter
//! - **Ingestion** (`ingest`): form validation + schema-checked bulk JSON
//! - **Fallback classifier** (`classify`, `graph`): Eisenhower quadrants
//!   and dependency graphs computed locally
//! - **Analysis gateway** (`client`): blocking `ureq` client over the four
//!   backend endpoints
//! - **Dashboard** (`app`): explicit application state driving both the
//!   ratatui TUI (`tui`) and the one-shot CLI reports
//!
//! ## Library usage
//!
//! ```no_run
//! use taskdeck::app::{Dashboard, Tab};
//! use taskdeck::client::{AnalysisGateway, Strategy};
//! use taskdeck::store::TaskStore;
//! use taskdeck::task::sample_tasks;
//!
//! let store = TaskStore::with_tasks(sample_tasks(chrono::Local::now().date_naive()));
//! let gateway = AnalysisGateway::new("http://127.0.0.1:8000");
//! let mut dashboard = Dashboard::new(store, gateway, Strategy::SmartBalance);
//! dashboard.activate_tab(Tab::Eisenhower); // remote matrix, or the local fallback
//! ```

pub mod app;
pub mod classify;
pub mod client;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod insights;
pub mod store;
pub mod task;
pub mod tui;
