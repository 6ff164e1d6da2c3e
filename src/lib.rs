//! # Tehai - Workflow Analysis and Asset Staging Engine
//!
//! **Tehai** takes the node-link graphs produced by visual generation
//! editors and answers two questions about them: *what calls does this
//! graph amount to* (a flat, backend-ready call plan) and *which model
//! files does it need, and from where* (a deduplicated, repository-grouped
//! fetch plan).
//!
//! ## Core Workflow
//!
//! The engine is format-tolerant at the edges and strict in the middle. The
//! canonical [`graph::WorkflowGraph`] model is produced either from the
//! editor's JSON export or from any custom format via the
//! [`graph::IntoGraph`] trait; everything downstream is a pure
//! transformation over that model:
//!
//! 1. **Parse**: load serialized graphs into [`graph::WorkflowGraph`],
//!    all-or-nothing, with structural validation (unique node ids, no
//!    dangling links).
//! 2. **Extract**: walk loader nodes and collect the
//!    [`assets::AssetReference`] list, in node order.
//! 3. **Resolve**: classify each referenced file into ranked
//!    [`resolve::SourceCandidate`]s (fixed catalog, filename-shape pattern,
//!    keyword heuristic, unclassified fallback).
//! 4. **Plan**: merge references across graphs into one idempotent
//!    [`plan::FetchPlan`], grouped by repository, with unresolvable files in
//!    a separate manual partition.
//! 5. **Translate**: zip widget values against the
//!    [`schema::SchemaRegistry`] and bind links to produce the
//!    [`translate::CallPlan`] a backend submission expects.
//!
//! All tables (widget schemas, loader registry, source catalog) are
//! configuration data held by the [`analyzer::Analyzer`]; adding a node
//! type is a data change, not a code change.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tehai::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let workflow_json = std::fs::read_to_string("workflows/FaceBlast.json")?;
//!
//!     let analyzer = Analyzer::builder().build();
//!     let report = analyzer.analyze([workflow_json.as_str()]);
//!
//!     for batch in &report.plan.batches {
//!         println!("from {}:", batch.repo);
//!         for request in &batch.requests {
//!             println!("  {} -> models/{}", request.filename, request.category.directory());
//!         }
//!     }
//!     for manual in &report.plan.manual {
//!         println!("needs manual resolution: {} (search '{}')", manual.filename, manual.search_term);
//!     }
//!
//!     for graph_report in &report.graphs {
//!         if let GraphReport::Analyzed { translation: Ok(call_plan), .. } = graph_report {
//!             let payload = call_plan.to_submission();
//!             println!("{}", serde_json::to_string_pretty(&payload)?);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod assets;
pub mod error;
pub mod graph;
pub mod plan;
pub mod prelude;
pub mod resolve;
pub mod schema;
pub mod translate;
