//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the tehai crate so callers
//! can bring the whole working set in with a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use tehai::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow_json = std::fs::read_to_string("path/to/workflow.json")?;
//!
//! let analyzer = Analyzer::builder().build();
//! let report = analyzer.analyze([workflow_json.as_str()]);
//!
//! println!("{} files to fetch", report.plan.file_count());
//! # Ok(())
//! # }
//! ```

// Facade and batch results
pub use crate::analyzer::{Analyzer, AnalyzerBuilder, BatchReport, GraphReport};

// Graph model
pub use crate::graph::{IntoGraph, Link, Node, OutputSlot, WorkflowGraph};

// Registries and configuration tables
pub use crate::assets::{AssetReference, AssetRole, LoaderRegistry};
pub use crate::resolve::{Catalog, OriginKind, Resolver, SourceCandidate};
pub use crate::schema::{ParamSpec, SchemaRegistry};

// Planning and translation outputs
pub use crate::plan::{AnalysisArtifact, FetchPlan, FetchPlanBuilder, FetchRequest, ManualFetch, RepoBatch};
pub use crate::translate::{CallPlan, CallPlanNode, TranslateWarning, Translator, UpstreamBinding};

// Error types
pub use crate::error::{ArtifactError, GraphError, TranslateError};

// Standard library re-exports commonly used with this crate
pub use std::collections::HashMap;
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
