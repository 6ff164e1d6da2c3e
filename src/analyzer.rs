//! The top-level analysis facade.
//!
//! An [`Analyzer`] owns the three configuration tables (widget schemas,
//! loader registry, source catalog) and drives the per-graph stages plus the
//! cross-graph fetch plan merge. All state is passed in at construction;
//! there are no process-wide globals.

use crate::assets::{AssetReference, LoaderRegistry, extract_assets};
use crate::error::{GraphError, TranslateError};
use crate::graph::WorkflowGraph;
use crate::plan::{FetchPlan, FetchPlanBuilder};
use crate::resolve::{Catalog, Resolver, SourceCandidate};
use crate::schema::SchemaRegistry;
use crate::translate::{CallPlan, Translator};

/// Outcome of analyzing one graph within a batch.
///
/// A rejected graph never aborts the batch: parsing and translation fail
/// closed per graph, and the rest of the batch proceeds.
#[derive(Debug)]
pub enum GraphReport {
    Analyzed {
        graph: WorkflowGraph,
        references: Vec<AssetReference>,
        translation: Result<CallPlan, TranslateError>,
    },
    Rejected {
        error: GraphError,
    },
}

/// The result of a batch run: one report per input graph and the merged,
/// deduplicated fetch plan across all of them.
#[derive(Debug)]
pub struct BatchReport {
    pub graphs: Vec<GraphReport>,
    pub plan: FetchPlan,
}

pub struct Analyzer {
    schemas: SchemaRegistry,
    loaders: LoaderRegistry,
    resolver: Resolver,
}

pub struct AnalyzerBuilder {
    schemas: SchemaRegistry,
    loaders: LoaderRegistry,
    catalog: Catalog,
    vendor_tokens: Option<Vec<String>>,
    keyword_tokens: Option<Vec<String>>,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            schemas: SchemaRegistry::with_defaults(),
            loaders: LoaderRegistry::with_defaults(),
            catalog: Catalog::with_defaults(),
            vendor_tokens: None,
            keyword_tokens: None,
        }
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn with_loaders(mut self, loaders: LoaderRegistry) -> Self {
        self.loaders = loaders;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_vendor_tokens(mut self, tokens: &[&str]) -> Self {
        self.vendor_tokens = Some(tokens.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_keyword_tokens(mut self, tokens: &[&str]) -> Self {
        self.keyword_tokens = Some(tokens.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(self) -> Analyzer {
        let mut resolver = Resolver::new(self.catalog);
        if let Some(tokens) = &self.vendor_tokens {
            let refs: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
            resolver = resolver.with_vendor_tokens(&refs);
        }
        if let Some(tokens) = &self.keyword_tokens {
            let refs: Vec<&str> = tokens.iter().map(|s| s.as_str()).collect();
            resolver = resolver.with_keyword_tokens(&refs);
        }
        Analyzer {
            schemas: self.schemas,
            loaders: self.loaders,
            resolver,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Starts a builder preloaded with the default tables.
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Parses one serialized graph. All-or-nothing.
    pub fn parse_graph(&self, json: &str) -> Result<WorkflowGraph, GraphError> {
        WorkflowGraph::from_json(json)
    }

    /// Extracts the asset references of one graph, in node order.
    pub fn extract(&self, graph: &WorkflowGraph) -> Vec<AssetReference> {
        extract_assets(graph, &self.loaders)
    }

    /// Resolves one asset reference into ranked source candidates.
    pub fn resolve(&self, reference: &AssetReference) -> Vec<SourceCandidate> {
        self.resolver.resolve(reference)
    }

    /// Translates one graph into a call plan.
    pub fn translate(&self, graph: &WorkflowGraph) -> Result<CallPlan, TranslateError> {
        Translator::new(&self.schemas).translate(graph)
    }

    /// Builds the merged fetch plan for a set of already-parsed graphs.
    pub fn plan<'g>(&self, graphs: impl IntoIterator<Item = &'g WorkflowGraph>) -> FetchPlan {
        let mut builder = FetchPlanBuilder::new(&self.resolver);
        for graph in graphs {
            builder.add_graph(graph, &self.loaders);
        }
        builder.build()
    }

    /// Runs the full pipeline over a batch of serialized graphs.
    ///
    /// One malformed graph rejects only itself; its report records the
    /// error and the remaining graphs are still analyzed and planned.
    pub fn analyze<'s>(&self, sources: impl IntoIterator<Item = &'s str>) -> BatchReport {
        let mut reports = Vec::new();
        let mut builder = FetchPlanBuilder::new(&self.resolver);

        for source in sources {
            match self.parse_graph(source) {
                Ok(graph) => {
                    let references = self.extract(&graph);
                    builder.add_references(&references);
                    let translation = self.translate(&graph);
                    reports.push(GraphReport::Analyzed {
                        graph,
                        references,
                        translation,
                    });
                }
                Err(error) => reports.push(GraphReport::Rejected { error }),
            }
        }

        let plan = builder.build();

        #[cfg(feature = "debug-tools")]
        self.write_debug_plan(&plan);

        BatchReport {
            graphs: reports,
            plan,
        }
    }

    #[cfg(feature = "debug-tools")]
    fn write_debug_plan(&self, plan: &FetchPlan) {
        if let Ok(text) = serde_json::to_string_pretty(plan) {
            if std::fs::create_dir_all("tmp").is_ok() {
                if let Err(e) = std::fs::write("tmp/fetch_plan.json", text) {
                    eprintln!("Warning: could not write debug plan file: {}", e);
                }
            }
        }
    }
}
