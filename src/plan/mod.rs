//! Fetch plan construction.
//!
//! The builder merges asset references from any number of graphs into one
//! deduplicated, repository-grouped plan. Everything is explicitly sorted,
//! so the same input set always yields a byte-identical plan regardless of
//! the order graphs were processed in.

use crate::assets::{AssetReference, AssetRole, LoaderRegistry, extract_assets};
use crate::graph::WorkflowGraph;
use crate::resolve::{OriginKind, Resolver, SourceCandidate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

pub mod artifact;

pub use artifact::AnalysisArtifact;

/// One file to request from a resolved repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub filename: String,
    pub kind: OriginKind,
    /// Destination category the transfer client stages the file into.
    pub category: AssetRole,
}

/// All files wanted from one repository, fetchable as a single batched
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoBatch {
    pub repo: String,
    pub requests: Vec<FetchRequest>,
}

/// An asset no rule could resolve; kept by name for manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualFetch {
    pub filename: String,
    pub search_term: String,
    pub hint: Option<String>,
    pub category: AssetRole,
}

/// The ordered, deduplicated fetch plan.
///
/// Unresolved assets live in their own partition rather than blocking the
/// resolvable part of the plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchPlan {
    pub batches: Vec<RepoBatch>,
    pub manual: Vec<ManualFetch>,
}

impl FetchPlan {
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() && self.manual.is_empty()
    }

    /// Total number of distinct files the plan covers, both partitions.
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(|b| b.requests.len()).sum::<usize>() + self.manual.len()
    }
}

struct PlanEntry {
    role: AssetRole,
    candidates: Vec<SourceCandidate>,
}

/// Accumulates asset references and produces a [`FetchPlan`].
pub struct FetchPlanBuilder<'a> {
    resolver: &'a Resolver,
    // Keyed by filename alone: the same physical file wanted under two roles
    // is still fetched once. BTreeMap keeps the key space sorted so the
    // output is independent of insertion order.
    entries: BTreeMap<String, PlanEntry>,
}

impl<'a> FetchPlanBuilder<'a> {
    pub fn new(resolver: &'a Resolver) -> Self {
        Self {
            resolver,
            entries: BTreeMap::new(),
        }
    }

    /// Adds one asset reference, deduplicating by filename.
    pub fn add_reference(&mut self, reference: &AssetReference) {
        match self.entries.entry(reference.filename.clone()) {
            Entry::Occupied(mut occupied) => {
                // Same file, possibly another role: the smaller role wins so
                // merged plans stay order-independent.
                let entry = occupied.get_mut();
                entry.role = entry.role.min(reference.role);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PlanEntry {
                    role: reference.role,
                    candidates: self.resolver.resolve(reference),
                });
            }
        }
    }

    pub fn add_references<'r>(&mut self, references: impl IntoIterator<Item = &'r AssetReference>) {
        for reference in references {
            self.add_reference(reference);
        }
    }

    /// Convenience: extracts a graph's references and adds them all.
    pub fn add_graph(&mut self, graph: &WorkflowGraph, loaders: &LoaderRegistry) {
        self.add_references(&extract_assets(graph, loaders));
    }

    pub fn build(self) -> FetchPlan {
        let mut resolved: Vec<(String, FetchRequest)> = Vec::new();
        let mut manual: Vec<ManualFetch> = Vec::new();

        for (filename, entry) in self.entries {
            // Candidates are ranked; the head is the best.
            let Some(best) = entry.candidates.first() else {
                continue;
            };
            match &best.repo {
                Some(repo) => resolved.push((
                    repo.clone(),
                    FetchRequest {
                        filename,
                        kind: best.kind,
                        category: entry.role,
                    },
                )),
                None => manual.push(ManualFetch {
                    search_term: best
                        .search_term
                        .clone()
                        .unwrap_or_else(|| filename.clone()),
                    hint: best.hint.clone(),
                    category: entry.role,
                    filename,
                }),
            }
        }

        // Requests arrive filename-sorted from the BTreeMap; grouping by
        // repository and sorting the groups keeps the plan byte-stable.
        let batches = resolved
            .into_iter()
            .into_group_map()
            .into_iter()
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .map(|(repo, requests)| RepoBatch { repo, requests })
            .collect();

        FetchPlan { batches, manual }
    }
}
