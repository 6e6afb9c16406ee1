//! Bucket registry.
//!
//! The registry owns the module's dependency buckets and answers two questions for the
//! rest of the crate: "which bucket has this name" and "which buckets does this bucket
//! inherit from". Resolution only ever reads from it.
//!
//! [`InMemoryRegistry`] is the concrete registry, built through [`RegistryBuilder`]:
//!
//! ```rust
//! use ideadeps_cli::models::Declaration;
//! use ideadeps_cli::registry::{BucketRegistry, RegistryBuilder};
//!
//! let registry = RegistryBuilder::new()
//!     .bucket("implementation", Vec::<String>::new(), vec![Declaration::Project(":core".into())])
//!     .bucket("compileClasspath", ["implementation"], vec![])
//!     .snapshot("frozen", "compileClasspath")
//!     .build()
//!     .unwrap();
//!
//! let compile = registry.find_bucket("compileClasspath").unwrap();
//! let names: Vec<_> = registry.hierarchy(compile.id).iter().map(|b| b.name.as_str()).collect();
//! assert_eq!(names, ["compileClasspath", "implementation"]);
//! ```
//!
//! Hierarchies are validated when the registry is built: unknown parents and cycles are
//! rejected with [`IdeDepsError::UnknownBucket`] and [`IdeDepsError::CircularBucketHierarchy`].

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use strsim::levenshtein;

use crate::core::IdeDepsError;
use crate::models::{Bucket, BucketId, Declaration};

/// Maximum Levenshtein distance, as a percentage of the name length, for "did you mean".
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Read-only view of a module's buckets.
pub trait BucketRegistry {
    /// Look a bucket up by name.
    fn find_bucket(&self, name: &str) -> Option<&Bucket>;

    /// Look a bucket up by id.
    fn bucket(&self, id: BucketId) -> Option<&Bucket>;

    /// All buckets in registration order.
    fn buckets(&self) -> Vec<&Bucket>;

    /// The bucket followed by every bucket it inherits from, depth-first in declared
    /// `extends` order, each bucket once.
    fn hierarchy(&self, id: BucketId) -> Vec<&Bucket>;
}

/// Registry holding buckets in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    buckets: Vec<Bucket>,
    by_name: HashMap<String, BucketId>,
}

impl InMemoryRegistry {
    fn index(id: BucketId) -> usize {
        id.0 as usize
    }
}

impl BucketRegistry for InMemoryRegistry {
    fn find_bucket(&self, name: &str) -> Option<&Bucket> {
        self.by_name.get(name).and_then(|id| self.bucket(*id))
    }

    fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        self.buckets.get(Self::index(id))
    }

    fn buckets(&self) -> Vec<&Bucket> {
        self.buckets.iter().collect()
    }

    fn hierarchy(&self, id: BucketId) -> Vec<&Bucket> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(bucket) = self.bucket(current) else {
                continue;
            };
            ordered.push(bucket);
            // push in reverse so the first declared parent is visited first
            for parent in bucket.extends.iter().rev() {
                if let Some(parent) = self.by_name.get(parent) {
                    stack.push(*parent);
                }
            }
        }

        ordered
    }
}

#[derive(Debug, Clone)]
enum BucketSpec {
    Declared {
        name: String,
        extends: Vec<String>,
        declarations: Vec<Declaration>,
    },
    Snapshot {
        name: String,
        of: String,
    },
}

impl BucketSpec {
    fn name(&self) -> &str {
        match self {
            BucketSpec::Declared { name, .. } | BucketSpec::Snapshot { name, .. } => name,
        }
    }

    /// Names this bucket depends on, in declared order.
    fn references(&self) -> Vec<&str> {
        match self {
            BucketSpec::Declared { extends, .. } => extends.iter().map(String::as_str).collect(),
            BucketSpec::Snapshot { of, .. } => vec![of.as_str()],
        }
    }
}

/// Builder validating bucket hierarchies before producing an [`InMemoryRegistry`].
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    specs: Vec<BucketSpec>,
}

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a bucket with its parents and own declarations.
    #[must_use]
    pub fn bucket<I, S>(
        mut self,
        name: impl Into<String>,
        extends: I,
        declarations: Vec<Declaration>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs.push(BucketSpec::Declared {
            name: name.into(),
            extends: extends.into_iter().map(Into::into).collect(),
            declarations,
        });
        self
    }

    /// Declare a detached snapshot of another bucket.
    ///
    /// The snapshot receives the flattened declarations of `of` (including inherited
    /// ones), no parents, and its own identity.
    #[must_use]
    pub fn snapshot(mut self, name: impl Into<String>, of: impl Into<String>) -> Self {
        self.specs.push(BucketSpec::Snapshot {
            name: name.into(),
            of: of.into(),
        });
        self
    }

    /// Validate the declared buckets and build the registry.
    pub fn build(self) -> Result<InMemoryRegistry, IdeDepsError> {
        let mut by_name: HashMap<String, BucketId> = HashMap::new();
        for (index, spec) in self.specs.iter().enumerate() {
            let id = BucketId(index as u32);
            if by_name.insert(spec.name().to_string(), id).is_some() {
                return Err(IdeDepsError::ConfigValidationError {
                    reason: format!("bucket '{}' is defined more than once", spec.name()),
                });
            }
        }

        for spec in &self.specs {
            for reference in spec.references() {
                if !by_name.contains_key(reference) {
                    return Err(IdeDepsError::UnknownBucket {
                        name: reference.to_string(),
                        referenced_by: spec.name().to_string(),
                        similar: similar_names(reference, by_name.keys()),
                    });
                }
            }
        }

        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..self.specs.len()).map(|i| graph.add_node(i)).collect();
        for (index, spec) in self.specs.iter().enumerate() {
            for reference in spec.references() {
                let target = by_name[reference].0 as usize;
                graph.update_edge(nodes[index], nodes[target], ());
            }
        }

        detect_cycles(&graph, &self.specs)?;

        // Edges point from child to parent; reversed topological order visits parents
        // first, so a snapshot's source is complete before it is copied.
        let order = toposort(&graph, None).map_err(|cycle| IdeDepsError::CircularBucketHierarchy {
            chain: self.specs[graph[cycle.node_id()]].name().to_string(),
        })?;

        let mut registry = InMemoryRegistry {
            buckets: Vec::with_capacity(self.specs.len()),
            by_name,
        };
        let mut slots: Vec<Option<Bucket>> = vec![None; self.specs.len()];

        for node in order.into_iter().rev() {
            let index = graph[node];
            let id = BucketId(index as u32);
            let bucket = match &self.specs[index] {
                BucketSpec::Declared {
                    name,
                    extends,
                    declarations,
                } => Bucket {
                    id,
                    name: name.clone(),
                    extends: extends.clone(),
                    declarations: declarations.clone(),
                    snapshot_of: None,
                },
                BucketSpec::Snapshot { name, of } => {
                    let source = registry.by_name[of.as_str()];
                    Bucket {
                        id,
                        name: name.clone(),
                        extends: Vec::new(),
                        declarations: flattened(&slots, &registry.by_name, source),
                        snapshot_of: Some(source),
                    }
                }
            };
            slots[index] = Some(bucket);
        }

        registry.buckets = slots.into_iter().flatten().collect();
        Ok(registry)
    }
}

/// Declarations of a bucket and everything it inherits, from partially built slots.
fn flattened(
    slots: &[Option<Bucket>],
    by_name: &HashMap<String, BucketId>,
    id: BucketId,
) -> Vec<Declaration> {
    let mut seen = HashSet::new();
    let mut declarations = Vec::new();
    let mut stack = vec![id];

    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        let Some(Some(bucket)) = slots.get(current.0 as usize) else {
            continue;
        };
        declarations.extend(bucket.declarations.iter().cloned());
        for parent in bucket.extends.iter().rev() {
            if let Some(parent) = by_name.get(parent) {
                stack.push(*parent);
            }
        }
    }

    declarations
}

fn detect_cycles(graph: &DiGraph<usize, ()>, specs: &[BucketSpec]) -> Result<(), IdeDepsError> {
    let mut colors: HashMap<NodeIndex, Color> =
        graph.node_indices().map(|node| (node, Color::White)).collect();
    let mut path: Vec<NodeIndex> = Vec::new();

    for node in graph.node_indices() {
        if colors.get(&node) == Some(&Color::White) {
            if let Some(cycle) = dfs_visit(graph, node, &mut colors, &mut path) {
                let chain = cycle
                    .iter()
                    .map(|node| specs[graph[*node]].name())
                    .collect::<Vec<_>>()
                    .join(" → ");
                return Err(IdeDepsError::CircularBucketHierarchy { chain });
            }
        }
    }

    Ok(())
}

fn dfs_visit(
    graph: &DiGraph<usize, ()>,
    node: NodeIndex,
    colors: &mut HashMap<NodeIndex, Color>,
    path: &mut Vec<NodeIndex>,
) -> Option<Vec<NodeIndex>> {
    colors.insert(node, Color::Gray);
    path.push(node);

    for neighbor in graph.neighbors(node) {
        match colors.get(&neighbor) {
            Some(Color::Gray) => {
                let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(neighbor);
                return Some(cycle);
            }
            Some(Color::White) => {
                if let Some(cycle) = dfs_visit(graph, neighbor, colors, path) {
                    return Some(cycle);
                }
            }
            _ => {}
        }
    }

    path.pop();
    colors.insert(node, Color::Black);
    None
}

/// Defined names within the similarity threshold of `target`, closest first.
pub(crate) fn similar_names<'a>(
    target: &str,
    available: impl IntoIterator<Item = &'a String>,
) -> Vec<String> {
    let mut scored: Vec<(String, usize)> =
        available.into_iter().map(|name| (name.clone(), levenshtein(target, name))).collect();
    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name)
        .collect()
}
