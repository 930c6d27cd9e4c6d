use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use sedna_config::ArtifactId;

use crate::pipeline::SlotSpec;

/// Dependency graph over slot candidates, for traversal and analysis.
///
/// An edge `a -> c` means some slot of `a` lists `c` as a candidate.
#[derive(Debug, Clone)]
pub struct Graph {
  /// Adjacency list: artifact -> distinct candidates across all its slots.
  upstream: IndexMap<ArtifactId, Vec<ArtifactId>>,
  /// Reverse adjacency: artifact -> artifacts listing it as a candidate.
  downstream: IndexMap<ArtifactId, Vec<ArtifactId>>,
}

impl Graph {
  /// Build a graph from artifacts in declared order and their slots.
  pub fn new<'a>(
    artifacts: impl IntoIterator<Item = &'a ArtifactId>,
    slots: &HashMap<ArtifactId, SlotSpec>,
  ) -> Self {
    let mut upstream: IndexMap<ArtifactId, Vec<ArtifactId>> = IndexMap::new();
    let mut downstream: IndexMap<ArtifactId, Vec<ArtifactId>> = IndexMap::new();

    // Initialize all artifacts
    let artifacts: Vec<&ArtifactId> = artifacts.into_iter().collect();
    for artifact in &artifacts {
      upstream.entry((*artifact).clone()).or_default();
      downstream.entry((*artifact).clone()).or_default();
    }

    for artifact in artifacts {
      let Some(spec) = slots.get(artifact) else {
        continue;
      };
      for (_, candidates) in spec.iter() {
        for candidate in candidates {
          let edges = upstream.entry(artifact.clone()).or_default();
          if edges.contains(candidate) {
            continue;
          }
          edges.push(candidate.clone());
          downstream
            .entry(candidate.clone())
            .or_default()
            .push(artifact.clone());
        }
      }
    }

    Self {
      upstream,
      downstream,
    }
  }

  /// Artifacts that `artifact` may be derived from.
  pub fn upstream(&self, artifact: &str) -> &[ArtifactId] {
    self
      .upstream
      .get(artifact)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Artifacts that may be derived from `artifact`.
  pub fn downstream(&self, artifact: &str) -> &[ArtifactId] {
    self
      .downstream
      .get(artifact)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Every artifact reachable upstream from `artifact`, depth-first, each
  /// listed once. Does not include `artifact` itself.
  pub fn ancestors(&self, artifact: &str) -> Vec<ArtifactId> {
    let mut seen: HashSet<&ArtifactId> = HashSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<&ArtifactId> = self.upstream(artifact).iter().rev().collect();

    while let Some(next) = stack.pop() {
      if !seen.insert(next) {
        continue;
      }
      order.push(next.clone());
      stack.extend(self.upstream(next.as_str()).iter().rev());
    }

    order
  }

  /// Find a cycle using DFS, returned as the path that closes on itself.
  pub fn find_cycle(&self) -> Option<Vec<ArtifactId>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
      InProgress,
      Done,
    }

    fn dfs<'a>(
      node: &'a ArtifactId,
      graph: &'a Graph,
      color: &mut HashMap<&'a ArtifactId, Color>,
      path: &mut Vec<&'a ArtifactId>,
    ) -> Option<Vec<ArtifactId>> {
      color.insert(node, Color::InProgress);
      path.push(node);

      for next in graph.upstream(node.as_str()) {
        match color.get(next) {
          // Back edge = cycle
          Some(Color::InProgress) => {
            let start = path.iter().position(|n| *n == next).unwrap_or(0);
            let mut cycle: Vec<ArtifactId> = path[start..].iter().map(|n| (*n).clone()).collect();
            cycle.push(next.clone());
            return Some(cycle);
          }
          Some(Color::Done) => {}
          None => {
            if let Some(cycle) = dfs(next, graph, color, path) {
              return Some(cycle);
            }
          }
        }
      }

      path.pop();
      color.insert(node, Color::Done);
      None
    }

    let mut color = HashMap::new();
    let mut path = Vec::new();
    for node in self.upstream.keys() {
      if !color.contains_key(node)
        && let Some(cycle) = dfs(node, self, &mut color, &mut path)
      {
        return Some(cycle);
      }
    }

    None
  }
}
