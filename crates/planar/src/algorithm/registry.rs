//! Validated, closed set of algorithms with a cached dependency order.

use std::collections::HashMap;

use tracing::debug;

use super::{builtin, Algorithm, AlgorithmDescriptor, AlgorithmName};
use crate::error::{DacError, DacResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Algorithms by name plus a topological order (dependencies first).
///
/// Immutable once built; the order is computed once and shared by every node.
#[derive(Clone, Debug)]
pub struct Registry {
    algorithms: Vec<Algorithm>,
    index: HashMap<AlgorithmName, usize>,
    order: Vec<AlgorithmName>,
}

impl Registry {
    /// Validate `algorithms` and resolve their order.
    ///
    /// Checks, in order: duplicate names, unknown dependencies, cycles. The
    /// order visits algorithms in registration order and dependencies in
    /// declared order, so it is deterministic.
    pub fn new(algorithms: Vec<Algorithm>) -> DacResult<Self> {
        let mut index = HashMap::with_capacity(algorithms.len());
        for (k, alg) in algorithms.iter().enumerate() {
            if index.insert(alg.name().clone(), k).is_some() {
                return Err(DacError::DuplicateAlgorithm {
                    name: alg.name().clone(),
                });
            }
        }
        for alg in &algorithms {
            for dep in &alg.descriptor.dependencies {
                if !index.contains_key(dep) {
                    return Err(DacError::UnknownAlgorithm {
                        name: dep.clone(),
                        required_by: Some(alg.name().clone()),
                    });
                }
            }
        }

        let mut marks = vec![Mark::Unvisited; algorithms.len()];
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(algorithms.len());
        for k in 0..algorithms.len() {
            visit(k, &algorithms, &index, &mut marks, &mut path, &mut order)?;
        }
        let order: Vec<AlgorithmName> = order.into_iter().map(|k| algorithms[k].name().clone()).collect();
        debug!(
            order = %order.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(", "),
            "resolved algorithm order"
        );
        Ok(Self {
            algorithms,
            index,
            order,
        })
    }

    /// Registry with every built-in algorithm.
    pub fn builtin() -> DacResult<Self> {
        Self::new(builtin::algorithms())
    }

    /// All names, each after its dependencies.
    pub fn resolve_order(&self) -> &[AlgorithmName] {
        &self.order
    }

    pub fn lookup(&self, name: &AlgorithmName) -> DacResult<&Algorithm> {
        self.index
            .get(name)
            .map(|&k| &self.algorithms[k])
            .ok_or_else(|| DacError::UnknownAlgorithm {
                name: name.clone(),
                required_by: None,
            })
    }

    pub fn contains(&self, name: &AlgorithmName) -> bool {
        self.index.contains_key(name)
    }

    /// `name` and everything it transitively depends on, in resolved order.
    pub fn closure(&self, name: &AlgorithmName) -> DacResult<Vec<AlgorithmName>> {
        self.lookup(name)?;
        let mut needed = vec![false; self.algorithms.len()];
        let mut stack = vec![name];
        while let Some(n) = stack.pop() {
            let k = self.index[n];
            if needed[k] {
                continue;
            }
            needed[k] = true;
            stack.extend(self.algorithms[k].descriptor.dependencies.iter());
        }
        Ok(self
            .order
            .iter()
            .filter(|n| needed[self.index[*n]])
            .cloned()
            .collect())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.algorithms.iter().map(|a| &a.descriptor)
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

/// Three-colour depth-first visit; an in-progress hit closes a cycle along `path`.
fn visit(
    k: usize,
    algorithms: &[Algorithm],
    index: &HashMap<AlgorithmName, usize>,
    marks: &mut [Mark],
    path: &mut Vec<usize>,
    order: &mut Vec<usize>,
) -> DacResult<()> {
    match marks[k] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let start = path.iter().position(|&p| p == k).unwrap_or(0);
            let mut cycle: Vec<AlgorithmName> =
                path[start..].iter().map(|&p| algorithms[p].name().clone()).collect();
            cycle.push(algorithms[k].name().clone());
            return Err(DacError::CyclicDependency { cycle });
        }
        Mark::Unvisited => {}
    }
    marks[k] = Mark::InProgress;
    path.push(k);
    for dep in &algorithms[k].descriptor.dependencies {
        visit(index[dep], algorithms, index, marks, path, order)?;
    }
    path.pop();
    marks[k] = Mark::Done;
    order.push(k);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmResult;
    use crate::dac::{MergeCtx, NodeView};
    use crate::graph::SiteGraph;

    fn leaf(view: NodeView<'_>) -> DacResult<AlgorithmResult> {
        Ok(AlgorithmResult::Graph(SiteGraph::nearest_neighbours(&view.sites())))
    }

    fn join(ctx: MergeCtx<'_>) -> DacResult<AlgorithmResult> {
        leaf(ctx.node)
    }

    fn alg(name: &'static str, deps: &[&'static str]) -> Algorithm {
        Algorithm::new(
            AlgorithmName::from_static(name),
            deps.iter().copied().map(AlgorithmName::from_static),
            leaf,
            join,
        )
    }

    fn names(list: &[AlgorithmName]) -> Vec<&str> {
        list.iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn order_puts_dependencies_first() {
        let reg = Registry::new(vec![
            alg("c", &["b", "a"]),
            alg("a", &[]),
            alg("b", &["a"]),
            alg("d", &[]),
        ])
        .unwrap();
        assert_eq!(names(reg.resolve_order()), vec!["a", "b", "c", "d"]);
        assert_eq!(names(&reg.closure(&"b".into()).unwrap()), vec!["a", "b"]);
        assert_eq!(names(&reg.closure(&"d".into()).unwrap()), vec!["d"]);
        assert_eq!(reg.len(), 4);
        assert!(reg.contains(&"c".into()));
    }

    #[test]
    fn mutual_dependency_is_a_cycle() {
        let err = Registry::new(vec![alg("A", &["B"]), alg("B", &["A"])]).unwrap_err();
        assert_eq!(
            err,
            DacError::CyclicDependency {
                cycle: vec!["A".into(), "B".into(), "A".into()]
            }
        );
        assert_eq!(err.to_string(), "dependency cycle between algorithms: A -> B -> A");
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let err = Registry::new(vec![alg("x", &[]), alg("loop", &["loop"])]).unwrap_err();
        assert!(matches!(err, DacError::CyclicDependency { ref cycle } if cycle.len() == 2));
    }

    #[test]
    fn unknown_dependency_names_its_dependent() {
        let err = Registry::new(vec![alg("a", &["ghost"])]).unwrap_err();
        assert_eq!(
            err,
            DacError::UnknownAlgorithm {
                name: "ghost".into(),
                required_by: Some("a".into()),
            }
        );
        let reg = Registry::new(vec![alg("a", &[])]).unwrap();
        assert!(matches!(
            reg.lookup(&"b".into()),
            Err(DacError::UnknownAlgorithm { required_by: None, .. })
        ));
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = Registry::new(vec![alg("a", &[]), alg("a", &[])]).unwrap_err();
        assert_eq!(err, DacError::DuplicateAlgorithm { name: "a".into() });
    }

    #[test]
    fn builtin_order() {
        let reg = Registry::builtin().unwrap();
        assert_eq!(
            names(reg.resolve_order()),
            vec![
                "convex-hull",
                "voronoi-diagram",
                "delaunay-triangulation",
                "spanning-tree",
                "all-nearest-neighbours",
            ]
        );
        assert!(!reg.contains(&AlgorithmName::MINIMUM_AREA_POLYGON));
    }
}
