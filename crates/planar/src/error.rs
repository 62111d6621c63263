//! Error taxonomy for registry validation, tree construction and result lookup.
//!
//! - Validation errors (`UnknownAlgorithm`, `CyclicDependency`,
//!   `DuplicateAlgorithm`) abort tree construction before any point is touched.
//! - `NoData` is local and recoverable: run `DacTree::process_algorithm` and retry.
//! - Degenerate geometry is never an error; merges fall back to direct
//!   reconstruction instead.

use thiserror::Error;

use crate::algorithm::AlgorithmName;
use crate::dac::NodeId;

/// Errors surfaced by the registry and the divide-and-conquer tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DacError {
    /// A requested or declared-dependency algorithm is not registered.
    #[error("unknown algorithm `{name}`{}", format_required_by(.required_by))]
    UnknownAlgorithm {
        name: AlgorithmName,
        required_by: Option<AlgorithmName>,
    },
    /// The dependency graph is not a DAG; `cycle` lists the loop, first name repeated last.
    #[error("dependency cycle between algorithms: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<AlgorithmName> },
    /// The same name was registered twice.
    #[error("algorithm `{name}` is registered more than once")]
    DuplicateAlgorithm { name: AlgorithmName },
    /// No result for `name` has been computed at `node` yet.
    #[error("no `{name}` result at node {node}")]
    NoData { name: AlgorithmName, node: NodeId },
    /// A cached result exists but has a different shape than the caller expects.
    #[error("result `{name}` is a {found}, expected a {expected}")]
    ResultShape {
        name: AlgorithmName,
        expected: &'static str,
        found: &'static str,
    },
    /// The point sequence is empty.
    #[error("point set is empty")]
    EmptyInput,
    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
}

fn format_required_by(required_by: &Option<AlgorithmName>) -> String {
    match required_by {
        Some(r) => format!(" (required by `{r}`)"),
        None => String::new(),
    }
}

fn format_cycle(cycle: &[AlgorithmName]) -> String {
    cycle
        .iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub type DacResult<T> = Result<T, DacError>;
