//! Dijkstra's and A* pathfinding on top of [`IndexedHeap`]
//!
//! The open set is an [`IndexedHeap`] keyed by a lightweight node index. When a
//! cheaper route to a node that is still queued turns up, the search calls
//! [`reweight`](IndexedHeap::reweight) on it instead of pushing a duplicate, so
//! every node is queued at most once.
//!
//! Node states map to their index through an [`FxHashMap`]. Dijkstra is A*
//! with a zero heuristic.
//!
//! # Example
//!
//! ```rust
//! use mutable_heaps::pathfinding::{SearchNode, dijkstra};
//!
//! // Floors of a building: stairs cost 3 per floor, the lift from the lobby
//! // to floor 10 costs 5 in one hop.
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Floor(u8);
//!
//! impl SearchNode for Floor {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, u32)> {
//!         let mut next = Vec::new();
//!         if self.0 < 12 {
//!             next.push((Floor(self.0 + 1), 3));
//!         }
//!         if self.0 > 0 {
//!             next.push((Floor(self.0 - 1), 3));
//!         }
//!         if self.0 == 0 {
//!             next.push((Floor(10), 5));
//!         }
//!         next
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.0 == 9
//!     }
//! }
//!
//! let (path, cost) = dijkstra(&Floor(0)).unwrap().unwrap();
//! assert_eq!(cost, 8); // lift to 10, one flight down
//! assert_eq!(path.len(), 3);
//! ```

use crate::indexed::IndexedHeap;
use crate::traits::{Heap, HeapError};
use log::trace;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Edge and path cost: totally ordered, summable, with `Default` as zero
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// A state the searches can expand
///
/// Implementors are hashed to identify revisits, so two values that compare
/// equal must describe the same place in the graph.
pub trait SearchNode: Clone + Eq + Hash {
    type Cost: Cost;

    /// Neighbouring states paired with the edge cost of stepping to each
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    fn is_goal(&self) -> bool;
}

/// A [`SearchNode`] with a lower bound on its remaining distance to a goal
///
/// [`astar`] returns optimal paths only while the bound never overshoots.
pub trait AStarNode: SearchNode {
    fn heuristic(&self) -> Self::Cost;
}

/// Open-set priority; only `f_score` takes part in comparisons
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h = 0 for Dijkstra)
    pub f_score: C,
    /// Cost from start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index stored in the open set in place of full node data.
pub type NodeIndex = usize;

/// Open set type used by every search in this module.
pub type OpenSet<C> = IndexedHeap<NodeIndex, (), PriorityCost<C>>;

/// Metadata stored for each discovered node during search.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start
    g_score: N::Cost,
    /// Previous node on the best known path
    came_from: Option<NodeIndex>,
    /// Settled: dequeued from the open set
    closed: bool,
}

/// Bookkeeping for one search: node states, their indices, and back-links.
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state. The flag is true if new.
    fn get_or_create_index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.state_to_index.get(&node) {
            return (index, false);
        }
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }

    /// Records a route to `neighbor` through `from` if it is new or cheaper.
    ///
    /// New nodes are enqueued; queued nodes that got cheaper are reweighted.
    fn relax(
        &mut self,
        open: &mut OpenSet<N::Cost>,
        from: NodeIndex,
        neighbor: N,
        tentative_g: N::Cost,
        h: N::Cost,
    ) -> Result<(), HeapError> {
        let (index, is_new) = self.get_or_create_index(neighbor, tentative_g);
        let entry = &mut self.nodes[index];
        if entry.closed || (!is_new && tentative_g >= entry.g_score) {
            return Ok(());
        }
        entry.g_score = tentative_g;
        entry.came_from = Some(from);
        let priority = PriorityCost {
            f_score: tentative_g + h,
            g_score: tentative_g,
        };
        if is_new {
            open.enqueue(index, (), priority)
        } else {
            trace!("relax: cheaper route to node {}", index);
            open.reweight(&index, priority).map(|_| ())
        }
    }
}

/// Cheapest path from `start` to the first node whose `is_goal()` holds
///
/// # Returns
/// - `Ok(Some((path, cost)))` if a path is found
/// - `Ok(None)` if no path exists
///
/// # Errors
/// [`HeapError::AllocationFailure`] if the open set cannot grow.
pub fn dijkstra<N: SearchNode>(start: &N) -> Result<Option<(Vec<N>, N::Cost)>, HeapError> {
    PathFinderBuilder::new(start.clone()).dijkstra()
}

/// Like [`dijkstra`], with nodes ordered by cost so far plus `heuristic()`
pub fn astar<N: AStarNode>(start: &N) -> Result<Option<(Vec<N>, N::Cost)>, HeapError> {
    PathFinderBuilder::new(start.clone()).astar()
}

/// Configures a search with optional cost and settle-count limits
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<N::Cost>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Search from `start` with no limits
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Routes costing more than `cost` are never queued
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Give up after settling `count` nodes
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra(self) -> Result<Option<(Vec<N>, N::Cost)>, HeapError> {
        self.search_with_heuristic(|_| N::Cost::default())
    }

    /// Runs A* search with the configured limits.
    pub fn astar(self) -> Result<Option<(Vec<N>, N::Cost)>, HeapError>
    where
        N: AStarNode,
    {
        self.search_with_heuristic(|n| n.heuristic())
    }

    fn search_with_heuristic(
        self,
        heuristic: impl Fn(&N) -> N::Cost,
    ) -> Result<Option<(Vec<N>, N::Cost)>, HeapError> {
        let within_cost = |g: N::Cost| self.max_cost.map_or(true, |max| g <= max);

        let mut open: OpenSet<N::Cost> = IndexedHeap::new();
        let mut finder = PathFinder::new();
        let mut settled = 0usize;

        let zero = N::Cost::default();
        let (start_index, _) = finder.get_or_create_index(self.start.clone(), zero);
        open.enqueue(
            start_index,
            (),
            PriorityCost {
                f_score: heuristic(&self.start),
                g_score: zero,
            },
        )?;

        while !open.is_empty() {
            if self.max_nodes.is_some_and(|max| settled >= max) {
                return Ok(None);
            }
            let (current_index, (), priority) = open.dequeue()?;
            settled += 1;

            let current = &mut finder.nodes[current_index];
            current.closed = true;
            let current_node = current.node.clone();
            let current_g = priority.g_score;
            trace!("settled node {} ({} so far)", current_index, settled);

            if current_node.is_goal() {
                return Ok(Some((finder.reconstruct_path(current_index), current_g)));
            }

            for (neighbor, edge_cost) in current_node.successors() {
                let tentative_g = current_g + edge_cost;
                if !within_cost(tentative_g) {
                    continue;
                }
                let h = heuristic(&neighbor);
                finder.relax(&mut open, current_index, neighbor, tentative_g, h)?;
            }
        }

        Ok(None)
    }
}

/// Every node whose cheapest route from `start` costs at most `max_cost`,
/// listed in nondecreasing cost order
pub fn reachable_within<N: SearchNode>(
    start: &N,
    max_cost: N::Cost,
) -> Result<Vec<(N, N::Cost)>, HeapError> {
    let mut open: OpenSet<N::Cost> = IndexedHeap::new();
    let mut finder = PathFinder::new();
    let mut result = Vec::new();

    let zero = N::Cost::default();
    let (start_index, _) = finder.get_or_create_index(start.clone(), zero);
    open.enqueue(
        start_index,
        (),
        PriorityCost {
            f_score: zero,
            g_score: zero,
        },
    )?;

    while !open.is_empty() {
        let (current_index, (), priority) = open.dequeue()?;
        let current = &mut finder.nodes[current_index];
        current.closed = true;
        let current_node = current.node.clone();
        let current_g = priority.g_score;

        if current_g > max_cost {
            continue;
        }
        result.push((current_node.clone(), current_g));

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;
            if tentative_g > max_cost {
                continue;
            }
            finder.relax(&mut open, current_index, neighbor, tentative_g, zero)?;
        }
    }

    Ok(result)
}
