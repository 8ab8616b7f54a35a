use std::collections::VecDeque;

use crate::errors::GraphError;

/// An undirected edge stored smaller endpoint first.
pub type Edge = (usize, usize);

/// Order the endpoints so `(u, v)` and `(v, u)` map to the same key.
#[inline]
pub fn canonical_edge(u: usize, v: usize) -> Edge {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// A simple undirected graph over the dense node ids `0..num_nodes`.
///
/// Neighbour lists are kept sorted, so [`GraphState::edge_list`] always
/// enumerates edges in the same order for the same edge set. Removing and
/// re-adding an edge restores the exact previous state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphState {
    num_nodes: usize,
    adjacency: Vec<Vec<usize>>,
    num_edges: usize,
}

impl GraphState {
    pub fn new(num_nodes: usize) -> Self {
        GraphState {
            num_nodes,
            adjacency: vec![vec![]; num_nodes],
            num_edges: 0,
        }
    }

    /// Build a graph from an edge list. Self-loops and repeated edges are dropped.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Self, GraphError> {
        let mut graph = GraphState::new(num_nodes);
        for &(u, v) in edges {
            for node in [u, v] {
                if node >= num_nodes {
                    return Err(GraphError::NodeOutOfBounds(node, num_nodes));
                }
            }
            graph.add_edge(u, v);
        }
        Ok(graph)
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns false for self-loops, duplicates and unknown nodes.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || u >= self.num_nodes || v >= self.num_nodes {
            return false;
        }
        match self.adjacency[u].binary_search(&v) {
            Ok(_) => false,
            Err(pos_u) => {
                self.adjacency[u].insert(pos_u, v);
                let pos_v = self.adjacency[v].binary_search(&u).unwrap_or_else(|p| p);
                self.adjacency[v].insert(pos_v, u);
                self.num_edges += 1;
                true
            }
        }
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if u >= self.num_nodes || v >= self.num_nodes {
            return false;
        }
        let pos_u = self.adjacency[u].binary_search(&v);
        let pos_v = self.adjacency[v].binary_search(&u);
        if let (Ok(pu), Ok(pv)) = (pos_u, pos_v) {
            self.adjacency[u].remove(pu);
            self.adjacency[v].remove(pv);
            self.num_edges -= 1;
            return true;
        }
        false
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.num_nodes && self.adjacency[u].binary_search(&v).is_ok()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, Vec::len)
    }

    pub fn degree_sequence(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical edges ordered by first endpoint, then second.
    pub fn edge_list(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.num_edges);
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for &v in neighbors {
                if u < v {
                    edges.push((u, v));
                }
            }
        }
        edges
    }

    /// A graph with no nodes is not considered connected.
    pub fn is_connected(&self) -> bool {
        if self.num_nodes == 0 {
            return false;
        }
        self.reachable_from(0).len() == self.num_nodes
    }

    /// Components in order of their smallest node id; each component sorted.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.num_nodes];
        let mut components = Vec::new();
        for start in 0..self.num_nodes {
            if seen[start] {
                continue;
            }
            let mut component = self.reachable_from(start);
            for &node in &component {
                seen[node] = true;
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// The induced subgraph on the largest component, relabelled to `0..k`
    /// in ascending original-id order, together with the original ids.
    ///
    /// Size ties go to the component discovered first.
    pub fn largest_connected_component(&self) -> (GraphState, Vec<usize>) {
        let mut largest: Vec<usize> = Vec::new();
        for component in self.connected_components() {
            if component.len() > largest.len() {
                largest = component;
            }
        }
        (self.induced_subgraph(&largest), largest)
    }

    /// `nodes` must be sorted and in range.
    fn induced_subgraph(&self, nodes: &[usize]) -> GraphState {
        let mut index = vec![usize::MAX; self.num_nodes];
        for (new_id, &old_id) in nodes.iter().enumerate() {
            index[old_id] = new_id;
        }
        let mut sub = GraphState::new(nodes.len());
        for (new_u, &old_u) in nodes.iter().enumerate() {
            for &old_v in &self.adjacency[old_u] {
                let new_v = index[old_v];
                if new_v != usize::MAX && new_u < new_v {
                    sub.add_edge(new_u, new_v);
                }
            }
        }
        sub
    }

    fn reachable_from(&self, start: usize) -> Vec<usize> {
        let mut visited = vec![false; self.num_nodes];
        let mut order = vec![start];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    order.push(v);
                    queue.push_back(v);
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> GraphState {
        let edges: Vec<_> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        GraphState::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn test_add_edge_rejects_loops_and_duplicates() {
        let mut g = GraphState::new(3);
        assert!(g.add_edge(0, 1));
        assert!(!g.add_edge(1, 0));
        assert!(!g.add_edge(2, 2));
        assert!(!g.add_edge(0, 7));
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.degree_sequence(), vec![1, 1, 0]);
    }

    #[test]
    fn test_from_edges_out_of_bounds() {
        let result = GraphState::from_edges(3, &[(0, 1), (1, 5)]);
        assert_eq!(result, Err(GraphError::NodeOutOfBounds(5, 3)));
    }

    #[test]
    fn test_edge_list_is_canonical_and_sorted() {
        let g = GraphState::from_edges(4, &[(3, 0), (2, 1), (1, 0), (3, 2)]).unwrap();
        assert_eq!(g.edge_list(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_remove_then_add_restores_state() {
        let original = GraphState::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let mut g = original.clone();
        assert!(g.remove_edge(2, 1));
        assert!(!g.remove_edge(2, 1));
        assert!(g.add_edge(1, 2));
        assert_eq!(g, original);
    }

    #[test]
    fn test_connectivity() {
        assert!(path(5).is_connected());
        assert!(GraphState::new(1).is_connected());
        assert!(!GraphState::new(0).is_connected());
        assert!(!GraphState::new(2).is_connected());
    }

    #[test]
    fn test_largest_component_relabels() {
        // {0, 4} and {1, 2, 3}
        let g = GraphState::from_edges(5, &[(0, 4), (1, 2), (2, 3)]).unwrap();
        let (lcc, ids) = g.largest_connected_component();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(lcc.edge_list(), vec![(0, 1), (1, 2)]);
        assert!(lcc.is_connected());
    }

    #[test]
    fn test_largest_component_tie_prefers_first() {
        let g = GraphState::from_edges(4, &[(2, 3), (0, 1)]).unwrap();
        let (_, ids) = g.largest_connected_component();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_canonical_edge() {
        assert_eq!(canonical_edge(4, 2), (2, 4));
        assert_eq!(canonical_edge(2, 4), (2, 4));
    }
}
