//! Hamiltonian cycle verification, including the time-gated 2-opt
//! ground-state predicate (spec §4.E).
//!
//! The 2-opt check's activation timestamp is a protocol constant, but the
//! verifier never reads the wall clock itself - callers inject `now_unix`
//! (spec §9: "do not call the wall clock directly inside the verifier").

use crate::graph::Graph;

/// Sentinel vertex value meaning "absent" in a path buffer.
pub const SENTINEL: u16 = 0xFFFF;

/// Unix timestamp at which the 2-opt ground-state check activates.
pub const TWO_OPT_ACTIVATION_UNIX: u64 = 1_766_797_200;

/// Verify that `path` is a Hamiltonian cycle on `graph`, starting at vertex
/// 0, and (once `now_unix` reaches the activation time) a 2-opt ground
/// state under the canonical vertex-id ordering.
pub fn verify(graph: &Graph, path: &[u16], now_unix: u64) -> bool {
    let n = graph.len();

    if path.len() != n || n == 0 {
        return false;
    }
    if path[0] != 0 {
        return false;
    }
    if path.iter().any(|&v| v == SENTINEL) {
        return false;
    }

    if !is_permutation_of_range(path, n) {
        return false;
    }

    for i in 1..n {
        if !graph.has_edge(path[i - 1] as usize, path[i] as usize) {
            return false;
        }
    }
    if !graph.has_edge(path[n - 1] as usize, path[0] as usize) {
        return false;
    }

    if now_unix >= TWO_OPT_ACTIVATION_UNIX && violates_two_opt_ground_state(graph, path) {
        return false;
    }

    true
}

/// `path` is a permutation of `{0, ..., n-1}` iff every value is in range
/// and no value repeats (both are necessary; together they're sufficient
/// since `path.len() == n`).
fn is_permutation_of_range(path: &[u16], n: usize) -> bool {
    let mut seen = vec![false; n];
    for &v in path {
        let idx = v as usize;
        if idx >= n || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Reject cycles on which a 2-opt swap would reduce a canonical vertex-id
/// cost. Deliberately excludes the wrap-around case `j == n-1` (spec §9 Open
/// Question) - retained exactly, not "fixed".
fn violates_two_opt_ground_state(graph: &Graph, path: &[u16]) -> bool {
    let n = path.len();
    if n < 2 {
        return false;
    }

    for i in 0..=(n - 2) {
        for j in (i + 1)..=(n - 2) {
            let pi = path[i] as usize;
            let pj = path[j] as usize;
            let pi1 = path[i + 1] as usize;
            let pj1 = path[j + 1] as usize;

            if graph.has_edge(pi, pj) && graph.has_edge(pi1, pj1) && path[j] < path[i + 1] {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::generate_graph_v2;

    fn ring_cycle(n: usize) -> Vec<u16> {
        (0..n as u16).collect()
    }

    #[test]
    fn test_rejects_wrong_length() {
        let g = generate_graph_v2(&"ff".repeat(32), 5, 1000);
        let path: Vec<u16> = vec![0, 1, 2];
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_rejects_empty_graph() {
        let g = generate_graph_v2(&"ff".repeat(32), 0, 1000);
        assert!(!verify(&g, &[], 0));
    }

    #[test]
    fn test_rejects_not_starting_at_zero() {
        let g = generate_graph_v2(&"ff".repeat(32), 4, 1000);
        let path: Vec<u16> = vec![1, 0, 2, 3];
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_rejects_sentinel_inside_cycle() {
        let g = generate_graph_v2(&"ff".repeat(32), 4, 1000);
        let path: Vec<u16> = vec![0, 1, SENTINEL, 3];
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_rejects_duplicate_vertex() {
        let g = generate_graph_v2(&"ff".repeat(32), 4, 1000);
        let path: Vec<u16> = vec![0, 1, 1, 3];
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_rejects_out_of_range_vertex() {
        let g = generate_graph_v2(&"ff".repeat(32), 4, 1000);
        let path: Vec<u16> = vec![0, 1, 2, 9];
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_accepts_valid_cycle_in_complete_graph() {
        let g = generate_graph_v2(&"ff".repeat(32), 6, 1000);
        let path = ring_cycle(6);
        assert!(verify(&g, &path, 0));
    }

    #[test]
    fn test_rejects_missing_single_edge() {
        // A complete graph always has every edge, so to exercise a missing
        // edge we permute a cycle that is NOT a simple ring over a sparse
        // graph generated at low density, and check rejection when any hop
        // in the cycle lacks an edge.
        let g = generate_graph_v2(&"01".repeat(32), 8, 0);
        let path = ring_cycle(8);
        // p=0 graph has no edges at all, so any non-trivial cycle must fail.
        assert!(!verify(&g, &path, 0));
    }

    #[test]
    fn test_two_opt_gate_before_activation() {
        // Construct a cycle/graph combination that violates the 2-opt
        // predicate, then confirm it is accepted before the activation time
        // and rejected at/after it.
        let g = generate_graph_v2(&"ab".repeat(32), 5, 1000); // complete graph
        let path: Vec<u16> = vec![0, 2, 1, 3, 4];

        // In a complete graph, path[i]-path[j] and path[i+1]-path[j+1] edges
        // always exist, so the predicate reduces purely to the ordering
        // condition path[j] < path[i+1] for some i<j<=n-2.
        assert!(verify(&g, &path, TWO_OPT_ACTIVATION_UNIX - 1));
        assert!(!verify(&g, &path, TWO_OPT_ACTIVATION_UNIX));
    }

    #[test]
    fn test_two_opt_wraparound_not_checked() {
        // A configuration that would only violate the predicate via the
        // excluded wrap-around case (j = n-1) must still be accepted.
        let g = generate_graph_v2(&"cd".repeat(32), 4, 1000); // complete graph
        let path: Vec<u16> = vec![0, 1, 2, 3];
        assert!(verify(&g, &path, TWO_OPT_ACTIVATION_UNIX));
    }
}
