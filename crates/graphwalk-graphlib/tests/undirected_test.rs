use graphwalk_graphlib::{Graph, GraphOptions, VertexId};

fn undirected(n: u32) -> Graph {
    let mut g = Graph::new(GraphOptions::default());
    for i in 0..n {
        g.add_vertex(f64::from(i), 0.0);
    }
    g
}

#[test]
fn undirected_edges_are_symmetric() {
    let mut g = undirected(2);
    g.set_weighted(true);
    g.add_edge_weighted(VertexId(1), VertexId(0), 7.0);

    assert!(g.has_edge_between(VertexId(0), VertexId(1)));
    assert!(g.has_edge_between(VertexId(1), VertexId(0)));
    assert_eq!(
        g.find_edge(VertexId(0), VertexId(1)).and_then(|e| e.weight),
        Some(7.0)
    );
}

#[test]
fn undirected_duplicates_are_rejected_in_either_direction() {
    let mut g = undirected(2);
    assert!(g.add_edge(VertexId(0), VertexId(1)).is_some());
    assert_eq!(g.add_edge(VertexId(1), VertexId(0)), None);
    assert_eq!(g.add_edge(VertexId(0), VertexId(1)), None);
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn undirected_adjacency_lists_both_directions() {
    let mut g = undirected(3);
    g.add_edge(VertexId(0), VertexId(1));
    g.add_edge(VertexId(2), VertexId(1));

    let adj = g.adjacency();
    let of = |v: u32| -> Vec<u32> { adj[&VertexId(v)].iter().map(|n| n.to.0).collect() };
    assert_eq!(of(0), vec![1]);
    assert_eq!(of(1), vec![0, 2]);
    assert_eq!(of(2), vec![1]);
}

#[test]
fn undirected_matrix_is_symmetric() {
    let mut g = undirected(3);
    g.add_edge(VertexId(0), VertexId(2));
    let m = g.adjacency_matrix();
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(m.matrix[i][j], m.matrix[j][i]);
        }
    }
    assert_eq!(m.matrix[0][2], 1.0);
}

#[test]
fn toggling_direction_reinterprets_existing_edges() {
    let mut g = undirected(2);
    g.add_edge(VertexId(0), VertexId(1));
    g.set_directed(true);

    assert!(g.adjacency()[&VertexId(1)].is_empty());
    assert!(g.add_edge(VertexId(1), VertexId(0)).is_some());
}
