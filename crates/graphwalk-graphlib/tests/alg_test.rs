use graphwalk_graphlib::{Graph, GraphOptions, VertexId, alg};

fn directed(n: u32) -> Graph {
    let mut g = Graph::new(GraphOptions {
        directed: true,
        ..Default::default()
    });
    for i in 0..n {
        g.add_vertex(f64::from(i), 0.0);
    }
    g
}

fn ids(raw: &[u32]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId).collect()
}

#[test]
fn preorder_follows_ascending_neighbor_order() {
    let mut g = directed(5);
    g.add_edge(VertexId(0), VertexId(2));
    g.add_edge(VertexId(0), VertexId(1));
    g.add_edge(VertexId(1), VertexId(3));
    g.add_edge(VertexId(4), VertexId(0));

    assert_eq!(alg::preorder(&g, &[VertexId(0)]), ids(&[0, 1, 3, 2]));
    assert_eq!(alg::reachable(&g, VertexId(3)).len(), 1);
    assert!(alg::preorder(&g, &[VertexId(42)]).is_empty());
}

#[test]
fn components_ignore_direction() {
    let mut g = directed(5);
    g.add_edge(VertexId(1), VertexId(0));
    g.add_edge(VertexId(3), VertexId(2));

    assert_eq!(
        alg::components(&g),
        vec![ids(&[0, 1]), ids(&[2, 3]), ids(&[4])]
    );
}

#[test]
fn topological_order_check() {
    let mut g = directed(3);
    g.set_path(&ids(&[0, 1, 2]));

    assert!(alg::is_topological_order(&g, &ids(&[0, 1, 2])));
    assert!(!alg::is_topological_order(&g, &ids(&[1, 0, 2])));
    assert!(!alg::is_topological_order(&g, &ids(&[0, 1])));
}
