use graphwalk_graphlib::{EdgeId, Graph, GraphOptions, VertexId};

fn v(id: u32) -> VertexId {
    VertexId(id)
}

fn with_vertices(options: GraphOptions, n: usize) -> Graph {
    let mut g = Graph::new(options);
    for i in 0..n {
        g.add_vertex(i as f64 * 10.0, 0.0);
    }
    g
}

#[test]
fn add_vertex_assigns_monotonic_ids() {
    let mut g = Graph::default();
    assert_eq!(g.add_vertex(1.0, 2.0).id, v(0));
    assert_eq!(g.add_vertex(3.0, 4.0).id, v(1));
    let third = g.add_vertex(5.0, 6.0);
    assert_eq!(third.id, v(2));
    assert_eq!((third.x, third.y, third.is_wall), (5.0, 6.0, false));
    assert_eq!(g.vertex_ids(), vec![v(0), v(1), v(2)]);
}

#[test]
fn ids_are_not_recycled_after_removal() {
    let mut g = with_vertices(GraphOptions::default(), 3);
    let e = g.add_edge(v(0), v(1)).unwrap();
    assert!(g.remove_vertex(v(2)).is_some());
    assert!(g.remove_edge(e.id).is_some());

    assert_eq!(g.add_vertex(0.0, 0.0).id, v(3));
    assert_eq!(g.add_edge(v(0), v(1)).unwrap().id, EdgeId(1));
}

#[test]
fn clear_resets_both_counters() {
    let mut g = with_vertices(GraphOptions::default(), 3);
    g.add_edge(v(0), v(1));
    g.clear();

    assert!(g.is_empty());
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.add_vertex(0.0, 0.0).id, v(0));
    g.add_vertex(0.0, 0.0);
    assert_eq!(g.add_edge(v(0), v(1)).unwrap().id, EdgeId(0));
}

#[test]
fn self_loops_are_rejected() {
    let mut g = with_vertices(GraphOptions::default(), 1);
    assert_eq!(g.add_edge(v(0), v(0)), None);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn edges_to_missing_vertices_are_rejected() {
    let mut g = with_vertices(GraphOptions::default(), 1);
    assert_eq!(g.add_edge(v(0), v(7)), None);
    assert_eq!(g.add_edge(v(7), v(0)), None);
}

#[test]
fn duplicate_directed_edges_are_a_no_op() {
    let mut g = with_vertices(
        GraphOptions {
            directed: true,
            ..Default::default()
        },
        2,
    );
    assert!(g.add_edge(v(0), v(1)).is_some());
    assert_eq!(g.add_edge(v(0), v(1)), None);
    assert_eq!(g.edge_count(), 1);

    // The reverse arc is a different edge in directed mode.
    assert!(g.add_edge(v(1), v(0)).is_some());
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn removing_a_vertex_cascades_to_its_edges() {
    let mut g = with_vertices(GraphOptions::default(), 3);
    g.set_path(&[v(0), v(1), v(2)]);
    assert_eq!(g.edge_count(), 2);

    let removed = g.remove_vertex(v(1)).unwrap();
    assert_eq!(removed.id, v(1));
    assert_eq!(g.edge_count(), 0);
    assert!(!g.has_edge_between(v(0), v(1)));
    // The pair set must forget the cascaded edges too.
    g.add_vertex(0.0, 0.0);
    assert!(g.add_edge(v(0), v(2)).is_some());
}

#[test]
fn removing_absent_entities_is_silent() {
    let mut g = with_vertices(GraphOptions::default(), 1);
    assert_eq!(g.remove_vertex(v(9)), None);
    assert_eq!(g.remove_edge(EdgeId(9)), None);
    assert_eq!(g.vertex_count(), 1);
}

#[test]
fn vertex_lookup_survives_removal_in_the_middle() {
    let mut g = with_vertices(GraphOptions::default(), 4);
    g.remove_vertex(v(1));
    assert_eq!(g.vertex(v(2)).map(|x| x.x), Some(20.0));
    assert_eq!(g.vertex(v(3)).map(|x| x.x), Some(30.0));
    assert!(g.move_vertex(v(3), 1.0, 2.0));
    assert_eq!(g.vertex(v(3)).map(|x| (x.x, x.y)), Some((1.0, 2.0)));
    assert!(!g.move_vertex(v(1), 1.0, 2.0));
}

#[test]
fn weights_are_only_recorded_in_weighted_mode() {
    let mut g = with_vertices(GraphOptions::default(), 3);
    assert_eq!(g.add_edge_weighted(v(0), v(1), 5.0).unwrap().weight, None);

    g.set_weighted(true);
    assert_eq!(g.add_edge(v(1), v(2)).unwrap().weight, Some(1.0));
    assert_eq!(g.add_edge_weighted(v(0), v(2), 4.0).unwrap().weight, Some(4.0));
}

#[test]
fn adjacency_sorts_neighbors_by_target_id() {
    let mut g = with_vertices(
        GraphOptions {
            directed: true,
            ..Default::default()
        },
        4,
    );
    g.add_edge(v(0), v(3));
    g.add_edge(v(0), v(1));
    g.add_edge(v(0), v(2));

    let adj = g.adjacency();
    let targets: Vec<VertexId> = adj[&v(0)].iter().map(|n| n.to).collect();
    assert_eq!(targets, vec![v(1), v(2), v(3)]);
    assert!(adj[&v(3)].is_empty());
    assert_eq!(adj.len(), 4);
}

#[test]
fn adjacency_is_idempotent() {
    let mut g = with_vertices(GraphOptions::default(), 5);
    g.set_path(&[v(4), v(2), v(0), v(3), v(1)]);
    assert_eq!(g.adjacency(), g.adjacency());
}

#[test]
fn adjacency_matrix_uses_weights_and_insertion_order() {
    let mut g = with_vertices(
        GraphOptions {
            directed: true,
            weighted: true,
            grid: false,
        },
        3,
    );
    g.add_edge_weighted(v(0), v(2), 7.0);
    g.add_edge(v(2), v(1));
    g.remove_vertex(v(0));
    g.add_vertex(0.0, 0.0);

    let m = g.adjacency_matrix();
    let order: Vec<VertexId> = m.vertex_order.iter().map(|x| x.id).collect();
    assert_eq!(order, vec![v(1), v(2), v(3)]);
    assert_eq!(m.matrix, vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ]);
    assert_eq!(m.get(v(2), v(1)), Some(1.0));
}

#[test]
fn edge_list_and_properties() {
    let mut g = with_vertices(GraphOptions::default(), 4);
    g.set_path(&[v(0), v(1), v(2)]);
    assert_eq!(g.edge_list(), vec![(v(0), v(1), None), (v(1), v(2), None)]);

    let props = g.properties();
    assert_eq!(props.vertices, 4);
    assert_eq!(props.edges, 2);
    assert_eq!(props.components, 2);
    assert!(!props.likely_tree);

    g.add_edge(v(2), v(3));
    assert!(g.properties().likely_tree);
}

#[test]
fn grid_helpers_find_cells_and_walls() {
    let mut g = Graph::new(GraphOptions {
        grid: true,
        ..Default::default()
    });
    for y in 0..2 {
        for x in 0..2 {
            g.add_vertex(x as f64, y as f64);
        }
    }
    let cell = g.vertex_at(1.0, 1.0).unwrap().id;
    assert_eq!(cell, v(3));
    assert!(g.set_wall(cell, true));
    assert!(g.vertex(cell).unwrap().is_wall);
    assert_eq!(g.vertex_at(5.0, 5.0), None);
}

#[test]
fn graph_types_serialize_as_plain_json() {
    let mut g = with_vertices(GraphOptions::default(), 2);
    let e = g.add_edge(v(0), v(1)).unwrap();
    let json = serde_json::to_value(e).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 0, "source": 0, "target": 1, "weight": null })
    );
    let vertex = serde_json::to_value(g.vertex(v(1)).unwrap()).unwrap();
    assert_eq!(vertex["isWall"], serde_json::json!(false));
}
