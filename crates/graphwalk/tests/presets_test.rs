use graphwalk::graphlib::{EdgeId, Graph, GraphOptions, VertexId};
use graphwalk::maze::{carve, carve_seeded};
use graphwalk::presets::{GRID_SIZE, Preset};
use graphwalk::{Algorithm, Endpoints, Error, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;

fn loaded(preset: Preset) -> Graph {
    let mut g = Graph::default();
    preset.load(&mut g, 800.0);
    g
}

#[test]
fn tree_preset_is_a_seven_vertex_tree() {
    let g = loaded(Preset::Tree);
    let props = g.properties();
    assert!(!g.is_directed());
    assert_eq!(props.vertices, 7);
    assert_eq!(props.edges, 6);
    assert_eq!(props.components, 1);
    assert!(props.likely_tree);
    assert_eq!(g.vertex(VertexId(0)).map(|v| (v.x, v.y)), Some((400.0, 50.0)));
}

#[test]
fn cycle_and_dag_presets_are_directed() {
    let cycle = loaded(Preset::Cycle);
    assert!(cycle.is_directed());
    assert_eq!(cycle.vertex_count(), 4);
    assert!(cycle.has_edge_between(VertexId(3), VertexId(0)));

    let dag = loaded(Preset::Dag);
    assert!(dag.is_directed());
    assert_eq!(dag.edge_count(), 4);
    let steps = trace(Algorithm::Topological, &dag, Endpoints::default());
    assert_eq!(
        steps.last().map(|s| s.message.as_str()),
        Some("Topological Sort: 0 -> 1 -> 3 -> 2")
    );
}

#[test]
fn grid_preset_is_a_lattice() {
    let g = loaded(Preset::Grid);
    let n = GRID_SIZE as usize;
    assert!(g.is_grid());
    assert_eq!(g.vertex_count(), n * n);
    assert_eq!(g.edge_count(), 2 * n * (n - 1));
    assert_eq!(g.vertex(VertexId(11)).map(|v| (v.x, v.y)), Some((1.0, 1.0)));
}

#[test]
fn loading_replaces_the_graph_and_keeps_weighted() {
    let mut g = Graph::new(GraphOptions {
        directed: true,
        weighted: true,
        grid: true,
    });
    for _ in 0..20 {
        g.add_vertex(0.0, 0.0);
    }
    Preset::Tree.load(&mut g, 800.0);

    assert_eq!(g.vertex_count(), 7);
    assert_eq!(g.vertex_ids().first(), Some(&VertexId(0)));
    assert!(g.is_weighted());
    assert!(!g.is_directed());
    assert!(!g.is_grid());
}

#[test]
fn preset_names_parse_case_insensitively() {
    for preset in Preset::ALL {
        assert_eq!(preset.to_string().parse::<Preset>().ok(), Some(preset));
    }
    assert_eq!("GRID".parse::<Preset>().ok(), Some(Preset::Grid));
    assert!(matches!(
        "star".parse::<Preset>(),
        Err(Error::UnknownPreset { .. })
    ));
}

#[test]
fn maze_needs_a_grid() {
    let mut g = loaded(Preset::Tree);
    assert!(matches!(carve_seeded(&mut g, 1), Err(Error::NotAGrid)));

    let mut empty = Graph::new(GraphOptions {
        grid: true,
        ..GraphOptions::default()
    });
    assert!(matches!(carve_seeded(&mut empty, 1), Err(Error::NotAGrid)));
}

#[test]
fn maze_is_deterministic_per_seed() {
    let mut a = loaded(Preset::Grid);
    let mut b = loaded(Preset::Grid);
    let open_a = carve_seeded(&mut a, 42).expect("carve");
    let open_b = carve(&mut b, &mut StdRng::seed_from_u64(42)).expect("carve");

    assert_eq!(open_a, open_b);
    assert_eq!(a.vertices(), b.vertices());
    assert_eq!(a.edges(), b.edges());
}

#[test]
fn maze_opens_the_corners_and_links_only_open_cells() {
    let mut g = loaded(Preset::Grid);
    let open = carve_seeded(&mut g, 7).expect("carve");
    let n = GRID_SIZE * GRID_SIZE;

    assert_eq!(g.vertex_count(), n as usize);
    assert_eq!(open, g.vertices().iter().filter(|v| !v.is_wall).count());
    assert!(open < n as usize);
    assert!(g.vertex(VertexId(0)).is_some_and(|v| !v.is_wall));
    assert!(g.vertex(VertexId(n - 1)).is_some_and(|v| !v.is_wall));
    assert_eq!(g.edges().first().map(|e| e.id), Some(EdgeId(0)));
    for e in g.edges() {
        let wall = |id| g.vertex(id).is_some_and(|v| v.is_wall);
        assert!(!wall(e.source) && !wall(e.target), "{e:?}");
    }
}

#[test]
fn maze_passages_form_one_connected_region() {
    let mut g = loaded(Preset::Grid);
    carve_seeded(&mut g, 3).expect("carve");
    let last = VertexId(GRID_SIZE * GRID_SIZE - 1);

    let reached: BTreeSet<VertexId> = trace(Algorithm::Bfs, &g, Endpoints::default())
        .iter()
        .filter_map(|s| s.node)
        .collect();
    for v in g.vertices().iter().filter(|v| !v.is_wall && v.id != last) {
        assert!(reached.contains(&v.id), "cell {} not reachable", v.id);
    }
}
