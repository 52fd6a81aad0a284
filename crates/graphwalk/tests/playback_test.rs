use graphwalk::graphlib::{Graph, GraphOptions, VertexId};
use graphwalk::{
    Algorithm, Controller, EdgeMark, PlaybackState, RecordingRenderer, RenderCommand, Speed,
    VertexMark, trace,
};
use std::collections::BTreeSet;
use std::time::Duration;

fn v(i: u32) -> VertexId {
    VertexId(i)
}

fn path_graph(n: u32) -> Graph {
    let mut g = Graph::new(GraphOptions::default());
    for i in 0..n {
        g.add_vertex(f64::from(i) * 60.0, 100.0);
    }
    for i in 1..n {
        g.add_edge(v(i - 1), v(i)).expect("edge");
    }
    g
}

fn controller(n: u32) -> Controller<RecordingRenderer> {
    Controller::new(path_graph(n), RecordingRenderer::new())
}

#[test]
fn manual_steps_walk_through_the_run() {
    let mut c = controller(4);
    assert_eq!(c.state(), PlaybackState::Idle);
    assert!(!c.is_active());

    let first = c.step().expect("first step");
    assert_eq!(first.message, "Start BFS. Enqueue 0");
    assert_eq!(c.state(), PlaybackState::Running);
    assert_eq!(c.applied_steps(), 1);
    assert_eq!(c.last_step(), Some(&first));

    let rest = c.run_to_end();
    assert_eq!(c.state(), PlaybackState::Finished);
    assert_eq!(rest.last().map(|s| s.message.as_str()), Some("BFS Complete"));
    assert!(c.step().is_none());
    assert!(c.step().is_none());
}

#[test]
fn stepping_matches_a_drained_trace() {
    for algorithm in Algorithm::ALL {
        let mut c = controller(5);
        c.set_algorithm(algorithm);
        let endpoints = c.endpoints();
        let stepped = c.run_to_end();
        assert_eq!(stepped, trace(algorithm, c.graph(), endpoints), "{algorithm}");
        assert_eq!(c.applied_steps(), stepped.len(), "{algorithm}");
        assert_eq!(
            c.renderer().statuses(),
            stepped.iter().map(|s| s.message.as_str()).collect::<Vec<_>>(),
            "{algorithm}"
        );
    }
}

#[test]
fn start_applies_a_step_right_away() {
    let mut c = controller(4);
    let first = c.start().expect("first step");
    assert_eq!(first.message, "Start BFS. Enqueue 0");
    assert_eq!(c.state(), PlaybackState::Running);
    assert!(c.start().is_none(), "already running");
    assert_eq!(c.applied_steps(), 1);
}

#[test]
fn advance_fires_one_step_per_delay() {
    let mut c = controller(4);
    assert_eq!(c.delay(), Duration::from_secs(1));
    assert_eq!(c.advance(Duration::from_secs(5)), 0, "idle clock does not run");

    c.start();
    assert_eq!(c.time_to_next_step(), Some(Duration::from_secs(1)));
    assert_eq!(c.advance(Duration::from_millis(500)), 0);
    assert_eq!(c.time_to_next_step(), Some(Duration::from_millis(500)));
    assert_eq!(c.advance(Duration::from_millis(500)), 1);
    assert_eq!(c.advance(Duration::from_secs(3)), 3);
    assert_eq!(c.applied_steps(), 5);
}

#[test]
fn pause_freezes_the_clock() {
    let mut c = controller(4);
    c.start();
    c.advance(Duration::from_millis(900));
    c.pause();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.time_to_next_step(), None);
    assert_eq!(c.advance(Duration::from_secs(10)), 0);

    let resumed = c.start().expect("resumed step");
    assert_eq!(resumed.message, "Queue not empty");
    assert_eq!(c.applied_steps(), 2);
    assert_eq!(c.time_to_next_step(), Some(Duration::from_secs(1)));
}

#[test]
fn a_long_advance_finishes_the_run() {
    let mut c = controller(3);
    let total = trace(Algorithm::Bfs, c.graph(), c.endpoints()).len();
    c.start();
    c.advance(Duration::from_secs(1_000));
    assert_eq!(c.state(), PlaybackState::Finished);
    assert_eq!(c.applied_steps(), total);
    assert_eq!(c.time_to_next_step(), None);
    assert_eq!(
        c.renderer()
            .commands
            .iter()
            .filter(|cmd| **cmd == RenderCommand::Finished)
            .count(),
        1
    );
}

#[test]
fn start_after_finish_restarts() {
    let mut c = controller(3);
    c.run_to_end();
    c.renderer_mut().clear();

    let first = c.start().expect("restarted");
    assert_eq!(first.message, "Start BFS. Enqueue 0");
    assert_eq!(c.applied_steps(), 1);
    assert_eq!(c.renderer().commands[0], RenderCommand::ResetHighlights);
}

#[test]
fn speed_is_clamped_and_validated() {
    assert!(Speed::new(0.0).is_err());
    assert!(Speed::new(-1.0).is_err());
    assert!(Speed::new(f64::NAN).is_err());
    assert_eq!(Speed::new(1_000.0).expect("speed").value(), Speed::MAX);
    assert_eq!(Speed::new(0.01).expect("speed").value(), Speed::MIN);
    assert_eq!(Speed::new(4.0).expect("speed").delay(), Duration::from_millis(500));
    assert_eq!(Speed::default().delay(), Duration::from_secs(1));
}

#[test]
fn editing_the_graph_resets_the_run() {
    let mut c = controller(4);
    c.step();
    c.step();
    assert!(c.is_active());

    let added = c.edit(|g| g.add_vertex(500.0, 500.0).id);
    assert_eq!(added, v(4));
    assert!(!c.is_active());
    assert_eq!(c.state(), PlaybackState::Idle);
    assert_eq!(c.applied_steps(), 0);
    assert!(c.highlights().vertices.is_empty());
    assert_eq!(
        c.renderer().commands.last(),
        Some(&RenderCommand::Redraw {
            vertices: 5,
            edges: 3
        })
    );
}

#[test]
fn moving_a_vertex_keeps_the_run() {
    let mut c = controller(4);
    c.step();
    assert!(c.move_vertex(v(1), 10.0, 10.0));
    assert!(c.is_active());
    assert_eq!(c.applied_steps(), 1);
    assert!(!c.move_vertex(v(42), 0.0, 0.0));
}

#[test]
fn changing_settings_resets_only_on_change() {
    let mut c = controller(4);
    c.step();
    c.set_algorithm(Algorithm::Bfs);
    assert!(c.is_active());
    c.set_algorithm(Algorithm::Dfs);
    assert!(!c.is_active());

    c.step();
    c.set_start(Some(v(2)));
    assert!(!c.is_active());
    assert_eq!(c.endpoints().start, Some(v(2)));
    assert_eq!(c.endpoints().goal, Some(v(3)));

    c.set_goal(Some(v(3)));
    c.step();
    c.set_goal(Some(v(3)));
    assert!(c.is_active());
}

#[test]
fn highlights_track_the_run() {
    let mut c = controller(4);
    c.run_to_end();

    let marked: BTreeSet<VertexId> = c.highlights().vertices.keys().copied().collect();
    assert_eq!(marked, (0..4).map(v).collect());
    assert_eq!(c.highlights().vertex_mark(v(3)), Some(VertexMark::InProgress));
    assert_eq!(c.highlights().edge_mark(v(2), v(1)), Some(EdgeMark::Examined));
    assert_eq!(c.highlights().status, "BFS Complete");
}

#[test]
fn relaxed_edges_are_accepted() {
    let mut c = controller(3);
    c.set_algorithm(Algorithm::Dijkstra);
    c.run_to_end();
    assert_eq!(c.highlights().edge_mark(v(1), v(0)), Some(EdgeMark::Accepted));
    assert_eq!(c.highlights().edge_mark(v(1), v(2)), Some(EdgeMark::Accepted));
    let distances = c.highlights().distances.as_ref().expect("distances");
    assert_eq!(distances[&v(2)], 2.0);
}
