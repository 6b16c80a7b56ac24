//! Unit tests for route-graph.
//!
//! All tests use hand-crafted or seeded-random graphs so they run without
//! any table files on disk.

#[cfg(test)]
mod helpers {
    use route_core::{NodeId, Point};

    use crate::{RoadGraph, RoadGraphBuilder};

    /// The three-node line graph used across the suite:
    ///
    /// ```text
    /// a(0,0) ── b(1,0) ── c(2,0)     both edges weight 1
    /// ```
    pub fn line_graph() -> RoadGraph {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_node("b", Point::new(1.0, 0.0));
        b.add_node("c", Point::new(2.0, 0.0));
        b.add_edge("a", "b", 1.0);
        b.add_edge("b", "c", 1.0);
        b.build()
    }

    /// Exhaustive minimum over all simple paths from `from` to `to`.
    ///
    /// Exponential; only for cross-checking Dijkstra on small graphs.
    pub fn brute_force_min(graph: &RoadGraph, from: NodeId, to: NodeId) -> Option<f64> {
        fn dfs(
            graph: &RoadGraph,
            node: NodeId,
            to: NodeId,
            cost: f64,
            visited: &mut Vec<bool>,
            best: &mut Option<f64>,
        ) {
            if node == to {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            visited[node.index()] = true;
            for edge in graph.out_edges(node) {
                let neighbor = graph.edge_to[edge.index()];
                if !visited[neighbor.index()] {
                    dfs(
                        graph,
                        neighbor,
                        to,
                        cost + graph.edge_weight[edge.index()],
                        visited,
                        best,
                    );
                }
            }
            visited[node.index()] = false;
        }

        let mut best = None;
        let mut visited = vec![false; graph.node_count()];
        dfs(graph, from, to, 0.0, &mut visited, &mut best);
        best
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use route_core::Point;

    use crate::{RoadGraph, RoadGraphBuilder};

    #[test]
    fn empty_build() {
        let graph = RoadGraph::empty();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn undirected_edges_store_two_halves() {
        let graph = super::helpers::line_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4); // 2 undirected edges

        let a = graph.node_by_id("a").unwrap();
        let b = graph.node_by_id("b").unwrap();
        assert_eq!(graph.out_degree(a), 1);
        assert_eq!(graph.out_degree(b), 2);
    }

    /// For every loaded edge (u,v,w), adj(u) contains (v,w) and adj(v)
    /// contains (u,w).
    #[test]
    fn adjacency_is_symmetric() {
        let graph = super::helpers::line_graph();
        for e in 0..graph.edge_count() {
            let (u, v, w) = (graph.edge_from[e], graph.edge_to[e], graph.edge_weight[e]);
            let has_reverse = graph
                .out_edges(v)
                .any(|r| graph.edge_to[r.index()] == u && graph.edge_weight[r.index()] == w);
            assert!(has_reverse, "missing reverse of {u}->{v} (w={w})");
        }
    }

    #[test]
    fn repeated_node_row_overwrites_position() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_node("a", Point::new(9.0, 9.0));
        let graph = b.build();
        assert_eq!(graph.node_count(), 1);
        let a = graph.node_by_id("a").unwrap();
        assert_eq!(graph.position(a), Point::new(9.0, 9.0));
    }

    #[test]
    fn edge_endpoint_without_node_row_is_unplaced() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_edge("a", "ghost", 1.0);
        let graph = b.build();

        assert_eq!(graph.node_count(), 2);
        let ghost = graph.node_by_id("ghost").unwrap();
        assert!(!graph.position(ghost).is_placed());
        // Still routable: the edge was indexed.
        assert_eq!(graph.out_degree(ghost), 1);
    }

    #[test]
    fn parallel_edges_are_kept() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_node("b", Point::new(1.0, 0.0));
        b.add_edge("a", "b", 5.0);
        b.add_edge("a", "b", 1.0);
        let graph = b.build();
        assert_eq!(graph.edge_count(), 4);
        let a = graph.node_by_id("a").unwrap();
        assert_eq!(graph.out_degree(a), 2);
    }

    #[test]
    fn external_id_roundtrip() {
        let graph = super::helpers::line_graph();
        let b = graph.node_by_id("b").unwrap();
        assert_eq!(graph.external_id(b), "b");
        assert!(graph.node_by_id("nope").is_none());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;
    use std::path::Path;

    use route_core::Point;

    use crate::{load_graph, load_graph_readers, GraphError};

    const NODES: &str = "id,x,y\na,0.0,0.0\nb,1.0,0.0\nc,2.0,0.0\n";

    #[test]
    fn loads_tables() {
        let edges = "u,v,length\na,b,1.0\nb,c,1.0\n";
        let graph = load_graph_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        let a = graph.node_by_id("a").unwrap();
        assert_eq!(graph.position(a), Point::new(0.0, 0.0));
    }

    #[test]
    fn extra_columns_are_ignored() {
        // The extraction pipeline emits a geom_wkt column the router never reads.
        let edges = "u,v,geom_wkt,length\na,b,\"LINESTRING (0 0, 1 0)\",1.0\n";
        let graph = load_graph_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight[0], 1.0);
    }

    #[test]
    fn missing_length_defaults_to_zero() {
        let edges = "u,v\na,b\n";
        let graph = load_graph_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap();
        assert_eq!(graph.edge_weight, vec![0.0, 0.0]);
    }

    #[test]
    fn malformed_coordinate_fails_with_line_number() {
        let nodes = "id,x,y\na,0.0,0.0\nb,not-a-number,0.0\n";
        let edges = "u,v,length\n";
        let err = load_graph_readers(Cursor::new(nodes), Cursor::new(edges)).unwrap_err();
        match err {
            GraphError::MalformedRow { table, line, .. } => {
                assert_eq!(table, "nodes.csv");
                assert_eq!(line, 3);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn malformed_edge_row_names_edge_table() {
        let edges = "u,v,length\na,b,very-long\n";
        let err = load_graph_readers(Cursor::new(NODES), Cursor::new(edges)).unwrap_err();
        assert!(matches!(
            err,
            GraphError::MalformedRow {
                table: "edges.csv",
                ..
            }
        ));
    }

    #[test]
    fn missing_directory_is_data_unavailable() {
        let err = load_graph(Path::new("/definitely/not/a/graph/dir")).unwrap_err();
        match err {
            GraphError::DataUnavailable { path, .. } => {
                assert!(path.ends_with("nodes.csv"));
            }
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }
}

// ── Nearest-node search ───────────────────────────────────────────────────────

#[cfg(test)]
mod locate {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use route_core::Point;

    use crate::{LinearScan, NearestNode, RTreeLocator, RoadGraph, RoadGraphBuilder};

    #[test]
    fn empty_graph_matches_nothing() {
        let graph = RoadGraph::empty();
        assert!(LinearScan.nearest(&graph, Point::new(0.0, 0.0)).is_none());
        let rtree = RTreeLocator::build(&graph);
        assert!(rtree.nearest(&graph, Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn exact_position_snaps_with_zero_distance() {
        let graph = super::helpers::line_graph();
        let snap = LinearScan.nearest(&graph, Point::new(1.0, 0.0)).unwrap();
        assert_eq!(snap.node, graph.node_by_id("b").unwrap());
        assert_eq!(snap.distance, 0.0);
    }

    #[test]
    fn reports_snap_distance() {
        let graph = super::helpers::line_graph();
        let snap = LinearScan.nearest(&graph, Point::new(0.0, 2.5)).unwrap();
        assert_eq!(snap.node, graph.node_by_id("a").unwrap());
        assert_eq!(snap.distance, 2.5);
    }

    #[test]
    fn linear_scan_ties_break_to_first_stored() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("west", Point::new(-1.0, 0.0));
        b.add_node("east", Point::new(1.0, 0.0));
        let graph = b.build();
        // (0,0) is equidistant from both; the first stored node wins.
        let snap = LinearScan.nearest(&graph, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(snap.node, graph.node_by_id("west").unwrap());
    }

    #[test]
    fn unplaced_nodes_are_never_matched() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(5.0, 5.0));
        b.add_edge("a", "ghost", 1.0); // ghost has no position
        let graph = b.build();

        let snap = LinearScan.nearest(&graph, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(snap.node, graph.node_by_id("a").unwrap());

        let rtree = RTreeLocator::build(&graph);
        let snap = rtree.nearest(&graph, Point::new(0.0, 0.0)).unwrap();
        assert_eq!(snap.node, graph.node_by_id("a").unwrap());
    }

    /// The R-tree and the brute-force scan agree on random point sets
    /// (up to ties, where only the distance must agree).
    #[test]
    fn rtree_agrees_with_linear_scan() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut b = RoadGraphBuilder::new();
        for i in 0..50 {
            let p = Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            b.add_node(&format!("n{i}"), p);
        }
        let graph = b.build();
        let rtree = RTreeLocator::build(&graph);

        for _ in 0..200 {
            let q = Point::new(rng.gen_range(-10.0..110.0), rng.gen_range(-10.0..110.0));
            let lin = LinearScan.nearest(&graph, q).unwrap();
            let rt = rtree.nearest(&graph, q).unwrap();
            assert!(
                (lin.distance - rt.distance).abs() < 1e-9,
                "disagreement at {q}: linear {lin:?}, rtree {rt:?}"
            );
        }
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use std::time::Duration;

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use route_core::Point;

    use crate::{DijkstraRouter, GraphError, RoadGraphBuilder, Router};

    #[test]
    fn same_node_is_single_node_route() {
        let graph = super::helpers::line_graph();
        let a = graph.node_by_id("a").unwrap();
        let route = DijkstraRouter::new().route(&graph, a, a).unwrap();
        assert_eq!(route.nodes, vec![a]);
        assert_eq!(route.total_weight, 0.0);
        assert!(route.is_trivial());
    }

    #[test]
    fn line_graph_end_to_end() {
        let graph = super::helpers::line_graph();
        let a = graph.node_by_id("a").unwrap();
        let b = graph.node_by_id("b").unwrap();
        let c = graph.node_by_id("c").unwrap();
        let route = DijkstraRouter::new().route(&graph, a, c).unwrap();
        assert_eq!(route.nodes, vec![a, b, c]);
        assert_eq!(route.total_weight, 2.0);
    }

    #[test]
    fn picks_cheaper_of_two_branches() {
        // a ── b ── c ── e   (1 + 1 + 1 = 3)
        // a ────── d ──── e  (5 + 1     = 6)
        let mut bld = RoadGraphBuilder::new();
        for (id, x) in [("a", 0.0), ("b", 1.0), ("c", 2.0), ("d", 1.5), ("e", 3.0)] {
            bld.add_node(id, Point::new(x, 0.0));
        }
        bld.add_edge("a", "b", 1.0);
        bld.add_edge("b", "c", 1.0);
        bld.add_edge("c", "e", 1.0);
        bld.add_edge("a", "d", 5.0);
        bld.add_edge("d", "e", 1.0);
        let graph = bld.build();

        let a = graph.node_by_id("a").unwrap();
        let e = graph.node_by_id("e").unwrap();
        let route = DijkstraRouter::new().route(&graph, a, e).unwrap();
        assert_eq!(route.total_weight, 3.0);
        assert_eq!(route.nodes.len(), 4);
    }

    #[test]
    fn disconnected_components_have_no_route() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_node("b", Point::new(1.0, 0.0));
        b.add_node("x", Point::new(100.0, 0.0));
        b.add_node("y", Point::new(101.0, 0.0));
        b.add_edge("a", "b", 1.0);
        b.add_edge("x", "y", 1.0);
        let graph = b.build();

        let a = graph.node_by_id("a").unwrap();
        let y = graph.node_by_id("y").unwrap();
        let result = DijkstraRouter::new().route(&graph, a, y);
        assert!(matches!(result, Err(GraphError::NoRoute { .. })));
    }

    /// Parallel edges with weights 5 and 1: the search must use the
    /// cheaper one.
    #[test]
    fn parallel_edges_use_the_cheaper() {
        let mut b = RoadGraphBuilder::new();
        b.add_node("a", Point::new(0.0, 0.0));
        b.add_node("b", Point::new(1.0, 0.0));
        b.add_edge("a", "b", 5.0);
        b.add_edge("a", "b", 1.0);
        let graph = b.build();

        let a = graph.node_by_id("a").unwrap();
        let nb = graph.node_by_id("b").unwrap();
        let route = DijkstraRouter::new().route(&graph, a, nb).unwrap();
        assert_eq!(route.total_weight, 1.0);
        assert_eq!(route.nodes, vec![a, nb]);
    }

    /// Routing results are independent of edge insertion order.
    #[test]
    fn edge_insertion_order_does_not_matter() {
        let edges = [
            ("a", "b", 1.0),
            ("b", "c", 2.0),
            ("a", "c", 4.0),
            ("c", "d", 1.0),
            ("b", "d", 3.5),
        ];
        let build = |order: &[usize]| {
            let mut b = RoadGraphBuilder::new();
            for (id, x) in [("a", 0.0), ("b", 1.0), ("c", 2.0), ("d", 3.0)] {
                b.add_node(id, Point::new(x, 0.0));
            }
            for &i in order {
                let (u, v, w) = edges[i];
                b.add_edge(u, v, w);
            }
            b.build()
        };

        let forward = build(&[0, 1, 2, 3, 4]);
        let shuffled = build(&[4, 2, 0, 3, 1]);

        let router = DijkstraRouter::new();
        for from in ["a", "b", "c", "d"] {
            for to in ["a", "b", "c", "d"] {
                let r1 = router
                    .route(&forward, forward.node_by_id(from).unwrap(), forward.node_by_id(to).unwrap())
                    .unwrap();
                let r2 = router
                    .route(&shuffled, shuffled.node_by_id(from).unwrap(), shuffled.node_by_id(to).unwrap())
                    .unwrap();
                assert_eq!(r1.total_weight, r2.total_weight, "{from}->{to}");
            }
        }
    }

    /// Dijkstra totals equal the brute-force minimum over all simple
    /// paths, on seeded random graphs.
    #[test]
    fn matches_brute_force_on_random_graphs() {
        let mut rng = SmallRng::seed_from_u64(42);
        let router = DijkstraRouter::new();

        for _ in 0..20 {
            let n = 7;
            let mut b = RoadGraphBuilder::new();
            for i in 0..n {
                b.add_node(&format!("n{i}"), Point::new(i as f64, 0.0));
            }
            for i in 0..n {
                for j in (i + 1)..n {
                    if rng.gen_bool(0.35) {
                        b.add_edge(
                            &format!("n{i}"),
                            &format!("n{j}"),
                            rng.gen_range(1.0..10.0),
                        );
                    }
                }
            }
            let graph = b.build();

            for from in 0..n {
                for to in 0..n {
                    let s = graph.node_by_id(&format!("n{from}")).unwrap();
                    let t = graph.node_by_id(&format!("n{to}")).unwrap();
                    let expected = super::helpers::brute_force_min(&graph, s, t);
                    match (router.route(&graph, s, t), expected) {
                        (Ok(route), Some(min)) => assert!(
                            (route.total_weight - min).abs() < 1e-9,
                            "n{from}->n{to}: dijkstra {} vs brute {min}",
                            route.total_weight
                        ),
                        (Err(GraphError::NoRoute { .. }), None) => {}
                        (got, want) => panic!("n{from}->n{to}: {got:?} vs {want:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn deadline_aborts_pathological_search() {
        // A long chain forces thousands of settles before the target pops.
        let mut b = RoadGraphBuilder::new();
        let n = 5_000;
        for i in 0..n {
            b.add_node(&format!("n{i}"), Point::new(i as f64, 0.0));
        }
        for i in 0..n - 1 {
            b.add_edge(&format!("n{i}"), &format!("n{}", i + 1), 1.0);
        }
        let graph = b.build();

        let from = graph.node_by_id("n0").unwrap();
        let to = graph.node_by_id(&format!("n{}", n - 1)).unwrap();
        let result = DijkstraRouter::with_deadline(Duration::ZERO).route(&graph, from, to);
        assert!(matches!(result, Err(GraphError::Timeout { .. })));

        // Without a deadline the same query succeeds.
        let route = DijkstraRouter::new().route(&graph, from, to).unwrap();
        assert_eq!(route.total_weight, (n - 1) as f64);
    }
}

// ── GeoJSON extraction ────────────────────────────────────────────────────────

#[cfg(all(test, feature = "geojson"))]
mod extract {
    use std::io::Cursor;

    use crate::extract::extract_from_reader;
    use crate::{DijkstraRouter, GraphError, Router};

    fn feature_collection(geometries: &str) -> String {
        format!(r#"{{"type":"FeatureCollection","features":[{geometries}]}}"#)
    }

    #[test]
    fn linestring_becomes_segment_edges() {
        let json = feature_collection(
            r#"{"type":"Feature","properties":{},"geometry":
                {"type":"LineString","coordinates":[[0.0,0.0],[1.0,0.0],[1.0,1.0]]}}"#,
        );
        let graph = extract_from_reader(Cursor::new(json)).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4); // 2 segments, undirected
        assert_eq!(graph.edge_weight.iter().sum::<f64>(), 4.0); // each half weight 1
    }

    #[test]
    fn shared_endpoints_merge_into_one_node() {
        let json = feature_collection(
            r#"{"type":"Feature","properties":{},"geometry":
                {"type":"LineString","coordinates":[[0.0,0.0],[1.0,0.0]]}},
               {"type":"Feature","properties":{},"geometry":
                {"type":"LineString","coordinates":[[1.0,0.0],[2.0,0.0]]}}"#,
        );
        let graph = extract_from_reader(Cursor::new(json)).unwrap();
        assert_eq!(graph.node_count(), 3);

        // The shared node makes the two features routable end to end.
        let a = graph.node_by_id("n0.000000_0.000000").unwrap();
        let c = graph.node_by_id("n2.000000_0.000000").unwrap();
        let route = DijkstraRouter::new().route(&graph, a, c).unwrap();
        assert_eq!(route.total_weight, 2.0);
    }

    #[test]
    fn multilinestring_and_elevation_ordinates() {
        let json = feature_collection(
            r#"{"type":"Feature","properties":{},"geometry":
                {"type":"MultiLineString","coordinates":
                 [[[0.0,0.0,12.5],[3.0,4.0,13.0]],[[10.0,0.0],[10.0,2.0]]]}}"#,
        );
        let graph = extract_from_reader(Cursor::new(json)).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.edge_weight.iter().copied().fold(0.0, f64::max), 5.0);
    }

    #[test]
    fn non_line_geometries_are_skipped() {
        let json = feature_collection(
            r#"{"type":"Feature","properties":{},"geometry":
                {"type":"Point","coordinates":[0.0,0.0]}},
               {"type":"Feature","properties":{},"geometry":null}"#,
        );
        let graph = extract_from_reader(Cursor::new(json)).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn malformed_json_is_an_extract_error() {
        let result = extract_from_reader(Cursor::new("{not json"));
        assert!(matches!(result, Err(GraphError::Extract(_))));
    }
}
