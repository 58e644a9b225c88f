#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use unordered_pair::UnorderedPair;

    use crate::coloring::{self, SolverFailure};
    use crate::graph::{AdjacencyList, Edge, EdgeKind, GraphError, Vertex};
    use crate::node::{Color, Node, Position};
    use crate::planar::{self, Segment};
    use crate::rules::{Fault, PuzzleType};
    use crate::sim::{self, ClaimOutcome, MoveHistory, Side};
    use crate::{BuilderInvalidReason, Config, Level, LevelBuilder, MoveError};

    fn triangle(puzzle: PuzzleType) -> Level {
        LevelBuilder::new(puzzle)
            .add_node(Node::new(1, (0.0, 0.0)))
            .add_node(Node::new(2, (1.0, 0.0)))
            .add_node(Node::new(3, (0.5, 1.0)))
            .connect_all([(1, 2), (2, 3), (3, 1)])
            .build()
            .unwrap()
    }

    // unit square, sides plus whichever diagonals are asked for
    fn square(diagonals: &[(u32, u32)]) -> Level {
        LevelBuilder::new(PuzzleType::Planar)
            .add_node(Node::new(1, (0.0, 0.0)))
            .add_node(Node::new(2, (1.0, 0.0)))
            .add_node(Node::new(3, (1.0, 1.0)))
            .add_node(Node::new(4, (0.0, 1.0)))
            .connect_all([(1, 2), (2, 3), (3, 4), (4, 1)])
            .connect_all(diagonals.iter().copied())
            .build()
            .unwrap()
    }

    fn complete(puzzle: PuzzleType, n: u32) -> Level {
        LevelBuilder::new(puzzle)
            .add_nodes((1..=n).map(|uid| Node::new(uid, (uid as f32, (uid * uid) as f32))))
            .connect_all((1..=n).tuple_combinations())
            .build()
            .unwrap()
    }

    #[test]
    fn create_vertex_is_idempotent_on_uid() {
        let mut graph = AdjacencyList::new();
        let first = graph.create_vertex(Node::new(1, (0.0, 0.0)).with_color(Color::Red));
        let second = graph.create_vertex(Node::new(1, (5.0, 5.0)).with_color(Color::Blue));

        assert_eq!(first, second);
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.node(1).unwrap().color, Color::Red);
        assert_eq!(graph.node(1).unwrap().position, Position::flat(0.0, 0.0));
        assert_eq!(graph.edges_from(first), Some(vec![]));
    }

    #[test]
    fn undirected_edge_is_stored_both_ways_once() {
        let mut graph = AdjacencyList::new();
        let a = graph.create_vertex(Node::new(1, (0.0, 0.0)));
        let b = graph.create_vertex(Node::new(2, (1.0, 0.0)));

        graph.add_edge(EdgeKind::Undirected, a, b).unwrap();
        graph.add_edge(EdgeKind::Undirected, a, b).unwrap();
        graph.add_edge(EdgeKind::Directed, b, a).unwrap();

        assert_eq!(graph.edges_from(a), Some(vec![Edge::new(a, b)]));
        assert_eq!(graph.edges_from(b), Some(vec![Edge::new(b, a)]));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.undirected_edges().len(), 1);
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut graph = AdjacencyList::new();
        let a = graph.create_vertex(Node::new(1, (0.0, 0.0)));
        let b = graph.create_vertex(Node::new(2, (1.0, 0.0)));

        graph.add_edge(EdgeKind::Directed, a, b).unwrap();

        assert_eq!(graph.neighbours(1), vec![2]);
        assert_eq!(graph.neighbours(2), Vec::<u32>::new());
        assert_ne!(Edge::new(a, b), Edge::new(b, a));
    }

    #[test]
    fn add_edge_rejects_unknown_endpoint() {
        let mut graph = AdjacencyList::new();
        let a = graph.create_vertex(Node::new(1, (0.0, 0.0)));

        assert_eq!(graph.add_edge(EdgeKind::Undirected, a, Vertex::from(2)), Err(GraphError::UnknownVertex(2)));
        assert_eq!(graph.add_edge(EdgeKind::Directed, Vertex::from(9), a), Err(GraphError::UnknownVertex(9)));
        assert_eq!(graph.edges_from(a), Some(vec![]));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn lookup_misses_change_nothing() {
        let mut level = triangle(PuzzleType::KColor);

        assert!(!level.set_color(42, Color::Red));
        assert!(!level.set_position(42, (1.0, 1.0)));
        assert_eq!(level.neighbours(42), Vec::<u32>::new());
        assert_eq!(level.edges_from(42), None);
        assert_eq!(level.mirror_uid(42), None);
        assert!(level.nodes().all(|node| node.color.is_unset()));
    }

    #[test]
    fn neighbours_follow_insertion_order() {
        let level = complete(PuzzleType::KColor, 4);
        assert_eq!(level.neighbours(1), vec![2, 3, 4]);
        assert_eq!(level.neighbours(3), vec![1, 2, 4]);
    }

    #[test]
    fn set_position_moves_only_the_target() {
        let mut level = triangle(PuzzleType::Planar);
        assert!(level.set_position(2, (3.0, 4.0, 5.0)));
        assert_eq!(level.node(2).unwrap().position, Position::new(3.0, 4.0, 5.0));
        assert_eq!(level.node(1).unwrap().position, Position::flat(0.0, 0.0));
    }

    #[test]
    fn k_color_triangle() {
        let mut level = triangle(PuzzleType::KColor);
        assert!(!level.check_solved());

        level.set_color(1, Color::Red);
        level.set_color(2, Color::Green);
        level.set_color(3, Color::Blue);
        assert!(level.check_solved());

        level.set_color(2, Color::Red);
        let verdict = level.verdict();
        assert!(!verdict.solved);
        // both directions of 1-2
        assert_eq!(verdict.faults, vec![
            Fault::Clash(Edge::new(Vertex::from(1), Vertex::from(2))),
            Fault::Clash(Edge::new(Vertex::from(2), Vertex::from(1))),
        ]);
    }

    #[test]
    fn k_color_rejects_a_single_unpainted_vertex() {
        let mut level = triangle(PuzzleType::KColor);
        level.set_color(1, Color::Red);
        level.set_color(2, Color::Green);
        assert!(!level.check_solved());
    }

    #[test]
    fn hamiltonian_solved_when_all_walked() {
        let mut level = LevelBuilder::new(PuzzleType::Hamiltonian)
            .add_nodes((1..=4).map(|uid| Node::new(uid, (uid as f32, 0.0))))
            .connect_all([(1, 2), (2, 3), (3, 4)])
            .build()
            .unwrap();

        for uid in 1..=3 {
            level.set_color(uid, Color::Gold);
        }
        assert!(!level.check_solved());
        assert_eq!(level.verdict().faults, vec![Fault::Unvisited(Vertex::from(4))]);

        level.set_color(4, Color::Gold);
        assert!(level.check_solved());
    }

    #[test]
    fn hamiltonian_uses_configured_walk_color() {
        let mut level = LevelBuilder::new(PuzzleType::Hamiltonian)
            .config(Config::default().with_walk_color(Color::Cyan))
            .add_node(Node::new(1, (0.0, 0.0)))
            .build()
            .unwrap();

        level.set_color(1, Color::Gold);
        assert!(!level.check_solved());
        level.set_color(1, Color::Cyan);
        assert!(level.check_solved());
    }

    #[test]
    fn walk_follows_edges_and_closes() {
        let mut level = LevelBuilder::new(PuzzleType::Hamiltonian)
            .add_nodes((1..=4).map(|uid| Node::new(uid, (uid as f32, 0.0))))
            .connect_all([(1, 2), (2, 3), (3, 4), (4, 1)])
            .build()
            .unwrap();

        level.step(1).unwrap();
        assert_eq!(level.step(3), Err(MoveError::NotAdjacent { from: 1, to: 3 }));
        level.step(2).unwrap();
        assert_eq!(level.step(1), Err(MoveError::AlreadyVisited(1)));
        assert_eq!(level.step(7), Err(MoveError::UnknownVertex(7)));
        level.step(3).unwrap();
        assert!(!level.is_complete());

        level.step(4).unwrap();
        assert_eq!(level.walk().steps(), &[1, 2, 3, 4]);
        assert!(level.check_solved());
        assert!(level.walk_closes());
        assert!(level.is_complete());

        assert_eq!(level.undo_step(), Some(4));
        assert!(level.node(4).unwrap().color.is_unset());
        assert!(!level.check_solved());

        level.reset_walk();
        assert!(level.walk().is_empty());
        assert!(level.nodes().all(|node| node.color.is_unset()));
    }

    #[test]
    fn walk_may_close_on_mirror_of_start() {
        let mut level = LevelBuilder::new(PuzzleType::Hamiltonian)
            .add_node(Node::new(1, (0.0, 0.0)).with_mirror(2))
            .add_node(Node::new(2, (2.0, 0.0)).with_mirror(1))
            .add_node(Node::new(3, (0.0, 1.0)))
            .add_node(Node::new(4, (2.0, 1.0)))
            .connect_all([(1, 3), (3, 4), (4, 2)])
            .build()
            .unwrap();

        level.step(1).unwrap();
        assert!(!level.walk_closes());
        level.step(3).unwrap();
        level.step(4).unwrap();
        // 4 has no edge to 1, only to its mirror 2
        assert!(!level.neighbours(4).contains(&1));
        assert!(level.walk_closes());
    }

    #[test]
    fn mirrored_paint_reaches_partner() {
        let mut level = LevelBuilder::new(PuzzleType::KColor)
            .add_node(Node::new(1, (-1.0, 0.0)).with_mirror(2))
            .add_node(Node::new(2, (1.0, 0.0)).with_mirror(1))
            .add_node(Node::new(3, (0.0, 1.0)))
            .build()
            .unwrap();

        assert_eq!(level.mirror_uid(1), Some(2));
        assert_eq!(level.mirror_uid(3), None);

        assert!(level.set_color_mirrored(2, Color::Purple));
        assert_eq!(level.node(1).unwrap().color, Color::Purple);
        assert!(level.set_color_mirrored(3, Color::Orange));
        assert_eq!(level.node(3).unwrap().color, Color::Orange);
    }

    #[test]
    fn planar_square_with_diagonals() {
        let crossed = square(&[(1, 3), (2, 4)]);
        let verdict = crossed.verdict();
        assert!(!verdict.solved);
        assert_eq!(verdict.faults.len(), 1);
        assert_eq!(planar::crossing_edges(crossed.graph()).len(), 2);

        assert!(square(&[(1, 3)]).check_solved());
        assert!(square(&[]).check_solved());
    }

    #[test]
    fn planar_untangled_by_dragging() {
        let mut level = LevelBuilder::new(PuzzleType::Planar)
            .add_node(Node::new(1, (0.0, 0.0)))
            .add_node(Node::new(2, (1.0, 0.0)))
            .add_node(Node::new(3, (1.0, 1.0)))
            .add_node(Node::new(4, (0.0, 1.0)))
            .connect_all([(1, 3), (2, 4)])
            .build()
            .unwrap();
        assert!(!level.check_solved());

        level.set_position(4, (2.0, 1.0));
        assert!(level.check_solved());
    }

    #[test]
    fn planar_crossing_ignores_depth() {
        let level = LevelBuilder::new(PuzzleType::Planar)
            .add_node(Node::new(1, (0.0, 0.0, 0.0)))
            .add_node(Node::new(2, (1.0, 0.0, -3.0)))
            .add_node(Node::new(3, (1.0, 1.0, 5.0)))
            .add_node(Node::new(4, (0.0, 1.0, 2.0)))
            .connect_all([(1, 3), (2, 4)])
            .build()
            .unwrap();

        let verdict = level.verdict();
        assert!(!verdict.solved);
        assert!(matches!(verdict.faults.as_slice(), [Fault::Crossing(..)]));
    }

    #[test]
    fn segments_crossing_and_not() {
        let x1 = Segment::new((0.0, 0.0), (2.0, 2.0));
        let x2 = Segment::new((0.0, 2.0), (2.0, 0.0));
        assert!(x1.crosses(&x2));
        assert!(x2.crosses(&x1));

        let p1 = Segment::new((0.0, 0.0), (1.0, 0.0));
        let p2 = Segment::new((0.0, 1.0), (1.0, 1.0));
        assert!(!p1.crosses(&p2));

        // a T junction touches at v == 0
        let bar = Segment::new((0.0, 0.0), (2.0, 0.0));
        let stem = Segment::new((1.0, 0.0), (1.0, 1.0));
        assert!(!bar.crosses(&stem));

        // disjoint but not parallel
        let far = Segment::new((5.0, 5.0), (6.0, 9.0));
        assert!(!x1.crosses(&far));
    }

    #[test]
    fn collinear_overlap_is_not_reported() {
        let a = Segment::new((0.0, 0.0), (2.0, 0.0));
        let b = Segment::new((1.0, 0.0), (3.0, 0.0));
        assert!(!a.crosses(&b));
    }

    #[test]
    fn segment_never_crosses_itself() {
        let a = Segment::new((0.0, 0.0), (2.0, 3.0));
        assert!(!a.crosses(&a));
    }

    #[test]
    fn sim_never_solved_by_scan() {
        let mut level = complete(PuzzleType::Sim, 6);
        assert!(!level.check_solved());
        level.claim(Side::Player, 1, 2).unwrap();
        assert!(!level.check_solved());
        assert!(level.verdict().faults.is_empty());
    }

    #[test]
    fn move_history_keeps_pairs_whole() {
        let mut history = MoveHistory::new();
        history.push(1, 2);
        history.push(3, 4);

        assert_eq!(history.flat(), vec![1, 2, 3, 4]);
        assert!(history.contains(2, 1));
        assert!(history.contains(3, 4));
        // straddles two moves
        assert!(!history.contains(2, 3));
    }

    #[test]
    fn legality_checks_both_histories() {
        let current = MoveHistory::from_iter([(1, 2)]);
        let used = MoveHistory::from_iter([(5, 3)]);

        assert!(!sim::is_legal_move(&current, &used, 2, 1));
        assert!(!sim::is_legal_move(&current, &used, 3, 5));
        assert!(sim::is_legal_move(&current, &used, 1, 3));
    }

    #[test]
    fn claim_marks_paints_and_records() {
        let mut level = complete(PuzzleType::Sim, 6);

        assert_eq!(level.claim(Side::Player, 1, 2), Ok(ClaimOutcome::Open));
        assert_eq!(level.node(1).unwrap().color, Color::Red);
        assert_eq!(level.node(2).unwrap().color, Color::Red);
        assert_eq!(level.history().flat(), vec![1, 2]);
        let mark = level.graph().mark(Edge::new(Vertex::from(2), Vertex::from(1))).unwrap();
        assert_eq!(mark.claimed_by, Some(Side::Player));

        assert_eq!(level.claim(Side::Opponent, 2, 1), Err(MoveError::AlreadyClaimed(2, 1)));
        assert_eq!(level.claim(Side::Opponent, 3, 3), Err(MoveError::NoSuchEdge(3, 3)));
        assert_eq!(level.claim(Side::Opponent, 3, 9), Err(MoveError::UnknownVertex(9)));
        assert!(!level.is_legal_move(1, 2));
        assert_eq!(level.legal_moves().len(), 14);
    }

    #[test]
    fn claim_outside_sim_is_refused() {
        let mut level = triangle(PuzzleType::KColor);
        assert_eq!(level.claim(Side::Player, 1, 2), Err(MoveError::WrongPuzzle(PuzzleType::KColor)));
        assert_eq!(level.step(1), Err(MoveError::WrongPuzzle(PuzzleType::KColor)));
    }

    #[test]
    fn own_triangle_loses() {
        let mut level = complete(PuzzleType::Sim, 6);

        assert_eq!(level.claim(Side::Player, 1, 2), Ok(ClaimOutcome::Open));
        assert_eq!(level.claim(Side::Opponent, 4, 5), Ok(ClaimOutcome::Open));
        assert_eq!(level.claim(Side::Player, 2, 3), Ok(ClaimOutcome::Open));
        // opponent owns 4-5 only, so 1-3 would not close anything for them
        assert!(!sim::completes_triangle(level.graph(), Side::Opponent, 1, 3));
        assert_eq!(level.claim(Side::Player, 3, 1), Ok(ClaimOutcome::Triangle));
    }

    #[test]
    fn automatic_move_is_a_legal_edge() {
        let level = complete(PuzzleType::Sim, 6);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let (x, y) = level.choose_automatic_move(&mut rng).unwrap();
            assert_ne!(x, y);
            assert!(level.neighbours(x).contains(&y));
            assert!(level.is_legal_move(x, y));
        }
    }

    #[test]
    fn automatic_move_finds_last_open_edge() {
        let mut level = complete(PuzzleType::Sim, 6);
        level.start_sim((1..=6).tuple_combinations().filter(|pair| *pair != (5, 6)).collect());
        let mut rng = StdRng::seed_from_u64(11);

        let (x, y) = level.choose_automatic_move(&mut rng).unwrap();
        assert_eq!(UnorderedPair(x, y), UnorderedPair(5, 6));

        // zero budget skips straight to enumeration
        let (x, y) = sim::choose_automatic_move(level.graph(), level.history(), level.used(), 0, &mut rng).unwrap();
        assert_eq!(UnorderedPair(x, y), UnorderedPair(5, 6));

        level.claim(Side::Player, 6, 5).unwrap();
        assert!(level.sim_over());
        assert_eq!(level.choose_automatic_move(&mut rng), None);
        assert_eq!(level.respond(&mut rng), Ok(None));
    }

    #[test]
    fn automatic_move_ignores_missing_edges() {
        // a path, so most random pairs are not edges
        let level = LevelBuilder::new(PuzzleType::Sim)
            .add_nodes((1..=8).map(|uid| Node::new(uid, (uid as f32, 0.0))))
            .connect(3, 4)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let (x, y) = level.choose_automatic_move(&mut rng).unwrap();
        assert_eq!(UnorderedPair(x, y), UnorderedPair(3, 4));
    }

    #[test]
    fn start_sim_resets_claims() {
        let mut level = complete(PuzzleType::Sim, 4);
        level.claim(Side::Player, 1, 2).unwrap();
        level.claim(Side::Opponent, 3, 4).unwrap();

        level.start_sim(MoveHistory::from_iter([(2, 3)]));

        assert!(level.history().is_empty());
        assert!(level.is_legal_move(1, 2));
        assert!(!level.is_legal_move(3, 2));
        assert!(level.graph().edges().all(|edge| level.graph().mark(edge).unwrap().claimed_by.is_none()));
        assert_eq!(level.claim(Side::Player, 2, 3), Err(MoveError::AlreadyClaimed(2, 3)));
    }

    #[test]
    fn start_sim_unpaints_claimed_vertices() {
        let mut level = LevelBuilder::new(PuzzleType::Sim)
            .add_nodes((1..=3).map(|uid| Node::new(uid, (uid as f32, 0.0))))
            .connect_all([(1, 2), (2, 3)])
            .build()
            .unwrap();
        level.claim(Side::Player, 1, 2).unwrap();
        assert_eq!(level.node(1).unwrap().color, Color::Red);

        level.start_sim(MoveHistory::new());

        assert!(level.nodes().all(|node| node.color.is_unset()));
    }

    #[test]
    fn used_moves_seed_from_builder() {
        let level = LevelBuilder::new(PuzzleType::Sim)
            .add_nodes((1..=3).map(|uid| Node::new(uid, (uid as f32, 0.0))))
            .connect_all([(1, 2), (2, 3)])
            .used_moves(MoveHistory::from_iter([(2, 1)]))
            .build()
            .unwrap();

        assert_eq!(level.legal_moves(), vec![(2, 3)]);
    }

    #[test]
    fn full_sim_game_ends_in_a_triangle() {
        // every two-coloring of K6 has a monochrome triangle
        let mut level = complete(PuzzleType::Sim, 6);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut side = Side::Player;
        let mut loser = None;

        while let Some((x, y)) = level.choose_automatic_move(&mut rng) {
            if level.claim(side, x, y).unwrap() == ClaimOutcome::Triangle {
                loser = Some(side);
                break;
            }
            side = side.other();
        }

        assert_eq!(loser, Some(side));
        assert!(level.history().len() <= 15);
        assert_eq!(level.history().moves().iter().map(|(x, y)| UnorderedPair(*x, *y)).unique().count(), level.history().len());
    }

    #[test]
    fn respond_claims_for_opponent() {
        let mut level = complete(PuzzleType::Sim, 6);
        let mut rng = StdRng::seed_from_u64(5);
        level.claim(Side::Player, 1, 2).unwrap();

        let ((x, y), outcome) = level.respond(&mut rng).unwrap().unwrap();
        assert_eq!(outcome, ClaimOutcome::Open);
        assert_eq!(level.history().len(), 2);
        assert_eq!(level.node(x).unwrap().color, Color::Blue);
        assert_eq!(level.node(y).unwrap().color, Color::Blue);
    }

    #[test]
    fn builder_reports_every_problem() {
        let reasons = LevelBuilder::new(PuzzleType::KColor)
            .add_node(Node::new(1, (0.0, 0.0)))
            .add_node(Node::new(1, (1.0, 0.0)))
            .add_node(Node::new(2, (2.0, 0.0)))
            .add_node(Node::new(3, (3.0, 0.0)).with_mirror(7))
            .add_node(Node::new(4, (4.0, 0.0)).with_mirror(2))
            .connect(1, 9)
            .connect(2, 2)
            .connect(1, 2)
            .build()
            .unwrap_err();

        assert_eq!(reasons, vec![
            BuilderInvalidReason::DuplicateUid(1),
            BuilderInvalidReason::DanglingEdge { from: 1, to: 9 },
            BuilderInvalidReason::SelfLoop(2),
            BuilderInvalidReason::MissingMirror { uid: 3, mirror: 7 },
            BuilderInvalidReason::AsymmetricMirror { uid: 4, mirror: 2 },
        ]);
        assert_eq!(reasons[1].to_string(), "edge 1 -> 9 has an endpoint that is not a node");
    }

    #[test]
    fn coloring_hint_solves_level() {
        let mut level = complete(PuzzleType::KColor, 4);
        assert!(!level.is_colorable());
        assert_eq!(level.coloring_hint(), Err(SolverFailure::Inconsistent));

        let mut level_two = triangle(PuzzleType::KColor);
        assert!(level_two.is_colorable());
        for (uid, color) in level_two.coloring_hint().unwrap() {
            level_two.set_color(uid, color);
        }
        assert!(level_two.check_solved());

        // four colors are enough for K4
        level.config.palette.push(Color::Yellow);
        for (uid, color) in level.coloring_hint().unwrap() {
            level.set_color(uid, color);
        }
        assert!(level.check_solved());
    }

    #[test]
    fn two_colors_fail_on_odd_cycle() {
        let level = triangle(PuzzleType::KColor);
        assert_eq!(coloring::solve(level.graph(), &[Color::Red, Color::Green]), Err(SolverFailure::Inconsistent));
        assert_eq!(coloring::solve(level.graph(), &[]), Err(SolverFailure::Inconsistent));
    }

    #[test]
    fn palette_ignores_unset_and_repeats() {
        let mut level = LevelBuilder::new(PuzzleType::KColor)
            .add_node(Node::new(1, (0.0, 0.0)))
            .add_node(Node::new(2, (1.0, 0.0)))
            .connect(1, 2)
            .build()
            .unwrap();

        level.config.palette = vec![Color::White, Color::Red];
        assert_eq!(level.coloring_hint(), Err(SolverFailure::Inconsistent));
        assert!(!level.is_colorable());

        level.config.palette = vec![Color::Red, Color::Red, Color::White, Color::Green];
        let hint = level.coloring_hint().unwrap();
        assert!(hint.values().all(|color| !color.is_unset()));
        for (uid, color) in hint {
            level.set_color(uid, color);
        }
        assert!(level.check_solved());
    }

    #[test]
    fn names_parse() {
        assert_eq!("kColor".parse::<PuzzleType>(), Ok(PuzzleType::KColor));
        assert_eq!("sim".parse::<PuzzleType>(), Ok(PuzzleType::Sim));
        assert_eq!(PuzzleType::Planar.to_string(), "planar");
        assert_eq!("gold".parse::<Color>(), Ok(Color::Gold));
        assert_eq!(Color::White.to_string(), "white");
        assert!("mauve".parse::<Color>().is_err());
        assert!(Color::paints().all(|color| !color.is_unset()));
    }

    #[test]
    fn level_display_lists_nodes() {
        let mut level = triangle(PuzzleType::KColor);
        level.set_color(1, Color::Red);
        assert_eq!(level.to_string(), "kColor level
1 red (0, 0, 0) -> [2, 3]
2 white (1, 0, 0) -> [1, 3]
3 white (0.5, 1, 0) -> [2, 1]
");
    }

    mod properties {
        use itertools::Itertools;
        use proptest::prelude::*;
        use strum::VariantArray;

        use crate::node::{Color, Node};
        use crate::planar::{self, Segment};
        use crate::rules::PuzzleType;
        use crate::sim::{self, MoveHistory};
        use crate::LevelBuilder;

        fn point() -> impl Strategy<Value = (f32, f32)> {
            (-100i32..100, -100i32..100).prop_map(|(x, y)| (x as f32 / 4.0, y as f32 / 4.0))
        }

        proptest! {
            #[test]
            fn shared_endpoint_never_crosses(shared in point(), p in point(), q in point()) {
                prop_assert!(!Segment::new(shared, p).crosses(&Segment::new(shared, q)));
                prop_assert!(!Segment::new(p, shared).crosses(&Segment::new(shared, q)));
            }

            #[test]
            fn shared_vertex_never_crosses(a in point(), b in point(), c in point()) {
                let level = LevelBuilder::new(PuzzleType::Planar)
                    .add_node(Node::new(1, a))
                    .add_node(Node::new(2, b))
                    .add_node(Node::new(3, c))
                    .connect_all([(1, 2), (1, 3)])
                    .build()
                    .unwrap();
                let edges = level.graph().undirected_edges();
                prop_assert!(!planar::edges_intersect(level.graph(), edges[0], edges[1]));
                prop_assert!(level.check_solved());
            }

            #[test]
            fn crossing_is_symmetric(a in point(), b in point(), c in point(), d in point()) {
                let (s1, s2) = (Segment::new(a, b), Segment::new(c, d));
                prop_assert_eq!(s1.crosses(&s2), s2.crosses(&s1));
            }

            #[test]
            fn legality_is_symmetric(
                current in prop::collection::vec((0u32..6, 0u32..6), 0..8),
                used in prop::collection::vec((0u32..6, 0u32..6), 0..8),
                x in 0u32..6,
                y in 0u32..6,
            ) {
                let (current, used): (MoveHistory, MoveHistory) = (current.into_iter().collect(), used.into_iter().collect());
                prop_assert_eq!(sim::is_legal_move(&current, &used, x, y), sim::is_legal_move(&current, &used, y, x));
            }

            #[test]
            fn k_color_matches_definition(
                colors in prop::collection::vec(0usize..Color::VARIANTS.len(), 2..7),
                raw in prop::collection::vec((0usize..7, 1usize..7), 0..12),
            ) {
                let n = colors.len();
                let pairs = raw.into_iter()
                    .map(|(a, step)| (a % n, (a + step) % n))
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (a as u32, b as u32))
                    .collect_vec();

                let level = LevelBuilder::new(PuzzleType::KColor)
                    .add_nodes(colors.iter().enumerate().map(|(uid, c)| Node::new(uid as u32, (uid as f32, 0.0)).with_color(Color::VARIANTS[*c])))
                    .connect_all(pairs.iter().copied())
                    .build()
                    .unwrap();

                let color = |uid: u32| Color::VARIANTS[colors[uid as usize]];
                let expected = pairs.iter().all(|(a, b)| !color(*a).is_unset() && !color(*b).is_unset() && color(*a) != color(*b));
                prop_assert_eq!(level.check_solved(), expected);
            }
        }
    }
}
