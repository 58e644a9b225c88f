use nodal::{ClaimOutcome, Color, LevelBuilder, Node, PuzzleType, Side};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // a five-wheel: hub 0 and a rim of 1..=5, which needs four colors
    let mut wheel = LevelBuilder::new(PuzzleType::KColor)
        .add_node(Node::new(0, (0.0, 0.0)))
        .add_nodes((1..=5).map(|uid| {
            let angle = uid as f32 * std::f32::consts::TAU / 5.0;
            Node::new(uid, (angle.cos(), angle.sin()))
        }))
        .connect_all((1..=5).map(|uid| (0, uid)))
        .connect_all((1..=5).map(|uid| (uid, uid % 5 + 1)))
        .build()
        .unwrap();

    info!(colorable = wheel.is_colorable(), "wheel with three colors");
    let mut four = wheel.config().clone();
    four.palette.push(Color::Yellow);
    let mut wheel_four = LevelBuilder::new(PuzzleType::KColor);
    wheel_four.config(four).add_nodes(wheel.nodes().copied());
    for uid in 1..=5 {
        wheel_four.connect(0, uid).connect(uid, uid % 5 + 1);
    }
    let wheel_four = wheel_four.build().unwrap();
    for (uid, color) in wheel_four.coloring_hint().unwrap() {
        wheel.set_color(uid, color);
    }
    println!("{}", wheel);
    info!(solved = wheel.check_solved(), "wheel painted from hint");

    // a bowtie, untangled by swapping two corners
    let mut bowtie = LevelBuilder::new(PuzzleType::Planar)
        .add_node(Node::new(1, (0.0, 0.0)))
        .add_node(Node::new(2, (1.0, 1.0)))
        .add_node(Node::new(3, (1.0, 0.0)))
        .add_node(Node::new(4, (0.0, 1.0)))
        .connect_all([(1, 2), (2, 3), (3, 4), (4, 1)])
        .build()
        .unwrap();
    info!(faults = bowtie.verdict().faults.len(), "bowtie before drag");
    bowtie.set_position(2, (1.0, 0.0));
    bowtie.set_position(3, (1.0, 1.0));
    info!(solved = bowtie.check_solved(), "bowtie after drag");

    // walk a square
    let mut square = LevelBuilder::new(PuzzleType::Hamiltonian)
        .add_nodes((1..=4).map(|uid| Node::new(uid, ((uid / 3) as f32, (uid % 2) as f32))))
        .connect_all([(1, 2), (2, 3), (3, 4), (4, 1)])
        .build()
        .unwrap();
    for uid in 1..=4 {
        if let Err(err) = square.step(uid) {
            warn!(%err, "step refused");
        }
    }
    info!(complete = square.is_complete(), walk = ?square.walk().steps(), "square walked");

    // both sides of a sim game played automatically
    let mut sim = LevelBuilder::new(PuzzleType::Sim)
        .add_nodes((1..=6).map(|uid| Node::new(uid, (uid as f32, 0.0))))
        .connect_all((1..=6).flat_map(|a| (a + 1..=6).map(move |b| (a, b))))
        .build()
        .unwrap();
    let mut rng = rand::rng();
    let mut side = Side::Player;
    loop {
        let Some((x, y)) = sim.choose_automatic_move(&mut rng) else {
            info!("no moves left");
            break;
        };
        match sim.claim(side, x, y) {
            Ok(ClaimOutcome::Triangle) => {
                info!(%side, x, y, "closed a triangle and lost");
                break;
            }
            Ok(ClaimOutcome::Open) => info!(%side, x, y, "claimed"),
            Err(err) => {
                warn!(%err, "claim refused");
                break;
            }
        }
        side = side.other();
    }
    println!("moves: {:?}", sim.history().flat());
}
