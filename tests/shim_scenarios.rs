//! End-to-end shim runs for each game layout.
//!
//! A recording engine captures the init record and every delivered turn so
//! the tests can check exactly what was parsed and how many deliveries
//! happened.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use turnpipe::games::{
    Building, GatewayInit, GatewayTurn, MinesInit, MinesTurn, Pellet, PelletsInit, PelletsTurn,
    Position, TERRAIN_ROWS,
};
use turnpipe::{Engine, EngineError, Game, Gateway, Mines, Pellets, Ports, ShimError, run};

/// Everything a shim handed to the engine.
struct Log<G: Game> {
    init: Option<G::Init>,
    turns: Vec<G::Turn>,
}

/// Engine that records deliveries and answers with a numbered action.
struct Recorder<G: Game> {
    log: Rc<RefCell<Log<G>>>,
}

impl<G: Game> Engine<G> for Recorder<G> {
    fn deliver(&mut self, turn: G::Turn, ports: &mut Ports) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        log.turns.push(turn);
        ports.diagnostic(format!("turn {}", log.turns.len()));
        ports.action(format!("ACTION {}", log.turns.len()));
        Ok(())
    }
}

struct Outcome<G: Game> {
    result: Result<u64, ShimError>,
    log: Log<G>,
    stdout: String,
    stderr: String,
}

fn run_recorded<G: Game>(game: &G, input: &str) -> Outcome<G> {
    let log = Rc::new(RefCell::new(Log {
        init: None,
        turns: Vec::new(),
    }));
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let engine_log = Rc::clone(&log);
    let result = run(
        game,
        Cursor::new(input.to_string()),
        &mut stdout,
        &mut stderr,
        move |init| {
            engine_log.borrow_mut().init = Some(init);
            Ok(Recorder { log: engine_log })
        },
    );
    let log = Rc::try_unwrap(log).ok().unwrap().into_inner();
    Outcome {
        result,
        log,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

fn terrain() -> String {
    "#...........\n".repeat(TERRAIN_ROWS)
}

#[test]
fn test_gateway_scenario() {
    let outcome = run_recorded(&Gateway, "4 4 2\n0 1\n0 2\n1 3\n2 3\n1\n3\n0\n");

    assert_eq!(outcome.result.unwrap(), 1);
    assert_eq!(
        outcome.log.init,
        Some(GatewayInit {
            node_count: 4,
            link_count: 4,
            exit_count: 2,
            links: vec![[0, 1], [0, 2], [1, 3], [2, 3]],
            exits: vec![1, 3],
        })
    );
    assert_eq!(outcome.log.turns, vec![GatewayTurn { skynet_node: 0 }]);
    assert_eq!(outcome.stdout, "ACTION 1\n");
    assert_eq!(outcome.stderr, "turn 1\n");
}

#[test]
fn test_gateway_one_delivery_per_turn() {
    let outcome = run_recorded(&Gateway, "3 2 1\n0 1\n1 2\n2\n0\n1\n0\n1\n");

    assert_eq!(outcome.result.unwrap(), 4);
    let nodes: Vec<_> = outcome.log.turns.iter().map(|t| t.skynet_node).collect();
    assert_eq!(nodes, vec![0, 1, 0, 1]);
    assert_eq!(outcome.stdout, "ACTION 1\nACTION 2\nACTION 3\nACTION 4\n");
}

#[test]
fn test_mines_scenario() {
    let input = format!("2\n3 4\n5 6\n10\n5\n12\n3\n{}0\n0\n", terrain());
    let outcome = run_recorded(&Mines, &input);

    assert_eq!(outcome.result.unwrap(), 1);
    assert_eq!(
        outcome.log.init,
        Some(MinesInit {
            number_mine_spots: 2,
            mines: vec![Position { x: 3, y: 4 }, Position { x: 5, y: 6 }],
        })
    );
    assert_eq!(
        outcome.log.turns,
        vec![MinesTurn {
            gold: 10,
            income: 5,
            opponent_gold: 12,
            opponent_income: 3,
            terrain: vec!["#...........".to_string(); TERRAIN_ROWS],
            building_count: 0,
            buildings: vec![],
            unit_count: 0,
            units: vec![],
        }]
    );
}

#[test]
fn test_mines_two_turns_with_buildings() {
    let turn = |gold: i32| format!("{gold}\n1\n0\n0\n{}1\n0 0 1 1\n0\n", terrain());
    let input = format!("0\n{}{}", turn(7), turn(8));
    let outcome = run_recorded(&Mines, &input);

    assert_eq!(outcome.result.unwrap(), 2);
    assert_eq!(outcome.log.turns[1].gold, 8);
    assert_eq!(
        outcome.log.turns[1].buildings,
        vec![Building { owner: 0, building_type: 0, x: 1, y: 1 }]
    );
}

#[test]
fn test_pellets_consumes_declared_blocks() {
    // Three pacs, then two pellets; the trailing turn must start at the
    // score line, so any over- or under-read breaks it.
    let input = "\
3 2
# #
###
10 4
3
0 1 1 0 ROCK 0 0
1 1 2 1 PAPER 5 3
0 0 0 1 SCISSORS 0 10
2
0 1 1
2 1 10
11 4
0
0
";
    let outcome = run_recorded(&Pellets, input);

    assert_eq!(outcome.result.unwrap(), 2);
    assert_eq!(
        outcome.log.init,
        Some(PelletsInit {
            width: 3,
            height: 2,
            rows: vec!["# #".to_string(), "###".to_string()],
        })
    );

    let first: &PelletsTurn = &outcome.log.turns[0];
    assert_eq!(first.visible_pac_count, 3);
    assert_eq!(first.pacs.len(), 3);
    assert_eq!(first.pacs[2].type_id, "SCISSORS");
    assert_eq!(first.pellets[1], Pellet { x: 2, y: 1, value: 10 });

    let second = &outcome.log.turns[1];
    assert_eq!((second.my_score, second.opponent_score), (11, 4));
    assert!(second.pacs.is_empty());
    assert!(second.pellets.is_empty());
}

#[test]
fn test_eof_inside_turn_is_an_error() {
    let outcome = run_recorded(&Pellets, "1 1\n \n0 0\n2\n0 1 0 0 ROCK 0 0\n");

    assert!(matches!(
        outcome.result,
        Err(ShimError::Parse(turnpipe::ParseError::UnexpectedEof { line: 6, .. }))
    ));
    assert!(outcome.log.turns.is_empty());
    assert!(outcome.stdout.is_empty());
}

#[test]
fn test_huge_declared_count_is_an_error() {
    let pellets = run_recorded(&Pellets, "1 1\n#\n0 0\n2000000000\n");
    assert!(matches!(
        pellets.result,
        Err(ShimError::Parse(turnpipe::ParseError::UnexpectedEof { line: 5, field: "pac" }))
    ));
    assert!(pellets.log.turns.is_empty());

    let gateway = run_recorded(&Gateway, "2 2147483647 1\n0 1\n");
    assert!(matches!(
        gateway.result,
        Err(ShimError::Parse(turnpipe::ParseError::UnexpectedEof { line: 3, field: "link" }))
    ));
    assert!(gateway.log.init.is_none());

    let mines = run_recorded(&Mines, &format!("0\n1\n1\n1\n1\n{}2000000000\n", terrain()));
    assert!(matches!(
        mines.result,
        Err(ShimError::Parse(turnpipe::ParseError::UnexpectedEof { .. }))
    ));
    assert!(mines.stdout.is_empty());
}

#[test]
fn test_engine_output_is_verbatim() {
    struct Raw;
    impl Engine<Gateway> for Raw {
        fn deliver(&mut self, _: GatewayTurn, ports: &mut Ports) -> Result<(), EngineError> {
            ports.action("\t0 1 ");
            Ok(())
        }
    }

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let turns = run(
        &Gateway,
        Cursor::new("2 1 1\n0 1\n1\n0\n"),
        &mut stdout,
        &mut stderr,
        |_| Ok(Raw),
    )
    .unwrap();

    assert_eq!(turns, 1);
    assert_eq!(stdout, b"\t0 1 \n");
    assert!(stderr.is_empty());
}
