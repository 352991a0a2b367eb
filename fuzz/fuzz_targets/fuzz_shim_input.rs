#![no_main]

//! Shim input fuzzer.
//!
//! Feeds arbitrary bytes through every game's turn loop with the echo
//! engine. Malformed input must come back as an error, never a panic, and
//! every delivered turn must produce exactly one action line.

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use turnpipe::{EchoEngine, Game, Gateway, Mines, Pellets, run};

fn check<G: Game>(game: &G, data: &[u8]) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run(game, Cursor::new(data), &mut out, &mut err, |_| {
        Ok(EchoEngine::new("A"))
    });

    let lines = out.iter().filter(|&&b| b == b'\n').count();
    if let Ok(turns) = result {
        assert_eq!(lines as u64, turns, "one action per delivered turn");
    }
    assert!(out.chunks(2).all(|pair| pair == b"A\n"));
}

fuzz_target!(|data: &[u8]| {
    check(&Gateway, data);
    check(&Pellets, data);
    check(&Mines, data);
});
