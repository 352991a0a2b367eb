//! Graph game: sever links so the agent never reaches an exit gateway.

use super::Game;
use crate::error::ParseError;
use crate::input::TokenReader;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// The graph/gateway game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gateway;

/// Graph layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayInit {
    /// Total number of nodes, gateways included.
    pub node_count: i32,
    /// Number of links.
    pub link_count: usize,
    /// Number of exit gateways.
    pub exit_count: usize,
    /// Undirected links as node pairs.
    pub links: Vec<[i32; 2]>,
    /// Gateway node indices.
    pub exits: Vec<i32>,
}

/// Agent position for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTurn {
    /// Node the agent is on.
    pub skynet_node: i32,
}

impl Game for Gateway {
    type Init = GatewayInit;
    type Turn = GatewayTurn;

    fn name(&self) -> &'static str {
        "gateway"
    }

    fn read_init<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<GatewayInit, ParseError> {
        let mut header = reader.fields("graph header")?;
        let node_count = header.int("nodeCount")?;
        let link_count = header.count("linkCount")?;
        let exit_count = header.count("exitCount")?;

        let links = (0..link_count)
            .map(|_| {
                let mut link = reader.fields("link")?;
                Ok([link.int("n1")?, link.int("n2")?])
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let exits = (0..exit_count)
            .map(|_| reader.int("exit"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GatewayInit {
            node_count,
            link_count,
            exit_count,
            links,
            exits,
        })
    }

    fn read_turn<R: BufRead>(&self, reader: &mut TokenReader<R>) -> Result<GatewayTurn, ParseError> {
        Ok(GatewayTurn {
            skynet_node: reader.int("skynetNode")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_init_and_turns() {
        let mut reader = TokenReader::new(Cursor::new("4 4 2\n0 1\n0 2\n1 3\n2 3\n1\n3\n0\n2\n"));
        let init = Gateway.read_init(&mut reader).unwrap();
        assert_eq!(init.node_count, 4);
        assert_eq!(init.links, vec![[0, 1], [0, 2], [1, 3], [2, 3]]);
        assert_eq!(init.exits, vec![1, 3]);

        assert_eq!(Gateway.read_turn(&mut reader).unwrap().skynet_node, 0);
        assert_eq!(Gateway.read_turn(&mut reader).unwrap().skynet_node, 2);
        assert!(reader.at_eof().unwrap());
    }

    #[test]
    fn test_truncated_links() {
        let mut reader = TokenReader::new(Cursor::new("3 2 1\n0 1\n"));
        let err = Gateway.read_init(&mut reader).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { line: 3, field: "link" }));
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&GatewayTurn { skynet_node: 5 }).unwrap();
        assert_eq!(json, r#"{"skynetNode":5}"#);
    }
}
