use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

pub mod search;
pub mod vault;

pub use search::{
    min_collect_steps, min_collect_steps_with_stats, MinHeap, RobotSet, SearchStats, StateCodec,
};
pub use vault::{graph::KeyGraph, Direction, Position, Tile, VaultMap, VaultMapBuilder};

/// Number of distinct keys, one per lowercase letter.
pub const KEY_N: usize = 26;
/// Upper bound of entrances plus keys in one vault.
pub const MAX_VERTEX_N: usize = 32;
/// Upper bound of robots working together in one search.
pub const MAX_ROBOT_N: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Expect {0} column(s) in each row, given {1}.")]
    InconsistentRow(usize, usize),
    #[error("Invalid character({0}) for map.")]
    InvalidCharInMap(char),
    #[error("Key({0}) appears twice in map, at {1} and {2}.")]
    DuplicateKey(char, Position, Position),
    #[error("No rows in map.")]
    EmptyMap,
    #[error("Expect exactly one entrance to split, found {0}.")]
    SplitEntranceCount(usize),
    #[error("Tile at {0} in the center cross should be open floor to split the entrance.")]
    SplitEntranceBlocked(Position),
    #[error("Tile({1}) at {0} can't hold a new entrance, expect floor or door.")]
    SplitEntranceOccupied(Position, char),
    #[error("Too many vertices({0}) in compressed graph, at most {max} are supported.", max = MAX_VERTEX_N)]
    TooManyVertices(usize),
    #[error("Invalid robot count({0}), expect 1 to {max}.", max = MAX_ROBOT_N)]
    InvalidRobotCount(usize),
    #[error("Expect {expected} entrance(s) for robots, found {found}.")]
    EntranceCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Vault map file, read from stdin if absent.
    pub input_path: Option<PathBuf>,
    /// Number of robots, one per entrance.
    #[arg(short, long, default_value_t = 4)]
    pub robots: usize,
    /// Replace the single entrance with four, walling off its center.
    #[arg(short, long)]
    pub split_entrance: bool,
}

/// Compress given map and search the minimum total steps for `robot_n` robots to collect all keys.
pub fn min_collect_steps_in_map(map: &VaultMap, robot_n: usize) -> Result<Option<usize>, Error> {
    let graph = KeyGraph::from_map(map)?;
    min_collect_steps(&graph, robot_n)
}

pub fn read_vault_map<P: AsRef<Path>>(path: P) -> Result<VaultMap> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    read_vault_map_from(BufReader::new(file))
        .with_context(|| format!("Failed to read map from given file({}).", path.as_ref().display()))
}

pub fn read_vault_map_from<R: BufRead>(reader: R) -> Result<VaultMap> {
    let mut builder = VaultMapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}.", ind + 1))?;
        let line = line.trim_end_matches('\r');
        // A blank line ends the map.
        if line.is_empty() {
            break;
        }

        builder
            .add_row(line)
            .with_context(|| format!("Invalid row at line {}.", ind + 1))?;
    }

    Ok(builder.build()?)
}

pub fn read_vault_map_from_stdin() -> Result<VaultMap> {
    read_vault_map_from(io::stdin().lock()).context("Failed to read map from stdin.")
}
