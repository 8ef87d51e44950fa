use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{Direction, Position, Tile, VaultMap};
use crate::{Error, MAX_VERTEX_N};

/// Fastest known way from one vertex to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: usize,
    pub steps_n: usize,
    /// Keys whose doors sit on this way.
    pub doors: u32,
    pub key: u32,
}

/// Entrances and keys of a vault, linked by the shortest ways between them.
///
/// Vertices `0..entrance_n` are the entrances in row-major order, followed by the keys in
/// row-major order.
#[derive(Debug, Clone)]
pub struct KeyGraph {
    vertices: Vec<Position>,
    edges: Vec<Vec<Edge>>,
    entrance_n: usize,
    all_keys: u32,
}

impl KeyGraph {
    pub fn from_map(map: &VaultMap) -> Result<Self, Error> {
        let mut vertices = map.entrances().to_vec();
        let entrance_n = vertices.len();
        let mut vertex_of_key = [None; crate::KEY_N];
        let mut all_keys = 0;
        for (k, pos) in map.keys() {
            vertex_of_key[k as usize] = Some(vertices.len());
            vertices.push(pos);
            all_keys |= 1 << k;
        }

        if vertices.len() > MAX_VERTEX_N {
            return Err(Error::TooManyVertices(vertices.len()));
        }

        let edges = vertices
            .iter()
            .map(|pos| Self::bfs_for_keys(map, pos, &vertex_of_key))
            .collect::<Vec<_>>();
        for (v, v_edges) in edges.iter().enumerate() {
            trace!(vertex = v, pos = %vertices[v], edge_n = v_edges.len(), "vertex linked");
        }
        debug!(
            vertex_n = vertices.len(),
            entrance_n,
            edge_n = edges.iter().map(Vec::len).sum::<usize>(),
            "compressed vault map"
        );

        Ok(Self {
            vertices,
            edges,
            entrance_n,
            all_keys,
        })
    }

    pub fn vertex_n(&self) -> usize {
        self.vertices.len()
    }

    pub fn entrance_n(&self) -> usize {
        self.entrance_n
    }

    pub fn key_n(&self) -> usize {
        self.vertices.len() - self.entrance_n
    }

    /// Bits of every key in the vault.
    pub fn all_keys(&self) -> u32 {
        self.all_keys
    }

    /// Edges leaving given vertex, in non-decreasing order of steps.
    pub fn edges_from(&self, v: usize) -> &[Edge] {
        &self.edges[v]
    }

    pub fn edge_between(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edges.get(from)?.iter().find(|edge| edge.to == to)
    }

    // Walls block, doors don't. Doors are only recorded in the mask of ways going through them.
    // Among the shortest ways to a cell, one passing fewer doors replaces the recorded one.
    fn bfs_for_keys(
        map: &VaultMap,
        from: &Position,
        vertex_of_key: &[Option<usize>],
    ) -> Vec<Edge> {
        let ind_of = |pos: &Position| pos.r() * map.col_n() + pos.c();
        let mut reached: Vec<Option<(usize, u32)>> = vec![None; map.row_n() * map.col_n()];
        reached[ind_of(from)] = Some((0, 0));
        let mut found_keys = Vec::new();
        let mut search_positions = VecDeque::from([*from]);
        while let Some(cur_pos) = search_positions.pop_front() {
            // Every way of one step less has been searched, so this record is final.
            let Some((cur_steps_n, cur_doors)) = reached[ind_of(&cur_pos)] else {
                continue;
            };
            for next_pos in Direction::all_dirs()
                .iter()
                .flat_map(|dir| cur_pos.neighbor(*dir))
            {
                let Some(tile) = map.tile(&next_pos).copied() else {
                    continue;
                };
                if tile == Tile::Wall {
                    continue;
                }

                let next_steps_n = cur_steps_n + 1;
                let next_doors = match tile {
                    Tile::Door(_) => cur_doors | tile.key_bit().unwrap_or(0),
                    _ => cur_doors,
                };
                let record = &mut reached[ind_of(&next_pos)];
                match record {
                    Some((steps_n, doors)) => {
                        if *steps_n == next_steps_n
                            && next_doors != *doors
                            && next_doors & !*doors == 0
                        {
                            *doors = next_doors;
                        }
                    }
                    None => {
                        *record = Some((next_steps_n, next_doors));
                        if let Tile::Key(k) = tile {
                            found_keys.push((k, next_pos));
                        }
                        search_positions.push_back(next_pos);
                    }
                }
            }
        }

        found_keys
            .into_iter()
            .filter_map(|(k, pos)| {
                let to = vertex_of_key[k as usize]?;
                let (steps_n, doors) = reached[ind_of(&pos)]?;
                Some(Edge {
                    to,
                    steps_n,
                    doors,
                    key: 1 << k,
                })
            })
            .collect()
    }
}
