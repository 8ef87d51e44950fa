use std::fmt::Display;

use crate::{Error, KEY_N};

pub mod graph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    Key(u8),
    Door(u8),
}

impl TryFrom<char> for Tile {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(Self::Floor),
            '#' => Ok(Self::Wall),
            c @ 'a'..='z' => Ok(Self::Key(c as u8 - b'a')),
            c @ 'A'..='Z' => Ok(Self::Door(c as u8 - b'A')),
            other => Err(Error::InvalidCharInMap(other)),
        }
    }
}

impl From<Tile> for char {
    fn from(value: Tile) -> Self {
        match value {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Key(k) => (b'a' + k) as char,
            Tile::Door(d) => (b'A' + d) as char,
        }
    }
}

impl Tile {
    /// Bit of the key this tile holds or is locked by.
    pub fn key_bit(&self) -> Option<u32> {
        match self {
            Tile::Key(k) | Tile::Door(k) => {
                debug_assert!((*k as usize) < KEY_N);
                Some(1 << k)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up if self.r > 0 => Some(Self::new(self.r - 1, self.c)),
            Direction::Right => Some(Self::new(self.r, self.c + 1)),
            Direction::Down => Some(Self::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Self::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VaultMap {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: usize,
    entrances: Vec<Position>,
}

impl Display for VaultMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.row_n {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.col_n {
                let pos = Position::new(r, c);
                let ch = if self.entrances.contains(&pos) {
                    '@'
                } else {
                    char::from(self.tiles[r * self.col_n + c])
                };
                write!(f, "{}", ch)?;
            }
        }

        Ok(())
    }
}

impl VaultMap {
    pub fn try_from_lines<'a, I: Iterator<Item = &'a str>>(iter: I) -> Result<Self, Error> {
        let mut builder = VaultMapBuilder::new();
        for line in iter.map(|l| l.trim_end_matches('\r')) {
            if line.is_empty() {
                break;
            }
            builder.add_row(line)?;
        }

        builder.build()
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    /// Entrances in row-major order.
    pub fn entrances(&self) -> &[Position] {
        &self.entrances
    }

    pub fn entrance_n(&self) -> usize {
        self.entrances.len()
    }

    pub fn tile(&self, pos: &Position) -> Option<&Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get(ind))
    }

    /// Keys and their positions in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = (u8, Position)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(ind, tile)| {
            if let Tile::Key(k) = tile {
                Some((*k, self.ind_to_pos(ind)))
            } else {
                None
            }
        })
    }

    /// Turn the only entrance into four, one at each diagonal, and wall off the center cross.
    ///
    /// The center cross must be open floor. A new entrance may stand on floor or a door, but not
    /// on a wall or a key.
    pub fn split_entrance(&mut self) -> Result<(), Error> {
        if self.entrances.len() != 1 {
            return Err(Error::SplitEntranceCount(self.entrances.len()));
        }

        let center = self.entrances[0];
        if center.r == 0 || center.c == 0 {
            return Err(Error::SplitEntranceBlocked(center));
        }
        let (cross, diagonals): (Vec<_>, Vec<_>) = (center.r - 1..=center.r + 1)
            .flat_map(|r| (center.c - 1..=center.c + 1).map(move |c| Position::new(r, c)))
            .partition(|pos| pos.r == center.r || pos.c == center.c);
        if let Some(blocked_pos) = cross
            .iter()
            .find(|pos| self.tile(pos).map(|tile| *tile != Tile::Floor).unwrap_or(true))
        {
            return Err(Error::SplitEntranceBlocked(*blocked_pos));
        }
        for pos in &diagonals {
            if let Some(tile @ (Tile::Wall | Tile::Key(_))) = self.tile(pos).copied() {
                return Err(Error::SplitEntranceOccupied(*pos, char::from(tile)));
            }
        }

        for pos in cross {
            if let Some(tile_mut) = self.tile_mut(&pos) {
                *tile_mut = Tile::Wall;
            }
        }
        self.entrances = diagonals;

        Ok(())
    }

    fn tile_mut(&mut self, pos: &Position) -> Option<&mut Tile> {
        self.pos_to_ind(pos).and_then(|ind| self.tiles.get_mut(ind))
    }

    fn ind_to_pos(&self, ind: usize) -> Position {
        Position::new(ind / self.col_n, ind % self.col_n)
    }

    fn pos_to_ind(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct VaultMapBuilder {
    tiles: Vec<Tile>,
    row_n: usize,
    col_n: Option<usize>,
    entrances: Vec<Position>,
    key_positions: [Option<Position>; KEY_N],
}

impl Default for VaultMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultMapBuilder {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            row_n: 0,
            col_n: None,
            entrances: Vec::new(),
            key_positions: [None; KEY_N],
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(Error::InconsistentRow(col_n, this_col_n));
        }

        for (ind, c) in text.chars().enumerate() {
            let pos = Position::new(self.row_n, ind);
            let tile = if c == '@' {
                self.entrances.push(pos);
                Tile::Floor
            } else {
                Tile::try_from(c)?
            };
            if let Tile::Key(k) = tile {
                if let Some(last_pos) = self.key_positions[k as usize].replace(pos) {
                    return Err(Error::DuplicateKey(c, last_pos, pos));
                }
            }
            self.tiles.push(tile);
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Result<VaultMap, Error> {
        let Some(col_n) = self.col_n.filter(|n| *n > 0) else {
            return Err(Error::EmptyMap);
        };

        Ok(VaultMap {
            tiles: self.tiles,
            row_n: self.row_n,
            col_n,
            entrances: self.entrances,
        })
    }
}
