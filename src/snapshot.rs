//! Fixed-schema export and import of a session's private state.
//!
//! A [`Snapshot`] always decomposes into the same seven fields, in order:
//! board, started, locked, whites_turn, player_vs_player, white_score,
//! black_score. Hosts may persist it as that field sequence or through the
//! checksummed byte form produced by [`Snapshot::to_bytes`].

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::SnapshotError;
use crate::types::Cell;
use crate::{BOARD_SIZE, NUM_CELLS};

/// Number of fields in a snapshot.
pub const SNAPSHOT_FIELDS: usize = 7;

const FIELD_NAMES: [&str; SNAPSHOT_FIELDS] = [
    "board",
    "started",
    "locked",
    "whites_turn",
    "player_vs_player",
    "white_score",
    "black_score",
];

const MAGIC: &[u8; 4] = b"RVSS";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 20;
const FLAG_COUNT: usize = 4;
const PAYLOAD_SIZE: usize = NUM_CELLS + FLAG_COUNT + 2;

/// Complete private state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub started: bool,
    pub locked: bool,
    pub whites_turn: bool,
    pub player_vs_player: bool,
    pub white_score: u8,
    pub black_score: u8,
}

/// One value of the exported field sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotField {
    Board(Board),
    Flag(bool),
    Score(u8),
}

impl Snapshot {
    /// Exports the seven fields in their fixed order.
    pub fn into_fields(self) -> Vec<SnapshotField> {
        vec![
            SnapshotField::Board(self.board),
            SnapshotField::Flag(self.started),
            SnapshotField::Flag(self.locked),
            SnapshotField::Flag(self.whites_turn),
            SnapshotField::Flag(self.player_vs_player),
            SnapshotField::Score(self.white_score),
            SnapshotField::Score(self.black_score),
        ]
    }

    /// Rebuilds a snapshot from a field sequence produced by [`Snapshot::into_fields`].
    pub fn from_fields(fields: &[SnapshotField]) -> Result<Self, SnapshotError> {
        if fields.len() != SNAPSHOT_FIELDS {
            return Err(SnapshotError::FieldCount {
                expected: SNAPSHOT_FIELDS,
                actual: fields.len(),
            });
        }

        let board = match fields[0] {
            SnapshotField::Board(board) => board,
            _ => return Err(wrong_type(0)),
        };

        Ok(Self {
            board,
            started: flag_at(fields, 1)?,
            locked: flag_at(fields, 2)?,
            whites_turn: flag_at(fields, 3)?,
            player_vs_player: flag_at(fields, 4)?,
            white_score: score_at(fields, 5)?,
            black_score: score_at(fields, 6)?,
        })
    }

    /// Serializes to the `RVSS` save format.
    ///
    /// Layout: 4-byte magic, u32 version, u32 field count, u32 CRC32 of the
    /// payload, 4 reserved bytes, then the payload: 64 row-major cell codes,
    /// four flag bytes and the two scores.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        payload.extend_from_slice(&self.board.to_array());
        for flag in [
            self.started,
            self.locked,
            self.whites_turn,
            self.player_vs_player,
        ] {
            payload.push(u8::from(flag));
        }
        payload.push(self.white_score);
        payload.push(self.black_score);

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(HEADER_SIZE + PAYLOAD_SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(SNAPSHOT_FIELDS as u32).to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    /// Deserializes the `RVSS` save format.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < HEADER_SIZE {
            return Err(SnapshotError::TooShort {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                expected: VERSION,
                actual: version,
            });
        }

        let field_count = read_u32_le(data, 8) as usize;
        if field_count != SNAPSHOT_FIELDS {
            return Err(SnapshotError::FieldCount {
                expected: SNAPSHOT_FIELDS,
                actual: field_count,
            });
        }

        let expected_crc = read_u32_le(data, 12);
        let payload = &data[HEADER_SIZE..];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(SnapshotError::ChecksumMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        if payload.len() < PAYLOAD_SIZE {
            return Err(SnapshotError::TooShort {
                expected: HEADER_SIZE + PAYLOAD_SIZE,
                actual: data.len(),
            });
        }
        if payload.len() > PAYLOAD_SIZE {
            return Err(SnapshotError::TrailingBytes);
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (index, &code) in payload[..NUM_CELLS].iter().enumerate() {
            cells[index / BOARD_SIZE][index % BOARD_SIZE] =
                Cell::from_code(code).ok_or(SnapshotError::InvalidCell { index, code })?;
        }

        let mut fields = vec![SnapshotField::Board(Board::from_cells(cells))];
        for (offset, &value) in payload[NUM_CELLS..NUM_CELLS + FLAG_COUNT].iter().enumerate() {
            fields.push(SnapshotField::Flag(decode_flag(FIELD_NAMES[offset + 1], value)?));
        }
        fields.push(SnapshotField::Score(payload[NUM_CELLS + FLAG_COUNT]));
        fields.push(SnapshotField::Score(payload[NUM_CELLS + FLAG_COUNT + 1]));

        Self::from_fields(&fields)
    }
}

fn wrong_type(index: usize) -> SnapshotError {
    SnapshotError::FieldType {
        index,
        name: FIELD_NAMES[index],
    }
}

fn flag_at(fields: &[SnapshotField], index: usize) -> Result<bool, SnapshotError> {
    match fields[index] {
        SnapshotField::Flag(value) => Ok(value),
        _ => Err(wrong_type(index)),
    }
}

fn score_at(fields: &[SnapshotField], index: usize) -> Result<u8, SnapshotError> {
    match fields[index] {
        SnapshotField::Score(value) if value as usize <= NUM_CELLS => Ok(value),
        SnapshotField::Score(value) => Err(SnapshotError::ScoreOutOfRange {
            name: FIELD_NAMES[index],
            value,
        }),
        _ => Err(wrong_type(index)),
    }
}

fn decode_flag(name: &'static str, value: u8) -> Result<bool, SnapshotError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SnapshotError::InvalidFlag { name, value }),
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut chunk = [0u8; 4];
    chunk.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(chunk)
}
