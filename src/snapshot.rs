//! Compact binary save format for a [`GameState`].
//!
//! Layout: `CRNR` magic, then little-endian `u32` version, CRC32 of the
//! payload and payload length, followed by a fixed-size payload.

use crate::board::Board;
use crate::config::{RulesConfig, ScoringPolicy};
use crate::error::SnapshotError;
use crate::game::{GameState, Outcome, Status};
use crate::types::{GoalMode, Side};

const MAGIC: &[u8; 4] = b"CRNR";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;
const PAYLOAD_SIZE: usize = 37;

const STATUS_AWAITING: u8 = 0;
const STATUS_WON: u8 = 1;
const STATUS_DRAW: u8 = 2;

pub fn encode(game: &GameState) -> Vec<u8> {
    let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
    payload.push(game.mode().slot() as u8);
    let (tag, side) = match game.status() {
        Status::AwaitingMove(side) => (STATUS_AWAITING, side.code()),
        Status::GameOver(Outcome::Winner(side)) => (STATUS_WON, side.code()),
        Status::GameOver(Outcome::Draw) => (STATUS_DRAW, 0),
    };
    payload.push(tag);
    payload.push(side);
    let (score_a, score_b) = game.score();
    payload.extend_from_slice(&game.move_count().to_le_bytes());
    payload.extend_from_slice(&score_a.to_le_bytes());
    payload.extend_from_slice(&score_b.to_le_bytes());
    payload.extend_from_slice(&game.board().mask(Side::A).to_le_bytes());
    payload.extend_from_slice(&game.board().mask(Side::B).to_le_bytes());
    let config = game.config();
    payload.extend_from_slice(&config.move_limit.to_le_bytes());
    payload.push(config.medium_threshold.unwrap_or(0));
    payload.push(scoring_tag(config.scoring));

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

pub fn decode(data: &[u8]) -> Result<GameState, SnapshotError> {
    if data.len() < HEADER_SIZE {
        return Err(SnapshotError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }
    if &data[0..4] != MAGIC {
        return Err(SnapshotError::BadMagic);
    }

    let version = read_u32_le(data, 4)?;
    if version != VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            expected: VERSION,
            actual: version,
        });
    }

    let expected_crc = read_u32_le(data, 8)?;
    let payload_len = read_u32_le(data, 12)? as usize;
    let payload = &data[HEADER_SIZE..];
    if payload_len != PAYLOAD_SIZE || payload.len() != payload_len {
        return Err(SnapshotError::Corrupt("payload length mismatch"));
    }

    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(SnapshotError::CrcMismatch {
            expected: expected_crc,
            actual: actual_crc,
        });
    }

    let mode = GoalMode::from_slot(payload[0]).ok_or(SnapshotError::Corrupt("unknown mode"))?;
    let side = Side::from_code(payload[2]);
    let status = match (payload[1], side) {
        (STATUS_AWAITING, Some(side)) => Status::AwaitingMove(side),
        (STATUS_WON, Some(side)) => Status::GameOver(Outcome::Winner(side)),
        (STATUS_DRAW, None) => Status::GameOver(Outcome::Draw),
        _ => return Err(SnapshotError::Corrupt("invalid status")),
    };
    let move_count = read_u32_le(payload, 3)?;
    let scores = [read_u32_le(payload, 7)?, read_u32_le(payload, 11)?];
    let board = Board::from_masks(read_u64_le(payload, 15)?, read_u64_le(payload, 23)?)
        .ok_or(SnapshotError::Corrupt("overlapping pieces"))?;
    let move_limit = read_u32_le(payload, 31)?;
    if move_limit == 0 {
        return Err(SnapshotError::Corrupt("zero move limit"));
    }
    if matches!(status, Status::AwaitingMove(_)) && move_count >= move_limit {
        return Err(SnapshotError::Corrupt("move count past the draw limit"));
    }
    let config = RulesConfig {
        move_limit,
        medium_threshold: match payload[35] {
            0 => None,
            threshold => Some(threshold),
        },
        scoring: scoring_from_tag(payload[36])?,
    };

    Ok(GameState::from_parts(board, mode, config, status, scores, move_count))
}

fn scoring_tag(policy: ScoringPolicy) -> u8 {
    match policy {
        ScoringPolicy::PerSide => 0,
        ScoringPolicy::GoalCorner => 1,
        ScoringPolicy::Mirrored => 2,
    }
}

fn scoring_from_tag(tag: u8) -> Result<ScoringPolicy, SnapshotError> {
    match tag {
        0 => Ok(ScoringPolicy::PerSide),
        1 => Ok(ScoringPolicy::GoalCorner),
        2 => Ok(ScoringPolicy::Mirrored),
        _ => Err(SnapshotError::Corrupt("unknown scoring policy")),
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, SnapshotError> {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(
        data.get(offset..offset + 4)
            .ok_or(SnapshotError::Corrupt("unexpected EOF while reading u32"))?,
    );
    Ok(u32::from_le_bytes(bytes))
}

fn read_u64_le(data: &[u8], offset: usize) -> Result<u64, SnapshotError> {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(
        data.get(offset..offset + 8)
            .ok_or(SnapshotError::Corrupt("unexpected EOF while reading u64"))?,
    );
    Ok(u64::from_le_bytes(bytes))
}
