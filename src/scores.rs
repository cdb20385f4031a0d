// src/scores.rs
//! クリア記録 (リーダーボード) の置き場所とのやりとり🏅
//!
//! 保存先そのもの (DB やブラウザのストレージ) はゲームの外の話。
//! ここにあるのは記録の形と、保存先が満たすべきトレイトと、メモリ上の実装だけ。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::config::rules::{PLAYER_NAME_MAX_LEN, PLAYER_NAME_MIN_LEN};

/// 1 件のクリア記録。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player_name: String,
    pub moves: u32,
    pub time_seconds: f64,
}

impl ScoreRecord {
    /// 名前の長さをチェックしてから作る (前後の空白は落とす)。
    pub fn new(player_name: &str, moves: u32, time_seconds: f64) -> Result<Self, ScoreError> {
        let player_name = player_name.trim();
        let len = player_name.chars().count();
        if !(PLAYER_NAME_MIN_LEN..=PLAYER_NAME_MAX_LEN).contains(&len) {
            return Err(ScoreError::InvalidName { len });
        }
        Ok(Self { player_name: player_name.to_string(), moves, time_seconds })
    }

    /// 手数が少ない順、同じなら速い順。
    pub fn ranking_order(&self, other: &Self) -> Ordering {
        self.moves
            .cmp(&other.moves)
            .then_with(|| self.time_seconds.total_cmp(&other.time_seconds))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    InvalidName { len: usize },
    /// まだクリアしてないゲームの記録は出せない
    GameNotWon,
    /// 保存先がこけた。ゲームの状態には影響しない
    Storage(String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::InvalidName { len } => write!(
                f,
                "player name must be {}-{} characters (got {})",
                PLAYER_NAME_MIN_LEN, PLAYER_NAME_MAX_LEN, len
            ),
            ScoreError::GameNotWon => f.write_str("the game has not been won yet"),
            ScoreError::Storage(reason) => write!(f, "score storage failed: {}", reason),
        }
    }
}

impl std::error::Error for ScoreError {}

/// 記録の保存先。
pub trait ScoreStore {
    fn save(&mut self, record: ScoreRecord) -> Result<(), ScoreError>;
    /// 上位 `limit` 件を (手数, 時間) の昇順で。
    fn top(&self, limit: usize) -> Vec<ScoreRecord>;
}

/// メモリ上に持つだけの保存先。JSON に書き出して、ホスト側で好きに永続化できる。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        serde_json::to_string(&self.records).map_err(|e| ScoreError::Storage(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let mut records: Vec<ScoreRecord> =
            serde_json::from_str(json).map_err(|e| ScoreError::Storage(e.to_string()))?;
        records.sort_by(ScoreRecord::ranking_order);
        Ok(Self { records })
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save(&mut self, record: ScoreRecord) -> Result<(), ScoreError> {
        // 同順位なら先に入った記録が上
        let index = self
            .records
            .partition_point(|existing| existing.ranking_order(&record) != Ordering::Greater);
        self.records.insert(index, record);
        Ok(())
    }

    fn top(&self, limit: usize) -> Vec<ScoreRecord> {
        self.records.iter().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, moves: u32, time_seconds: f64) -> ScoreRecord {
        ScoreRecord::new(name, moves, time_seconds).unwrap()
    }

    #[test]
    fn name_length_is_checked() {
        assert_eq!(ScoreRecord::new("abc", 10, 1.0), Err(ScoreError::InvalidName { len: 3 }));
        assert_eq!(
            ScoreRecord::new("abcdefghijklmnopq", 10, 1.0),
            Err(ScoreError::InvalidName { len: 17 })
        );
        assert_eq!(record("  alice  ", 10, 1.0).player_name, "alice");
        assert!(ScoreRecord::new("ゆうしゃさま", 10, 1.0).is_ok(), "文字数で数える");
    }

    #[test]
    fn top_is_sorted_by_moves_then_time() {
        let mut store = MemoryScoreStore::new();
        store.save(record("slow", 90, 300.0)).unwrap();
        store.save(record("fast", 90, 120.0)).unwrap();
        store.save(record("best", 85, 500.0)).unwrap();
        store.save(record("worst", 140, 60.0)).unwrap();

        let names: Vec<_> = store.top(10).into_iter().map(|r| r.player_name).collect();
        assert_eq!(names, vec!["best", "fast", "slow", "worst"]);
        assert_eq!(store.top(2).len(), 2);
        println!("リーダーボード並び順テスト、成功！🎉");
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let mut store = MemoryScoreStore::new();
        store.save(record("carol", 100, 10.0)).unwrap();
        store.save(record("dave", 95, 20.0)).unwrap();
        let restored = MemoryScoreStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(restored.top(10), store.top(10));
        assert!(MemoryScoreStore::from_json("not json").is_err());
    }
}
