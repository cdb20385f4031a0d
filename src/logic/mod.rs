// src/logic/mod.rs
//! ゲームのルールと、World を読むだけのヘルパーたち。

pub mod deck;
pub mod outcome;
pub mod rules;
pub mod zones;

pub use outcome::{MoveOutcome, RejectReason, UndoOutcome};
