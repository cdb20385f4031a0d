// src/systems/mod.rs
//! World を読み書きするシステムたち。
//!
//! 手を指す系のシステムは「計画 (`MovePlan`) を立てる関数」と「計画を適用する関数」に
//! 分かれてるよ。計画を立てる方は World を絶対に書き換えない！

pub mod deal_system;
pub mod move_card_system;
pub mod move_plan;
pub mod selection_system;
pub mod stock_system;
pub mod win_condition_system;

pub use deal_system::{register_card_components, DealInitialCardsSystem};
pub use move_plan::MovePlan;
pub use win_condition_system::WinConditionSystem;
