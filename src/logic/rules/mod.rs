// src/logic/rules/mod.rs
//! ソリティアのルール関連モジュールをまとめるよ！
//! ここの関数はカードの「値」だけを見て判定する。World を書き換えることは絶対にない！

pub mod common;
pub mod foundation;
pub mod move_validation;
pub mod stock_waste;
pub mod tableau;
pub mod win_condition;


pub use common::*;
pub use foundation::*;
pub use move_validation::*;
pub use stock_waste::*;
pub use tableau::*;
pub use win_condition::*;
