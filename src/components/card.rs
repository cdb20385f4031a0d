// src/components/card.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ecs::component::Component;

/// カードのスート（マーク）を表す列挙型だよ！❤️♦️♣️♠️
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Heart,
    Diamond,
    Club,
    Spade,
}

/// カードのランク（数字）だよ！ A が一番小さくて K が一番大きい。
/// `Ord` を derive してるので `Rank::Queen < Rank::King` みたいに比較できる👍
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

/// カードの色（赤か黒か）。場札のルール (色違い) で使う！❤️🖤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Black,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

impl Suit {
    pub fn color(self) -> CardColor {
        match self {
            Suit::Heart | Suit::Diamond => CardColor::Red,
            Suit::Club | Suit::Spade => CardColor::Black,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Heart => "♥",
            Suit::Diamond => "♦",
            Suit::Club => "♣",
            Suit::Spade => "♠",
        }
    }
}

impl Rank {
    /// A=1 ... K=13 の数値。
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// カードそのものを表すコンポーネントだよ！🃏
///
/// - `suit`: カードのスート
/// - `rank`: カードのランク
/// - `is_face_up`: 表向きなら true。変わるのはこのフラグだけ！
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub is_face_up: bool,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank, is_face_up: bool) -> Self {
        Self { suit, rank, is_face_up }
    }

    pub fn color(&self) -> CardColor {
        self.suit.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.symbol(), self.rank.symbol())
    }
}

impl Component for Card {}
