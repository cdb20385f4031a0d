// src/logic/deck.rs

use itertools::iproduct;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::{Card, ALL_RANKS, ALL_SUITS};
use crate::config::rules::{DECK_SIZE, STOCK_SIZE_AFTER_DEAL, TABLEAU_COUNT};

/// 標準的な52枚のカードデッキを生成する関数だよ！🃏
///
/// スート × ランクの全組み合わせ。生成された時点では全部裏向き！
pub fn create_standard_deck() -> Vec<Card> {
    let deck: Vec<Card> = iproduct!(ALL_SUITS, ALL_RANKS)
        .map(|(suit, rank)| Card::new(suit, rank, false))
        .collect();
    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

/// カードの並びをシャッフルする (Fisher-Yates)。
///
/// 乱数生成器は外から渡すので、テストではシード固定で再現できるよ🎲
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// 配り終わった直後の並び。
#[derive(Debug, Clone, PartialEq)]
pub struct DealtLayout {
    /// `piles[i]` は i+1 枚。一番上 (最後) だけ表向き
    pub piles: Vec<Vec<Card>>,
    /// 残り 24 枚。全部裏向きで、デッキの残り順のまま
    pub stock: Vec<Card>,
}

/// シャッフル済みのデッキを場札 7 列と山札に分ける。
///
/// 列 i にはデッキの末尾から 1 枚ずつ pop したカードを i+1 枚積んで、
/// 最後に積んだ 1 枚だけを表向きにする。余りはそのまま山札になるよ。
///
/// # パニック
/// 52 枚より少ないデッキを渡すとパニック (呼び出し側のバグ)。
pub fn deal_layout(mut deck: Vec<Card>) -> DealtLayout {
    assert_eq!(deck.len(), DECK_SIZE, "deal_layout needs a full deck");

    let mut piles = Vec::with_capacity(TABLEAU_COUNT);
    for pile_index in 0..TABLEAU_COUNT {
        let mut pile = Vec::with_capacity(pile_index + 1);
        for card_index in 0..=pile_index {
            let mut card = match deck.pop() {
                Some(card) => card,
                None => panic!("deck ran out while dealing pile {}", pile_index),
            };
            card.is_face_up = card_index == pile_index;
            pile.push(card);
        }
        piles.push(pile);
    }

    debug_assert_eq!(deck.len(), STOCK_SIZE_AFTER_DEAL);
    for card in deck.iter_mut() {
        card.is_face_up = false;
    }
    DealtLayout { piles, stock: deck }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn deck_creation() {
        let deck = create_standard_deck();
        assert_eq!(deck.len(), 52);

        let unique: HashSet<_> = deck.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(unique.len(), 52, "デッキに重複したカードが見つかりました！");
        assert!(deck.iter().all(|card| !card.is_face_up), "デッキに表向きのカードが含まれています！");
        println!("デッキ作成テスト、成功！🎉");
    }

    #[test]
    fn shuffle_is_reproducible_with_same_seed() {
        let mut a = create_standard_deck();
        let mut b = create_standard_deck();
        shuffle_deck(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_deck(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_ne!(a, create_standard_deck(), "シャッフルしても順番が変わってない？");
    }

    #[test]
    fn deal_layout_shapes_piles_and_stock() {
        let mut deck = create_standard_deck();
        shuffle_deck(&mut deck, &mut StdRng::seed_from_u64(1));
        let layout = deal_layout(deck);

        for (i, pile) in layout.piles.iter().enumerate() {
            assert_eq!(pile.len(), i + 1);
            let (top, rest) = pile.split_last().unwrap();
            assert!(top.is_face_up, "列 {} の一番上は表向きのはず", i);
            assert!(rest.iter().all(|c| !c.is_face_up));
        }
        assert_eq!(layout.stock.len(), 24);
        assert!(layout.stock.iter().all(|c| !c.is_face_up));

        let all: HashSet<_> = layout
            .piles
            .iter()
            .flatten()
            .chain(layout.stock.iter())
            .map(|c| (c.suit, c.rank))
            .collect();
        assert_eq!(all.len(), 52);
    }

    #[test]
    fn deal_pops_from_the_end_of_the_deck() {
        let deck = create_standard_deck();
        let last = *deck.last().unwrap();
        let first_24: Vec<_> = deck[..24].iter().map(|c| (c.suit, c.rank)).collect();
        let layout = deal_layout(deck);

        assert_eq!((layout.piles[0][0].suit, layout.piles[0][0].rank), (last.suit, last.rank));
        let stock: Vec<_> = layout.stock.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(stock, first_24, "山札はデッキの残り順のまま");
    }
}
