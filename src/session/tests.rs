// src/session/tests.rs
//! Session を通した一連の操作のテスト。

use super::*;
use crate::components::card::ALL_RANKS;
use crate::components::{Card, Rank, Suit};
use crate::config::rules::MAX_UNDO;
use crate::logic::zones::{cards_in_stack, foundation_tops};
use crate::scores::{MemoryScoreStore, ScoreRecord, ScoreStore};
use crate::systems::test_support::place;
use std::collections::HashSet;

fn seeded(easy_mode: bool, seed: u64) -> Session {
    Session::new(GameConfig::new(easy_mode, false).with_seed(seed))
}

/// 配られたカードを全部消して、`build` で好きな盤面を作る。
fn rigged<T>(easy_mode: bool, build: impl FnOnce(&mut World) -> T) -> (Session, T) {
    let mut session = seeded(easy_mode, 1);
    for entity in session.world.get_all_entities_with_component::<Card>() {
        session.world.destroy_entity(entity);
    }
    let placed = build(&mut session.world);
    session.drain_events();
    (session, placed)
}

fn zone(session: &Session, stack_type: StackType) -> Vec<Entity> {
    cards_in_stack(session.world(), stack_type)
}

#[test]
fn deal_invariant_holds_for_many_seeds() {
    for seed in 0..20 {
        let session = seeded(false, seed);
        let snapshot = session.snapshot();

        for (i, pile) in snapshot.piles.iter().enumerate() {
            assert_eq!(pile.len(), i + 1, "seed {}: 場札[{}] の枚数", seed, i);
            assert_eq!(pile.iter().filter(|c| c.card.is_face_up).count(), 1);
            assert!(pile.last().unwrap().card.is_face_up, "一番上だけ表向き");
        }
        assert_eq!(snapshot.stash.len(), 24);
        assert!(snapshot.stash.iter().all(|c| !c.card.is_face_up));
        assert!(snapshot.waste.is_empty());
        assert!(snapshot.foundation.iter().all(|slot| slot.is_empty()));

        let unique: HashSet<_> = snapshot
            .piles
            .iter()
            .flatten()
            .chain(snapshot.stash.iter())
            .map(|c| (c.card.suit, c.card.rank))
            .collect();
        assert_eq!(unique.len(), 52);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.move_count(), 0);
    }
    println!("配り方の不変条件テスト、成功！🎉");
}

#[test]
fn same_seed_deals_same_table() {
    assert_eq!(seeded(false, 42).snapshot(), seeded(false, 42).snapshot());
    assert_ne!(seeded(false, 42).snapshot(), seeded(false, 43).snapshot());
}

#[test]
fn hard_mode_draws_three_keeping_order() {
    let mut session = seeded(false, 7);
    let stock = zone(&session, StackType::Stock);
    let top_three = stock[stock.len() - 3..].to_vec();

    let outcome = session.handle_click(ClickTarget::Card(*stock.last().unwrap()));
    assert_eq!(outcome, MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Waste), top_three, "元の山札の一番上が捨て札の一番上");
    assert!(top_three.iter().all(|&e| card_of(session.world(), e).is_face_up));
    assert_eq!(zone(&session, StackType::Stock).len(), 21);
    assert_eq!(session.move_count(), 1);
    assert_eq!(session.undo_depth(), 1);
    println!("ハードモードのドローテスト、成功！🎉");
}

#[test]
fn easy_mode_draws_one() {
    let mut session = seeded(true, 7);
    let stock_top = *zone(&session, StackType::Stock).last().unwrap();
    assert_eq!(session.draw_from_stash(), MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Waste), vec![stock_top]);
    assert!(card_of(session.world(), stock_top).is_face_up);
}

#[test]
fn only_stock_top_draws() {
    let mut session = seeded(false, 3);
    let bottom = zone(&session, StackType::Stock)[0];
    let before = session.snapshot();
    assert_eq!(session.handle_card_activation(bottom), MoveOutcome::Rejected(RejectReason::BuriedCard));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn reroll_after_stock_runs_out() {
    let mut session = seeded(false, 9);
    for _ in 0..8 {
        assert_eq!(session.draw_from_stash(), MoveOutcome::Moved);
    }
    assert!(zone(&session, StackType::Stock).is_empty());
    assert_eq!(session.draw_from_stash(), MoveOutcome::Rejected(RejectReason::EmptyStock));

    let waste_before: HashSet<_> = zone(&session, StackType::Waste).into_iter().collect();
    assert_eq!(session.handle_empty_zone_activation(StackType::Stock), MoveOutcome::Moved);

    let stock = zone(&session, StackType::Stock);
    assert_eq!(stock.len(), 24);
    assert_eq!(stock.iter().copied().collect::<HashSet<_>>(), waste_before);
    assert!(stock.iter().all(|&e| !card_of(session.world(), e).is_face_up));
    assert!(zone(&session, StackType::Waste).is_empty());
    assert_eq!(session.move_count(), 9);
    println!("リロールテスト、成功！🎉");
}

#[test]
fn reroll_with_cards_in_stock_is_rejected() {
    let mut session = seeded(false, 9);
    let before = session.snapshot();
    assert_eq!(session.reroll_waste_to_stash(), MoveOutcome::Rejected(RejectReason::StockNotEmpty));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.undo_depth(), 0);
}

#[test]
fn run_moves_between_piles_and_reveals_new_top() {
    let (mut session, (hidden, seven, eight)) = rigged(false, |world| {
        (
            place(world, Suit::Diamond, Rank::Queen, false, StackType::Tableau(0)),
            place(world, Suit::Club, Rank::Seven, true, StackType::Tableau(0)),
            place(world, Suit::Heart, Rank::Eight, true, StackType::Tableau(1)),
        )
    });

    assert_eq!(session.handle_card_activation(seven), MoveOutcome::SelectionChanged);
    assert_eq!(session.handle_card_activation(eight), MoveOutcome::Moved);

    assert_eq!(zone(&session, StackType::Tableau(1)), vec![eight, seven]);
    assert!(card_of(session.world(), hidden).is_face_up);
    assert!(selected_cards(session.world()).is_empty(), "移動後は選択が外れる");
    assert_eq!(session.move_count(), 1);
}

#[test]
fn rejected_move_changes_nothing() {
    let (mut session, (red_eight, red_nine)) = rigged(false, |world| {
        (
            place(world, Suit::Heart, Rank::Eight, true, StackType::Tableau(0)),
            place(world, Suit::Diamond, Rank::Nine, true, StackType::Tableau(1)),
        )
    });
    session.select_run(red_eight);
    let before = session.snapshot();

    assert_eq!(
        session.handle_card_activation(red_nine),
        MoveOutcome::Rejected(RejectReason::IllegalTableauMove)
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.undo_depth(), 0);
    assert_eq!(selected_cards(session.world()), vec![red_eight], "却下されても選択はそのまま");
    println!("却下された手の冪等性テスト、成功！🎉");
}

#[test]
fn empty_pile_takes_kings_only() {
    let (mut session, (queen, king)) = rigged(false, |world| {
        let queen = place(world, Suit::Heart, Rank::Queen, true, StackType::Tableau(0));
        let king = place(world, Suit::Spade, Rank::King, true, StackType::Tableau(1));
        place(world, Suit::Diamond, Rank::Queen, true, StackType::Tableau(1));
        (queen, king)
    });

    session.select_run(queen);
    assert_eq!(
        session.handle_empty_zone_activation(StackType::Tableau(5)),
        MoveOutcome::Rejected(RejectReason::IllegalTableauMove)
    );
    assert_eq!(
        session.handle_empty_zone_activation(StackType::Tableau(1)),
        MoveOutcome::Rejected(RejectReason::TargetNotEmpty)
    );

    session.select_run(king);
    assert_eq!(session.handle_empty_zone_activation(StackType::Tableau(5)), MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Tableau(5)).len(), 2, "K の上のカードも一緒に動く");
    assert!(zone(&session, StackType::Tableau(1)).is_empty());
}

#[test]
fn foundation_builds_up_by_suit() {
    let (mut session, (ace, two_spades, two_hearts)) = rigged(false, |world| {
        (
            place(world, Suit::Heart, Rank::Ace, true, StackType::Tableau(0)),
            place(world, Suit::Spade, Rank::Two, true, StackType::Tableau(1)),
            place(world, Suit::Heart, Rank::Two, true, StackType::Waste),
        )
    });

    session.select_run(two_spades);
    assert_eq!(
        session.handle_empty_zone_activation(StackType::Foundation(2)),
        MoveOutcome::Rejected(RejectReason::IllegalFoundationMove),
        "空スロットには A だけ"
    );

    session.select_run(ace);
    assert_eq!(session.handle_empty_zone_activation(StackType::Foundation(2)), MoveOutcome::Moved);

    session.select_run(two_spades);
    assert_eq!(
        session.handle_card_activation(ace),
        MoveOutcome::Rejected(RejectReason::IllegalFoundationMove),
        "スート違い"
    );

    session.select_run(two_hearts);
    assert_eq!(session.handle_card_activation(ace), MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Foundation(2)), vec![ace, two_hearts]);
    assert!(zone(&session, StackType::Waste).is_empty());
    assert_eq!(session.move_count(), 2);
}

#[test]
fn foundation_top_can_come_back_to_a_pile() {
    let (mut session, (two_hearts, black_three)) = rigged(false, |world| {
        place(world, Suit::Heart, Rank::Ace, true, StackType::Foundation(0));
        (
            place(world, Suit::Heart, Rank::Two, true, StackType::Foundation(0)),
            place(world, Suit::Club, Rank::Three, true, StackType::Tableau(3)),
        )
    });

    assert_eq!(session.handle_card_activation(two_hearts), MoveOutcome::SelectionChanged);
    assert_eq!(session.handle_card_activation(black_three), MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Tableau(3)), vec![black_three, two_hearts]);
    assert_eq!(zone(&session, StackType::Foundation(0)).len(), 1);
}

#[test]
fn only_waste_top_is_selectable_in_either_mode() {
    let build = |world: &mut World| {
        place(world, Suit::Heart, Rank::Five, true, StackType::Waste);
        place(world, Suit::Club, Rank::Nine, true, StackType::Waste);
    };
    for easy_mode in [false, true] {
        let (mut session, _) = rigged(easy_mode, build);
        let waste = zone(&session, StackType::Waste);
        assert_eq!(
            session.handle_card_activation(waste[0]),
            MoveOutcome::Rejected(RejectReason::WasteCardNotSelectable),
            "easy_mode: {}",
            easy_mode
        );
        assert_eq!(session.handle_card_activation(waste[1]), MoveOutcome::SelectionChanged);
        assert_eq!(session.handle_card_activation(waste[1]), MoveOutcome::SelectionChanged);
        assert!(selected_cards(session.world()).is_empty(), "2 回目のクリックで選択解除");
    }
}

#[test]
fn buried_waste_ace_cannot_reach_foundation() {
    let (mut session, ace) = rigged(true, |world| {
        let ace = place(world, Suit::Spade, Rank::Ace, true, StackType::Waste);
        place(world, Suit::Heart, Rank::Nine, true, StackType::Waste);
        place(world, Suit::Club, Rank::Four, true, StackType::Waste);
        place(world, Suit::Diamond, Rank::Jack, true, StackType::Waste);
        ace
    });
    let before = session.snapshot();

    assert_eq!(
        session.handle_card_activation(ace),
        MoveOutcome::Rejected(RejectReason::WasteCardNotSelectable)
    );
    assert_eq!(
        session.handle_empty_zone_activation(StackType::Foundation(0)),
        MoveOutcome::Rejected(RejectReason::NothingSelected)
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(zone(&session, StackType::Waste).len(), 4);
    assert!(zone(&session, StackType::Foundation(0)).is_empty());
}

#[test]
fn face_down_pile_card_is_ignored() {
    let mut session = seeded(false, 5);
    session.drain_events();
    let hidden = zone(&session, StackType::Tableau(6))[0];
    assert_eq!(session.handle_card_activation(hidden), MoveOutcome::Rejected(RejectReason::FaceDownCard));
    assert!(session.drain_events().is_empty());
}

#[test]
fn undo_restores_previous_table() {
    let mut session = seeded(false, 11);
    let before = session.snapshot();
    session.draw_from_stash();
    let waste_top = *zone(&session, StackType::Waste).last().unwrap();
    session.select_run(waste_top);

    assert_eq!(session.undo(), UndoOutcome::Applied);
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.remaining_undo(), MAX_UNDO - 1);
    assert!(selected_cards(session.world()).is_empty());
    assert!(session
        .drain_events()
        .contains(&SessionEvent::UndoApplied { remaining_undo: MAX_UNDO - 1 }));
    println!("アンドゥ往復テスト、成功！🎉");
}

#[test]
fn undo_turns_revealed_card_face_down_again() {
    let (mut session, (hidden, seven, eight)) = rigged(false, |world| {
        (
            place(world, Suit::Diamond, Rank::Queen, false, StackType::Tableau(0)),
            place(world, Suit::Club, Rank::Seven, true, StackType::Tableau(0)),
            place(world, Suit::Heart, Rank::Eight, true, StackType::Tableau(1)),
        )
    });
    let before = session.snapshot();

    session.select_run(seven);
    assert_eq!(session.move_selection_to_pile(1), MoveOutcome::Moved);
    assert!(card_of(session.world(), hidden).is_face_up);

    assert_eq!(session.undo(), UndoOutcome::Applied);
    assert_eq!(session.snapshot(), before);
    assert!(!card_of(session.world(), hidden).is_face_up, "めくれたカードは裏向きに戻る");
    assert_eq!(zone(&session, StackType::Tableau(0)), vec![hidden, seven]);
    assert_eq!(zone(&session, StackType::Tableau(1)), vec![eight]);
    assert_eq!(session.move_count(), 0);
}

#[test]
fn undo_returns_card_from_foundation_to_waste() {
    let (mut session, (five, ace)) = rigged(false, |world| {
        (
            place(world, Suit::Club, Rank::Five, true, StackType::Waste),
            place(world, Suit::Heart, Rank::Ace, true, StackType::Waste),
        )
    });
    let before = session.snapshot();

    session.select_run(ace);
    assert_eq!(session.handle_empty_zone_activation(StackType::Foundation(1)), MoveOutcome::Moved);
    assert_eq!(zone(&session, StackType::Foundation(1)), vec![ace]);

    assert_eq!(session.undo(), UndoOutcome::Applied);
    assert_eq!(session.snapshot(), before);
    assert_eq!(zone(&session, StackType::Waste), vec![five, ace]);
    assert!(zone(&session, StackType::Foundation(1)).is_empty());
    assert!(card_of(session.world(), ace).is_face_up);
    assert!(selected_cards(session.world()).is_empty());
}

#[test]
fn undo_reports_missing_history() {
    let mut session = seeded(false, 11);
    session.drain_events();
    assert_eq!(session.undo(), UndoOutcome::NoHistory);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::Notification { message: "No more actions to undo.".to_string() }]
    );
}

#[test]
fn undo_budget_runs_out() {
    let mut session = seeded(false, 12);
    session.undo_stack = UndoStack::new(1);
    session.draw_from_stash();
    session.draw_from_stash();

    assert_eq!(session.undo(), UndoOutcome::Applied);
    let after_first = session.snapshot();
    session.drain_events();

    assert_eq!(session.undo(), UndoOutcome::LimitReached);
    assert_eq!(session.snapshot(), after_first);
    assert_eq!(session.move_count(), 1);
    assert_eq!(
        session.drain_events(),
        vec![SessionEvent::Notification { message: "Undo limit reached.".to_string() }]
    );
}

#[test]
fn infinite_undo_uses_large_budget() {
    let session = Session::new(GameConfig::new(false, true).with_seed(1));
    assert_eq!(session.remaining_undo(), 9999);
}

/// 組札を Q まで積んで、K を 4 枚場札に置いた盤面
fn one_step_from_winning() -> (Session, Vec<Entity>) {
    rigged(false, |world| {
        let mut kings = Vec::new();
        for (slot, &suit) in [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade].iter().enumerate() {
            for &rank in ALL_RANKS.iter().take(12) {
                place(world, suit, rank, true, StackType::Foundation(slot as u8));
            }
            kings.push(place(world, suit, Rank::King, true, StackType::Tableau(slot as u8)));
        }
        kings
    })
}

#[test]
fn fourth_king_wins_and_freezes_timer() {
    let (mut session, kings) = one_step_from_winning();
    session.tick(5.0);

    for (slot, &king) in kings.iter().enumerate().take(3) {
        session.select_run(king);
        assert_eq!(session.move_selection_to_foundation(slot as u8), MoveOutcome::Moved);
    }
    assert_eq!(session.status(), GameStatus::Playing);

    session.select_run(kings[3]);
    let queen_of_spades = *zone(&session, StackType::Foundation(3)).last().unwrap();
    let outcome = session.handle_card_activation(queen_of_spades);
    assert_eq!(outcome, MoveOutcome::Won { moves: 4, time_seconds: 5.0 });
    assert_eq!(session.status(), GameStatus::Won);
    assert!(foundation_tops(session.world()).iter().all(|top| top.map(|c| c.rank) == Some(Rank::King)));

    session.tick(3.0);
    assert_eq!(session.elapsed_seconds(), 5.0, "勝ったらタイマーは止まる");
    assert_eq!(session.final_score(), Some((4, 5.0)));
    assert!(session.drain_events().contains(&SessionEvent::Won { moves: 4, time_seconds: 5.0 }));
    println!("勝利判定テスト、成功！🏆");
}

#[test]
fn won_game_refuses_moves_and_undo() {
    let (mut session, kings) = one_step_from_winning();
    for (slot, &king) in kings.iter().enumerate() {
        session.select_run(king);
        session.move_selection_to_foundation(slot as u8);
    }
    assert_eq!(session.status(), GameStatus::Won);

    assert_eq!(session.draw_from_stash(), MoveOutcome::Rejected(RejectReason::GameFinished));
    assert_eq!(session.select_run(kings[0]), MoveOutcome::Rejected(RejectReason::GameFinished));
    assert_eq!(session.undo(), UndoOutcome::GameFinished);
    assert_eq!(session.move_count(), 4);
}

#[test]
fn score_is_submitted_only_after_winning() {
    let (mut session, kings) = one_step_from_winning();
    let mut store = MemoryScoreStore::new();
    assert_eq!(session.submit_score(&mut store, "alice"), Err(ScoreError::GameNotWon));

    for (slot, &king) in kings.iter().enumerate() {
        session.select_run(king);
        session.move_selection_to_foundation(slot as u8);
    }
    assert_eq!(session.submit_score(&mut store, "bob"), Err(ScoreError::InvalidName { len: 3 }));
    let record = session.submit_score(&mut store, "alice").unwrap();
    assert_eq!(record.moves, 4);
    assert_eq!(store.top(10), vec![record]);
    assert_eq!(session.status(), GameStatus::Won);
}

/// 保存に必ず失敗する保存先
struct BrokenStore;

impl ScoreStore for BrokenStore {
    fn save(&mut self, _record: ScoreRecord) -> Result<(), ScoreError> {
        Err(ScoreError::Storage("quota exceeded".to_string()))
    }

    fn top(&self, _limit: usize) -> Vec<ScoreRecord> {
        Vec::new()
    }
}

#[test]
fn failed_score_save_leaves_game_untouched() {
    let (mut session, kings) = one_step_from_winning();
    for (slot, &king) in kings.iter().enumerate() {
        session.select_run(king);
        session.move_selection_to_foundation(slot as u8);
    }
    let before = session.snapshot();
    session.drain_events();

    let result = session.submit_score(&mut BrokenStore, "alice");
    assert_eq!(result, Err(ScoreError::Storage("quota exceeded".to_string())));
    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.move_count(), 4);
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.final_score(), Some((4, 0.0)));
    assert!(session.drain_events().is_empty());
}

#[test]
fn new_game_resets_everything_but_theme() {
    let mut session = seeded(false, 21);
    session.change_theme();
    session.draw_from_stash();
    session.tick(12.0);

    session.new_game();
    assert_eq!(session.move_count(), 0);
    assert_eq!(session.undo_depth(), 0);
    assert_eq!(session.remaining_undo(), MAX_UNDO);
    assert_eq!(session.elapsed_seconds(), 0.0);
    assert_eq!(session.theme().theme(), Theme::Ascii);
    assert_eq!(session.world().get_all_entities_with_component::<Card>().len(), 52);
    assert_eq!(session.world().entity_count(), 53);
}

#[test]
fn theme_changes_are_announced() {
    let mut session = seeded(false, 2);
    session.drain_events();
    assert_eq!(session.change_theme(), Theme::Ascii);
    assert_eq!(session.border_style(false), BorderStyle::Ascii);
    assert_eq!(session.border_style(true), BorderStyle::Heavy);
    assert_eq!(session.drain_events(), vec![SessionEvent::ThemeChanged { theme: Theme::Ascii }]);

    let top = *zone(&session, StackType::Tableau(0)).last().unwrap();
    session.select_run(top);
    assert_eq!(session.card_border_style(top), BorderStyle::Heavy);
}

#[test]
#[should_panic(expected = "foundation index 7 out of range")]
fn bad_foundation_index_panics() {
    let mut session = seeded(false, 2);
    session.handle_click(ClickTarget::Stack(StackType::Foundation(7)));
}
