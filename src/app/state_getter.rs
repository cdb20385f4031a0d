// src/app/state_getter.rs
//! Session の今の状態を、JS 側が描画に使う JSON に変換するよ。

use log::{debug, error};
use serde::Serialize;

use crate::components::{Card, GameStatus, Rank, StackType, Suit};
use crate::ecs::Entity;
use crate::logic::rules::visible_waste_count;
use crate::logic::zones::{card_of, is_selected, stack_len, stack_of};
use crate::session::timer::format_elapsed;
use crate::session::Session;
use crate::theme::{BorderStyle, Theme};

/// カード 1 枚分の描画情報。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub entity: Entity,
    pub suit: Suit,
    pub rank: Rank,
    pub is_face_up: bool,
    pub stack_type: StackType,
    pub position_in_stack: u8,
    pub selected: bool,
    /// 捨て札の下の方に埋もれて描画しないカードは false
    pub visible: bool,
    pub border: BorderStyle,
    /// Rainbow テーマのときだけ入る `#rrggbb`
    pub color: Option<String>,
}

/// 盤面全体の描画情報。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub status: GameStatus,
    pub easy_mode: bool,
    pub move_count: u32,
    pub remaining_undo: u32,
    pub elapsed_seconds: f64,
    pub elapsed_label: String,
    pub theme: Theme,
    pub cards: Vec<CardView>,
}

/// Session から描画用のビューを組み立てる。カードはエンティティ ID 順。
pub fn table_view(session: &Session) -> TableView {
    let world = session.world();
    let entities = world.get_all_entities_with_component::<Card>();
    let palette = session.theme().palette(entities.len());
    let waste_len = stack_len(world, StackType::Waste);
    let waste_window = visible_waste_count(session.config().easy_mode);

    let cards = entities
        .into_iter()
        .enumerate()
        .map(|(index, entity)| {
            let card = card_of(world, entity);
            let info = stack_of(world, entity);
            let selected = is_selected(world, entity);
            let visible = info.stack_type != StackType::Waste
                || (info.position_in_stack as usize) + waste_window >= waste_len;
            CardView {
                entity,
                suit: card.suit,
                rank: card.rank,
                is_face_up: card.is_face_up,
                stack_type: info.stack_type,
                position_in_stack: info.position_in_stack,
                selected,
                visible,
                border: session.border_style(selected),
                color: palette.get(index).cloned(),
            }
        })
        .collect::<Vec<_>>();
    debug!("Collected view data for {} cards.", cards.len());

    TableView {
        status: session.status(),
        easy_mode: session.config().easy_mode,
        move_count: session.move_count(),
        remaining_undo: session.remaining_undo(),
        elapsed_seconds: session.elapsed_seconds(),
        elapsed_label: format_elapsed(session.elapsed_seconds()),
        theme: session.theme().theme(),
        cards,
    }
}

/// 盤面を JSON 文字列にする。
pub fn get_table_state_json(session: &Session) -> Result<String, String> {
    serde_json::to_string(&table_view(session)).map_err(|e| {
        let error_msg = format!("Failed to serialize table state: {}", e);
        error!("{}", error_msg);
        error_msg
    })
}
