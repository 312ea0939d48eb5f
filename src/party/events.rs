use bevy::prelude::*;

use super::components::PartyZone;

/// 收编一只新怪物（按种族模板生成）
#[derive(Event)]
pub struct CatchMonsterEvent {
    pub species_id: String,
    pub nickname: Option<String>,
}

/// 把某只怪物挪去主战或预备
#[derive(Event)]
pub struct MoveMonsterEvent {
    pub token: String,
    pub target: PartyZone,
}

#[derive(Event)]
pub struct ListPartyEvent; // 让 CLI 请求打印编队
