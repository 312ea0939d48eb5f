use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::data::catalog::SpeciesCatalog;

/// 编队通知的中转队列，角色同 InventoryNoticeBuffer
#[derive(Resource, Clone, Default)]
pub struct PartyNoticeBuffer(pub Arc<Mutex<VecDeque<PartyNotice>>>);

pub fn wire_notices(mut roster: ResMut<PartyRoster>, buffer: Res<PartyNoticeBuffer>) {
    let queue = buffer.0.clone();
    roster.subscribe(move |notice| {
        queue.lock().unwrap().push_back(notice.clone());
    });
}

pub fn drain_notices(buffer: Res<PartyNoticeBuffer>) {
    let mut queue = buffer.0.lock().unwrap();
    while let Some(notice) = queue.pop_front() {
        match notice {
            // 编队变化只有粗粒度一种，视图收到后整体重查
            PartyNotice::RosterChanged => debug!("编队发生了变化"),
        }
    }
}

/// 处理"catch"——生成新怪物并收编
pub fn catch_monster(
    mut ev_catch: EventReader<CatchMonsterEvent>,
    mut roster: ResMut<PartyRoster>,
    catalog: Res<SpeciesCatalog>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_catch.read() {
        let Some(species) = catalog.find(&ev.species_id) else {
            log.write(LogEvent(format!("不存在种族 ID {}", ev.species_id)));
            continue;
        };

        let monster = Monster::from_species(species, ev.nickname.clone());
        let name = monster.nickname.clone();
        let size = monster.species.size;

        match roster.add_monster(monster) {
            PartyZone::Main => log.write(LogEvent(format!(
                "{name}（{size:?} 体型）加入了主战编队！"
            ))),
            PartyZone::Sub => log.write(LogEvent(format!(
                "{name}（{size:?} 体型）加入了预备编队！"
            ))),
            PartyZone::Storage => log.write(LogEvent(format!(
                "编队都满了，{name}（{size:?} 体型）送进了仓库"
            ))),
        };
    }
}

/// 处理"send"——编队间搬动
pub fn move_monster(
    mut ev_move: EventReader<MoveMonsterEvent>,
    mut roster: ResMut<PartyRoster>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_move.read() {
        let Some(id) = roster.find(&ev.token) else {
            log.write(LogEvent(format!("找不到怪物 {}", ev.token)));
            continue;
        };

        if roster.try_move(id, ev.target) {
            log.write(LogEvent(format!("已把 {} 挪到 {:?}", ev.token, ev.target)));
        } else {
            log.write(LogEvent(format!(
                "挪不动 {}（目标费用不够，或它在仓库里）",
                ev.token
            )));
        }
    }
}

/// 打印编队
pub fn print_party(mut ev_list: EventReader<ListPartyEvent>, roster: Res<PartyRoster>) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    for (title, zone) in [
        ("主战", PartyZone::Main),
        ("预备", PartyZone::Sub),
        ("仓库", PartyZone::Storage),
    ] {
        match zone {
            PartyZone::Storage => println!("--- {title} ---"),
            _ => println!(
                "--- {title} Cost: {}/{} ---",
                roster.total_cost(zone),
                MAX_PARTY_COST
            ),
        }
        let members = roster.zone(zone);
        if members.is_empty() {
            println!("  (empty)");
            continue;
        }
        for monster in members {
            println!(
                "  {} Lv.{} {}（{:?}） HP {}/{} MP {}/{} [{}]",
                monster.nickname,
                monster.lv,
                monster.species.name,
                monster.species.size,
                monster.hp,
                monster.max_hp,
                monster.mp,
                monster.max_mp,
                monster.id
            );
        }
    }
}
