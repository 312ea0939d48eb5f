use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::{components::*, events::*};
use crate::core::events::LogEvent;
use crate::data::catalog::ItemCatalog;

/// 背包通知的中转队列：订阅回调往里推，系统每帧取出来转成玩家可见输出。
/// 这是视图层的替身，真正的 UI 接上后走同一条订阅。
#[derive(Resource, Clone, Default)]
pub struct InventoryNoticeBuffer(pub Arc<Mutex<VecDeque<InventoryNotice>>>);

/// 启动时在背包上挂一个订阅
pub fn wire_notices(mut backpack: ResMut<Backpack>, buffer: Res<InventoryNoticeBuffer>) {
    let queue = buffer.0.clone();
    backpack.subscribe(move |notice| {
        queue.lock().unwrap().push_back(notice.clone());
    });
}

/// 把积压的通知翻译成日志
pub fn drain_notices(buffer: Res<InventoryNoticeBuffer>, mut log: EventWriter<LogEvent>) {
    let mut queue = buffer.0.lock().unwrap();
    while let Some(notice) = queue.pop_front() {
        match notice {
            InventoryNotice::SlotUpdated { index, slot } => {
                // 每格的重绘交给视图，这里只留痕
                if slot.is_empty() {
                    debug!("slot[{index}] -> (空)");
                } else if let Some(kind) = &slot.kind {
                    debug!("slot[{index}] -> {} ×{}", kind.name, slot.count);
                }
            }
            InventoryNotice::InventoryFull { kind, overflow } => {
                log.write(LogEvent(format!(
                    "背包已满，{} ×{overflow} 掉回了地上",
                    kind.name
                )));
            }
            InventoryNotice::ItemUsed { kind } => {
                log.write(LogEvent(format!(
                    "使用了 {}，恢复 {} 点体力",
                    kind.name, kind.recover
                )));
            }
            InventoryNotice::ItemDropped { kind, count } => {
                log.write(LogEvent(format!("丢下了 {} ×{count}", kind.name)));
            }
        }
    }
}

/// 处理"give"——往背包里塞东西
pub fn give_item(
    mut ev_give: EventReader<GiveItemEvent>,
    mut backpack: ResMut<Backpack>,
    catalog: Res<ItemCatalog>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in ev_give.read() {
        let Some(kind) = catalog.find(&ev.id) else {
            log.write(LogEvent(format!("不存在物品 ID {}", ev.id)));
            continue;
        };

        let leftover = backpack.add_item(&kind, ev.count);
        let placed = ev.count - leftover;
        if placed > 0 {
            log.write(LogEvent(format!("获得 {} ×{placed}", kind.name)));
        }
        // 放不下的部分 add_item 已经发过 InventoryFull 通知
    }
}

/// 使用物品
pub fn use_item(mut ev_use: EventReader<UseItemEvent>, mut backpack: ResMut<Backpack>) {
    for ev in ev_use.read() {
        backpack.use_item_at(ev.index);
    }
}

/// 整格丢弃
pub fn drop_item(mut ev_drop: EventReader<DropItemEvent>, mut backpack: ResMut<Backpack>) {
    for ev in ev_drop.read() {
        backpack.drop_item_at(ev.index);
    }
}

/// 拖拽落格：交换或合并
pub fn move_item(mut ev_move: EventReader<MoveItemEvent>, mut backpack: ResMut<Backpack>) {
    for ev in ev_move.read() {
        backpack.swap_or_merge(ev.from, ev.to);
    }
}

/// 打印背包内容
pub fn print_inventory(mut ev_list: EventReader<ListInventoryEvent>, backpack: Res<Backpack>) {
    if ev_list.is_empty() {
        return;
    }
    ev_list.clear();

    let mut empty = true;
    for (idx, slot) in backpack.slots().iter().enumerate() {
        if let Some(kind) = &slot.kind {
            if slot.count == 0 {
                continue;
            }
            empty = false;
            let hotbar = if idx < HOTBAR_SLOTS { "*" } else { " " };
            println!(
                "[{idx:>2}]{hotbar} {} ×{} (id={})",
                kind.name, slot.count, kind.id
            );
        }
    }

    if empty {
        println!("  (empty)");
    } else {
        println!("  * = 快捷栏 0-{}", HOTBAR_SLOTS - 1);
    }
}
