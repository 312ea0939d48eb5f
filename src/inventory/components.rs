use bevy::prelude::*;

use crate::core::notify::{Notifier, SubscriberId};
use crate::data::catalog::ItemKind;
use crate::data::schema::ItemCategory;

/// 背包总格数（横10 × 纵4）
pub const TOTAL_SLOTS: usize = 40;
/// 第一排是快捷栏
pub const HOTBAR_SLOTS: usize = 10;

/// 背包的一格。空格没有 kind，count 为 0。
#[derive(Clone, Debug, Default)]
pub struct ItemSlot {
    pub kind: Option<ItemKind>,
    pub count: u32,
}

impl ItemSlot {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() || self.count == 0
    }

    pub fn clear(&mut self) {
        self.kind = None;
        self.count = 0;
    }
}

/// 背包数据变化的通知。视图层只管订阅重绘，不要在回调里反过来改背包。
#[derive(Clone, Debug)]
pub enum InventoryNotice {
    /// 某一格的内容变了，附带这一格提交后的快照
    SlotUpdated { index: usize, slot: ItemSlot },
    /// 背包装不下了，overflow 是没放进去的数量，由调用方决定怎么处理
    InventoryFull { kind: ItemKind, overflow: u32 },
    /// 用掉了一个消费品
    ItemUsed { kind: ItemKind },
    /// 某格被整格丢弃，交给场景生成掉落物
    ItemDropped { kind: ItemKind, count: u32 },
}

/// 玩家背包（挂在 Resource）。格子只能通过下面的操作改动，
/// 外部拿到的永远是共享引用。
#[derive(Resource)]
pub struct Backpack {
    slots: Vec<ItemSlot>,
    notifier: Notifier<InventoryNotice>,
}

impl Backpack {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ItemSlot::default(); capacity],
            notifier: Notifier::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 取某一格；越界返回 None
    pub fn get_slot(&self, index: usize) -> Option<&ItemSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&InventoryNotice) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// 往背包里放 `amount` 个 `kind`，返回放不下的余量。
    /// 先从低位格往已有的同种堆上叠，再从低位格开新堆，顺序是固定的。
    pub fn add_item(&mut self, kind: &ItemKind, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }
        let mut remaining = amount;

        // 1. 先叠到已有的同种堆上
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            let stackable = match &slot.kind {
                Some(held) => held == kind && slot.count < kind.max_stack,
                None => false,
            };
            if !slot.is_empty() && stackable {
                let space = kind.max_stack - slot.count;
                let add = space.min(remaining);
                slot.count += add;
                remaining -= add;

                let snapshot = slot.clone();
                self.notifier
                    .emit(&InventoryNotice::SlotUpdated { index, slot: snapshot });
                if remaining == 0 {
                    return 0;
                }
            }
        }

        // 2. 再找空格开新堆
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            if slot.is_empty() {
                let add = kind.max_stack.min(remaining);
                slot.kind = Some(kind.clone());
                slot.count = add;
                remaining -= add;

                let snapshot = slot.clone();
                self.notifier
                    .emit(&InventoryNotice::SlotUpdated { index, slot: snapshot });
                if remaining == 0 {
                    return 0;
                }
            }
        }

        // 3. 还剩就是真装不下了，余量交还调用方
        warn!("背包已满，{} ×{} 放不下", kind.name, remaining);
        self.notifier.emit(&InventoryNotice::InventoryFull {
            kind: kind.clone(),
            overflow: remaining,
        });
        remaining
    }

    /// 从指定格扣掉 `amount` 个。越界或空格直接忽略；
    /// 扣超了就把这一格清空，多出来的部分不报错。
    pub fn remove_at(&mut self, index: usize, amount: u32) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.is_empty() {
            return;
        }

        if amount >= slot.count {
            slot.clear();
        } else {
            slot.count -= amount;
        }

        let snapshot = slot.clone();
        self.notifier
            .emit(&InventoryNotice::SlotUpdated { index, slot: snapshot });
    }

    /// 使用指定格的物品 1 个。只有消费品能用，其余种类只打一条日志。
    pub fn use_item_at(&mut self, index: usize) {
        let Some(slot) = self.slots.get(index) else {
            return;
        };
        if slot.is_empty() {
            return;
        }
        let Some(kind) = slot.kind.clone() else {
            return;
        };

        if kind.category != ItemCategory::Consumable {
            info!("{} 现在不能使用", kind.name);
            return;
        }

        self.remove_at(index, 1);
        self.notifier.emit(&InventoryNotice::ItemUsed { kind });
    }

    /// 把指定格整格丢掉，掉落物的生成交给订阅方
    pub fn drop_item_at(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.is_empty() {
            return;
        }
        let Some(kind) = slot.kind.clone() else {
            return;
        };
        let count = slot.count;

        slot.clear();
        let snapshot = slot.clone();
        self.notifier
            .emit(&InventoryNotice::SlotUpdated { index, slot: snapshot });
        self.notifier
            .emit(&InventoryNotice::ItemDropped { kind, count });
    }

    /// 交换两格；两格装的是同一种物品时改为合并（受堆叠上限约束，允许只合并一部分）。
    /// 操作成立时两格都会发通知，哪怕其中一格数值没变。
    pub fn swap_or_merge(&mut self, from: usize, to: usize) {
        if from == to || from >= self.slots.len() || to >= self.slots.len() {
            return;
        }

        let merge_amount = {
            let from_slot = &self.slots[from];
            let to_slot = &self.slots[to];
            match (&from_slot.kind, &to_slot.kind) {
                (Some(from_kind), Some(to_kind))
                    if !from_slot.is_empty() && !to_slot.is_empty() && from_kind == to_kind =>
                {
                    let space = to_kind.max_stack - to_slot.count;
                    Some(space.min(from_slot.count))
                }
                _ => None,
            }
        };

        match merge_amount {
            Some(moved) => {
                self.slots[to].count += moved;
                let from_slot = &mut self.slots[from];
                from_slot.count -= moved;
                if from_slot.count == 0 {
                    from_slot.clear();
                }
                info!("合并了格子 {from} → {to}（移动 {moved} 个）");
            }
            None => {
                self.slots.swap(from, to);
                info!("交换了格子 {from} 和 {to}");
            }
        }

        let snapshot = self.slots[from].clone();
        self.notifier.emit(&InventoryNotice::SlotUpdated {
            index: from,
            slot: snapshot,
        });
        let snapshot = self.slots[to].clone();
        self.notifier.emit(&InventoryNotice::SlotUpdated {
            index: to,
            slot: snapshot,
        });
    }
}
