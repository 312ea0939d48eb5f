use bevy::prelude::*;

#[derive(Event)]
pub struct GiveItemEvent {
    pub id: String,
    pub count: u32,
}

#[derive(Event)]
pub struct UseItemEvent {
    pub index: usize,
}

#[derive(Event)]
pub struct DropItemEvent {
    pub index: usize,
}

/// 把 from 格拖到 to 格（交换或合并）
#[derive(Event)]
pub struct MoveItemEvent {
    pub from: usize,
    pub to: usize,
}

#[derive(Event)]
pub struct ListInventoryEvent; // 让 CLI 请求打印背包
