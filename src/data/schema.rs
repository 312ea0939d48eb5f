use bevy::asset::Asset;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::party::components::MonsterSize;

/// 物品分类。Equipment 先占位，装备流程尚未开放。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum ItemCategory {
    /// 消费品，可以直接使用
    Consumable,
    /// 素材，不能使用
    #[default]
    Material,
    Equipment,
}

/// 物品定义表的一条记录
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub id: String,
    pub name: String,
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub category: ItemCategory,
    /// 使用后恢复多少体力（只对 Consumable 有意义）
    #[serde(default)]
    pub recover: i32,
    #[serde(default)]
    pub description: String,
}

fn default_max_stack() -> u32 {
    99
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct ItemList {
    pub items: Vec<ItemEntry>,
}

/// 怪物种族定义表的一条记录
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: MonsterSize,
    #[serde(default = "default_max_hp")]
    pub base_max_hp: i32,
    #[serde(default = "default_max_mp")]
    pub base_max_mp: i32,
    #[serde(default = "default_battle_stat")]
    pub base_attack: i32,
    #[serde(default = "default_battle_stat")]
    pub base_defense: i32,
    #[serde(default)]
    pub description: String,
}

fn default_max_hp() -> i32 {
    100
}

fn default_max_mp() -> i32 {
    50
}

fn default_battle_stat() -> i32 {
    10
}

#[derive(Asset, TypePath, Deserialize, Debug)]
pub struct SpeciesList {
    pub species: Vec<SpeciesEntry>,
}
