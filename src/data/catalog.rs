//! 定义表在加载完成后被冻结成目录：每条定义只分配一个 Arc，
//! 之后所有背包格 / 怪物实例都引用同一份，“同一种”判定用指针同一性。

use std::ops::Deref;
use std::sync::Arc;

use bevy::prelude::*;
use uuid::Uuid;

use super::schema::{ItemEntry, ItemList, SpeciesEntry, SpeciesList};

/// 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
pub fn uuid_from_id(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}

/// 共享的物品定义句柄。相等比较是同一性比较，字段相同的两份定义不相等。
#[derive(Clone, Debug)]
pub struct ItemKind(Arc<ItemEntry>);

impl ItemKind {
    pub fn new(entry: ItemEntry) -> Self {
        Self(Arc::new(entry))
    }

    pub fn uuid(&self) -> Uuid {
        uuid_from_id(&self.0.id)
    }
}

impl Deref for ItemKind {
    type Target = ItemEntry;

    fn deref(&self) -> &ItemEntry {
        &self.0
    }
}

impl PartialEq for ItemKind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ItemKind {}

/// 共享的种族定义句柄，规则与 [`ItemKind`] 相同
#[derive(Clone, Debug)]
pub struct SpeciesKind(Arc<SpeciesEntry>);

impl SpeciesKind {
    pub fn new(entry: SpeciesEntry) -> Self {
        Self(Arc::new(entry))
    }

    pub fn uuid(&self) -> Uuid {
        uuid_from_id(&self.0.id)
    }
}

impl Deref for SpeciesKind {
    type Target = SpeciesEntry;

    fn deref(&self) -> &SpeciesEntry {
        &self.0
    }
}

impl PartialEq for SpeciesKind {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SpeciesKind {}

/// 全部物品定义，按表内顺序保存
#[derive(Resource)]
pub struct ItemCatalog {
    entries: Vec<ItemKind>,
}

impl ItemCatalog {
    pub fn from_list(list: &ItemList) -> Self {
        Self {
            entries: list.items.iter().cloned().map(ItemKind::new).collect(),
        }
    }

    /// 按 id / uuid / 名称查找（大小写不敏感）
    pub fn find(&self, token: &str) -> Option<ItemKind> {
        let token = token.to_lowercase();
        self.entries
            .iter()
            .find(|kind| {
                kind.id.eq_ignore_ascii_case(&token)
                    || kind.name.eq_ignore_ascii_case(&token)
                    || kind.uuid().to_string() == token
            })
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemKind> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 全部种族定义
#[derive(Resource)]
pub struct SpeciesCatalog {
    entries: Vec<SpeciesKind>,
}

impl SpeciesCatalog {
    pub fn from_list(list: &SpeciesList) -> Self {
        Self {
            entries: list.species.iter().cloned().map(SpeciesKind::new).collect(),
        }
    }

    pub fn find(&self, token: &str) -> Option<SpeciesKind> {
        let token = token.to_lowercase();
        self.entries
            .iter()
            .find(|kind| {
                kind.id.eq_ignore_ascii_case(&token)
                    || kind.name.eq_ignore_ascii_case(&token)
                    || kind.uuid().to_string() == token
            })
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesKind> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
