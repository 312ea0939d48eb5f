use bevy::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::notify::{Notifier, SubscriberId};
use crate::data::catalog::SpeciesKind;

/// 主战 / 预备各自的费用上限
pub const MAX_PARTY_COST: u32 = 4;

/// 怪物体型，数值就是编队时占用的费用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum MonsterSize {
    /// 1 费
    #[default]
    S,
    /// 2 费
    M,
    /// 3 费
    L,
    /// 4 费，一只就把队伍占满
    Omega,
}

impl MonsterSize {
    pub fn cost(self) -> u32 {
        match self {
            MonsterSize::S => 1,
            MonsterSize::M => 2,
            MonsterSize::L => 3,
            MonsterSize::Omega => 4,
        }
    }
}

/// 编队的三个去处。主战和预备受费用上限约束，仓库不设限。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyZone {
    Main,
    Sub,
    Storage,
}

/// 一只具体的怪物。id 在捕获时生成，之后只会在编队间搬动，不会复制。
#[derive(Debug, Clone)]
pub struct Monster {
    pub id: Uuid,
    pub nickname: String,
    pub species: SpeciesKind,
    pub lv: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
}

impl Monster {
    /// 按种族模板生出一只 1 级的新怪物，没起昵称就用种族名
    pub fn from_species(species: SpeciesKind, nickname: Option<String>) -> Self {
        let nickname = nickname.unwrap_or_else(|| species.name.clone());
        Self {
            id: Uuid::new_v4(),
            nickname,
            lv: 1,
            hp: species.base_max_hp,
            max_hp: species.base_max_hp,
            mp: species.base_max_mp,
            max_mp: species.base_max_mp,
            species,
        }
    }

    pub fn cost(&self) -> u32 {
        self.species.size.cost()
    }
}

/// 编队变化的通知。粗粒度：只说“变了”，视图自己重查。
#[derive(Clone, Debug)]
pub enum PartyNotice {
    RosterChanged,
}

/// 主战 / 预备 / 仓库三块编队（挂在 Resource）
#[derive(Resource)]
pub struct PartyRoster {
    main: Vec<Monster>,
    sub: Vec<Monster>,
    storage: Vec<Monster>,
    notifier: Notifier<PartyNotice>,
}

impl Default for PartyRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyRoster {
    pub fn new() -> Self {
        Self {
            main: Vec::new(),
            sub: Vec::new(),
            storage: Vec::new(),
            notifier: Notifier::default(),
        }
    }

    pub fn zone(&self, zone: PartyZone) -> &[Monster] {
        match zone {
            PartyZone::Main => &self.main,
            PartyZone::Sub => &self.sub,
            PartyZone::Storage => &self.storage,
        }
    }

    fn zone_mut(&mut self, zone: PartyZone) -> &mut Vec<Monster> {
        match zone {
            PartyZone::Main => &mut self.main,
            PartyZone::Sub => &mut self.sub,
            PartyZone::Storage => &mut self.storage,
        }
    }

    /// 一块编队当前占用的总费用
    pub fn total_cost(&self, zone: PartyZone) -> u32 {
        self.zone(zone).iter().map(Monster::cost).sum()
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&PartyNotice) + Send + Sync + 'static,
    ) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// 收编一只怪物：主战装得下进主战，不行试预备，再不行进仓库。
    /// 只按先来后到找第一个装得下的去处，不做腾挪。返回实际去处。
    pub fn add_monster(&mut self, monster: Monster) -> PartyZone {
        let cost = monster.cost();

        let zone = if self.total_cost(PartyZone::Main) + cost <= MAX_PARTY_COST {
            PartyZone::Main
        } else if self.total_cost(PartyZone::Sub) + cost <= MAX_PARTY_COST {
            PartyZone::Sub
        } else {
            PartyZone::Storage
        };

        self.zone_mut(zone).push(monster);
        self.notifier.emit(&PartyNotice::RosterChanged);
        zone
    }

    /// 把一只怪物挪到指定编队。成功返回 true；失败时什么都不改、不发通知。
    /// 仓库既不能作为目标，也找不到仓库里的怪物。
    pub fn try_move(&mut self, id: Uuid, target: PartyZone) -> bool {
        if target == PartyZone::Storage {
            return false;
        }

        let current = if self.main.iter().any(|m| m.id == id) {
            PartyZone::Main
        } else if self.sub.iter().any(|m| m.id == id) {
            PartyZone::Sub
        } else {
            return false;
        };

        // 同一块编队内算排序：挪到队尾
        if current == target {
            let list = self.zone_mut(current);
            let Some(pos) = list.iter().position(|m| m.id == id) else {
                return false;
            };
            let monster = list.remove(pos);
            list.push(monster);
            self.notifier.emit(&PartyNotice::RosterChanged);
            return true;
        }

        let Some(pos) = self.zone(current).iter().position(|m| m.id == id) else {
            return false;
        };
        let moving_cost = self.zone(current)[pos].cost();
        if self.total_cost(target) + moving_cost > MAX_PARTY_COST {
            warn!("费用超限，挪不过去");
            return false;
        }

        let monster = self.zone_mut(current).remove(pos);
        self.zone_mut(target).push(monster);
        self.notifier.emit(&PartyNotice::RosterChanged);
        true
    }

    /// 按昵称或 uuid 在三块编队里找（CLI 用）
    pub fn find(&self, token: &str) -> Option<Uuid> {
        let token = token.to_lowercase();
        [PartyZone::Main, PartyZone::Sub, PartyZone::Storage]
            .into_iter()
            .flat_map(|zone| self.zone(zone).iter())
            .find(|m| {
                m.nickname.eq_ignore_ascii_case(&token) || m.id.to_string() == token
            })
            .map(|m| m.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::SpeciesEntry;
    use std::sync::{Arc, Mutex};

    fn species(id: &str, size: MonsterSize) -> SpeciesKind {
        SpeciesKind::new(SpeciesEntry {
            id: id.into(),
            name: id.into(),
            size,
            base_max_hp: 100,
            base_max_mp: 50,
            base_attack: 10,
            base_defense: 10,
            description: String::new(),
        })
    }

    fn monster(id: &str, size: MonsterSize) -> Monster {
        Monster::from_species(species(id, size), None)
    }

    fn change_counter(roster: &mut PartyRoster) -> Arc<Mutex<u32>> {
        let counter = Arc::new(Mutex::new(0));
        let sink = counter.clone();
        roster.subscribe(move |_| *sink.lock().unwrap() += 1);
        counter
    }

    #[test]
    fn add_monster_is_first_fit_main_then_sub() {
        let mut roster = PartyRoster::new();

        // 2 + 2 占满主战，3 费的只能进预备
        assert_eq!(roster.add_monster(monster("m1", MonsterSize::M)), PartyZone::Main);
        assert_eq!(roster.add_monster(monster("m2", MonsterSize::M)), PartyZone::Main);
        assert_eq!(roster.add_monster(monster("l1", MonsterSize::L)), PartyZone::Sub);

        assert_eq!(roster.total_cost(PartyZone::Main), 4);
        assert_eq!(roster.total_cost(PartyZone::Sub), 3);
        assert_eq!(roster.zone(PartyZone::Main).len(), 2);
        assert_eq!(roster.zone(PartyZone::Sub).len(), 1);
    }

    #[test]
    fn add_monster_overflows_to_storage() {
        let mut roster = PartyRoster::new();

        roster.add_monster(monster("o1", MonsterSize::Omega));
        roster.add_monster(monster("o2", MonsterSize::Omega));
        let zone = roster.add_monster(monster("s1", MonsterSize::S));

        assert_eq!(zone, PartyZone::Storage);
        assert_eq!(roster.zone(PartyZone::Storage).len(), 1);
        // 仓库不受费用上限约束
        for _ in 0..10 {
            assert_eq!(
                roster.add_monster(monster("x", MonsterSize::Omega)),
                PartyZone::Storage
            );
        }
    }

    #[test]
    fn cost_ceiling_holds_after_any_sequence() {
        let mut roster = PartyRoster::new();
        for size in [
            MonsterSize::S,
            MonsterSize::L,
            MonsterSize::M,
            MonsterSize::Omega,
            MonsterSize::S,
            MonsterSize::S,
        ] {
            roster.add_monster(monster("m", size));
            assert!(roster.total_cost(PartyZone::Main) <= MAX_PARTY_COST);
            assert!(roster.total_cost(PartyZone::Sub) <= MAX_PARTY_COST);
        }
    }

    #[test]
    fn try_move_relocates_when_target_has_room() {
        let mut roster = PartyRoster::new();
        let m = monster("m1", MonsterSize::M);
        let id = m.id;
        roster.add_monster(m);

        assert!(roster.try_move(id, PartyZone::Sub));
        assert_eq!(roster.zone(PartyZone::Main).len(), 0);
        assert_eq!(roster.zone(PartyZone::Sub).len(), 1);
        assert_eq!(roster.total_cost(PartyZone::Sub), 2);
    }

    #[test]
    fn try_move_fails_whole_when_cost_would_exceed() {
        let mut roster = PartyRoster::new();
        let big = monster("big", MonsterSize::L);
        let big_id = big.id;
        roster.add_monster(big); // 主战 3 费
        roster.add_monster(monster("s1", MonsterSize::S)); // 主战 4 费
        roster.add_monster(monster("m1", MonsterSize::M)); // 预备 2 费
        let counter = change_counter(&mut roster);

        // 预备 2 + 3 > 4，整个操作不生效
        assert!(!roster.try_move(big_id, PartyZone::Sub));
        assert_eq!(roster.zone(PartyZone::Main).len(), 2);
        assert_eq!(roster.zone(PartyZone::Sub).len(), 1);
        assert_eq!(roster.total_cost(PartyZone::Main), 4);
        // 失败不发通知
        assert_eq!(*counter.lock().unwrap(), 0);
    }

    #[test]
    fn try_move_same_zone_reorders_to_back() {
        let mut roster = PartyRoster::new();
        let first = monster("first", MonsterSize::S);
        let first_id = first.id;
        roster.add_monster(first);
        roster.add_monster(monster("second", MonsterSize::S));

        assert!(roster.try_move(first_id, PartyZone::Main));
        let main = roster.zone(PartyZone::Main);
        assert_eq!(main.len(), 2);
        assert_eq!(main[1].id, first_id);
    }

    #[test]
    fn try_move_cannot_target_storage_or_reach_storage_members() {
        let mut roster = PartyRoster::new();
        let m = monster("m1", MonsterSize::M);
        let id = m.id;
        roster.add_monster(m);
        assert!(!roster.try_move(id, PartyZone::Storage));

        roster.add_monster(monster("o1", MonsterSize::Omega)); // 预备
        let stored = monster("stuck", MonsterSize::Omega);
        let stored_id = stored.id;
        roster.add_monster(stored); // 两边都满，进仓库
        assert_eq!(roster.zone(PartyZone::Storage).len(), 1);

        // 仓库里的怪物这条操作够不着
        assert!(!roster.try_move(stored_id, PartyZone::Main));
        assert_eq!(roster.zone(PartyZone::Storage).len(), 1);
    }

    #[test]
    fn monster_moves_are_never_copies() {
        let mut roster = PartyRoster::new();
        let m = monster("only", MonsterSize::S);
        let id = m.id;
        roster.add_monster(m);

        roster.try_move(id, PartyZone::Sub);
        roster.try_move(id, PartyZone::Main);

        let total: usize = [PartyZone::Main, PartyZone::Sub, PartyZone::Storage]
            .into_iter()
            .map(|zone| roster.zone(zone).len())
            .sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn roster_changed_fires_once_per_successful_mutation() {
        let mut roster = PartyRoster::new();
        let counter = change_counter(&mut roster);

        let m = monster("m1", MonsterSize::M);
        let id = m.id;
        roster.add_monster(m);
        assert_eq!(*counter.lock().unwrap(), 1);

        roster.try_move(id, PartyZone::Sub);
        assert_eq!(*counter.lock().unwrap(), 2);

        roster.try_move(id, PartyZone::Storage); // 失败
        assert_eq!(*counter.lock().unwrap(), 2);
    }

    #[test]
    fn unsubscribe_stops_roster_notifications() {
        let mut roster = PartyRoster::new();
        let counter = Arc::new(Mutex::new(0u32));
        let sink = counter.clone();
        let id = roster.subscribe(move |_| *sink.lock().unwrap() += 1);

        roster.add_monster(monster("m1", MonsterSize::S));
        assert!(roster.unsubscribe(id));
        roster.add_monster(monster("m2", MonsterSize::S));

        assert_eq!(*counter.lock().unwrap(), 1);
    }

    #[test]
    fn from_species_seeds_stats_from_template() {
        let kind = species("slime", MonsterSize::S);
        let m = Monster::from_species(kind.clone(), Some("小碧".into()));

        assert_eq!(m.nickname, "小碧");
        assert_eq!(m.lv, 1);
        assert_eq!(m.hp, 100);
        assert_eq!(m.max_mp, 50);
        assert_eq!(m.species, kind);
        assert_eq!(m.cost(), 1);
    }

    #[test]
    fn find_matches_nickname_and_uuid() {
        let mut roster = PartyRoster::new();
        let m = monster("m1", MonsterSize::M);
        let id = m.id;
        roster.add_monster(Monster {
            nickname: "阿宝".into(),
            ..m
        });

        assert_eq!(roster.find("阿宝"), Some(id));
        assert_eq!(roster.find(&id.to_string()), Some(id));
        assert_eq!(roster.find("不存在"), None);
    }
}
