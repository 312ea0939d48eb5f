//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::num::NonZero;
use std::sync::{Arc, Mutex};

use crate::core::{events::LogEvent, states::AppState};
use crate::data::catalog::{ItemCatalog, SpeciesCatalog};
use crate::inventory::components::Backpack;
use crate::inventory::events::{
    DropItemEvent, GiveItemEvent, ListInventoryEvent, MoveItemEvent, UseItemEvent,
};
use crate::party::components::{PartyRoster, PartyZone, MAX_PARTY_COST};
use crate::party::events::{CatchMonsterEvent, ListPartyEvent, MoveMonsterEvent};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line_result in stdin.lock().lines() {
                    if let Ok(line) = line_result {
                        let line = line.trim();
                        if !line.is_empty() {
                            let mut buf = buffer.lock().unwrap();
                            buf.push_back(line.to_string());
                        }
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>),   // None=全部；Some(token)=按 id/uuid/名称 查询
    Species(Option<String>), // 同上，查种族表
    Give { id: String, count: u32 },
    Inventory,
    Use { index: usize },
    Drop { index: usize },
    Move { from: usize, to: usize },
    Catch { species_id: String, nickname: Option<String> },
    Party,
    Send { token: String, target: PartyZone },
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let mut buffer = CLI_BUFFER.lock().unwrap();
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    item_catalog: Res<ItemCatalog>,
    species_catalog: Res<SpeciesCatalog>,
    backpack: Res<Backpack>,
    roster: Res<PartyRoster>,
    mut ev_give: EventWriter<GiveItemEvent>,
    mut ev_use: EventWriter<UseItemEvent>,
    mut ev_drop: EventWriter<DropItemEvent>,
    mut ev_move_item: EventWriter<MoveItemEvent>,
    mut ev_list_inv: EventWriter<ListInventoryEvent>,
    mut ev_catch: EventWriter<CatchMonsterEvent>,
    mut ev_send: EventWriter<MoveMonsterEvent>,
    mut ev_list_party: EventWriter<ListPartyEvent>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(
                    "命令列表:
  help                     查看帮助
  status                   查看当前状态
  exit / quit              退出程序
  items [token]            列出/查询物品定义
  species [token]          列出/查询种族定义
  give <id> [count]        给予物品
  inventory                查看背包
  use <index>              使用某格的物品
  drop <index>             丢弃某格的全部物品
  move <from> <to>         交换/合并两格
  catch <species> [昵称]   收编一只怪物
  party                    查看编队
  send <怪物> <main|sub>   把怪物挪去主战/预备
  ".into()));
            }

            Command::Status => {
                let slots_used = backpack
                    .slots()
                    .iter()
                    .filter(|slot| !slot.is_empty())
                    .count();
                log.write(LogEvent(format!(
                    "State: {:?}, Items: {}, Species: {}, 背包 {}/{}, 主战 {}/{}, 预备 {}/{}",
                    state.get(),
                    item_catalog.len(),
                    species_catalog.len(),
                    slots_used,
                    backpack.capacity(),
                    roster.total_cost(PartyZone::Main),
                    MAX_PARTY_COST,
                    roster.total_cost(PartyZone::Sub),
                    MAX_PARTY_COST,
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Error(NonZero::<u8>::MIN));
            }

            Command::Items(token) => match token {
                None => {
                    for kind in item_catalog.iter() {
                        log.write(LogEvent(format!(
                            "{} | {} | {}",
                            kind.uuid(),
                            kind.id,
                            kind.name
                        )));
                    }
                }
                Some(t) => {
                    if let Some(kind) = item_catalog.find(&t) {
                        log.write(LogEvent(format!(
                            "==================================================
UUID     : {}
ID       : {}
Name     : {}
Category : {:?}
MaxStack : {}
Recover  : {}
==================================================",
                            kind.uuid(),
                            kind.id,
                            kind.name,
                            kind.category,
                            kind.max_stack,
                            kind.recover
                        )));
                    } else {
                        log.write(LogEvent("未找到匹配物品".into()));
                    }
                }
            },

            Command::Species(token) => match token {
                None => {
                    for kind in species_catalog.iter() {
                        log.write(LogEvent(format!(
                            "{} | {} | {}（{:?}）",
                            kind.uuid(),
                            kind.id,
                            kind.name,
                            kind.size
                        )));
                    }
                }
                Some(t) => {
                    if let Some(kind) = species_catalog.find(&t) {
                        log.write(LogEvent(format!(
                            "==================================================
UUID : {}
ID   : {}
Name : {}
Size : {:?} (cost {})
HP   : {}
MP   : {}
Atk  : {}
Def  : {}
==================================================",
                            kind.uuid(),
                            kind.id,
                            kind.name,
                            kind.size,
                            kind.size.cost(),
                            kind.base_max_hp,
                            kind.base_max_mp,
                            kind.base_attack,
                            kind.base_defense
                        )));
                    } else {
                        log.write(LogEvent("未找到匹配种族".into()));
                    }
                }
            },

            Command::Give { id, count } => {
                ev_give.write(GiveItemEvent { id, count });
            }

            Command::Inventory => {
                ev_list_inv.write(ListInventoryEvent);
            }

            Command::Use { index } => {
                ev_use.write(UseItemEvent { index });
            }

            Command::Drop { index } => {
                ev_drop.write(DropItemEvent { index });
            }

            Command::Move { from, to } => {
                ev_move_item.write(MoveItemEvent { from, to });
            }

            Command::Catch { species_id, nickname } => {
                ev_catch.write(CatchMonsterEvent { species_id, nickname });
            }

            Command::Party => {
                ev_list_party.write(ListPartyEvent);
            }

            Command::Send { token, target } => {
                ev_send.write(MoveMonsterEvent { token, target });
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "species" | "sp" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Species(token)
        }
        "give" => {
            let id = parts.next().unwrap_or("").to_string();
            let count = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { id, count }
        }
        "inventory" | "inv" => Command::Inventory,
        "use" => {
            let index = parts.next().unwrap_or("0").parse().unwrap_or(0);
            Command::Use { index }
        }
        "drop" => {
            let index = parts.next().unwrap_or("0").parse().unwrap_or(0);
            Command::Drop { index }
        }
        "move" | "mv" => {
            let from = parts.next().unwrap_or("0").parse().unwrap_or(0);
            let to = parts.next().unwrap_or("0").parse().unwrap_or(0);
            Command::Move { from, to }
        }
        "catch" => {
            let species_id = parts.next().unwrap_or("").to_string();
            let nickname = parts.next().map(|s| s.to_string());
            Command::Catch { species_id, nickname }
        }
        "party" | "p" => Command::Party,
        "send" => {
            let token = parts.next().unwrap_or("").to_string();
            match parts.next().unwrap_or("") {
                "main" => Command::Send { token, target: PartyZone::Main },
                "sub" => Command::Send { token, target: PartyZone::Sub },
                other => Command::Unsupported(format!("send 目标只能是 main/sub，不是 {other}")),
            }
        }
        other => Command::Unsupported(other.into()),
    }
}
