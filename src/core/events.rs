use bevy::prelude::*;

/// 面向玩家的文字输出，由 main 统一打印
#[derive(Event)]
pub struct LogEvent(pub String);
