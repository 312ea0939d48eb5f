use bevy::prelude::*;

pub mod events;
pub mod notify;
pub mod resources;
pub mod states;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::AppState;

        // 插件首次载入时，插入初始 State
        app.init_state::<AppState>()
            .add_event::<events::LogEvent>()
            .insert_resource(resources::GameConfig::load());
    }
}
