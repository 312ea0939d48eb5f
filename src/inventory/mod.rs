pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;

use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct InventoryPlugin;
impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Backpack::new(TOTAL_SLOTS))
            .init_resource::<InventoryNoticeBuffer>()
            .add_event::<GiveItemEvent>()
            .add_event::<UseItemEvent>()
            .add_event::<DropItemEvent>()
            .add_event::<MoveItemEvent>()
            .add_event::<ListInventoryEvent>()
            .add_systems(Startup, wire_notices)
            .add_systems(
                Update,
                (
                    give_item,
                    use_item,
                    drop_item,
                    move_item,
                    print_inventory,
                    drain_notices,
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
