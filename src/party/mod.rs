pub mod components;
pub mod events;
mod systems;

use bevy::prelude::*;

use crate::core::states::AppState;
use components::*;
use events::*;
use systems::*;

pub struct PartyPlugin;
impl Plugin for PartyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PartyRoster::new())
            .init_resource::<PartyNoticeBuffer>()
            .add_event::<CatchMonsterEvent>()
            .add_event::<MoveMonsterEvent>()
            .add_event::<ListPartyEvent>()
            .add_systems(Startup, wire_notices)
            .add_systems(
                Update,
                (catch_monster, move_monster, print_party, drain_notices)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
