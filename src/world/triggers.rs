//! Routing of sensor collisions into player trigger events.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{TriggerEntered, TriggerExited, TriggerZone};
use crate::player::Player;

/// Order a collision pair as (trigger, player), if it is one.
pub fn trigger_pair(
    a: Entity,
    b: Entity,
    is_player: impl Fn(Entity) -> bool,
    is_trigger: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_trigger(a) && is_player(b) {
        Some((a, b))
    } else if is_trigger(b) && is_player(a) {
        Some((b, a))
    } else {
        None
    }
}

/// Turn rapier collision events between the player and trigger zones into
/// trigger events.
pub fn route_trigger_events(
    mut collision_events: EventReader<CollisionEvent>,
    player_query: Query<(), With<Player>>,
    trigger_query: Query<(), With<TriggerZone>>,
    mut entered: EventWriter<TriggerEntered>,
    mut exited: EventWriter<TriggerExited>,
) {
    let is_player = |entity| player_query.contains(entity);
    let is_trigger = |entity| trigger_query.contains(entity);

    for event in collision_events.read() {
        match *event {
            CollisionEvent::Started(a, b, _) => {
                if let Some((trigger, player)) = trigger_pair(a, b, is_player, is_trigger) {
                    entered.send(TriggerEntered { trigger, player });
                }
            }
            CollisionEvent::Stopped(a, b, _) => {
                if let Some((trigger, player)) = trigger_pair(a, b, is_player, is_trigger) {
                    exited.send(TriggerExited { trigger, player });
                }
            }
        }
    }
}
