//! NPCs the player can talk to.

use bevy::prelude::*;

use super::components::{DialogueBox, DialogueEntry};
use crate::world::{trigger_zone_bundle, BoxDef, TriggerEntered, TriggerExited};

#[derive(Component, Debug)]
pub struct Npc {
    pub name: String,
    pub entries: Vec<DialogueEntry>,
    pub player_in_range: bool,
}

/// Spawn an NPC whose trigger zone covers `area`.
pub fn spawn_npc(
    commands: &mut Commands,
    name: &str,
    area: BoxDef,
    entries: Vec<DialogueEntry>,
) -> Entity {
    commands
        .spawn((
            trigger_zone_bundle(area),
            Sprite {
                color: Color::srgb(0.55, 0.4, 0.85),
                custom_size: Some(area.half_size() * 2.0),
                ..default()
            },
            Npc {
                name: name.to_string(),
                entries,
                player_in_range: false,
            },
        ))
        .id()
}

/// Track whether the player stands next to an NPC. Walking away ends the conversation.
pub fn update_npc_range(
    mut entered: EventReader<TriggerEntered>,
    mut exited: EventReader<TriggerExited>,
    mut npc_query: Query<&mut Npc>,
    mut dialogue: ResMut<DialogueBox>,
) {
    for event in entered.read() {
        if let Ok(mut npc) = npc_query.get_mut(event.trigger) {
            npc.player_in_range = true;
            debug!("In range of {}", npc.name);
        }
    }

    for event in exited.read() {
        if let Ok(mut npc) = npc_query.get_mut(event.trigger) {
            npc.player_in_range = false;
            dialogue.end();
        }
    }
}

/// E talks to a nearby NPC. E or Enter advances an open conversation.
pub fn handle_dialogue_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    npc_query: Query<&Npc>,
    mut dialogue: ResMut<DialogueBox>,
) {
    let interact = keyboard.just_pressed(KeyCode::KeyE);
    let confirm = keyboard.just_pressed(KeyCode::Enter);

    if dialogue.is_active() {
        if interact || confirm {
            dialogue.show_next_line();
        }
        return;
    }

    if !interact {
        return;
    }
    if let Some(npc) = npc_query.iter().find(|npc| npc.player_in_range) {
        info!("Talking to {}", npc.name);
        dialogue.start(npc.entries.clone());
    }
}

/// Advance the typewriter.
pub fn type_dialogue(time: Res<Time>, mut dialogue: ResMut<DialogueBox>) {
    if dialogue.is_active() {
        dialogue.tick(time.delta_secs());
    }
}

/// Close any conversation left open when the level unloads.
pub fn close_dialogue(mut dialogue: ResMut<DialogueBox>) {
    dialogue.end();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_npc(in_range: bool) -> App {
        let mut app = App::new();
        app.init_resource::<DialogueBox>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, handle_dialogue_input);
        app.world_mut().spawn(Npc {
            name: "Alchemist".into(),
            entries: vec![
                DialogueEntry::new("Alchemist", "Careful with those"),
                DialogueEntry::new("Alchemist", "They bite back"),
            ],
            player_in_range: in_range,
        });
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
        input.press(key);
        app.update();
    }

    #[test]
    fn interact_in_range_starts_and_advances() {
        let mut app = app_with_npc(true);

        press(&mut app, KeyCode::KeyE);
        let dialogue = app.world().resource::<DialogueBox>();
        assert!(dialogue.is_active());
        assert_eq!(
            dialogue.current().map(|e| e.line.as_str()),
            Some("Careful with those")
        );

        press(&mut app, KeyCode::Enter);
        let dialogue = app.world().resource::<DialogueBox>();
        assert_eq!(
            dialogue.current().map(|e| e.line.as_str()),
            Some("They bite back")
        );

        press(&mut app, KeyCode::KeyE);
        assert!(!app.world().resource::<DialogueBox>().is_active());
    }

    #[test]
    fn interact_out_of_range_does_nothing() {
        let mut app = app_with_npc(false);
        press(&mut app, KeyCode::KeyE);
        assert!(!app.world().resource::<DialogueBox>().is_active());
    }

    #[test]
    fn enter_alone_never_starts_a_conversation() {
        let mut app = app_with_npc(true);
        press(&mut app, KeyCode::Enter);
        assert!(!app.world().resource::<DialogueBox>().is_active());
    }
}
