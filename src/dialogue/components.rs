//! Dialogue data and the dialogue box state machine.

use bevy::prelude::*;
use serde::Deserialize;

/// One line of dialogue and who says it.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DialogueEntry {
    pub speaker: String,
    pub line: String,
}

impl DialogueEntry {
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
        }
    }
}

/// Seconds between two characters appearing.
pub const DEFAULT_TYPING_SPEED: f32 = 0.03;

/// The on-screen dialogue box. Only one conversation runs at a time.
#[derive(Resource, Debug)]
pub struct DialogueBox {
    entries: Vec<DialogueEntry>,
    index: usize,
    active: bool,
    /// Characters of the current line revealed so far
    revealed: usize,
    since_last_char: f32,
    pub typing_speed: f32,
}

impl Default for DialogueBox {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            active: false,
            revealed: 0,
            since_last_char: 0.0,
            typing_speed: DEFAULT_TYPING_SPEED,
        }
    }
}

impl DialogueBox {
    /// Begin a conversation at its first line. Empty conversations are ignored.
    pub fn start(&mut self, entries: Vec<DialogueEntry>) {
        if entries.is_empty() {
            return;
        }
        self.entries = entries;
        self.index = 0;
        self.active = true;
        self.restart_typing();
    }

    /// Move to the next line, closing the box after the last one.
    pub fn show_next_line(&mut self) {
        if !self.active {
            return;
        }
        self.index += 1;
        if self.index < self.entries.len() {
            self.restart_typing();
        } else {
            self.end();
        }
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<&DialogueEntry> {
        if !self.active {
            return None;
        }
        self.entries.get(self.index)
    }

    /// The part of the current line the typewriter has revealed.
    pub fn visible_text(&self) -> &str {
        let Some(entry) = self.current() else {
            return "";
        };
        match entry.line.char_indices().nth(self.revealed) {
            Some((byte, _)) => &entry.line[..byte],
            None => &entry.line,
        }
    }

    pub fn line_finished(&self) -> bool {
        self.current()
            .map_or(true, |entry| self.revealed >= entry.line.chars().count())
    }

    /// Reveal characters for `dt` seconds of typing.
    pub fn tick(&mut self, dt: f32) {
        if self.line_finished() {
            return;
        }
        self.since_last_char += dt;
        if self.typing_speed <= 0.0 {
            self.revealed = usize::MAX;
            return;
        }
        while self.since_last_char >= self.typing_speed && !self.line_finished() {
            self.since_last_char -= self.typing_speed;
            self.revealed += 1;
        }
    }

    fn restart_typing(&mut self) {
        self.revealed = 0;
        self.since_last_char = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Vec<DialogueEntry> {
        vec![
            DialogueEntry::new("Alchemist", "Hello"),
            DialogueEntry::new("Player", "Hi"),
        ]
    }

    #[test]
    fn empty_conversation_does_not_open_the_box() {
        let mut dialogue = DialogueBox::default();
        dialogue.start(Vec::new());
        assert!(!dialogue.is_active());
        assert_eq!(dialogue.visible_text(), "");
    }

    #[test]
    fn lines_advance_and_close_after_the_last() {
        let mut dialogue = DialogueBox::default();
        dialogue.start(conversation());
        assert_eq!(dialogue.current().map(|e| e.speaker.as_str()), Some("Alchemist"));

        dialogue.show_next_line();
        assert_eq!(dialogue.current().map(|e| e.speaker.as_str()), Some("Player"));

        dialogue.show_next_line();
        assert!(!dialogue.is_active());
        assert!(dialogue.current().is_none());

        // Advancing a closed box does nothing
        dialogue.show_next_line();
        assert!(!dialogue.is_active());
    }

    #[test]
    fn typewriter_reveals_one_character_per_interval() {
        let mut dialogue = DialogueBox::default();
        dialogue.typing_speed = 0.5;
        dialogue.start(conversation());
        assert_eq!(dialogue.visible_text(), "");

        dialogue.tick(0.5);
        assert_eq!(dialogue.visible_text(), "H");
        dialogue.tick(1.0);
        assert_eq!(dialogue.visible_text(), "Hel");
        dialogue.tick(10.0);
        assert_eq!(dialogue.visible_text(), "Hello");
        assert!(dialogue.line_finished());

        dialogue.show_next_line();
        assert_eq!(dialogue.visible_text(), "");
    }

    #[test]
    fn typewriter_respects_multibyte_characters() {
        let mut dialogue = DialogueBox::default();
        dialogue.typing_speed = 1.0;
        dialogue.start(vec![DialogueEntry::new("Händler", "Grüße")]);
        dialogue.tick(3.0);
        assert_eq!(dialogue.visible_text(), "Grü");
    }

    #[test]
    fn restarting_replaces_the_conversation() {
        let mut dialogue = DialogueBox::default();
        dialogue.start(conversation());
        dialogue.show_next_line();

        dialogue.end();
        dialogue.start(vec![DialogueEntry::new("Guard", "Halt")]);
        assert_eq!(dialogue.current().map(|e| e.line.as_str()), Some("Halt"));
    }
}
