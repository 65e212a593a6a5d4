//! Deferred event dispatch.
//!
//! Gameplay code schedules typed events with an optional delay. Every frame
//! the due events are emitted through Bevy's regular event channel, ordered
//! by due time and then by the order they were scheduled in.
//!
//! The queue runs on virtual time, so nothing fires while the game is
//! paused.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::sets::GameplaySet;
use super::states::GameState;

/// An event waiting for its due time.
struct Pending<E> {
    due: f32,
    sequence: u64,
    event: E,
}

impl<E> PartialEq for Pending<E> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<E> Eq for Pending<E> {}

impl<E> PartialOrd for Pending<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Pending<E> {
    // Reversed so the max-heap pops the earliest event first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .total_cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Time-ordered queue of events of one type.
#[derive(Resource)]
pub struct DeferredQueue<E: Send + Sync + 'static> {
    pending: BinaryHeap<Pending<E>>,
    next_sequence: u64,
}

impl<E: Send + Sync + 'static> Default for DeferredQueue<E> {
    fn default() -> Self {
        Self {
            pending: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<E: Send + Sync + 'static> DeferredQueue<E> {
    /// Queue `event` to fire `delay` seconds after `now`.
    pub fn push(&mut self, event: E, now: f32, delay: f32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push(Pending {
            due: now + delay.max(0.0),
            sequence,
            event,
        });
    }

    /// Remove and return every event due at or before `now`.
    pub fn drain_due(&mut self, now: f32) -> Vec<E> {
        let mut due = Vec::new();
        while self.pending.peek().is_some_and(|p| p.due <= now) {
            if let Some(pending) = self.pending.pop() {
                due.push(pending.event);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// System parameter for scheduling events from gameplay systems.
#[derive(SystemParam)]
pub struct Deferred<'w, E: Event> {
    queue: ResMut<'w, DeferredQueue<E>>,
    time: Res<'w, Time>,
}

impl<E: Event> Deferred<'_, E> {
    /// Fire on the next dispatch.
    pub fn schedule(&mut self, event: E) {
        self.schedule_in(event, 0.0);
    }

    /// Fire after `delay` seconds of game time.
    pub fn schedule_in(&mut self, event: E, delay: f32) {
        let now = self.time.elapsed_secs();
        self.queue.push(event, now, delay);
    }
}

/// Emit all due events of type `E`.
pub fn dispatch_deferred<E: Event>(
    time: Res<Time>,
    mut queue: ResMut<DeferredQueue<E>>,
    mut writer: EventWriter<E>,
) {
    for event in queue.drain_due(time.elapsed_secs()) {
        writer.send(event);
    }
}

/// Drop pending events when the level is torn down.
fn clear_deferred<E: Event>(mut queue: ResMut<DeferredQueue<E>>) {
    if !queue.is_empty() {
        debug!("Dropping {} pending {}", queue.len(), std::any::type_name::<E>());
    }
    queue.clear();
}

/// App extension for registering deferred events.
pub trait DeferredEventAppExt {
    /// Register `E` as a Bevy event with its own deferred queue.
    fn add_deferred_event<E: Event>(&mut self) -> &mut Self;
}

impl DeferredEventAppExt for App {
    fn add_deferred_event<E: Event>(&mut self) -> &mut Self {
        self.add_event::<E>()
            .init_resource::<DeferredQueue<E>>()
            .add_systems(Update, dispatch_deferred::<E>.in_set(GameplaySet::Dispatch))
            .add_systems(OnExit(GameState::InGame), clear_deferred::<E>)
    }
}
