//! Action handlers. Each applies one mutation and advances through `Exec`.
//!
//! References to entities the world does not know are logged at debug level
//! and skipped; the script keeps running.

use adventure_world::{
    DoorId, DoorState, ObjectId, ObjectState, Port, QuestId, QuestStatus, RoomId, ScriptNode,
    StatKind,
};
use tracing::debug;

use super::{HandlerContext, NodeOutcome};
use crate::events::Notification;

const NEXT: NodeOutcome = NodeOutcome::Continue(Port::Exec);

/// Mutable door state, seeded from the catalog on first touch.
fn door_state<'c>(ctx: &'c mut HandlerContext<'_>, node: &ScriptNode) -> Option<&'c mut DoorState> {
    let id = DoorId::from(node.properties.id("door_id"));
    let initial = ctx.catalog.door(&id).map(|door| DoorState {
        open: door.initially_open,
        locked: door.initially_locked,
    });
    match initial {
        Some(initial) => Some(ctx.state.doors.entry(id).or_insert(initial)),
        None => {
            let state = ctx.state.doors.get_mut(&id);
            if state.is_none() {
                debug!(node = %node.id, door = %id, "Door not found, skipping");
            }
            state
        }
    }
}

/// Mutable object state, seeded from the catalog on first touch.
fn object_state<'c>(
    ctx: &'c mut HandlerContext<'_>,
    node: &ScriptNode,
) -> Option<&'c mut ObjectState> {
    let id = ObjectId::from(node.properties.id("object_id"));
    let Some(object) = ctx.catalog.object(&id) else {
        debug!(node = %node.id, object = %id, "Object not found, skipping");
        return None;
    };
    let initial = ObjectState {
        visible: object.visible,
        room: object.room.clone(),
    };
    Some(ctx.state.objects.entry(id).or_insert(initial))
}

fn quest_id(ctx: &HandlerContext<'_>, node: &ScriptNode) -> Option<QuestId> {
    let id = QuestId::from(node.properties.id("quest_id"));
    if ctx.catalog.quest(&id).is_none() {
        debug!(node = %node.id, quest = %id, "Quest not found, skipping");
        return None;
    }
    Some(id)
}

fn clamp_to_u32(amount: i64) -> u32 {
    amount.clamp(0, i64::from(u32::MAX)) as u32
}

fn clamp_to_i32(amount: i64) -> i32 {
    amount.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub(super) fn open_door(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    if let Some(door) = door_state(ctx, node) {
        door.open = true;
        door.locked = false;
    }
    NEXT
}

pub(super) fn close_door(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    if let Some(door) = door_state(ctx, node) {
        door.open = false;
    }
    NEXT
}

pub(super) fn unlock_door(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    if let Some(door) = door_state(ctx, node) {
        door.locked = false;
    }
    NEXT
}

pub(super) fn lock_door(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    if let Some(door) = door_state(ctx, node) {
        door.locked = true;
        door.open = false;
    }
    NEXT
}

pub(super) fn set_flag(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    let flag = props.text("flag");
    if flag.is_empty() {
        debug!(node = %node.id, "SetFlag without a flag name, skipping");
        return NEXT;
    }
    ctx.state.set_flag(flag, props.bool("value"));
    NEXT
}

pub(super) fn increment_counter(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    let counter = props.text("counter");
    if counter.is_empty() {
        debug!(node = %node.id, "IncrementCounter without a counter name, skipping");
        return NEXT;
    }
    ctx.state.increment_counter(counter, props.int_or("amount", 1));
    NEXT
}

pub(super) fn set_counter(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    let counter = props.text("counter");
    if counter.is_empty() {
        debug!(node = %node.id, "SetCounter without a counter name, skipping");
        return NEXT;
    }
    ctx.state.set_counter(counter, props.int("value"));
    NEXT
}

pub(super) fn give_item(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    if let Some(object) = object_state(ctx, node) {
        object.room = None;
        ctx.state
            .inventory
            .add(ObjectId::from(node.properties.id("object_id")));
    }
    NEXT
}

pub(super) fn remove_item(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    let id = ObjectId::from(props.id("object_id"));
    if !ctx.state.inventory.remove(&id) {
        debug!(node = %node.id, object = %id, "Item not held, skipping");
        return NEXT;
    }
    let placement = props.optional_text("room_id").map(RoomId::from);
    if let Some(object) = object_state(ctx, node) {
        object.room = placement;
    }
    NEXT
}

pub(super) fn teleport(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let room = RoomId::from(node.properties.id("room_id"));
    if ctx.catalog.room(&room).is_none() {
        debug!(node = %node.id, room = %room, "Room not found, skipping");
        return NEXT;
    }
    ctx.state.current_room = room.clone();
    ctx.sink.notify(Notification::PlayerTeleported { room_id: room });
    NEXT
}

pub(super) fn add_money(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    ctx.state
        .add_money(clamp_to_u32(node.properties.int("amount")));
    NEXT
}

pub(super) fn remove_money(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    ctx.state
        .remove_money(clamp_to_u32(node.properties.int("amount")));
    NEXT
}

pub(super) fn set_visibility(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let visible = node.properties.bool("visible");
    if let Some(object) = object_state(ctx, node) {
        object.visible = visible;
    }
    NEXT
}

pub(super) fn play_sound(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    match node.properties.optional_text("sound_id") {
        Some(sound_id) => ctx.sink.notify(Notification::SoundRequested {
            sound_id: sound_id.to_string(),
        }),
        None => debug!(node = %node.id, "PlaySound without a sound id, skipping"),
    }
    NEXT
}

pub(super) fn show_message(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    match node.properties.optional_text("text") {
        Some(text) => ctx.sink.notify(Notification::Message {
            text: text.to_string(),
        }),
        None => debug!(node = %node.id, "ShowMessage without text, skipping"),
    }
    NEXT
}

pub(super) fn modify_stat(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    match StatKind::from_name(props.text("stat")) {
        Some(stat) => ctx
            .state
            .stats
            .modify(stat, clamp_to_i32(props.int("amount"))),
        None => debug!(node = %node.id, stat = props.text("stat"), "Unknown stat, skipping"),
    }
    NEXT
}

pub(super) fn start_quest(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let Some(id) = quest_id(ctx, node) else {
        return NEXT;
    };
    // A completed quest never goes back to active.
    if ctx.state.quest_status(&id).is_some() {
        return NEXT;
    }
    ctx.state.quests.insert(id.clone(), QuestStatus::Active);
    ctx.sink.notify(Notification::QuestUpdated {
        quest_id: id,
        status: QuestStatus::Active,
    });
    NEXT
}

pub(super) fn complete_quest(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let Some(id) = quest_id(ctx, node) else {
        return NEXT;
    };
    if ctx.state.quest_status(&id) == Some(QuestStatus::Completed) {
        return NEXT;
    }
    ctx.state.quests.insert(id.clone(), QuestStatus::Completed);
    ctx.sink.notify(Notification::QuestUpdated {
        quest_id: id,
        status: QuestStatus::Completed,
    });
    NEXT
}
