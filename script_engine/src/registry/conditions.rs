//! Condition handlers. Each evaluates one predicate and branches True/False.

use adventure_world::{
    DoorId, DoorState, ObjectId, Port, QuestId, QuestStatus, RoomId, ScriptNode, StatKind,
};
use tracing::debug;

use super::{HandlerContext, NodeOutcome};

fn branch(result: bool) -> NodeOutcome {
    NodeOutcome::Continue(Port::from_bool(result))
}

/// Current door state, falling back to the catalog's initial values.
fn door_state(ctx: &HandlerContext<'_>, node: &ScriptNode) -> Option<DoorState> {
    let id = DoorId::from(node.properties.id("door_id"));
    let state = ctx.state.door(&id).copied().or_else(|| {
        ctx.catalog.door(&id).map(|door| DoorState {
            open: door.initially_open,
            locked: door.initially_locked,
        })
    });
    if state.is_none() {
        debug!(node = %node.id, door = %id, "Door not found, condition is false");
    }
    state
}

pub(super) fn has_flag(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    branch(ctx.state.flag(node.properties.text("flag")))
}

pub(super) fn has_item(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let id = ObjectId::from(node.properties.id("object_id"));
    branch(ctx.state.has_item(&id))
}

pub(super) fn counter_at_least(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    branch(ctx.state.counter(props.text("counter")) >= props.int("value"))
}

pub(super) fn has_money(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    branch(i64::from(ctx.state.money) >= node.properties.int("amount"))
}

pub(super) fn door_open(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    branch(door_state(ctx, node).is_some_and(|door| door.open))
}

pub(super) fn door_locked(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    branch(door_state(ctx, node).is_some_and(|door| door.locked))
}

pub(super) fn in_room(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let room = RoomId::from(node.properties.id("room_id"));
    branch(!room.is_empty() && ctx.state.current_room == room)
}

pub(super) fn stat_at_least(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let props = &node.properties;
    let Some(stat) = StatKind::from_name(props.text("stat")) else {
        debug!(node = %node.id, stat = props.text("stat"), "Unknown stat, condition is false");
        return branch(false);
    };
    branch(i64::from(ctx.state.stats.get(stat)) >= props.int("value"))
}

pub(super) fn quest_completed(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let id = QuestId::from(node.properties.id("quest_id"));
    branch(ctx.state.quest_status(&id) == Some(QuestStatus::Completed))
}
