//! Dialogue handlers: lines, choices, shops and endings.

use adventure_world::{NpcId, Port, ScriptNode, MAX_CHOICE_OPTIONS};
use tracing::{debug, warn};

use super::{HandlerContext, NodeOutcome, Suspension};
use crate::events::Notification;

/// Options of a choice node: `option1`, `option2`, ... up to the first gap.
fn choice_options(node: &ScriptNode) -> Vec<String> {
    (1..=MAX_CHOICE_OPTIONS)
        .map_while(|index| node.properties.optional_text(&format!("option{}", index)))
        .map(str::to_string)
        .collect()
}

/// Display name for the conversation partner.
fn speaker_name(ctx: &HandlerContext<'_>, node: &ScriptNode) -> String {
    if let Some(speaker) = node.properties.optional_text("speaker") {
        return speaker.to_string();
    }
    match ctx.npc {
        Some(id) => match ctx.catalog.npc(id) {
            Some(npc) => npc.name.clone(),
            None => {
                debug!(node = %node.id, npc = %id, "NPC not in catalog, using id as speaker");
                id.to_string()
            }
        },
        None => String::new(),
    }
}

pub(super) fn npc_say(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let notification = Notification::Dialogue {
        text: node.properties.text("text").to_string(),
        speaker: speaker_name(ctx, node),
        emotion: node.properties.optional_text("emotion").map(str::to_string),
        is_npc: true,
    };
    ctx.sink.notify(notification);
    NodeOutcome::Continue(Port::Exec)
}

pub(super) fn player_choice(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let options = choice_options(node);
    if options.is_empty() {
        warn!(node = %node.id, "Choice node has no options, ending traversal");
        return NodeOutcome::Terminate;
    }
    ctx.sink.notify(Notification::PlayerOptions {
        options: options.clone(),
    });
    NodeOutcome::Suspend(Suspension::Choice { options })
}

pub(super) fn shop(ctx: &mut HandlerContext<'_>, node: &ScriptNode) -> NodeOutcome {
    let npc_id = ctx.npc.cloned().unwrap_or_else(|| {
        debug!(node = %node.id, "Shop opened outside a conversation");
        NpcId::default()
    });
    ctx.sink.notify(Notification::TradeOpened {
        npc_id: npc_id.clone(),
    });
    NodeOutcome::Suspend(Suspension::Trade { npc_id })
}

pub(super) fn end(_ctx: &mut HandlerContext<'_>, _node: &ScriptNode) -> NodeOutcome {
    NodeOutcome::Terminate
}
