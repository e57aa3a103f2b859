//! Notifications emitted by scripts for the presentation layer.
//!
//! Handlers push notifications into a [`NotificationSink`] as they execute, so
//! each traversal step delivers its notification at most once and in order.

use adventure_world::{NpcId, QuestId, QuestStatus, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Something the presentation layer should show or play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A line of dialogue.
    Dialogue {
        text: String,
        speaker: String,
        emotion: Option<String>,
        is_npc: bool,
    },

    /// The player must pick one of these options, in order.
    PlayerOptions { options: Vec<String> },

    /// A conversation finished.
    ConversationEnded { npc_id: NpcId },

    /// A shop screen opened for a merchant.
    TradeOpened { npc_id: NpcId },

    /// Generic narration from an event script.
    Message { text: String },

    PlayerTeleported { room_id: RoomId },

    SoundRequested { sound_id: String },

    QuestUpdated { quest_id: QuestId, status: QuestStatus },
}

/// Discriminant of a [`Notification`], for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Dialogue,
    PlayerOptions,
    ConversationEnded,
    TradeOpened,
    Message,
    PlayerTeleported,
    SoundRequested,
    QuestUpdated,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::Dialogue { .. } => NotificationKind::Dialogue,
            Notification::PlayerOptions { .. } => NotificationKind::PlayerOptions,
            Notification::ConversationEnded { .. } => NotificationKind::ConversationEnded,
            Notification::TradeOpened { .. } => NotificationKind::TradeOpened,
            Notification::Message { .. } => NotificationKind::Message,
            Notification::PlayerTeleported { .. } => NotificationKind::PlayerTeleported,
            Notification::SoundRequested { .. } => NotificationKind::SoundRequested,
            Notification::QuestUpdated { .. } => NotificationKind::QuestUpdated,
        }
    }
}

/// Receiver of notifications during a traversal.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// FIFO queue of notifications, drained by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn pop(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<&Notification> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }
}
