//! UseCase: グループチャットのコントローラ
//!
//! ## 責務
//!
//! - 受信イベント（message / typing / presence / call）の処理
//! - メッセージ送信（楽観的表示）と入力中シグナル
//! - ポーリング結果の反映
//! - 通話種別選択モーダルの状態
//!
//! I/O は行いません。送信すべきシグナルと画面更新を戻り値で返し、
//! 配送と描画はセッション（UI 層）が担当します。

use std::{sync::Arc, time::Duration};

use tsudoi_shared::time::{Clock, millis_to_local};

use crate::domain::{
    CallModal, CallType, ChatEvent, ChatMessage, Composer, InsertOutcome, JoinCallLink, MessageId,
    NoopTypingIndicator, OnlineMembers, Outgoing, PollBatch, Timeline, TypingDebouncer,
    TypingIndicator, TypingSignal,
};

/// Change the view has to reflect
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    MessageRendered {
        message: ChatMessage,
        outcome: InsertOutcome,
    },
    OnlineMembersChanged(usize),
    JoinCallOffered(JoinCallLink),
}

/// Result of sending the composer's content
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub outgoing: Outgoing,
    /// The optimistic render, produced whether or not the send later succeeds
    pub update: ViewUpdate,
}

/// Controller of one group conversation
pub struct ChatController {
    user_id: i64,
    timeline: Timeline,
    online_members: Option<usize>,
    call_actions: Vec<JoinCallLink>,
    composer: Composer,
    typing: TypingDebouncer,
    typing_indicator: Box<dyn TypingIndicator>,
    call_modal: CallModal,
    clock: Arc<dyn Clock>,
    temp_seq: u64,
}

impl ChatController {
    /// # Arguments
    ///
    /// * `user_id` - The viewing user's id, sent with every frame
    /// * `last_message_id` - Polling cursor at page render time
    /// * `typing_idle` - Silence after which a typing burst ends
    /// * `clock` - Source of optimistic timestamps and temporary ids
    pub fn new(
        user_id: i64,
        last_message_id: i64,
        typing_idle: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_id,
            timeline: Timeline::new(last_message_id),
            online_members: None,
            call_actions: Vec::new(),
            composer: Composer::default(),
            typing: TypingDebouncer::new(typing_idle),
            typing_indicator: Box::new(NoopTypingIndicator),
            call_modal: CallModal::default(),
            clock,
            temp_seq: 0,
        }
    }

    /// Replace the typing hook.
    pub fn with_typing_indicator(mut self, indicator: Box<dyn TypingIndicator>) -> Self {
        self.typing_indicator = indicator;
        self
    }

    // ========================================
    // Inbound
    // ========================================

    pub fn handle_event(&mut self, event: ChatEvent) -> Vec<ViewUpdate> {
        match event {
            ChatEvent::Message(message) => self.render_message(message).into_iter().collect(),
            ChatEvent::Typing(typing) => {
                self.typing_indicator.on_typing(&typing);
                Vec::new()
            }
            ChatEvent::Presence(members) => {
                self.update_online_members(&members).into_iter().collect()
            }
            ChatEvent::Call(call) => match call.join_link() {
                Some(link) => {
                    self.call_actions.push(link.clone());
                    vec![ViewUpdate::JoinCallOffered(link)]
                }
                None => {
                    tracing::debug!("Ignoring call action {:?}", call.action);
                    Vec::new()
                }
            },
            ChatEvent::Ignored => Vec::new(),
        }
    }

    /// Render a message unless it is already on screen.
    pub fn render_message(&mut self, message: ChatMessage) -> Option<ViewUpdate> {
        let outcome = self.timeline.insert(message.clone());
        match outcome {
            InsertOutcome::Duplicate => None,
            outcome => Some(ViewUpdate::MessageRendered { message, outcome }),
        }
    }

    /// Apply a polling batch: oldest first, so the top-inserting timeline ends up newest
    /// at the top, then the presence snapshot if the online count moved.
    pub fn apply_poll(&mut self, batch: PollBatch) -> Vec<ViewUpdate> {
        let mut updates: Vec<ViewUpdate> = batch
            .messages
            .into_iter()
            .rev()
            .filter_map(|message| self.render_message(message))
            .collect();
        updates.extend(self.update_online_members(&batch.online_members));
        updates
    }

    /// Store the online count; `None` when it did not change.
    pub fn update_online_members(&mut self, members: &OnlineMembers) -> Option<ViewUpdate> {
        let count = members.count();
        if self.online_members.replace(count) == Some(count) {
            return None;
        }
        Some(ViewUpdate::OnlineMembersChanged(count))
    }

    // ========================================
    // Outbound
    // ========================================

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Send the composer's content.
    ///
    /// Renders the message optimistically under a temporary id and clears the composer.
    /// Empty or whitespace-only input sends and renders nothing.
    pub fn send_message(&mut self) -> Option<SendOutcome> {
        let text = self.composer.take_message()?;
        let now = self.clock.now_millis();
        self.temp_seq += 1;

        let message = ChatMessage {
            id: MessageId::temporary(now, self.temp_seq),
            content: text.clone(),
            sender: self.user_id.to_string(),
            sender_avatar: None,
            timestamp: Some(millis_to_local(now)),
            is_self: true,
        };
        let update = self.render_message(message)?;

        Some(SendOutcome {
            outgoing: Outgoing::Message {
                user_id: self.user_id,
                text,
            },
            update,
        })
    }

    /// Register a composer keystroke at `now` (milliseconds, monotonic).
    ///
    /// Keys typed into the open call modal answer the modal, not the composer.
    pub fn keystroke(&mut self, now: i64) -> Option<Outgoing> {
        if self.call_modal.is_open() {
            return None;
        }
        self.typing.keystroke(now).map(|signal| self.typing_frame(signal))
    }

    /// Fire the typing idle timer if it is due.
    pub fn typing_idle(&mut self, now: i64) -> Option<Outgoing> {
        self.typing.expire(now).map(|signal| self.typing_frame(signal))
    }

    /// When the typing idle timer is due, if pending.
    pub fn typing_deadline(&self) -> Option<i64> {
        self.typing.deadline()
    }

    fn typing_frame(&self, signal: TypingSignal) -> Outgoing {
        Outgoing::Typing {
            user_id: self.user_id,
            is_typing: signal.is_typing(),
        }
    }

    // ========================================
    // Call modal
    // ========================================

    pub fn open_call_modal(&mut self) {
        self.call_modal.open();
    }

    pub fn close_call_modal(&mut self) {
        self.call_modal.close();
    }

    pub fn is_call_modal_open(&self) -> bool {
        self.call_modal.is_open()
    }

    /// Pick a call type from the modal; `None` if the modal was not open.
    pub fn select_call_type(&mut self, call_type: CallType) -> Option<CallType> {
        self.call_modal.select(call_type)
    }

    // ========================================
    // View state
    // ========================================

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Polling cursor.
    pub fn last_seen_id(&self) -> i64 {
        self.timeline.last_seen_id()
    }

    pub fn online_members(&self) -> Option<usize> {
        self.online_members
    }

    pub fn call_actions(&self) -> &[JoinCallLink] {
        &self.call_actions
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}
