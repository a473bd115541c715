//! Message formatting utilities for terminal display.

use tsudoi_shared::time::format_clock_time;

use crate::{
    domain::{ChatMessage, ConnectionState, InsertOutcome, JoinCallLink},
    usecase::ViewUpdate,
};

const SEPARATOR: &str = "------------------------------------------------------------";

/// Message formatter for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// Messages from others show the avatar and sender name; own messages carry a check mark.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to format
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_message(message: &ChatMessage) -> String {
        let time = message
            .timestamp
            .map(format_clock_time)
            .unwrap_or_else(|| "--:--".to_string());

        if message.is_self {
            format!(
                "\n{SEPARATOR}\n\
                 (me) {}\n\
                 {} ✓\n\
                 {SEPARATOR}\n",
                message.content, time
            )
        } else {
            format!(
                "\n{SEPARATOR}\n\
                 [{}] @{}: {}\n\
                 {}\n\
                 {SEPARATOR}\n",
                message.avatar(),
                message.sender,
                message.content,
                time
            )
        }
    }

    /// Format the confirmation of an optimistically rendered message
    pub fn format_delivered(message: &ChatMessage) -> String {
        format!("✓ delivered (#{})\n", message.id)
    }

    /// Format a join-call affordance
    ///
    /// # Arguments
    ///
    /// * `link` - The join link
    /// * `url` - Absolute URL the link points to
    pub fn format_join_call(link: &JoinCallLink, url: &str) -> String {
        format!(
            "\n[{}] {} -> {}\n",
            link.call_type.icon(),
            link.label(),
            url
        )
    }

    pub fn format_online_members(count: usize) -> String {
        format!("\nOnline members: {}\n", count)
    }

    pub fn format_call_modal() -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Start a call\n");
        output.push_str("  video - Video call\n");
        output.push_str("  audio - Audio call\n");
        output.push_str("  close - Cancel\n");
        output.push_str("============================================================\n");
        output
    }

    pub fn format_connection_state(state: ConnectionState) -> String {
        match state {
            ConnectionState::Connecting => "\n… connecting\n".to_string(),
            ConnectionState::Open => "\n● connected\n".to_string(),
            ConnectionState::Closed => "\n○ disconnected, reconnecting\n".to_string(),
        }
    }

    pub fn format_navigation(url: &str) -> String {
        format!("\n→ Open {} to continue\n", url)
    }

    /// Format a view update; `resolve` turns a server path into an absolute URL.
    pub fn format_update(update: &ViewUpdate, resolve: impl Fn(&str) -> String) -> String {
        match update {
            ViewUpdate::MessageRendered {
                message,
                outcome: InsertOutcome::Reconciled { .. },
            } => Self::format_delivered(message),
            ViewUpdate::MessageRendered { message, .. } => Self::format_message(message),
            ViewUpdate::OnlineMembersChanged(count) => Self::format_online_members(*count),
            ViewUpdate::JoinCallOffered(link) => Self::format_join_call(link, &resolve(&link.href())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{CallType, DEFAULT_AVATAR, MessageId};

    fn message(is_self: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::Confirmed(12),
            content: "Hello, group!".to_string(),
            sender: "alice".to_string(),
            sender_avatar: None,
            timestamp: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|date| date.and_hms_opt(9, 5, 0)),
            is_self,
        }
    }

    #[test]
    fn test_format_message_from_other_member() {
        // テスト項目: 他のメンバーのメッセージはアバター・送信者名・時刻付きで表示される
        // given (前提条件):
        let message = message(false);

        // when (操作):
        let result = MessageFormatter::format_message(&message);

        // then (期待する結果):
        assert!(result.contains(DEFAULT_AVATAR));
        assert!(result.contains("@alice: Hello, group!"));
        assert!(result.contains("09:05"));
        assert!(!result.contains('✓'));
    }

    #[test]
    fn test_format_own_message() {
        // テスト項目: 自分のメッセージは送信者名なしでチェックマーク付きになる
        // given (前提条件):
        let message = message(true);

        // when (操作):
        let result = MessageFormatter::format_message(&message);

        // then (期待する結果):
        assert!(result.contains("(me) Hello, group!"));
        assert!(result.contains("09:05 ✓"));
        assert!(!result.contains("@alice"));
    }

    #[test]
    fn test_format_message_without_timestamp() {
        // テスト項目: 時刻が読めないメッセージはプレースホルダーの時刻で表示される
        // given (前提条件):
        let mut message = message(false);
        message.timestamp = None;

        // when (操作):
        let result = MessageFormatter::format_message(&message);

        // then (期待する結果):
        assert!(result.contains("--:--"));
    }

    #[test]
    fn test_format_join_call() {
        // テスト項目: 通話参加ボタンがアイコン・ラベル・リンク付きで表示される
        // given (前提条件):
        let link = JoinCallLink::new(CallType::Audio, 8);

        // when (操作):
        let result =
            MessageFormatter::format_join_call(&link, "http://localhost/group/call/8/join/");

        // then (期待する結果):
        assert!(result.contains("[phone]"));
        assert!(result.contains("Join audio Call"));
        assert!(result.contains("http://localhost/group/call/8/join/"));
    }

    #[test]
    fn test_format_update_for_reconciled_message() {
        // テスト項目: 置き換えられた自分のメッセージは配信確認として表示される
        // given (前提条件):
        let update = ViewUpdate::MessageRendered {
            message: message(true),
            outcome: InsertOutcome::Reconciled {
                replaced: MessageId::Temporary("temp-1-1".to_string()),
            },
        };

        // when (操作):
        let result = MessageFormatter::format_update(&update, str::to_string);

        // then (期待する結果):
        assert_eq!(result, "✓ delivered (#12)\n");
    }

    #[test]
    fn test_format_update_resolves_join_link() {
        // テスト項目: 参加リンクは resolve で絶対 URL に変換される
        // given (前提条件):
        let update = ViewUpdate::JoinCallOffered(JoinCallLink::new(CallType::Video, 42));

        // when (操作):
        let result = MessageFormatter::format_update(&update, |path| format!("https://x{path}"));

        // then (期待する結果):
        assert!(result.contains("[video] Join video Call -> https://x/group/call/42/join/"));
    }

    #[test]
    fn test_format_online_members() {
        // テスト項目: オンライン人数が表示される
        // given (前提条件):
        let count = 4;

        // when (操作):
        let result = MessageFormatter::format_online_members(count);

        // then (期待する結果):
        assert!(result.contains("Online members: 4"));
    }
}
