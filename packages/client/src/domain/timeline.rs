//! Message timeline view model.
//!
//! The timeline is the client's model of the rendered message list: newest entry at the
//! top, an explicit set of rendered ids for duplicate suppression, a scroll anchor, and
//! the polling cursor (the last confirmed message id seen).

use std::collections::{HashSet, VecDeque};

use super::{ChatMessage, MessageId};

/// Result of inserting a message into the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A message with the same id is already rendered; nothing changed
    Duplicate,
    /// Inserted at the top
    Prepended,
    /// Replaced a pending optimistic message in place
    Reconciled { replaced: MessageId },
}

/// Rendered message list, newest first
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: VecDeque<ChatMessage>,
    rendered: HashSet<MessageId>,
    last_seen_id: i64,
    scroll_anchor: Option<MessageId>,
}

impl Timeline {
    /// Create an empty timeline whose polling cursor starts at `last_seen_id`.
    pub fn new(last_seen_id: i64) -> Self {
        Self {
            last_seen_id,
            ..Self::default()
        }
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.rendered.contains(id)
    }

    /// Insert a message unless its id is already rendered.
    ///
    /// A confirmed message authored by the viewer replaces the oldest pending optimistic
    /// message with identical content. No correlation id travels with the send, so two
    /// identical in-flight messages are matched oldest first.
    pub fn insert(&mut self, message: ChatMessage) -> InsertOutcome {
        if self.rendered.contains(&message.id) {
            return InsertOutcome::Duplicate;
        }

        let id = message.id.clone();
        let outcome = match self.find_pending_echo(&message) {
            Some(index) => {
                let replaced = std::mem::replace(&mut self.entries[index], message).id;
                self.rendered.remove(&replaced);
                InsertOutcome::Reconciled { replaced }
            }
            None => {
                self.entries.push_front(message);
                InsertOutcome::Prepended
            }
        };

        if let Some(confirmed) = id.confirmed()
            && confirmed > self.last_seen_id
        {
            self.last_seen_id = confirmed;
        }
        self.rendered.insert(id);
        self.scroll_to_newest();

        outcome
    }

    fn find_pending_echo(&self, message: &ChatMessage) -> Option<usize> {
        if !message.is_self || message.id.is_temporary() {
            return None;
        }
        // entries are newest first, so the last match is the oldest pending one
        self.entries
            .iter()
            .rposition(|entry| entry.is_pending() && entry.content == message.content)
    }

    fn scroll_to_newest(&mut self) {
        self.scroll_anchor = self.entries.front().map(|entry| entry.id.clone());
    }

    /// Entries from top (newest) to bottom.
    pub fn entries(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<MessageId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Polling cursor: highest confirmed id seen so far.
    pub fn last_seen_id(&self) -> i64 {
        self.last_seen_id
    }

    /// The entry the view is scrolled to.
    pub fn scroll_anchor(&self) -> Option<&MessageId> {
        self.scroll_anchor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmed(id: i64, content: &str, is_self: bool) -> ChatMessage {
        ChatMessage {
            id: MessageId::Confirmed(id),
            content: content.to_string(),
            sender: if is_self { "me" } else { "bob" }.to_string(),
            sender_avatar: None,
            timestamp: None,
            is_self,
        }
    }

    fn pending(seq: u64, content: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId::temporary(1_700_000_000_000, seq),
            content: content.to_string(),
            sender: "1".to_string(),
            sender_avatar: None,
            timestamp: None,
            is_self: true,
        }
    }

    #[test]
    fn test_insert_same_id_twice_is_noop() {
        // テスト項目: 同じ ID のメッセージを 2 回挿入しても 1 件のまま
        // given (前提条件):
        let mut timeline = Timeline::new(0);
        timeline.insert(confirmed(5, "hello", false));

        // when (操作):
        let outcome = timeline.insert(confirmed(5, "hello", false));

        // then (期待する結果):
        assert_eq!(outcome, InsertOutcome::Duplicate);
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_insert_prepends_newest_at_top() {
        // テスト項目: 新しいメッセージが先頭に挿入され、スクロール位置が最新になる
        // given (前提条件):
        let mut timeline = Timeline::new(0);

        // when (操作):
        for id in [3, 4, 5] {
            timeline.insert(confirmed(id, "x", false));
        }

        // then (期待する結果):
        assert_eq!(
            timeline.ids(),
            vec![
                MessageId::Confirmed(5),
                MessageId::Confirmed(4),
                MessageId::Confirmed(3)
            ]
        );
        assert_eq!(timeline.scroll_anchor(), Some(&MessageId::Confirmed(5)));
    }

    #[test]
    fn test_cursor_advances_monotonically_on_confirmed_ids_only() {
        // テスト項目: カーソルは確定 ID でのみ単調に進む
        // given (前提条件):
        let mut timeline = Timeline::new(10);

        // when (操作):
        timeline.insert(confirmed(12, "a", false));
        timeline.insert(confirmed(11, "b", false));
        timeline.insert(pending(1, "c"));

        // then (期待する結果):
        assert_eq!(timeline.last_seen_id(), 12);
    }

    #[test]
    fn test_server_copy_reconciles_pending_message_in_place() {
        // テスト項目: 自分の確定メッセージが同じ内容の一時メッセージを置き換える
        // given (前提条件):
        let mut timeline = Timeline::new(0);
        let temp = pending(1, "hello");
        let temp_id = temp.id.clone();
        timeline.insert(temp);
        timeline.insert(confirmed(8, "unrelated", false));

        // when (操作):
        let outcome = timeline.insert(confirmed(9, "hello", true));

        // then (期待する結果):
        assert_eq!(
            outcome,
            InsertOutcome::Reconciled {
                replaced: temp_id.clone()
            }
        );
        assert_eq!(
            timeline.ids(),
            vec![MessageId::Confirmed(8), MessageId::Confirmed(9)]
        );
        assert!(!timeline.contains(&temp_id));
        assert_eq!(timeline.last_seen_id(), 9);
    }

    #[test]
    fn test_identical_pending_messages_match_oldest_first() {
        // テスト項目: 同じ内容の一時メッセージが複数ある場合、古い方から置き換えられる
        // given (前提条件):
        let mut timeline = Timeline::new(0);
        let older = pending(1, "ok");
        let older_id = older.id.clone();
        timeline.insert(older);
        timeline.insert(pending(2, "ok"));

        // when (操作):
        let outcome = timeline.insert(confirmed(20, "ok", true));

        // then (期待する結果):
        assert_eq!(outcome, InsertOutcome::Reconciled { replaced: older_id });
        assert_eq!(
            timeline.ids(),
            vec![
                MessageId::temporary(1_700_000_000_000, 2),
                MessageId::Confirmed(20)
            ]
        );
    }

    #[test]
    fn test_other_members_message_never_reconciles() {
        // テスト項目: 他人のメッセージは一時メッセージを置き換えない
        // given (前提条件):
        let mut timeline = Timeline::new(0);
        timeline.insert(pending(1, "same text"));

        // when (操作):
        let outcome = timeline.insert(confirmed(3, "same text", false));

        // then (期待する結果):
        assert_eq!(outcome, InsertOutcome::Prepended);
        assert_eq!(timeline.len(), 2);
    }
}
