//! Message composer input buffer.

/// The text the user is composing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    text: String,
}

impl Composer {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the trimmed message out of the composer and clear it.
    ///
    /// Empty or whitespace-only input yields `None` and leaves the composer untouched.
    pub fn take_message(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let message = trimmed.to_string();
        self.text.clear();
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_message_trims_and_clears() {
        // テスト項目: 入力が trim されて取り出され、入力欄がクリアされる
        // given (前提条件):
        let mut composer = Composer::default();
        composer.set("  hello there \n");

        // when (操作):
        let message = composer.take_message();

        // then (期待する結果):
        assert_eq!(message.as_deref(), Some("hello there"));
        assert_eq!(composer.text(), "");
    }

    #[test]
    fn test_take_message_ignores_whitespace() {
        // テスト項目: 空白のみの入力は何も取り出さない
        // given (前提条件):
        let mut composer = Composer::default();
        composer.set("   \t ");

        // when (操作):
        let message = composer.take_message();

        // then (期待する結果):
        assert!(message.is_none());
    }
}
