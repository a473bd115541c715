//! UseCase: ページ上の小さな操作
//!
//! ## 責務
//!
//! - タブ切り替え（アクティブなタブは常に 1 つ）
//! - ファイル選択時のラベル更新とプレビュー生成
//! - 削除操作の確認
//!
//! 状態は `PageDocument` 側だけが持ち、コントローラ自身は状態を持ちません。
//! ターミナルのフロントエンドはページを描画しないため、このモジュールは
//! ライブラリとしてのみ提供されます（ファイルの読み込みは呼び出し側の責務です）。

use std::collections::BTreeSet;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{domain::Confirm, error::ClientError};

/// Label shown when a file selection is cleared
pub const NO_FILE_SELECTED: &str = "No file selected";
/// Prompt shown before a post is deleted
pub const DELETE_POST_PROMPT: &str = "Are you sure you want to delete this post?";
/// Only labels with this class follow the file selection
pub const MEDIA_OPTION_CLASS: &str = "media-option";
pub const ACTIVE_CLASS: &str = "active";
/// The input whose selection gets a preview
pub const MEDIA_FILE_INPUT_ID: &str = "id_media_file";

/// Set of CSS-like class names on an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(BTreeSet<String>);

impl ClassList {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(classes.into_iter().map(Into::into).collect())
    }

    pub fn add(&mut self, class: &str) {
        self.0.insert(class.to_string());
    }

    pub fn remove(&mut self, class: &str) {
        self.0.remove(class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabButton {
    /// Id of the tab content this button opens
    pub target: String,
    pub classes: ClassList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabContent {
    pub id: String,
    pub classes: ClassList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub classes: ClassList,
}

/// A file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    fn mime_type(&self) -> &'static str {
        mime_guess::from_path(&self.name)
            .first_raw()
            .unwrap_or("application/octet-stream")
    }

    /// `data:` URL of the file contents.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// File input with the label element right before it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    pub id: Option<String>,
    pub label: Option<Label>,
    pub selected: Option<SelectedFile>,
    pub preview: Option<String>,
}

/// The parts of a page the interactions touch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
    pub tab_buttons: Vec<TabButton>,
    pub tab_contents: Vec<TabContent>,
    pub file_inputs: Vec<FileInput>,
}

/// Whether a delete action goes ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Proceed,
    Cancelled,
}

pub struct PageInteractionController {
    confirm: Box<dyn Confirm>,
}

impl PageInteractionController {
    pub fn new(confirm: Box<dyn Confirm>) -> Self {
        Self { confirm }
    }

    /// Activate the tab button at `button_index` and the content it targets.
    ///
    /// The document is left untouched when the button or its target does not exist.
    pub fn open_tab(
        &self,
        document: &mut PageDocument,
        button_index: usize,
    ) -> Result<(), ClientError> {
        let target = document
            .tab_buttons
            .get(button_index)
            .map(|button| button.target.clone())
            .ok_or_else(|| ClientError::MissingElement(format!("tab button #{button_index}")))?;
        let content_index = document
            .tab_contents
            .iter()
            .position(|content| content.id == target)
            .ok_or_else(|| ClientError::MissingElement(format!("tab content '{target}'")))?;

        for content in &mut document.tab_contents {
            content.classes.remove(ACTIVE_CLASS);
        }
        for button in &mut document.tab_buttons {
            button.classes.remove(ACTIVE_CLASS);
        }
        document.tab_contents[content_index].classes.add(ACTIVE_CLASS);
        document.tab_buttons[button_index].classes.add(ACTIVE_CLASS);

        tracing::debug!("Opened tab '{}'", target);
        Ok(())
    }

    /// Apply a file selection (or its clearing) to the input at `input_index`.
    pub fn select_file(
        &self,
        document: &mut PageDocument,
        input_index: usize,
        file: Option<SelectedFile>,
    ) -> Result<(), ClientError> {
        let input = document
            .file_inputs
            .get_mut(input_index)
            .ok_or_else(|| ClientError::MissingElement(format!("file input #{input_index}")))?;

        if let Some(label) = input.label.as_mut()
            && label.classes.contains(MEDIA_OPTION_CLASS)
        {
            label.text = file
                .as_ref()
                .map_or_else(|| NO_FILE_SELECTED.to_string(), |file| file.name.clone());
        }

        input.preview = match &file {
            Some(file) if input.id.as_deref() == Some(MEDIA_FILE_INPUT_ID) => {
                Some(file.data_url())
            }
            _ => None,
        };
        input.selected = file;
        Ok(())
    }

    /// Ask before deleting a post.
    pub fn confirm_delete(&self) -> DeleteDecision {
        if self.confirm.confirm(DELETE_POST_PROMPT) {
            DeleteDecision::Proceed
        } else {
            tracing::debug!("Delete cancelled by user");
            DeleteDecision::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct ScriptedConfirm {
        answer: bool,
        prompts: Rc<RefCell<Vec<String>>>,
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&self, prompt: &str) -> bool {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer
        }
    }

    fn controller(answer: bool) -> (PageInteractionController, Rc<RefCell<Vec<String>>>) {
        let prompts = Rc::new(RefCell::new(Vec::new()));
        let confirm = ScriptedConfirm {
            answer,
            prompts: prompts.clone(),
        };
        (PageInteractionController::new(Box::new(confirm)), prompts)
    }

    fn friends_page() -> PageDocument {
        PageDocument {
            tab_buttons: vec![
                TabButton {
                    target: "friends".to_string(),
                    classes: ClassList::new(["tab-btn", ACTIVE_CLASS]),
                },
                TabButton {
                    target: "requests".to_string(),
                    classes: ClassList::new(["tab-btn"]),
                },
            ],
            tab_contents: vec![
                TabContent {
                    id: "friends".to_string(),
                    classes: ClassList::new(["tab-content", ACTIVE_CLASS]),
                },
                TabContent {
                    id: "requests".to_string(),
                    classes: ClassList::new(["tab-content"]),
                },
            ],
            file_inputs: vec![
                FileInput {
                    id: Some(MEDIA_FILE_INPUT_ID.to_string()),
                    label: Some(Label {
                        text: "Add photo".to_string(),
                        classes: ClassList::new([MEDIA_OPTION_CLASS]),
                    }),
                    ..Default::default()
                },
                FileInput {
                    id: Some("id_avatar".to_string()),
                    label: Some(Label {
                        text: "Avatar".to_string(),
                        classes: ClassList::new(["plain"]),
                    }),
                    ..Default::default()
                },
            ],
        }
    }

    fn active_tabs(document: &PageDocument) -> (Vec<&str>, Vec<&str>) {
        let buttons = document
            .tab_buttons
            .iter()
            .filter(|button| button.classes.contains(ACTIVE_CLASS))
            .map(|button| button.target.as_str())
            .collect();
        let contents = document
            .tab_contents
            .iter()
            .filter(|content| content.classes.contains(ACTIVE_CLASS))
            .map(|content| content.id.as_str())
            .collect();
        (buttons, contents)
    }

    #[test]
    fn test_open_tab_leaves_exactly_one_active() {
        // テスト項目: タブ A がアクティブな状態で B を開くと B だけがアクティブになる
        // given (前提条件):
        let (controller, _) = controller(true);
        let mut document = friends_page();

        // when (操作):
        controller.open_tab(&mut document, 1).unwrap();

        // then (期待する結果):
        let (buttons, contents) = active_tabs(&document);
        assert_eq!(buttons, vec!["requests"]);
        assert_eq!(contents, vec!["requests"]);
        assert!(document.tab_buttons[0].classes.contains("tab-btn"));
    }

    #[test]
    fn test_open_tab_with_missing_target_changes_nothing() {
        // テスト項目: 対象のタブが存在しない場合はエラーになり、アクティブなタブは変わらない
        // given (前提条件):
        let (controller, _) = controller(true);
        let mut document = friends_page();
        document.tab_buttons[1].target = "blocked".to_string();
        let before = document.clone();

        // when (操作):
        let result = controller.open_tab(&mut document, 1);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::MissingElement(_))));
        assert_eq!(document, before);
    }

    #[test]
    fn test_select_file_updates_media_label_and_preview() {
        // テスト項目: ファイルを選ぶとラベルがファイル名になり、プレビューが生成される
        // given (前提条件):
        let (controller, _) = controller(true);
        let mut document = friends_page();
        let file = SelectedFile {
            name: "cat.PNG".to_string(),
            bytes: b"meow".to_vec(),
        };

        // when (操作):
        controller.select_file(&mut document, 0, Some(file)).unwrap();

        // then (期待する結果):
        let input = &document.file_inputs[0];
        assert_eq!(input.label.as_ref().unwrap().text, "cat.PNG");
        assert_eq!(
            input.preview.as_deref(),
            Some("data:image/png;base64,bWVvdw==")
        );
    }

    #[test]
    fn test_preview_mime_type_follows_registered_extensions() {
        // テスト項目: プレビューの MIME タイプは拡張子の登録情報から決まり、未知の拡張子は octet-stream になる
        // given (前提条件):
        let file = |name: &str| SelectedFile {
            name: name.to_string(),
            bytes: vec![0],
        };

        // when (操作):
        let movie = file("clip.mov").data_url();
        let song = file("song.mp3").data_url();
        let unknown = file("notes.zzqx").data_url();

        // then (期待する結果):
        assert!(movie.starts_with("data:video/quicktime;base64,"));
        assert!(song.starts_with("data:audio/mpeg;base64,"));
        assert!(unknown.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_clearing_selection_shows_placeholder() {
        // テスト項目: 選択を解除するとラベルがプレースホルダーに戻り、プレビューが消える
        // given (前提条件):
        let (controller, _) = controller(true);
        let mut document = friends_page();
        let file = SelectedFile {
            name: "cat.png".to_string(),
            bytes: vec![1, 2, 3],
        };
        controller.select_file(&mut document, 0, Some(file)).unwrap();

        // when (操作):
        controller.select_file(&mut document, 0, None).unwrap();

        // then (期待する結果):
        let input = &document.file_inputs[0];
        assert_eq!(input.label.as_ref().unwrap().text, NO_FILE_SELECTED);
        assert!(input.preview.is_none());
        assert!(input.selected.is_none());
    }

    #[test]
    fn test_label_without_media_option_class_is_untouched() {
        // テスト項目: media-option クラスのないラベルは更新されず、プレビューも作られない
        // given (前提条件):
        let (controller, _) = controller(true);
        let mut document = friends_page();
        let file = SelectedFile {
            name: "me.jpg".to_string(),
            bytes: vec![0xff],
        };

        // when (操作):
        controller.select_file(&mut document, 1, Some(file)).unwrap();

        // then (期待する結果):
        let input = &document.file_inputs[1];
        assert_eq!(input.label.as_ref().unwrap().text, "Avatar");
        assert!(input.preview.is_none());
        assert!(input.selected.is_some());
    }

    #[test]
    fn test_confirm_delete_follows_answer() {
        // テスト項目: 確認ダイアログの回答によって削除の可否が決まる
        // given (前提条件):
        let (accepting, prompts) = controller(true);
        let (declining, _) = controller(false);

        // when (操作):
        let accepted = accepting.confirm_delete();
        let declined = declining.confirm_delete();

        // then (期待する結果):
        assert_eq!(accepted, DeleteDecision::Proceed);
        assert_eq!(declined, DeleteDecision::Cancelled);
        assert_eq!(prompts.borrow().as_slice(), &[DELETE_POST_PROMPT.to_string()]);
    }
}
