// core/tests/typing_scenarios.rs
//
// End-to-end typing scenarios against a host-side text field.
//
// Tests cover:
// - Letters typed into the field and replaced on commit
// - Letters typed past the buffer capacity still replaced on commit
// - Backspace, Enter and selection keys driven through process_key
// - Sessions sharing one parsed dictionary
// - Keyboard button labels routed through KeyEvent::from_label

use std::sync::Arc;
use syllable_ime_core::{
    key::{BACKSPACE_LABEL, NEW_LINE_LABEL},
    CommitAction, Dictionary, ImeSession, KeyEvent, KeyResult, NullSurface, Phase,
    RecordingSurface, TextField, TextTarget,
};

const DICT: &str = r#"{
    "ni": ["你", "尼"],
    "hao": ["好", "号"],
    "wo": ["我"],
    "zhong": ["中", "种", "重"]
}"#;

/// Host glue: the keyboard writes typed characters into the field and the
/// session decides what to replace.
struct Host<S: syllable_ime_core::CandidateSurface> {
    session: ImeSession<S>,
    field: TextField,
}

impl<S: syllable_ime_core::CandidateSurface> Host<S> {
    fn press(&mut self, key: KeyEvent) -> KeyResult {
        match key {
            KeyEvent::Letter(ch) => self.field.push(ch),
            KeyEvent::Backspace => self.field.delete_chars(1),
            KeyEvent::Enter => self.field.push('\n'),
            _ => {}
        }
        let result = self.session.process_key(key).unwrap();
        if let KeyResult::Committed(action) = &result {
            action.apply(&mut self.field);
        }
        result
    }

    fn type_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.press(KeyEvent::from_char(ch));
        }
    }
}

fn host() -> Host<NullSurface> {
    let mut session = ImeSession::new();
    session.set_dictionary(DICT).unwrap();
    Host {
        session,
        field: TextField::new(),
    }
}

#[test]
fn type_sentence_with_selections() {
    let mut h = host();
    h.type_str("wo");
    h.press(KeyEvent::Select(0));
    h.type_str("ni");
    h.press(KeyEvent::Select(0));
    h.type_str("hao");
    h.press(KeyEvent::Select(0));
    assert_eq!(h.field.text(), "我你好");
    assert_eq!(h.session.phase(), Phase::Idle);
}

#[test]
fn second_candidate_via_select_key() {
    let mut h = host();
    h.type_str("zhong");
    assert_eq!(
        h.press(KeyEvent::Other('3')),
        KeyResult::Committed(CommitAction::new(5, "重"))
    );
    assert_eq!(h.field.text(), "重");
}

#[test]
fn backspace_then_commit_deletes_only_remaining_letters() {
    let mut h = host();
    h.field.insert_text("abc ");
    h.type_str("nix");
    h.press(KeyEvent::Backspace);
    assert_eq!(h.session.value(), "ni");
    assert_eq!(h.session.source_len(), 2);
    h.press(KeyEvent::Space);
    assert_eq!(h.field.text(), "abc 你");
}

#[test]
fn backspace_past_empty_never_underflows() {
    let mut h = host();
    h.type_str("n");
    assert_eq!(h.press(KeyEvent::Backspace), KeyResult::Handled);
    assert_eq!(h.press(KeyEvent::Backspace), KeyResult::NotHandled);
    assert_eq!(h.session.value(), "");
    assert_eq!(h.session.source_len(), 0);
    assert!(h.session.commit(0).unwrap().is_empty());
}

#[test]
fn enter_keeps_typed_letters() {
    let mut h = host();
    h.type_str("ni");
    assert_eq!(h.press(KeyEvent::Enter), KeyResult::Handled);
    assert_eq!(h.field.text(), "ni\n");
    assert_eq!(h.session.phase(), Phase::Idle);
    assert!(h.session.candidates().is_empty());
}

#[test]
fn commit_after_overflow_replaces_every_typed_letter() {
    let mut h = host();
    h.session.set_dictionary(r#"{"aaaaaaaaaaaaaaa":["X"]}"#).unwrap();
    h.field.insert_text("> ");
    h.type_str(&"a".repeat(16));
    assert_eq!(h.session.value().len(), 15);
    assert_eq!(h.session.source_len(), 16);
    assert_eq!(h.field.text().len(), 18);

    h.press(KeyEvent::Select(0));
    assert_eq!(h.field.text(), "> X");
}

#[test]
fn sessions_share_one_dictionary() {
    let shared = Arc::new(Dictionary::from_json_str(DICT).unwrap());
    let mut first = ImeSession::with_surface(RecordingSurface::default());
    let mut second = ImeSession::with_surface(RecordingSurface::default());
    first.set_shared_dictionary(Arc::clone(&shared)).unwrap();
    second.set_shared_dictionary(Arc::clone(&shared)).unwrap();

    first.append('w').unwrap();
    first.append('o').unwrap();
    second.append('n').unwrap();
    second.append('i').unwrap();

    assert_eq!(first.surface().shown, vec!["我"]);
    assert_eq!(second.surface().shown, vec!["你", "尼"]);

    // replacing one session's dictionary leaves the other alone
    first.set_dictionary(r#"{"wo":["窝"]}"#).unwrap();
    assert_eq!(first.candidates().candidates(), ["窝"]);
    assert_eq!(second.candidates().candidates(), ["你", "尼"]);
}

#[test]
fn keyboard_labels_drive_session() {
    let mut session = ImeSession::new();
    session.set_dictionary(DICT).unwrap();
    for label in ["n", "i", "x", BACKSPACE_LABEL] {
        let key = KeyEvent::from_label(label).unwrap();
        session.process_key(key).unwrap();
    }
    assert_eq!(session.value(), "ni");
    let key = KeyEvent::from_label(NEW_LINE_LABEL).unwrap();
    session.process_key(key).unwrap();
    assert_eq!(session.value(), "");
}

#[test]
fn builtin_dictionary_by_default() {
    let mut session = ImeSession::new();
    session.append('w').unwrap();
    session.append('o').unwrap();
    assert_eq!(session.candidates().get(0), Some("我"));
    assert_eq!(session.commit(0).unwrap(), CommitAction::new(2, "我"));
}
