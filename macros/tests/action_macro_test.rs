//! Tests for #[derive(Action)] macro

use todo_widget_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum DraftAction {
    #[command]
    SetDraft {
        text: String,
    },

    #[command]
    Commit,

    #[command]
    Remove(i64),

    #[event]
    Added {
        id: i64,
        text: String,
    },

    #[event]
    Removed(i64),

    Rejected,
}

#[test]
fn test_is_command() {
    let action = DraftAction::SetDraft {
        text: "Buy milk".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
    assert!(DraftAction::Commit.is_command());
    assert!(DraftAction::Remove(7).is_command());
}

#[test]
fn test_is_event() {
    let action = DraftAction::Added {
        id: 1,
        text: "Buy milk".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
    assert!(DraftAction::Removed(1).is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!DraftAction::Rejected.is_command());
    assert!(!DraftAction::Rejected.is_event());
}

#[test]
fn test_name_covers_every_variant() {
    assert_eq!(DraftAction::Commit.name(), "Commit");
    assert_eq!(DraftAction::Remove(3).name(), "Remove");
    assert_eq!(DraftAction::Removed(3).name(), "Removed");
    assert_eq!(DraftAction::Rejected.name(), "Rejected");
    assert_eq!(
        DraftAction::SetDraft {
            text: String::new()
        }
        .name(),
        "SetDraft"
    );
}
