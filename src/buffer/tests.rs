use super::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
struct Banner {
    heading: String,
    body: String,
    opacity: u8,
}

fn banner(heading: &str, body: &str) -> Banner {
    Banner {
        heading: heading.to_string(),
        body: body.to_string(),
        opacity: 0,
    }
}

#[test]
fn mount_prefers_stored_values() {
    let defaults = banner("Default", "Default body");
    let stored = banner("Stored", "Stored body");

    let buffer = EditBuffer::mount(&defaults, &stored, ReconcilePolicy::WholeObject).unwrap();
    assert_eq!(buffer.value(), &stored);
    assert!(!buffer.is_dirty());
}

#[test]
fn edit_marks_dirty_until_saved() {
    let mut buffer = EditBuffer::mount(&Banner::default(), &banner("A", "B"), ReconcilePolicy::WholeObject).unwrap();

    let pushed = buffer.edit(|b| b.heading = "New".to_string()).unwrap().clone();
    assert_eq!(pushed.heading, "New");
    assert!(buffer.is_dirty());

    buffer.mark_saved();
    assert!(!buffer.is_dirty());
}

#[test]
fn identical_store_value_leaves_buffer_alone() {
    let mut buffer = EditBuffer::mount(&Banner::default(), &banner("A", "B"), ReconcilePolicy::WholeObject).unwrap();
    buffer.edit(|b| b.body = "typed".to_string()).unwrap();

    let outcome = buffer.reconcile(&banner("A", "typed")).unwrap();
    assert_eq!(outcome, Reconciled::Unchanged);
    assert!(buffer.is_dirty());
}

#[test]
fn whole_object_policy_overwrites_pending_edit() {
    let mut buffer = EditBuffer::mount(&Banner::default(), &banner("A", "B"), ReconcilePolicy::WholeObject).unwrap();
    buffer.stage(|b| b.body = "typing".to_string());

    let outcome = buffer.reconcile(&banner("External", "B")).unwrap();
    assert_eq!(outcome, Reconciled::Replaced);
    assert_eq!(buffer.value(), &banner("External", "B"));
}

#[test]
fn field_level_policy_keeps_pending_edit() {
    let mut buffer = EditBuffer::mount(&Banner::default(), &banner("A", "B"), ReconcilePolicy::FieldLevel).unwrap();
    buffer.stage(|b| b.body = "typing".to_string());

    let outcome = buffer.reconcile(&banner("External", "B")).unwrap();
    assert_eq!(outcome, Reconciled::Merged);
    assert_eq!(buffer.value(), &banner("External", "typing"));
}

#[test]
fn field_level_policy_takes_store_after_sync() {
    let mut buffer = EditBuffer::mount(&Banner::default(), &banner("A", "B"), ReconcilePolicy::FieldLevel).unwrap();
    buffer.edit(|b| b.body = "pushed".to_string()).unwrap();

    // Another panel overwrote the same field after our push.
    let outcome = buffer.reconcile(&banner("A", "theirs")).unwrap();
    assert_eq!(outcome, Reconciled::Replaced);
    assert_eq!(buffer.value(), &banner("A", "theirs"));
}
