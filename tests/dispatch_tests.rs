//! Dispatch-layer tests for skiff.
//!
//! Preconditions must block calls entirely (zero tasks on the wire), and
//! the task stream must match the documented endpoints: single vs batch
//! delete, one independent download per selected file, rename no-ops.
//! The worker channel stands in for the network, so every assertion is on
//! what would actually be sent.

use skiff_tui::app::dispatch::{
    check_delete, check_rename, dispatch_create, dispatch_delete, dispatch_download,
    dispatch_rename,
};
use skiff_tui::app::{NavState, Precondition, SelectEvent, Selection};
use skiff_tui::core::{ApiTask, Listing, RemoteEntry};

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::PathBuf;

fn loaded_nav(path: &str, entries: Vec<RemoteEntry>) -> NavState {
    let mut nav = NavState::new();
    let id = nav.prepare_load();
    assert!(nav.apply_listing(
        id,
        Ok(Listing {
            current_path: path.to_string(),
            entries,
            is_root: path.is_empty(),
        }),
    ));
    nav
}

fn select_names(nav: &NavState, names: &[&str]) -> Selection {
    let rows = nav.display_rows();
    let mut sel = Selection::new();
    for name in names {
        let idx = (0..rows.len())
            .find(|&i| rows.entry_at(i).is_some_and(|e| &e.name == name))
            .unwrap_or_else(|| panic!("{} not in listing", name));
        sel = sel.apply(
            &rows,
            SelectEvent::Click {
                idx,
                multi: true,
                range: false,
            },
        );
    }
    sel
}

fn channel() -> (Sender<ApiTask>, Receiver<ApiTask>) {
    unbounded()
}

fn drain(rx: &Receiver<ApiTask>) -> Vec<ApiTask> {
    let mut tasks = Vec::new();
    while let Ok(task) = rx.try_recv() {
        tasks.push(task);
    }
    tasks
}

#[test]
fn rename_preconditions_issue_zero_requests() {
    let nav = loaded_nav(
        "docs",
        vec![RemoteEntry::file("a.txt", 1), RemoteEntry::file("b.txt", 2)],
    );
    let (tx, rx) = channel();

    // 0 selected and 2+ selected both fail locally.
    assert_eq!(
        check_rename(&Selection::new()),
        Err(Precondition::SelectItemFirst)
    );
    assert_eq!(
        check_rename(&select_names(&nav, &["a.txt", "b.txt"])),
        Err(Precondition::SingleItemOnly)
    );

    // Exactly one selected, but the proposed name equals the current one.
    let old = check_rename(&select_names(&nav, &["a.txt"])).expect("single item");
    assert!(!dispatch_rename(&nav, &old, "a.txt", &tx));
    assert!(!dispatch_rename(&nav, &old, "", &tx));

    assert!(drain(&rx).is_empty(), "no request may have been issued");
}

#[test]
fn rename_sends_one_task_with_both_names() {
    let nav = loaded_nav("docs", vec![RemoteEntry::file("a.txt", 1)]);
    let (tx, rx) = channel();

    assert!(dispatch_rename(&nav, "a.txt", "b.txt", &tx));
    match drain(&rx).as_slice() {
        [ApiTask::Rename {
            path,
            old_name,
            new_name,
        }] => {
            assert_eq!(path, "docs");
            assert_eq!(old_name, "a.txt");
            assert_eq!(new_name, "b.txt");
        }
        other => panic!("expected one rename task, got {:?}", other),
    }
}

#[test]
fn delete_uses_single_call_for_one_and_batch_for_many() {
    let nav = loaded_nav(
        "",
        vec![
            RemoteEntry::file("a", 1),
            RemoteEntry::file("b", 1),
            RemoteEntry::dir("c"),
        ],
    );
    let (tx, rx) = channel();

    assert_eq!(
        check_delete(&Selection::new()),
        Err(Precondition::SelectItemsFirst)
    );

    let one = check_delete(&select_names(&nav, &["b"])).expect("selected");
    assert!(dispatch_delete(&nav, one, &tx));
    assert!(matches!(
        drain(&rx).as_slice(),
        [ApiTask::Delete { name, .. }] if name == "b"
    ));

    let many = check_delete(&select_names(&nav, &["a", "b", "c"])).expect("selected");
    assert!(dispatch_delete(&nav, many, &tx));
    match drain(&rx).as_slice() {
        [ApiTask::DeleteBatch { names, .. }] => {
            assert_eq!(names, &["a", "b", "c"], "one batch call, not three singles");
        }
        other => panic!("expected one batch task, got {:?}", other),
    }
}

#[test]
fn download_selection_rules() {
    let nav = loaded_nav(
        "data",
        vec![
            RemoteEntry::dir("folder1"),
            RemoteEntry::file("file1", 100),
            RemoteEntry::file("file2", 200),
        ],
    );
    let (tx, rx) = channel();
    let dest = PathBuf::from("/tmp/downloads");

    // Folders-only selection: local warning, zero requests.
    assert_eq!(
        dispatch_download(&select_names(&nav, &["folder1"]), &nav, &dest, &tx),
        Err(Precondition::FoldersOnly)
    );
    assert!(drain(&rx).is_empty());

    // Mixed selection: exactly one request, for the file.
    let sent = dispatch_download(&select_names(&nav, &["folder1", "file1"]), &nav, &dest, &tx)
        .expect("a file is selected");
    assert_eq!(sent, 1);
    assert!(matches!(
        drain(&rx).as_slice(),
        [ApiTask::Download { name, path, .. }] if name == "file1" && path == "data"
    ));

    // Two files: two independent requests, no batching.
    let sent = dispatch_download(&select_names(&nav, &["file1", "file2"]), &nav, &dest, &tx)
        .expect("files selected");
    assert_eq!(sent, 2);
    let tasks = drain(&rx);
    assert_eq!(tasks.len(), 2);
    assert!(
        tasks
            .iter()
            .all(|t| matches!(t, ApiTask::Download { .. })),
        "downloads are per-file requests"
    );
}

#[test]
fn create_tasks_carry_the_current_path() {
    let nav = loaded_nav("models/loras", vec![]);
    let (tx, rx) = channel();

    assert!(dispatch_create(&nav, "new_folder", true, &tx));
    assert!(dispatch_create(&nav, "notes.txt", false, &tx));

    match drain(&rx).as_slice() {
        [
            ApiTask::CreateFolder { path: p1, name: n1 },
            ApiTask::CreateFile {
                path: p2, name: n2, ..
            },
        ] => {
            assert_eq!(p1, "models/loras");
            assert_eq!(n1, "new_folder");
            assert_eq!(p2, "models/loras");
            assert_eq!(n2, "notes.txt");
        }
        other => panic!("unexpected task stream: {:?}", other),
    }
}

#[test]
fn stale_listing_race_resolves_to_the_newest_navigation() {
    // Two navigations overlap; the older response arrives last and must
    // lose.
    let mut nav = NavState::new();
    let older = nav.prepare_load();
    let newer = nav.prepare_load();

    assert!(nav.apply_listing(
        newer,
        Ok(Listing {
            current_path: "b".into(),
            entries: vec![RemoteEntry::file("from_b", 1)],
            is_root: false,
        }),
    ));
    assert!(!nav.apply_listing(
        older,
        Ok(Listing {
            current_path: "a".into(),
            entries: vec![RemoteEntry::file("from_a", 1)],
            is_root: false,
        }),
    ));

    assert_eq!(nav.current_path(), "b");
    assert_eq!(nav.entries()[0].name, "from_b");
}
