//! Tests for profile store file locking

use std::sync::{Arc, Barrier};
use std::thread;

use extmgr_profiles::{ProfileName, ProfileStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const THREADS: usize = 8;
const SAVES_PER_THREAD: usize = 20;

#[test]
fn concurrent_environment_saves_are_all_kept() {
    let dir = tempdir().unwrap();
    let workspace = dir.path().join("ws");
    let store = ProfileStore::new(dir.path().join("app"), Some(workspace.as_path()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                (0..SAVES_PER_THREAD)
                    .filter(|i| {
                        let name = ProfileName::Environment(format!("t{t}-{i}"));
                        store.set(&name, [format!("ext.t{t}-{i}")]).is_err()
                    })
                    .count()
            })
        })
        .collect();

    let errors: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(errors, 0);

    let names = store.environment_names().unwrap();
    assert_eq!(names.len(), THREADS * SAVES_PER_THREAD);
    assert_eq!(
        store
            .require(&ProfileName::Environment("t7-19".into()))
            .unwrap(),
        vec!["ext.t7-19"]
    );
}

#[test]
fn concurrent_saves_to_different_layers_and_profiles() {
    let dir = tempdir().unwrap();
    let workspace = dir.path().join("ws");
    let store = ProfileStore::new(dir.path().join("app"), Some(workspace.as_path()));
    let barrier = Arc::new(Barrier::new(3));

    let writers = [
        (ProfileName::Default, "default.ext"),
        (ProfileName::Global, "global.ext"),
        (ProfileName::Workspace, "workspace.ext"),
    ];
    let handles: Vec<_> = writers
        .into_iter()
        .map(|(name, id)| {
            let store = store.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                store.set(&name, [id])
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(store.require(&ProfileName::Default).unwrap(), vec!["default.ext"]);
    assert_eq!(store.require(&ProfileName::Global).unwrap(), vec!["global.ext"]);
    assert_eq!(
        store.require(&ProfileName::Workspace).unwrap(),
        vec!["workspace.ext"]
    );
}

#[test]
fn concurrent_deletes_and_saves_do_not_lose_updates() {
    let dir = tempdir().unwrap();
    let store = ProfileStore::new(dir.path().join("app"), None);
    for i in 0..SAVES_PER_THREAD {
        store
            .set(&ProfileName::Environment(format!("old-{i}")), ["a.ext"])
            .unwrap();
    }

    let deleter = {
        let store = store.clone();
        thread::spawn(move || {
            (0..SAVES_PER_THREAD)
                .map(|i| store.delete_environment(&format!("old-{i}")))
                .collect::<Result<Vec<bool>, _>>()
        })
    };
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            (0..SAVES_PER_THREAD).try_for_each(|i| {
                store
                    .set(&ProfileName::Environment(format!("new-{i}")), ["b.ext"])
                    .map(|_| ())
            })
        })
    };

    assert!(deleter.join().unwrap().unwrap().into_iter().all(|deleted| deleted));
    writer.join().unwrap().unwrap();

    let names = store.environment_names().unwrap();
    assert_eq!(names.len(), SAVES_PER_THREAD);
    assert!(names.iter().all(|n| n.starts_with("new-")));
}
