#![allow(dead_code)]

use std::sync::Mutex;

use once_cell::sync::Lazy;
use signup_wizard::{
    storage::{JsonFileStore, MemoryStore},
    wizard::{StepId, Wizard},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a file-backed store in a unique directory.
pub fn file_store() -> JsonFileStore {
    let temp = TempDir::new().expect("create temp dir");
    let root = temp.path().join("store");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonFileStore::new(root).expect("create json file store")
}

pub fn fill_personal<S: signup_wizard::storage::KeyValueStore>(wizard: &mut Wizard<S>) {
    wizard.set_full_name("Ann Lee");
    wizard.set_email("a@b.com");
    wizard.set_phone("5551234567");
}

pub fn fill_account<S: signup_wizard::storage::KeyValueStore>(wizard: &mut Wizard<S>) {
    wizard.set_username("annlee");
    wizard.set_password("abcd123!");
    wizard.set_confirm_password("abcd123!");
}

/// Walks a fresh in-memory wizard all the way to the review step.
pub fn wizard_at_review() -> Wizard<MemoryStore> {
    let mut wizard = Wizard::new(MemoryStore::new());
    fill_personal(&mut wizard);
    assert!(wizard.next(StepId::Personal, StepId::Account).moved());
    fill_account(&mut wizard);
    assert!(wizard.next(StepId::Account, StepId::Profile).moved());
    wizard.set_bio("Builds things");
    wizard.add_skill("Rust");
    wizard.add_skill("Go");
    assert!(wizard.next(StepId::Profile, StepId::Review).moved());
    wizard
}
