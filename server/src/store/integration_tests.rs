use super::*;
use crate::domain::{NewTask, TaskId, TaskPatch};
use anyhow::Result;

async fn setup_store() -> Result<SqliteTaskStore> {
    Ok(SqliteTaskStore::connect("sqlite::memory:", 1).await?)
}

fn new_task(text: &str) -> NewTask {
    NewTask::new(Some(text.to_string())).unwrap()
}

#[tokio::test]
async fn test_insert_defaults_to_not_completed() -> Result<()> {
    let store = setup_store().await?;

    let first = store.insert(new_task("buy milk")).await?;
    let second = store.insert(new_task("buy milk")).await?;

    assert_eq!(first.text, "buy milk");
    assert!(!first.completed);
    assert_ne!(first.id, second.id);

    Ok(())
}

#[tokio::test]
async fn test_list_is_newest_first() -> Result<()> {
    let store = setup_store().await?;

    let a = store.insert(new_task("A")).await?;
    let b = store.insert(new_task("B")).await?;
    let c = store.insert(new_task("C")).await?;

    let ids: Vec<TaskId> = store.list().await?.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);

    Ok(())
}

#[tokio::test]
async fn test_list_empty_store() -> Result<()> {
    let store = setup_store().await?;
    assert!(store.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() -> Result<()> {
    let store = setup_store().await?;
    let task = store.insert(new_task("x")).await?;

    let updated = store
        .update(
            task.id,
            TaskPatch {
                text: None,
                completed: Some(true),
            },
        )
        .await?;
    assert_eq!(updated.text, "x");
    assert!(updated.completed);

    let updated = store
        .update(
            task.id,
            TaskPatch {
                text: Some("y".to_string()),
                completed: None,
            },
        )
        .await?;
    assert_eq!(updated.text, "y");
    assert!(updated.completed);

    Ok(())
}

#[tokio::test]
async fn test_empty_patch_returns_current_record() -> Result<()> {
    let store = setup_store().await?;
    let task = store.insert(new_task("unchanged")).await?;

    let updated = store.update(task.id, TaskPatch::default()).await?;
    assert_eq!(updated, task);

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() -> Result<()> {
    let store = setup_store().await?;
    let existing = store.insert(new_task("keep")).await?;
    let missing = TaskId::new();

    let result = store
        .update(
            missing,
            TaskPatch {
                text: Some("changed".to_string()),
                completed: Some(true),
            },
        )
        .await;

    match result {
        Err(StoreError::NotFound(id)) => assert_eq!(id, missing),
        other => panic!("Unexpected result: {other:?}"),
    }
    assert_eq!(store.list().await?, vec![existing]);

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_record() -> Result<()> {
    let store = setup_store().await?;
    let keep = store.insert(new_task("keep")).await?;
    let gone = store.insert(new_task("gone")).await?;

    store.delete(gone.id).await?;

    assert_eq!(store.list().await?, vec![keep]);
    assert!(matches!(
        store.delete(gone.id).await,
        Err(StoreError::NotFound(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_creation_order_survives_deletes() -> Result<()> {
    let store = setup_store().await?;

    let a = store.insert(new_task("A")).await?;
    let b = store.insert(new_task("B")).await?;
    store.delete(b.id).await?;
    let c = store.insert(new_task("C")).await?;

    let ids: Vec<TaskId> = store.list().await?.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c.id, a.id]);

    Ok(())
}

#[tokio::test]
async fn test_text_round_trips_verbatim() -> Result<()> {
    let store = setup_store().await?;
    let text = "  émoji 🥛 and\ttabs  ";

    let created = store.insert(new_task(text)).await?;
    let listed = store
        .list()
        .await?
        .into_iter()
        .find(|t| t.id == created.id)
        .expect("created task is listed");

    assert_eq!(listed.text, text);
    assert!(!listed.completed);

    Ok(())
}
