use std::{sync::Arc, time::Duration};

use parrot_persist::{
    NewExchange, PersistClientBuilder, PersistError, PersistenceClient, SqlitePersistenceClient,
    USER_NAME_MAX_CHARS,
};
use tempfile::TempDir;

async fn client() -> SqlitePersistenceClient {
    PersistClientBuilder::new()
        .in_memory()
        .build()
        .await
        .expect("in-memory database")
}

/// File-backed client with a real multi-connection pool. Keep the `TempDir`
/// alive for as long as the client is used.
async fn file_client() -> (TempDir, SqlitePersistenceClient) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("parrot.db");
    let client = PersistClientBuilder::new()
        .database_url(format!("sqlite://{}", path.display()))
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(30))
        .build()
        .await
        .expect("file database");
    (dir, client)
}

fn exchange(user_id: i64, thread_id: Option<i64>, text: &str) -> NewExchange {
    NewExchange {
        user_id,
        thread_id,
        title: text.chars().take(50).collect(),
        user_text: text.to_string(),
        reply_text: format!("Let me think about: {}", text),
    }
}

#[tokio::test]
async fn test_find_or_create_user_is_case_insensitive() {
    let client = client().await;
    
    let alice = client.find_or_create_user("Alice").await.unwrap();
    let again = client.find_or_create_user("ALICE").await.unwrap();
    let lower = client.find_or_create_user("alice").await.unwrap();
    
    assert_eq!(alice.id, again.id);
    assert_eq!(alice.id, lower.id);
    // First-seen casing wins
    assert_eq!(lower.name, "Alice");
    
    let bob = client.find_or_create_user("Bob").await.unwrap();
    assert_ne!(alice.id, bob.id);
}

#[tokio::test]
async fn test_long_names_are_truncated_at_storage_boundary() {
    let client = client().await;
    let long_name = "x".repeat(USER_NAME_MAX_CHARS + 12);
    
    let user = client.find_or_create_user(&long_name).await.unwrap();
    assert_eq!(user.name.chars().count(), USER_NAME_MAX_CHARS);
    
    // Anything sharing the stored prefix resolves to the same row
    let other = client
        .find_or_create_user(&"X".repeat(USER_NAME_MAX_CHARS + 1))
        .await
        .unwrap();
    assert_eq!(user.id, other.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sign_ins_resolve_to_one_user() {
    let (_dir, client) = file_client().await;
    let client = Arc::new(client);
    
    let mut handles = Vec::new();
    for _ in 0..8 {
        for name in ["carol", "Carol", "CAROL", "cArOl"] {
            let client = client.clone();
            handles.push(tokio::spawn(async move { client.find_or_create_user(name).await }));
        }
    }
    
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().expect("sign-in should not fail under contention").id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_exchanges_into_one_thread_all_commit() {
    let (_dir, client) = file_client().await;
    let client = Arc::new(client);
    let user_id = client.find_or_create_user("Alice").await.unwrap().id;
    let first = client
        .record_exchange(exchange(user_id, None, "opening"))
        .await
        .unwrap();
    
    let sends = 64;
    let mut handles = Vec::new();
    for i in 0..sends {
        let client = client.clone();
        let thread_id = first.thread.id;
        handles.push(tokio::spawn(async move {
            client
                .record_exchange(exchange(user_id, Some(thread_id), &format!("message {}", i)))
                .await
        }));
    }
    
    let mut failures = Vec::new();
    for handle in handles {
        if let Err(e) = handle.await.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "failed sends: {:?}", failures);
    
    let messages = client.get_messages(first.thread.id).await.unwrap();
    assert_eq!(messages.len(), 2 + 2 * sends);
    
    // Every reply sits directly after the message it answers
    for pair in messages.chunks(2) {
        assert!(!pair[0].is_reply());
        assert_eq!(pair[1].response_to_id, Some(pair[0].id));
    }
}

#[tokio::test]
async fn test_record_exchange_creates_thread_and_linked_pair() {
    let client = client().await;
    let user = client.find_or_create_user("Alice").await.unwrap();
    
    let result = client
        .record_exchange(exchange(user.id, None, "hello world"))
        .await
        .unwrap();
    
    assert_eq!(result.thread.title, "hello world");
    assert_eq!(result.thread.user_id, user.id);
    assert_eq!(result.user_message.message, "hello world");
    assert_eq!(result.user_message.response_to_id, None);
    assert_eq!(result.reply.response_to_id, Some(result.user_message.id));
    assert_eq!(result.reply.thread_id, result.thread.id);
    
    let messages = client.get_messages(result.thread.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, result.user_message.id);
    assert!(!messages[0].is_reply());
    assert!(messages[1].is_reply());
}

#[tokio::test]
async fn test_record_exchange_appends_to_existing_thread() {
    let client = client().await;
    let user = client.find_or_create_user("Alice").await.unwrap();
    
    let first = client
        .record_exchange(exchange(user.id, None, "first"))
        .await
        .unwrap();
    let second = client
        .record_exchange(exchange(user.id, Some(first.thread.id), "second"))
        .await
        .unwrap();
    
    assert_eq!(first.thread.id, second.thread.id);
    assert_eq!(second.thread.title, "first");
    assert_eq!(client.get_messages(first.thread.id).await.unwrap().len(), 4);
    assert_eq!(client.list_threads(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_record_exchange_rejects_foreign_thread_without_writing() {
    let client = client().await;
    let alice = client.find_or_create_user("Alice").await.unwrap();
    let mallory = client.find_or_create_user("Mallory").await.unwrap();
    
    let alices = client
        .record_exchange(exchange(alice.id, None, "private"))
        .await
        .unwrap();
    
    let err = client
        .record_exchange(exchange(mallory.id, Some(alices.thread.id), "intrusion"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistError::ThreadNotFound(id) if id == alices.thread.id));
    
    assert_eq!(client.get_messages(alices.thread.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_record_exchange_for_unknown_user_leaves_no_rows() {
    let client = client().await;
    
    let err = client
        .record_exchange(exchange(4242, None, "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistError::UserNotFound(4242)));
    assert!(client.list_threads(4242).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_record_exchange_rolls_back_after_partial_write() {
    let client = client().await;
    let user = client.find_or_create_user("Alice").await.unwrap();
    
    // Let the thread and the user's message through, then fail on the reply
    sqlx::query(
        "CREATE TRIGGER reject_replies BEFORE INSERT ON messages \
         WHEN NEW.response_to_id IS NOT NULL \
         BEGIN SELECT RAISE(ABORT, 'replies rejected'); END",
    )
    .execute(client.pool())
    .await
    .unwrap();
    
    let err = client
        .record_exchange(exchange(user.id, None, "doomed"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistError::Database(_)));
    
    assert!(client.list_threads(user.id).await.unwrap().is_empty());
    let messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(client.pool())
        .await
        .unwrap();
    assert_eq!(messages, 0);
    let threads: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM threads")
        .fetch_one(client.pool())
        .await
        .unwrap();
    assert_eq!(threads, 0);
}

#[tokio::test]
async fn test_thread_lookup_is_owner_scoped() {
    let client = client().await;
    let alice = client.find_or_create_user("Alice").await.unwrap();
    let bob = client.find_or_create_user("Bob").await.unwrap();
    
    let created = client
        .record_exchange(exchange(alice.id, None, "mine"))
        .await
        .unwrap();
    
    assert!(client.get_thread(created.thread.id, alice.id).await.unwrap().is_some());
    assert!(client.get_thread(created.thread.id, bob.id).await.unwrap().is_none());
    assert!(client.list_threads(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_thread_cascades_messages() {
    let client = client().await;
    let user = client.find_or_create_user("Alice").await.unwrap();
    let created = client
        .record_exchange(exchange(user.id, None, "short lived"))
        .await
        .unwrap();
    
    assert!(client.delete_thread(created.thread.id, user.id).await.unwrap());
    assert!(client.get_messages(created.thread.id).await.unwrap().is_empty());
    assert!(client.list_threads(user.id).await.unwrap().is_empty());
    
    // Second delete finds nothing
    assert!(!client.delete_thread(created.thread.id, user.id).await.unwrap());
}

#[tokio::test]
async fn test_list_threads_keeps_insertion_order() {
    let client = client().await;
    let user = client.find_or_create_user("Alice").await.unwrap();
    
    for text in ["one", "two", "three"] {
        client.record_exchange(exchange(user.id, None, text)).await.unwrap();
    }
    
    let titles: Vec<String> = client
        .list_threads(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
    
    let again: Vec<String> = client
        .list_threads(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, again);
}

#[tokio::test]
async fn test_ping() {
    let client = client().await;
    client.ping().await.unwrap();
}

#[tokio::test]
async fn test_builder_requires_database_url() {
    let err = PersistClientBuilder::new().build().await.err().unwrap();
    assert!(matches!(err, PersistError::Internal(_)));
}
