//! In-memory store variants. The early prototype kept todos in a plain
//! process-global list; these wrap the same idea in the store traits so they
//! stay interchangeable with the Postgres variants (and back the test suite).

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{DuplicateEmail, Role, Todo, TodoPatch, TodoStore, User, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == email) {
            return Err(DuplicateEmail.into());
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: Role::User,
            is_blocked: false,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = self.users.lock().await;
        Ok(users.clone())
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.is_blocked = blocked;
            u.clone()
        }))
    }

    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }
}

#[derive(Default)]
pub struct MemoryTodoStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn create(&self, user_id: Uuid, text: &str) -> anyhow::Result<Todo> {
        let todo = Todo {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_string(),
            completed: false,
            created_at: OffsetDateTime::now_utc(),
        };
        self.todos.lock().await.push(todo.clone());
        Ok(todo)
    }

    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Todo>> {
        let todos = self.todos.lock().await;
        // Insertion order is creation order, so reversing yields newest first.
        Ok(todos
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Todo>> {
        let todos = self.todos.lock().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> anyhow::Result<Option<Todo>> {
        let mut todos = self.todos.lock().await;
        Ok(todos.iter_mut().find(|t| t.id == id).map(|t| {
            if let Some(text) = patch.text {
                t.text = text;
            }
            if let Some(completed) = patch.completed {
                t.completed = completed;
            }
            t.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut todos = self.todos.lock().await;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        Ok(todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_list_newest_first() {
        let store = MemoryTodoStore::new();
        let owner = Uuid::new_v4();
        store.create(owner, "first").await.unwrap();
        store.create(owner, "second").await.unwrap();

        let todos = store.list_by_user(owner).await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].text, "second");
        assert_eq!(todos[1].text, "first");
        assert!(todos.iter().all(|t| !t.completed));
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryTodoStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.create(a, "mine").await.unwrap();

        assert_eq!(store.list_by_user(a).await.unwrap().len(), 1);
        assert!(store.list_by_user(b).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields() {
        let store = MemoryTodoStore::new();
        let todo = store.create(Uuid::new_v4(), "buy milk").await.unwrap();

        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };
        let updated = store.update(todo.id, patch).await.unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, "buy milk");

        let patch = TodoPatch {
            text: Some("buy oat milk".into()),
            ..Default::default()
        };
        let updated = store.update(todo.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.text, "buy oat milk");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn update_and_delete_missing_id() {
        let store = MemoryTodoStore::new();
        assert!(store
            .update(Uuid::new_v4(), TodoPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_the_todo() {
        let store = MemoryTodoStore::new();
        let owner = Uuid::new_v4();
        let todo = store.create(owner, "gone soon").await.unwrap();
        assert!(store.delete(todo.id).await.unwrap());
        assert!(store.list_by_user(owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create("u@e.com", "hash").await.unwrap();
        let err = store.create("u@e.com", "hash2").await.unwrap_err();
        assert!(err.downcast_ref::<DuplicateEmail>().is_some());
    }

    #[tokio::test]
    async fn block_and_promote_round_trip() {
        let store = MemoryUserStore::new();
        let user = store.create("u@e.com", "hash").await.unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_blocked);

        let blocked = store.set_blocked(user.id, true).await.unwrap().unwrap();
        assert!(blocked.is_blocked);

        let admin = store.set_role(user.id, Role::Admin).await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);

        assert!(store.set_blocked(Uuid::new_v4(), true).await.unwrap().is_none());
    }
}
