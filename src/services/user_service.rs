use std::sync::Arc;

use serde_json::{Map, Value};

use crate::database::user_store::UserStore;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::validation::validate_user_body;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let users = self.store.list_users().await?;
        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Validates the request object, then inserts exactly one row.
    ///
    /// Invalid input is rejected before the store is reached.
    pub async fn create(&self, body: &Map<String, Value>) -> Result<User> {
        let new_user = validate_user_body(body).map_err(Error::Validation)?;

        match self.store.insert_user(new_user).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "user created");
                Ok(user)
            }
            Err(Error::Conflict(msg)) => {
                tracing::warn!("rejected duplicate user: {}", msg);
                Err(Error::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::user_store::MockUserStore;
    use crate::models::user::NewUser;
    use serde_json::json;

    fn service(store: MockUserStore) -> UserService {
        UserService::new(Arc::new(store))
    }

    fn body(name: Value, email: Value) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".into(), name);
        map.insert("email".into(), email);
        map
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_store() {
        let mut store = MockUserStore::new();
        store.expect_insert_user().times(0);

        let err = service(store)
            .create(&body(json!(""), json!("not-an-email")))
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_payload_is_inserted_once_trimmed() {
        let mut store = MockUserStore::new();
        store
            .expect_insert_user()
            .withf(|u: &NewUser| u.name == "Jane" && u.email == "jane@example.com")
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 7,
                    name: u.name,
                    email: u.email,
                })
            });

        let user = service(store)
            .create(&body(json!(" Jane "), json!("jane@example.com")))
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Jane");
    }

    #[tokio::test]
    async fn wrong_typed_field_never_reaches_store() {
        let mut store = MockUserStore::new();
        store.expect_insert_user().times(0);

        let err = service(store)
            .create(&body(json!(""), json!(7)))
            .await
            .unwrap_err();

        match err {
            Error::Validation(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "name"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn conflict_is_passed_through_without_retry() {
        let mut store = MockUserStore::new();
        store
            .expect_insert_user()
            .times(1)
            .returning(|_| Err(Error::Conflict("Email already exists".into())));

        let err = service(store)
            .create(&body(json!("Jane"), json!("jane@example.com")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn list_surfaces_store_failure() {
        let mut store = MockUserStore::new();
        store
            .expect_list_users()
            .times(1)
            .returning(|| Err(Error::Unavailable("pool timed out".into())));

        let err = service(store).list().await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let mut store = MockUserStore::new();
        store.expect_list_users().returning(|| Ok(Vec::new()));

        assert!(service(store).list().await.unwrap().is_empty());
    }
}
