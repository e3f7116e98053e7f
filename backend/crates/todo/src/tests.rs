//! Crate-level tests for the to-do flows
//!
//! Use cases run against an in-memory repository; router tests authenticate
//! with real tokens issued by the account module.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use account::domain::entity::{account::Account, revoked_token::RevokedToken};
    use account::domain::repository::{AccountRepository, RevokedTokenRepository};
    use account::domain::value_object::{
        account_password::{AccountPassword, RawPassword},
        email::Email,
        person_name::PersonName,
        token_claims::{TokenClaims, TokenType},
    };
    use account::{AccountAppState, AccountConfig, AccountResult, AuthenticatedAccount};
    use chrono::{Duration, Utc};
    use kernel::id::{AccountId, TodoId};
    use uuid::Uuid;

    use crate::domain::entities::{OwnedTodo, TodoItem};
    use crate::domain::repository::TodoRepository;
    use crate::error::TodoResult;

    /// To-do store that resolves owner names like the SQL join does
    #[derive(Clone, Default)]
    pub struct InMemoryTodoRepository {
        items: Arc<Mutex<Vec<TodoItem>>>,
        names: Arc<Mutex<HashMap<AccountId, String>>>,
    }

    impl InMemoryTodoRepository {
        pub fn register_owner(&self, account: &Account) {
            self.names
                .lock()
                .unwrap()
                .insert(account.account_id, account.display_name());
        }

        pub fn count(&self) -> usize {
            self.items.lock().unwrap().len()
        }

        fn owned(&self, item: TodoItem) -> OwnedTodo {
            let owner_name = self
                .names
                .lock()
                .unwrap()
                .get(&item.owner_id)
                .cloned()
                .unwrap_or_default();
            OwnedTodo { item, owner_name }
        }
    }

    impl TodoRepository for InMemoryTodoRepository {
        async fn create(&self, todo: &TodoItem) -> TodoResult<()> {
            self.items.lock().unwrap().push(todo.clone());
            Ok(())
        }

        async fn find_by_id(&self, todo_id: &TodoId) -> TodoResult<Option<OwnedTodo>> {
            let item = self
                .items
                .lock()
                .unwrap()
                .iter()
                .find(|t| &t.id == todo_id)
                .cloned();
            Ok(item.map(|item| self.owned(item)))
        }

        async fn list_by_owner(&self, owner_id: &AccountId) -> TodoResult<Vec<OwnedTodo>> {
            // Later inserts first, then a stable sort keeps that order on ties
            let mut items: Vec<TodoItem> = self
                .items
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|t| &t.owner_id == owner_id)
                .cloned()
                .collect();
            items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(items.into_iter().map(|item| self.owned(item)).collect())
        }

        async fn update(&self, todo: &TodoItem) -> TodoResult<()> {
            let mut items = self.items.lock().unwrap();
            if let Some(existing) = items.iter_mut().find(|t| t.id == todo.id) {
                *existing = todo.clone();
            }
            Ok(())
        }

        async fn delete(&self, todo_id: &TodoId) -> TodoResult<bool> {
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|t| &t.id != todo_id);
            Ok(items.len() != before)
        }
    }

    /// Account store backing the auth middleware in router tests
    #[derive(Clone, Default)]
    pub struct InMemoryAccounts {
        accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
        revoked: Arc<Mutex<HashMap<Uuid, RevokedToken>>>,
    }

    impl InMemoryAccounts {
        pub fn insert(&self, account: &Account) {
            self.accounts
                .lock()
                .unwrap()
                .insert(account.account_id, account.clone());
        }

        pub fn deactivate(&self, account_id: &AccountId) {
            if let Some(account) = self.accounts.lock().unwrap().get_mut(account_id) {
                account.is_active = false;
            }
        }
    }

    impl AccountRepository for InMemoryAccounts {
        async fn create(&self, account: &Account) -> AccountResult<()> {
            self.accounts
                .lock()
                .unwrap()
                .insert(account.account_id, account.clone());
            Ok(())
        }

        async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
            Ok(self.accounts.lock().unwrap().get(account_id).cloned())
        }

        async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .values()
                .find(|a| &a.email == email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .values()
                .any(|a| &a.email == email))
        }

        async fn update(&self, account: &Account) -> AccountResult<()> {
            self.create(account).await
        }
    }

    impl RevokedTokenRepository for InMemoryAccounts {
        async fn revoke(&self, token: &RevokedToken) -> AccountResult<()> {
            self.revoked
                .lock()
                .unwrap()
                .entry(token.jti)
                .or_insert_with(|| token.clone());
            Ok(())
        }

        async fn is_revoked(&self, jti: Uuid) -> AccountResult<bool> {
            Ok(self.revoked.lock().unwrap().contains_key(&jti))
        }

        async fn cleanup_expired(&self) -> AccountResult<u64> {
            let mut revoked = self.revoked.lock().unwrap();
            let before = revoked.len();
            let now = Utc::now();
            revoked.retain(|_, token| token.expires_at >= now);
            Ok((before - revoked.len()) as u64)
        }
    }

    pub fn account(firstname: &str, lastname: &str, email: &str) -> Account {
        let password = AccountPassword::from_raw(&RawPassword::for_login("AAbbcc12!".to_string()), None)
            .unwrap();
        Account::new(
            PersonName::from_db(firstname),
            PersonName::from_db(lastname),
            Email::from_db(email),
            password,
        )
    }

    /// Identity the auth middleware would attach for `account`
    pub fn caller(account: &Account) -> AuthenticatedAccount {
        AuthenticatedAccount {
            account_id: account.account_id,
            firstname: account.firstname.as_str().to_string(),
            lastname: account.lastname.as_str().to_string(),
            claims: TokenClaims::new(account, TokenType::Access, Duration::minutes(5)),
        }
    }

    pub fn auth_state() -> AccountAppState<InMemoryAccounts> {
        AccountAppState::new(InMemoryAccounts::default(), AccountConfig::with_random_secret())
            .unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::TodoId;

    use super::support::*;
    use crate::application::*;
    use crate::domain::value_objects::{DATE_FORMAT, Priority};
    use crate::error::TodoError;

    fn tomorrow() -> String {
        (Utc::now().date_naive() + Duration::days(1))
            .format(DATE_FORMAT)
            .to_string()
    }

    fn input(title: &str) -> AddTodoInput {
        AddTodoInput {
            title: Some(title.to_string()),
            description: Some("Details".to_string()),
            priority: Some("high".to_string()),
            due_date: Some(tomorrow()),
            time: Some("09:30".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_todo_is_open_and_owned_by_caller() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let use_case = AddTodoUseCase::new(repo.clone());

        let todo = use_case.execute(&caller(&ada), input("Write notes")).await.unwrap();

        assert!(!todo.item.completed);
        assert_eq!(todo.item.owner_id, ada.account_id);
        assert_eq!(todo.owner_name, "Ada Lovelace");
        assert_eq!(todo.item.priority, Priority::High);
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_add_todo_defaults_priority_to_low() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");

        let mut req = input("Write notes");
        req.priority = None;
        let todo = AddTodoUseCase::new(repo)
            .execute(&caller(&ada), req)
            .await
            .unwrap();

        assert_eq!(todo.item.priority, Priority::Low);
    }

    #[tokio::test]
    async fn test_add_todo_due_date_today_accepted_yesterday_rejected() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let use_case = AddTodoUseCase::new(repo.clone());
        let today = Utc::now().date_naive();

        let mut req = input("Today");
        req.due_date = Some(today.format(DATE_FORMAT).to_string());
        assert!(use_case.execute(&caller(&ada), req).await.is_ok());

        let mut req = input("Yesterday");
        req.due_date = Some((today - Duration::days(1)).format(DATE_FORMAT).to_string());
        let Err(TodoError::Validation(errors)) = use_case.execute(&caller(&ada), req).await else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors.get("due_date"),
            Some(&["Due date cannot be in the past!".to_string()][..])
        );
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_add_todo_collects_field_errors() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");

        let req = AddTodoInput {
            priority: Some("urgent".to_string()),
            ..Default::default()
        };
        let Err(TodoError::Validation(errors)) =
            AddTodoUseCase::new(repo).execute(&caller(&ada), req).await
        else {
            panic!("expected validation error");
        };

        assert!(errors.get("title").is_some());
        assert!(errors.get("due_date").is_some());
        assert!(errors.get("time").is_some());
        assert_eq!(
            errors.get("priority"),
            Some(&["Invalid priority level!".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_caller_newest_first() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let alan = account("Alan", "Turing", "alan@example.com");
        let add = AddTodoUseCase::new(repo.clone());

        for title in ["first", "second", "third"] {
            add.execute(&caller(&ada), input(title)).await.unwrap();
        }
        add.execute(&caller(&alan), input("other")).await.unwrap();

        let list = ListTodosUseCase::new(repo.clone());
        let ada_todos = list.execute(&caller(&ada)).await.unwrap();
        let alan_todos = list.execute(&caller(&alan)).await.unwrap();

        assert_eq!(ada_todos.len(), 3);
        assert_eq!(alan_todos.len(), 1);
        assert_eq!(ada_todos[0].item.title.as_str(), "third");
        assert_eq!(ada_todos[2].item.title.as_str(), "first");
    }

    #[tokio::test]
    async fn test_update_applies_partial_changes() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let created = AddTodoUseCase::new(repo.clone())
            .execute(&caller(&ada), input("Draft"))
            .await
            .unwrap();

        let update = UpdateTodoUseCase::new(repo.clone(), Arc::new(TodoConfig::default()));
        let changes = UpdateTodoInput {
            title: Some("Final".to_string()),
            description: Some(None),
            ..Default::default()
        };
        let updated = update
            .execute(&caller(&ada), &created.item.id, changes)
            .await
            .unwrap();

        assert_eq!(updated.item.title.as_str(), "Final");
        assert!(updated.item.description.is_none());
        assert_eq!(updated.item.priority, Priority::High);
        assert!(updated.item.updated_at >= created.item.updated_at);
    }

    #[tokio::test]
    async fn test_complete_and_delete_missing_todo() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let config = Arc::new(TodoConfig::default());
        let missing = TodoId::new();
        let existing = AddTodoUseCase::new(repo.clone())
            .execute(&caller(&ada), input("Untouched"))
            .await
            .unwrap();

        let complete = CompleteTodoUseCase::new(repo.clone(), config.clone());
        assert!(matches!(
            complete.execute(&caller(&ada), &missing).await,
            Err(TodoError::NotFound)
        ));

        let delete = DeleteTodoUseCase::new(repo.clone(), config);
        assert!(matches!(
            delete.execute(&caller(&ada), &missing).await,
            Err(TodoError::NotFound)
        ));

        assert_eq!(repo.count(), 1);
        let stored = GetTodoUseCase::new(repo)
            .execute(&existing.item.id)
            .await
            .unwrap();
        assert!(!stored.item.completed);
        assert_eq!(stored.item.updated_at, existing.item.updated_at);
        assert_eq!(stored.item.title.as_str(), "Untouched");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let created = AddTodoUseCase::new(repo.clone())
            .execute(&caller(&ada), input("Gone soon"))
            .await
            .unwrap();

        DeleteTodoUseCase::new(repo.clone(), Arc::new(TodoConfig::default()))
            .execute(&caller(&ada), &created.item.id)
            .await
            .unwrap();

        assert!(matches!(
            GetTodoUseCase::new(repo).execute(&created.item.id).await,
            Err(TodoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_ownership_enforcement() {
        let repo = Arc::new(InMemoryTodoRepository::default());
        let ada = account("Ada", "Lovelace", "ada@example.com");
        let alan = account("Alan", "Turing", "alan@example.com");
        let created = AddTodoUseCase::new(repo.clone())
            .execute(&caller(&ada), input("Private"))
            .await
            .unwrap();

        let scoped = CompleteTodoUseCase::new(repo.clone(), Arc::new(TodoConfig::owner_scoped()));
        assert!(matches!(
            scoped.execute(&caller(&alan), &created.item.id).await,
            Err(TodoError::NotFound)
        ));

        let open = CompleteTodoUseCase::new(repo.clone(), Arc::new(TodoConfig::default()));
        let completed = open.execute(&caller(&alan), &created.item.id).await.unwrap();
        assert!(completed.item.completed);
        assert_eq!(completed.item.owner_id, ada.account_id);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use chrono::{Duration, Utc};
    use kernel::id::AccountId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;
    use crate::application::config::TodoConfig;
    use crate::domain::value_objects::DATE_FORMAT;
    use crate::presentation::router::todo_router;

    struct Fixture {
        app: Router,
        accounts: InMemoryAccounts,
        ada: AccountId,
        ada_token: String,
        alan_token: String,
    }

    fn fixture(config: TodoConfig) -> Fixture {
        let auth = auth_state();
        let repo = InMemoryTodoRepository::default();

        let ada = account("Ada", "Lovelace", "ada@example.com");
        let alan = account("Alan", "Turing", "alan@example.com");
        repo.register_owner(&ada);
        repo.register_owner(&alan);
        auth.repo.insert(&ada);
        auth.repo.insert(&alan);

        let ada_token = auth.issuer.issue_pair(&ada).unwrap().access_token;
        let alan_token = auth.issuer.issue_pair(&alan).unwrap().access_token;

        Fixture {
            accounts: auth.repo.as_ref().clone(),
            app: todo_router(repo, config, auth),
            ada: ada.account_id,
            ada_token,
            alan_token,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn new_todo(title: &str) -> Value {
        let due = (Utc::now().date_naive() + Duration::days(2))
            .format(DATE_FORMAT)
            .to_string();
        json!({
            "title": title,
            "description": "Details",
            "due_date": due,
            "time": "14:00",
        })
    }

    async fn add(fx: &Fixture, token: &str, body: Value) -> Value {
        let response = send(&fx.app, request("POST", "/add", Some(token), Some(body))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_add_ignores_client_completed_and_owner() {
        let fx = fixture(TodoConfig::default());

        let mut body = new_todo("Read");
        body["completed"] = json!(true);
        body["user"] = json!("Alan Turing");
        let created = add(&fx, &fx.ada_token, body).await;

        assert_eq!(created["completed"], false);
        assert_eq!(created["user"], "Ada Lovelace");
        assert_eq!(created["priority"], "low");
        assert_eq!(created["time"], "14:00:00");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let fx = fixture(TodoConfig::default());

        for (method, uri) in [
            ("POST", "/add"),
            ("GET", "/get"),
            ("PATCH", "/complete/00000000-0000-0000-0000-000000000000"),
            ("DELETE", "/delete/00000000-0000-0000-0000-000000000000"),
        ] {
            let response = send(&fx.app, request(method, uri, None, None)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        }
    }

    #[tokio::test]
    async fn test_deactivated_account_cannot_add() {
        let fx = fixture(TodoConfig::default());
        fx.accounts.deactivate(&fx.ada);

        let response = send(
            &fx.app,
            request("POST", "/add", Some(&fx.ada_token), Some(new_todo("Blocked"))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(
            &fx.app,
            request("POST", "/add", Some(&fx.alan_token), Some(new_todo("Allowed"))),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_token_of_unknown_account_is_rejected() {
        let auth = auth_state();
        let ghost = account("Grace", "Hopper", "grace@example.com");
        let token = auth.issuer.issue_pair(&ghost).unwrap().access_token;
        let app = todo_router(InMemoryTodoRepository::default(), TodoConfig::default(), auth);

        let response = send(&app, request("POST", "/add", Some(&token), Some(new_todo("x")))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_is_scoped_per_account() {
        let fx = fixture(TodoConfig::default());

        for title in ["a", "b", "c"] {
            add(&fx, &fx.ada_token, new_todo(title)).await;
        }
        add(&fx, &fx.alan_token, new_todo("d")).await;

        let response = send(&fx.app, request("GET", "/get", Some(&fx.ada_token), None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["title"], "c");

        let response = send(&fx.app, request("GET", "/get", Some(&fx.alan_token), None)).await;
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_is_public_and_unknown_ids_are_not_found() {
        let fx = fixture(TodoConfig::default());
        let created = add(&fx, &fx.ada_token, new_todo("Public")).await;
        let id = created["id"].as_str().unwrap();

        let response = send(&fx.app, request("GET", &format!("/get/{}", id), None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["title"], "Public");

        let response = send(&fx.app, request("GET", "/get/not-a-uuid", None, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_complete_delete_flow() {
        let fx = fixture(TodoConfig::default());
        let created = add(&fx, &fx.ada_token, new_todo("Flow")).await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &fx.app,
            request(
                "PATCH",
                &format!("/update/{}", id),
                Some(&fx.ada_token),
                Some(json!({"priority": "medium", "description": null})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["priority"], "medium");
        assert!(body["description"].is_null());
        assert_eq!(body["title"], "Flow");

        let response = send(
            &fx.app,
            request("PATCH", &format!("/complete/{}", id), Some(&fx.ada_token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["completed"], true);

        let response = send(
            &fx.app,
            request("DELETE", &format!("/delete/{}", id), Some(&fx.ada_token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&fx.app, request("GET", &format!("/get/{}", id), None, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "ToDo not found");
    }

    #[tokio::test]
    async fn test_update_rejects_past_due_date() {
        let fx = fixture(TodoConfig::default());
        let created = add(&fx, &fx.ada_token, new_todo("Late")).await;
        let id = created["id"].as_str().unwrap();
        let yesterday = (Utc::now().date_naive() - Duration::days(1))
            .format(DATE_FORMAT)
            .to_string();

        let response = send(
            &fx.app,
            request(
                "PATCH",
                &format!("/update/{}", id),
                Some(&fx.ada_token),
                Some(json!({"due_date": yesterday})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["errors"]["due_date"][0],
            "Due date cannot be in the past!"
        );
    }

    #[tokio::test]
    async fn test_owner_scoped_mutations_hide_foreign_todos() {
        let fx = fixture(TodoConfig::owner_scoped());
        let created = add(&fx, &fx.ada_token, new_todo("Mine")).await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &fx.app,
            request("DELETE", &format!("/delete/{}", id), Some(&fx.alan_token), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&fx.app, request("GET", &format!("/get/{}", id), None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
