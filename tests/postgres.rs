//! Exercises the PostgreSQL stores. Needs a reachable `DATABASE_URL`:
//! `cargo test --test postgres -- --ignored`

use chrono::NaiveDate;
use dotenv::dotenv;
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use std::sync::Arc;
use taskbook::{
    auth::Caller,
    models::{NewUser, TaskInput, TaskUpdate},
    store::{PgTaskStore, PgUserStore, UserStore},
    AppError, TaskService,
};

async fn connect() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

async fn fresh_user(pool: &PgPool, username: &str) -> i32 {
    let email = format!("{}@example.com", username);
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(&email)
        .execute(pool)
        .await;

    PgUserStore::new(pool.clone())
        .insert(&NewUser {
            username: username.to_string(),
            email,
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("Failed to insert user")
        .id
}

fn input(title: &str, description: Option<&str>, due: Option<(i32, u32, u32)>) -> TaskInput {
    TaskInput {
        title: title.to_string(),
        description: description.map(str::to_string),
        due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        category: None,
    }
}

#[ignore]
#[actix_rt::test]
async fn test_pg_listing_order_and_search() {
    let pool = connect().await;
    let owner = Caller::new(fresh_user(&pool, "pg_order_user").await);
    let other = Caller::new(fresh_user(&pool, "pg_other_user").await);
    let tasks = TaskService::new(Arc::new(PgTaskStore::new(pool.clone())));

    tasks.create_task(&owner, input("undated", None, None)).await.unwrap();
    tasks.create_task(&owner, input("march", None, Some((2024, 3, 1)))).await.unwrap();
    tasks.create_task(&owner, input("january", Some("GROCERIES run"), Some((2024, 1, 1)))).await.unwrap();
    tasks.create_task(&owner, input("100% done", None, Some((2024, 2, 1)))).await.unwrap();
    tasks.create_task(&other, input("groceries", None, None)).await.unwrap();

    let titles: Vec<String> = tasks
        .list_tasks(&owner, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    assert_eq!(titles, vec!["january", "100% done", "march", "undated"]);

    let found = tasks.list_tasks(&owner, Some("groceries")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "january");

    // `%` is matched literally, not as a wildcard.
    let literal = tasks.list_tasks(&owner, Some("0%")).await.unwrap();
    assert_eq!(literal.len(), 1);
    assert_eq!(literal[0].title, "100% done");
}

#[ignore]
#[actix_rt::test]
async fn test_pg_update_and_delete() {
    let pool = connect().await;
    let owner = Caller::new(fresh_user(&pool, "pg_mutation_user").await);
    let intruder = Caller::new(fresh_user(&pool, "pg_intruder_user").await);
    let tasks = TaskService::new(Arc::new(PgTaskStore::new(pool.clone())));

    let task = tasks
        .create_task(&owner, input("draft", Some("notes"), Some((2024, 5, 1))))
        .await
        .unwrap();

    let update = TaskUpdate {
        category: Some(Some("Work".to_string())),
        ..TaskUpdate::default()
    };
    let updated = tasks.update_task(&owner, task.id, update).await.unwrap();
    assert_eq!(updated.category.as_deref(), Some("Work"));
    assert_eq!(updated.description, task.description);
    assert_eq!(updated.due_date, task.due_date);

    assert!(matches!(
        tasks.delete_task(&intruder, task.id).await,
        Err(AppError::Forbidden(_))
    ));

    tasks.delete_task(&owner, task.id).await.unwrap();
    assert!(matches!(
        tasks.get_task(task.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        tasks.delete_task(&owner, task.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[ignore]
#[actix_rt::test]
async fn test_pg_duplicate_email_is_bad_request() {
    let pool = connect().await;
    fresh_user(&pool, "pg_duplicate_user").await;

    let result = PgUserStore::new(pool)
        .insert(&NewUser {
            username: "pg_duplicate_user_2".to_string(),
            email: "pg_duplicate_user@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}
