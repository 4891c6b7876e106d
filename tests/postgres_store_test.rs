//! Runs against a real PostgreSQL database:
//! `DATABASE_URL=postgres://... cargo test --test postgres_store_test -- --ignored`

use std::env;

use application_station::database::{
    pool::{create_pool, run_migrations},
    PgStore, Store,
};
use application_station::error::Error;
use application_station::models::{
    event::EventFields,
    job::JobFields,
    user::NewAccount,
};
use chrono::{Duration, Utc};

async fn store() -> PgStore {
    dotenvy::dotenv().ok();
    let url = env::var("DATABASE_URL").expect("DATABASE_URL must be set for this test");
    let pool = create_pool(&url, 2).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    PgStore::new(pool)
}

fn unique(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

fn account(email: &str) -> NewAccount {
    NewAccount {
        username: email.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        token_key: application_station::utils::token::generate_token_key(),
    }
}

#[tokio::test]
#[ignore]
async fn registration_is_atomic() {
    let store = store().await;
    let email = unique("atomic");

    let created = store.create_account(account(&email)).await.expect("account");
    assert_eq!(created.candidate.user_id, created.user.id);
    assert_eq!(created.token.user_id, created.user.id);

    let err = store.create_account(account(&email)).await.unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));

    let found = store
        .find_user_by_token(&created.token.key)
        .await
        .expect("lookup")
        .expect("user");
    assert_eq!(found.id, created.user.id);
}

#[tokio::test]
#[ignore]
async fn job_delete_cascades_and_status_delete_is_restricted() {
    let store = store().await;
    let created = store
        .create_account(account(&unique("cascade")))
        .await
        .expect("account");
    let company = store
        .create_company(format!("pg-test-{}", created.user.id))
        .await
        .expect("company");
    let status = store.list_statuses().await.expect("statuses")[0].clone();

    let job = store
        .create_job(
            created.candidate.id,
            JobFields {
                title: "Engineer".to_string(),
                description: String::new(),
                link: String::new(),
                status_id: status.id,
                company_id: company.id,
            },
        )
        .await
        .expect("job");
    let start = Utc::now();
    let event = store
        .create_event(EventFields {
            details: "Screen".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            job_id: job.id,
        })
        .await
        .expect("event");

    let err = store.delete_status(status.id).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    let err = store.delete_company(company.id).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));

    assert!(store.delete_job(job.id).await.expect("delete job"));
    assert!(store.find_event(event.id).await.expect("find").is_none());
    assert!(store.delete_company(company.id).await.expect("delete company"));
}
