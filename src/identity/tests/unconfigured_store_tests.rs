//! Degraded-store behaviour of the `PostgreSQL` user repository when no
//! database is configured: lookups return nothing, the upsert fails loudly.

use std::sync::Arc;

use crate::db::{Database, StoreError};
use crate::identity::{
    adapters::postgres::PostgresUserRepository,
    domain::{OpenId, UserId, UserUpsert},
    ports::UserRepository,
};
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> PostgresUserRepository {
    PostgresUserRepository::new(Arc::new(Database::unconfigured()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_reads_degrade_to_empty_results(repository: PostgresUserRepository) {
    let open_id = OpenId::new("oauth|alice").expect("valid open id");
    let by_open_id = repository
        .find_by_open_id(&open_id)
        .await
        .expect("lookup should succeed");
    assert!(by_open_id.is_none());

    let by_id = repository
        .find_by_id(UserId::new(1))
        .await
        .expect("lookup should succeed");
    assert!(by_id.is_none());

    let all = repository.list_all().await.expect("listing should succeed");
    assert!(all.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_upsert_fails_with_store_unavailable(repository: PostgresUserRepository) {
    let open_id = OpenId::new("oauth|alice").expect("valid open id");
    let upserted = repository.upsert(&UserUpsert::new(open_id)).await;
    assert!(matches!(upserted, Err(StoreError::Unavailable)));
}
