//! Integration tests for the PostgreSQL repository layer
//!
//! These tests verify that the PostgreSQL adapters honour the same contracts
//! as the in-memory ones: unique emails, atomic view counting, owner-only
//! status writes and deterministic ordering. Each test is skipped when
//! `DATABASE_URL` is not set.

use std::sync::Arc;

use marketplace_api::domain::listing::{Listing, ListingDraft, ListingId, ListingStatus, SellerSnapshot};
use marketplace_api::domain::repositories::{
    ListingCriteria, ListingRepository, RepositoryError, StatusUpdate, User, UserRepository,
};
use marketplace_api::domain::user::value_objects::Email;
use marketplace_api::infrastructure::repositories::{
    PostgresListingRepository, PostgresUserRepository,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Set up test database connection pool, or `None` when no database is configured
async fn setup_test_db() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL repository test");
        return None;
    };

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

fn seller() -> SellerSnapshot {
    let id = Uuid::new_v4();
    SellerSnapshot {
        id,
        name: format!("seller-{}", id.simple()),
        email: format!("seller-{}@company.com", id.simple()),
    }
}

fn listing(seller: &SellerSnapshot, title: &str) -> Listing {
    let valid = ListingDraft {
        title: Some(title.to_string()),
        category: Some("Books".to_string()),
        price: Some(json!("19.99")),
        location: Some("Library".to_string()),
        description: Some("Hardcover, signed by the author".to_string()),
        images: Some(vec!["front".to_string(), "back".to_string()]),
    }
    .validate()
    .expect("valid draft");

    Listing::new(valid, seller.clone())
}

/// Same listing pinned to a fixed creation instant
fn listing_at(seller: &SellerSnapshot, title: &str, at: DateTime<Utc>) -> Listing {
    let base = listing(seller, title);
    Listing::from_persistence(
        base.id(),
        base.title().to_string(),
        base.category(),
        base.price(),
        base.location().to_string(),
        base.description().to_string(),
        base.images().to_vec(),
        base.seller().clone(),
        base.status(),
        base.views(),
        at,
        at,
    )
}

/// Clean up listings created by a test seller
async fn cleanup_seller(pool: &PgPool, seller_id: Uuid) {
    sqlx::query("DELETE FROM listings WHERE seller_id = $1")
        .bind(seller_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup listings");
}

async fn cleanup_user(pool: &PgPool, user_id: Uuid) {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup user");
}

#[tokio::test]
async fn test_user_repository_create_and_find() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = PostgresUserRepository::new(pool.clone());

    let email = Email::new(format!("repo-{}@company.com", Uuid::new_v4().simple())).unwrap();
    let user = User::new("Repo User".to_string(), email.clone(), Some("hash".to_string()));
    let user_id = repo.create(user).await.expect("create user");

    let found = repo.find_by_email(&email).await.unwrap().expect("found by email");
    assert_eq!(found.id, user_id);
    assert_eq!(found.name, "Repo User");
    assert_eq!(found.password_hash.as_deref(), Some("hash"));

    let found = repo.find_by_id(user_id).await.unwrap().expect("found by id");
    assert_eq!(found.email, email);

    cleanup_user(&pool, user_id).await;
}

#[tokio::test]
async fn test_user_repository_rejects_duplicate_email() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = PostgresUserRepository::new(pool.clone());

    let email = Email::new(format!("dup-{}@company.com", Uuid::new_v4().simple())).unwrap();
    let user_id = repo
        .create(User::new("First".to_string(), email.clone(), None))
        .await
        .unwrap();

    let err = repo
        .create(User::new("Second".to_string(), email, None))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Duplicate(_)));

    cleanup_user(&pool, user_id).await;
}

#[tokio::test]
async fn test_listing_insert_and_find() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = PostgresListingRepository::new(pool.clone());
    let seller = seller();
    let listing = listing(&seller, "Dune");

    repo.insert(&listing).await.expect("insert listing");

    let found = repo.find_by_id(listing.id()).await.unwrap().expect("found");
    assert_eq!(found.title(), "Dune");
    assert_eq!(found.price(), listing.price());
    assert_eq!(found.images().to_vec(), listing.images().to_vec());
    assert_eq!(found.seller(), &seller);
    assert_eq!(found.status(), ListingStatus::Active);
    assert_eq!(found.views(), 0);

    assert!(repo.find_by_id(ListingId::new()).await.unwrap().is_none());

    cleanup_seller(&pool, seller.id).await;
}

#[tokio::test]
async fn test_concurrent_view_increments_are_not_lost() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = Arc::new(PostgresListingRepository::new(pool.clone()));
    let seller = seller();
    let listing = listing(&seller, "Neuromancer");
    repo.insert(&listing).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let repo = repo.clone();
        let id = listing.id();
        tasks.spawn(async move { repo.increment_views(id).await });
    }
    while let Some(result) = tasks.join_next().await {
        assert!(result.unwrap().unwrap().is_some());
    }

    let found = repo.find_by_id(listing.id()).await.unwrap().unwrap();
    assert_eq!(found.views(), 20);

    assert!(repo.increment_views(ListingId::new()).await.unwrap().is_none());

    cleanup_seller(&pool, seller.id).await;
}

#[tokio::test]
async fn test_status_update_is_owner_conditional() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = PostgresListingRepository::new(pool.clone());
    let seller = seller();
    let listing = listing(&seller, "Snow Crash");
    repo.insert(&listing).await.unwrap();

    let later = listing.updated_at() + chrono::Duration::seconds(1);

    let outcome = repo
        .update_status(listing.id(), Uuid::new_v4(), ListingStatus::Sold, later)
        .await
        .unwrap();
    assert_eq!(outcome, StatusUpdate::NotOwner);
    let unchanged = repo.find_by_id(listing.id()).await.unwrap().unwrap();
    assert_eq!(unchanged.status(), ListingStatus::Active);

    let outcome = repo
        .update_status(ListingId::new(), seller.id, ListingStatus::Sold, later)
        .await
        .unwrap();
    assert_eq!(outcome, StatusUpdate::NotFound);

    let outcome = repo
        .update_status(listing.id(), seller.id, ListingStatus::Sold, later)
        .await
        .unwrap();
    assert_eq!(outcome, StatusUpdate::Updated);
    let updated = repo.find_by_id(listing.id()).await.unwrap().unwrap();
    assert_eq!(updated.status(), ListingStatus::Sold);
    assert!(updated.updated_at() > listing.updated_at());

    cleanup_seller(&pool, seller.id).await;
}

#[tokio::test]
async fn test_list_filters_and_orders_newest_first() {
    let Some(pool) = setup_test_db().await else { return };
    let repo = PostgresListingRepository::new(pool.clone());
    let seller = seller();

    let first = listing(&seller, "First");
    let second = listing(&seller, "Second");
    let third = listing(&seller, "Third");
    for l in [&first, &second, &third] {
        repo.insert(l).await.unwrap();
    }
    repo.update_status(second.id(), seller.id, ListingStatus::Sold, second.updated_at())
        .await
        .unwrap();

    let mine = repo
        .list(&ListingCriteria {
            status: None,
            seller_id: Some(seller.id),
        })
        .await
        .unwrap();
    let ids: Vec<ListingId> = mine.iter().map(|l| l.id()).collect();
    assert_eq!(ids, vec![third.id(), second.id(), first.id()]);

    let sold = repo
        .list(&ListingCriteria {
            status: Some(ListingStatus::Sold),
            seller_id: Some(seller.id),
        })
        .await
        .unwrap();
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].id(), second.id());

    cleanup_seller(&pool, seller.id).await;

    // Equal creation instants fall back to insertion order, newest first
    let tied_seller = self::seller();
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let tied: Vec<Listing> = ["Lamp A", "Lamp B", "Lamp C"]
        .iter()
        .map(|title| listing_at(&tied_seller, title, at))
        .collect();
    for l in &tied {
        repo.insert(l).await.unwrap();
    }

    let listed = repo
        .list(&ListingCriteria {
            status: None,
            seller_id: Some(tied_seller.id),
        })
        .await
        .unwrap();
    let ids: Vec<ListingId> = listed.iter().map(|l| l.id()).collect();
    assert_eq!(ids, vec![tied[2].id(), tied[1].id(), tied[0].id()]);

    cleanup_seller(&pool, tied_seller.id).await;
}
