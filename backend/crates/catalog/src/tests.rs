//! Catalog crate integration tests
//!
//! Exercise the services end to end against the in-memory store, plus
//! one scenario that runs the whole register/login/own/deny loop
//! together with the auth crate.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::config::CatalogConfig;
use crate::application::movies::{MovieInput, MovieService};
use crate::application::ratings::RatingService;
use crate::domain::value_object::UserId;
use crate::error::CatalogError;
use crate::infra::memory::InMemoryCatalogStore;

fn movie_input(title: &str) -> MovieInput {
    MovieInput {
        title: title.to_string(),
        genre: "Sci-Fi".to_string(),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
        description: "A hacker learns the truth about his reality.".to_string(),
    }
}

struct Harness {
    store: Arc<InMemoryCatalogStore>,
    config: Arc<CatalogConfig>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    fn with_config(config: CatalogConfig) -> Self {
        Self {
            store: Arc::new(InMemoryCatalogStore::new()),
            config: Arc::new(config),
        }
    }

    fn movies(&self) -> MovieService<InMemoryCatalogStore> {
        MovieService::new(self.store.clone(), self.config.clone())
    }

    fn ratings(&self) -> RatingService<InMemoryCatalogStore> {
        RatingService::new(self.store.clone())
    }
}

// ============================================================================
// Ownership
// ============================================================================

#[tokio::test]
async fn create_requires_identity_and_assigns_owner_from_it() {
    let h = Harness::new();

    let denied = h.movies().create(None, movie_input("The Matrix")).await;
    assert!(matches!(denied, Err(CatalogError::Unauthenticated)));

    let alice = UserId::new();
    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();

    // Owner comes from the session identity; the input carries none
    assert_eq!(movie.owner_id, alice);
}

#[tokio::test]
async fn only_the_owner_may_update_or_delete() {
    let h = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();

    // Anonymous and stranger get distinct denials
    let denied = h
        .movies()
        .update(None, &movie.movie_id, movie_input("Hijacked"))
        .await;
    assert!(matches!(denied, Err(CatalogError::Unauthenticated)));

    let denied = h
        .movies()
        .update(Some(bob), &movie.movie_id, movie_input("Hijacked"))
        .await;
    assert!(matches!(denied, Err(CatalogError::Forbidden)));

    let denied = h.movies().delete(Some(bob), &movie.movie_id).await;
    assert!(matches!(denied, Err(CatalogError::Forbidden)));

    // The owner succeeds, and ownership never moves
    let updated = h
        .movies()
        .update(Some(alice), &movie.movie_id, movie_input("The Matrix Reloaded"))
        .await
        .unwrap();
    assert_eq!(updated.owner_id, alice);
    assert_eq!(updated.title, "The Matrix Reloaded");

    h.movies().delete(Some(alice), &movie.movie_id).await.unwrap();
    let gone = h.movies().detail(Some(alice), &movie.movie_id).await;
    assert!(matches!(gone, Err(CatalogError::NotFound)));
}

#[tokio::test]
async fn members_only_policy_blocks_anonymous_reads() {
    let h = Harness::with_config(CatalogConfig::members_only());
    let alice = UserId::new();

    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();

    assert!(matches!(
        h.movies().list(None).await,
        Err(CatalogError::Unauthenticated)
    ));
    assert!(matches!(
        h.movies().detail(None, &movie.movie_id).await,
        Err(CatalogError::Unauthenticated)
    ));

    // Any signed-in user may read; ownership is irrelevant for reads
    let bob = UserId::new();
    assert_eq!(h.movies().list(Some(bob)).await.unwrap().len(), 1);
    assert!(h.movies().detail(Some(bob), &movie.movie_id).await.is_ok());
}

// ============================================================================
// Detail view
// ============================================================================

#[tokio::test]
async fn detail_aggregates_owner_name_and_ratings() {
    let h = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();
    let carol = UserId::new();
    h.store.register_owner(alice, "alice");

    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();

    h.ratings().rate(Some(bob), &movie.movie_id, 4).await.unwrap();
    h.ratings().rate(Some(carol), &movie.movie_id, 5).await.unwrap();

    let detail = h.movies().detail(Some(bob), &movie.movie_id).await.unwrap();
    assert_eq!(detail.owner_username.as_deref(), Some("alice"));
    assert_eq!(detail.ratings.len(), 2);
    assert_eq!(detail.average_rating, Some(4.5));
    assert!(detail.user_has_rated);

    let detail = h.movies().detail(Some(alice), &movie.movie_id).await.unwrap();
    assert!(!detail.user_has_rated);

    let detail = h.movies().detail(None, &movie.movie_id).await.unwrap();
    assert!(!detail.user_has_rated);
}

// ============================================================================
// Ratings
// ============================================================================

#[tokio::test]
async fn rating_rules() {
    let h = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();

    // Identity required
    assert!(matches!(
        h.ratings().rate(None, &movie.movie_id, 4).await,
        Err(CatalogError::Unauthenticated)
    ));

    // Bounds enforced
    for value in [0u8, 6] {
        assert!(matches!(
            h.ratings().rate(Some(bob), &movie.movie_id, value).await,
            Err(CatalogError::Validation(_))
        ));
    }

    // Unknown movie
    let missing = crate::domain::value_object::MovieId::new();
    assert!(matches!(
        h.ratings().rate(Some(bob), &missing, 4).await,
        Err(CatalogError::NotFound)
    ));

    // Once per user per movie
    h.ratings().rate(Some(bob), &movie.movie_id, 4).await.unwrap();
    assert!(matches!(
        h.ratings().rate(Some(bob), &movie.movie_id, 5).await,
        Err(CatalogError::AlreadyRated)
    ));
}

#[tokio::test]
async fn deleting_a_movie_removes_its_ratings() {
    let h = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();

    let movie = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();
    h.ratings().rate(Some(bob), &movie.movie_id, 4).await.unwrap();

    h.movies().delete(Some(alice), &movie.movie_id).await.unwrap();

    // A fresh movie under the same users starts with a clean slate
    let again = h
        .movies()
        .create(Some(alice), movie_input("The Matrix"))
        .await
        .unwrap();
    let detail = h.movies().detail(Some(bob), &again.movie_id).await.unwrap();
    assert!(detail.ratings.is_empty());
    assert!(!detail.user_has_rated);
}

// ============================================================================
// Full scenario across auth and catalog
// ============================================================================

#[tokio::test]
async fn register_login_own_and_deny_end_to_end() {
    use auth::application::config::AuthConfig;
    use auth::application::register::{RegisterInput, RegisterUseCase};
    use auth::application::session::SessionManager;
    use auth::application::sign_in::{SignInInput, SignInUseCase};
    use auth::error::AuthError;
    use auth::infra::memory::InMemoryAuthStore;

    let auth_store = Arc::new(InMemoryAuthStore::new());
    let auth_config = Arc::new(AuthConfig::development());
    let sessions = SessionManager::new(auth_store.clone(), auth_config.clone());
    let register =
        RegisterUseCase::new(auth_store.clone(), sessions.clone(), auth_config.clone());
    let sign_in = SignInUseCase::new(auth_store.clone(), sessions.clone(), auth_config.clone());

    let catalog = Harness::new();

    let registration = |name: &str| RegisterInput {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: "sturdy passphrase 42".to_string(),
        confirm_password: "sturdy passphrase 42".to_string(),
        current_session: None,
    };

    // Register alice; her session resolves to her identity
    let alice = register.execute(registration("alice")).await.unwrap();
    let alice_id = sessions
        .resolve_current_user(&alice.session.session_id)
        .await
        .unwrap()
        .expect("alice must be signed in");
    assert_eq!(alice_id, alice.user.user_id);

    // A wrong-password login attempt changes nothing
    let failed = sign_in
        .execute(SignInInput {
            identifier: "alice".to_string(),
            password: "wrong passphrase 42".to_string(),
            current_session: Some(alice.session.session_id.clone()),
        })
        .await;
    assert!(matches!(failed, Err(AuthError::InvalidCredentials)));
    assert_eq!(
        sessions
            .resolve_current_user(&alice.session.session_id)
            .await
            .unwrap(),
        Some(alice_id)
    );

    // Alice creates a movie through her session identity
    let movie = catalog
        .movies()
        .create(Some(alice_id), movie_input("The Matrix"))
        .await
        .unwrap();
    assert_eq!(movie.owner_id, alice_id);

    // Bob cannot delete it
    let bob = register.execute(registration("bob")).await.unwrap();
    let bob_id = bob.user.user_id;
    assert!(matches!(
        catalog.movies().delete(Some(bob_id), &movie.movie_id).await,
        Err(CatalogError::Forbidden)
    ));

    // After logout alice's session is gone, and anonymous deletion is a
    // different denial than bob's
    sessions.clear(&alice.session.session_id).await.unwrap();
    let current = sessions
        .resolve_current_user(&alice.session.session_id)
        .await
        .unwrap();
    assert_eq!(current, None);

    assert!(matches!(
        catalog.movies().delete(current, &movie.movie_id).await,
        Err(CatalogError::Unauthenticated)
    ));

    // The movie is untouched
    assert!(catalog.movies().detail(None, &movie.movie_id).await.is_ok());
}
