use std::collections::HashSet;
use std::sync::Arc;

use pinhole_core::{Alphabet, Error, GenerationRequest, Scope, UniqueStore};
use pinhole_generator::IdGenerator;
use pinhole_resolver::{assign_unique, CollisionResolver, ResolverSettings};
use pinhole_storage::InMemoryStore;

fn scope() -> Scope {
    Scope::new("links", "public_id")
}

fn tiny_generator() -> IdGenerator {
    let request = GenerationRequest::builder()
        .length(1)
        .alphabet(Alphabet::new("ab").unwrap())
        .build();
    IdGenerator::new(request).unwrap()
}

#[tokio::test]
async fn concurrent_claims_are_unique() {
    let resolver = CollisionResolver::new(
        InMemoryStore::new(),
        IdGenerator::default(),
        ResolverSettings::default(),
    )
    .unwrap();

    let mut handles = vec![];
    for _ in 0..200 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            resolver.claim_unique(&scope()).await.unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap();
        assert_eq!(id.len(), 18);
        assert!(ids.insert(id));
    }

    assert_eq!(resolver.backend().len(), 200);
}

#[tokio::test]
async fn exhausted_space_fails_with_generation_error() {
    let settings = ResolverSettings::builder().max_attempts(64).build();
    let resolver =
        CollisionResolver::new(InMemoryStore::new(), tiny_generator(), settings).unwrap();

    let first = resolver.claim_unique(&scope()).await.unwrap();
    let second = resolver.claim_unique(&scope()).await.unwrap();
    assert_ne!(first, second);

    let err = resolver.claim_unique(&scope()).await.unwrap_err();
    assert_eq!(err, Error::Generation { attempts: 64 });

    // Other scopes are unaffected.
    let other = Scope::new("users", "public_id");
    assert!(resolver.claim_unique(&other).await.is_ok());
}

#[tokio::test]
async fn assign_unique_skips_taken_values() {
    let store = Arc::new(InMemoryStore::new());
    let request = GenerationRequest::builder()
        .length(1)
        .alphabet(Alphabet::new("ab").unwrap())
        .build();

    store
        .claim(&scope(), &pinhole_core::Identifier::new_unchecked("a"))
        .await
        .unwrap();

    let id = assign_unique(store.as_ref(), &request, &scope(), 64)
        .await
        .unwrap();
    assert_eq!(id.as_str(), "b");

    // Nothing was written by the check-only path.
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn shared_store_between_resolvers() {
    let store = Arc::new(InMemoryStore::new());
    let settings = ResolverSettings::builder().max_attempts(64).build();

    let left =
        CollisionResolver::from_shared(Arc::clone(&store), Arc::new(tiny_generator()), settings)
            .unwrap();
    let right =
        CollisionResolver::from_shared(Arc::clone(&store), Arc::new(tiny_generator()), settings)
            .unwrap();

    let a = left.claim_unique(&scope()).await.unwrap();
    let b = right.claim_unique(&scope()).await.unwrap();

    assert_ne!(a, b);
    assert!(matches!(
        left.claim_unique(&scope()).await,
        Err(Error::Generation { .. })
    ));
}
