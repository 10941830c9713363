use pinhole_core::{
    Error, ExistenceCheck, GenerationRequest, Identifier, Result, Scope, StorageError, UniqueStore,
};
use pinhole_generator::{Generator, IdGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Attempts made when none are configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Configures a [`CollisionResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Hard cap on candidates generated per call. Not a timeout.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ResolverSettings {
    fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Configuration(
                "max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Produces identifiers that are unique within a [`Scope`].
///
/// This resolver wraps a backend and a [`Generator`] to handle:
/// - Candidate generation
/// - Existence checks against the backend, retrying on collision
/// - Optional write-time claims, where a rejected write counts as a collision
///
/// The existence check and the final write are separate operations. Only a
/// uniqueness constraint enforced by the backend makes the result race-free;
/// the retry loop just keeps write-time rejections rare.
#[derive(Debug)]
pub struct CollisionResolver<B, G> {
    backend: Arc<B>,
    generator: Arc<G>,
    settings: ResolverSettings,
}

impl<B, G> Clone for CollisionResolver<B, G> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
        }
    }
}

impl<B: ExistenceCheck, G: Generator> CollisionResolver<B, G> {
    /// Creates a resolver owning its backend and generator.
    pub fn new(backend: B, generator: G, settings: ResolverSettings) -> Result<Self> {
        Self::from_shared(Arc::new(backend), Arc::new(generator), settings)
    }

    /// Creates a resolver over a backend and generator shared with other callers.
    pub fn from_shared(
        backend: Arc<B>,
        generator: Arc<G>,
        settings: ResolverSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            backend,
            generator,
            settings,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    /// Generates a candidate that does not yet exist within `scope`.
    ///
    /// Nothing is written. Callers persisting the result must still treat a
    /// write-time uniqueness violation as a collision.
    pub async fn assign_unique(&self, scope: &Scope) -> Result<Identifier> {
        resolve(
            self.backend.as_ref(),
            self.generator.as_ref(),
            scope,
            self.settings.max_attempts,
        )
        .await
    }
}

impl<B: UniqueStore, G: Generator> CollisionResolver<B, G> {
    /// Generates a candidate and claims it within `scope`.
    ///
    /// A claim rejected by the backend's uniqueness constraint is treated as
    /// a collision and consumes an attempt.
    pub async fn claim_unique(&self, scope: &Scope) -> Result<Identifier> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate = self.generator.generate()?;

            if self.backend.exists(scope, &candidate).await? {
                debug!(scope = %scope, candidate = %candidate, attempt, "identifier collision");
                continue;
            }

            match self.backend.claim(scope, &candidate).await {
                Ok(()) => return Ok(candidate),
                Err(StorageError::Conflict(_)) => {
                    debug!(
                        scope = %scope,
                        candidate = %candidate,
                        attempt,
                        "identifier claimed concurrently, retrying"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(scope = %scope, max_attempts, "failed to claim a unique identifier");
        Err(Error::Generation {
            attempts: max_attempts,
        })
    }
}

/// Generates an identifier for `request` that does not exist within `scope`,
/// trying at most `max_attempts` candidates.
pub async fn assign_unique<B: ExistenceCheck + ?Sized>(
    backend: &B,
    request: &GenerationRequest,
    scope: &Scope,
    max_attempts: usize,
) -> Result<Identifier> {
    ResolverSettings { max_attempts }.validate()?;
    let generator = IdGenerator::new(request.clone())?;
    resolve(backend, &generator, scope, max_attempts).await
}

async fn resolve<B, G>(
    backend: &B,
    generator: &G,
    scope: &Scope,
    max_attempts: usize,
) -> Result<Identifier>
where
    B: ExistenceCheck + ?Sized,
    G: Generator,
{
    for attempt in 1..=max_attempts {
        let candidate = generator.generate()?;

        if !backend.exists(scope, &candidate).await? {
            return Ok(candidate);
        }

        debug!(scope = %scope, candidate = %candidate, attempt, "identifier collision");
    }

    warn!(scope = %scope, max_attempts, "failed to generate a unique identifier");
    Err(Error::Generation {
        attempts: max_attempts,
    })
}
