use std::sync::{Arc, Mutex};

use quiz_core::QuizRegistry;

use crate::error::RegistryPoisoned;

/// The quiz registry shared between the editor and the library.
///
/// Every closure runs with the lock held for its whole duration, so a
/// read-then-mutate sequence inside one call is atomic. Closures are
/// synchronous; the lock is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<QuizRegistry>>,
}

impl SharedRegistry {
    #[must_use]
    pub fn new(registry: QuizRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// # Errors
    ///
    /// Returns `RegistryPoisoned` if a previous holder panicked.
    pub fn read<T>(&self, f: impl FnOnce(&QuizRegistry) -> T) -> Result<T, RegistryPoisoned> {
        let guard = self.inner.lock().map_err(|_| RegistryPoisoned)?;
        Ok(f(&guard))
    }

    /// # Errors
    ///
    /// Returns `RegistryPoisoned` if a previous holder panicked.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&mut QuizRegistry) -> T,
    ) -> Result<T, RegistryPoisoned> {
        let mut guard = self.inner.lock().map_err(|_| RegistryPoisoned)?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::Quiz;

    #[test]
    fn clones_share_one_registry() {
        let shared = SharedRegistry::default();
        let other = shared.clone();

        let id = shared.write(|r| r.add(Quiz::new("Shared"))).unwrap();
        assert!(other.read(|r| r.contains(id)).unwrap());
        assert_eq!(other.read(QuizRegistry::len).unwrap(), 1);
    }
}
