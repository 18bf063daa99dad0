//! In-memory store implementing the owner, pet and seeding ports.
//!
//! Mirrors the relational schema's constraints: unique owner names, unique
//! pet names per owner and pets that must reference an existing owner. One
//! async mutex serialises all access, so every operation is atomic. Used when
//! no database URL is configured and throughout the test suites.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    OwnerRepository, OwnerRepositoryError, OwnerSeedRepository, OwnerSeedRepositoryError,
    OwnerSeedRequest, PetRepository, PetRepositoryError, SeedingResult,
};
use crate::domain::{NewOwner, NewPet, Owner, OwnerId, Pet, PetHealth, PetId};

#[derive(Debug, Clone)]
struct StoredPet {
    id: PetId,
    name: String,
    owner_id: OwnerId,
    health: PetHealth,
}

#[derive(Debug, Default)]
struct State {
    owners: Vec<Owner>,
    pets: Vec<StoredPet>,
    last_owner_id: i64,
    last_pet_id: i64,
}

impl State {
    fn owner(&self, id: OwnerId) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.id() == id)
    }

    fn owner_named(&self, name: &str) -> Option<&Owner> {
        self.owners.iter().find(|owner| owner.name() == name)
    }

    fn insert_owner(&mut self, owner: NewOwner) -> Owner {
        self.last_owner_id += 1;
        let stored = Owner::new(OwnerId::new(self.last_owner_id), owner);
        self.owners.push(stored.clone());
        stored
    }

    fn insert_pet(&mut self, name: String, owner_id: OwnerId, health: PetHealth) -> StoredPet {
        self.last_pet_id += 1;
        let stored = StoredPet {
            id: PetId::new(self.last_pet_id),
            name,
            owner_id,
            health,
        };
        self.pets.push(stored.clone());
        stored
    }

    fn has_pet(&self, owner_id: OwnerId, name: &str) -> bool {
        self.pets
            .iter()
            .any(|pet| pet.owner_id == owner_id && pet.name == name)
    }

    fn materialise(&self, pet: &StoredPet) -> Result<Pet, PetRepositoryError> {
        let owner = self.owner(pet.owner_id).cloned().ok_or_else(|| {
            PetRepositoryError::query(format!("pet {} references missing owner", pet.id))
        })?;
        Ok(Pet::new(pet.id, pet.name.clone(), owner, pet.health))
    }

    fn pets_where(
        &self,
        owner_name: &str,
        predicate: impl Fn(&StoredPet) -> bool,
    ) -> Result<Vec<Pet>, PetRepositoryError> {
        let Some(owner_id) = self.owner_named(owner_name).map(Owner::id) else {
            return Ok(Vec::new());
        };
        self.pets
            .iter()
            .filter(|pet| pet.owner_id == owner_id && predicate(pet))
            .map(|pet| self.materialise(pet))
            .collect()
    }
}

/// Shared in-memory owner and pet store.
///
/// Clones share the same underlying data.
///
/// # Examples
/// ```
/// use pets_api::domain::NewOwner;
/// use pets_api::domain::ports::OwnerRepository;
/// use pets_api::outbound::memory::InMemoryPetStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryPetStore::new();
/// let owner = store
///     .insert_owner(NewOwner::try_new("Harry", 40).expect("valid owner"))
///     .await
///     .expect("insert");
/// assert_eq!(owner.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPetStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryPetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerRepository for InMemoryPetStore {
    async fn insert_owner(&self, owner: NewOwner) -> Result<Owner, OwnerRepositoryError> {
        let mut state = self.state.lock().await;
        if state.owner_named(owner.name()).is_some() {
            return Err(OwnerRepositoryError::duplicate_name(owner.name()));
        }
        Ok(state.insert_owner(owner))
    }

    async fn list_owners(&self) -> Result<Vec<Owner>, OwnerRepositoryError> {
        Ok(self.state.lock().await.owners.clone())
    }

    async fn count_owners(&self) -> Result<u64, OwnerRepositoryError> {
        let count = self.state.lock().await.owners.len();
        u64::try_from(count).map_err(|_| OwnerRepositoryError::query("owner count overflow"))
    }
}

#[async_trait]
impl PetRepository for InMemoryPetStore {
    async fn insert_pets(&self, pets: Vec<NewPet>) -> Result<Vec<Pet>, PetRepositoryError> {
        let mut state = self.state.lock().await;
        for (index, pet) in pets.iter().enumerate() {
            if state.owner(pet.owner_id()).is_none() {
                return Err(PetRepositoryError::query(format!(
                    "owner {} does not exist",
                    pet.owner_id()
                )));
            }
            let repeated_in_batch = pets
                .iter()
                .take(index)
                .any(|earlier| earlier.owner_id() == pet.owner_id() && earlier.name() == pet.name());
            if repeated_in_batch || state.has_pet(pet.owner_id(), pet.name()) {
                return Err(PetRepositoryError::query(format!(
                    "pet {} already exists for owner {}",
                    pet.name(),
                    pet.owner_id()
                )));
            }
        }

        let stored: Vec<StoredPet> = pets
            .into_iter()
            .map(|pet| state.insert_pet(pet.name().to_owned(), pet.owner_id(), pet.health()))
            .collect();
        stored.iter().map(|pet| state.materialise(pet)).collect()
    }

    async fn find_by_owner_name(&self, owner_name: &str) -> Result<Vec<Pet>, PetRepositoryError> {
        self.state.lock().await.pets_where(owner_name, |_| true)
    }

    async fn find_by_owner_and_pet_name(
        &self,
        owner_name: &str,
        pet_name: &str,
    ) -> Result<Option<Pet>, PetRepositoryError> {
        let found = self
            .state
            .lock()
            .await
            .pets_where(owner_name, |pet| pet.name == pet_name)?;
        Ok(found.into_iter().next())
    }

    async fn find_by_owner_and_health(
        &self,
        owner_name: &str,
        health: PetHealth,
    ) -> Result<Vec<Pet>, PetRepositoryError> {
        self.state
            .lock()
            .await
            .pets_where(owner_name, |pet| pet.health == health)
    }

    async fn exists_with_health(&self, health: PetHealth) -> Result<bool, PetRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .pets
            .iter()
            .any(|pet| pet.health == health))
    }

    async fn update_health(
        &self,
        id: PetId,
        health: PetHealth,
    ) -> Result<bool, PetRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(pet) = state.pets.iter_mut().find(|pet| pet.id == id) else {
            return Ok(false);
        };
        pet.health = health;
        Ok(true)
    }
}

#[async_trait]
impl OwnerSeedRepository for InMemoryPetStore {
    async fn seed_owners(
        &self,
        request: OwnerSeedRequest,
    ) -> Result<SeedingResult, OwnerSeedRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.owners.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }

        let mut staged = State::default();
        for seed in request.owners {
            if staged.owner_named(seed.owner.name()).is_some() {
                return Err(OwnerSeedRepositoryError::query(format!(
                    "duplicate seed owner {}",
                    seed.owner.name()
                )));
            }
            let owner_id = staged.insert_owner(seed.owner).id();
            for pet in seed.pets {
                if staged.has_pet(owner_id, pet.as_str()) {
                    return Err(OwnerSeedRepositoryError::query(format!(
                        "duplicate seed pet {}",
                        pet.as_str()
                    )));
                }
                staged.insert_pet(pet.as_str().to_owned(), owner_id, PetHealth::default());
            }
        }
        *state = staged;
        Ok(SeedingResult::Applied)
    }
}
