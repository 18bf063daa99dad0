//! Diesel adapter behaviour against a live PostgreSQL database.
//!
//! Set `PETS_TEST_DATABASE_URL` to run these tests. Without it each test
//! prints a `SKIP-TEST-CLUSTER` line and returns. Each test truncates the
//! tables, so they hold a shared lock.

use std::sync::LazyLock;

use diesel_async::RunQueryDsl;
use pets_api::domain::ports::{
    OwnerRepository, OwnerRepositoryError, OwnerSeed, OwnerSeedRepository, OwnerSeedRequest,
    PetRepository, SeedingResult,
};
use pets_api::domain::{NewOwner, NewPet, PetHealth, PetName};
use pets_api::outbound::persistence::{
    DbPool, DieselOwnerRepository, DieselOwnerSeedRepository, DieselPetRepository, PoolConfig,
    run_pending_migrations,
};
use rstest::rstest;
use tokio::sync::{Mutex, MutexGuard};

const DATABASE_URL_VAR: &str = "PETS_TEST_DATABASE_URL";

static DB_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

struct TestDb {
    pool: DbPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestDb {
    fn owners(&self) -> DieselOwnerRepository {
        DieselOwnerRepository::new(self.pool.clone())
    }

    fn pets(&self) -> DieselPetRepository {
        DieselPetRepository::new(self.pool.clone())
    }

    fn seeds(&self) -> DieselOwnerSeedRepository {
        DieselOwnerSeedRepository::new(self.pool.clone())
    }
}

#[expect(clippy::print_stderr, reason = "skipped tests must be visible in output")]
fn report_skip(test_name: &str) {
    eprintln!("SKIP-TEST-CLUSTER: {test_name} skipped ({DATABASE_URL_VAR} is unset)");
}

/// Connect, migrate and empty the tables, or return `None` when no database
/// is configured.
async fn test_db(test_name: &str) -> Option<TestDb> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        report_skip(test_name);
        return None;
    };
    let guard = DB_LOCK.lock().await;
    run_pending_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    {
        let mut conn = pool.get().await.expect("connection");
        diesel::sql_query("TRUNCATE pets, owners RESTART IDENTITY")
            .execute(&mut conn)
            .await
            .expect("truncate tables");
    }
    Some(TestDb {
        pool,
        _guard: guard,
    })
}

fn seed(name: &str, age: i32, pets: &[&str]) -> OwnerSeed {
    OwnerSeed {
        owner: NewOwner::try_new(name, age).expect("valid owner"),
        pets: pets
            .iter()
            .map(|pet| PetName::try_new(*pet).expect("valid pet"))
            .collect(),
    }
}

fn flintstones() -> OwnerSeedRequest {
    OwnerSeedRequest {
        owners: vec![seed("Harry", 40, &["Sally"]), seed("Barney", 35, &["Hoppy"])],
    }
}

#[rstest]
#[tokio::test]
async fn owners_round_trip_and_reject_duplicates() {
    let Some(db) = test_db("owners_round_trip_and_reject_duplicates").await else {
        return;
    };
    let owners = db.owners();

    let fred = owners
        .insert_owner(NewOwner::try_new("Fred", 45).expect("valid owner"))
        .await
        .expect("insert");
    assert_eq!(fred.name(), "Fred");
    assert_eq!(owners.count_owners().await.expect("count"), 1);

    let err = owners
        .insert_owner(NewOwner::try_new("Fred", 50).expect("valid owner"))
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, OwnerRepositoryError::DuplicateName { .. }));

    let listed = owners.list_owners().await.expect("list");
    assert_eq!(listed, vec![fred]);
}

#[rstest]
#[tokio::test]
async fn seeding_applies_once() {
    let Some(db) = test_db("seeding_applies_once").await else {
        return;
    };
    let seeds = db.seeds();

    assert_eq!(
        seeds.seed_owners(flintstones()).await.expect("first seed"),
        SeedingResult::Applied
    );
    assert_eq!(
        seeds.seed_owners(flintstones()).await.expect("second seed"),
        SeedingResult::AlreadySeeded
    );

    let names: Vec<String> = db
        .owners()
        .list_owners()
        .await
        .expect("list")
        .iter()
        .map(|owner| owner.name().to_owned())
        .collect();
    assert_eq!(names, ["Harry", "Barney"]);
}

#[rstest]
#[tokio::test]
async fn pet_queries_follow_owner_and_health() {
    let Some(db) = test_db("pet_queries_follow_owner_and_health").await else {
        return;
    };
    db.seeds().seed_owners(flintstones()).await.expect("seed");
    let pets = db.pets();

    let barneys = pets.find_by_owner_name("Barney").await.expect("query");
    let [hoppy] = barneys.as_slice() else {
        panic!("expected only Hoppy, found {barneys:?}");
    };
    assert_eq!(hoppy.name(), "Hoppy");
    assert_eq!(hoppy.owner().name(), "Barney");
    assert_eq!(hoppy.health(), PetHealth::Vaccinated);

    assert!(
        pets.find_by_owner_and_health("Barney", PetHealth::RequiresVaccination)
            .await
            .expect("query")
            .is_empty()
    );
    assert!(
        pets.find_by_owner_and_pet_name("Barney", "Dino")
            .await
            .expect("query")
            .is_none()
    );
    assert!(
        !pets
            .exists_with_health(PetHealth::RequiresVaccination)
            .await
            .expect("exists")
    );

    assert!(
        pets.update_health(hoppy.id(), PetHealth::RequiresVaccination)
            .await
            .expect("update")
    );
    assert!(
        pets.exists_with_health(PetHealth::RequiresVaccination)
            .await
            .expect("exists")
    );
}

#[rstest]
#[tokio::test]
async fn inserted_pets_carry_their_owner() {
    let Some(db) = test_db("inserted_pets_carry_their_owner").await else {
        return;
    };
    let barney = db
        .owners()
        .insert_owner(NewOwner::try_new("Barney", 35).expect("valid owner"))
        .await
        .expect("insert owner");
    let pets = db.pets();

    let stored = pets
        .insert_pets(vec![
            NewPet::try_new("Hoppy", barney.id()).expect("valid pet"),
            NewPet::try_new("Dino", barney.id())
                .expect("valid pet")
                .with_health(PetHealth::RequiresVaccination),
        ])
        .await
        .expect("insert pets");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|pet| pet.owner() == &barney));

    let found = pets
        .find_by_owner_and_pet_name("Barney", "Dino")
        .await
        .expect("query")
        .expect("Dino stored");
    assert_eq!(found.health(), PetHealth::RequiresVaccination);
}
