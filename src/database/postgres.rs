use async_trait::async_trait;
use chrono::Utc;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{
    Connection, ExpressionMethods, JoinOnDsl, NullableExpressionMethods, OptionalExtension,
    PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use super::pets::DiaryInsert;
use super::{
    CarouselRow, HealthRecord, Pet, PhotoInsert, PhotoSummary, Store, StoreError, User, UserInsert,
};
use crate::messages::{
    health::HealthUpdate,
    pets::{PetPayload, PetUpdate},
    users::UserUpdate,
};
use crate::schema::{diarios, fotos, pets, saude_pet, usuarios};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Postgres-backed [`Store`] over an r2d2 pool. Diesel calls block, so every
/// operation runs on actix's blocking thread pool inside one transaction.
#[derive(Clone)]
pub(crate) struct Database {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl Database {
    pub(crate) fn new(url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let manager = ConnectionManager::new(url);
        let pool = Pool::builder()
            .max_size(pool_size)
            .test_on_check_out(true)
            .build(manager)?;

        Ok(Self { pool })
    }

    pub(crate) async fn migrate(&self) -> Result<(), StoreError> {
        let pool = self.pool.clone();

        actix_web::web::block(move || {
            let mut pooled = pool.get()?;
            let connection: &mut PgConnection = &mut pooled;
            let applied = connection
                .run_pending_migrations(MIGRATIONS)
                .map_err(|err| StoreError::Migration(err.to_string()))?;

            for version in applied {
                info!(%version, "applied migration");
            }

            Ok(())
        })
        .await?
    }

    async fn transaction<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let pool = self.pool.clone();

        actix_web::web::block(move || {
            let mut pooled = pool.get()?;
            let connection: &mut PgConnection = &mut pooled;
            connection.transaction(work)
        })
        .await?
    }
}

fn load_pet(connection: &mut PgConnection, id: i32) -> Result<Pet, StoreError> {
    Ok(pets::table
        .find(id)
        .select(Pet::as_select())
        .first(connection)?)
}

#[async_trait]
impl Store for Database {
    async fn create_user(&self, user: UserInsert) -> Result<User, StoreError> {
        self.transaction(move |connection| {
            let taken = diesel::select(diesel::dsl::exists(
                usuarios::table.filter(usuarios::email.eq(&user.email)),
            ))
            .get_result::<bool>(connection)?;

            if taken {
                return Err(StoreError::Conflict);
            }

            Ok(diesel::insert_into(usuarios::table)
                .values(&user)
                .returning(User::as_returning())
                .get_result(connection)?)
        })
        .await
    }

    async fn find_user(&self, id: i32) -> Result<User, StoreError> {
        self.transaction(move |connection| {
            Ok(usuarios::table
                .find(id)
                .select(User::as_select())
                .first(connection)?)
        })
        .await
    }

    async fn find_user_by_email(&self, email: String) -> Result<User, StoreError> {
        self.transaction(move |connection| {
            Ok(usuarios::table
                .filter(usuarios::email.eq(email))
                .select(User::as_select())
                .first(connection)?)
        })
        .await
    }

    async fn update_user(&self, id: i32, changes: UserUpdate) -> Result<User, StoreError> {
        self.transaction(move |connection| {
            let target = usuarios::table.find(id);

            let user = match changes.nome {
                Some(nome) => diesel::update(target)
                    .set(usuarios::nome.eq(nome))
                    .returning(User::as_returning())
                    .get_result(connection)?,
                None => target.select(User::as_select()).first(connection)?,
            };

            Ok(user)
        })
        .await
    }

    async fn reset_password(&self, email: String, senha: String) -> Result<(), StoreError> {
        self.transaction(move |connection| {
            let updated = diesel::update(usuarios::table.filter(usuarios::email.eq(email)))
                .set(usuarios::senha.eq(senha))
                .execute(connection)?;

            if updated == 0 {
                return Err(StoreError::NotFound);
            }

            Ok(())
        })
        .await
    }

    async fn pets_by_owner(&self, owner: i32) -> Result<Vec<Pet>, StoreError> {
        self.transaction(move |connection| {
            Ok(pets::table
                .filter(pets::id_usuario.eq(owner))
                .order(pets::id_pet)
                .select(Pet::as_select())
                .load(connection)?)
        })
        .await
    }

    async fn create_pet(
        &self,
        pet: PetPayload,
        photo: Option<PhotoInsert>,
    ) -> Result<Pet, StoreError> {
        self.transaction(move |connection| {
            let created = diesel::insert_into(pets::table)
                .values(&pet)
                .returning(Pet::as_returning())
                .get_result(connection)?;

            diesel::insert_into(diarios::table)
                .values(&DiaryInsert::empty(created.id_pet))
                .execute(connection)?;

            diesel::insert_into(saude_pet::table)
                .values(saude_pet::id_pet.eq(created.id_pet))
                .execute(connection)?;

            let Some(photo) = photo else {
                return Ok(created);
            };

            let id_foto = diesel::insert_into(fotos::table)
                .values(&photo)
                .returning(fotos::id_foto)
                .get_result::<i32>(connection)?;

            Ok(diesel::update(pets::table.find(created.id_pet))
                .set(pets::id_foto.eq(id_foto))
                .returning(Pet::as_returning())
                .get_result(connection)?)
        })
        .await
    }

    async fn list_pets(&self, skip: i64, limit: i64) -> Result<Vec<Pet>, StoreError> {
        self.transaction(move |connection| {
            Ok(pets::table
                .order(pets::id_pet)
                .offset(skip)
                .limit(limit)
                .select(Pet::as_select())
                .load(connection)?)
        })
        .await
    }

    async fn find_pet(&self, id: i32) -> Result<Pet, StoreError> {
        self.transaction(move |connection| load_pet(connection, id)).await
    }

    async fn update_pet(&self, id: i32, changes: PetUpdate) -> Result<Pet, StoreError> {
        self.transaction(move |connection| {
            if changes.is_empty() {
                return load_pet(connection, id);
            }

            Ok(diesel::update(pets::table.find(id))
                .set(&changes)
                .returning(Pet::as_returning())
                .get_result(connection)?)
        })
        .await
    }

    async fn delete_pet(&self, id: i32) -> Result<(), StoreError> {
        self.transaction(move |connection| {
            let pet = load_pet(connection, id)?;

            if let Some(id_foto) = pet.id_foto {
                diesel::delete(fotos::table.find(id_foto)).execute(connection)?;
            }
            diesel::delete(diarios::table.filter(diarios::id_pet.eq(id))).execute(connection)?;
            diesel::delete(saude_pet::table.filter(saude_pet::id_pet.eq(id))).execute(connection)?;
            diesel::delete(pets::table.find(id)).execute(connection)?;

            Ok(())
        })
        .await
    }

    async fn replace_photo(
        &self,
        pet: i32,
        photo: PhotoInsert,
    ) -> Result<PhotoSummary, StoreError> {
        self.transaction(move |connection| {
            let current = pets::table
                .find(pet)
                .select(pets::id_foto)
                .first::<Option<i32>>(connection)?;

            if let Some(old) = current {
                diesel::delete(fotos::table.find(old)).execute(connection)?;
            }

            let stored = diesel::insert_into(fotos::table)
                .values(&photo)
                .returning(PhotoSummary::as_returning())
                .get_result(connection)?;

            diesel::update(pets::table.find(pet))
                .set(pets::id_foto.eq(stored.id_foto))
                .execute(connection)?;

            Ok(stored)
        })
        .await
    }

    async fn delete_photo(&self, pet: i32) -> Result<(), StoreError> {
        self.transaction(move |connection| {
            let id_foto = pets::table
                .find(pet)
                .select(pets::id_foto)
                .first::<Option<i32>>(connection)
                .optional()?
                .flatten()
                .ok_or(StoreError::NotFound)?;

            diesel::delete(fotos::table.find(id_foto)).execute(connection)?;
            diesel::update(pets::table.find(pet))
                .set(pets::id_foto.eq(None::<i32>))
                .execute(connection)?;

            Ok(())
        })
        .await
    }

    async fn carousel(&self, owner: i32) -> Result<Vec<CarouselRow>, StoreError> {
        self.transaction(move |connection| {
            let rows = pets::table
                .left_join(fotos::table.on(pets::id_foto.eq(fotos::id_foto.nullable())))
                .filter(pets::id_usuario.eq(owner))
                .order(pets::id_pet)
                .select((
                    pets::all_columns,
                    fotos::foto.nullable(),
                    fotos::tipo_arquivo.nullable(),
                ))
                .load::<(Pet, Option<Vec<u8>>, Option<String>)>(connection)?;

            Ok(rows
                .into_iter()
                .map(|(pet, foto, tipo_arquivo)| CarouselRow {
                    pet,
                    foto,
                    tipo_arquivo,
                })
                .collect())
        })
        .await
    }

    async fn find_health(&self, pet: i32) -> Result<HealthRecord, StoreError> {
        self.transaction(move |connection| {
            Ok(saude_pet::table
                .filter(saude_pet::id_pet.eq(pet))
                .select(HealthRecord::as_select())
                .first(connection)?)
        })
        .await
    }

    async fn update_health(
        &self,
        pet: i32,
        changes: HealthUpdate,
    ) -> Result<HealthRecord, StoreError> {
        self.transaction(move |connection| {
            let existing = saude_pet::table
                .filter(saude_pet::id_pet.eq(pet))
                .select(saude_pet::id)
                .first::<i32>(connection)
                .optional()?;

            let id = match existing {
                Some(id) => id,
                None => diesel::insert_into(saude_pet::table)
                    .values(saude_pet::id_pet.eq(pet))
                    .returning(saude_pet::id)
                    .get_result::<i32>(connection)?,
            };

            Ok(diesel::update(saude_pet::table.find(id))
                .set((
                    &changes,
                    saude_pet::ultima_atualizacao.eq(Utc::now().naive_utc()),
                ))
                .returning(HealthRecord::as_returning())
                .get_result(connection)?)
        })
        .await
    }
}
