mod health;
#[cfg(test)]
mod memory;
mod pets;
mod photos;
mod postgres;
mod users;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub(crate) use health::HealthRecord;
#[cfg(test)]
pub(crate) use memory::MemoryStore;
pub(crate) use pets::{CarouselRow, Pet};
pub(crate) use photos::{PhotoInsert, PhotoSummary};
pub(crate) use postgres::Database;
pub(crate) use users::{User, UserInsert};

use crate::messages::{
    health::HealthUpdate,
    pets::{PetPayload, PetUpdate},
    users::UserUpdate,
};

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("referenced record does not exist")]
    MissingReference,
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("blocking task was cancelled")]
    Cancelled,
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => Self::Conflict,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Self::MissingReference
            }
            other => Self::Database(other),
        }
    }
}

impl From<actix_web::error::BlockingError> for StoreError {
    fn from(_: actix_web::error::BlockingError) -> Self {
        Self::Cancelled
    }
}

/// Every storage operation the routes need. Each call is one transaction:
/// it either applies completely or leaves no trace.
#[async_trait]
pub(crate) trait Store: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, user: UserInsert) -> Result<User, StoreError>;

    async fn find_user(&self, id: i32) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: String) -> Result<User, StoreError>;

    async fn update_user(&self, id: i32, changes: UserUpdate) -> Result<User, StoreError>;

    /// Overwrites the stored password of the account owning `email`.
    async fn reset_password(&self, email: String, senha: String) -> Result<(), StoreError>;

    async fn pets_by_owner(&self, owner: i32) -> Result<Vec<Pet>, StoreError>;

    /// Inserts the pet with its empty diary and health record, plus the photo
    /// when one is given.
    async fn create_pet(
        &self,
        pet: PetPayload,
        photo: Option<PhotoInsert>,
    ) -> Result<Pet, StoreError>;

    async fn list_pets(&self, skip: i64, limit: i64) -> Result<Vec<Pet>, StoreError>;

    async fn find_pet(&self, id: i32) -> Result<Pet, StoreError>;

    async fn update_pet(&self, id: i32, changes: PetUpdate) -> Result<Pet, StoreError>;

    /// Removes photo, diary, health record and finally the pet, in that order.
    async fn delete_pet(&self, id: i32) -> Result<(), StoreError>;

    async fn replace_photo(
        &self,
        pet: i32,
        photo: PhotoInsert,
    ) -> Result<PhotoSummary, StoreError>;

    /// Fails with [`StoreError::NotFound`] when either the pet or its photo is absent.
    async fn delete_photo(&self, pet: i32) -> Result<(), StoreError>;

    async fn carousel(&self, owner: i32) -> Result<Vec<CarouselRow>, StoreError>;

    async fn find_health(&self, pet: i32) -> Result<HealthRecord, StoreError>;

    /// Creates the record when missing, then applies the supplied fields.
    async fn update_health(
        &self,
        pet: i32,
        changes: HealthUpdate,
    ) -> Result<HealthRecord, StoreError>;
}
