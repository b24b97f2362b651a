use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::Utc;

use super::pets::DiaryInsert;
use super::{
    CarouselRow, HealthRecord, Pet, PhotoInsert, PhotoSummary, Store, StoreError, User, UserInsert,
};
use crate::messages::{
    health::HealthUpdate,
    pets::{PetPayload, PetUpdate},
    users::UserUpdate,
};

/// In-memory [`Store`] mirroring the Postgres schema: unique emails, foreign
/// keys and `NUMERIC(10, 2)` rounding. Every operation validates before it
/// mutates, so a failed call leaves the tables untouched.
#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    sequence: i32,
    users: BTreeMap<i32, User>,
    photos: BTreeMap<i32, PhotoInsert>,
    pets: BTreeMap<i32, Pet>,
    diaries: BTreeMap<i32, DiaryInsert>,
    health: BTreeMap<i32, HealthRecord>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.sequence += 1;
        self.sequence
    }

    fn pet(&self, id: i32) -> Result<&Pet, StoreError> {
        self.pets.get(&id).ok_or(StoreError::NotFound)
    }

    fn insert_photo(&mut self, photo: PhotoInsert) -> PhotoSummary {
        let id_foto = self.next_id();
        let summary = PhotoSummary {
            id_foto,
            tipo_arquivo: photo.tipo_arquivo.clone(),
        };
        self.photos.insert(id_foto, photo);
        summary
    }
}

fn numeric(value: BigDecimal) -> BigDecimal {
    value.round(2).with_scale(2)
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub(crate) fn users_with_email(&self, email: &str) -> usize {
        self.tables()
            .users
            .values()
            .filter(|user| user.email == email)
            .count()
    }

    pub(crate) fn diaries_for(&self, pet: i32) -> Vec<DiaryInsert> {
        self.tables()
            .diaries
            .values()
            .filter(|diary| diary.id_pet == pet)
            .cloned()
            .collect()
    }

    pub(crate) fn health_for(&self, pet: i32) -> Vec<HealthRecord> {
        self.tables()
            .health
            .values()
            .filter(|record| record.id_pet == pet)
            .cloned()
            .collect()
    }

    pub(crate) fn drop_health(&self, id: i32) {
        self.tables().health.remove(&id);
    }

    pub(crate) fn pet_count(&self) -> usize {
        self.tables().pets.len()
    }

    pub(crate) fn photo_count(&self) -> usize {
        self.tables().photos.len()
    }

    pub(crate) fn photo(&self, id_foto: i32) -> Option<PhotoInsert> {
        self.tables().photos.get(&id_foto).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: UserInsert) -> Result<User, StoreError> {
        let mut tables = self.tables();

        if tables.users.values().any(|row| row.email == user.email) {
            return Err(StoreError::Conflict);
        }

        let created = User {
            id_usuario: tables.next_id(),
            email: user.email,
            nome: user.nome,
            senha: user.senha,
        };
        tables.users.insert(created.id_usuario, created.clone());

        Ok(created)
    }

    async fn find_user(&self, id: i32) -> Result<User, StoreError> {
        self.tables()
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_user_by_email(&self, email: String) -> Result<User, StoreError> {
        self.tables()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_user(&self, id: i32, changes: UserUpdate) -> Result<User, StoreError> {
        let mut tables = self.tables();
        let user = tables.users.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(nome) = changes.nome {
            user.nome = nome;
        }

        Ok(user.clone())
    }

    async fn reset_password(&self, email: String, senha: String) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let user = tables
            .users
            .values_mut()
            .find(|user| user.email == email)
            .ok_or(StoreError::NotFound)?;

        user.senha = senha;
        Ok(())
    }

    async fn pets_by_owner(&self, owner: i32) -> Result<Vec<Pet>, StoreError> {
        Ok(self
            .tables()
            .pets
            .values()
            .filter(|pet| pet.id_usuario == owner)
            .cloned()
            .collect())
    }

    async fn create_pet(
        &self,
        pet: PetPayload,
        photo: Option<PhotoInsert>,
    ) -> Result<Pet, StoreError> {
        let mut tables = self.tables();

        if !tables.users.contains_key(&pet.id_usuario) {
            return Err(StoreError::MissingReference);
        }

        let id_pet = tables.next_id();
        let id_foto = photo.map(|photo| tables.insert_photo(photo).id_foto);
        let created = Pet {
            id_pet,
            nome: pet.nome,
            data_nasc: pet.data_nasc,
            tipo: pet.tipo,
            cor: pet.cor,
            peso: pet.peso.map(numeric),
            raca: pet.raca,
            sexo: pet.sexo,
            id_foto,
            id_usuario: pet.id_usuario,
        };
        tables.pets.insert(id_pet, created.clone());

        let id_diario = tables.next_id();
        tables.diaries.insert(id_diario, DiaryInsert::empty(id_pet));

        let id = tables.next_id();
        tables.health.insert(
            id,
            HealthRecord {
                id,
                id_pet,
                vacinas: String::new(),
                medicamentos: String::new(),
                doencas: String::new(),
                ultima_atualizacao: None,
            },
        );

        Ok(created)
    }

    async fn list_pets(&self, skip: i64, limit: i64) -> Result<Vec<Pet>, StoreError> {
        let skip = usize::try_from(skip).unwrap_or_default();
        let limit = usize::try_from(limit).unwrap_or_default();

        Ok(self
            .tables()
            .pets
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_pet(&self, id: i32) -> Result<Pet, StoreError> {
        self.tables().pet(id).cloned()
    }

    async fn update_pet(&self, id: i32, changes: PetUpdate) -> Result<Pet, StoreError> {
        let mut tables = self.tables();
        tables.pet(id)?;

        if let Some(owner) = changes.id_usuario {
            if !tables.users.contains_key(&owner) {
                return Err(StoreError::MissingReference);
            }
        }

        let pet = tables.pets.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(nome) = changes.nome {
            pet.nome = nome;
        }
        if let Some(data_nasc) = changes.data_nasc {
            pet.data_nasc = data_nasc;
        }
        if let Some(tipo) = changes.tipo {
            pet.tipo = tipo;
        }
        if let Some(cor) = changes.cor {
            pet.cor = cor;
        }
        if let Some(peso) = changes.peso {
            pet.peso = peso.map(numeric);
        }
        if let Some(raca) = changes.raca {
            pet.raca = raca;
        }
        if let Some(sexo) = changes.sexo {
            pet.sexo = sexo;
        }
        if let Some(owner) = changes.id_usuario {
            pet.id_usuario = owner;
        }

        Ok(pet.clone())
    }

    async fn delete_pet(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let pet = tables.pet(id)?.clone();

        if let Some(id_foto) = pet.id_foto {
            tables.photos.remove(&id_foto);
        }
        tables.diaries.retain(|_, diary| diary.id_pet != id);
        tables.health.retain(|_, record| record.id_pet != id);
        tables.pets.remove(&id);

        Ok(())
    }

    async fn replace_photo(
        &self,
        pet: i32,
        photo: PhotoInsert,
    ) -> Result<PhotoSummary, StoreError> {
        let mut tables = self.tables();

        let current = tables.pet(pet)?.id_foto;
        if let Some(old) = current {
            tables.photos.remove(&old);
        }

        let stored = tables.insert_photo(photo);
        if let Some(row) = tables.pets.get_mut(&pet) {
            row.id_foto = Some(stored.id_foto);
        }

        Ok(stored)
    }

    async fn delete_photo(&self, pet: i32) -> Result<(), StoreError> {
        let mut tables = self.tables();
        let id_foto = tables.pet(pet)?.id_foto.ok_or(StoreError::NotFound)?;

        tables.photos.remove(&id_foto);
        if let Some(row) = tables.pets.get_mut(&pet) {
            row.id_foto = None;
        }

        Ok(())
    }

    async fn carousel(&self, owner: i32) -> Result<Vec<CarouselRow>, StoreError> {
        let tables = self.tables();

        Ok(tables
            .pets
            .values()
            .filter(|pet| pet.id_usuario == owner)
            .map(|pet| {
                let photo = pet.id_foto.and_then(|id| tables.photos.get(&id));
                CarouselRow {
                    pet: pet.clone(),
                    foto: photo.map(|photo| photo.foto.clone()),
                    tipo_arquivo: photo.map(|photo| photo.tipo_arquivo.clone()),
                }
            })
            .collect())
    }

    async fn find_health(&self, pet: i32) -> Result<HealthRecord, StoreError> {
        self.tables()
            .health
            .values()
            .find(|record| record.id_pet == pet)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_health(
        &self,
        pet: i32,
        changes: HealthUpdate,
    ) -> Result<HealthRecord, StoreError> {
        let mut tables = self.tables();

        if !tables.pets.contains_key(&pet) {
            return Err(StoreError::MissingReference);
        }

        let existing = tables
            .health
            .values()
            .find(|record| record.id_pet == pet)
            .map(|record| record.id);
        let id = match existing {
            Some(id) => id,
            None => {
                let id = tables.next_id();
                tables.health.insert(
                    id,
                    HealthRecord {
                        id,
                        id_pet: pet,
                        vacinas: String::new(),
                        medicamentos: String::new(),
                        doencas: String::new(),
                        ultima_atualizacao: None,
                    },
                );
                id
            }
        };

        let record = tables.health.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(vacinas) = changes.vacinas {
            record.vacinas = vacinas;
        }
        if let Some(medicamentos) = changes.medicamentos {
            record.medicamentos = medicamentos;
        }
        if let Some(doencas) = changes.doencas {
            record.doencas = doencas;
        }
        record.ultima_atualizacao = Some(Utc::now().naive_utc());

        Ok(record.clone())
    }
}
