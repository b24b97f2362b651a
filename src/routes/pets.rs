use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use tracing::info;

use super::form::{Form, Upload};
use crate::{
    database::{Store, StoreError},
    error::ApiError,
    messages::pets::{CarouselEntry, PageQuery, PetPayload, PetUpdate},
};

const PET_NOT_FOUND: &str = "Pet não encontrado";
const INVALID_PET_JSON: &str = "Erro ao decodificar os dados do pet (JSON inválido)";

/// Multipart body: a `pet` text part holding JSON and an optional
/// `foto_perfil` image part.
#[post("/")]
async fn post_pet(
    (store, mut payload): (web::Data<dyn Store>, Multipart),
) -> Result<HttpResponse, ApiError> {
    let mut form = Form::read(&mut payload, &["pet", "foto_perfil"]).await?;

    let raw = form
        .take("pet")
        .ok_or_else(|| ApiError::UnprocessableEntity("pet: campo obrigatório".to_owned()))?;
    let value: serde_json::Value = serde_json::from_slice(&raw.bytes)
        .map_err(|_| ApiError::BadRequest(INVALID_PET_JSON.to_owned()))?;
    let pet: PetPayload = serde_json::from_value(value)
        .map_err(|err| ApiError::UnprocessableEntity(err.to_string()))?;
    pet.validate().map_err(ApiError::UnprocessableEntity)?;

    // Browsers submit an empty part for an untouched file input.
    let photo = form
        .take("foto_perfil")
        .filter(|upload| !upload.is_empty())
        .map(Upload::into_photo)
        .transpose()?;

    let pet = store
        .create_pet(pet, photo)
        .await
        .map_err(ApiError::not_found("Usuário não encontrado"))?;
    info!(id_pet = pet.id_pet, id_foto = ?pet.id_foto, "pet created");

    Ok(HttpResponse::Created().json(pet))
}

#[get("/")]
async fn get_pets(
    (store, query): (web::Data<dyn Store>, web::Query<PageQuery>),
) -> Result<HttpResponse, ApiError> {
    let pets = store
        .list_pets(i64::from(query.skip), i64::from(query.limit))
        .await?;

    Ok(HttpResponse::Ok().json(pets))
}

#[get("/carrossel/{user_id}")]
async fn get_carousel(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let entries = store
        .carousel(path.into_inner())
        .await?
        .into_iter()
        .map(CarouselEntry::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(entries))
}

#[get("/{pet_id}")]
async fn get_pet(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let pet = store
        .find_pet(path.into_inner())
        .await
        .map_err(ApiError::not_found(PET_NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(pet))
}

#[put("/{pet_id}")]
async fn put_pet(
    (store, path, desc): (
        web::Data<dyn Store>,
        web::Path<i32>,
        web::Json<PetUpdate>,
    ),
) -> Result<HttpResponse, ApiError> {
    let desc = desc.into_inner();
    desc.validate().map_err(ApiError::UnprocessableEntity)?;

    let pet = store
        .update_pet(path.into_inner(), desc)
        .await
        .map_err(|err| match err {
            StoreError::MissingReference => ApiError::NotFound("Usuário não encontrado"),
            other => ApiError::not_found(PET_NOT_FOUND)(other),
        })?;

    Ok(HttpResponse::Ok().json(pet))
}

#[delete("/{pet_id}")]
async fn delete_pet(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let id_pet = path.into_inner();

    store
        .delete_pet(id_pet)
        .await
        .map_err(ApiError::not_found(PET_NOT_FOUND))?;
    info!(id_pet, "pet deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[post("/{pet_id}/foto")]
async fn post_photo(
    (store, path, mut payload): (web::Data<dyn Store>, web::Path<i32>, Multipart),
) -> Result<HttpResponse, ApiError> {
    let id_pet = path.into_inner();

    store
        .find_pet(id_pet)
        .await
        .map_err(ApiError::not_found(PET_NOT_FOUND))?;

    let photo = Form::read(&mut payload, &["file"])
        .await?
        .take("file")
        .ok_or_else(|| ApiError::UnprocessableEntity("file: campo obrigatório".to_owned()))?
        .into_photo()?;

    let stored = store
        .replace_photo(id_pet, photo)
        .await
        .map_err(ApiError::not_found(PET_NOT_FOUND))?;
    info!(id_pet, id_foto = stored.id_foto, "pet photo replaced");

    Ok(HttpResponse::Created().json(stored))
}

#[delete("/{pet_id}/foto")]
async fn delete_photo(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    store
        .delete_photo(path.into_inner())
        .await
        .map_err(ApiError::not_found("Nenhuma foto encontrada"))?;

    Ok(HttpResponse::NoContent().finish())
}

pub(crate) fn scope() -> actix_web::Scope {
    web::scope("/pets")
        .service(post_pet)
        .service(get_pets)
        .service(get_carousel)
        .service(get_pet)
        .service(put_pet)
        .service(delete_pet)
        .service(post_photo)
        .service(delete_photo)
}
