use actix_web::{get, patch, web, HttpResponse};

use crate::{
    database::{Store, StoreError},
    error::ApiError,
    messages::health::HealthUpdate,
};

#[get("/pet/{pet_id}")]
async fn get_health(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let record = store
        .find_health(path.into_inner())
        .await
        .map_err(ApiError::not_found("Registro de saúde não encontrado"))?;

    Ok(HttpResponse::Ok().json(record))
}

/// Creates the record on first use; only the supplied fields change.
#[patch("/pet/{pet_id}")]
async fn patch_health(
    (store, path, desc): (
        web::Data<dyn Store>,
        web::Path<i32>,
        web::Json<HealthUpdate>,
    ),
) -> Result<HttpResponse, ApiError> {
    let record = store
        .update_health(path.into_inner(), desc.into_inner())
        .await
        .map_err(|err| match err {
            StoreError::MissingReference => ApiError::NotFound("Pet não encontrado"),
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(record))
}

pub(crate) fn scope() -> actix_web::Scope {
    web::scope("/medical")
        .service(get_health)
        .service(patch_health)
}
