mod form;
mod medical;
mod pets;
#[cfg(test)]
mod test_support;
mod users;

use actix_web::error::JsonPayloadError;
use actix_web::web;

use crate::error::ApiError;

pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(users::scope())
        .service(pets::scope())
        .service(medical::scope());
}

/// Malformed JSON is a 400; well-formed JSON of the wrong shape is a 422.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let api = match err {
            JsonPayloadError::Deserialize(err) if err.is_data() => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            other => ApiError::BadRequest(other.to_string()),
        };
        api.into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::UnprocessableEntity(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::UnprocessableEntity(err.to_string()).into())
}
