use actix_web::{get, post, put, web, HttpResponse};
use serde_json::json;
use tracing::info;

use crate::{
    database::{Store, StoreError, User, UserInsert},
    error::ApiError,
    messages::users::{
        EmailCheck, LoginUser, LoginUserResult, PasswordReset, RegisterUser, UserUpdate,
    },
    password_hasher::{hash_password, verify_password, PasswordHasher},
};

const USER_NOT_FOUND: &str = "Usuário não encontrado";
const EMAIL_NOT_FOUND: &str = "E-mail não encontrado";

#[post("/")]
async fn post_user(
    (store, hasher, desc): (
        web::Data<dyn Store>,
        web::Data<PasswordHasher<'static>>,
        web::Json<RegisterUser>,
    ),
) -> Result<HttpResponse, ApiError> {
    let desc = desc.into_inner();
    desc.validate().map_err(ApiError::UnprocessableEntity)?;

    let record = UserInsert {
        email: desc.email,
        nome: desc.nome,
        senha: hash_password(hasher, desc.senha).await?,
    };

    let user = store.create_user(record).await.map_err(|err| match err {
        StoreError::Conflict => ApiError::BadRequest("Email já registrado".to_owned()),
        other => other.into(),
    })?;
    info!(id_usuario = user.id_usuario, "user registered");

    Ok(HttpResponse::Created().json(json!({
        "msg": "Usuário criado com sucesso",
        "nome": user.nome,
    })))
}

#[put("/redefinir-senha")]
async fn put_password_reset(
    (store, hasher, desc): (
        web::Data<dyn Store>,
        web::Data<PasswordHasher<'static>>,
        web::Json<PasswordReset>,
    ),
) -> Result<HttpResponse, ApiError> {
    let desc = desc.into_inner();
    let senha = hash_password(hasher, desc.nova_senha).await?;

    store
        .reset_password(desc.email, senha)
        .await
        .map_err(ApiError::not_found(EMAIL_NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Senha redefinida com sucesso"
    })))
}

#[post("/login")]
async fn post_login(
    (store, hasher, desc): (
        web::Data<dyn Store>,
        web::Data<PasswordHasher<'static>>,
        web::Json<LoginUser>,
    ),
) -> Result<HttpResponse, ApiError> {
    let desc = desc.into_inner();

    let user = match store.find_user_by_email(desc.email).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => return Ok(LoginUserResult::Invalid.into()),
        Err(err) => return Err(err.into()),
    };
    let User {
        id_usuario,
        nome,
        senha,
        ..
    } = user;

    let result = if verify_password(hasher, desc.senha, senha).await? {
        LoginUserResult::Success {
            user_id: id_usuario,
            nome,
        }
    } else {
        LoginUserResult::Invalid
    };

    Ok(result.into())
}

#[post("/verificar-email")]
async fn post_verify_email(
    (store, desc): (web::Data<dyn Store>, web::Json<EmailCheck>),
) -> Result<HttpResponse, ApiError> {
    let email = desc
        .into_inner()
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| ApiError::BadRequest("E-mail não fornecido".to_owned()))?;

    store
        .find_user_by_email(email)
        .await
        .map_err(ApiError::not_found(EMAIL_NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(json!({ "msg": "E-mail válido" })))
}

#[get("/{user_id}")]
async fn get_user(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let user = store
        .find_user(path.into_inner())
        .await
        .map_err(ApiError::not_found(USER_NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Usuário encontrado",
        "nome": user.nome,
    })))
}

#[put("/{user_id}")]
async fn put_user(
    (store, path, desc): (
        web::Data<dyn Store>,
        web::Path<i32>,
        web::Json<UserUpdate>,
    ),
) -> Result<HttpResponse, ApiError> {
    let desc = desc.into_inner();
    desc.validate().map_err(ApiError::UnprocessableEntity)?;

    let user = store
        .update_user(path.into_inner(), desc)
        .await
        .map_err(ApiError::not_found(USER_NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(json!({
        "msg": "Usuário atualizado",
        "nome": user.nome,
    })))
}

#[get("/{user_id}/pets")]
async fn get_user_pets(
    (store, path): (web::Data<dyn Store>, web::Path<i32>),
) -> Result<HttpResponse, ApiError> {
    let pets = store.pets_by_owner(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(pets))
}

pub(crate) fn scope() -> actix_web::Scope {
    // Literal segments go before `/{user_id}` so they are not parsed as ids.
    web::scope("/users")
        .service(post_user)
        .service(put_password_reset)
        .service(post_login)
        .service(post_verify_email)
        .service(get_user)
        .service(put_user)
        .service(get_user_pets)
}
