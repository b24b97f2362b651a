use actix_web::{HttpResponse, ResponseError};
use serde::Deserialize;
use serde_json::json;

use super::check_length;
use crate::error::ApiError;

#[derive(Deserialize)]
pub(crate) struct RegisterUser {
    pub(crate) email: String,
    pub(crate) nome: String,
    pub(crate) senha: String,
}

impl RegisterUser {
    pub(crate) fn validate(&self) -> Result<(), String> {
        check_length("email", &self.email, 255)?;
        check_length("nome", &self.nome, 100)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct UserUpdate {
    pub(crate) nome: Option<String>,
}

impl UserUpdate {
    pub(crate) fn validate(&self) -> Result<(), String> {
        match &self.nome {
            Some(nome) => check_length("nome", nome, 100),
            None => Ok(()),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct PasswordReset {
    pub(crate) email: String,
    pub(crate) nova_senha: String,
}

#[derive(Deserialize)]
pub(crate) struct LoginUser {
    pub(crate) email: String,
    pub(crate) senha: String,
}

#[derive(Deserialize)]
pub(crate) struct EmailCheck {
    #[serde(default)]
    pub(crate) email: Option<String>,
}

pub(crate) enum LoginUserResult {
    Success { user_id: i32, nome: String },
    Invalid,
}

impl From<LoginUserResult> for HttpResponse {
    fn from(val: LoginUserResult) -> Self {
        match val {
            LoginUserResult::Success { user_id, nome } => HttpResponse::Ok().json(json!({
                "msg": "Login realizado com sucesso",
                "user_id": user_id,
                "nome": nome,
            })),
            // Unknown email and wrong password share one response.
            LoginUserResult::Invalid => {
                ApiError::Unauthorized("Usuário ou senha inválidos").error_response()
            }
        }
    }
}
