//! Helpers for driving the route table against a [`MemoryStore`].

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use crate::database::{MemoryStore, Store};
use crate::password_hasher::PasswordHasher;

const BOUNDARY: &str = "pet-diary-boundary";

pub(crate) async fn test_service(
    store: Arc<MemoryStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store: Arc<dyn Store> = store;

    actix_test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(PasswordHasher::new()))
            .configure(super::configure),
    )
    .await
}

/// A `multipart/form-data` part; `file` carries `(filename, content type)`.
pub(crate) struct Part<'a> {
    pub(crate) name: &'a str,
    pub(crate) file: Option<(&'a str, &'a str)>,
    pub(crate) body: &'a [u8],
}

impl<'a> Part<'a> {
    pub(crate) fn text(name: &'a str, body: &'a str) -> Self {
        Self {
            name,
            file: None,
            body: body.as_bytes(),
        }
    }

    pub(crate) fn file(name: &'a str, content_type: &'a str, body: &'a [u8]) -> Self {
        Self {
            name,
            file: Some(("upload.bin", content_type)),
            body,
        }
    }
}

pub(crate) fn multipart(uri: &str, parts: &[Part<'_>]) -> actix_test::TestRequest {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file {
            Some((filename, content_type)) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{filename}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.body);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    actix_test::TestRequest::post()
        .uri(uri)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

/// Seeds a user straight into the store and returns its id.
pub(crate) async fn register(store: &MemoryStore, email: &str, senha: &str) -> i32 {
    let senha = PasswordHasher::new().hash(senha).expect("hash");

    store
        .create_user(crate::database::UserInsert {
            email: email.to_owned(),
            nome: "Ana".to_owned(),
            senha,
        })
        .await
        .expect("user created")
        .id_usuario
}

/// Creates a pet for `owner` through `POST /pets/` and returns its JSON.
pub(crate) async fn create_pet<S>(app: &S, owner: i32, extra: Value, photo: Option<&[u8]>) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut pet = json!({"nome": "Rex", "tipo": "cao", "id_usuario": owner});
    if let (Some(pet), Value::Object(extra)) = (pet.as_object_mut(), extra) {
        pet.extend(extra);
    }
    let pet = pet.to_string();

    let mut parts = vec![Part::text("pet", &pet)];
    if let Some(bytes) = photo {
        parts.push(Part::file("foto_perfil", "image/png", bytes));
    }

    let response = actix_test::call_service(app, multipart("/pets/", &parts).to_request()).await;
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);

    actix_test::read_body_json(response).await
}
