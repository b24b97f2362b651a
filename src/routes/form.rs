use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use futures::{StreamExt, TryStreamExt};

use crate::database::PhotoInsert;
use crate::error::ApiError;
use crate::messages::check_length;

const ONLY_IMAGES: &str = "Apenas arquivos de imagem são permitidos";
const TOO_LARGE: &str = "Arquivo excede o tamanho máximo permitido";

/// Upper bound on the bytes buffered from one form.
const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

/// One multipart part, buffered.
#[derive(Debug)]
pub(crate) struct Upload {
    pub(crate) content_type: Option<String>,
    pub(crate) bytes: Vec<u8>,
}

impl Upload {
    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Accepts the part as a photo when its declared type is `image/*`.
    pub(crate) fn into_photo(self) -> Result<PhotoInsert, ApiError> {
        let tipo_arquivo = self
            .content_type
            .filter(|content_type| content_type.starts_with("image/"))
            .ok_or_else(|| ApiError::BadRequest(ONLY_IMAGES.to_owned()))?;
        check_length("tipo_arquivo", &tipo_arquivo, 50).map_err(ApiError::BadRequest)?;

        Ok(PhotoInsert {
            foto: self.bytes,
            tipo_arquivo,
        })
    }
}

/// A fully buffered `multipart/form-data` body keyed by field name. A
/// repeated name keeps its last part.
#[derive(Debug, Default)]
pub(crate) struct Form {
    fields: HashMap<String, Upload>,
}

impl Form {
    /// Buffers the parts named in `accepted`; any other part is drained
    /// unread.
    pub(crate) async fn read(
        payload: &mut Multipart,
        accepted: &[&str],
    ) -> Result<Self, ApiError> {
        Self::read_limited(payload, accepted, MAX_FORM_BYTES).await
    }

    async fn read_limited(
        payload: &mut Multipart,
        accepted: &[&str],
        limit: usize,
    ) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();
        let mut remaining = limit;

        while let Some(mut field) = payload.try_next().await? {
            let name = field.name().to_owned();
            if !accepted.contains(&name.as_str()) {
                while field.try_next().await?.is_some() {}
                continue;
            }

            let content_type = field.content_type().map(ToString::to_string);
            let bytes = get_field_filedata(&mut field, remaining).await?;
            remaining -= bytes.len();

            fields.insert(
                name,
                Upload {
                    content_type,
                    bytes,
                },
            );
        }

        Ok(Self { fields })
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Upload> {
        self.fields.remove(name)
    }
}

#[inline]
pub(crate) async fn get_field_filedata(
    field: &mut Field,
    limit: usize,
) -> Result<Vec<u8>, ApiError> {
    let mut buffer = Vec::<u8>::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if buffer.len() + chunk.len() > limit {
            return Err(ApiError::PayloadTooLarge(TOO_LARGE));
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}
