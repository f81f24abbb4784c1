use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};

use crate::error::Error;

/// JSON body extractor whose rejections use the crate's JSON error body instead of plain text.
/// Unknown topics or difficulties are reported here, before any handler runs.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(Error::BadRequest(rejection.body_text())),
        }
    }
}
