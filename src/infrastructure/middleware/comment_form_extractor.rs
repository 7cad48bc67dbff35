// CommentForm extractor - reads `comment_text` from urlencoded or multipart bodies

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};

/// Body of a comment submission.
///
/// A request whose body is neither `application/x-www-form-urlencoded` nor
/// `multipart/form-data` yields an empty form, which the write handlers
/// reject like a missing field. A repeated `comment_text` keeps its first
/// value. Bodies that claim a form type but cannot be parsed are rejected by
/// the underlying extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForm {
    pub comment_text: Option<String>,
}

const COMMENT_FIELD: &str = "comment_text";

impl<S> FromRequest<S> for CommentForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(request, state)
                .await
                .map_err(IntoResponse::into_response)?;

            let mut form = CommentForm::default();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                // First occurrence wins, as in the urlencoded branch
                if form.comment_text.is_none() && field.name() == Some(COMMENT_FIELD) {
                    form.comment_text =
                        Some(field.text().await.map_err(IntoResponse::into_response)?);
                }
            }
            Ok(form)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
                .await
                .map_err(IntoResponse::into_response)?;
            let comment_text = pairs
                .into_iter()
                .find(|(name, _)| name == COMMENT_FIELD)
                .map(|(_, value)| value);
            Ok(CommentForm { comment_text })
        } else {
            Ok(CommentForm::default())
        }
    }
}
