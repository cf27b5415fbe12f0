use crate::{
    apis::Envelope,
    error::{ApiError, Error},
};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates non-success HTTP responses into errors.
///
/// If the body still carries a merchant API envelope with a failure code, the
/// envelope message wins and an [`Error::ApiError`](crate::error::Error) is returned.
/// Anything else becomes an [`Error::HttpError`](crate::error::Error).
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        let status_error = response.error_for_status_ref().err();
        let status_error = match status_error {
            Some(e) => e,
            None => return Ok(response),
        };

        tracing::debug!("Failed HTTP request. Status code: {}", response.status());

        // Parse the response body as an envelope
        let bytes = response.bytes().await?;
        let error = match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) if envelope.code != 200 && !envelope.message.is_empty() => {
                Error::ApiError(ApiError {
                    code: envelope.code,
                    message: envelope.message,
                })
            }
            _ => Error::HttpError(status_error),
        };

        Err(error.into())
    }
}
