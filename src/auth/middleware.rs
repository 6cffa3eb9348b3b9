use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::activity_log::ActivityLog;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// Request authorization gate.
///
/// Wrapped around protected scopes. A request without a bearer token is
/// rejected with 401; a request whose token fails verification is rejected
/// with 403. On success the decoded claims are inserted into the request
/// extensions for extractors downstream. Every outcome is recorded to the
/// activity log.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let tokens = req.app_data::<web::Data<TokenService>>().cloned();
        let activity = req.app_data::<web::Data<ActivityLog>>().cloned();

        let Some(tokens) = tokens else {
            let err = AppError::InternalServerError("Token service is not configured".into());
            return Box::pin(async move { Err(err.into()) });
        };

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    if let Some(activity) = &activity {
                        activity.record("Authentication failed", "invalid or expired token");
                    }
                    let err =
                        AppError::Forbidden("You must log in to access this section".into());
                    Box::pin(async move { Err(err.into()) })
                }
            },
            None => {
                if let Some(activity) = &activity {
                    activity.record("Authentication failed", "no token provided");
                }
                let err = AppError::Unauthorized("No token provided".into());
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}
