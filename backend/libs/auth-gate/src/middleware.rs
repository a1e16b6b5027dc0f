use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::gate::AuthGate;

/// Actix middleware requiring one permission for the wrapped service
///
/// On success the verified `Claims` are stored in the request extensions and
/// the wrapped service is called. On failure the structured gate error is
/// returned and the wrapped service is never called.
pub struct RequirePermission {
    gate: AuthGate,
    permission: Arc<str>,
}

impl RequirePermission {
    pub fn new(gate: AuthGate, permission: impl Into<String>) -> Self {
        Self {
            gate,
            permission: Arc::from(permission.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionService {
            service: Rc::new(service),
            gate: self.gate.clone(),
            permission: self.permission.clone(),
        }))
    }
}

pub struct RequirePermissionService<S> {
    service: Rc<S>,
    gate: AuthGate,
    permission: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let gate = self.gate.clone();
        let permission = self.permission.clone();

        Box::pin(async move {
            let claims = gate
                .authorize_header(req.headers().get(AUTHORIZATION), &permission)
                .await?;

            req.extensions_mut().insert(claims);

            service.call(req).await
        })
    }
}

/// Handlers behind `RequirePermission` take the verified claims as an argument
impl FromRequest for Claims {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Claims>()
                .cloned()
                .ok_or_else(|| AuthError::MissingHeader.into()),
        )
    }
}
