use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures_util::future::{FutureExt, LocalBoxFuture};
use movie_catalog_core::CatalogError;
use std::any::Any;
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;
use tracing::error;

/// Turns a panicking handler into a 500 envelope
///
/// The worker keeps serving; only the panicking request fails. The request
/// must not be cloned before the inner call because routing needs unique
/// access to it.
pub struct PanicRecoveryMiddleware;

impl<S, B> Transform<S, ServiceRequest> for PanicRecoveryMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PanicRecoveryMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicRecoveryMiddlewareService { service }))
    }
}

pub struct PanicRecoveryMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PanicRecoveryMiddlewareService<S>
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
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = recovered(&method, &path, payload);
                return Box::pin(async move { Err(err) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(recovered(&method, &path, payload)),
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn recovered(method: &str, path: &str, payload: Box<dyn Any + Send>) -> Error {
    error!(
        method,
        path,
        panic = panic_message(payload.as_ref()),
        "Recovered from handler panic"
    );

    CatalogError::Internal("request handler panicked".into()).into()
}
