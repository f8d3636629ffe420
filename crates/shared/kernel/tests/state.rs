#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use roster_domain::config::ApiConfig;
use roster_domain::registry::{FeatureSlice, InitializedSlice};
use roster_kernel::server::router::system_router;
use roster_kernel::server::{ApiState, ApiStateError};
use std::any::Any;
use tower::ServiceExt;

#[derive(Debug)]
struct Dummy(u8);

impl FeatureSlice for Dummy {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn build_requires_config() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[test]
fn registered_slices_are_found_by_type() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .register_slices([InitializedSlice::new(Dummy(7))])
        .build()
        .unwrap();

    assert_eq!(state.get_slice::<Dummy>().map(|d| d.0), Some(7));
    assert!(state.slice_names().any(|name| name.ends_with("Dummy")));
}

#[test]
fn missing_slice_is_an_error() {
    let state = ApiState::builder().config(ApiConfig::default()).build().unwrap();
    assert!(matches!(state.try_get_slice::<Dummy>(), Err(ApiStateError::MissingSlice { .. })));
}

#[tokio::test]
async fn health_is_uncached_json() {
    let state = ApiState::builder().config(ApiConfig::default()).build().unwrap();
    let (router, _): (axum::Router, _) =
        system_router::<ApiState>().with_state(state).split_for_parts();

    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "up");
}
