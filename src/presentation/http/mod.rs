pub mod endpoints;
pub mod mappers;
pub mod requests;
pub mod responses;

use std::sync::Arc;

use poem::Route;
use poem_openapi::OpenApiService;

use crate::presentation::http::endpoints::{
    health::HealthEndpoints,
    messages::MessagesEndpoints,
    root::{ApiState, RootEndpoints},
    scheduler::SchedulerEndpoints,
};

/// Control-plane routes plus Swagger UI under `/swagger`.
pub fn build_app(state: Arc<ApiState>, server_url: &str) -> Route {
    let endpoints = (
        RootEndpoints,
        HealthEndpoints,
        SchedulerEndpoints::new(Arc::clone(&state)),
        MessagesEndpoints::new(state),
    );

    let api_service = OpenApiService::new(endpoints, "Messaging Scheduler API", env!("CARGO_PKG_VERSION"))
        .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/swagger", ui).nest("/", api_service)
}
