use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{endpoints::root::EndpointsTags, responses::ServiceStatusDto};

pub struct HealthEndpoints;

#[OpenApi]
impl HealthEndpoints {
    #[oai(path = "/health", method = "get", tag = EndpointsTags::Health)]
    pub async fn health(&self) -> Json<ServiceStatusDto> {
        Json(ServiceStatusDto {
            message: "healthy".to_string(),
            status: "ok".to_string(),
        })
    }
}
