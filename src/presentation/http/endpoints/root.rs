use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::{
    application::usecases::{
        control_scheduler::ControlSchedulerUseCase, list_sent_messages::ListSentMessagesUseCase,
    },
    presentation::http::responses::ServiceStatusDto,
};

#[derive(Clone)]
pub struct ApiState {
    pub control_scheduler_usecase: Arc<ControlSchedulerUseCase>,
    pub list_sent_messages_usecase: Arc<ListSentMessagesUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Root,
    Health,
    Scheduler,
    Messages,
}

pub struct RootEndpoints;

#[OpenApi]
impl RootEndpoints {
    #[oai(path = "/", method = "get", tag = EndpointsTags::Root)]
    pub async fn index(&self) -> Json<ServiceStatusDto> {
        Json(ServiceStatusDto {
            message: "messaging-server".to_string(),
            status: "ok".to_string(),
        })
    }
}
