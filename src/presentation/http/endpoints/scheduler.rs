use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::{
    http::{
        endpoints::root::{ApiState, EndpointsTags},
        requests::SchedulerActionRequestDto,
        responses::{ErrorDto, SchedulerControlResponse, SchedulerStatusDto},
    },
    models::SchedulerAction,
};

#[derive(Clone)]
pub struct SchedulerEndpoints {
    state: Arc<ApiState>,
}

impl SchedulerEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl SchedulerEndpoints {
    /// Start or stop the message-sending scheduler.
    #[oai(path = "/api/v1/messaging", method = "post", tag = EndpointsTags::Scheduler)]
    pub async fn control(&self, request: Json<SchedulerActionRequestDto>) -> SchedulerControlResponse {
        let usecase = &self.state.control_scheduler_usecase;

        let Some(action) = SchedulerAction::parse(&request.action) else {
            return SchedulerControlResponse::InvalidAction(Json(ErrorDto {
                error: "invalid action, must be 'start' or 'stop'".to_string(),
            }));
        };

        match action {
            SchedulerAction::Start => {
                let outcome = usecase.start().await;
                let body = Json(SchedulerStatusDto {
                    status: outcome.message().to_string(),
                });
                if outcome.is_already_running() {
                    SchedulerControlResponse::AlreadyRunning(body)
                } else {
                    SchedulerControlResponse::Started(body)
                }
            }
            SchedulerAction::Stop => {
                // Detached: the drain finishes on its own after we answer.
                drop(usecase.request_stop().await);
                SchedulerControlResponse::StopRequested(Json(SchedulerStatusDto {
                    status: "stop requested".to_string(),
                }))
            }
        }
    }
}
