use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, param::Query, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_message,
    responses::PaginatedMessagesDto,
};

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl MessagesEndpoints {
    /// List messages that were delivered and marked as sent.
    #[oai(path = "/api/v1/list", method = "get", tag = EndpointsTags::Messages)]
    pub async fn list_sent_messages(
        &self,
        limit: Query<Option<u32>>,
        offset: Query<Option<u32>>,
    ) -> PoemResult<Json<PaginatedMessagesDto>> {
        let page = self
            .state
            .list_sent_messages_usecase
            .execute(limit.0, offset.0)
            .await
            .map_err(internal_error)?;

        Ok(Json(PaginatedMessagesDto {
            messages: page.messages.iter().map(map_message).collect(),
            has_more: page.has_more,
            next_offset: page.next_offset,
        }))
    }
}

fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(
        err.to_string(),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}
