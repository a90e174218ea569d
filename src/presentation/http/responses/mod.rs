use poem_openapi::{ApiResponse, Object, payload::Json};

#[derive(Object)]
pub struct ServiceStatusDto {
    pub message: String,
    pub status: String,
}

#[derive(Object)]
pub struct SchedulerStatusDto {
    pub status: String,
}

#[derive(Object)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(ApiResponse)]
pub enum SchedulerControlResponse {
    /// A new timer loop was started.
    #[oai(status = 201)]
    Started(Json<SchedulerStatusDto>),
    /// The timer loop was already running; nothing changed.
    #[oai(status = 200)]
    AlreadyRunning(Json<SchedulerStatusDto>),
    /// Stop and drain continue in the background.
    #[oai(status = 202)]
    StopRequested(Json<SchedulerStatusDto>),
    /// The action was neither `start` nor `stop`.
    #[oai(status = 400)]
    InvalidAction(Json<ErrorDto>),
}

#[derive(Object)]
pub struct MessageDto {
    pub id: i64,
    pub content: String,
    pub phone: String,
    pub is_sent: bool,
}

#[derive(Object)]
pub struct PaginatedMessagesDto {
    pub messages: Vec<MessageDto>,
    pub has_more: bool,
    pub next_offset: Option<u32>,
}
