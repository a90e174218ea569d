use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct SchedulerActionRequestDto {
    /// `start` or `stop`, in any letter case.
    pub action: String,
}
