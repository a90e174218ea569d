#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SchedulerAction {
    Start,
    Stop,
}

impl SchedulerAction {
    /// Case-insensitive: `"START"` and `"Stop"` are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "start" => Some(SchedulerAction::Start),
            "stop" => Some(SchedulerAction::Stop),
            _ => None,
        }
    }
}
