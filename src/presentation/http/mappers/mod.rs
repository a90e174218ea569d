use crate::{domain::models::Message, presentation::http::responses::MessageDto};

pub fn map_message(message: &Message) -> MessageDto {
    MessageDto {
        id: message.id,
        content: message.content.clone(),
        phone: message.phone.clone(),
        is_sent: message.is_sent,
    }
}
