use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
/// Form data for sending one chat message to the assistant.
pub struct SendMessageForm {
    /// Raw message text; sanitized into a `MessageBody` by the service.
    #[validate(length(min = 1))]
    pub message: String,
}
