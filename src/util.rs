use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseMessage {
    pub message: String,
}

impl ResponseMessage {
    pub fn new(message: &str) -> Self {
        ResponseMessage {
            message: message.to_string(),
        }
    }
}
