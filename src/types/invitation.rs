use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct InvitationRes {
    pub id: String,
    pub message: String,
}
