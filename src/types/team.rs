use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamCreate {
    pub name: String,
    pub invitations_open: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamUpdate {
    pub name: Option<String>,
    pub invitations_open: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamInvite {
    pub user_id: Uuid,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RTeamTransfer {
    pub user_id: Uuid,
}
