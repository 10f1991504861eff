use entity::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct RUserCreate {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserCreateRes {
    pub id: String,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenRes {
    pub token: String,
}

pub struct DBUserCreate {
    pub name: String,
    pub email: String,
    pub auth_hash: String,
    pub role: i16,
    pub verified: bool,
}

/// Public view of a user record. Credentials and contact details stay out.
#[derive(Serialize, Deserialize, Debug)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub role: i16,
}

impl From<UserModel> for PublicUser {
    fn from(u: UserModel) -> Self {
        PublicUser {
            id: u.id,
            name: u.name,
            role: u.role,
        }
    }
}

pub fn format_users(users: Vec<UserModel>) -> Vec<PublicUser> {
    users.into_iter().map(PublicUser::from).collect()
}
