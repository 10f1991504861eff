use crate::db::postgres_service::PostgresService;
use crate::types::token::TokenType;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, prelude::BASE64_STANDARD, Engine as _};
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

pub const INVITE_CODE_LEN: usize = 10;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Short url-safe id for invitation records.
pub fn new_invite_code() -> String {
    nanoid::nanoid!(INVITE_CODE_LEN)
}

pub fn new_token(kind: TokenType) -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("{}_{}", kind, URL_SAFE_NO_PAD.encode(buf))
}

pub fn encrypt(token: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(token.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(token: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(token.as_bytes(), &parsed)
        .is_ok())
}

/// Bearer tokens are `base64(user_id.key)`; the key half is what gets hashed.
pub fn construct_token(user_id: &Uuid, key: &str) -> String {
    BASE64_STANDARD.encode(format!("{user_id}.{key}"))
}

pub fn extract_token_parts(token: &str) -> Option<(Uuid, String)> {
    let decoded = BASE64_STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, key) = decoded.split_once('.')?;
    let uid = Uuid::parse_str(id).ok()?;
    if key.is_empty() {
        return None;
    }
    Some((uid, key.to_string()))
}

pub async fn token_valid(db: &PostgresService, token: &str) -> bool {
    db.resolve_caller(token).await.is_ok()
}
