use uuid::Uuid;

use crate::utils::token::INVITE_CODE_LEN;

// Pure checks only. Anything that needs the database lives in src/db.

pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

pub fn is_valid_id(raw: &str) -> bool {
    parse_id(raw).is_some()
}

/// Invitation ids are nanoid codes: fixed length, url-safe alphabet.
pub fn is_valid_invite_code(raw: &str) -> bool {
    raw.len() == INVITE_CODE_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Team names: 1-64 visible characters, no surrounding whitespace.
pub fn is_valid_team_name(name: &str) -> bool {
    if name.is_empty() || name.chars().count() > 64 {
        return false;
    }
    if name.trim() != name {
        return false;
    }
    name.chars().all(|c| !c.is_control())
}
