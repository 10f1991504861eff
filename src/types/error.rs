use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // caller identity
    #[error("unauthorized")]
    Unauthorized,
    #[error("user is not verified")]
    NotVerified,
    #[error("forbidden")]
    Forbidden,

    // lookups
    #[error("team not found")]
    TeamNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("player not found in team")]
    PlayerNotFound,
    #[error("invitation not found")]
    InvitationNotFound,

    // input shape
    #[error("bad format: {0}")]
    BadFormat(String),

    // membership rule conflicts
    #[error("team name already exists")]
    NameTaken,
    #[error("email already registered")]
    EmailTaken,
    #[error("user already owns a team")]
    AlreadyHasTeam,
    #[error("user is already in a team")]
    AlreadyInTeam,
    #[error("user has already been invited")]
    AlreadyInvited,
    #[error("user has already requested to join")]
    AlreadyRequested,
    #[error("team is full")]
    TeamFull,
    #[error("team invitations are disabled")]
    InvitationsClosed,
    #[error("captain cannot be removed from their own team")]
    CannotRemoveCaptain,
    #[error("captain cannot leave their own team")]
    CannotLeaveOwnTeam,
    #[error("user is not in this team")]
    NotInTeam,

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotVerified => "USER_NOT_VERIFIED",
            Self::Forbidden => "FORBIDDEN",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::InvitationNotFound => "INVITATION_NOT_FOUND",
            Self::BadFormat(_) => "BAD_FORMAT",
            Self::NameTaken => "NAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::AlreadyHasTeam => "ALREADY_HAS_TEAM",
            Self::AlreadyInTeam => "ALREADY_IN_TEAM",
            Self::AlreadyInvited => "ALREADY_INVITED",
            Self::AlreadyRequested => "ALREADY_REQUESTED",
            Self::TeamFull => "TEAM_FULL",
            Self::InvitationsClosed => "INVITATIONS_CLOSED",
            Self::CannotRemoveCaptain => "CANNOT_REMOVE_CAPTAIN",
            Self::CannotLeaveOwnTeam => "CANNOT_LEAVE_OWN_TEAM",
            Self::NotInTeam => "NOT_IN_TEAM",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn from_db(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(_) => AppError::TeamNotFound,
            _ => AppError::Db(err),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotVerified | Self::Forbidden | Self::InvitationsClosed => StatusCode::FORBIDDEN,
            Self::TeamNotFound
            | Self::UserNotFound
            | Self::PlayerNotFound
            | Self::InvitationNotFound => StatusCode::NOT_FOUND,
            Self::BadFormat(_) => StatusCode::BAD_REQUEST,
            Self::NameTaken
            | Self::EmailTaken
            | Self::AlreadyHasTeam
            | Self::AlreadyInTeam
            | Self::AlreadyInvited
            | Self::AlreadyRequested
            | Self::TeamFull
            | Self::CannotRemoveCaptain
            | Self::CannotLeaveOwnTeam
            | Self::NotInTeam => StatusCode::CONFLICT,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        })
    }
}
