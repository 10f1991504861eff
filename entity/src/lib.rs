pub mod invitation;
pub mod team;
pub mod team_member;
pub mod user;

/*
 A user belongs to at most one team, ever. The team_member table is keyed by
 user id alone, so the database refuses a second membership no matter what the
 service layer does. The captain is just a member with extra rights and always
 has a membership row of their own.
 Invitations are short-lived: they exist while pending and are deleted on
 accept/decline/cancel. A "request" is the same record flowing the other way
 (player -> captain).
 */
