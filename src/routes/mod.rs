use crate::utils::webutils::validate_admin_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub mod health;
pub mod invitation;
pub mod team;
pub mod user;
pub mod validate;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth = HttpAuthentication::bearer(validate_admin_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(web::scope("/validate").service(validate::validate));

    cfg.service(
        web::scope("/users")
            .service(
                web::scope("/create")
                    .service(user::create::create)
                    .wrap(admin_auth),
            )
            .service(web::scope("/regenerate").service(user::regenerate::regenerate)),
    );

    // "@me" routes are registered ahead of the "{id}" ones; a literal "@me"
    // never reaches the id parser.
    cfg.service(
        web::scope("/teams")
            .service(team::me::my_invitations)
            .service(team::me::my_requests)
            .service(team::me::my_team)
            .service(team::list::list_teams)
            .service(team::create::create_team)
            .service(team::members::list_members)
            .service(team::members::remove_member)
            .service(team::leave::leave_team)
            .service(team::transfer::transfer_captain)
            .service(team::invite::invite)
            .service(team::request::request_join)
            .service(team::get::get_team)
            .service(team::update::update_team)
            .service(team::delete::delete_team),
    );

    cfg.service(
        web::scope("/invitations")
            .service(invitation::respond::accept_invitation)
            .service(invitation::respond::decline_invitation)
            .service(invitation::delete::delete_invitation),
    );
}
