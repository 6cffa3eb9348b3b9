pub mod auth;
pub mod misc;
pub mod tasks;
pub mod users;

use crate::auth::AuthMiddleware;
use actix_web::web;

/// Wires up the full route tree.
///
/// The auth gate is applied per scope rather than globally: registration,
/// login, the welcome page and the user dump stay open, everything else
/// requires a bearer token.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(misc::welcome)
        .service(
            web::resource("/protected")
                .wrap(AuthMiddleware)
                .route(web::get().to(misc::protected)),
        )
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .service(auth::register)
                        .service(auth::login),
                )
                .service(
                    web::scope("/tasks")
                        .wrap(AuthMiddleware)
                        .service(tasks::list_tasks)
                        .service(tasks::create_task)
                        .service(tasks::update_task)
                        .service(tasks::delete_task),
                )
                .service(users::list_users)
                .service(
                    web::resource("/palindrome")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(misc::palindrome)),
                ),
        );
}
