//! HTTP handlers and route configuration.

mod admin;
mod comments;
mod health;
mod import;
mod messages;
mod podcasts;
mod polls;
mod posts;
mod views;
mod visitor;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            // Posts and categories
            .route("/posts", web::get().to(posts::list_posts))
            .route("/posts/{slug}", web::get().to(posts::get_post))
            .route("/posts/{slug}/related", web::get().to(posts::related_posts))
            .route("/posts/{id}/comments", web::post().to(comments::add_comment))
            .route("/posts/{id}/reactions", web::post().to(comments::react))
            .route("/categories", web::get().to(posts::list_categories))
            .route("/categories/{slug}/posts", web::get().to(posts::category_posts))
            .route("/search", web::get().to(posts::search))
            // Comments
            .route("/comments/{id}/replies", web::post().to(comments::add_reply))
            .route("/comments/{id}/like", web::post().to(comments::like_comment))
            .route("/comments/{id}/dislike", web::post().to(comments::dislike_comment))
            // Podcasts, polls, contact
            .route("/podcasts", web::get().to(podcasts::list_podcasts))
            .route("/podcasts/{id}", web::get().to(podcasts::get_podcast))
            .route(
                "/podcasts/{id}/comments",
                web::post().to(podcasts::add_podcast_comment),
            )
            .route("/polls", web::get().to(polls::active_polls))
            .route("/polls/{id}/vote", web::post().to(polls::vote))
            .route("/messages", web::post().to(messages::submit_message))
            // Visitor preferences
            .service(
                web::scope("/visitor")
                    .route("/bookmarks", web::get().to(visitor::bookmarks))
                    .route("/bookmarks/{post_id}", web::put().to(visitor::add_bookmark))
                    .route(
                        "/bookmarks/{post_id}",
                        web::delete().to(visitor::remove_bookmark),
                    )
                    .route("/language", web::get().to(visitor::language))
                    .route("/language", web::put().to(visitor::set_language))
                    .route("/popups/{name}", web::get().to(visitor::popup_status))
                    .route(
                        "/popups/{name}/dismiss",
                        web::post().to(visitor::dismiss_popup),
                    ),
            )
            // Seed import function
            .service(
                web::resource("/functions/import-initial-posts")
                    .app_data(web::JsonConfig::default().error_handler(import::import_body_error))
                    .route(web::post().to(import::import_initial_posts)),
            )
            // Admin
            .service(
                web::scope("/admin")
                    .route("/login", web::post().to(admin::login))
                    .route("/stats", web::get().to(admin::stats))
                    .route("/refresh", web::post().to(admin::refresh))
                    .route("/posts", web::post().to(admin::create_post))
                    .route("/posts/{id}", web::put().to(admin::update_post))
                    .route("/posts/{id}", web::delete().to(admin::delete_post))
                    .route("/comments/{id}", web::delete().to(admin::delete_comment))
                    .route(
                        "/comments/{id}/replies/{reply_id}",
                        web::delete().to(admin::delete_reply),
                    )
                    .route("/podcasts", web::post().to(admin::create_podcast))
                    .route("/podcasts/{id}", web::put().to(admin::update_podcast))
                    .route("/podcasts/{id}", web::delete().to(admin::delete_podcast))
                    .route(
                        "/podcast-comments/{id}",
                        web::delete().to(admin::delete_podcast_comment),
                    )
                    .route("/polls", web::get().to(admin::list_polls))
                    .route("/polls", web::post().to(admin::create_poll))
                    .route("/polls/{id}", web::delete().to(admin::delete_poll))
                    .route("/messages", web::get().to(admin::list_messages))
                    .route(
                        "/messages/{id}/read",
                        web::post().to(admin::mark_message_read),
                    )
                    .route(
                        "/messages/{id}/reply",
                        web::post().to(admin::reply_to_message),
                    )
                    .route("/messages/{id}", web::delete().to(admin::delete_message)),
            ),
    );
}
