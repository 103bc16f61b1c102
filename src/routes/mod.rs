// # Routes Module
//
// HTTP route handlers for the PsyCare API, one submodule per resource.
// Owned resources implement `crud::Writable` and share its handlers; the
// singleton and forum-tag surfaces have their own.

/// Service identification and health check
pub mod health;

/// Signup and login
pub mod auth;

/// Generic owned-resource handlers
pub mod crud;

pub mod alerts;
pub mod articles;
pub mod forum;
pub mod habits;
pub mod notifications;
pub mod questionnaires;
pub mod records;
pub mod reports;
pub mod sessions;
pub mod settings;
pub mod users;

use axum::Router;

use crate::database::models::{Alert, Article, EmotionalRecord, Habit, Notification, Questionnaire, Session};
use crate::server::AppState;

/// Every route that sits behind the authorization gate.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(users::create_user_routes())
        .merge(crud::routes::<EmotionalRecord>("/records"))
        .merge(crud::routes::<Habit>("/habits"))
        .merge(crud::routes::<Alert>("/alerts"))
        .merge(crud::routes::<Questionnaire>("/questionnaries"))
        .merge(crud::routes::<Notification>("/notifications"))
        .merge(crud::routes::<Session>("/sessions"))
        .merge(crud::routes::<Article>("/articles"))
        .merge(settings::create_settings_routes())
        .merge(reports::create_report_routes())
        .merge(forum::create_forum_routes())
}
