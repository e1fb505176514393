//! Admin console - GET/POST /admin
//!
//! Every POST carries an `action` field. Logged-out visitors can only log in
//! or establish the first password; everything else redirects back to the
//! console. Logged-in actions redirect to the section they came from.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};

use menu_core::services::{CategoryEdit, ItemForm, NewCategory, PasswordChange, SetPasswordOutcome, SettingsUpdate};
use menu_core::{DomainError, Layout};

use crate::auth::{removal_cookie, session_cookie, AuthContext};
use crate::error::ApiError;
use crate::form::{AdminAction, AdminForm};
use crate::render::views::{AdminView, LoginView};
use crate::render::{ADMIN, LOGIN};
use crate::state::AppState;

const WRONG_PASSWORD: &str = "Hatalı şifre";
const EMPTY_PASSWORD: &str = "Şifre girin";

pub async fn show(State(state): State<AppState>, auth: AuthContext) -> Result<Html<String>, ApiError> {
    if !auth.is_authenticated() {
        return login_page(&state, None).await;
    }

    let snapshot = state.admin.snapshot().await;
    let view = AdminView::build(&snapshot, &state.config.site);
    Ok(Html(state.renderer.render(ADMIN, &view)?))
}

pub async fn submit(
    State(state): State<AppState>,
    auth: AuthContext,
    jar: CookieJar,
    form: AdminForm,
) -> Result<Response, ApiError> {
    match auth.session_id {
        None => submit_logged_out(state, jar, form).await,
        Some(session_id) => {
            let Some(action) = form.action() else {
                return Ok(to_console(""));
            };
            match action {
                AdminAction::Logout => {
                    state.sessions.revoke(&session_id);
                    info!("Admin logged out");
                    let jar = jar.remove(removal_cookie(&state.config.session));
                    Ok((jar, to_console("")).into_response())
                }
                AdminAction::Login | AdminAction::SetAdminPassword => Ok(to_console("")),
                other => {
                    if let Err(e) = dispatch(&state, other, form).await {
                        warn!("Admin action {:?} failed: {}", other, e);
                    }
                    Ok(to_console(other.section()))
                }
            }
        }
    }
}

async fn submit_logged_out(state: AppState, jar: CookieJar, form: AdminForm) -> Result<Response, ApiError> {
    let password = form.text("password").unwrap_or_default();

    match form.action() {
        Some(AdminAction::Login) => match state.auth.login(password).await {
            Ok(()) => Ok(start_session(&state, jar)),
            Err(DomainError::InvalidCredentials) => {
                warn!("Rejected admin login");
                Ok(login_page(&state, Some(WRONG_PASSWORD)).await?.into_response())
            }
            Err(e) => {
                warn!("Admin login failed: {}", e);
                Ok(to_console(""))
            }
        },
        Some(AdminAction::SetAdminPassword) => match state.auth.set_initial_password(password).await {
            Ok(SetPasswordOutcome::Established) => Ok(start_session(&state, jar)),
            Ok(SetPasswordOutcome::Empty) => Ok(login_page(&state, Some(EMPTY_PASSWORD)).await?.into_response()),
            Ok(SetPasswordOutcome::AlreadySet) => Ok(login_page(&state, None).await?.into_response()),
            Err(e) => {
                warn!("Failed to store admin password: {}", e);
                Ok(to_console(""))
            }
        },
        _ => Ok(to_console("")),
    }
}

async fn dispatch(state: &AppState, action: AdminAction, mut form: AdminForm) -> Result<(), DomainError> {
    let admin = &state.admin;
    let id = form.text("id").unwrap_or_default().trim().to_string();

    match action {
        AdminAction::SaveSettings => {
            let update = SettingsUpdate {
                site_title: form.owned("site_title"),
                logo: form.take_file("logo"),
                favicon: form.take_file("favicon"),
                facebook: form.owned("facebook").unwrap_or_default(),
                instagram: form.owned("instagram").unwrap_or_default(),
                twitter: form.owned("twitter").unwrap_or_default(),
                wifi_password: form.owned("wifi_password"),
                header_bg: form.owned("header_bg").unwrap_or_default(),
                footer_bg: form.owned("footer_bg").unwrap_or_default(),
            };
            admin.save_settings(update).await
        }
        AdminAction::ChangeAdminPassword => {
            let change = PasswordChange {
                current: form.text("current_password").unwrap_or_default(),
                new: form.text("new_password").unwrap_or_default(),
                confirm: form.text("new_password_confirm"),
            };
            state.auth.change_password(change).await
        }
        AdminAction::ClearCache => {
            let removed = admin.clear_cache().await?;
            info!("Cleared {} cached page file(s)", removed);
            Ok(())
        }
        AdminAction::AddCategory => {
            let input = NewCategory {
                name: form.owned("cat_name").unwrap_or_default(),
                image: form.take_file("cat_image"),
                layout: Layout::coerce(form.text("cat_layout").unwrap_or("two")),
            };
            admin.add_category(input).await.map(|_| ())
        }
        AdminAction::EditCategory => {
            let edit = CategoryEdit {
                name: form.owned("cat_name"),
                layout: form.text("cat_layout").and_then(Layout::from_str),
                visible: form.flag("visible"),
                image: form.take_file("edit_cat_image"),
                id,
            };
            admin.edit_category(edit).await
        }
        AdminAction::ToggleCategory => admin.toggle_category(&id).await,
        AdminAction::SetCategoryLayout => {
            let layout = Layout::coerce(form.text("layout").unwrap_or_default());
            admin.set_category_layout(&id, layout).await
        }
        AdminAction::DeleteCategory => admin.delete_category(&id).await,
        AdminAction::AddItem => {
            let item = item_form(&mut form, "item_image");
            admin.add_item(item).await.map(|_| ())
        }
        AdminAction::EditItem => {
            let item = item_form(&mut form, "edit_item_image");
            admin.edit_item(&id, item).await
        }
        AdminAction::ToggleItemFavorite => admin.toggle_item_favorite(&id).await,
        AdminAction::DeleteItem => admin.delete_item(&id).await,
        AdminAction::Login | AdminAction::SetAdminPassword | AdminAction::Logout => Ok(()),
    }
}

fn item_form(form: &mut AdminForm, image_field: &str) -> ItemForm {
    ItemForm {
        name: form.owned("item_name"),
        price: form.owned("item_price"),
        category_id: form.owned("item_category"),
        favorite: form.flag("item_favorite"),
        description: form.owned("item_desc"),
        variants: form.owned("item_variants"),
        image: form.take_file(image_field),
    }
}

fn start_session(state: &AppState, jar: CookieJar) -> Response {
    let session = state.sessions.create();
    info!("Admin session started");
    let jar = jar.add(session_cookie(&state.config.session, session.id));
    (jar, to_console("")).into_response()
}

async fn login_page(state: &AppState, error: Option<&str>) -> Result<Html<String>, ApiError> {
    let config = state.catalog.site_config().await;
    let view = LoginView::new(&config, &state.config.site, error);
    Ok(Html(state.renderer.render(LOGIN, &view)?))
}

fn to_console(section: &str) -> Response {
    if section.is_empty() {
        Redirect::to("/admin").into_response()
    } else {
        Redirect::to(&format!("/admin#{section}")).into_response()
    }
}
