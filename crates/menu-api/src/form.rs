//! Admin form extraction
//!
//! Admin pages post either `multipart/form-data` (forms with file inputs) or
//! `application/x-www-form-urlencoded`. Both are flattened into one
//! [`AdminForm`]. A body that cannot be parsed becomes an empty form, which
//! dispatches as an unknown action.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use tracing::warn;

use menu_core::UploadedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Login,
    SetAdminPassword,
    Logout,
    SaveSettings,
    ChangeAdminPassword,
    ClearCache,
    AddCategory,
    EditCategory,
    ToggleCategory,
    SetCategoryLayout,
    DeleteCategory,
    AddItem,
    EditItem,
    ToggleItemFavorite,
    DeleteItem,
}

impl AdminAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login" => Some(AdminAction::Login),
            "set_admin_password" => Some(AdminAction::SetAdminPassword),
            "logout" => Some(AdminAction::Logout),
            "save_settings" => Some(AdminAction::SaveSettings),
            "change_admin_password" => Some(AdminAction::ChangeAdminPassword),
            "clear_cache" => Some(AdminAction::ClearCache),
            "add_category" => Some(AdminAction::AddCategory),
            "edit_category" => Some(AdminAction::EditCategory),
            "toggle_category" => Some(AdminAction::ToggleCategory),
            "set_category_layout" => Some(AdminAction::SetCategoryLayout),
            "delete_category" => Some(AdminAction::DeleteCategory),
            "add_item" => Some(AdminAction::AddItem),
            "edit_item" => Some(AdminAction::EditItem),
            "toggle_item_favorite" => Some(AdminAction::ToggleItemFavorite),
            "delete_item" => Some(AdminAction::DeleteItem),
            _ => None,
        }
    }

    /// Console section the browser returns to after the action.
    pub fn section(&self) -> &'static str {
        match self {
            AdminAction::SaveSettings => "settings",
            AdminAction::ChangeAdminPassword => "password",
            AdminAction::ClearCache => "cache",
            AdminAction::AddCategory
            | AdminAction::EditCategory
            | AdminAction::ToggleCategory
            | AdminAction::SetCategoryLayout
            | AdminAction::DeleteCategory => "categories",
            AdminAction::AddItem
            | AdminAction::EditItem
            | AdminAction::ToggleItemFavorite
            | AdminAction::DeleteItem => "items",
            AdminAction::Login | AdminAction::SetAdminPassword | AdminAction::Logout => "",
        }
    }
}

/// Text fields and uploaded files of one admin submission.
///
/// Repeated fields keep the last value.
#[derive(Debug, Default)]
pub struct AdminForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl AdminForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            fields: pairs.into_iter().collect(),
            files: HashMap::new(),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut form = Self::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read multipart field: {}", e);
                    break;
                }
            };
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => match field.bytes().await {
                    Ok(bytes) => {
                        if let Some(file) = UploadedFile::new(file_name, bytes.to_vec()) {
                            form.files.insert(name, file);
                        }
                    }
                    Err(e) => warn!("Upload in field {} failed to stream: {}", name, e),
                },
                None => match field.text().await {
                    Ok(text) => {
                        form.fields.insert(name, text);
                    }
                    Err(e) => warn!("Failed to read field {}: {}", name, e),
                },
            }
        }
        form
    }

    pub fn action(&self) -> Option<AdminAction> {
        self.text("action").and_then(AdminAction::from_str)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn owned(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    /// Present, non-empty and not `"0"`.
    pub fn flag(&self, key: &str) -> bool {
        self.text(key).is_some_and(|v| !v.is_empty() && v != "0")
    }

    pub fn take_file(&mut self, key: &str) -> Option<UploadedFile> {
        self.files.remove(key)
    }
}

impl<S> FromRequest<S> for AdminForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            return match Multipart::from_request(req, state).await {
                Ok(multipart) => Ok(Self::from_multipart(multipart).await),
                Err(e) => {
                    warn!("Rejected multipart admin form: {}", e);
                    Ok(Self::default())
                }
            };
        }

        match Form::<Vec<(String, String)>>::from_request(req, state).await {
            Ok(Form(pairs)) => Ok(Self::from_pairs(pairs)),
            Err(e) => {
                warn!("Rejected admin form: {}", e);
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    async fn extract(content_type: &str, body: &'static str) -> AdminForm {
        let req = Request::builder()
            .method("POST")
            .uri("/admin")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        AdminForm::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_urlencoded_form() {
        let form = extract(
            "application/x-www-form-urlencoded",
            "action=add_category&cat_name=%C3%87orbalar&cat_layout=full&visible=0",
        )
        .await;

        assert_eq!(form.action(), Some(AdminAction::AddCategory));
        assert_eq!(form.text("cat_name"), Some("Çorbalar"));
        assert!(!form.flag("visible"));
        assert!(!form.flag("missing"));
    }

    #[tokio::test]
    async fn test_multipart_form_with_files() {
        let body = "--XYZ\r\n\
Content-Disposition: form-data; name=\"action\"\r\n\r\n\
edit_item\r\n\
--XYZ\r\n\
Content-Disposition: form-data; name=\"item_favorite\"\r\n\r\n\
1\r\n\
--XYZ\r\n\
Content-Disposition: form-data; name=\"edit_item_image\"; filename=\"kapak.PNG\"\r\n\
Content-Type: image/png\r\n\r\n\
PNGDATA\r\n\
--XYZ\r\n\
Content-Disposition: form-data; name=\"item_image\"; filename=\"\"\r\n\
Content-Type: application/octet-stream\r\n\r\n\
\r\n\
--XYZ--\r\n";
        let mut form = extract("multipart/form-data; boundary=XYZ", body).await;

        assert_eq!(form.action(), Some(AdminAction::EditItem));
        assert!(form.flag("item_favorite"));
        let file = form.take_file("edit_item_image").unwrap();
        assert_eq!(file.bytes, b"PNGDATA");
        assert_eq!(file.extension().as_deref(), Some("png"));
        assert!(form.take_file("item_image").is_none());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_an_empty_form() {
        let form = extract("application/json", "{\"action\": \"logout\"}").await;
        assert_eq!(form.action(), None);
    }

    #[test]
    fn test_unknown_action() {
        let form = AdminForm::from_pairs(vec![("action".into(), "drop_tables".into())]);
        assert_eq!(form.action(), None);
        assert_eq!(AdminAction::DeleteItem.section(), "items");
    }
}
