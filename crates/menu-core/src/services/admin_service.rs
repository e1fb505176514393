//! Admin console mutations over the site documents
//!
//! Every mutation runs its load → modify → save cycle while holding the
//! shared [`StoreLock`]. Uploads are written before the lock is taken; a
//! failed upload counts as "no new image" and the previous image is kept.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::StoreLock;
use crate::domain::menu_item::{clamp_description, parse_variants};
use crate::domain::{Category, Layout, MenuItem, NewMenuItem, SiteConfig, UploadedFile};
use crate::error::DomainError;
use crate::repositories::{PageCache, SiteRepository, UploadStorage};

/// Fields of the settings form. `None` means the field was not submitted.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub site_title: Option<String>,
    pub logo: Option<UploadedFile>,
    pub favicon: Option<UploadedFile>,
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub wifi_password: Option<String>,
    /// Colours are only replaced when non-empty.
    pub header_bg: String,
    pub footer_bg: String,
}

#[derive(Debug, Default)]
pub struct NewCategory {
    pub name: String,
    pub image: Option<UploadedFile>,
    pub layout: Layout,
}

#[derive(Debug, Default)]
pub struct CategoryEdit {
    pub id: String,
    /// Blank or missing keeps the current name.
    pub name: Option<String>,
    /// `None` keeps the current layout.
    pub layout: Option<Layout>,
    pub visible: bool,
    pub image: Option<UploadedFile>,
}

/// Item form shared by the add and edit actions.
///
/// On edit, a missing text field keeps the stored value; on add it is blank.
#[derive(Debug, Default)]
pub struct ItemForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category_id: Option<String>,
    pub favorite: bool,
    pub description: Option<String>,
    /// Textarea contents, one `name | price` per line.
    pub variants: Option<String>,
    pub image: Option<UploadedFile>,
}

/// Everything the admin console page shows.
#[derive(Debug, Clone)]
pub struct AdminSnapshot {
    pub config: SiteConfig,
    pub categories: Vec<Category>,
    pub menu: Vec<MenuItem>,
}

pub struct AdminService<R, U, C>
where
    R: SiteRepository + ?Sized,
    U: UploadStorage + ?Sized,
    C: PageCache + ?Sized,
{
    repo: Arc<R>,
    uploads: Arc<U>,
    cache: Arc<C>,
    lock: StoreLock,
    description_max_chars: usize,
}

impl<R, U, C> AdminService<R, U, C>
where
    R: SiteRepository + ?Sized,
    U: UploadStorage + ?Sized,
    C: PageCache + ?Sized,
{
    pub fn new(repo: Arc<R>, uploads: Arc<U>, cache: Arc<C>, lock: StoreLock, description_max_chars: usize) -> Self {
        Self {
            repo,
            uploads,
            cache,
            lock,
            description_max_chars,
        }
    }

    pub async fn snapshot(&self) -> AdminSnapshot {
        AdminSnapshot {
            config: self.repo.load_config().await,
            categories: self.repo.load_categories().await,
            menu: self.repo.load_menu().await,
        }
    }

    async fn store_upload(&self, file: Option<UploadedFile>) -> Option<String> {
        let file = file?;
        match self.uploads.save(&file).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Upload of {} failed, keeping previous image: {}", file.file_name, e);
                None
            }
        }
    }

    pub async fn save_settings(&self, update: SettingsUpdate) -> Result<(), DomainError> {
        let logo = self.store_upload(update.logo).await;
        let favicon = self.store_upload(update.favicon).await;

        let _guard = self.lock.acquire().await;
        let mut config = self.repo.load_config().await;

        if let Some(title) = update.site_title {
            config.site_title = title.trim().to_string();
        }
        if let Some(logo) = logo {
            config.logo = logo;
        }
        if let Some(favicon) = favicon {
            config.favicon = favicon;
        }
        config.social.facebook = update.facebook.trim().to_string();
        config.social.instagram = update.instagram.trim().to_string();
        config.social.twitter = update.twitter.trim().to_string();
        if let Some(wifi) = update.wifi_password {
            config.wifi_password = wifi.trim().to_string();
        }
        if !update.header_bg.is_empty() {
            config.header_bg = update.header_bg;
        }
        if !update.footer_bg.is_empty() {
            config.footer_bg = update.footer_bg;
        }

        self.repo.save_config(&config).await?;
        info!("Site settings saved");
        Ok(())
    }

    /// Returns the number of cache files removed.
    pub async fn clear_cache(&self) -> Result<usize, DomainError> {
        let removed = self.cache.clear().await?;
        info!("Page cache cleared ({} files)", removed);
        Ok(removed)
    }

    pub async fn add_category(&self, input: NewCategory) -> Result<Category, DomainError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::ValidationError("Category name is required".into()));
        }
        let image = self.store_upload(input.image).await;

        let _guard = self.lock.acquire().await;
        let mut categories = self.repo.load_categories().await;
        let category = Category::new(name, image, input.layout);
        categories.push(category.clone());
        self.repo.save_categories(&categories).await?;

        info!("Category {} added", category.id);
        Ok(category)
    }

    pub async fn toggle_category(&self, id: &str) -> Result<(), DomainError> {
        self.update_category(id, |category| category.toggle_visibility()).await
    }

    pub async fn set_category_layout(&self, id: &str, layout: Layout) -> Result<(), DomainError> {
        self.update_category(id, |category| category.layout = layout).await
    }

    pub async fn edit_category(&self, edit: CategoryEdit) -> Result<(), DomainError> {
        let image = self.store_upload(edit.image).await;
        let name = edit.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let layout = edit.layout;
        let visible = edit.visible;

        self.update_category(&edit.id, |category| {
            if let Some(name) = name {
                category.name = name;
            }
            if let Some(layout) = layout {
                category.layout = layout;
            }
            category.visible = visible;
            if let Some(image) = image {
                category.image = image;
            }
        })
        .await
    }

    async fn update_category<F>(&self, id: &str, apply: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut Category) + Send,
    {
        let _guard = self.lock.acquire().await;
        let mut categories = self.repo.load_categories().await;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            debug!("Category {} not found, nothing to update", id);
            return Ok(());
        };
        apply(category);
        self.repo.save_categories(&categories).await?;

        debug!("Category {} updated", id);
        Ok(())
    }

    /// Removes the category and every menu item that belongs to it.
    pub async fn delete_category(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.lock.acquire().await;
        let mut categories = self.repo.load_categories().await;
        let mut menu = self.repo.load_menu().await;

        categories.retain(|c| c.id != id);
        let before = menu.len();
        menu.retain(|item| !item.belongs_to(id));

        self.repo.save_categories(&categories).await?;
        self.repo.save_menu(&menu).await?;

        info!("Category {} deleted with {} items", id, before - menu.len());
        Ok(())
    }

    pub async fn add_item(&self, form: ItemForm) -> Result<MenuItem, DomainError> {
        let name = form.name.as_deref().unwrap_or_default().trim().to_string();
        let category_id = form.category_id.unwrap_or_default();
        if name.is_empty() || category_id.is_empty() {
            return Err(DomainError::ValidationError("Item name and category are required".into()));
        }
        let image = self.store_upload(form.image).await;

        let _guard = self.lock.acquire().await;
        let categories = self.repo.load_categories().await;
        if !categories.iter().any(|c| c.id == category_id) {
            return Err(DomainError::ValidationError(format!("Unknown category {category_id}")));
        }

        let mut menu = self.repo.load_menu().await;
        let item = MenuItem::new(NewMenuItem {
            name,
            price: form.price.as_deref().unwrap_or_default().trim().to_string(),
            category_id,
            favorite: form.favorite,
            description: clamp_description(form.description.as_deref().unwrap_or_default(), self.description_max_chars),
            variants: parse_variants(form.variants.as_deref().unwrap_or_default()),
            image,
        });
        menu.push(item.clone());
        self.repo.save_menu(&menu).await?;

        info!("Menu item {} added to {}", item.id, item.category_id);
        Ok(item)
    }

    pub async fn edit_item(&self, id: &str, form: ItemForm) -> Result<(), DomainError> {
        let image = self.store_upload(form.image).await;

        let _guard = self.lock.acquire().await;
        let categories = self.repo.load_categories().await;
        let mut menu = self.repo.load_menu().await;
        let Some(item) = menu.iter_mut().find(|item| item.id == id) else {
            debug!("Menu item {} not found, nothing to update", id);
            return Ok(());
        };

        if let Some(name) = form.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            item.name = name;
        }
        if let Some(price) = form.price {
            item.price = price.trim().to_string();
        }
        match form.category_id {
            Some(cid) if categories.iter().any(|c| c.id == cid) => item.category_id = cid,
            Some(cid) => warn!("Ignoring unknown category {} for item {}", cid, id),
            None => {}
        }
        item.favorite = form.favorite;
        if let Some(description) = form.description {
            item.description = clamp_description(&description, self.description_max_chars);
        }
        if let Some(variants) = form.variants {
            item.variants = parse_variants(&variants);
        }
        if let Some(image) = image {
            item.image = image;
        }

        self.repo.save_menu(&menu).await?;
        debug!("Menu item {} updated", id);
        Ok(())
    }

    pub async fn toggle_item_favorite(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.lock.acquire().await;
        let mut menu = self.repo.load_menu().await;
        let Some(item) = menu.iter_mut().find(|item| item.id == id) else {
            debug!("Menu item {} not found, nothing to toggle", id);
            return Ok(());
        };
        item.favorite = !item.favorite;
        self.repo.save_menu(&menu).await?;
        Ok(())
    }

    pub async fn delete_item(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.lock.acquire().await;
        let mut menu = self.repo.load_menu().await;
        menu.retain(|item| item.id != id);
        self.repo.save_menu(&menu).await?;

        info!("Menu item {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{category, item, upload, MemoryCache, MemoryRepository, MemoryUploads};
    use std::sync::atomic::Ordering;

    type TestAdmin = AdminService<MemoryRepository, MemoryUploads, MemoryCache>;

    fn admin_with(repo: Arc<MemoryRepository>, uploads: MemoryUploads) -> TestAdmin {
        AdminService::new(repo, Arc::new(uploads), Arc::new(MemoryCache::default()), StoreLock::default(), 300)
    }

    fn seeded() -> Arc<MemoryRepository> {
        Arc::new(MemoryRepository::with(
            vec![category("c1", "Çorbalar"), category("c2", "Tatlılar")],
            vec![item("m1", "Mercimek", "c1"), item("m2", "Baklava", "c2"), item("m3", "Ezogelin", "c1")],
        ))
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_its_items_only() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());

        admin.delete_category("c1").await.unwrap();

        let categories = repo.categories().await;
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "c2");
        let ids: Vec<_> = repo.menu().await.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["m2"]);
    }

    #[tokio::test]
    async fn test_add_item_requires_name_and_existing_category() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());

        let blank = admin
            .add_item(ItemForm {
                name: Some("  ".into()),
                category_id: Some("c1".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(blank, Err(DomainError::ValidationError(_))));

        let dangling = admin
            .add_item(ItemForm {
                name: Some("Künefe".into()),
                category_id: Some("c9".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(dangling, Err(DomainError::ValidationError(_))));
        assert_eq!(repo.menu().await.len(), 3);
    }

    #[tokio::test]
    async fn test_add_item() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());

        let added = admin
            .add_item(ItemForm {
                name: Some(" Künefe ".into()),
                price: Some("150 TL".into()),
                category_id: Some("c2".into()),
                favorite: true,
                description: Some("  Sıcak servis  ".into()),
                variants: Some("Tek | 150\nDuble | 250".into()),
                image: upload("kunefe.JPG"),
            })
            .await
            .unwrap();

        assert!(added.id.starts_with('m'));
        assert_eq!(added.name, "Künefe");
        assert_eq!(added.description, "Sıcak servis");
        assert_eq!(added.variants.len(), 2);
        assert_eq!(added.image, "uploads/t_0.jpg");
        assert_eq!(repo.menu().await.last(), Some(&added));
    }

    #[tokio::test]
    async fn test_description_is_capped() {
        let repo = seeded();
        let admin = AdminService::new(
            repo.clone(),
            Arc::new(MemoryUploads::default()),
            Arc::new(MemoryCache::default()),
            StoreLock::default(),
            5,
        );

        let added = admin
            .add_item(ItemForm {
                name: Some("Pilav".into()),
                category_id: Some("c1".into()),
                description: Some("tereyağlı pirinç".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(added.description, "terey");
    }

    #[tokio::test]
    async fn test_edit_item_keeps_image_without_new_upload() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());
        admin
            .edit_item(
                "m1",
                ItemForm {
                    image: upload("first.png"),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        admin
            .edit_item(
                "m1",
                ItemForm {
                    name: Some("Süzme Mercimek".into()),
                    price: Some("130".into()),
                    category_id: Some("c9".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let menu = repo.menu().await;
        let edited = menu.iter().find(|i| i.id == "m1").unwrap();
        assert_eq!(edited.name, "Süzme Mercimek");
        assert_eq!(edited.price, "130");
        assert_eq!(edited.category_id, "c1");
        assert_eq!(edited.image, "uploads/t_0.png");
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_image() {
        let repo = Arc::new(MemoryRepository::with(
            vec![Category {
                image: "uploads/old.jpg".into(),
                ..category("c1", "Çorbalar")
            }],
            Vec::new(),
        ));
        let admin = admin_with(repo.clone(), MemoryUploads::failing());

        admin
            .edit_category(CategoryEdit {
                id: "c1".into(),
                name: Some("".into()),
                layout: Some(Layout::Full),
                visible: false,
                image: upload("new.jpg"),
            })
            .await
            .unwrap();

        let categories = repo.categories().await;
        assert_eq!(categories[0].image, "uploads/old.jpg");
        assert_eq!(categories[0].name, "Çorbalar");
        assert_eq!(categories[0].layout, Layout::Full);
        assert!(!categories[0].visible);
    }

    #[tokio::test]
    async fn test_toggles_and_layout() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());

        admin.toggle_category("c2").await.unwrap();
        admin.set_category_layout("c1", Layout::Vertical).await.unwrap();
        admin.toggle_item_favorite("m3").await.unwrap();
        admin.toggle_category("missing").await.unwrap();

        let categories = repo.categories().await;
        assert_eq!(categories[0].layout, Layout::Vertical);
        assert!(!categories[1].visible);
        let menu = repo.menu().await;
        assert!(menu.iter().find(|i| i.id == "m3").unwrap().favorite);
    }

    #[tokio::test]
    async fn test_save_settings() {
        let repo = seeded();
        let admin = admin_with(repo.clone(), MemoryUploads::default());

        admin
            .save_settings(SettingsUpdate {
                site_title: Some(" Lokanta ".into()),
                logo: upload("logo.svg"),
                instagram: "https://instagram.com/lokanta".into(),
                wifi_password: Some("misafir123".into()),
                header_bg: "#112233".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        admin
            .save_settings(SettingsUpdate {
                site_title: None,
                footer_bg: "#000000".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let config = repo.config().await;
        assert_eq!(config.site_title, "Lokanta");
        assert_eq!(config.logo, "uploads/t_0.svg");
        assert_eq!(config.wifi_password, "misafir123");
        assert_eq!(config.header_bg, "#112233");
        assert_eq!(config.footer_bg, "#000000");
        assert_eq!(config.social.instagram, "");
    }

    #[tokio::test]
    async fn test_clear_cache_delegates() {
        let cache = Arc::new(MemoryCache::default());
        let admin = AdminService::new(
            seeded(),
            Arc::new(MemoryUploads::default()),
            cache.clone(),
            StoreLock::default(),
            300,
        );
        assert_eq!(admin.clear_cache().await.unwrap(), 1);
        assert_eq!(cache.cleared.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_do_not_lose_updates() {
        let repo = Arc::new(MemoryRepository::default());
        let admin = Arc::new(admin_with(repo.clone(), MemoryUploads::default()));

        let tasks: Vec<_> = (0..16)
            .map(|n| {
                let admin = admin.clone();
                tokio::spawn(async move {
                    admin
                        .add_category(NewCategory {
                            name: format!("Kategori {n}"),
                            ..Default::default()
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.categories().await.len(), 16);
    }
}
