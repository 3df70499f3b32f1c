// In-memory backend for the `mock` build (static demo deployment).

use std::cell::RefCell;

use lighthouse_shared::{
    session::{AuthOutcome, Credentials, Registration, SettingsChange, SettingsResult},
    Article, ArticleDraft, ArticleListItem, CoverPhoto, ServiceError, ServiceResult,
};

use crate::{config, utils};

/// Unsigned JWT with an empty payload: always live.
const MOCK_TOKEN: &str = "eyJhbGciOiJub25lIn0.e30.mock";

const MOCK_TAGS: [&str; 12] = [
    "rust", "wasm", "yew", "web", "css", "html", "java", "javascript", "julia", "devops", "docker",
    "writing",
];

pub struct MockStore {
    articles: Vec<Article>,
    tags: Vec<String>,
    next_id: u32,
    pub author_name: String,
    pub author_picture: String,
}

thread_local! {
    static STORE: RefCell<MockStore> = RefCell::new(MockStore::seeded());
}

pub fn with_store<R>(f: impl FnOnce(&mut MockStore) -> R) -> R {
    STORE.with(|store| f(&mut store.borrow_mut()))
}

fn not_found() -> ServiceError {
    ServiceError::Http {
        status: 404,
        reason: Some("Article not found".to_string()),
    }
}

impl MockStore {
    fn seeded() -> Self {
        let articles = (1..=4)
            .map(|i| Article {
                id: format!("post-{:03}", i),
                title: format!("Sample article {}", i),
                description: format!("A short summary of sample article {}.", i),
                text: format!("<h2>Sample article {}</h2><p>Start writing here.</p>", i),
                cover_photo: (i % 2 == 0)
                    .then(|| config::asset_path(&format!("static/cover-{}.jpg", i))),
                tags: vec!["rust".to_string(), "wasm".to_string()],
                published: i <= 2,
            })
            .collect();
        Self {
            articles,
            tags: MOCK_TAGS.iter().map(|tag| tag.to_string()).collect(),
            next_id: 5,
            author_name: "Demo Author".to_string(),
            author_picture: config::asset_path(config::DEFAULT_PROFILE_PICTURE),
        }
    }

    pub fn article(&self, id: &str) -> ServiceResult<Article> {
        self.articles
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    pub fn list(&self) -> Vec<ArticleListItem> {
        self.articles
            .iter()
            .cloned()
            .map(ArticleListItem::from)
            .collect()
    }

    pub fn create(&mut self, title: &str) -> Article {
        let article = Article {
            id: format!("post-{:03}", self.next_id),
            title: title.to_string(),
            description: String::new(),
            text: String::new(),
            cover_photo: None,
            tags: Vec::new(),
            published: false,
        };
        self.next_id += 1;
        self.articles.insert(0, article.clone());
        article
    }

    pub fn save(&mut self, draft: &ArticleDraft) -> ServiceResult<Article> {
        let id = match &draft.id {
            Some(id) => id.clone(),
            None => self.create(&draft.title).id,
        };
        let article = self
            .articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or_else(not_found)?;
        article.title = draft.title.clone();
        article.description = draft.description.clone();
        article.text = draft.text.clone();
        article.tags = draft.tags.clone();
        article.cover_photo = match &draft.cover {
            Some(CoverPhoto::Pending(image)) => Some(utils::data_url(image)),
            Some(CoverPhoto::Stored(url)) => Some(url.clone()),
            None => None,
        };
        Ok(article.clone())
    }

    pub fn publish(&mut self, id: &str) -> ServiceResult<()> {
        let article = self
            .articles
            .iter_mut()
            .find(|article| article.id == id)
            .ok_or_else(not_found)?;
        article.published = true;
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> ServiceResult<()> {
        let before = self.articles.len();
        self.articles.retain(|article| article.id != id);
        if self.articles.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    pub fn filter_tags(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.starts_with(&prefix))
            .cloned()
            .collect()
    }

    pub fn add_tag(&mut self, name: &str) {
        if !self.tags.iter().any(|tag| tag == name) {
            self.tags.push(name.to_string());
        }
    }

    pub fn update_settings(&mut self, change: &SettingsChange) -> SettingsResult {
        if let Some(name) = &change.name {
            self.author_name = name.clone();
        }
        if let Some(avatar) = &change.avatar {
            self.author_picture = utils::data_url(avatar);
        }
        SettingsResult {
            name: change.name.clone(),
            image: change.avatar.as_ref().map(|_| self.author_picture.clone()),
        }
    }

    pub fn login(&self, credentials: &Credentials) -> ServiceResult<AuthOutcome> {
        if credentials.password.len() < 4 {
            return Err(ServiceError::Http {
                status: 401,
                reason: Some("Wrong email or password".to_string()),
            });
        }
        Ok(AuthOutcome {
            token: MOCK_TOKEN.to_string(),
            name: self.author_name.clone(),
            profile_picture: Some(self.author_picture.clone()),
        })
    }

    pub fn register(&mut self, registration: &Registration) -> AuthOutcome {
        self.author_name = registration.name.clone();
        AuthOutcome {
            token: MOCK_TOKEN.to_string(),
            name: registration.name.clone(),
            profile_picture: None,
        }
    }
}

pub fn mock_upload_credential() -> serde_json::Value {
    serde_json::json!({
        "bucket": "lighthouse-mock",
        "region": "local",
        "keyStart": "uploads/",
        "params": { "acl": "public-read" }
    })
}

pub fn mock_gist_html(id: &str) -> String {
    format!(
        r#"<div class="gist"><pre>// gist {id}
fn main() {{
    println!("hello from a gist");
}}</pre></div>"#
    )
}
