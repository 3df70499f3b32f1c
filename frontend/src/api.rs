use async_trait::async_trait;
#[cfg(not(feature = "mock"))]
use gloo_net::http::{Request, RequestBuilder, Response};
#[cfg(not(feature = "mock"))]
use lighthouse_shared::{CoverPhoto, PendingImage};
use lighthouse_shared::{
    services::{
        ArticleService, AuthService, AuthorService, GistService, ImageService, TagService,
        UploadCredential,
    },
    session::{AuthOutcome, Credentials, Registration, SettingsChange, SettingsResult},
    Article, ArticleDraft, ArticleListItem, ServiceError, ServiceResult,
};
#[cfg(not(feature = "mock"))]
use serde::{de::DeserializeOwned, Deserialize, Serialize};
#[cfg(not(feature = "mock"))]
use wasm_bindgen::JsValue;
#[cfg(not(feature = "mock"))]
use web_sys::{Blob, BlobPropertyBag, FormData};

#[cfg(feature = "mock")]
use crate::models;
use crate::session;

// Backend root, read from LIGHTHOUSE_API_BASE at compile time.
#[cfg(not(feature = "mock"))]
pub const API_BASE: &str = match option_env!("LIGHTHOUSE_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

#[cfg(not(feature = "mock"))]
#[derive(Debug, Deserialize)]
struct ArticleListResponse {
    articles: Vec<ArticleListItem>,
}

#[cfg(not(feature = "mock"))]
#[derive(Debug, Deserialize)]
struct NameResponse {
    name: String,
}

#[cfg(not(feature = "mock"))]
#[derive(Debug, Deserialize)]
struct PictureResponse {
    image: String,
}

/// Backends answer failures with `{"message": …}` or `{"error": …}`.
#[cfg(not(feature = "mock"))]
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[cfg(not(feature = "mock"))]
#[derive(Debug, Serialize)]
struct TitleRequest<'a> {
    title: &'a str,
}

#[cfg(not(feature = "mock"))]
#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    name: &'a str,
}

/// Talks to the Lighthouse REST API (or to the in-memory store with the
/// `mock` feature). Authenticated calls carry the stored session token.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApiClient;

#[cfg(not(feature = "mock"))]
fn endpoint(path: &str) -> String {
    format!("{}{}", API_BASE, path)
}

#[cfg(not(feature = "mock"))]
fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

#[cfg(not(feature = "mock"))]
fn serialize_error(e: impl std::fmt::Debug) -> ServiceError {
    ServiceError::Parse(format!("Serialize error: {:?}", e))
}

#[cfg(not(feature = "mock"))]
async fn send(request: Result<Request, gloo_net::Error>) -> ServiceResult<Response> {
    let response = request
        .map_err(serialize_error)?
        .send()
        .await
        .map_err(|e| ServiceError::Network(format!("Network error: {:?}", e)))?;

    if !response.ok() {
        let status = response.status();
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        web_sys::console::warn_1(&format!("HTTP error: {}", status).into());
        return Err(ServiceError::Http {
            status,
            reason: body.message.or(body.error),
        });
    }
    Ok(response)
}

#[cfg(not(feature = "mock"))]
async fn read_json<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
    response
        .json()
        .await
        .map_err(|e| ServiceError::Parse(format!("Parse error: {:?}", e)))
}

#[cfg(not(feature = "mock"))]
fn image_blob(image: &PendingImage) -> Result<Blob, JsValue> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(image.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&image.mime_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

#[cfg(not(feature = "mock"))]
fn draft_form(draft: &ArticleDraft) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_str("title", &draft.title)?;
    form.append_with_str("description", &draft.description)?;
    form.append_with_str("text", &draft.text)?;
    let tags = serde_json::to_string(&draft.tags).unwrap_or_else(|_| "[]".to_string());
    form.append_with_str("tags", &tags)?;
    match &draft.cover {
        Some(CoverPhoto::Pending(image)) => {
            form.append_with_blob_and_filename("coverPhoto", &image_blob(image)?, &image.file_name)?
        },
        Some(CoverPhoto::Stored(url)) => form.append_with_str("coverPhotoUrl", url)?,
        None => {},
    }
    Ok(form)
}

#[cfg(not(feature = "mock"))]
fn settings_form(change: &SettingsChange) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    if let Some(name) = &change.name {
        form.append_with_str("name", name)?;
    }
    if let Some(avatar) = &change.avatar {
        form.append_with_blob_and_filename("profilePicture", &image_blob(avatar)?, &avatar.file_name)?;
    }
    Ok(form)
}

/// Strips scripts and event handlers from gist embed HTML.
pub fn sanitize_embed(html: &str) -> String {
    ammonia::Builder::default()
        .add_generic_attributes(&["class", "id"])
        .clean(html)
        .to_string()
}

#[async_trait(?Send)]
impl ArticleService for ApiClient {
    async fn get_article(&self, id: &str) -> ServiceResult<Article> {
        #[cfg(feature = "mock")]
        {
            return models::with_store(|store| store.article(id));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint(&format!("/articles/{}", urlencoding::encode(id)));
            let response = send(authorized(Request::get(&url)).build()).await?;
            read_json(response).await
        }
    }

    async fn list_articles(&self) -> ServiceResult<Vec<ArticleListItem>> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.list()));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint("/articles/mine");
            let response = send(authorized(Request::get(&url)).build()).await?;
            let list: ArticleListResponse = read_json(response).await?;
            Ok(list.articles)
        }
    }

    async fn create_article(&self, title: &str) -> ServiceResult<Article> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.create(title)));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint("/articles");
            let request = authorized(Request::post(&url)).json(&TitleRequest {
                title,
            });
            read_json(send(request).await?).await
        }
    }

    async fn save_article(&self, draft: &ArticleDraft) -> ServiceResult<Article> {
        #[cfg(feature = "mock")]
        {
            return models::with_store(|store| store.save(draft));
        }

        #[cfg(not(feature = "mock"))]
        {
            let form = draft_form(draft).map_err(serialize_error)?;
            let builder = match &draft.id {
                Some(id) => Request::put(&endpoint(&format!("/articles/{}", urlencoding::encode(id)))),
                None => Request::post(&endpoint("/articles")),
            };
            let response = send(authorized(builder).body(form)).await?;
            read_json(response).await
        }
    }

    async fn publish_article(&self, id: &str) -> ServiceResult<()> {
        #[cfg(feature = "mock")]
        {
            return models::with_store(|store| store.publish(id));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint(&format!("/articles/{}/publish", urlencoding::encode(id)));
            send(authorized(Request::post(&url)).build()).await?;
            Ok(())
        }
    }

    async fn delete_article(&self, id: &str) -> ServiceResult<()> {
        #[cfg(feature = "mock")]
        {
            return models::with_store(|store| store.delete(id));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint(&format!("/articles/{}", urlencoding::encode(id)));
            send(authorized(Request::delete(&url)).build()).await?;
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl ImageService for ApiClient {
    async fn upload_credential(&self) -> ServiceResult<UploadCredential> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::mock_upload_credential());
        }

        #[cfg(not(feature = "mock"))]
        {
            let response = send(authorized(Request::get(&endpoint("/images/hash"))).build()).await?;
            read_json(response).await
        }
    }

    async fn delete_image(&self, src: &str) -> ServiceResult<()> {
        #[cfg(feature = "mock")]
        {
            let _ = src;
            return Ok(());
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint(&format!("/images?src={}", urlencoding::encode(src)));
            send(authorized(Request::delete(&url)).build()).await?;
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl TagService for ApiClient {
    async fn filter_tags(&self, prefix: &str) -> ServiceResult<Vec<String>> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.filter_tags(prefix)));
        }

        #[cfg(not(feature = "mock"))]
        {
            let url = endpoint(&format!("/tags?filter={}", urlencoding::encode(prefix)));
            let response = send(authorized(Request::get(&url)).build()).await?;
            read_json(response).await
        }
    }

    async fn add_tag(&self, name: &str) -> ServiceResult<()> {
        #[cfg(feature = "mock")]
        {
            models::with_store(|store| store.add_tag(name));
            return Ok(());
        }

        #[cfg(not(feature = "mock"))]
        {
            let request = authorized(Request::post(&endpoint("/tags")))
                .json(&TagRequest {
                    name,
                });
            send(request).await?;
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl AuthorService for ApiClient {
    async fn display_name(&self) -> ServiceResult<String> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.author_name.clone()));
        }

        #[cfg(not(feature = "mock"))]
        {
            let response =
                send(authorized(Request::get(&endpoint("/authors/me/name"))).build()).await?;
            let body: NameResponse = read_json(response).await?;
            Ok(body.name)
        }
    }

    async fn profile_picture(&self) -> ServiceResult<String> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.author_picture.clone()));
        }

        #[cfg(not(feature = "mock"))]
        {
            let response =
                send(authorized(Request::get(&endpoint("/authors/me/picture"))).build()).await?;
            let body: PictureResponse = read_json(response).await?;
            Ok(body.image)
        }
    }

    async fn update_settings(&self, change: &SettingsChange) -> ServiceResult<SettingsResult> {
        #[cfg(feature = "mock")]
        {
            return Ok(models::with_store(|store| store.update_settings(change)));
        }

        #[cfg(not(feature = "mock"))]
        {
            let form = settings_form(change).map_err(serialize_error)?;
            let response =
                send(authorized(Request::patch(&endpoint("/authors/me"))).body(form)).await?;
            read_json(response).await
        }
    }
}

#[async_trait(?Send)]
impl AuthService for ApiClient {
    async fn check_token(&self) -> ServiceResult<()> {
        if session::has_live_token() {
            Ok(())
        } else {
            Err(ServiceError::SessionExpired)
        }
    }

    fn is_authenticated(&self) -> bool {
        session::has_live_token()
    }

    fn logout(&self) {
        session::clear_token();
    }

    async fn login(&self, credentials: &Credentials) -> ServiceResult<AuthOutcome> {
        #[cfg(feature = "mock")]
        let outcome = models::with_store(|store| store.login(credentials))?;

        #[cfg(not(feature = "mock"))]
        let outcome: AuthOutcome = {
            let request = Request::post(&endpoint("/auth/login")).json(credentials);
            read_json(send(request).await?).await?
        };

        session::store_token(&outcome.token);
        Ok(outcome)
    }

    async fn register(&self, registration: &Registration) -> ServiceResult<AuthOutcome> {
        #[cfg(feature = "mock")]
        let outcome = models::with_store(|store| store.register(registration));

        #[cfg(not(feature = "mock"))]
        let outcome: AuthOutcome = {
            let request = Request::post(&endpoint("/auth/register")).json(registration);
            read_json(send(request).await?).await?
        };

        session::store_token(&outcome.token);
        Ok(outcome)
    }
}

#[async_trait(?Send)]
impl GistService for ApiClient {
    async fn fetch_gist(&self, id: &str) -> ServiceResult<String> {
        #[cfg(feature = "mock")]
        let html = models::mock_gist_html(id);

        #[cfg(not(feature = "mock"))]
        let html = {
            let url = endpoint(&format!("/gists/{}", urlencoding::encode(id)));
            let response = send(Request::get(&url).build()).await?;
            response
                .text()
                .await
                .map_err(|e| ServiceError::Parse(format!("Parse error: {:?}", e)))?
        };

        Ok(sanitize_embed(&html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_sanitizer_drops_scripts_and_handlers() {
        let cleaned = sanitize_embed(
            r#"<div class="gist" onclick="steal()"><script>alert(1)</script><pre>fn main() {}</pre></div>"#,
        );
        assert!(cleaned.contains(r#"class="gist""#));
        assert!(cleaned.contains("<pre>fn main() {}</pre>"));
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("onclick"));
    }
}
