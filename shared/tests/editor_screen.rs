mod common;

use std::{cell::Cell, rc::Rc};

use common::{article_42, MockBackend, MockSurface};
use futures::{
    executor::{block_on, LocalPool},
    task::{LocalSpawn, LocalSpawnExt},
};
use lighthouse_shared::{
    editor::{
        EditorFormValues, EditorScreen, SaveOutcome, MSG_BAD_GIST, MSG_FORM_INVALID, MSG_PUBLISHED,
        MSG_PUBLISH_UNSAVED, MSG_SAVED, MSG_TAG_EXISTS,
    },
    modal::modal,
    notify::RecordingNotifier,
    services::RichTextSurface,
    Article, CoverPhoto, NotificationLevel, PendingImage, ServiceError, TagError, UiConfig,
};
use serde_json::json;

fn setup() -> (Rc<MockBackend>, RecordingNotifier, EditorScreen) {
    let backend = MockBackend::new();
    let notifier = RecordingNotifier::new();
    let editor =
        EditorScreen::new(backend.editor_services(), Rc::new(notifier.clone()), UiConfig::default());
    (backend, notifier, editor)
}

fn png(name: &str) -> PendingImage {
    PendingImage {
        file_name: name.to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

fn tags_of(editor: &EditorScreen) -> Vec<String> {
    let mut tags = editor.state().tags.to_vec();
    tags.sort();
    tags
}

#[test]
fn load_fills_form_from_article() {
    let (backend, notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());

    block_on(editor.load("42"));

    let state = editor.state();
    assert_eq!(state.article_id.as_deref(), Some("42"));
    assert_eq!(state.form.title, "A");
    assert_eq!(state.form.description, "B");
    assert_eq!(state.body, "<p>hi</p>");
    assert_eq!(state.image.as_deref(), Some("url1"));
    assert_eq!(tags_of(&editor), vec!["x", "y"]);
    assert!(!state.loading);
    assert!(notifier.all().is_empty());
}

#[test]
fn load_pushes_body_into_attached_surface() {
    let (backend, _notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());
    let surface = MockSurface::new();
    let pool = LocalPool::new();
    let spawner: Rc<dyn LocalSpawn> = Rc::new(pool.spawner());

    block_on(editor.attach_surface(surface.clone(), spawner));
    block_on(editor.load("42"));

    assert_eq!(surface.html(), "<p>hi</p>");
}

#[test]
fn load_with_non_list_tags_starts_empty() {
    let (backend, _notifier, editor) = setup();
    let article: Article =
        serde_json::from_value(json!({ "id": "7", "title": "T", "tags": "x,y" })).expect("parse");
    *backend.article.borrow_mut() = Ok(article);

    block_on(editor.load("7"));

    assert!(editor.state().tags.is_empty());
    assert_eq!(editor.state().form.title, "T");
}

#[test]
fn load_failure_reports_and_leaves_form_empty() {
    let (_backend, notifier, editor) = setup();

    block_on(editor.load("missing"));

    let state = editor.state();
    assert_eq!(state.form, EditorFormValues::default());
    assert!(state.tags.is_empty());
    assert!(!state.loading);
    let last = notifier.last().expect("error toast");
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, "Article not found");
}

#[test]
fn invalid_save_makes_no_network_call() {
    let (backend, notifier, editor) = setup();

    let outcome = block_on(editor.save(EditorFormValues::default(), false));

    assert_eq!(outcome, SaveOutcome::Invalid);
    assert!(backend.calls.borrow().is_empty());
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_FORM_INVALID.to_string()));
    assert!(!editor.state().saving);
}

#[test]
fn successful_save_sends_draft_and_releases_flag() {
    let (backend, notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());
    block_on(editor.load("42"));
    editor.set_title("New title");
    editor.add_tag("z").expect("new tag");

    let outcome = block_on(editor.submit());

    assert_eq!(outcome, SaveOutcome::Saved);
    assert!(!editor.state().saving);
    let saved = backend.saved.borrow();
    let draft = saved.last().expect("draft sent");
    assert_eq!(draft.id.as_deref(), Some("42"));
    assert_eq!(draft.title, "New title");
    assert_eq!(draft.description, "B");
    assert_eq!(draft.text, "<p>hi</p>");
    let mut tags = draft.tags.clone();
    tags.sort();
    assert_eq!(tags, vec!["x", "y", "z"]);
    assert_eq!(draft.cover, Some(CoverPhoto::Stored("url1".to_string())));
    let last = notifier.last().expect("toast");
    assert_eq!(last.level, NotificationLevel::Success);
    assert_eq!(last.message, MSG_SAVED);
    assert_eq!(last.duration_ms, 4000);
}

#[test]
fn failed_save_reports_reason_and_releases_flag() {
    let (backend, notifier, editor) = setup();
    *backend.save_error.borrow_mut() = Some(ServiceError::Http {
        status: 500,
        reason: Some("Database down".to_string()),
    });
    editor.set_title("A");
    editor.set_description("B");

    let outcome = block_on(editor.submit());

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert!(!editor.state().saving);
    let last = notifier.last().expect("toast");
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(last.message, "Database down");
}

#[test]
fn saving_flag_gates_duplicate_submissions() {
    let (backend, notifier, editor) = setup();
    editor.set_title("A");
    editor.set_description("B");
    let release = backend.gate("save_article");
    let mut pool = LocalPool::new();

    let first = editor.clone();
    pool.spawner()
        .spawn_local(async move {
            first.submit().await;
        })
        .expect("spawn");
    pool.run_until_stalled();
    assert!(editor.state().saving);

    assert_eq!(block_on(editor.submit()), SaveOutcome::InFlight);
    assert_eq!(backend.calls_to("save_article"), 1);

    release.send(()).expect("save still pending");
    pool.run_until_stalled();
    assert!(!editor.state().saving);
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_SAVED.to_string()));
}

#[test]
fn first_save_of_new_article_adopts_returned_id() {
    let (backend, _notifier, editor) = setup();
    editor.set_title("A");
    editor.set_description("B");

    block_on(editor.submit());
    block_on(editor.submit());

    let saved = backend.saved.borrow();
    assert_eq!(saved[0].id, None);
    assert_eq!(saved[1].id.as_deref(), Some("created-1"));
}

#[test]
fn pending_cover_wins_over_stored_reference() {
    let (backend, _notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());
    block_on(editor.load("42"));
    editor
        .select_cover_file(png("cover.png"), "data:image/png;base64,iVBO".to_string())
        .expect("png accepted");

    block_on(editor.submit());

    let saved = backend.saved.borrow();
    let cover = saved[0].cover.as_ref().expect("cover sent");
    assert_eq!(cover.pending().map(|image| image.file_name.as_str()), Some("cover.png"));
    assert_eq!(editor.state().form.cover, None);
    assert_eq!(editor.state().stored_cover.as_deref(), Some("https://cdn.example.com/new.png"));
}

#[test]
fn rejected_cover_file_keeps_previous_image() {
    let (_backend, notifier, editor) = setup();
    let pdf = PendingImage {
        file_name: "doc.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        bytes: vec![1],
    };

    assert!(editor.select_cover_file(pdf, "data:application/pdf;base64,AQ==".into()).is_err());
    assert_eq!(editor.state().image, None);
    assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Error));
}

#[test]
fn cover_preview_needs_an_image_and_applies_crop() {
    let (backend, _notifier, editor) = setup();
    assert!(!editor.can_preview_image());
    assert!(editor.cover_preview_request().is_none());

    *backend.article.borrow_mut() = Ok(article_42());
    block_on(editor.load("42"));
    let request = editor.cover_preview_request().expect("image loaded");
    assert_eq!(request.src, "url1");
    assert!((request.aspect_ratio - 16.0 / 9.0).abs() < 1e-9);

    let (closer, result) = modal::<PendingImage>();
    closer.close(Some(png("cropped.png")));
    block_on(editor.preview_cover(result));
    assert_eq!(editor.state().form.cover, Some(png("cropped.png")));

    let (closer, result) = modal::<PendingImage>();
    closer.dismiss();
    block_on(editor.preview_cover(result));
    assert_eq!(editor.state().form.cover, Some(png("cropped.png")));
}

#[test]
fn adding_duplicate_tag_warns_and_keeps_set() {
    let (backend, notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());
    block_on(editor.load("42"));

    assert_eq!(editor.add_tag("x"), Err(TagError::Duplicate("x".to_string())));
    assert_eq!(tags_of(&editor), vec!["x", "y"]);
    let last = notifier.last().expect("toast");
    assert_eq!(last.message, MSG_TAG_EXISTS);
    assert_eq!(last.duration_ms, 2000);

    editor.select_suggestion("rust").expect("new tag");
    assert_eq!(tags_of(&editor), vec!["rust", "x", "y"]);
    assert_eq!(notifier.last().map(|n| n.message), Some("Added the tag: rust".to_string()));
}

#[test]
fn enter_registers_new_tag_then_adds_it() {
    let (backend, _notifier, editor) = setup();
    block_on(editor.filter_tags("  wasm "));

    block_on(editor.submit_tag_input());

    assert_eq!(backend.calls_to("add_tag:wasm"), 1);
    assert_eq!(tags_of(&editor), vec!["wasm"]);
    assert_eq!(editor.state().tag_input, "");
}

#[test]
fn enter_checks_the_candidate_for_duplicates() {
    let (backend, notifier, editor) = setup();
    editor.add_tag("wasm").expect("new tag");
    block_on(editor.filter_tags("wasm"));

    block_on(editor.submit_tag_input());

    assert_eq!(backend.calls_to("add_tag"), 0);
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_TAG_EXISTS.to_string()));
    assert_eq!(tags_of(&editor), vec!["wasm"]);
}

#[test]
fn enter_with_backend_failure_leaves_set_unchanged() {
    let (backend, notifier, editor) = setup();
    *backend.add_tag_error.borrow_mut() = Some(ServiceError::Rejected("Tag too long".into()));
    block_on(editor.filter_tags("a-very-long-tag"));

    block_on(editor.submit_tag_input());

    assert!(editor.state().tags.is_empty());
    assert_eq!(notifier.last().map(|n| n.message), Some("Tag too long".to_string()));
}

#[test]
fn removing_absent_tag_is_a_no_op() {
    let (_backend, notifier, editor) = setup();
    editor.add_tag("x").expect("new tag");
    notifier.clear();

    editor.remove_tag("nope");
    assert_eq!(tags_of(&editor), vec!["x"]);
    editor.remove_tag("x");
    assert!(editor.state().tags.is_empty());
    assert!(notifier.all().is_empty());
}

fn supersede_scenario(release_newer_first: bool) {
    let (backend, _notifier, editor) = setup();
    backend
        .suggestions
        .borrow_mut()
        .insert("j".to_string(), vec!["java".into(), "javascript".into(), "julia".into()]);
    backend
        .suggestions
        .borrow_mut()
        .insert("ja".to_string(), vec!["java".into(), "javascript".into()]);
    let release_j = backend.gate("filter_tags:j");
    let release_ja = backend.gate("filter_tags:ja");
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    spawner.spawn_local(editor.filter_tags("j")).expect("spawn");
    pool.run_until_stalled();
    spawner.spawn_local(editor.filter_tags("ja")).expect("spawn");
    pool.run_until_stalled();
    assert_eq!(backend.calls_to("filter_tags"), 2);

    if release_newer_first {
        release_ja.send(()).expect("ja pending");
        pool.run_until_stalled();
        let _ = release_j.send(());
    } else {
        let _ = release_j.send(());
        pool.run_until_stalled();
        release_ja.send(()).expect("ja pending");
    }
    pool.run_until_stalled();

    assert_eq!(editor.state().suggestions, vec!["java".to_string(), "javascript".to_string()]);
    assert_eq!(editor.state().tag_input, "ja");
}

#[test]
fn newer_query_wins_when_it_arrives_first() {
    supersede_scenario(true);
}

#[test]
fn newer_query_wins_when_it_arrives_last() {
    supersede_scenario(false);
}

#[test]
fn clearing_tag_input_drops_suggestions_without_a_call() {
    let (backend, _notifier, editor) = setup();
    backend.suggestions.borrow_mut().insert("r".to_string(), vec!["rust".into()]);
    block_on(editor.filter_tags("r"));
    assert_eq!(editor.state().suggestions, vec!["rust".to_string()]);

    block_on(editor.filter_tags(""));

    assert!(editor.state().suggestions.is_empty());
    assert_eq!(backend.calls_to("filter_tags"), 1);
}

#[test]
fn teardown_discards_pending_results() {
    let (backend, notifier, editor) = setup();
    *backend.article.borrow_mut() = Ok(article_42());
    let release = backend.gate("get_article:42");
    let renders = Rc::new(Cell::new(0));
    let counter = renders.clone();
    editor.set_observer(Rc::new(move || counter.set(counter.get() + 1)));
    let mut pool = LocalPool::new();

    pool.spawner().spawn_local(editor.load("42")).expect("spawn");
    pool.run_until_stalled();
    let renders_before = renders.get();

    editor.teardown();
    let _ = release.send(());
    pool.run_until_stalled();

    assert_eq!(editor.state().form.title, "");
    assert!(editor.state().tags.is_empty());
    assert_eq!(renders.get(), renders_before);
    assert!(notifier.all().is_empty());
    assert!(editor.token().is_cancelled());
}

#[test]
fn attaching_surface_configures_uploads_and_tracks_content() {
    let (backend, _notifier, editor) = setup();
    let surface = MockSurface::new();
    let pool = LocalPool::new();
    let spawner: Rc<dyn LocalSpawn> = Rc::new(pool.spawner());

    block_on(editor.attach_surface(surface.clone(), spawner));

    assert!(surface.initialized.get());
    assert_eq!(
        surface.credential.borrow().as_ref().and_then(|c| c.get("bucket")).cloned(),
        Some(json!("covers"))
    );
    assert_eq!(backend.calls_to("upload_credential"), 1);

    surface.type_html("<p>draft</p>");
    assert_eq!(editor.state().body, "<p>draft</p>");
}

#[test]
fn credential_failure_is_reported_and_surface_not_initialized() {
    let (backend, notifier, editor) = setup();
    *backend.credential.borrow_mut() = Err(ServiceError::Network("offline".into()));
    let surface = MockSurface::new();
    let pool = LocalPool::new();
    let spawner: Rc<dyn LocalSpawn> = Rc::new(pool.spawner());

    block_on(editor.attach_surface(surface.clone(), spawner));

    assert!(!surface.initialized.get());
    assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Error));
}

#[test]
fn removed_body_image_is_deleted_best_effort() {
    let (backend, notifier, editor) = setup();
    *backend.delete_image_error.borrow_mut() = Some(ServiceError::Http {
        status: 500,
        reason: None,
    });
    let surface = MockSurface::new();
    let mut pool = LocalPool::new();
    let spawner: Rc<dyn LocalSpawn> = Rc::new(pool.spawner());
    block_on(editor.attach_surface(surface.clone(), spawner));

    surface.remove_image("https://cdn.example.com/a.png");
    pool.run_until_stalled();

    assert_eq!(backend.calls_to("delete_image:https://cdn.example.com/a.png"), 1);
    assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Error));
    editor.add_tag("still-editing").expect("editor keeps working");
}

#[test]
fn publish_requires_a_saved_article() {
    let (backend, notifier, editor) = setup();

    block_on(editor.publish());
    assert_eq!(backend.calls_to("publish_article"), 0);
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_PUBLISH_UNSAVED.to_string()));

    *backend.article.borrow_mut() = Ok(article_42());
    block_on(editor.load("42"));
    block_on(editor.publish());
    assert_eq!(backend.calls_to("publish_article:42"), 1);
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_PUBLISHED.to_string()));
}

#[test]
fn gist_reference_is_fetched_and_inserted() {
    let (backend, notifier, editor) = setup();
    let surface = MockSurface::new();
    let pool = LocalPool::new();
    let spawner: Rc<dyn LocalSpawn> = Rc::new(pool.spawner());
    block_on(editor.attach_surface(surface.clone(), spawner));

    block_on(editor.insert_gist("https://gist.github.com/octocat/abc123"));
    assert_eq!(backend.calls_to("fetch_gist:abc123"), 1);
    assert_eq!(surface.inserted.borrow().len(), 1);

    block_on(editor.insert_gist("https://example.com/nope"));
    assert_eq!(backend.calls_to("fetch_gist"), 1);
    assert_eq!(notifier.last().map(|n| n.message), Some(MSG_BAD_GIST.to_string()));
}

#[test]
fn failed_load_keeps_the_flag_of_a_save_in_flight() {
    let (backend, _notifier, editor) = setup();
    editor.set_title("A");
    editor.set_description("B");
    let release = backend.gate("save_article");
    let mut pool = LocalPool::new();
    let first = editor.clone();
    pool.spawner()
        .spawn_local(async move {
            first.submit().await;
        })
        .expect("spawn");
    pool.run_until_stalled();

    block_on(editor.load("42"));
    assert!(editor.state().saving);

    editor.set_title("A");
    editor.set_description("B");
    assert_eq!(block_on(editor.submit()), SaveOutcome::InFlight);
    assert_eq!(backend.calls_to("save_article"), 1);

    release.send(()).expect("save still pending");
    pool.run_until_stalled();
    assert!(!editor.state().saving);
}

#[test]
fn rejected_session_during_save_logs_out() {
    let (backend, notifier, editor) = setup();
    editor.set_title("A");
    editor.set_description("B");

    *backend.save_error.borrow_mut() = Some(ServiceError::Http {
        status: 500,
        reason: None,
    });
    block_on(editor.submit());
    assert_eq!(backend.logged_out.get(), 0);
    assert_eq!(backend.went_home.get(), 0);

    *backend.save_error.borrow_mut() = Some(ServiceError::Http {
        status: 401,
        reason: None,
    });
    assert!(matches!(block_on(editor.submit()), SaveOutcome::Failed(_)));
    assert_eq!(backend.logged_out.get(), 1);
    assert_eq!(backend.went_home.get(), 1);
    assert!(!editor.state().saving);
    assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Error));
}

#[test]
fn oversized_crop_keeps_the_previous_cover() {
    let backend = MockBackend::new();
    let notifier = RecordingNotifier::new();
    let config = UiConfig {
        max_cover_bytes: 4,
        ..UiConfig::default()
    };
    let editor = EditorScreen::new(backend.editor_services(), Rc::new(notifier.clone()), config);
    editor
        .select_cover_file(png("cover.png"), "data:image/png;base64,iVBO".to_string())
        .expect("within the limit");

    let mut cropped = png("cropped.png");
    cropped.bytes.resize(5, 0);
    assert!(editor.apply_cropped_cover(Some(cropped)).is_err());
    assert_eq!(editor.state().form.cover, Some(png("cover.png")));
    assert_eq!(notifier.last().map(|n| n.level), Some(NotificationLevel::Error));

    assert_eq!(editor.apply_cropped_cover(None), Ok(()));
    assert_eq!(editor.state().form.cover, Some(png("cover.png")));
}

#[test]
fn added_tag_is_the_candidate_as_given() {
    let (_backend, _notifier, editor) = setup();
    editor.add_tag("x").expect("new tag");

    editor.add_tag(" x").expect("distinct from x");
    assert_eq!(editor.state().tags.to_vec(), vec!["x", " x"]);
    assert_eq!(editor.add_tag(" x"), Err(TagError::Duplicate(" x".to_string())));
    assert_eq!(editor.add_tag("  "), Err(TagError::Empty));
    assert_eq!(editor.state().tags.len(), 2);
}
