mod common;

use std::rc::Rc;

use common::MockBackend;
use futures::executor::block_on;
use lighthouse_shared::{
    modal::{modal, LoginForm, ModalResult, RegisterForm, SettingsForm, SubmitError},
    nav::{Drawer, NavBar, NavServices},
    notify::RecordingNotifier,
    session::{LoginResult, SettingsResult},
    PendingImage, UiConfig,
};

fn setup() -> (Rc<MockBackend>, NavBar) {
    let backend = MockBackend::new();
    let services = NavServices {
        auth: backend.clone(),
        author: backend.clone(),
        navigator: backend.clone(),
    };
    let nav = NavBar::new(services, Rc::new(RecordingNotifier::new()), UiConfig::default());
    (backend, nav)
}

#[test]
fn valid_session_loads_identity() {
    let (backend, nav) = setup();

    block_on(nav.init());

    let state = nav.state();
    assert_eq!(state.name.as_deref(), Some("Ada"));
    assert_eq!(state.avatar.as_deref(), Some("https://cdn.example.com/ada.png"));
    assert_eq!(backend.logged_out.get(), 0);
}

#[test]
fn rejected_session_logs_out_without_profile_lookups() {
    let (backend, nav) = setup();
    backend.token_valid.set(false);

    block_on(nav.init());

    assert_eq!(backend.logged_out.get(), 1);
    assert_eq!(backend.went_home.get(), 1);
    assert_eq!(backend.calls_to("display_name"), 0);
    assert_eq!(backend.calls_to("profile_picture"), 0);
    assert_eq!(nav.state().name, None);
    assert!(!nav.is_logged_in());
}

#[test]
fn opening_a_dialog_closes_the_drawer() {
    let (_backend, nav) = setup();
    nav.toggle_drawer();
    assert_eq!(nav.state().drawer, Drawer::Open);

    let (_closer, result) = modal::<LoginResult>();
    let _pending = nav.login(result);

    assert_eq!(nav.state().drawer, Drawer::Closed);
}

#[test]
fn login_adopts_returned_identity() {
    let (backend, nav) = setup();
    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };
    let (closer, result) = modal();
    let pending = nav.login(result);

    let outcome = block_on(form.submit(&*backend)).expect("login succeeds");
    closer.close(Some(outcome));
    block_on(pending);

    assert_eq!(nav.state().name.as_deref(), Some("Ada"));
    assert_eq!(nav.state().avatar.as_deref(), Some("https://cdn.example.com/ada.png"));
}

#[test]
fn wrong_password_surfaces_backend_reason() {
    let (backend, _nav) = setup();
    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: "nope".to_string(),
    };

    let err = block_on(form.submit(&*backend)).expect_err("login fails");

    assert!(matches!(err, SubmitError::Service(_)));
    assert_eq!(err.user_message(), "Wrong email or password");
}

#[test]
fn login_without_avatar_uses_default_picture() {
    let (_backend, nav) = setup();

    block_on(nav.login(ModalResult::ready(Some(LoginResult {
        name: "Grace".to_string(),
        avatar: None,
    }))));

    assert_eq!(nav.state().name.as_deref(), Some("Grace"));
    assert_eq!(
        nav.state().avatar,
        Some(UiConfig::default().default_profile_picture)
    );
}

#[test]
fn dismissed_login_changes_nothing() {
    let (_backend, nav) = setup();
    block_on(nav.init());
    let (closer, result) = modal::<LoginResult>();
    closer.dismiss();

    block_on(nav.login(result));

    assert_eq!(nav.state().name.as_deref(), Some("Ada"));
}

#[test]
fn registration_shows_new_name_with_default_avatar() {
    let (backend, nav) = setup();
    let form = RegisterForm {
        name: "Linus".to_string(),
        email: "linus@example.com".to_string(),
        password: "pw".to_string(),
    };
    let name = block_on(form.submit(&*backend)).expect("registered");
    let (closer, result) = modal();
    closer.close(Some(name));

    block_on(nav.register(result));

    assert_eq!(nav.state().name.as_deref(), Some("Linus"));
    assert_eq!(nav.state().avatar, Some(UiConfig::default().default_profile_picture));
    assert_eq!(backend.calls_to("register:linus@example.com"), 1);
}

#[test]
fn settings_merge_only_present_fields() {
    let (backend, nav) = setup();
    block_on(nav.init());

    let form = SettingsForm {
        name: String::new(),
        avatar: Some(PendingImage {
            file_name: "me.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }),
    };
    let result = block_on(form.submit(&*backend)).expect("saved");
    let (closer, dialog) = modal();
    closer.close(Some(result));
    block_on(nav.edit_settings(dialog));

    assert_eq!(nav.state().name.as_deref(), Some("Ada"));
    assert_eq!(nav.state().avatar.as_deref(), Some("https://cdn.example.com/me.png"));

    let (closer, dialog) = modal();
    closer.close(Some(SettingsResult {
        name: Some("Ada L.".to_string()),
        image: None,
    }));
    block_on(nav.edit_settings(dialog));

    assert_eq!(nav.state().name.as_deref(), Some("Ada L."));
    assert_eq!(nav.state().avatar.as_deref(), Some("https://cdn.example.com/me.png"));
}

#[test]
fn empty_settings_form_is_not_submitted() {
    let (backend, _nav) = setup();

    let err = block_on(SettingsForm::default().submit(&*backend)).expect_err("nothing set");

    assert!(matches!(err, SubmitError::Invalid(_)));
    assert_eq!(backend.calls_to("update_settings"), 0);
}

#[test]
fn widening_past_breakpoint_closes_drawer() {
    let (_backend, nav) = setup();
    nav.resize(500);
    nav.toggle_drawer();

    nav.resize(700);

    assert_eq!(nav.state().drawer, Drawer::Closed);
}

#[test]
fn narrowing_leaves_closed_drawer_closed() {
    let (_backend, nav) = setup();
    nav.resize(700);

    nav.resize(500);

    assert_eq!(nav.state().drawer, Drawer::Closed);
}

#[test]
fn logout_clears_identity_and_goes_home() {
    let (backend, nav) = setup();
    block_on(nav.init());
    nav.toggle_drawer();

    nav.logout();

    let state = nav.state();
    assert_eq!(state.name, None);
    assert_eq!(state.avatar, None);
    assert_eq!(state.drawer, Drawer::Closed);
    assert_eq!(backend.went_home.get(), 1);
    assert!(!nav.is_logged_in());
}
