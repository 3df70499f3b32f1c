pub mod common {
    pub const LOADING: &str = "Loading...";
    pub const CANCEL: &str = "Cancel";
    pub const CLOSE_ARIA: &str = "Close";
}

pub mod loading_spinner {
    pub const ARIA_LABEL: &str = "Loading";
}

pub mod toast {
    pub const REGION_ARIA: &str = "Notifications";
    pub const DISMISS_ARIA: &str = "Dismiss notification";
}

pub mod header {
    pub const BRAND_NAME: &str = "The Lighthouse";
    pub const NAV_MAIN_ARIA: &str = "Main navigation";
    pub const MOBILE_NAV_ARIA: &str = "Mobile navigation";
    pub const OPEN_MENU_ARIA: &str = "Open menu";
    pub const CLOSE_MENU_ARIA: &str = "Close menu";
    pub const NAV_ARTICLES: &str = "My articles";
    pub const NAV_NEW_ARTICLE: &str = "New article";
    pub const SETTINGS: &str = "Settings";
    pub const LOGOUT: &str = "Log out";
    pub const LOGIN: &str = "Log in";
    pub const REGISTER: &str = "Sign up";
    pub const AVATAR_ALT: &str = "Profile picture";
}

pub mod home {
    pub const TITLE: &str = "The Lighthouse";
    pub const TAGLINE: &str = "Write, polish and publish your articles.";
    pub const GO_TO_ARTICLES: &str = "Go to my articles";
    pub const SIGNED_OUT_HINT: &str = "Log in or sign up from the menu to start writing.";
}

pub mod editor {
    pub const PAGE_TITLE_NEW: &str = "New article";
    pub const PAGE_TITLE_EDIT: &str = "Edit article";
    pub const LOADING_ARTICLE: &str = "Loading article...";
    pub const TITLE_LABEL: &str = "Title";
    pub const DESCRIPTION_LABEL: &str = "Description";
    pub const COVER_LABEL: &str = "Cover photo";
    pub const COVER_ALT: &str = "Cover preview";
    pub const PREVIEW_COVER: &str = "Preview & crop";
    pub const TAGS_LABEL: &str = "Tags";
    pub const TAG_PLACEHOLDER: &str = "Add a tag and press Enter";
    pub const REMOVE_TAG_ARIA_TEMPLATE: &str = "Remove tag {}";
    pub const SAVE: &str = "Save";
    pub const SAVING: &str = "Saving...";
    pub const PUBLISH: &str = "Publish";
    pub const PLACEHOLDER: &str = "Edit Content Here";
    pub const GIST_COMMAND: &str = "Insert Gist";
}

pub mod dashboard {
    pub const TITLE: &str = "My articles";
    pub const NEW_ARTICLE: &str = "New article";
    pub const SETTINGS: &str = "Settings";
    pub const EMPTY: &str = "You have not written anything yet.";
    pub const PUBLISHED: &str = "Published";
    pub const DRAFT: &str = "Draft";
    pub const EDIT: &str = "Edit";
    pub const PUBLISH: &str = "Publish";
    pub const DELETE: &str = "Delete";
    pub const COVER_ALT: &str = "Article cover";
}

pub mod create_modal {
    pub const TITLE: &str = "Create a new article";
    pub const TITLE_LABEL: &str = "Title";
    pub const SUBMIT: &str = "Create";
}

pub mod delete_modal {
    pub const TITLE: &str = "Delete article";
    pub const PROMPT_TEMPLATE: &str = "Type \"{}\" to confirm. This cannot be undone.";
    pub const SUBMIT: &str = "Delete";
}

pub mod login_modal {
    pub const TITLE: &str = "Log in";
    pub const EMAIL: &str = "Email";
    pub const PASSWORD: &str = "Password";
    pub const SUBMIT: &str = "Log in";
}

pub mod register_modal {
    pub const TITLE: &str = "Create an account";
    pub const NAME: &str = "Display name";
    pub const EMAIL: &str = "Email";
    pub const PASSWORD: &str = "Password";
    pub const SUBMIT: &str = "Sign up";
}

pub mod settings_modal {
    pub const TITLE: &str = "Settings";
    pub const NAME: &str = "Display name";
    pub const NAME_PLACEHOLDER: &str = "Leave blank to keep the current name";
    pub const AVATAR: &str = "Profile picture";
    pub const SUBMIT: &str = "Save";
}

pub mod image_preview_modal {
    pub const TITLE: &str = "Crop cover photo";
    pub const ZOOM: &str = "Zoom";
    pub const IMAGE_ALT: &str = "Image being cropped";
    pub const SUBMIT: &str = "Use this crop";
}

pub mod gist_modal {
    pub const TITLE: &str = "Embed a gist";
    pub const LINK_LABEL: &str = "Gist link or id";
    pub const LINK_PLACEHOLDER: &str = "https://gist.github.com/user/0123abcd";
    pub const SUBMIT: &str = "Insert";
}

pub mod not_found_page {
    pub const TITLE: &str = "404 - Page not found";
    pub const BODY: &str = "The page you are looking for does not exist.";
    pub const BACK_HOME: &str = "Back to the home page";
}
