#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod stores;

use rusqlite::Connection;

use crate::AppState;

pub(crate) use form::{
    assert_form_checkbox, assert_form_error_message, assert_form_input,
    assert_form_input_with_value, assert_form_select, assert_form_submit_button_with_text,
    assert_hx_endpoint, must_get_form, test_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect};
pub(crate) use stores::{FailingStore, RecordingInvalidator};

/// An [AppState] backed by a fresh in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory");

    AppState::new(connection).expect("Could not initialize the database")
}
