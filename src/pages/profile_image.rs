//! Profile image kept as a data URL in local storage, keyed by user id.

#[cfg(test)]
#[path = "profile_image_test.rs"]
mod profile_image_test;

use std::rc::Rc;

use crate::error::FlowError;
use crate::net::provider::{IdentityProvider, Session};
use crate::state::storage::{KeyValueStore, profile_image_key};
use crate::ui::dom::{Document, display, ids};
use crate::ui::message::MessagePresenter;
use crate::util::data_url::ImageFile;

pub const PLACEHOLDER_LOGO_URL: &str = "https://fakeimg.pl/600x400";
pub const EMPTY_PREVIEW_SRC: &str = "#";

pub const UPLOADED: &str = "Profile image uploaded successfully (using local storage)!";
pub const REMOVED: &str = "Profile image removed successfully!";

/// Show `data_url` in the preview and the header logo.
pub fn show_image(doc: &dyn Document, data_url: &str) {
    doc.set_image_source(ids::IMAGE_PREVIEW, data_url);
    doc.set_display(ids::IMAGE_PREVIEW, display::BLOCK);
    doc.set_image_source(ids::LOGO_IMAGE, data_url);
}

/// Stored profile image for `uid`, if any.
pub fn load(store: &dyn KeyValueStore, uid: &str) -> Option<String> {
    store.get(&profile_image_key(uid))
}

#[derive(Clone)]
pub struct ProfileImageStore {
    provider: Rc<dyn IdentityProvider>,
    store: Rc<dyn KeyValueStore>,
    doc: Rc<dyn Document>,
    presenter: MessagePresenter,
}

impl ProfileImageStore {
    pub fn new(
        provider: Rc<dyn IdentityProvider>,
        store: Rc<dyn KeyValueStore>,
        doc: Rc<dyn Document>,
        presenter: MessagePresenter,
    ) -> Self {
        Self { provider, store, doc, presenter }
    }

    fn require_session(&self) -> Result<Session, FlowError> {
        self.provider.current_session().ok_or_else(|| {
            tracing::error!("no user signed in");
            self.presenter.error(&FlowError::NotSignedIn.to_string());
            FlowError::NotSignedIn
        })
    }

    fn set_busy(&self, busy: bool) {
        self.doc
            .set_display(ids::IMAGE_UPLOAD_LOADING, if busy { display::FLEX } else { display::NONE });
    }

    /// Show `err`, drop the spinner, and hand the error back.
    fn fail(&self, err: FlowError) -> FlowError {
        self.presenter.error(&err.to_string());
        self.set_busy(false);
        err
    }

    /// Read `file` and make it the signed-in user's profile image.
    ///
    /// The upload spinner is shown while reading and hidden on every
    /// outcome. The page only shows the image once storage holds it.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotSignedIn`] without a session, [`FlowError::Read`] if
    /// the file cannot be read, [`FlowError::Store`] if storage rejects it.
    pub async fn upload(&self, file: &dyn ImageFile) -> Result<(), FlowError> {
        let session = self.require_session()?;
        self.set_busy(true);

        let data_url = match file.read_as_data_url().await {
            Ok(data_url) => data_url,
            Err(err) => {
                tracing::error!(file = file.name(), error = %err, "profile image read failed");
                return Err(self.fail(err.into()));
            }
        };

        if let Err(err) = self.store.set(&profile_image_key(&session.uid), &data_url) {
            tracing::error!(uid = %session.uid, bytes = data_url.len(), error = %err, "profile image not stored");
            return Err(self.fail(err.into()));
        }
        show_image(self.doc.as_ref(), &data_url);
        tracing::info!(uid = %session.uid, bytes = data_url.len(), "profile image stored");
        self.presenter.success(UPLOADED);
        self.set_busy(false);
        Ok(())
    }

    /// Delete the signed-in user's profile image and reset the page.
    ///
    /// # Errors
    ///
    /// [`FlowError::NotSignedIn`] without a session, [`FlowError::Store`] if
    /// the entry could not be deleted. The page is left as it was on error.
    pub fn remove(&self) -> Result<(), FlowError> {
        let session = self.require_session()?;
        if let Err(err) = self.store.remove(&profile_image_key(&session.uid)) {
            tracing::error!(uid = %session.uid, error = %err, "profile image not removed");
            let err = FlowError::from(err);
            self.presenter.error(&err.to_string());
            return Err(err);
        }

        self.doc.set_image_source(ids::IMAGE_PREVIEW, EMPTY_PREVIEW_SRC);
        self.doc.set_display(ids::IMAGE_PREVIEW, display::NONE);
        self.doc.set_image_source(ids::LOGO_IMAGE, PLACEHOLDER_LOGO_URL);

        tracing::info!(uid = %session.uid, "profile image removed");
        self.presenter.success(REMOVED);
        Ok(())
    }
}
