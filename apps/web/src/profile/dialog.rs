use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::client::ApiClient;
use crate::notice::Notice;
use crate::session::UserSession;

use super::form::ProfileForm;

pub const UNSUCCESSFUL_UPDATE_MESSAGE: &str = "Something went wrong, please try again.";

/// Shared view of whether a submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.0.clone())
    }
}

/// Clears the flag however the submission ends.
struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// State of the "update profile" dialog. Closes on a successful submit and
/// stays open with the form untouched on any failure.
#[derive(Debug)]
pub struct ProfileDialog {
    session: UserSession,
    form: ProfileForm,
    synced_generation: u64,
    open: bool,
    loading: LoadingFlag,
}

impl ProfileDialog {
    pub fn new(session: UserSession) -> Self {
        let form = ProfileForm::from_user(session.current().as_ref());
        let synced_generation = session.generation();
        Self {
            session,
            form,
            synced_generation,
            open: false,
            loading: LoadingFlag::default(),
        }
    }

    pub fn open(&mut self) {
        self.sync();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn loading(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Reloads the form if the session user changed since the last load.
    /// Returns whether it did.
    pub fn sync(&mut self) -> bool {
        let generation = self.session.generation();
        if generation == self.synced_generation {
            return false;
        }
        self.form = ProfileForm::from_user(self.session.current().as_ref());
        self.synced_generation = generation;
        true
    }

    pub async fn submit(&mut self, client: &ApiClient) -> Notice {
        let request = self.form.to_request();
        debug!(email = %request.email, "profile dialog submit");

        let result = {
            let _guard = self.loading.begin();
            client
                .update_profile(self.session.credential(), &request)
                .await
        };

        match result {
            Ok(response) if response.success => {
                if let Some(user) = response.user {
                    info!(user_id = %user.id, "profile updated");
                    self.session.set_user(user);
                    self.sync();
                }
                self.close();
                Notice::Success(response.message)
            }
            Ok(response) => {
                error!(message = %response.message, "profile update unsuccessful");
                Notice::Error(UNSUCCESSFUL_UPDATE_MESSAGE.to_string())
            }
            Err(e) => {
                error!("profile update failed: {e}");
                Notice::Error(e.user_message())
            }
        }
    }
}
