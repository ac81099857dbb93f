//! Login, logout and session verification.

use tracing::info;

use crate::error::ClientError;
use crate::handlers::Controller;
use crate::view::{fields, render_user_badge};

impl Controller {
    /// Sign in with the username/password fields, then load the first page.
    ///
    /// On failure nothing changes: no session, no list request.
    pub async fn login(&mut self) -> Result<(), ClientError> {
        let username = self.inputs.value(fields::USERNAME);
        let password = self.inputs.value(fields::PASSWORD);

        self.session.login(&self.api, &username, &password).await?;
        info!(username = %username, admin = self.session.is_admin(), "Signed in");

        self.screen.user = render_user_badge(&self.session);
        self.notifier.success(format!("Welcome back, {username}"));
        self.load_patients(1).await
    }

    /// Sign out. Always succeeds locally, whatever the server says.
    pub async fn logout(&mut self) {
        self.session.logout(&self.api).await;
        self.screen.reset();
        self.modals.close_all();
        self.inputs.clear(&[fields::PASSWORD]);
        self.notifier.success("Logged out successfully");
    }

    /// Ask the server whether the current token is still accepted
    pub async fn verify_session(&mut self) -> Result<(), ClientError> {
        let ack = self.api.verify_token(self.session.token()).await?;
        self.notifier
            .success(ack.message.unwrap_or_else(|| "Session is valid".to_string()));
        Ok(())
    }
}
