//! Admin statistics.

use crate::error::ClientError;
use crate::handlers::Controller;
use crate::view::{ModalId, render_doctor_stats, render_system_stats};

impl Controller {
    /// Patient and appointment totals, reduced client-side from one large
    /// list request
    pub async fn system_stats(&mut self) -> Result<(), ClientError> {
        self.require_admin("system_stats")?;

        let data = self
            .api
            .list_patients(self.session.token(), 1, self.stats_fetch_limit)
            .await?;

        self.screen.system_stats = Some(render_system_stats(&data.patients, &self.session));
        self.modals.open(ModalId::Stats);
        Ok(())
    }

    /// Appointments per doctor, as ordered by the server
    pub async fn appointment_stats(&mut self) -> Result<(), ClientError> {
        self.require_admin("appointment_stats")?;

        let rows = self.api.appointment_stats(self.session.token()).await?;
        self.screen.doctor_stats = Some(render_doctor_stats(&rows));
        Ok(())
    }
}
