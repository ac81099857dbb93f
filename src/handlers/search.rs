//! Free-text patient search.

use crate::error::ClientError;
use crate::handlers::Controller;
use crate::view::{Listing, fields, render_patient_list};

impl Controller {
    /// Replace the list with search results. The query goes to the server
    /// as typed (after trimming). Results are unpaged, so the pagination
    /// region is dropped until the list is reloaded.
    pub async fn search(&mut self) -> Result<(), ClientError> {
        let query = self.inputs.value(fields::SEARCH_QUERY);
        if query.is_empty() {
            self.notifier.warning("Enter search term");
            return Ok(());
        }

        let found = self.api.search_patients(self.session.token(), &query).await?;

        self.screen.patients = Some(render_patient_list(&found.results, &self.session));
        self.screen.pagination = None;
        self.screen.listing = Listing::Search { query };
        self.notifier
            .success(format!("Found {} results", found.results.len()));
        Ok(())
    }

    /// Back to the first page of the full list
    pub async fn clear_search(&mut self) -> Result<(), ClientError> {
        self.inputs.clear(&[fields::SEARCH_QUERY]);
        self.load_patients(1).await?;
        self.notifier.success("Search cleared");
        Ok(())
    }
}
