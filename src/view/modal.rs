//! Modal visibility.
//!
//! Each modal is independently `closed` or `open`. Opening an open modal is a
//! no-op, closing one modal leaves the others alone, and the cancel key closes
//! every open modal at once.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModalId {
    PatientDetails,
    EditPatient,
    EditAppointment,
    Stats,
}

impl ModalId {
    pub const ALL: [ModalId; 4] = [
        ModalId::PatientDetails,
        ModalId::EditPatient,
        ModalId::EditAppointment,
        ModalId::Stats,
    ];

    /// Element id of the modal container
    pub fn element_id(&self) -> &'static str {
        match self {
            ModalId::PatientDetails => "patient-details-modal",
            ModalId::EditPatient => "edit-patient-modal",
            ModalId::EditAppointment => "edit-appointment-modal",
            ModalId::Stats => "stats-modal",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

impl FromStr for ModalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.element_id() == s)
            .ok_or_else(|| format!("Unknown modal '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    open: BTreeSet<ModalId>,
}

impl ModalState {
    pub fn open(&mut self, id: ModalId) {
        self.open.insert(id);
    }

    pub fn close(&mut self, id: ModalId) {
        self.open.remove(&id);
    }

    /// Cancel key: every open modal transitions to closed
    pub fn close_all(&mut self) {
        self.open.clear();
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.contains(&id)
    }

    pub fn open_modals(&self) -> impl Iterator<Item = ModalId> + '_ {
        self.open.iter().copied()
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }
}
