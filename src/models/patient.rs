//! Patient models.

use serde::{Deserialize, Serialize};

use super::Appointment;

/// A patient record as returned by the list, detail and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    /// Sent by the list endpoint in place of the full appointment array
    #[serde(default)]
    pub appointment_count: Option<usize>,
}

impl Patient {
    /// Number of appointments, whichever way the server reported it
    pub fn appointment_count(&self) -> usize {
        self.appointment_count.unwrap_or(self.appointments.len())
    }

    /// Current values as a pre-filled edit form
    pub fn to_form(&self) -> PatientForm {
        PatientForm {
            name: self.name.clone().unwrap_or_default(),
            age: self.age.map(|a| a.to_string()).unwrap_or_default(),
            condition: self.condition.clone().unwrap_or_default(),
            image_url: self.image_url.clone().filter(|u| !u.is_empty()),
            gender: self.gender.clone().filter(|g| !g.is_empty()),
        }
    }
}

/// Fields submitted when creating or updating a patient.
///
/// Age is passed through as typed; range checks belong to the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatientForm {
    pub name: String,
    pub age: String,
    pub condition: String,
    pub image_url: Option<String>,
    pub gender: Option<String>,
}

impl PatientForm {
    /// Multipart field pairs; optional fields are omitted when absent
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("age", self.age.clone()),
            ("condition", self.condition.clone()),
        ];
        if let Some(gender) = &self.gender {
            fields.push(("gender", gender.clone()));
        }
        if let Some(image_url) = &self.image_url {
            fields.push(("image_url", image_url.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_detail_shapes() {
        let listed: Patient = serde_json::from_str(
            r#"{"id":"p1","name":"Maria Garcia","age":41,"gender":"female","condition":"Asthma","appointment_count":3}"#,
        )
        .unwrap();
        assert_eq!(listed.id, "p1");
        assert_eq!(listed.appointment_count(), 3);
        assert!(listed.appointments.is_empty());

        let detailed: Patient = serde_json::from_str(
            r#"{"_id":"p2","name":"John Smith","age":67,"condition":"Hypertension","image_url":null,
                "appointments":[{"_id":"a1","doctor":"Dr. Lee","date":"2025-03-05T14:30","notes":"Checkup","status":"Scheduled"}]}"#,
        )
        .unwrap();
        assert_eq!(detailed.id, "p2");
        assert_eq!(detailed.appointment_count(), 1);
    }

    #[test]
    fn test_form_fields_omit_absent_optionals() {
        let form = PatientForm {
            name: "John Smith".to_string(),
            age: "67".to_string(),
            condition: "Hypertension".to_string(),
            image_url: None,
            gender: None,
        };
        let names: Vec<_> = form.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["name", "age", "condition"]);

        let with_image = PatientForm {
            image_url: Some("https://img.example/p.png".to_string()),
            ..form
        };
        assert!(with_image.fields().iter().any(|(k, _)| *k == "image_url"));
    }
}
