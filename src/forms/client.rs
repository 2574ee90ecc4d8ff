use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{ClientStatus, NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating a new client from the add-client modal.
pub struct AddClientForm {
    /// Display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact email, optional.
    #[serde(default)]
    pub email: String,
    /// Contact phone number, optional.
    #[serde(default)]
    pub phone: String,
    /// Coaching engagement type, e.g. "Life Coaching".
    #[validate(length(min = 1))]
    pub coaching_type: String,
    #[serde(default)]
    pub status: ClientStatus,
}

impl AddClientForm {
    /// Builds the domain payload, validating the optional contact fields.
    pub fn into_new_client(self) -> Result<NewClient, FormError> {
        let name = ClientName::new(&self.name).map_err(|_| FormError::InvalidName)?;
        let email = optional_email(&self.email)?;
        let phone = optional_phone(&self.phone)?;

        Ok(NewClient::new(
            name.into_inner(),
            email,
            phone,
            self.coaching_type,
            self.status,
        ))
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct SaveClientForm {
    /// Client identifier.
    pub id: i32,
    /// Updated display name.
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[validate(length(min = 1))]
    pub coaching_type: String,
    pub status: ClientStatus,
    /// Goal progress, clamped to 0..=100.
    #[validate(range(min = 0, max = 100))]
    pub progress: u8,
}

impl SaveClientForm {
    pub fn into_update(self) -> Result<UpdateClient, FormError> {
        let name = ClientName::new(&self.name).map_err(|_| FormError::InvalidName)?;
        let email = optional_email(&self.email)?;
        let phone = optional_phone(&self.phone)?;

        Ok(UpdateClient::new(
            name.into_inner(),
            email,
            phone,
            self.coaching_type,
            self.status,
            self.progress,
        ))
    }
}

#[derive(Debug, Deserialize)]
/// Form data naming a single client, used by the delete action.
pub struct ClientIdForm {
    pub id: i32,
}

/// Bulk-action request over the selected table rows. Decoded with
/// `serde_html_form` because `ids` repeats once per checked row. The
/// active filters ride along as hidden fields so the selection stays
/// scoped to what the visitor could actually see.
#[derive(Debug, Deserialize)]
pub struct BulkActionForm {
    pub action: String,
    #[serde(default)]
    pub ids: Vec<i32>,
    pub q: Option<String>,
    pub status: Option<String>,
    pub payment: Option<String>,
    #[serde(rename = "type")]
    pub coaching_type: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl BulkActionForm {
    /// The list query this action was issued against.
    pub fn list_query(&self) -> crate::dto::client::ClientListQuery {
        crate::dto::client::ClientListQuery {
            q: self.q.clone(),
            status: self.status.clone(),
            payment: self.payment.clone(),
            coaching_type: self.coaching_type.clone(),
            sort: self.sort.clone(),
            dir: self.dir.clone(),
        }
    }
}

#[derive(MultipartForm)]
/// CSV upload used by the client import action.
pub struct UploadClientsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Deserialize)]
struct ClientCsvRecord {
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default, rename = "type")]
    coaching_type: String,
    #[serde(default)]
    status: String,
}

impl UploadClientsForm {
    /// Parses the uploaded CSV into domain payloads.
    ///
    /// Expected header: `name,email,phone,type,status`; email, phone, and
    /// status may be blank.
    pub fn parse(&mut self) -> Result<Vec<NewClient>, FormError> {
        let mut raw = String::new();
        self.csv
            .file
            .read_to_string(&mut raw)
            .map_err(|e| FormError::InvalidCsv(e.to_string()))?;

        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let mut clients = Vec::new();

        for record in reader.deserialize::<ClientCsvRecord>() {
            let record = record.map_err(|e| FormError::InvalidCsv(e.to_string()))?;

            let name = ClientName::new(&record.name).map_err(|_| FormError::InvalidName)?;
            let email = optional_email(&record.email)?;
            let phone = optional_phone(&record.phone)?;
            let status = if record.status.trim().is_empty() {
                ClientStatus::Active
            } else {
                ClientStatus::parse(record.status.trim()).ok_or(FormError::InvalidStatus)?
            };

            clients.push(NewClient::new(
                name.into_inner(),
                email,
                phone,
                record.coaching_type,
                status,
            ));
        }

        Ok(clients)
    }
}

fn optional_email(value: &str) -> Result<Option<String>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    ClientEmail::new(value)
        .map(|email| Some(email.into_inner()))
        .map_err(|_| FormError::InvalidEmail)
}

fn optional_phone(value: &str) -> Result<Option<String>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    PhoneNumber::new(value)
        .map(|phone| Some(phone.into_inner()))
        .map_err(|_| FormError::InvalidPhoneNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_client_form_normalizes_contact_fields() {
        let form = AddClientForm {
            name: "  Sarah Johnson ".to_string(),
            email: " Sarah.Johnson@Email.com ".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            coaching_type: "Life Coaching".to_string(),
            status: ClientStatus::Active,
        };

        let new_client = form.into_new_client().expect("valid form");
        assert_eq!(new_client.name, "Sarah Johnson");
        assert_eq!(new_client.email.as_deref(), Some("sarah.johnson@email.com"));
        assert_eq!(new_client.phone.as_deref(), Some("+15551234567"));
    }

    #[test]
    fn add_client_form_rejects_bad_email() {
        let form = AddClientForm {
            name: "Sarah".to_string(),
            email: "not-an-email".to_string(),
            phone: String::new(),
            coaching_type: "Life Coaching".to_string(),
            status: ClientStatus::Active,
        };

        assert!(matches!(
            form.into_new_client(),
            Err(FormError::InvalidEmail)
        ));
    }

    #[test]
    fn blank_contact_fields_become_none() {
        let form = AddClientForm {
            name: "Sarah".to_string(),
            email: "   ".to_string(),
            phone: String::new(),
            coaching_type: "Life Coaching".to_string(),
            status: ClientStatus::Active,
        };

        let new_client = form.into_new_client().expect("valid form");
        assert_eq!(new_client.email, None);
        assert_eq!(new_client.phone, None);
    }
}
