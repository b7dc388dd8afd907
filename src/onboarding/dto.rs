use serde::Serialize;

use super::schema::FieldDescriptor;

/// Body of a successful GET: the form steps as the client renders them.
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub steps: Vec<Vec<FieldDescriptor>>,
}
