use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub status: Status,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    PendingProfile,
    Verified,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::PendingProfile => "pending_profile".into(),
            Self::Verified => "verified".into(),
        }
    }
}

impl Driver {
    pub fn with_phone(phone: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: Some(phone),
            email: None,
            first_name: None,
            last_name: None,
            status: Status::PendingProfile,
        }
    }

    pub fn with_email(email: String, first_name: String, last_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone: None,
            email: Some(email),
            first_name: Some(first_name),
            last_name: Some(last_name),
            status: Status::Verified,
        }
    }

    pub fn complete_profile(&mut self, first_name: String, last_name: String, email: String) {
        self.first_name = Some(first_name);
        self.last_name = Some(last_name);
        self.email = Some(email);
        self.status = Status::Verified;
    }
}
