use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;
use crate::error::{invalid_invocation_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    pub rider_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup: Coordinates,
    pub destination: Coordinates,
    pub fare: f64,
    pub status: Status,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Requested,
    Accepted { accepted_at: DateTime<Utc> },
    InProgress { started_at: DateTime<Utc> },
    Completed { completed_at: DateTime<Utc> },
    Cancelled,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Requested => "requested".into(),
            Self::Accepted { accepted_at: _ } => "accepted".into(),
            Self::InProgress { started_at: _ } => "in_progress".into(),
            Self::Completed { completed_at: _ } => "completed".into(),
            Self::Cancelled => "cancelled".into(),
        }
    }
}

impl Ride {
    pub fn new(rider_id: Uuid, pickup: Coordinates, destination: Coordinates, fare: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            rider_id,
            driver_id: None,
            pickup,
            destination,
            fare,
            status: Status::Requested,
        }
    }

    pub fn is_requested(&self) -> bool {
        match self.status {
            Status::Requested => true,
            _ => false,
        }
    }

    #[tracing::instrument]
    pub fn accept(&mut self, driver_id: Uuid) -> Result<(), Error> {
        match self.status {
            Status::Requested => {
                self.status = Status::Accepted {
                    accepted_at: Utc::now(),
                };
                self.driver_id = Some(driver_id);
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn start(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Accepted { accepted_at: _ } => {
                self.status = Status::InProgress {
                    started_at: Utc::now(),
                };
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument]
    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::InProgress { started_at: _ } => {
                self.status = Status::Completed {
                    completed_at: Utc::now(),
                };
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    // a ride in progress has a passenger on board, only the terminal
    // transitions apply from there
    #[tracing::instrument]
    pub fn cancel(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Requested | Status::Accepted { accepted_at: _ } => {
                self.status = Status::Cancelled;
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ride() -> Ride {
        let pickup = Coordinates::new(12.9716, 77.5946);
        let destination = Coordinates::new(12.2958, 76.6394);

        Ride::new(Uuid::new_v4(), pickup, destination, 42.50)
    }

    #[test]
    fn full_lifecycle_succeeds() {
        let mut ride = new_ride();
        let driver_id = Uuid::new_v4();

        assert!(ride.is_requested());
        ride.accept(driver_id).unwrap();
        assert_eq!(ride.driver_id, Some(driver_id));
        assert_eq!(ride.status.name(), "accepted");

        ride.start().unwrap();
        assert_eq!(ride.status.name(), "in_progress");

        ride.complete().unwrap();
        assert_eq!(ride.status.name(), "completed");
    }

    #[test]
    fn accept_requires_requested_state() {
        let mut ride = new_ride();

        ride.accept(Uuid::new_v4()).unwrap();
        assert!(ride.accept(Uuid::new_v4()).is_err());
    }

    #[test]
    fn start_requires_accepted_state() {
        let mut ride = new_ride();

        assert!(ride.start().is_err());
    }

    #[test]
    fn cancel_is_rejected_once_in_progress() {
        let mut ride = new_ride();

        ride.accept(Uuid::new_v4()).unwrap();
        ride.start().unwrap();

        assert!(ride.cancel().is_err());
    }

    #[test]
    fn cancel_from_requested_succeeds() {
        let mut ride = new_ride();

        ride.cancel().unwrap();
        assert_eq!(ride.status.name(), "cancelled");
        assert!(ride.complete().is_err());
    }
}
