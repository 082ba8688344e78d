//! User-facing wording for statuses, validation violations and flashes

use crate::models::reservation::ReservationStatus;
use crate::services::validation::{Field, Violation};

/// Field name as it appears in messages
pub fn field_label(field: Field) -> &'static str {
    match field {
        Field::CustomerName => "customer name",
        Field::Phone => "phone",
        Field::PartySize => "party size",
        Field::ReservedAt => "reserved at",
        Field::Status => "status",
    }
}

pub fn violation_message(field: Field, violation: Violation) -> String {
    let name = field_label(field);
    match violation {
        Violation::Required => format!("The {} field is required.", name),
        Violation::NotString => format!("The {} field must be a string.", name),
        Violation::TooLong { max } => format!(
            "The {} field must not be greater than {} characters.",
            name, max
        ),
        Violation::InvalidFormat => format!("The {} field format is invalid.", name),
        Violation::NotInteger => format!("The {} field must be an integer.", name),
        Violation::OutOfRange { min, max } => {
            format!("The {} field must be between {} and {}.", name, min, max)
        }
        Violation::InvalidDate => format!("The {} field must be a valid date.", name),
        Violation::InThePast => format!(
            "The {} field must be a date after or equal to now.",
            name
        ),
        Violation::NotAllowed => format!("The selected {} is invalid.", name),
    }
}

pub fn status_label(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "Pending",
        ReservationStatus::Confirmed => "Confirmed",
        ReservationStatus::Seated => "Seated",
        ReservationStatus::Canceled => "Canceled",
    }
}

/// Tailwind classes for the status badge
pub fn status_badge_class(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "bg-yellow-100 text-yellow-800",
        ReservationStatus::Confirmed => "bg-green-100 text-green-800",
        ReservationStatus::Seated => "bg-blue-100 text-blue-800",
        ReservationStatus::Canceled => "bg-red-100 text-red-800",
    }
}
