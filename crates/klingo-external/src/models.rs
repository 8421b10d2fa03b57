//! Typed models for the external API.
//!
//! Field names follow the crate's conventions; the platform's Portuguese
//! wire names are mapped through serde renames.

use chrono::NaiveDate;
use klingo_core::query::QueryParams;
use serde::{Deserialize, Serialize};

/// Generic response envelope used by every external endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalResponse<T> {
    /// Whether the platform accepted the request.
    #[serde(default)]
    pub success: bool,
    /// Payload, present on success.
    pub data: Option<T>,
    /// Informational message.
    pub message: Option<String>,
    /// Error description, present on failure.
    pub error: Option<String>,
}

/// A patient matched by phone or CPF identification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatientIdentification {
    /// Platform person id.
    #[serde(rename = "id_pessoa")]
    pub id: i64,
    /// Full name.
    #[serde(rename = "st_nome")]
    pub name: String,
    /// CPF, when registered.
    #[serde(rename = "st_cpf")]
    pub cpf: Option<String>,
    /// Birth date, when registered.
    #[serde(rename = "dt_nascimento")]
    pub birth_date: Option<String>,
    /// Phone number.
    #[serde(rename = "st_telefone")]
    pub phone: Option<String>,
    /// E-mail address.
    #[serde(rename = "st_email")]
    pub email: Option<String>,
}

/// An open schedule slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slot {
    /// Slot id, used to reserve.
    pub id: i64,
    /// Date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// Time (`HH:MM`).
    #[serde(rename = "hora")]
    pub time: String,
    /// Practitioner id.
    #[serde(rename = "id_medico")]
    pub practitioner_id: i64,
    /// Practitioner display name.
    #[serde(rename = "nome_medico")]
    pub practitioner_name: String,
    /// Specialty name.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Slot duration in minutes, when the schedule defines one.
    #[serde(rename = "duracao")]
    pub duration: Option<u32>,
}

/// Filters for the open-slot listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotQuery {
    /// Restrict to one specialty.
    pub specialty: Option<i64>,
    /// Restrict to one exam type.
    pub exam: Option<i64>,
    /// Restrict to one professional.
    pub professional: Option<i64>,
    /// Restrict to slots covered by one health plan.
    pub plan: Option<i64>,
    /// Range start.
    pub from: NaiveDate,
    /// Range end.
    pub to: NaiveDate,
    /// Restrict by council registration number.
    pub council_number: Option<String>,
}

impl SlotQuery {
    /// Query over a date range, with no other filters.
    #[must_use]
    pub const fn range(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            specialty: None,
            exam: None,
            professional: None,
            plan: None,
            from,
            to,
            council_number: None,
        }
    }

    /// Convert into URL query pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("especialidade", self.specialty);
        params.push_opt("exame", self.exam);
        params.push_opt("profissional", self.professional);
        params.push_opt("plano", self.plan);
        params.push("inicio", self.from.format("%Y-%m-%d"));
        params.push("fim", self.to.format("%Y-%m-%d"));
        params.push_opt("crm", self.council_number.as_deref());
        params.into_pairs()
    }
}

/// A bookable specialty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Specialty {
    /// Specialty id.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// A bookable exam type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Exam {
    /// Exam id.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// A professional visible to the external API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Professional {
    /// Professional id.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Council registration number.
    #[serde(rename = "crm")]
    pub council_number: Option<String>,
    /// Specialty name.
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
}

/// A health plan accepted by the clinic.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthPlan {
    /// Plan id.
    pub id: i64,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// Price quote for a procedure under a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Price {
    /// Amount in the clinic's currency.
    #[serde(rename = "valor")]
    pub amount: f64,
    /// Procedure name.
    #[serde(rename = "procedimento")]
    pub procedure: Option<String>,
    /// Plan name.
    #[serde(rename = "plano")]
    pub plan: Option<String>,
}

/// A temporary hold on a slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reservation {
    /// Reservation id, used to confirm or cancel.
    pub id: String,
    /// Expiry timestamp, when the platform reports one.
    #[serde(rename = "expira_em")]
    pub expires_at: Option<String>,
    /// Reserved date.
    #[serde(rename = "data")]
    pub date: String,
    /// Reserved time.
    #[serde(rename = "hora")]
    pub time: String,
    /// Practitioner id.
    #[serde(rename = "id_medico")]
    pub practitioner_id: i64,
}

/// Request to hold a slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReserveSlotRequest {
    /// Slot to hold.
    #[serde(rename = "id_horario")]
    pub slot_id: i64,
    /// Patient the hold is for.
    #[serde(rename = "id_paciente")]
    pub patient_id: i64,
}

/// Request to turn a reservation into a booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmBookingRequest {
    /// Reservation to confirm.
    #[serde(rename = "id_reserva")]
    pub reservation_id: String,
    /// Patient being booked.
    #[serde(rename = "id_paciente")]
    pub patient_id: i64,
    /// Health plan covering the visit.
    #[serde(rename = "id_plano", skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
    /// Free-form note attached to the booking.
    #[serde(rename = "observacao", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookingConfirmation {
    /// Voucher id identifying the booking.
    pub voucher_id: i64,
    /// Booked date.
    #[serde(rename = "data")]
    pub date: String,
    /// Booked time.
    #[serde(rename = "hora")]
    pub time: String,
    /// Professional display name.
    #[serde(rename = "profissional")]
    pub professional: String,
    /// Specialty name.
    #[serde(rename = "especialidade")]
    pub specialty: Option<String>,
}

/// A booking voucher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Voucher {
    /// Voucher id.
    pub id: i64,
    /// Booked date.
    #[serde(rename = "data")]
    pub date: String,
    /// Booked time.
    #[serde(rename = "hora")]
    pub time: String,
    /// Professional display name.
    #[serde(rename = "profissional")]
    pub professional: String,
    /// Specialty name.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Booking status.
    pub status: String,
    /// Patient display name.
    #[serde(rename = "paciente")]
    pub patient: Option<String>,
}

/// One entry of the telephony confirmation list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhoneListAppointment {
    /// Confirmation entry id.
    pub id: i64,
    /// Booking the entry refers to.
    #[serde(rename = "id_marcacao")]
    pub booking_id: i64,
    /// Patient display name.
    #[serde(rename = "paciente")]
    pub patient: String,
    /// Patient phone number.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// Booked date.
    #[serde(rename = "data")]
    pub date: String,
    /// Booked time.
    #[serde(rename = "hora")]
    pub time: String,
    /// Professional display name.
    #[serde(rename = "profissional")]
    pub professional: String,
    /// Specialty name.
    #[serde(rename = "especialidade")]
    pub specialty: String,
    /// Current confirmation status.
    #[serde(rename = "status_confirmacao")]
    pub confirmation_status: String,
    /// Self-service confirmation link.
    #[serde(rename = "link_confirmacao")]
    pub confirm_link: Option<String>,
    /// Self-service cancellation link.
    #[serde(rename = "link_cancelamento")]
    pub cancel_link: Option<String>,
    /// Self-service reschedule link.
    #[serde(rename = "link_remarcacao")]
    pub reschedule_link: Option<String>,
}

/// Patient reply recorded for a confirmation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfirmationReply {
    /// Patient confirmed attendance.
    #[serde(rename = "C")]
    Confirmed,
    /// Patient will not attend.
    #[serde(rename = "N")]
    NoShow,
    /// Patient asked to reschedule.
    #[serde(rename = "R")]
    Reschedule,
}

/// A blocked period on the schedule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduleBlock {
    /// Block id.
    pub id: i64,
    /// Block start date.
    #[serde(rename = "data_inicio")]
    pub start_date: String,
    /// Block end date.
    #[serde(rename = "data_fim")]
    pub end_date: String,
    /// Reason for the block.
    #[serde(rename = "motivo")]
    pub reason: Option<String>,
    /// Professional the block applies to; absent for clinic-wide blocks.
    #[serde(rename = "profissional")]
    pub professional: Option<String>,
}

/// Request to check a patient in for their booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinRequest {
    /// Booking being checked in.
    #[serde(rename = "id_marcacao")]
    pub booking_id: i64,
    /// Patient checking in.
    #[serde(rename = "id_paciente")]
    pub patient_id: i64,
}

/// Status of one exam result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExamResult {
    /// Result id.
    pub id: i64,
    /// Exam name.
    #[serde(rename = "exame")]
    pub exam: String,
    /// Exam date.
    #[serde(rename = "data")]
    pub date: String,
    /// Processing status.
    pub status: String,
    /// Whether the report is ready for download.
    #[serde(rename = "disponivel")]
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_deserializes_typed_payload() {
        let response: ExternalResponse<Vec<Specialty>> = serde_json::from_value(json!({
            "success": true,
            "data": [{"id": 3, "nome": "Dermatologia"}]
        }))
        .unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap()[0].name, "Dermatologia");
        assert!(response.error.is_none());
    }

    #[test]
    fn patient_identification_maps_wire_names() {
        let patient: PatientIdentification = serde_json::from_value(json!({
            "id_pessoa": 42,
            "st_nome": "Maria Souza",
            "st_cpf": "00011122233",
            "st_telefone": "+5584999990000"
        }))
        .unwrap();
        assert_eq!(patient.id, 42);
        assert_eq!(patient.name, "Maria Souza");
        assert_eq!(patient.cpf.as_deref(), Some("00011122233"));
        assert!(patient.email.is_none());
    }

    #[test]
    fn slot_query_pairs_include_range_and_filters() {
        let query = SlotQuery {
            specialty: Some(3),
            ..SlotQuery::range(
                NaiveDate::from_ymd_opt(2026, 2, 18).unwrap(),
                NaiveDate::from_ymd_opt(2026, 2, 25).unwrap(),
            )
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("especialidade", "3".to_string()),
                ("inicio", "2026-02-18".to_string()),
                ("fim", "2026-02-25".to_string()),
            ]
        );
    }

    #[test]
    fn confirmation_reply_serializes_to_wire_letter() {
        assert_eq!(
            serde_json::to_value(ConfirmationReply::Confirmed).unwrap(),
            json!("C")
        );
        assert_eq!(
            serde_json::to_value(ConfirmationReply::NoShow).unwrap(),
            json!("N")
        );
        assert_eq!(
            serde_json::to_value(ConfirmationReply::Reschedule).unwrap(),
            json!("R")
        );
    }

    #[test]
    fn reserve_request_serializes_wire_names() {
        let request = ReserveSlotRequest {
            slot_id: 9,
            patient_id: 42,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"id_horario": 9, "id_paciente": 42})
        );
    }

    #[test]
    fn confirm_booking_omits_absent_options() {
        let request = ConfirmBookingRequest {
            reservation_id: "res-1".to_string(),
            patient_id: 42,
            plan_id: None,
            note: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"id_reserva": "res-1", "id_paciente": 42})
        );
    }
}
