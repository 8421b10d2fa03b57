//! Client for the Klingo external (public) API.
//!
//! The external API sits next to the main platform and serves
//! patient-facing integrations: identification, open slots, reservations,
//! booking confirmation, telephony confirmation lists, NPS collection,
//! check-in and exam results. Unlike the main API it is authenticated with a
//! static `X-APP-TOKEN` header — no login flow, no token expiry to manage —
//! and it answers with typed payloads inside a `{success, data, ...}`
//! envelope.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{ExternalClient, ExternalClientBuilder};
pub use models::{
    BookingConfirmation, CheckinRequest, ConfirmBookingRequest, ConfirmationReply, Exam,
    ExamResult, ExternalResponse, HealthPlan, PatientIdentification, PhoneListAppointment, Price,
    Professional, Reservation, ReserveSlotRequest, ScheduleBlock, Slot, SlotQuery, Specialty,
    Voucher,
};

/// Convenient result alias that reuses the shared Klingo error type.
pub type Result<T> = klingo_core::Result<T>;
