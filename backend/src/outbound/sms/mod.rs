//! SMS outbound adapters.
//!
//! A thin reqwest implementation of the `SmsGateway` port against the Twilio
//! Messages REST API.

mod dto;
mod twilio_gateway;

pub use twilio_gateway::{TwilioCredentials, TwilioSmsGateway};
