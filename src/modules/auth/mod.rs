pub mod controller;
pub mod registration;
pub mod response;
pub mod router;
pub mod service;

pub use registration::{
    AdminEnrollment, RegistrationError, RegistrationProcessor, SharedCodeEnrollment,
};
pub use response::{LoginOutcome, PostAuthRouter};
