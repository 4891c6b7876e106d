pub mod application;
pub mod candidate;
pub mod company;
pub mod event;
pub mod job;
pub mod question;
pub mod status;
pub mod token;
pub mod user;
