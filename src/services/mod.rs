pub mod application_service;
pub mod auth_service;
pub mod company_service;
pub mod event_service;
pub mod job_service;
pub mod question_service;
pub mod status_service;
