pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::Store;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    company_service::CompanyService, event_service::EventService, job_service::JobService,
    question_service::QuestionService, status_service::StatusService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub status_service: StatusService,
    pub job_service: JobService,
    pub question_service: QuestionService,
    pub event_service: EventService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let auth_service = AuthService::new(store.clone());
        let company_service = CompanyService::new(store.clone());
        let status_service = StatusService::new(store.clone());
        let job_service = JobService::new(store.clone());
        let question_service = QuestionService::new(store.clone());
        let event_service = EventService::new(store.clone());
        let application_service = ApplicationService::new(store);

        Self {
            auth_service,
            company_service,
            status_service,
            job_service,
            question_service,
            event_service,
            application_service,
        }
    }
}
