//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod birth_plan_repo;
pub mod child_repo;
pub mod consultation_repo;
pub mod evolution_repo;
pub mod exam_repo;
pub mod health_center_repo;
pub mod health_record_repo;
pub mod medical_history_repo;
pub mod mother_repo;
pub mod pregnancy_repo;
pub mod prevention_message_repo;
pub mod qr_card_repo;
pub mod session_repo;
pub mod spouse_info_repo;
pub mod stats_repo;
pub mod treatment_repo;
pub mod user_repo;
pub mod vaccination_repo;

pub use appointment_repo::AppointmentRepo;
pub use birth_plan_repo::BirthPlanRepo;
pub use child_repo::ChildRepo;
pub use consultation_repo::ConsultationRepo;
pub use evolution_repo::EvolutionRepo;
pub use exam_repo::ExamRepo;
pub use health_center_repo::HealthCenterRepo;
pub use health_record_repo::HealthRecordRepo;
pub use medical_history_repo::MedicalHistoryRepo;
pub use mother_repo::MotherRepo;
pub use pregnancy_repo::PregnancyRepo;
pub use prevention_message_repo::PreventionMessageRepo;
pub use qr_card_repo::QrCardRepo;
pub use session_repo::SessionRepo;
pub use spouse_info_repo::SpouseInfoRepo;
pub use stats_repo::{MonthlySeries, StatsRepo};
pub use treatment_repo::TreatmentRepo;
pub use user_repo::UserRepo;
pub use vaccination_repo::VaccinationRepo;
