//! Feature services. Business logic lives here; every function returns
//! `Result<T, AppError>` and handlers only translate that into HTTP.

pub mod assignments;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod profiles;
pub mod submissions;
